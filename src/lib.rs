// Library exports for surveygraph

pub mod aggregate;
pub mod collision;
pub mod csv_reader;
pub mod error;
pub mod graph;
pub mod palette;
pub mod runtime;
pub mod scale;
pub mod style;

// Rendering
pub mod backend;
pub mod ir;
pub mod renderer;

pub use error::{ChartError, Result};
