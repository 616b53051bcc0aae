use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Column '{column}' not found. Available columns: {}", available.join(", "))]
    ColumnNotFound {
        column: String,
        available: Vec<String>,
    },

    #[error("CSV input contains no header line")]
    EmptyInput,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid color '{0}'")]
    InvalidColor(String),

    #[error("Unknown palette '{0}'")]
    UnknownPalette(String),

    #[error("Style parse error: {0}")]
    StyleParse(#[from] toml::de::Error),

    #[error("Invalid style: {0}")]
    InvalidStyle(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Drawing failed: {0}")]
    Backend(String),

    #[error("Surface of {width}x{height} pixels is too large")]
    SurfaceTooLarge { width: u32, height: u32 },

    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, ChartError>;
