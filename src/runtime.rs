// Pipeline from a parsed table to rendered chart bytes

use crate::aggregate::Aggregator;
use crate::backend::{BitmapSurface, Surface, SvgSurface};
use crate::collision::Point;
use crate::csv_reader::Table;
use crate::error::Result;
use crate::graph::GraphData;
use crate::renderer::ChartRenderer;
use crate::style::ChartStyle;
use log::info;

/// Which aggregation turns the table into bars
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Aggregation {
    Count { category: String },
    CountBy { category: String, filter: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Png,
    Svg,
}

/// Everything needed to draw one frame besides the data
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub style: ChartStyle,
    pub pointer: Option<Point>,
    pub format: OutputFormat,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            width: crate::renderer::DEFAULT_WIDTH,
            height: crate::renderer::DEFAULT_HEIGHT,
            style: ChartStyle::default(),
            pointer: None,
            format: OutputFormat::Png,
        }
    }
}

pub fn aggregate(table: &Table, aggregation: &Aggregation, aggregator: &Aggregator) -> Result<GraphData> {
    match aggregation {
        Aggregation::Count { category } => aggregator.count(category, table),
        Aggregation::CountBy { category, filter } => aggregator.count_by(category, filter, table),
    }
}

/// Render `data` as a single frame in the requested format
pub fn render_graph(data: GraphData, options: &RenderOptions) -> Result<Vec<u8>> {
    let mut renderer = ChartRenderer::new(data, options.style.clone())?
        .with_size(options.width, options.height);
    renderer.set_pointer(options.pointer);

    if let Some(hover) = renderer.hit_test() {
        info!(
            "Pointer over bar {} segment {} ({:?} = {})",
            hover.bar_index, hover.segment_index, hover.name, hover.value
        );
    }

    match options.format {
        OutputFormat::Png => {
            let mut surface = BitmapSurface::new(options.width, options.height)?;
            renderer.render(&mut surface)?;
            surface.to_png()
        }
        OutputFormat::Svg => {
            let mut surface = SvgSurface::new(options.width, options.height);
            renderer.render(&mut surface)?;
            Ok(surface.into_string().into_bytes())
        }
    }
}

/// Aggregate `table` and render the result
pub fn render_table(
    table: &Table,
    aggregation: &Aggregation,
    aggregator: &Aggregator,
    options: &RenderOptions,
) -> Result<Vec<u8>> {
    let data = aggregate(table, aggregation, aggregator)?;
    render_graph(data, options)
}
