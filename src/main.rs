use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use surveygraph::aggregate::Aggregator;
use surveygraph::collision::Point;
use surveygraph::csv_reader;
use surveygraph::graph::GraphData;
use surveygraph::palette::ColorPalette;
use surveygraph::runtime::{self, Aggregation, OutputFormat, RenderOptions};
use surveygraph::style::{ChartColors, ChartConfig};

#[derive(Parser, Debug)]
#[command(name = "surveygraph")]
#[command(about = "Render bar charts from survey CSV data", long_about = None)]
struct Args {
    #[arg(short = 'i', long = "input", global = true, help = "CSV file to read (defaults to stdin)")]
    input: Option<PathBuf>,

    #[arg(short = 'o', long = "output", global = true, help = "File to write (defaults to stdout)")]
    output: Option<PathBuf>,

    #[arg(long = "config", global = true, help = "TOML chart configuration file")]
    config: Option<PathBuf>,

    #[arg(long = "width", global = true, help = "Output width in pixels")]
    width: Option<u32>,

    #[arg(long = "height", global = true, help = "Output height in pixels")]
    height: Option<u32>,

    #[arg(long = "palette", global = true, help = "Color palette for groups (e.g. earth_clay, ocean_blue)")]
    palette: Option<String>,

    #[arg(long = "hover", global = true, value_parser = parse_point, help = "Pointer position as X,Y; shows a tooltip for the bar segment under it")]
    hover: Option<Point>,

    #[arg(long = "format", global = true, value_enum, default_value_t = Format::Png, help = "Image format")]
    format: Format,

    #[arg(long = "dark", global = true, help = "Use the dark color preset")]
    dark: bool,

    #[arg(long = "json", global = true, help = "Print the aggregated graph data as JSON instead of an image")]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// One bar per distinct value of a column
    Count {
        /// Column to count
        category: String,
    },
    /// Bars per value of CATEGORY, stacked by values of FILTER
    CountBy {
        category: String,
        filter: String,
    },
    /// Render graph data from a JSON file
    Render {
        data: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Png,
    Svg,
}

fn parse_point(input: &str) -> std::result::Result<Point, String> {
    let (x, y) = input
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{}'", input))?;
    let x = x.trim().parse::<f64>().map_err(|e| format!("invalid X: {}", e))?;
    let y = y.trim().parse::<f64>().map_err(|e| format!("invalid Y: {}", e))?;
    Ok(Point::new(x, y))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ChartConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ChartConfig::default(),
    };
    if let Some(palette) = &args.palette {
        config.palette = palette.clone();
    }
    if args.dark {
        config.style.colors = ChartColors::dark();
    }

    let palette = config.color_palette().context("Failed to select palette")?;
    let data = load_graph_data(&args, palette)?;

    let bytes = if args.json {
        let mut json = serde_json::to_vec_pretty(&data).context("Failed to serialize graph data")?;
        json.push(b'\n');
        json
    } else {
        let options = RenderOptions {
            width: args.width.unwrap_or(config.width),
            height: args.height.unwrap_or(config.height),
            style: config.style,
            pointer: args.hover,
            format: match args.format {
                Format::Png => OutputFormat::Png,
                Format::Svg => OutputFormat::Svg,
            },
        };
        runtime::render_graph(data, &options).context("Failed to render chart")?
    };

    write_output(args.output.as_ref(), &bytes)
}

fn load_graph_data(args: &Args, palette: ColorPalette) -> Result<GraphData> {
    let aggregation = match &args.command {
        Command::Render { data } => {
            let text = fs::read_to_string(data)
                .with_context(|| format!("Failed to read {}", data.display()))?;
            return serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse graph data in {}", data.display()));
        }
        Command::Count { category } => Aggregation::Count { category: category.clone() },
        Command::CountBy { category, filter } => Aggregation::CountBy {
            category: category.clone(),
            filter: filter.clone(),
        },
    };

    let table = match &args.input {
        Some(path) => csv_reader::read_table_from_path(path),
        None => csv_reader::read_table_from_stdin(),
    }
    .context("Failed to read CSV")?;

    runtime::aggregate(&table, &aggregation, &Aggregator::new(palette))
        .context("Failed to aggregate survey data")
}

fn write_output(path: Option<&PathBuf>, bytes: &[u8]) -> Result<()> {
    match path {
        Some(path) => fs::write(path, bytes)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(bytes)
                .context("Failed to write output to stdout")?;
            handle.flush().context("Failed to flush stdout")?;
            Ok(())
        }
    }
}
