use anyhow::{anyhow, Context};
use config::{Config, File};
use hexgrid::{
    timed, BoundedGrid, CoordinateEngine, GridConfig, HexCoordinate, Rect2D,
};
use log::{info, LevelFilter};
use serde::{Deserialize, Serialize};
use simple_logger::SimpleLogger;
use std::{
    path::{Path, PathBuf},
    process,
    sync::Arc,
};
use structopt::{clap::AppSettings, StructOpt};
use strum::{Display, EnumString};
use validator::Validate;

/// CLI for running queries against a hexagonal grid. Results are printed to
/// stdout as JSON.
#[derive(Debug, StructOpt)]
#[structopt(
    name = "hexgrid",
    global_settings = &[AppSettings::AllowNegativeNumbers]
)]
struct Opt {
    /// Path to a config file that defines the grid. Supported formats: JSON,
    /// TOML. Any field left out falls back to its default, and with no file at
    /// all the whole default config is used.
    #[structopt(short, long)]
    config: Option<PathBuf>,

    /// How to print results. Supported formats: json, pretty
    #[structopt(short, long, default_value = "pretty")]
    format: OutputFormat,

    /// The logging level to use. See
    /// https://docs.rs/log/0.4.11/log/enum.LevelFilter.html for options
    #[structopt(long, default_value = "warn")]
    log_level: LevelFilter,

    #[structopt(subcommand)]
    command: Command,
}

#[derive(Debug, StructOpt)]
enum Command {
    /// Find the cell covering a pixel
    Pixel { x: f32, y: f32 },
    /// Get the top-left corner of a cell's bounding box
    Origin { column: i32, row: i32 },
    /// Get the cell adjacent to another, in a direction 0-5 (clockwise)
    Neighbor {
        column: i32,
        row: i32,
        direction: i32,
    },
    /// Get the ring of cells at a distance from a center cell
    Ring { column: i32, row: i32, distance: i32 },
    /// List the cells of the grid that are visible in a viewport
    Visible {
        left: f32,
        top: f32,
        width: f32,
        height: f32,
        /// Check against the actual hexagons instead of their bounding boxes
        #[structopt(long)]
        accurate: bool,
    },
    /// Get the pixel size of the whole grid
    Extent,
    /// Print the full config in use, in TOML format
    Config,
}

/// Different ways to print results
#[derive(Copy, Clone, Debug, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
enum OutputFormat {
    /// Compact JSON, one result per line
    Json,
    /// Indented JSON
    Pretty,
}

/// Everything that can go in a config file
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
struct Settings {
    #[validate]
    grid: GridConfig,
    #[validate]
    model: ModelSettings,
}

/// Size of the grid that queries run against
#[derive(Copy, Clone, Debug, Serialize, Deserialize, Validate)]
#[serde(default)]
struct ModelSettings {
    #[validate(range(min = 0, max = 1000000))]
    columns: u32,
    #[validate(range(min = 0, max = 1000000))]
    rows: u32,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            columns: 64,
            rows: 64,
        }
    }
}

fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Config::new();
    if let Some(config_path) = config_path {
        let config_path = config_path.to_str().ok_or_else(|| {
            anyhow!("invalid character in path {:?}", config_path)
        })?;
        settings
            .merge(File::with_name(config_path))
            .context("error reading config file")?;
    }
    let settings: Settings =
        settings.try_into().context("error reading config")?;
    settings.validate().context("invalid config")?;
    Ok(settings)
}

/// Print a result in the requested format
fn print_output(
    format: OutputFormat,
    value: &impl Serialize,
) -> anyhow::Result<()> {
    let output = match format {
        OutputFormat::Json => serde_json::to_string(value),
        OutputFormat::Pretty => serde_json::to_string_pretty(value),
    }
    .context("error serializing output")?;
    println!("{}", output);
    Ok(())
}

/// Run the CLI with some options
fn run(opt: Opt) -> anyhow::Result<()> {
    SimpleLogger::new().with_level(opt.log_level).init()?;

    let settings = load_settings(opt.config.as_deref())?;
    let engine = CoordinateEngine::from_config(settings.grid)?;
    engine.bind_model(Arc::new(BoundedGrid::new(
        settings.model.columns,
        settings.model.rows,
    )));
    info!("Loaded grid {:?}", engine);

    let format = opt.format;
    match opt.command {
        Command::Pixel { x, y } => {
            print_output(format, &engine.pixel_to_hex(x, y))
        }
        Command::Origin { column, row } => {
            print_output(format, &engine.origin_of(column, row))
        }
        Command::Neighbor {
            column,
            row,
            direction,
        } => {
            let neighbor = engine
                .nearest_neighbor(HexCoordinate::new(column, row), direction)?;
            print_output(format, &neighbor)
        }
        Command::Ring {
            column,
            row,
            distance,
        } => {
            let ring = engine.ring(HexCoordinate::new(column, row), distance)?;
            print_output(format, &ring)
        }
        Command::Visible {
            left,
            top,
            width,
            height,
            accurate,
        } => {
            let viewport = Rect2D::new(left, top, width, height);
            let cells: Vec<HexCoordinate> = timed!(
                format!("Culling against {}", viewport),
                log::Level::Info,
                engine.enumerate_visible(viewport, accurate).collect()
            );
            print_output(format, &cells)
        }
        Command::Extent => print_output(format, &engine.visible_extent()),
        Command::Config => {
            let output = toml::to_string_pretty(&settings)
                .context("error serializing config")?;
            print!("{}", output);
            Ok(())
        }
    }
}

fn main() {
    let exit_code = match run(Opt::from_args()) {
        Ok(_) => 0,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            1
        }
    };
    process::exit(exit_code);
}
