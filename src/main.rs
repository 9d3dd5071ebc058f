use clap::{Parser, Subcommand};
use justified_layout::config::{self, LayoutConfig};
use justified_layout::imaging::RustBackend;
use justified_layout::layout::LayoutEngine;
use justified_layout::preview::{self, Direction};
use justified_layout::types::{self, Item};
use justified_layout::{output, scan};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "justified-layout")]
#[command(about = "Justified image layout: rows of near-uniform height that fill the width")]
#[command(long_about = "\
Justified image layout: rows of near-uniform height that fill the width

Items are aspect ratios (1.5), dimensions ({\"width\": 1600, \"height\": 1200})
or shaped objects ({\"aspectRatio\": 1.5}). Any extra fields on an object are
passed through to its box.

Typical flow:

  justified-layout scan photos/ --output items.json
  justified-layout layout items.json --output layout.json
  justified-layout preview items.json --output preview.html

Configuration is read from layout.toml in --config-dir when present.
Run 'justified-layout gen-config' to generate a documented layout.toml.

Set RUST_LOG=debug to see per-row decisions on stderr.")]
#[command(version)]
struct Cli {
    /// Directory containing layout.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    /// Override container_width from layout.toml
    #[arg(long, global = true)]
    container_width: Option<f64>,

    /// Override target_row_height from layout.toml
    #[arg(long, global = true)]
    target_row_height: Option<f64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Read image dimensions from a directory into an items file
    Scan {
        /// Directory of images, ordered by NNN- prefix
        dir: PathBuf,
        /// Write items JSON here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Compute the layout for an items file
    Layout {
        /// JSON array of items
        items: PathBuf,
        /// Write layout JSON here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Render the layout for an items file as an HTML page
    Preview {
        /// JSON array of items
        items: PathBuf,
        /// HTML file to write
        #[arg(long)]
        output: PathBuf,
        /// Mirror boxes for a right-to-left page
        #[arg(long)]
        rtl: bool,
    },
    /// Print a stock layout.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match &cli.command {
        Command::Scan { dir, output: out } => {
            let images = scan::scan(dir, &RustBackend::new())?;
            let json = serde_json::to_string_pretty(&scan::to_items(&images))?;
            write_or_print(out.as_deref(), &json)?;
            output::print_scan_output(&images);
        }
        Command::Layout { items, output: out } => {
            let config = load_config(&cli)?;
            let items = read_items(items)?;
            let layout = LayoutEngine::new(&config)?.compute(&items)?;
            let json = serde_json::to_string_pretty(&layout)?;
            write_or_print(out.as_deref(), &json)?;
            output::print_layout_output(&layout);
        }
        Command::Preview {
            items,
            output: out,
            rtl,
        } => {
            let config = load_config(&cli)?;
            let title = items
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| "Preview".to_string());
            let items = read_items(items)?;
            let layout = LayoutEngine::new(&config)?.compute(&items)?;
            let direction = if *rtl { Direction::Rtl } else { Direction::Ltr };
            let page = preview::render_page(&title, &layout, config.container_width, direction);
            std::fs::write(out, page.into_string())?;
            output::print_layout_output(&layout);
            eprintln!("==> Preview written to {}", out.display());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Stock defaults, then `layout.toml`, then command-line overrides.
fn load_config(cli: &Cli) -> Result<LayoutConfig, config::ConfigError> {
    let file = config::load_raw_config(&cli.config_dir)?;

    let mut overrides = toml::map::Map::new();
    if let Some(width) = cli.container_width {
        overrides.insert("container_width".into(), toml::Value::Float(width));
    }
    if let Some(height) = cli.target_row_height {
        overrides.insert("target_row_height".into(), toml::Value::Float(height));
    }

    let layers = file
        .into_iter()
        .chain(std::iter::once(toml::Value::Table(overrides)));
    config::resolve_config(config::stock_defaults_value(), layers)
}

fn read_items(path: &Path) -> Result<Vec<Item>, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    let items = types::parse_items(&content)?;
    log::debug!("read {} items from {}", items.len(), path.display());
    Ok(items)
}

fn write_or_print(path: Option<&Path>, json: &str) -> std::io::Result<()> {
    match path {
        Some(path) => std::fs::write(path, json),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}
