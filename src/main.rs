use std::path::PathBuf;

use anyhow::Context;
use arctic_dock::Config;
use arctic_dock::format::{ColorFormat, format_color};
use arctic_dock::palette::PALETTE;
use clap::{ArgAction, Parser};

#[derive(Parser, Debug)]
#[command(name = "arctic-dock")]
#[command(
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("ARCTIC_DOCK_GIT_HASH"), ")"),
    about = "Nord palette dock for X11: click a swatch to copy its color"
)]
struct Cli {
    /// Read configuration from this file instead of ~/.config/arctic-dock/config.toml
    #[arg(long, short = 'c', value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print every palette color and exit without opening a window
    #[arg(long, action = ArgAction::SetTrue)]
    print_palette: bool,

    /// Output format for --print-palette (html-hex, raw-hex, css-rgb, css-rgba, hsl, float, vec3, vec4)
    #[arg(long, short = 'f', value_name = "FORMAT", requires = "print_palette")]
    format: Option<ColorFormat>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.print_palette {
        let format = cli.format.unwrap_or_default();
        for entry in PALETTE.iter() {
            println!("{}\t{}", entry.label, format_color(entry.color, format));
        }
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().context("Failed to load configuration")?,
    };

    log::info!("Starting Arctic Nord dock");
    if let Err(err) = arctic_dock::backend::run_x11(config) {
        log::error!("{:#}", err);
        return Err(err);
    }

    Ok(())
}
