mod clean;
mod config;
mod rename;
mod scrape;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Offline data preparation for the topolect map viewer: fetch province
/// locator maps, strip their decorative layers, and normalize the rasterized
/// filenames the client loads at startup.
#[derive(Parser)]
#[command(name = "topolect-tools", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch province locator-map SVGs from Wikimedia Commons.
    Scrape {
        /// File with one province name per line; defaults to the builtin
        /// atlas provinces.
        #[arg(long)]
        names: Option<PathBuf>,
        /// Directory the downloaded SVGs are written to.
        #[arg(long, default_value = "data")]
        out: PathBuf,
    },
    /// Strip decorative element classes from downloaded SVGs, writing
    /// `<name>_cleaned.svg` alongside each input.
    Clean {
        #[arg(long)]
        names: Option<PathBuf>,
        /// Directory holding the downloaded SVGs.
        #[arg(long, default_value = "data")]
        dir: PathBuf,
    },
    /// Copy rasterized `<name>_cleaned.png` layers to `<name>.png`.
    Rename {
        #[arg(long)]
        names: Option<PathBuf>,
        /// Directory holding the rasterized layer images.
        #[arg(long, default_value = "map")]
        dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Scrape { names, out } => {
            scrape::run(&province_names(names.as_deref())?, &out).await
        }
        Command::Clean { names, dir } => clean::run(&province_names(names.as_deref())?, &dir),
        Command::Rename { names, dir } => rename::run(&province_names(names.as_deref())?, &dir),
    }
}

fn province_names(path: Option<&Path>) -> Result<Vec<String>> {
    match path {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("read name list {}", path.display()))?;
            Ok(contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect())
        }
        None => Ok(topolect_shared::Atlas::builtin()
            .all_provinces()
            .iter()
            .cloned()
            .collect()),
    }
}
