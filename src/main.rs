//! Shelfmark CLI
//!
//! Reads one metadata file, normalizes it, and prints the canonical records
//! as JSON on stdout. Logs go to stderr.

use std::fs;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shelfmark::{config::AppConfig, ingest, IngestError, SourceFormat};

/// Normalize ONIX and spreadsheet book metadata into canonical records
#[derive(Parser, Debug)]
#[command(name = "shelfmark", version, about)]
struct Cli {
    /// Path to the input file (.xml, .xlsx or .csv)
    input: PathBuf,

    /// Override format detection
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Pretty-print the JSON output
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Onix,
    Xlsx,
    Csv,
}

impl From<FormatArg> for SourceFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Onix => SourceFormat::Onix,
            FormatArg::Xlsx => SourceFormat::Xlsx,
            FormatArg::Csv => SourceFormat::Csv,
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("shelfmark={}", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let format = match cli.format {
        Some(arg) => SourceFormat::from(arg),
        None => {
            let filename = cli.input.to_string_lossy();
            SourceFormat::detect(&filename, None)
                .ok_or_else(|| IngestError::UnsupportedFormat(filename.into_owned()))?
        }
    };

    tracing::info!(?format, file = %cli.input.display(), "ingesting file");

    let bytes = fs::read(&cli.input)?;
    let books = ingest::parse(&bytes, format, &config.onix)?;

    let json = if cli.pretty {
        serde_json::to_string_pretty(&books)?
    } else {
        serde_json::to_string(&books)?
    };
    println!("{json}");

    Ok(())
}
