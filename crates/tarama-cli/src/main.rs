//! Tarama - Turkish-diacritic-aware search from the command line
//!
//! Usage:
//!     echo "füyûzât kitabı" | tarama contains fuyuzat
//!     tarama --text "Dervişler sohbet ediyordu" highlight dervis
//!     tarama --config tarama.json rank zikir < titles.txt
//!
//! Configuration:
//! - `--config <file>`: JSON engine config (threshold, markup, table edits)
//! - `TARAMA_THRESHOLD`, `TARAMA_MAX_RESULTS`: environment overrides
//! - `RUST_LOG`: logging filter (default: warn)

mod commands;
mod logging;

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tarama_core::{EngineConfig, SearchEngine};
use tracing::{debug, info};

use commands::Command;

#[derive(Parser, Debug)]
#[command(name = "tarama")]
#[command(about = "Turkish-diacritic-aware text search and highlighting")]
#[command(version)]
struct Args {
    /// Input text (read from stdin when omitted)
    #[arg(short, long, global = true)]
    text: Option<String>,

    /// JSON engine configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Emit JSON instead of plain text
    #[arg(long, global = true)]
    json: bool,

    /// Default log filter (debug, info, warn, error)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

fn load_config(path: Option<&PathBuf>) -> tarama_core::Result<EngineConfig> {
    let config = match path {
        Some(path) => {
            info!(path = %path.display(), "loading config");
            EngineConfig::from_file(path)?
        }
        None => EngineConfig::default(),
    };
    Ok(config.apply_env())
}

fn read_text(text: Option<String>) -> std::io::Result<String> {
    match text {
        Some(text) => Ok(text),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            // Drop the trailing newline shells add to piped input
            if buf.ends_with('\n') {
                buf.pop();
                if buf.ends_with('\r') {
                    buf.pop();
                }
            }
            Ok(buf)
        }
    }
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = Args::parse();
    logging::init_with_filter(&args.log_level);

    let config = load_config(args.config.as_ref())?;
    debug!(threshold = config.threshold, max_results = config.max_results, "engine config");
    let engine = SearchEngine::try_with_config(config)?;

    let text = if args.command.needs_text() {
        read_text(args.text)?
    } else {
        String::new()
    };

    let outcome = commands::run(&engine, &args.command, &text);
    println!("{}", outcome.render(args.json)?);

    Ok(if outcome.success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
