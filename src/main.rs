//! Keycap Sheet CLI
//!
//! Usage:
//!   keycap-sheet [--verbose] OUTPUT
//!
//! Renders the embedded keymap onto an A4 label sheet and writes the SVG
//! document to OUTPUT. With `--verbose` every placed key is logged;
//! `RUST_LOG` overrides the log filter.

use std::path::PathBuf;
use std::process;

use clap::error::ErrorKind;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use keycap_sheet::{write_sheet, GenerateConfig, Keymap};

#[derive(Parser)]
#[command(name = "keycap-sheet")]
#[command(about = "Generate a printable SVG sheet of keycap labels")]
#[command(version)]
struct Cli {
    /// Output SVG file
    output: PathBuf,

    /// Log every placed key
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                e.exit();
            }
            // Usage errors exit with 1, not clap's default 2
            let _ = e.print();
            process::exit(1);
        }
    };

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with_target(false)
        .init();

    let keymap = match Keymap::embedded() {
        Ok(keymap) => keymap,
        Err(e) => {
            eprintln!("Error loading keymap: {}", e);
            process::exit(1);
        }
    };

    match write_sheet(&cli.output, &keymap, &GenerateConfig::default()) {
        Ok(report) => {
            info!(
                keys = keymap.keys.len(),
                placements = report.placements,
                unused = report.remaining,
                "wrote {}",
                cli.output.display()
            );
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
