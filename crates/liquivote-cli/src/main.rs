//! Liquivote CLI - Command-line interface for liquid democracy tallying.
//!
//! Reads vote commands line by line ("NAME pick ALT", "NAME delegate NAME")
//! from stdin or a file, resolves delegations and prints the tally.

pub mod app;
pub mod command;
pub mod output;
pub mod telemetry;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use clap::Parser;
use colored::Colorize;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "liquivote")]
#[command(about = "Liquivote - Liquid democracy vote tallying")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Read commands from a file instead of stdin
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<std::path::PathBuf>,

    /// Show each voter with their resolved (possibly indirect) choice
    #[arg(long)]
    pub open: bool,

    /// Emit machine-readable JSON instead of the text report
    #[arg(long)]
    pub json: bool,

    /// Log level
    #[arg(short, long, default_value = "warn")]
    pub log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    telemetry::init(&args.log_level)?;

    let input = input_reader(args.input.as_deref())?;
    let stdout = io::stdout();
    if let Err(e) = app::run(&args, input, &mut stdout.lock()) {
        eprintln!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }

    Ok(())
}

/// Open the command source: a file when given, stdin otherwise.
pub fn input_reader(path: Option<&Path>) -> anyhow::Result<Box<dyn BufRead>> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .map_err(|e| anyhow::anyhow!("Failed to open input file '{}': {}", path.display(), e))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}
