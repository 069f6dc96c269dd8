//! Anchor Layout CLI
//!
//! Usage:
//!   anchor-layout [OPTIONS] [FILE]
//!
//! Reads a TOML blueprint, installs its anchors, applies its updates and
//! prints the resolved box of every node.
//!
//! Options:
//!   -v, --verbose  Log anchoring activity to stderr (repeat for more)
//!   -h, --help     Print help

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use anchor_layout::resolve;

#[derive(Parser)]
#[command(name = "anchor-layout")]
#[command(about = "Resolve edge anchors in a scene blueprint")]
struct Cli {
    /// Blueprint file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Log anchoring activity to stderr; -v for debug, -vv for every write
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "anchor_layout=debug",
        _ => "anchor_layout=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let source = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    match resolve(&source) {
        Ok(report) => print!("{}", report),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
