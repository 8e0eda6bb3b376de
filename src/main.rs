//! Rust Address Validator CLI
//!
//! Command-line interface for validating US street addresses from CSV files.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- addresses.csv
//! cargo run -- --batch-size 50 addresses.csv
//! cargo run -- --mode cached --cache-file cache.json addresses.csv
//! cat addresses.csv | cargo run
//! ```
//!
//! Credentials are read from `--auth-id`/`--auth-token`, or from
//! `SMARTY_AUTH_ID`/`SMARTY_AUTH_TOKEN` (a `.env` file is honored). One line
//! per input row is written to stdout; logs go to stderr and are controlled
//! with `RUST_LOG` (default `warn`).
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (unreadable input, malformed CSV, rejected credentials, service failure)
//! - 2: Invalid command-line arguments

use rust_address_validator::cli;
use rust_address_validator::strategy::{self, AddressTransformer};
use rust_address_validator::types::AddressError;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = cli::parse_args();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &cli::CliArgs) -> Result<(), AddressError> {
    let input: Box<dyn Read> = match &args.input_file {
        Some(path) => {
            let file = File::open(path).map_err(|e| AddressError::IoError {
                message: format!("Failed to open file '{}': {}", path.display(), e),
            })?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    let config = args.to_client_config();
    let strategy =
        strategy::create_strategy(args.mode, args.credentials(), &config, &args.cache_file)?;

    let mut transformer = AddressTransformer::from_reader(input, strategy)?;
    let mut output = io::stdout().lock();
    transformer.write_results(&mut output)
}
