// CLI module
// Command-line interface and argument parsing

mod args;

pub use args::{CliArgs, StrategyType};

use clap::Parser;

/// Parse command-line arguments using clap
///
/// Credentials may come from `--auth-id`/`--auth-token` or from the
/// `SMARTY_AUTH_ID`/`SMARTY_AUTH_TOKEN` environment variables. If parsing
/// fails (invalid arguments, missing credentials, or `--help`), clap prints
/// an error or help text and exits the process.
///
/// # Returns
///
/// Returns a `CliArgs` struct with the parsed command-line arguments.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
