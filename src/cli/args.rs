use crate::core::client::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_LICENSE};
use crate::io::DEFAULT_CACHE_FILE;
use crate::types::Credentials;
use clap::{Parser, ValueEnum};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Validate US street addresses from a CSV file against a verification service
#[derive(Parser)]
#[command(name = "address-validator")]
#[command(
    about = "Validate US street addresses from a CSV file against a verification service",
    long_about = None
)]
pub struct CliArgs {
    /// Input CSV file with street, city and zip code columns
    #[arg(
        value_name = "INPUT",
        help = "Path to the input CSV file (reads standard input when omitted)"
    )]
    pub input_file: Option<PathBuf>,

    /// Validation strategy
    #[arg(
        long = "mode",
        value_name = "MODE",
        default_value = "batch",
        help = "Validation mode: 'batch' sends rows in batches, 'cached' looks rows up one at a time through a cache file"
    )]
    pub mode: StrategyType,

    /// Number of lookups per round-trip
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of lookups per request (default: 100, maximum: 100)"
    )]
    pub batch_size: Option<usize>,

    /// Cache file used by the cached mode
    #[arg(
        long = "cache-file",
        value_name = "PATH",
        default_value = DEFAULT_CACHE_FILE,
        help = "JSON file holding cached results (cached mode only)"
    )]
    pub cache_file: PathBuf,

    #[arg(
        long = "auth-id",
        env = "SMARTY_AUTH_ID",
        hide_env_values = true,
        help = "Service auth id"
    )]
    pub auth_id: String,

    #[arg(
        long = "auth-token",
        env = "SMARTY_AUTH_TOKEN",
        hide_env_values = true,
        help = "Service auth token"
    )]
    pub auth_token: String,

    #[arg(long = "base-url", value_name = "URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(long = "license", value_name = "LICENSE", default_value = DEFAULT_LICENSE)]
    pub license: String,

    /// Per-request timeout in seconds
    #[arg(long = "timeout-secs", value_name = "SECONDS", default_value_t = 30)]
    pub timeout_secs: u64,
}

// Credentials are redacted
impl fmt::Debug for CliArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CliArgs")
            .field("input_file", &self.input_file)
            .field("mode", &self.mode)
            .field("batch_size", &self.batch_size)
            .field("cache_file", &self.cache_file)
            .field("auth_id", &"<redacted>")
            .field("auth_token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("license", &self.license)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Available validation strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Batch,
    Cached,
}

impl CliArgs {
    /// Create a ClientConfig from CLI arguments
    ///
    /// Batch size falls back to the default when omitted. Out-of-range values
    /// are corrected by `ClientConfig::with_batch_size`, which logs a warning.
    ///
    /// # Returns
    ///
    /// A `ClientConfig` with values from CLI arguments or defaults.
    pub fn to_client_config(&self) -> ClientConfig {
        let base = match self.batch_size {
            Some(size) => ClientConfig::with_batch_size(size),
            None => ClientConfig::default(),
        };

        ClientConfig {
            base_url: self.base_url.clone(),
            license: self.license.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            ..base
        }
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.auth_id.as_str(), self.auth_token.as_str())
    }
}
