//! Validation strategy module
//!
//! This module defines the Strategy pattern for turning parsed address rows
//! into validated results. Two strategies share one interface and are chosen
//! at construction time:
//!
//! - **batch**: rows are sent in slices of up to `max_batch_size`, one
//!   round-trip per slice
//! - **cached**: rows are looked up one at a time through a persistent cache,
//!   which is written back at the end of the run

use crate::cli::StrategyType;
use crate::core::cache::CachedSingleLookup;
use crate::core::client::{ClientConfig, VerificationClient};
use crate::io::{HttpTransport, JsonCacheFile};
use crate::types::{AddressError, AddressRow, Credentials, ValidatedResults};
use std::path::Path;

pub mod batched;
pub mod cached;
pub mod transformer;

pub use batched::BatchedStrategy;
pub use cached::CachedStrategy;
pub use transformer::AddressTransformer;

/// Validation strategy trait
///
/// Every implementation produces the same contract: one entry per distinct
/// lookup key, in processing order, holding `"<original> -> <formatted>"`.
pub trait ValidationStrategy {
    /// Validate `rows` and return the results keyed by lookup key
    ///
    /// # Errors
    ///
    /// Any remote or cache failure aborts processing and is returned as-is;
    /// no partial results are produced.
    fn process(&mut self, rows: &[AddressRow]) -> Result<ValidatedResults, AddressError>;
}

/// Create a validation strategy backed by the HTTP service
///
/// # Arguments
///
/// * `strategy_type` - Which strategy to build
/// * `credentials` - Service credentials
/// * `config` - Batch size and transport settings
/// * `cache_file` - Cache location (used by the cached strategy only)
///
/// # Errors
///
/// `RemoteFailure` if the HTTP client cannot be built.
pub fn create_strategy(
    strategy_type: StrategyType,
    credentials: Credentials,
    config: &ClientConfig,
    cache_file: &Path,
) -> Result<Box<dyn ValidationStrategy>, AddressError> {
    let transport = HttpTransport::new(credentials, config)?;
    let client = VerificationClient::new(transport, config.max_batch_size);

    Ok(match strategy_type {
        StrategyType::Batch => Box::new(BatchedStrategy::new(client)),
        StrategyType::Cached => {
            let store = JsonCacheFile::new(cache_file);
            Box::new(CachedStrategy::new(CachedSingleLookup::new(client, store)))
        }
    })
}
