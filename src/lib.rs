//! Rust Address Validator Library
//! # Overview
//!
//! This library reads US street addresses from CSV, verifies them against a
//! remote street-address service and renders one result line per input row:
//!
//! ```text
//! 143 e Maine Street, Columbus, 43215 -> 143 E Main St, Columbus, 43215-5370
//! 1 Empora St, Title, 11111 -> Invalid Address
//! ```
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (AddressRow, Lookup, Candidate, errors)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::batch`] - Lookup keys and the bounded, deduplicated batch
//!   - [`core::client`] - One round-trip per `load_results`
//!   - [`core::formatter`] - Display formatting of the best candidate
//!   - [`core::cache`] - Persistent single-lookup cache
//! - [`io`] - CSV input, result output, cache file and HTTP transport
//! - [`strategy`] - Batched and cached validation, and the memoized transformer
//!
//! # Lookup keys
//!
//! Every address is identified by the concatenation of street, city and zip
//! code exactly as parsed, truncated to 32 characters. The key deduplicates
//! batch entries, indexes results and names cache entries.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use core::{format_result, lookup_key, Batch, CachedSingleLookup, ClientConfig, VerificationClient};
pub use io::{write_results, AddressTable, HttpTransport, JsonCacheFile};
pub use strategy::{create_strategy, AddressTransformer, ValidationStrategy};
pub use types::{AddressError, AddressRow, Candidate, Credentials, Lookup, ValidatedResults};
