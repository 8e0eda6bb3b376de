//! Core business logic module
//!
//! This module contains the address verification components:
//! - `traits` - Seams for the remote transport and cache persistence
//! - `batch` - Lookup key derivation and the bounded, deduplicated batch
//! - `client` - Verification client driving remote round-trips
//! - `formatter` - Display formatting of verified results
//! - `cache` - Persistent single-lookup cache wrapping the client

pub mod batch;
pub mod cache;
pub mod client;
pub mod formatter;
pub mod traits;

pub use batch::{freeform_street, lookup_key, Batch, LOOKUP_KEY_LENGTH, MAX_BATCH_SIZE};
pub use cache::CachedSingleLookup;
pub use client::{ClientConfig, VerificationClient, DEFAULT_BASE_URL, DEFAULT_LICENSE};
pub use formatter::{format_result, INVALID_ADDRESS};
pub use traits::{CacheStore, StreetLookupTransport};
