//! Core traits for the remote transport and cache persistence
//!
//! These seams let the verification client and the cache wrapper run against
//! the real HTTP service and JSON file, or against in-memory stand-ins.

use crate::types::{AddressError, Candidate, Lookup};
use std::collections::BTreeMap;

/// Trait for sending lookups to the verification service
///
/// One call is one round-trip. The response is every candidate for every
/// lookup, each tagged with the `input_index` of the lookup it answers.
pub trait StreetLookupTransport {
    /// Submit `lookups` in order and return the candidates
    ///
    /// Implementations must map an authentication rejection to
    /// `BadCredentials`, a payload rejection to `UnprocessableInput`, and any
    /// other failure to `RemoteFailure`. They must not retry.
    fn send(&self, lookups: &[Lookup]) -> Result<Vec<Candidate>, AddressError>;
}

/// Trait for loading and storing the lookup-key to formatted-result mapping
pub trait CacheStore {
    /// Read the persisted mapping; a missing or empty store is an empty map
    fn load(&self) -> Result<BTreeMap<String, String>, AddressError>;

    /// Replace the persisted mapping wholesale
    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), AddressError>;
}
