//! Verification client
//!
//! This module provides the `VerificationClient`, which owns the pending
//! `Batch` and the transport to the remote service. Callers add lookups,
//! execute one round-trip with `load_results`, read results from the batch,
//! and clear it before the next round.
//!
//! # Round-trips
//!
//! One call to `load_results` is exactly one request to the service, however
//! many lookups are pending. No retry is attempted; failures propagate.

use crate::core::batch::{Batch, MAX_BATCH_SIZE};
use crate::core::traits::StreetLookupTransport;
use crate::types::{AddressError, Lookup};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default endpoint of the US street-address service
pub const DEFAULT_BASE_URL: &str = "https://us-street.api.smartystreets.com/street-address";

/// Default license requested from the service
pub const DEFAULT_LICENSE: &str = "us-core-cloud";

/// Configuration for the verification client and its HTTP transport
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Maximum lookups per round-trip (never above `MAX_BATCH_SIZE`)
    pub max_batch_size: usize,
    /// Service endpoint
    pub base_url: String,
    /// License requested on every call
    pub license: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            max_batch_size: MAX_BATCH_SIZE,
            base_url: DEFAULT_BASE_URL.to_string(),
            license: DEFAULT_LICENSE.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    /// Create a ClientConfig with a custom batch size
    ///
    /// A batch size of zero falls back to the default; anything above the
    /// service ceiling is clamped to it.
    pub fn with_batch_size(max_batch_size: usize) -> Self {
        let default = Self::default();

        let max_batch_size = if max_batch_size == 0 {
            warn!(
                "Invalid batch_size ({}), using default ({})",
                max_batch_size, default.max_batch_size
            );
            default.max_batch_size
        } else if max_batch_size > MAX_BATCH_SIZE {
            warn!(
                "batch_size {} exceeds the service limit, clamping to {}",
                max_batch_size, MAX_BATCH_SIZE
            );
            MAX_BATCH_SIZE
        } else {
            max_batch_size
        };

        Self {
            max_batch_size,
            ..default
        }
    }
}

/// Batching client for the remote verification service
pub struct VerificationClient<T> {
    transport: T,
    batch: Batch,
}

impl<T: StreetLookupTransport> VerificationClient<T> {
    /// Create a client with an empty batch of at most `max_batch_size` lookups
    pub fn new(transport: T, max_batch_size: usize) -> Self {
        VerificationClient {
            transport,
            batch: Batch::new(max_batch_size),
        }
    }

    /// Add a lookup for an address to the pending batch
    ///
    /// Adding an address whose key is already pending returns the pending
    /// lookup and does not consume capacity.
    ///
    /// # Errors
    ///
    /// Returns `BatchFull` when the batch is at its ceiling.
    pub fn add_lookup(
        &mut self,
        street: &str,
        city: &str,
        zip_code: &str,
    ) -> Result<&Lookup, AddressError> {
        let lookup = self.batch.add(street, city, zip_code)?;
        debug!(input_id = %lookup.input_id, "lookup pending");
        Ok(lookup)
    }

    /// Send the pending batch in one round-trip and fill in every result
    ///
    /// Each lookup's previous result is replaced. Candidates are matched to
    /// lookups by `input_index`, i.e. by submission order. An empty batch
    /// makes no request.
    ///
    /// # Errors
    ///
    /// `BadCredentials`, `UnprocessableInput` or `RemoteFailure` from the
    /// transport. On error no lookup is modified.
    pub fn load_results(&mut self) -> Result<&Batch, AddressError> {
        if self.batch.is_empty() {
            return Ok(&self.batch);
        }

        info!(lookups = self.batch.len(), "sending batch to verification service");
        let candidates = self.transport.send(self.batch.lookups())?;

        let lookups = self.batch.lookups_mut();
        let batch_size = lookups.len();
        for lookup in lookups.iter_mut() {
            lookup.result.clear();
        }

        for candidate in candidates {
            let input_index = candidate.input_index;
            match lookups.get_mut(input_index) {
                Some(lookup) => lookup.result.push(candidate),
                None => warn!(
                    input_index,
                    batch_size,
                    "discarding candidate for unknown input index"
                ),
            }
        }

        for lookup in lookups.iter_mut() {
            lookup.result.sort_by_key(|candidate| candidate.candidate_index);
        }

        Ok(&self.batch)
    }

    /// The pending batch
    pub fn batch(&self) -> &Batch {
        &self.batch
    }

    /// Drop every pending lookup; call after results are consumed
    pub fn clear_batch(&mut self) {
        self.batch.clear();
    }

    pub fn max_batch_size(&self) -> usize {
        self.batch.max_batch_size()
    }

    pub fn remaining_batch_size(&self) -> usize {
        self.batch.remaining()
    }

    pub fn can_add_lookup(&self) -> bool {
        !self.batch.is_full()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}
