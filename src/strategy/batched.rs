//! Direct batching strategy
//!
//! Validates rows in slices no larger than the client's batch ceiling: every
//! row in a slice is added, the slice costs one round-trip, each result is
//! formatted under its lookup key, and the batch is cleared before the next
//! slice.
//!
//! Rows whose key was already validated in an earlier slice, or already added
//! in the current one, are not sent again.

use crate::core::batch::lookup_key;
use crate::core::client::VerificationClient;
use crate::core::formatter::format_result;
use crate::core::traits::StreetLookupTransport;
use crate::strategy::ValidationStrategy;
use crate::types::{AddressError, AddressRow, ValidatedResults};
use std::collections::HashMap;
use tracing::debug;

/// Batching strategy over a verification client
pub struct BatchedStrategy<T> {
    client: VerificationClient<T>,
}

impl<T: StreetLookupTransport> BatchedStrategy<T> {
    pub fn new(client: VerificationClient<T>) -> Self {
        BatchedStrategy { client }
    }

    pub fn client(&self) -> &VerificationClient<T> {
        &self.client
    }

    /// Validate one slice of rows with a single round-trip
    fn validate_slice(
        &mut self,
        slice: &[AddressRow],
        results: &mut ValidatedResults,
    ) -> Result<(), AddressError> {
        // Original text per key, captured before the remote call
        let mut originals: HashMap<String, &str> = HashMap::new();

        for row in slice {
            let key = lookup_key(&row.street, &row.city, &row.zip_code);
            if results.contains_key(&key) || originals.contains_key(&key) {
                debug!(input_id = %key, "skipping already validated row");
                continue;
            }
            let added = self
                .client
                .add_lookup(&row.street, &row.city, &row.zip_code)
                .map(|_| ());
            if let Err(e) = added {
                self.client.clear_batch();
                return Err(e);
            }
            originals.insert(key, row.original.as_str());
        }

        let loaded = self.client.load_results().map(|_| ());
        if let Err(e) = loaded {
            self.client.clear_batch();
            return Err(e);
        }

        for lookup in self.client.batch() {
            if let Some(original) = originals.get(&lookup.input_id) {
                let formatted = format_result(&lookup.result);
                results.insert_if_absent(
                    lookup.input_id.clone(),
                    ValidatedResults::render_line(original, &formatted),
                );
            }
        }

        self.client.clear_batch();
        Ok(())
    }
}

impl<T: StreetLookupTransport> ValidationStrategy for BatchedStrategy<T> {
    fn process(&mut self, rows: &[AddressRow]) -> Result<ValidatedResults, AddressError> {
        let mut results = ValidatedResults::new();

        for slice in rows.chunks(self.client.max_batch_size().max(1)) {
            self.validate_slice(slice, &mut results)?;
        }

        Ok(results)
    }
}
