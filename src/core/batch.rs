//! Lookup key derivation and the pending-lookup batch
//!
//! The `Batch` is an ordered, deduplicated set of lookups bounded by a maximum
//! size. Its iteration order is the order lookups are submitted to the service,
//! which is also the order responses are correlated back by `input_index`.
//!
//! # Key collisions
//!
//! `lookup_key` concatenates street, city and ZIP with no separator and keeps
//! the first 32 characters. Distinct addresses that agree on those characters
//! share a key and are deduplicated into one lookup. The algorithm is kept
//! as-is so existing cache files stay valid.

use crate::types::{AddressError, Lookup};
use std::collections::HashMap;

/// Hard ceiling on lookups per request imposed by the service
pub const MAX_BATCH_SIZE: usize = 100;

/// Maximum length of a lookup key, in characters
pub const LOOKUP_KEY_LENGTH: usize = 32;

/// Derive the lookup key for an address
///
/// Concatenates the three fields with no separator and truncates the result
/// to the first 32 characters.
pub fn lookup_key(street: &str, city: &str, zip_code: &str) -> String {
    street
        .chars()
        .chain(city.chars())
        .chain(zip_code.chars())
        .take(LOOKUP_KEY_LENGTH)
        .collect()
}

/// Combine an address into the single free-form street the service accepts
pub fn freeform_street(street: &str, city: &str, zip_code: &str) -> String {
    [street, city, zip_code].join(", ")
}

/// Ordered, deduplicated set of pending lookups
#[derive(Debug, Clone)]
pub struct Batch {
    /// Lookups in insertion order
    lookups: Vec<Lookup>,
    /// Lookup key to position in `lookups`
    index: HashMap<String, usize>,
    max_batch_size: usize,
}

impl Batch {
    /// Create an empty batch holding at most `max_batch_size` lookups
    ///
    /// The size is clamped to `MAX_BATCH_SIZE` and never changes afterwards.
    /// Zero means `MAX_BATCH_SIZE`, as in `ClientConfig::with_batch_size`.
    pub fn new(max_batch_size: usize) -> Self {
        let max_batch_size = match max_batch_size {
            0 => MAX_BATCH_SIZE,
            size => size.min(MAX_BATCH_SIZE),
        };
        Batch {
            lookups: Vec::with_capacity(max_batch_size),
            index: HashMap::with_capacity(max_batch_size),
            max_batch_size,
        }
    }

    /// Add a lookup for an address, or return the existing one for its key
    ///
    /// # Errors
    ///
    /// Returns `BatchFull` if the key is new and the batch is at its ceiling.
    pub fn add(&mut self, street: &str, city: &str, zip_code: &str) -> Result<&Lookup, AddressError> {
        let key = lookup_key(street, city, zip_code);

        if let Some(&position) = self.index.get(&key) {
            return Ok(&self.lookups[position]);
        }
        if self.is_full() {
            return Err(AddressError::batch_full(self.max_batch_size));
        }

        let position = self.lookups.len();
        self.index.insert(key.clone(), position);
        self.lookups
            .push(Lookup::new(key, freeform_street(street, city, zip_code)));

        Ok(&self.lookups[position])
    }

    /// Get a lookup by its key
    pub fn get(&self, key: &str) -> Option<&Lookup> {
        self.index.get(key).map(|&position| &self.lookups[position])
    }

    /// Get a lookup by submission position
    pub fn get_index(&self, position: usize) -> Option<&Lookup> {
        self.lookups.get(position)
    }

    pub(crate) fn lookups_mut(&mut self) -> &mut [Lookup] {
        &mut self.lookups
    }

    /// First lookup in submission order
    pub fn first(&self) -> Option<&Lookup> {
        self.lookups.first()
    }

    /// Lookups in submission order
    pub fn lookups(&self) -> &[Lookup] {
        &self.lookups
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Lookup> {
        self.lookups.iter()
    }

    pub fn len(&self) -> usize {
        self.lookups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookups.is_empty()
    }

    pub fn max_batch_size(&self) -> usize {
        self.max_batch_size
    }

    /// Number of distinct lookups that can still be added
    pub fn remaining(&self) -> usize {
        self.max_batch_size.saturating_sub(self.lookups.len())
    }

    pub fn is_full(&self) -> bool {
        self.remaining() == 0
    }

    /// Drop every lookup and its result
    pub fn clear(&mut self) {
        self.lookups.clear();
        self.index.clear();
    }
}

impl<'a> IntoIterator for &'a Batch {
    type Item = &'a Lookup;
    type IntoIter = std::slice::Iter<'a, Lookup>;

    fn into_iter(self) -> Self::IntoIter {
        self.lookups.iter()
    }
}
