//! Single-lookup cache
//!
//! `CachedSingleLookup` wraps a `VerificationClient` with a persistent
//! lookup-key to formatted-result mapping so addresses seen in earlier runs
//! cost no remote call.
//!
//! # Persistence
//!
//! The mapping is loaded from the `CacheStore` on first access and written
//! back only by `write_cache`, which replaces the stored mapping wholesale.
//! Entries added by a concurrent run against the same store are lost.

use crate::core::batch::lookup_key;
use crate::core::client::VerificationClient;
use crate::core::formatter::format_result;
use crate::core::traits::{CacheStore, StreetLookupTransport};
use crate::types::AddressError;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Verification client fronted by a persistent result cache
pub struct CachedSingleLookup<T, S> {
    client: VerificationClient<T>,
    store: S,
    /// Loaded lazily; `None` until first access
    entries: Option<BTreeMap<String, String>>,
}

impl<T: StreetLookupTransport, S: CacheStore> CachedSingleLookup<T, S> {
    pub fn new(client: VerificationClient<T>, store: S) -> Self {
        CachedSingleLookup {
            client,
            store,
            entries: None,
        }
    }

    /// Lookup key for an address, as used for cache entries
    pub fn input_id(&self, street: &str, city: &str, zip_code: &str) -> String {
        lookup_key(street, city, zip_code)
    }

    /// The cached mapping, loading it from the store on first access
    pub fn cached_validated_results(&mut self) -> Result<&BTreeMap<String, String>, AddressError> {
        let entries: &BTreeMap<String, String> = self.entries_mut()?;
        Ok(entries)
    }

    fn entries_mut(&mut self) -> Result<&mut BTreeMap<String, String>, AddressError> {
        if self.entries.is_none() {
            let loaded = self.store.load()?;
            info!(entries = loaded.len(), "loaded lookup cache");
            self.entries = Some(loaded);
        }
        Ok(self.entries.get_or_insert_with(BTreeMap::new))
    }

    /// Formatted result for an address, from the cache or one remote call
    ///
    /// On a miss the single lookup is added, loaded, formatted and cached,
    /// and the client's batch is cleared again.
    ///
    /// # Errors
    ///
    /// Cache load failures and any remote error from the client. On a remote
    /// error the batch is cleared and nothing is cached.
    pub fn cached_lookup(
        &mut self,
        street: &str,
        city: &str,
        zip_code: &str,
    ) -> Result<String, AddressError> {
        let key = lookup_key(street, city, zip_code);

        if let Some(hit) = self.entries_mut()?.get(&key) {
            debug!(input_id = %key, "cache hit");
            return Ok(hit.clone());
        }
        debug!(input_id = %key, "cache miss");

        let formatted = self.lookup_remote(&key, street, city, zip_code);
        self.client.clear_batch();
        let formatted = formatted?;

        self.entries_mut()?.insert(key, formatted.clone());
        Ok(formatted)
    }

    fn lookup_remote(
        &mut self,
        key: &str,
        street: &str,
        city: &str,
        zip_code: &str,
    ) -> Result<String, AddressError> {
        self.client.add_lookup(street, city, zip_code)?;
        let batch = self.client.load_results()?;

        Ok(batch
            .get(key)
            .map(|lookup| format_result(&lookup.result))
            .unwrap_or_else(|| format_result(&[])))
    }

    /// Persist the whole in-memory mapping, replacing the stored one
    pub fn write_cache(&mut self) -> Result<(), AddressError> {
        self.entries_mut()?;
        if let Some(entries) = &self.entries {
            self.store.save(entries)?;
            info!(entries = entries.len(), "wrote lookup cache");
        }
        Ok(())
    }

    pub fn client(&self) -> &VerificationClient<T> {
        &self.client
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
