//! Cached single-lookup strategy
//!
//! Validates rows one at a time through a `CachedSingleLookup`: a cache hit
//! costs nothing, a miss costs one single-item round-trip. The cache is
//! persisted once, after every row has been validated.

use crate::core::batch::lookup_key;
use crate::core::cache::CachedSingleLookup;
use crate::core::traits::{CacheStore, StreetLookupTransport};
use crate::strategy::ValidationStrategy;
use crate::types::{AddressError, AddressRow, ValidatedResults};

/// Row-at-a-time strategy backed by a persistent cache
pub struct CachedStrategy<T, S> {
    lookup: CachedSingleLookup<T, S>,
}

impl<T: StreetLookupTransport, S: CacheStore> CachedStrategy<T, S> {
    pub fn new(lookup: CachedSingleLookup<T, S>) -> Self {
        CachedStrategy { lookup }
    }

    pub fn lookup(&self) -> &CachedSingleLookup<T, S> {
        &self.lookup
    }
}

impl<T: StreetLookupTransport, S: CacheStore> ValidationStrategy for CachedStrategy<T, S> {
    fn process(&mut self, rows: &[AddressRow]) -> Result<ValidatedResults, AddressError> {
        let mut results = ValidatedResults::new();

        for row in rows {
            let key = lookup_key(&row.street, &row.city, &row.zip_code);
            if results.contains_key(&key) {
                continue;
            }

            let formatted = self
                .lookup
                .cached_lookup(&row.street, &row.city, &row.zip_code)?;
            results.insert_if_absent(key, ValidatedResults::render_line(&row.original, &formatted));
        }

        self.lookup.write_cache()?;
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::batch::MAX_BATCH_SIZE;
    use crate::core::client::VerificationClient;
    use crate::io::{AddressTable, JsonCacheFile};
    use crate::test_support::{candidate, FakeTransport};
    use std::fs;
    use tempfile::tempdir;

    const INPUT: &str = "Street, City, Zip Code\n\
        143 e Maine Street, Columbus, 43215\n\
        1 Empora St, Title, 11111\n\
        143 e Maine Street, Columbus, 43215\n";

    fn strategy_with(
        transport: FakeTransport,
        cache_path: &std::path::Path,
    ) -> CachedStrategy<FakeTransport, JsonCacheFile> {
        let client = VerificationClient::new(transport, MAX_BATCH_SIZE);
        CachedStrategy::new(CachedSingleLookup::new(client, JsonCacheFile::new(cache_path)))
    }

    fn main_street_transport() -> FakeTransport {
        FakeTransport::with_matches(vec![(
            "143 e Maine Street,  Columbus,  43215",
            candidate(0, "143 East Main Street", "Columbus", "43215", None),
        )])
    }

    #[test]
    fn test_each_distinct_row_is_one_single_item_call() {
        let dir = tempdir().unwrap();
        let table = AddressTable::parse(INPUT).unwrap();
        let transport = main_street_transport();
        let log = transport.log();
        let mut strategy = strategy_with(transport, &dir.path().join("cache.json"));

        let results = strategy.process(table.rows()).unwrap();

        assert_eq!(log.batch_sizes(), vec![1, 1]);
        let lines: Vec<_> = results.values().collect();
        assert_eq!(
            lines,
            vec![
                "143 e Maine Street, Columbus, 43215 -> 143 East Main Street, Columbus, 43215",
                "1 Empora St, Title, 11111 -> Invalid Address",
            ]
        );
        assert!(strategy.lookup().client().batch().is_empty());
    }

    #[test]
    fn test_cache_written_once_at_end() {
        let dir = tempdir().unwrap();
        let cache_path = dir.path().join("cache.json");
        let table = AddressTable::parse(INPUT).unwrap();
        let mut strategy = strategy_with(main_street_transport(), &cache_path);

        strategy.process(table.rows()).unwrap();

        let written: std::collections::BTreeMap<String, String> =
            serde_json::from_str(&fs::read_to_string(&cache_path).unwrap()).unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(
            written[&lookup_key("1 Empora St", " Title", " 11111")],
            "Invalid Address"
        );
    }

    #[test]
    fn test_second_run_served_from_cache_file() {
        let dir = tempdir().unwrap();
        let cache_path = dir.path().join("cache.json");
        let table = AddressTable::parse(INPUT).unwrap();

        let mut first_run = strategy_with(main_street_transport(), &cache_path);
        let first = first_run.process(table.rows()).unwrap();

        let transport = FakeTransport::new(|_| Err(AddressError::remote_failure("offline")));
        let log = transport.log();
        let mut second_run = strategy_with(transport, &cache_path);
        let second = second_run.process(table.rows()).unwrap();

        assert_eq!(log.call_count(), 0);
        assert_eq!(first, second);
    }

    #[test]
    fn test_remote_failure_leaves_cache_file_untouched() {
        let dir = tempdir().unwrap();
        let cache_path = dir.path().join("cache.json");
        fs::write(&cache_path, r#"{"kept":"Kept Result"}"#).unwrap();
        let table = AddressTable::parse(INPUT).unwrap();
        let transport = FakeTransport::new(|_| Err(AddressError::unprocessable_input("HTTP 422")));
        let mut strategy = strategy_with(transport, &cache_path);

        let result = strategy.process(table.rows());

        assert!(matches!(result, Err(AddressError::UnprocessableInput { .. })));
        assert_eq!(
            fs::read_to_string(&cache_path).unwrap(),
            r#"{"kept":"Kept Result"}"#
        );
    }
}
