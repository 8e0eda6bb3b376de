//! Address transformer
//!
//! Owns the parsed input and a validation strategy, and computes the
//! validated results at most once. Later calls return the stored results
//! without touching the service again.

use crate::io::output::write_results;
use crate::io::AddressTable;
use crate::strategy::ValidationStrategy;
use crate::types::{AddressError, ValidatedResults};
use std::io::{Read, Write};
use tracing::info;

/// Memoized driver from input rows to validated results
pub struct AddressTransformer {
    table: AddressTable,
    strategy: Box<dyn ValidationStrategy>,
    /// Set by the first successful `validate`
    validated: Option<ValidatedResults>,
}

impl AddressTransformer {
    pub fn new(table: AddressTable, strategy: Box<dyn ValidationStrategy>) -> Self {
        AddressTransformer {
            table,
            strategy,
            validated: None,
        }
    }

    /// Parse `input` and build a transformer over it
    ///
    /// # Errors
    ///
    /// `MalformedInput` or `IoError` from parsing; nothing is validated.
    pub fn from_reader<R: Read>(
        input: R,
        strategy: Box<dyn ValidationStrategy>,
    ) -> Result<Self, AddressError> {
        let table = AddressTable::from_reader(input)?;
        info!(rows = table.len(), "parsed address input");
        Ok(Self::new(table, strategy))
    }

    /// Validate every row, or return the results of an earlier call
    pub fn validate(&mut self) -> Result<&ValidatedResults, AddressError> {
        if self.validated.is_none() {
            let results = self.strategy.process(self.table.rows())?;
            info!(results = results.len(), "validated address input");
            self.validated = Some(results);
        }

        let results: &ValidatedResults = self.validated.get_or_insert_with(ValidatedResults::new);
        Ok(results)
    }

    /// Results of the last successful `validate`, if any
    pub fn validated_results(&self) -> Option<&ValidatedResults> {
        self.validated.as_ref()
    }

    pub fn table(&self) -> &AddressTable {
        &self.table
    }

    /// Validate (if not done yet) and write one line per input row
    pub fn write_results(&mut self, output: &mut dyn Write) -> Result<(), AddressError> {
        self.validate()?;

        match &self.validated {
            Some(results) => write_results(self.table.rows(), results, output),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::batch::lookup_key;
    use crate::core::client::VerificationClient;
    use crate::strategy::BatchedStrategy;
    use crate::test_support::{candidate, CallLog, FakeTransport};

    const INPUT: &str = "Street, City, Zip Code\n\
        143 e Maine Street, Columbus, 43215\n\
        1 Empora St, Title, 11111\n\
        143 e Maine Street, Columbus, 43215\n";

    fn transformer(input: &str, max_batch_size: usize) -> (AddressTransformer, CallLog) {
        let transport = FakeTransport::with_matches(vec![(
            "143 e Maine Street,  Columbus,  43215",
            candidate(0, "143 East Main Street", "Columbus", "43215", None),
        )]);
        let log = transport.log();
        let strategy = BatchedStrategy::new(VerificationClient::new(transport, max_batch_size));
        let transformer = AddressTransformer::from_reader(input.as_bytes(), Box::new(strategy)).unwrap();
        (transformer, log)
    }

    #[test]
    fn test_validated_results_are_memoized() {
        let (mut transformer, log) = transformer(INPUT, 100);
        assert!(transformer.validated_results().is_none());

        let first = transformer.validate().unwrap().clone();
        let second = transformer.validate().unwrap().clone();

        assert_eq!(first, second);
        assert_eq!(log.call_count(), 1);
        assert_eq!(
            transformer
                .validated_results()
                .unwrap()
                .get(&lookup_key("1 Empora St", " Title", " 11111")),
            Some("1 Empora St, Title, 11111 -> Invalid Address")
        );
    }

    #[test]
    fn test_write_results_prints_one_line_per_row() {
        let (mut transformer, log) = transformer(INPUT, 100);
        let mut output = Vec::new();

        transformer.write_results(&mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "143 e Maine Street, Columbus, 43215 -> 143 East Main Street, Columbus, 43215\n\
             1 Empora St, Title, 11111 -> Invalid Address\n\
             143 e Maine Street, Columbus, 43215 -> 143 East Main Street, Columbus, 43215\n"
        );

        let mut again = Vec::new();
        transformer.write_results(&mut again).unwrap();
        assert_eq!(log.call_count(), 1);
    }

    #[test]
    fn test_malformed_input_fails_before_any_call() {
        let transport = FakeTransport::no_matches();
        let log = transport.log();
        let strategy = BatchedStrategy::new(VerificationClient::new(transport, 100));
        let input = "street,city,zip_code\n1 Main Street,\"Columbia,11111\n";

        let result = AddressTransformer::from_reader(input.as_bytes(), Box::new(strategy));

        assert!(matches!(result, Err(AddressError::MalformedInput { .. })));
        assert_eq!(log.call_count(), 0);
    }

    #[test]
    fn test_failed_validation_is_not_memoized() {
        let transport = FakeTransport::new(|_| Err(AddressError::remote_failure("timeout")));
        let log = transport.log();
        let strategy = BatchedStrategy::new(VerificationClient::new(transport, 100));
        let mut transformer = AddressTransformer::from_reader(INPUT.as_bytes(), Box::new(strategy)).unwrap();

        assert!(transformer.validate().is_err());
        assert!(transformer.validated_results().is_none());
        assert!(transformer.validate().is_err());
        assert_eq!(log.call_count(), 2);
    }
}
