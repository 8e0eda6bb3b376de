//! Result output
//!
//! Writes one `"<original> -> <formatted>"` line per input row, in input order.

use crate::core::batch::lookup_key;
use crate::types::{AddressError, AddressRow, ValidatedResults};
use std::io::Write;

/// Write the validated line for every row
///
/// Rows are matched to results by lookup key, so a repeated address prints
/// the line recorded for its first occurrence.
///
/// # Errors
///
/// `IoError` if writing fails or a row has no result.
pub fn write_results(
    rows: &[AddressRow],
    results: &ValidatedResults,
    output: &mut dyn Write,
) -> Result<(), AddressError> {
    for row in rows {
        let key = lookup_key(&row.street, &row.city, &row.zip_code);
        let line = results.get(&key).ok_or_else(|| AddressError::IoError {
            message: format!("No validated result for row '{}'", row.original),
        })?;

        writeln!(output, "{}", line).map_err(|e| AddressError::IoError {
            message: format!("Failed to write result: {}", e),
        })?;
    }

    output.flush().map_err(|e| AddressError::IoError {
        message: format!("Failed to flush output: {}", e),
    })?;

    Ok(())
}
