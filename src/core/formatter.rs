//! Result formatting
//!
//! Turns a lookup's result into the single display string written next to the
//! original row. Missing data is policy, not an error: every input formats.

use crate::types::Candidate;

/// Marker written for a lookup with no candidates
pub const INVALID_ADDRESS: &str = "Invalid Address";

/// Format a lookup result for display
///
/// Uses the best candidate only. Parts are delivery line 1, delivery line 2,
/// city, and `zipcode-plus4`; absent or empty parts are skipped and the rest
/// are joined with `", "`.
pub fn format_result(result: &[Candidate]) -> String {
    let Some(best) = result.first() else {
        return INVALID_ADDRESS.to_string();
    };

    let zip = join_present(
        [
            best.components.zipcode.as_deref(),
            best.components.plus4_code.as_deref(),
        ],
        "-",
    );

    join_present(
        [
            best.delivery_line_1.as_deref(),
            best.delivery_line_2.as_deref(),
            best.components.city_name.as_deref(),
            Some(zip.as_str()),
        ],
        ", ",
    )
}

fn join_present<const N: usize>(parts: [Option<&str>; N], separator: &str) -> String {
    parts
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}
