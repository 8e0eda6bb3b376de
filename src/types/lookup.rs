//! Lookup and candidate types exchanged with the verification service
//!
//! A `Lookup` is one pending request plus the slot its result is written into.
//! A `Candidate` is one verified address returned for a lookup.

use serde::{Deserialize, Serialize};

/// Number of candidates requested for every lookup
pub const REQUESTED_CANDIDATES: u8 = 1;

/// How strictly the service should match an address
///
/// Only strict matching is ever requested; the other modes exist so responses
/// and requests from other tools can be represented faithfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// Only return addresses that are valid USPS delivery points
    Strict,
    /// Return the best match even if it is not deliverable
    Invalid,
    /// Like `Invalid`, plus suggestions for partially matched input
    Enhanced,
}

impl MatchType {
    /// Wire representation used in query strings
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchType::Strict => "strict",
            MatchType::Invalid => "invalid",
            MatchType::Enhanced => "enhanced",
        }
    }
}

/// A single pending address lookup
///
/// Serializes to the request object the service expects in a batch body.
/// The `result` slot is filled in place after a round-trip and is never sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lookup {
    /// Derived lookup key, at most 32 characters
    pub input_id: String,

    /// Combined free-form address (`street, city, zip`)
    pub street: String,

    /// Maximum number of candidates requested
    pub candidates: u8,

    /// Matching strictness
    #[serde(rename = "match")]
    pub match_type: MatchType,

    /// Candidates returned by the service, best first; empty means no match
    #[serde(skip)]
    pub result: Vec<Candidate>,
}

impl Lookup {
    /// Create a strict, single-candidate lookup for a free-form address
    pub fn new(input_id: String, street: String) -> Self {
        Lookup {
            input_id,
            street,
            candidates: REQUESTED_CANDIDATES,
            match_type: MatchType::Strict,
            result: Vec::new(),
        }
    }

    /// The best candidate, if the service found a match
    pub fn best_candidate(&self) -> Option<&Candidate> {
        self.result.first()
    }
}

/// One verified address returned by the service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Candidate {
    /// Position of the lookup this candidate answers, in submission order
    pub input_index: usize,

    /// Rank of this candidate among the answers for one lookup; 0 is best
    pub candidate_index: usize,

    /// Present when the service recognized a business or addressee
    pub addressee: Option<String>,

    /// Primary delivery line
    pub delivery_line_1: Option<String>,

    /// Secondary delivery line
    pub delivery_line_2: Option<String>,

    /// City, state and ZIP+4 as a single line
    pub last_line: Option<String>,

    /// Parsed address components
    pub components: Components,
}

/// Address components of a candidate
///
/// Only the fields needed for display and diagnostics are modelled; the
/// service sends many more, which are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Components {
    pub primary_number: Option<String>,
    pub street_name: Option<String>,
    pub street_suffix: Option<String>,
    pub city_name: Option<String>,
    pub state_abbreviation: Option<String>,
    pub zipcode: Option<String>,
    pub plus4_code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_lookup_requests_one_strict_candidate() {
        let lookup = Lookup::new(
            "25 Draper St.Greenville22222".to_string(),
            "25 Draper St., Greenville, 22222".to_string(),
        );

        assert_eq!(lookup.candidates, 1);
        assert_eq!(lookup.match_type, MatchType::Strict);
        assert!(lookup.result.is_empty());
        assert!(lookup.best_candidate().is_none());
    }

    #[test]
    fn test_lookup_serializes_as_request_object() {
        let mut lookup = Lookup::new(
            "1 Santa ClausNorth Pole99705".to_string(),
            "1 Santa Claus, North Pole, 99705".to_string(),
        );
        lookup.result.push(Candidate::default());

        let json = serde_json::to_value(&lookup).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "input_id": "1 Santa ClausNorth Pole99705",
                "street": "1 Santa Claus, North Pole, 99705",
                "candidates": 1,
                "match": "strict"
            })
        );
    }

    #[test]
    fn test_candidate_deserializes_and_ignores_unknown_fields() {
        let body = r#"{
            "input_index": 1,
            "candidate_index": 0,
            "delivery_line_1": "1 Infinite Loop",
            "last_line": "Cupertino CA 95014-2083",
            "delivery_point_barcode": "950142083017",
            "components": {
                "primary_number": "1",
                "city_name": "Cupertino",
                "zipcode": "95014",
                "plus4_code": "2083",
                "delivery_point": "01"
            },
            "metadata": { "record_type": "S" }
        }"#;

        let candidate: Candidate = serde_json::from_str(body).unwrap();

        assert_eq!(candidate.input_index, 1);
        assert_eq!(candidate.delivery_line_1.as_deref(), Some("1 Infinite Loop"));
        assert_eq!(candidate.delivery_line_2, None);
        assert_eq!(candidate.components.city_name.as_deref(), Some("Cupertino"));
        assert_eq!(candidate.components.plus4_code.as_deref(), Some("2083"));
    }

    #[test]
    fn test_candidate_without_input_index_defaults_to_zero() {
        let candidate: Candidate =
            serde_json::from_str(r#"{"delivery_line_1": "25 Draper Street"}"#).unwrap();
        assert_eq!(candidate.input_index, 0);
        assert_eq!(candidate.components, Components::default());
    }

    #[test]
    fn test_match_type_wire_names() {
        assert_eq!(MatchType::Strict.as_str(), "strict");
        assert_eq!(
            serde_json::to_string(&MatchType::Enhanced).unwrap(),
            "\"enhanced\""
        );
    }
}
