//! Shared helpers for unit tests
//!
//! `FakeTransport` answers lookups without the network and records every
//! round-trip in a `CallLog` the test keeps a handle to.

use crate::core::traits::StreetLookupTransport;
use crate::types::{AddressError, Candidate, Components, Lookup};
use std::cell::RefCell;
use std::rc::Rc;

type Responder = Box<dyn Fn(&[Lookup]) -> Result<Vec<Candidate>, AddressError>>;

/// Record of the input ids sent in each round-trip
#[derive(Clone, Default)]
pub struct CallLog(Rc<RefCell<Vec<Vec<String>>>>);

impl CallLog {
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.0.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn batch_sizes(&self) -> Vec<usize> {
        self.0.borrow().iter().map(Vec::len).collect()
    }
}

pub struct FakeTransport {
    respond: Responder,
    log: CallLog,
}

impl FakeTransport {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&[Lookup]) -> Result<Vec<Candidate>, AddressError> + 'static,
    {
        FakeTransport {
            respond: Box::new(respond),
            log: CallLog::default(),
        }
    }

    /// A service that never finds a match
    pub fn no_matches() -> Self {
        Self::new(|_| Ok(Vec::new()))
    }

    /// A service that answers lookups whose free-form street is listed
    ///
    /// The returned candidate gets the `input_index` of the lookup it answers.
    pub fn with_matches(matches: Vec<(&str, Candidate)>) -> Self {
        let matches: Vec<(String, Candidate)> = matches
            .into_iter()
            .map(|(street, candidate)| (street.to_string(), candidate))
            .collect();

        Self::new(move |lookups| {
            let mut response = Vec::new();
            for (position, lookup) in lookups.iter().enumerate() {
                if let Some((_, found)) = matches.iter().find(|(street, _)| *street == lookup.street)
                {
                    let mut found = found.clone();
                    found.input_index = position;
                    response.push(found);
                }
            }
            Ok(response)
        })
    }

    pub fn log(&self) -> CallLog {
        self.log.clone()
    }
}

impl StreetLookupTransport for FakeTransport {
    fn send(&self, lookups: &[Lookup]) -> Result<Vec<Candidate>, AddressError> {
        self.log.0.borrow_mut().push(
            lookups
                .iter()
                .map(|lookup| lookup.input_id.clone())
                .collect(),
        );
        (self.respond)(lookups)
    }
}

/// Build a best-ranked candidate
pub fn candidate(
    input_index: usize,
    delivery_line_1: &str,
    city_name: &str,
    zipcode: &str,
    plus4_code: Option<&str>,
) -> Candidate {
    Candidate {
        input_index,
        candidate_index: 0,
        delivery_line_1: Some(delivery_line_1.to_string()),
        components: Components {
            city_name: Some(city_name.to_string()),
            zipcode: Some(zipcode.to_string()),
            plus4_code: plus4_code.map(str::to_string),
            ..Components::default()
        },
        ..Candidate::default()
    }
}
