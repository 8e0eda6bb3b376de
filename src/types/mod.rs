//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `address`: Input rows, credentials and accumulated results
//! - `lookup`: Lookup requests and verified-address candidates
//! - `error`: Error types for the address validator

pub mod address;
pub mod error;
pub mod lookup;

pub use address::{AddressRow, Credentials, ValidatedResults};
pub use error::AddressError;
pub use lookup::{Candidate, Components, Lookup, MatchType, REQUESTED_CANDIDATES};
