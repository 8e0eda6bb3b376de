//! I/O module
//!
//! Handles everything that crosses the process boundary.
//!
//! # Components
//!
//! - `address_reader` - CSV address input (fail-fast, whole-input parse)
//! - `output` - Validated result lines
//! - `cache_file` - JSON file backing the lookup cache
//! - `http_transport` - HTTP client for the verification service

pub mod address_reader;
pub mod cache_file;
pub mod http_transport;
pub mod output;

pub use address_reader::{normalize_header, AddressTable};
pub use cache_file::{JsonCacheFile, DEFAULT_CACHE_FILE};
pub use http_transport::HttpTransport;
pub use output::write_results;
