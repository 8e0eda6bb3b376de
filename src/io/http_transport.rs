//! HTTP transport for the US street-address verification service
//!
//! A batch of one is sent as a `GET` with the lookup in the query string; a
//! larger batch is sent as a `POST` whose JSON body is the ordered array of
//! lookups. Both return a JSON array of candidates tagged with `input_index`.
//!
//! # Status mapping
//!
//! - 401 → `BadCredentials`
//! - 400, 422 → `UnprocessableInput`
//! - anything else that is not 2xx → `RemoteFailure`
//!
//! Credentials travel only in the query string and are never logged.

use crate::core::client::ClientConfig;
use crate::core::traits::StreetLookupTransport;
use crate::types::{AddressError, Candidate, Credentials, Lookup};
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use tracing::debug;

/// Blocking HTTP transport
pub struct HttpTransport {
    client: Client,
    credentials: Credentials,
    base_url: String,
    license: String,
}

impl HttpTransport {
    /// Build a transport from credentials and client configuration
    ///
    /// # Errors
    ///
    /// `RemoteFailure` if the HTTP client cannot be constructed.
    pub fn new(credentials: Credentials, config: &ClientConfig) -> Result<Self, AddressError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                AddressError::remote_failure(&format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(HttpTransport {
            client,
            credentials,
            base_url: config.base_url.clone(),
            license: config.license.clone(),
        })
    }

    fn auth_query(&self) -> [(&str, &str); 3] {
        [
            ("auth-id", self.credentials.auth_id()),
            ("auth-token", self.credentials.auth_token()),
            ("license", self.license.as_str()),
        ]
    }

    fn send_single(&self, lookup: &Lookup) -> Result<Response, AddressError> {
        debug!(input_id = %lookup.input_id, "GET single lookup");
        let candidates = lookup.candidates.to_string();

        let response = self
            .client
            .get(&self.base_url)
            .query(&self.auth_query())
            .query(&[
                ("input_id", lookup.input_id.as_str()),
                ("street", lookup.street.as_str()),
                ("candidates", candidates.as_str()),
                ("match", lookup.match_type.as_str()),
            ])
            .send()?;

        Ok(response)
    }

    fn send_batch(&self, lookups: &[Lookup]) -> Result<Response, AddressError> {
        debug!(lookups = lookups.len(), "POST batch");

        let response = self
            .client
            .post(&self.base_url)
            .query(&self.auth_query())
            .json(lookups)
            .send()?;

        Ok(response)
    }
}

impl StreetLookupTransport for HttpTransport {
    fn send(&self, lookups: &[Lookup]) -> Result<Vec<Candidate>, AddressError> {
        let response = match lookups {
            [] => return Ok(Vec::new()),
            [single] => self.send_single(single)?,
            _ => self.send_batch(lookups)?,
        };

        let response = check_status(response)?;

        response.json::<Vec<Candidate>>().map_err(|e| {
            AddressError::remote_failure(&format!(
                "Failed to decode service response: {}",
                e.without_url()
            ))
        })
    }
}

/// Map a non-success status to the matching error
fn check_status(response: Response) -> Result<Response, AddressError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().unwrap_or_default();
    let detail = if body.trim().is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("HTTP {}: {}", status.as_u16(), body.trim())
    };

    Err(match status {
        StatusCode::UNAUTHORIZED => AddressError::BadCredentials,
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            AddressError::unprocessable_input(&detail)
        }
        _ => AddressError::remote_failure(&detail),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const SECRET: &str = "SUPERSECRETTOKEN";

    fn unreachable_transport() -> HttpTransport {
        let config = ClientConfig {
            base_url: "http://127.0.0.1:1/street-address".to_string(),
            timeout: Duration::from_secs(5),
            ..ClientConfig::default()
        };
        HttpTransport::new(Credentials::new("my-id", SECRET), &config).unwrap()
    }

    #[test]
    fn test_empty_batch_sends_nothing() {
        let candidates = unreachable_transport().send(&[]).unwrap();
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_connection_failure_hides_credentials() {
        let lookup = Lookup::new(
            "1 Main StreetColumbia11111".to_string(),
            "1 Main Street, Columbia, 11111".to_string(),
        );

        let error = unreachable_transport().send(&[lookup]).unwrap_err();

        assert!(matches!(error, AddressError::RemoteFailure { .. }));
        let rendered = error.to_string();
        assert!(!rendered.contains(SECRET), "credential leaked: {}", rendered);
        assert!(!rendered.contains("auth-token"), "credential leaked: {}", rendered);
    }
}
