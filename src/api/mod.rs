//! Data source client for the random-user API.
//!
//! One GET per generate action, no retries. Errors are classified into
//! [`GenerateError::Network`], [`GenerateError::Http`] and
//! [`GenerateError::Schema`] so the banner can tell "no internet" apart from
//! a bad response.

pub mod types;

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info, warn};

use crate::error::GenerateError;
pub use types::{Dob, Location, Name, Picture, Street, UserRecord};

/// Default API endpoint.
pub const API_URL: &str = "https://randomuser.me/api/";

/// HTTP client bound to one API base URL.
#[derive(Clone, Debug)]
pub struct RandomUserClient {
    http: Client,
    base_url: String,
}

impl RandomUserClient {
    /// Client for an arbitrary base URL (mirrors, mock servers).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, GenerateError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("randuser-manager/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch `count` synthetic users.
    pub async fn fetch_users(&self, count: u32) -> Result<Vec<UserRecord>, GenerateError> {
        debug!(url = %self.base_url, count, "requesting users");

        let response = self
            .http
            .get(&self.base_url)
            .query(&[("results", count)])
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "request to user API failed");
                GenerateError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "user API returned an error status");
            return Err(GenerateError::Http {
                status: status.as_u16(),
            });
        }

        // JSON decoding happens in `parse_results`, so a failure here is the
        // transfer itself breaking off.
        let body = response.bytes().await.map_err(|e| {
            warn!(error = %e, "reading response body failed");
            GenerateError::Network
        })?;
        let users = parse_results(&body)?;
        info!(requested = count, received = users.len(), "fetched users");
        Ok(users)
    }
}

/// Decode a response body into user records.
///
/// The body must be a JSON object whose `results` member is an array of user
/// objects; anything else is a [`GenerateError::Schema`].
pub fn parse_results(body: &[u8]) -> Result<Vec<UserRecord>, GenerateError> {
    let mut value: serde_json::Value = serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, "response body is not JSON");
        GenerateError::Schema
    })?;
    let results = match value.get_mut("results").map(serde_json::Value::take) {
        Some(v @ serde_json::Value::Array(_)) => v,
        _ => {
            warn!("response has no results array");
            return Err(GenerateError::Schema);
        }
    };
    serde_json::from_value(results).map_err(|e| {
        warn!(error = %e, "results do not match the user record shape");
        GenerateError::Schema
    })
}
