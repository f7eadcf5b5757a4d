//! Stats backend client
//!
//! Thin async wrapper over the backend's HTTP API: one read endpoint for the
//! aggregated snapshot and four command endpoints. Every call returns a
//! `Result<_, FetchError>`; there is no retry and no caching here.
//!
//! | Call             | Method | Path                   |
//! |------------------|--------|------------------------|
//! | stats snapshot   | GET    | `/api/stats`           |
//! | start/stop/reset | POST   | `/api/{start,stop,reset}` |
//! | test algorithms  | GET    | `/api/test_algorithms` |
//! | check user       | POST   | `/api/check_user`      |

mod error;
pub mod models;

#[cfg(test)]
pub(crate) mod stub;

pub use error::FetchError;
pub use models::{
    AccuracyReport, CommandAck, MetricPoint, PostView, RankedCount, Snapshot, StatsBlock,
    UserCheck,
};

use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;

/// Simulation control commands (bodyless POSTs)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationCommand {
    Start,
    Stop,
    Reset,
}

impl SimulationCommand {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Start => "/api/start",
            Self::Stop => "/api/stop",
            Self::Reset => "/api/reset",
        }
    }
}

impl fmt::Display for SimulationCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::Stop => write!(f, "stop"),
            Self::Reset => write!(f, "reset"),
        }
    }
}

/// HTTP client for the stats backend
///
/// Cheap to clone (reqwest's client is reference counted), so spawned fetch
/// tasks each take their own copy.
#[derive(Debug, Clone)]
pub struct StatsClient {
    http: reqwest::Client,
    base_url: String,
}

impl StatsClient {
    /// Create a client for `base_url` (e.g. `http://127.0.0.1:5000`)
    ///
    /// # Errors
    /// Returns `FetchError::Network` if the underlying HTTP client can't be built
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Network(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        tracing::debug!("Stats client targeting {}", base_url);

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET the aggregated snapshot
    ///
    /// All required fields must be present or the whole snapshot is rejected;
    /// malformed algorithm sub-blocks are dropped individually.
    pub async fn fetch_snapshot(&self) -> Result<Snapshot, FetchError> {
        let response = self.http.get(self.url("/api/stats")).send().await?;
        decode(response).await
    }

    /// POST a bodyless simulation command; any 2xx is success
    pub async fn send_command(&self, command: SimulationCommand) -> Result<(), FetchError> {
        let response = self.http.post(self.url(command.path())).send().await?;
        let body = read_success_body(response).await?;

        // The acknowledgement body is informational only
        match serde_json::from_str::<CommandAck>(&body) {
            Ok(ack) => tracing::debug!(
                "Backend acknowledged {}: status={:?} message={:?}",
                command,
                ack.status,
                ack.message
            ),
            Err(_) => tracing::trace!("Backend acknowledged {} without a JSON body", command),
        }

        Ok(())
    }

    /// GET the backend's accuracy self-test
    pub async fn test_algorithms(&self) -> Result<AccuracyReport, FetchError> {
        let response = self
            .http
            .get(self.url("/api/test_algorithms"))
            .send()
            .await?;
        decode(response).await
    }

    /// POST a membership check for `name`
    ///
    /// The name is trimmed first. An empty name never reaches the network and
    /// comes back as `FetchError::InvalidInput`.
    pub async fn check_user(&self, name: &str) -> Result<UserCheck, FetchError> {
        let user = name.trim();
        if user.is_empty() {
            return Err(FetchError::InvalidInput("username is empty".to_string()));
        }

        let response = self
            .http
            .post(self.url("/api/check_user"))
            .json(&serde_json::json!({ "user": user }))
            .send()
            .await?;
        decode(response).await
    }
}

/// Read the body of a response, turning non-2xx into `FetchError::Status`
async fn read_success_body(response: reqwest::Response) -> Result<String, FetchError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
            body,
        });
    }

    Ok(body)
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, FetchError> {
    let body = read_success_body(response).await?;
    Ok(serde_json::from_str(&body)?)
}
