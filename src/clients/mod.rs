pub mod aggregator;

use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::config::ServerDef;

/// Why a server produced no usable `/state` body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("server returned HTTP {0}")]
    Status(u16),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("empty response, check that nagios-api is running")]
    EmptyResponse,
}

/// Result of querying one server. Built once by the fetcher, read by the reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    pub name: String,
    pub result: Result<String, FetchError>,
}

impl FetchOutcome {
    pub fn ok(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            result: Ok(body.into()),
        }
    }

    pub fn failed(name: impl Into<String>, error: FetchError) -> Self {
        Self {
            name: name.into(),
            result: Err(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn status_code(&self) -> Option<u16> {
        match self.result {
            Err(FetchError::Status(code)) => Some(code),
            _ => None,
        }
    }
}

/// Shared HTTP client. No timeout unless one is asked for.
pub fn build_http(timeout: Option<Duration>) -> Result<Client, reqwest::Error> {
    let mut builder =
        Client::builder().user_agent(concat!("nagstat/", env!("CARGO_PKG_VERSION")));
    if let Some(t) = timeout {
        builder = builder.timeout(t);
    }
    builder.build()
}

pub struct NagiosClient {
    pub name: String,
    pub url: String,
    http: Client,
}

impl NagiosClient {
    pub fn new(server: &ServerDef, http: Client) -> Self {
        Self {
            name: server.name.clone(),
            url: server.url.clone(),
            http,
        }
    }

    pub fn state_url(&self) -> String {
        format!("{}/state", self.url.trim_end_matches('/'))
    }

    /// Issues `GET {url}/state`. Never fails; errors land in the outcome.
    pub async fn fetch_state(&self) -> FetchOutcome {
        let url = self.state_url();
        debug!("fetching {} from {}", self.name, url);

        let resp = match self
            .http
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
        {
            Ok(resp) => resp,
            // nothing answered at all: nagios-api is down or not listening
            Err(e) if e.is_connect() => {
                debug!("{}: no response: {}", self.name, e);
                return FetchOutcome::failed(&self.name, FetchError::EmptyResponse);
            }
            Err(e) => {
                debug!("{}: transport error: {}", self.name, e);
                return FetchOutcome::failed(&self.name, FetchError::Transport(e.to_string()));
            }
        };

        let status = resp.status().as_u16();
        debug!("{} answered {}", self.name, status);
        if status != 200 {
            return FetchOutcome::failed(&self.name, FetchError::Status(status));
        }

        match resp.text().await {
            Ok(body) if body.trim().is_empty() => {
                FetchOutcome::failed(&self.name, FetchError::EmptyResponse)
            }
            Ok(body) => FetchOutcome::ok(&self.name, body),
            Err(e) => FetchOutcome::failed(&self.name, FetchError::Transport(e.to_string())),
        }
    }
}
