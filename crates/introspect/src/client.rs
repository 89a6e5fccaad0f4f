//! Configurable GraphQL HTTP client.
//!
//! This module provides the transport used both for introspection and for
//! running generated queries, with support for custom headers, timeouts, and
//! retry logic.

use crate::{query_envelope, IntrospectionError, IntrospectionResponse, Result, INTROSPECTION_QUERY};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;

/// Default timeout for requests (30 seconds).
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default connection timeout (10 seconds).
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default number of retry attempts.
const DEFAULT_RETRIES: u32 = 0;

/// Upper bound on the wait between retries.
const MAX_BACKOFF_SECS: u64 = 60;

/// A configurable client for a single kind of job: POSTing GraphQL documents
/// to an endpoint and reading back JSON.
///
/// The client supports:
/// - Custom HTTP headers (e.g., for authentication)
/// - Configurable request timeout
/// - Automatic retry with exponential backoff
///
/// # Examples
///
/// ```no_run
/// use graphql_introspect::GraphQLClient;
/// use std::time::Duration;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = GraphQLClient::new()
///     .with_header("Authorization", "Bearer my-token")
///     .with_timeout(Duration::from_secs(60))
///     .with_retries(3);
/// let response = client.introspect("http://localhost:8080/graphql").await?;
/// println!("Schema has {} types", response.data.schema.types.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GraphQLClient {
    headers: HashMap<String, String>,
    timeout: Duration,
    connect_timeout: Duration,
    retries: u32,
}

impl Default for GraphQLClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphQLClient {
    /// Creates a new client with default settings.
    ///
    /// Default settings:
    /// - 30 second request timeout
    /// - 10 second connection timeout
    /// - No retries
    /// - No custom headers
    #[must_use]
    pub fn new() -> Self {
        Self {
            headers: HashMap::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            retries: DEFAULT_RETRIES,
        }
    }

    /// Adds a custom HTTP header to be sent with every request.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Adds multiple HTTP headers from an iterator.
    #[must_use]
    pub fn with_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in headers {
            self.headers.insert(name.into(), value.into());
        }
        self
    }

    /// Sets the request timeout (connection + transfer). Default is 30 seconds.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the connection timeout. Default is 10 seconds.
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the number of retry attempts on failure.
    ///
    /// Retries use exponential backoff starting at 1 second, capped at 60.
    /// Default is 0 (no retries).
    #[must_use]
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Runs the standard introspection query and parses the result.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The network request fails after all retry attempts
    /// - The server returns an HTTP error status
    /// - The response cannot be parsed as introspection data
    #[tracing::instrument(skip(self))]
    pub async fn introspect(&self, url: &str) -> Result<IntrospectionResponse> {
        let introspection: IntrospectionResponse =
            self.post_with_retry(url, INTROSPECTION_QUERY).await?;

        tracing::info!(
            types = introspection.data.schema.types.len(),
            "Introspection successful"
        );

        Ok(introspection)
    }

    /// Runs the introspection query and returns the raw JSON response.
    ///
    /// Useful for dumping the model exactly as the server reported it.
    #[tracing::instrument(skip(self))]
    pub async fn introspect_raw(&self, url: &str) -> Result<serde_json::Value> {
        self.post_with_retry(url, INTROSPECTION_QUERY).await
    }

    /// Executes a root selection such as `ships(first: 1){ id }`.
    ///
    /// The selection is wrapped in `query { ... }` before sending. The JSON
    /// body is returned as-is, including any GraphQL `errors` member; only
    /// transport and decoding failures are reported as errors.
    #[tracing::instrument(skip(self, selection), fields(selection_length = selection.len()))]
    pub async fn execute(&self, url: &str, selection: &str) -> Result<serde_json::Value> {
        let document = query_envelope(selection);
        tracing::debug!(%document, "Executing query");
        self.post_with_retry(url, &document).await
    }

    async fn post_with_retry<T: DeserializeOwned>(&self, url: &str, document: &str) -> Result<T> {
        let mut last_error = None;
        let attempts = self.retries + 1;

        for attempt in 0..attempts {
            if attempt > 0 {
                let delay = backoff_delay(attempt);
                tracing::info!(
                    attempt,
                    delay_secs = delay.as_secs(),
                    "Retrying after delay"
                );
                tokio::time::sleep(delay).await;
            }

            match self.post_once(url, document).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "Request failed");
                    let retryable = e.is_retryable();
                    last_error = Some(e);
                    if !retryable {
                        break;
                    }
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| IntrospectionError::Network("No attempts made".to_string())))
    }

    /// Sends a single request without retry logic.
    async fn post_once<T: DeserializeOwned>(&self, url: &str, document: &str) -> Result<T> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .build()
            .map_err(|e| {
                IntrospectionError::Network(format!("Failed to create HTTP client: {e}"))
            })?;

        let body = serde_json::json!({
            "query": document,
            "variables": {},
        });

        let mut request = client.post(url).header("Content-Type", "application/json");
        for (name, value) in &self.headers {
            request = request.header(name, value);
        }

        let response = request
            .json(&body)
            .send()
            .await
            .map_err(|e| IntrospectionError::Network(e.to_string()))?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "Received response");

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %error_body, "HTTP error response");
            return Err(IntrospectionError::Http(status.as_u16(), error_body));
        }

        response.json().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to parse response");
            IntrospectionError::Parse(e.to_string())
        })
    }
}

/// Wait before retry number `attempt` (1-based): 1s, 2s, 4s, ... capped at
/// [`MAX_BACKOFF_SECS`].
fn backoff_delay(attempt: u32) -> Duration {
    let secs = 1u64
        .checked_shl(attempt.saturating_sub(1))
        .unwrap_or(u64::MAX)
        .min(MAX_BACKOFF_SECS);
    Duration::from_secs(secs)
}
