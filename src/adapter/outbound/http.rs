//! Shared REST plumbing for the exchange gateways.
//!
//! GET requests are retried on timeouts and connection failures. Requests
//! that place orders go through [`RestClient::send_once`] and are never
//! retried: a timed-out order may still have reached the exchange.

use std::time::Duration;

use reqwest::{Client as HttpClient, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::error::{Error, ExchangeError, Result};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Timeouts and retry policy for exchange HTTP calls.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub retry_max_attempts: u32,
    pub retry_backoff: Duration,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(5),
            retry_max_attempts: 3,
            retry_backoff: Duration::from_millis(500),
        }
    }
}

/// Thin wrapper over `reqwest` bound to one exchange base URL.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: HttpClient,
    exchange: &'static str,
    base_url: String,
    retry_max_attempts: u32,
    retry_backoff: Duration,
}

impl RestClient {
    #[must_use]
    pub fn new(exchange: &'static str, base_url: impl Into<String>, settings: &HttpSettings) -> Self {
        let http = HttpClient::builder()
            .timeout(settings.timeout)
            .connect_timeout(settings.connect_timeout)
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            http,
            exchange,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            retry_max_attempts: settings.retry_max_attempts,
            retry_backoff: settings.retry_backoff,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Start a GET request for `path`.
    #[must_use]
    pub fn get(&self, path: &str) -> RequestBuilder {
        self.http.get(self.url(path))
    }

    /// Start a POST request for `path`.
    #[must_use]
    pub fn post(&self, path: &str) -> RequestBuilder {
        self.http.post(self.url(path))
    }

    /// Send an idempotent request built by `build`, retrying transport
    /// failures, and decode the JSON body.
    ///
    /// `build` is called once per attempt so that signed requests carry a
    /// fresh nonce or timestamp each time.
    pub async fn fetch_json<T, F>(&self, build: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: Fn() -> Result<RequestBuilder>,
    {
        let max_attempts = self.retry_max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            let response = match build()?.send().await {
                Ok(response) => response,
                Err(err) => {
                    if attempt >= max_attempts || !Self::should_retry(&err) {
                        return Err(err.into());
                    }
                    self.backoff(attempt, max_attempts, &err).await;
                    continue;
                }
            };

            let response = self.check_status(response).await?;

            match response.json::<T>().await {
                Ok(parsed) => return Ok(parsed),
                Err(err) => {
                    if attempt >= max_attempts || !Self::should_retry(&err) {
                        return Err(err.into());
                    }
                    self.backoff(attempt, max_attempts, &err).await;
                }
            }
        }
    }

    /// Send a request exactly once and return the raw response with its
    /// status untouched.
    pub async fn send_once(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        debug!(
            exchange = self.exchange,
            status = %response.status(),
            "Request sent"
        );
        Ok(response)
    }

    /// Map error statuses to exchange errors, passing success through.
    pub async fn check_status(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(status_error(self.exchange, status, &body))
    }

    fn should_retry(err: &reqwest::Error) -> bool {
        err.is_timeout() || err.is_connect()
    }

    async fn backoff(&self, attempt: u32, max_attempts: u32, err: &reqwest::Error) {
        warn!(
            exchange = self.exchange,
            attempt,
            max_attempts,
            error = %err,
            "HTTP request failed, retrying"
        );
        if !self.retry_backoff.is_zero() {
            sleep(self.retry_backoff).await;
        }
    }
}

/// Classify a non-success HTTP status.
#[must_use]
pub fn status_error(exchange: &'static str, status: StatusCode, body: &str) -> Error {
    let body = body.trim();
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ExchangeError::AuthFailed(format!("{exchange} returned {status}: {body}")).into()
        }
        _ => ExchangeError::UnexpectedResponse {
            exchange,
            reason: format!("HTTP {status}: {body}"),
        }
        .into(),
    }
}
