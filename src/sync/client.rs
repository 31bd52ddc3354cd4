use rand::Rng;
use reqwest::{Client, Method};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use std::time::Duration;
use uuid::Uuid;

use crate::domain::stats::AggregateStats;
use crate::domain::status::{EcosystemNode, SystemStatus, ToolStatus, WorkflowProgress};
use crate::sync::cache::ResponseCache;
use crate::sync::error::SyncError;
use crate::sync::rate_limit::RateLimiter;

pub const CLIENT_VERSION: &str = "2.4.1";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_RETRY_ATTEMPTS: u32 = 3;
const DEFAULT_BACKOFF_BASE: Duration = Duration::from_secs(1);
const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);
const DEFAULT_RATE_LIMIT_MAX_REQUESTS: usize = 100;
const DEFAULT_RATE_LIMIT_WINDOW: Duration = Duration::from_secs(60);

pub struct SyncClientConfig {
    pub base_url: String,
    pub api_key: Secret<String>,
    pub timeout: Duration,
    pub retry_attempts: u32,
    pub backoff_base: Duration,
    pub cache_enabled: bool,
    pub cache_ttl: Duration,
    pub rate_limit_max_requests: usize,
    pub rate_limit_window: Duration,
}

impl SyncClientConfig {
    pub fn new(base_url: String, api_key: Secret<String>) -> SyncClientConfig {
        SyncClientConfig {
            base_url,
            api_key,
            timeout: DEFAULT_TIMEOUT,
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            backoff_base: DEFAULT_BACKOFF_BASE,
            cache_enabled: true,
            cache_ttl: DEFAULT_CACHE_TTL,
            rate_limit_max_requests: DEFAULT_RATE_LIMIT_MAX_REQUESTS,
            rate_limit_window: DEFAULT_RATE_LIMIT_WINDOW,
        }
    }
}

/// HTTP client for the CineStory API. Every response travels inside the
/// standard envelope; callers get the decoded `data` payload or a
/// `SyncError` describing what went wrong.
pub struct SyncClient {
    http_client: Client,
    base_url: String,
    api_key: Secret<String>,
    retry_attempts: u32,
    backoff_base: Duration,
    cache: ResponseCache,
    cache_enabled: bool,
    rate_limiter: RateLimiter,
}

/// Outcome of a registration attempt. A duplicate email is a normal
/// outcome, not an error.
#[derive(Debug, PartialEq, Eq)]
pub enum RegisterAck {
    Registered {
        subscriber_id: Uuid,
        subscriber_number: u64,
    },
    AlreadyRegistered,
}

#[derive(serde::Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    error: Option<String>,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterData {
    subscriber_id: Uuid,
    subscriber_number: u64,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct DuplicateData {
    #[serde(default)]
    already_registered: bool,
}

impl SyncClient {
    pub fn new(config: SyncClientConfig) -> SyncClient {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap();

        SyncClient {
            http_client,
            base_url: config.base_url,
            api_key: config.api_key,
            retry_attempts: config.retry_attempts,
            backoff_base: config.backoff_base,
            cache: ResponseCache::new(config.cache_ttl),
            cache_enabled: config.cache_enabled,
            rate_limiter: RateLimiter::new(
                config.rate_limit_max_requests,
                config.rate_limit_window,
            ),
        }
    }

    pub async fn get_stats(&self) -> Result<AggregateStats, SyncError> {
        self.fetch("/early-bird/stats").await
    }

    pub async fn get_system_status(&self) -> Result<SystemStatus, SyncError> {
        self.fetch("/system/status").await
    }

    pub async fn get_tools_status(&self) -> Result<Vec<ToolStatus>, SyncError> {
        self.fetch("/tools/status").await
    }

    pub async fn get_workflow_progress(&self) -> Result<Vec<WorkflowProgress>, SyncError> {
        self.fetch("/workflows/progress").await
    }

    pub async fn get_ecosystem_nodes(&self) -> Result<Vec<EcosystemNode>, SyncError> {
        self.fetch("/ecosystem/nodes").await
    }

    /// Fetches an endpoint and decodes the enveloped payload.
    pub async fn fetch<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, SyncError> {
        let body = self.get_raw(endpoint).await?;

        decode_envelope(&body)
    }

    pub async fn register(
        &self,
        email: &str,
        source: &str,
        referrer: &str,
    ) -> Result<RegisterAck, SyncError> {
        let body = serde_json::json!({
            "email": email,
            "source": source,
            "referrer": referrer,
        });
        let raw = self
            .request_with_retries(Method::POST, "/early-bird/register", Some(&body))
            .await?;
        let envelope: Envelope<serde_json::Value> =
            serde_json::from_str(&raw).map_err(|err| SyncError::Malformed(err.to_string()))?;

        if envelope.success {
            let data = envelope
                .data
                .ok_or_else(|| SyncError::Malformed(String::from("The envelope carried no data.")))?;
            let data: RegisterData =
                serde_json::from_value(data).map_err(|err| SyncError::Malformed(err.to_string()))?;

            return Ok(RegisterAck::Registered {
                subscriber_id: data.subscriber_id,
                subscriber_number: data.subscriber_number,
            });
        }

        // A duplicate email is reported as a 200 with `success: false` and an
        // `alreadyRegistered` marker, not as an error status.
        if let Some(data) = envelope.data {
            if let Ok(duplicate) = serde_json::from_value::<DuplicateData>(data) {
                if duplicate.already_registered {
                    return Ok(RegisterAck::AlreadyRegistered);
                }
            }
        }

        Err(SyncError::Malformed(envelope.error.unwrap_or_else(|| {
            String::from("The server reported a failure.")
        })))
    }

    /// Returns the raw response body for a GET, replaying a cached copy
    /// when one is still fresh. Only successful bodies are cached.
    pub async fn get_raw(&self, endpoint: &str) -> Result<String, SyncError> {
        if self.cache_enabled {
            if let Some(body) = self.cache.get(endpoint).await {
                tracing::debug!("Serving {} from cache", endpoint);

                return Ok(body);
            }
        }

        let body = self
            .request_with_retries(Method::GET, endpoint, None)
            .await?;

        if self.cache_enabled {
            self.cache.store(endpoint, body.clone()).await;
        }

        Ok(body)
    }

    async fn request_with_retries(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<String, SyncError> {
        if !self.rate_limiter.check(endpoint).await {
            return Err(SyncError::RateLimited(endpoint.to_string()));
        }

        let mut attempt = 1;

        loop {
            match self.attempt(method.clone(), endpoint, body).await {
                Ok(body) => return Ok(body),
                Err(err) => {
                    tracing::warn!(
                        "Request to {} failed (attempt {}/{}): {}",
                        endpoint,
                        attempt,
                        self.retry_attempts,
                        err
                    );

                    if !err.is_retryable() || attempt >= self.retry_attempts {
                        return Err(err);
                    }

                    tokio::time::sleep(self.backoff_base * 2u32.pow(attempt)).await;
                    attempt += 1;
                }
            }
        }
    }

    async fn attempt(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<String, SyncError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut request = self
            .http_client
            .request(method, &url)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .header("Content-Type", "application/json")
            .header("X-Request-ID", generate_request_id())
            .header("X-Client-Version", CLIENT_VERSION);

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(classify_reqwest_error)?;

        // A reply of any status counts toward the rate window; requests that
        // never reached the server do not.
        self.rate_limiter.record(endpoint).await;

        let status = response.status();
        let body = response.text().await.map_err(classify_reqwest_error)?;

        if !status.is_success() {
            return Err(SyncError::ServerError {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}

fn decode_envelope<T: DeserializeOwned>(body: &str) -> Result<T, SyncError> {
    let envelope: Envelope<T> =
        serde_json::from_str(body).map_err(|err| SyncError::Malformed(err.to_string()))?;

    if !envelope.success {
        return Err(SyncError::Malformed(envelope.error.unwrap_or_else(|| {
            String::from("The server reported a failure.")
        })));
    }

    envelope
        .data
        .ok_or_else(|| SyncError::Malformed(String::from("The envelope carried no data.")))
}

fn classify_reqwest_error(err: reqwest::Error) -> SyncError {
    if err.is_timeout() {
        SyncError::Timeout
    } else {
        SyncError::Transport(err.to_string())
    }
}

fn generate_request_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = std::iter::repeat_with(|| rng.sample(rand::distributions::Alphanumeric))
        .map(char::from)
        .take(9)
        .collect();

    format!("{}-{}", chrono::Utc::now().timestamp_millis(), suffix)
}
