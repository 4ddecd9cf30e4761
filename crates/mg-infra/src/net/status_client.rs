//! HTTP client for the onboarding/session status endpoint.
//!
//! Wraps `GET /v1/session` with the transport policy the rest of the app
//! relies on: bounded exponential-backoff retries for transport errors,
//! no retry at all for auth rejections, and a short-lived response cache
//! that collapses the startup gate's fetch and the onboarding flow's
//! first reconcile into one request.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tokio::time::sleep;
use tracing::{debug, error, warn};

use mg_core::ports::{StatusClientPort, StatusError};
use mg_core::session::{OnboardingStatus, SessionToken, StepValue};

#[derive(Debug, Clone)]
pub struct StatusClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub retry_attempts: u32,
    pub retry_backoff: Duration,
    pub cache_ttl: Duration,
}

impl Default for StatusClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.mingle.app".to_string(),
            timeout: Duration::from_secs(10),
            retry_attempts: 3,
            retry_backoff: Duration::from_millis(200),
            cache_ttl: Duration::from_secs(5),
        }
    }
}

/// Wire shape of the session status response.
///
/// Older backend builds report the step as `currentStepValue`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionStatusDto {
    authenticated: bool,
    onboarding_completed: bool,
    #[serde(alias = "currentStepValue")]
    current_step: f64,
}

impl From<SessionStatusDto> for OnboardingStatus {
    fn from(dto: SessionStatusDto) -> Self {
        Self {
            authenticated: dto.authenticated,
            onboarding_completed: dto.onboarding_completed,
            current_step: StepValue::new(dto.current_step),
        }
    }
}

struct CachedStatus {
    fetched_at: Instant,
    token_fingerprint: u64,
    status: OnboardingStatus,
}

pub struct HttpStatusClient {
    client: reqwest::Client,
    session_url: String,
    retry_attempts: u32,
    retry_backoff: Duration,
    cache_ttl: Duration,
    cache: Mutex<Option<CachedStatus>>,
}

impl HttpStatusClient {
    pub fn new(config: StatusClientConfig) -> Result<Self, StatusError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| StatusError::Transport(format!("build http client: {}", e)))?;

        Ok(Self {
            client,
            session_url: format!("{}/v1/session", config.base_url.trim_end_matches('/')),
            retry_attempts: config.retry_attempts,
            retry_backoff: config.retry_backoff,
            cache_ttl: config.cache_ttl,
            cache: Mutex::new(None),
        })
    }

    async fn fetch_with_retry(
        &self,
        token: &SessionToken,
    ) -> Result<OnboardingStatus, StatusError> {
        for attempt in 0..=self.retry_attempts {
            match self.fetch_once(token).await {
                Ok(status) => return Ok(status),
                Err(err) => {
                    if attempt == self.retry_attempts || !should_retry(&err) {
                        error!(
                            attempts = attempt + 1,
                            error = %err,
                            "session status fetch failed"
                        );
                        return Err(err);
                    }
                    let backoff = self.backoff_delay(attempt);
                    warn!(
                        attempt = attempt + 1,
                        error = %err,
                        backoff_ms = backoff.as_millis() as u64,
                        "session status fetch failed, retrying"
                    );
                    sleep(backoff).await;
                }
            }
        }

        Err(StatusError::Transport("retries exhausted".to_string()))
    }

    /// Backoff before retry `attempt` (zero-based). Saturates so an
    /// oversized configured retry budget can never overflow the multiplier.
    fn backoff_delay(&self, attempt: u32) -> Duration {
        self.retry_backoff
            .saturating_mul(2u32.saturating_pow(attempt))
    }

    async fn fetch_once(&self, token: &SessionToken) -> Result<OnboardingStatus, StatusError> {
        let response = self
            .client
            .get(&self.session_url)
            .bearer_auth(token.expose())
            .send()
            .await
            .map_err(map_request_error)?;

        let http_status = response.status();
        if http_status == StatusCode::UNAUTHORIZED || http_status == StatusCode::FORBIDDEN {
            return Err(StatusError::Auth(format!(
                "backend returned {}",
                http_status
            )));
        }
        if !http_status.is_success() {
            return Err(StatusError::Transport(format!(
                "unexpected status {}",
                http_status
            )));
        }

        let dto: SessionStatusDto = response
            .json()
            .await
            .map_err(|e| StatusError::Transport(format!("decode session status: {}", e)))?;

        Ok(dto.into())
    }

    fn cached(&self, token_fingerprint: u64) -> Option<OnboardingStatus> {
        self.lock_cache()
            .as_ref()
            .filter(|entry| entry.token_fingerprint == token_fingerprint)
            .filter(|entry| entry.fetched_at.elapsed() < self.cache_ttl)
            .map(|entry| entry.status.clone())
    }

    fn store_cache(&self, token_fingerprint: u64, status: OnboardingStatus) {
        *self.lock_cache() = Some(CachedStatus {
            fetched_at: Instant::now(),
            token_fingerprint,
            status,
        });
    }

    fn clear_cache(&self) {
        *self.lock_cache() = None;
    }

    fn lock_cache(&self) -> MutexGuard<'_, Option<CachedStatus>> {
        // A poisoned cache still holds a usable entry.
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl StatusClientPort for HttpStatusClient {
    async fn check_session(&self, token: &SessionToken) -> Result<OnboardingStatus, StatusError> {
        let fingerprint = token_fingerprint(token);
        if let Some(status) = self.cached(fingerprint) {
            debug!("serving session status from cache");
            return Ok(status);
        }

        let result = self.fetch_with_retry(token).await;
        match &result {
            Ok(status) => self.store_cache(fingerprint, status.clone()),
            Err(_) => self.clear_cache(),
        }
        result
    }
}

fn should_retry(err: &StatusError) -> bool {
    matches!(err, StatusError::Transport(_))
}

fn map_request_error(error: reqwest::Error) -> StatusError {
    if error.is_timeout() {
        StatusError::Transport("request timed out".to_string())
    } else {
        StatusError::Transport(error.to_string())
    }
}

/// Identity check only, so a cached status is never served for a
/// different token after a quick sign-out/sign-in.
fn token_fingerprint(token: &SessionToken) -> u64 {
    let mut hasher = DefaultHasher::new();
    token.expose().hash(&mut hasher);
    hasher.finish()
}
