//! Controller seam between panels and the application API.
//!
//! Panels only see `ApplicationController`, so the fetch/derive sequence can be
//! driven against the real API or an in-memory double. The HTTP implementation
//! retries reads that failed for transient reasons; writes are sent once.

use crate::api::{ApiClient, AppError, Session};
use crate::features::applications::{
    client,
    types::{Application, ApplicationList, AuthenticationSequence},
};
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Default attempts for controller reads.
pub const DEFAULT_FETCH_ATTEMPTS: u32 = 3;
/// Delay before the second attempt; doubles after every failure.
pub const DEFAULT_BACKOFF_BASE: Duration = Duration::from_millis(250);

#[async_trait]
pub trait ApplicationController: Send + Sync {
    async fn list_current_applications(&self, session: &Session)
        -> Result<ApplicationList, AppError>;

    async fn get_application(
        &self,
        session: &Session,
        application_id: &str,
    ) -> Result<Application, AppError>;

    async fn update_authentication_sequence(
        &self,
        session: &Session,
        application_id: &str,
        sequence: &AuthenticationSequence,
    ) -> Result<Application, AppError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub backoff_base: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_FETCH_ATTEMPTS,
            backoff_base: DEFAULT_BACKOFF_BASE,
        }
    }
}

impl RetryPolicy {
    /// Backoff before `attempt` (1-based); the first attempt never waits.
    #[must_use]
    pub fn backoff(&self, attempt: u32) -> Duration {
        if attempt <= 1 {
            return Duration::ZERO;
        }
        self.backoff_base
            .saturating_mul(2u32.saturating_pow(attempt - 2))
    }
}

#[derive(Debug, Clone)]
pub struct HttpApplicationController {
    client: ApiClient,
    name_filter: Option<String>,
    retry: RetryPolicy,
}

impl HttpApplicationController {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            name_filter: None,
            retry: RetryPolicy::default(),
        }
    }

    /// Only list applications with this exact name.
    #[must_use]
    pub fn with_name_filter(mut self, name: Option<String>) -> Self {
        self.name_filter = name.filter(|name| !name.trim().is_empty());
        self
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

/// Run `operation` until it succeeds, fails permanently, or attempts run out.
///
/// # Errors
/// Returns the last error seen.
pub async fn with_backoff<T, F, Fut>(
    retry: RetryPolicy,
    label: &str,
    mut operation: F,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, AppError>>,
{
    let attempts = retry.attempts.max(1);

    for attempt in 1..=attempts {
        let backoff = retry.backoff(attempt);
        if !backoff.is_zero() {
            warn!("Backing off for {:?} before {} attempt {}", backoff, label, attempt);
            sleep(backoff).await;
        }

        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_transient() && attempt < attempts => {
                debug!("{} attempt {} failed: {}", label, attempt, err);
            }
            Err(err) => return Err(err),
        }
    }

    Err(AppError::Network(format!(
        "{label} failed after {attempts} attempts"
    )))
}

#[async_trait]
impl ApplicationController for HttpApplicationController {
    async fn list_current_applications(
        &self,
        session: &Session,
    ) -> Result<ApplicationList, AppError> {
        with_backoff(self.retry, "list applications", || {
            client::list_current_applications(&self.client, session, self.name_filter.as_deref())
        })
        .await
    }

    async fn get_application(
        &self,
        session: &Session,
        application_id: &str,
    ) -> Result<Application, AppError> {
        with_backoff(self.retry, "get application", || {
            client::get_application(&self.client, session, application_id)
        })
        .await
    }

    async fn update_authentication_sequence(
        &self,
        session: &Session,
        application_id: &str,
        sequence: &AuthenticationSequence,
    ) -> Result<Application, AppError> {
        client::update_authentication_sequence(&self.client, session, application_id, sequence)
            .await
    }
}
