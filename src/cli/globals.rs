use crate::api::{ApiClient, ApiConfig, Session};
use crate::cli::commands::api::Options;
use crate::features::applications::{HttpApplicationController, RetryPolicy};
use anyhow::{Context, Result};

/// Connection settings shared by every action that talks to the remote APIs.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub config: ApiConfig,
    pub session: Session,
    pub application_name: Option<String>,
    pub retry: RetryPolicy,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self {
            config: options.config,
            session: Session::new(options.access_token, options.org_id),
            application_name: options.application_name,
            retry: options.retry,
        }
    }

    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn client(&self) -> Result<ApiClient> {
        ApiClient::new(self.config.clone()).context("failed to build API client")
    }

    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn controller(&self) -> Result<HttpApplicationController> {
        Ok(HttpApplicationController::new(self.client()?)
            .with_name_filter(self.application_name.clone())
            .with_retry(self.retry))
    }
}
