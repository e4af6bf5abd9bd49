//! Endpoint configuration for the remote APIs. The identity/application API and
//! the booking API may live on different hosts; when no booking base is given the
//! identity base is reused. Configuration values are public; tokens live in
//! `Session`, never here.

use super::errors::AppError;
use std::time::Duration;
use url::Url;

/// Default request timeout applied by the HTTP client.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub api_base_url: String,
    pub booking_base_url: String,
    pub timeout: Duration,
}

impl ApiConfig {
    /// Build a config from raw base URLs.
    ///
    /// # Errors
    /// Returns `AppError::Config` if a base URL is empty, unparsable, or not http(s).
    pub fn new(api_base_url: &str, booking_base_url: Option<&str>) -> Result<Self, AppError> {
        let api_base_url = normalize_base_url(api_base_url)?;
        let booking_base_url = match booking_base_url.and_then(normalize_value) {
            Some(value) => normalize_base_url(&value)?,
            None => api_base_url.clone(),
        };

        Ok(Self {
            api_base_url,
            booking_base_url,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn normalize_base_url(raw: &str) -> Result<String, AppError> {
    let value =
        normalize_value(raw).ok_or_else(|| AppError::Config("base URL is empty".to_string()))?;

    let url = Url::parse(&value)
        .map_err(|err| AppError::Config(format!("invalid base URL {value}: {err}")))?;

    match url.scheme() {
        "http" | "https" => Ok(value.trim_end_matches('/').to_string()),
        scheme => Err(AppError::Config(format!(
            "unsupported scheme {scheme} in base URL {value}"
        ))),
    }
}

/// Join a base URL and a path with exactly one slash between them.
#[must_use]
pub fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Build a URL path from raw segments, percent-encoding each one so ids cannot
/// add segments, a query, or a fragment.
///
/// # Errors
/// Returns `AppError::Config` for a blank, `.` or `..` segment.
pub fn encode_path(segments: &[&str]) -> Result<String, AppError> {
    if let Some(bad) = segments
        .iter()
        .find(|segment| matches!(segment.trim(), "" | "." | ".."))
    {
        return Err(AppError::Config(format!("invalid path segment: {bad:?}")));
    }

    let mut url = Url::parse("http://localhost/")
        .map_err(|err| AppError::Config(format!("invalid path base: {err}")))?;
    url.path_segments_mut()
        .map_err(|()| AppError::Config("path cannot be extended".to_string()))?
        .clear()
        .extend(segments);

    Ok(url.path().to_string())
}
