//! HTTP helpers for the remote JSON APIs with a shared timeout and consistent
//! error mapping. Feature clients use these helpers instead of building requests
//! themselves. The helpers never store tokens; they only attach the headers
//! derived from the `Session` passed by the caller.

pub mod config;
pub mod errors;
pub mod session;

pub use self::config::ApiConfig;
pub use self::errors::AppError;
pub use self::session::Session;

use crate::APP_USER_AGENT;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    Client, Method, RequestBuilder, Response,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info_span, Instrument};

/// Maximum number of error body characters surfaced to callers.
const MAX_ERROR_CHARS: usize = 200;

#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
}

impl ApiClient {
    /// Build a client with the crate user agent and the configured timeout.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the underlying HTTP client cannot be built.
    pub fn new(config: ApiConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// URL on the identity/application management API.
    #[must_use]
    pub fn api_url(&self, path: &str) -> String {
        config::build_url_with_base(&self.config.api_base_url, path)
    }

    /// URL on the booking API.
    #[must_use]
    pub fn booking_url(&self, path: &str) -> String {
        config::build_url_with_base(&self.config.booking_base_url, path)
    }

    /// GET a JSON document from the identity API.
    ///
    /// # Errors
    /// Returns an `AppError` on transport failure, non-2xx status, or undecodable body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        session: &Session,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, AppError> {
        let url = self.api_url(path);
        let mut builder = self.request(Method::GET, &url, session)?;
        if !query.is_empty() {
            builder = builder.query(query);
        }

        let response = send(builder, "GET", &url).await?;
        handle_json_response(response).await
    }

    /// PATCH a JSON body to the identity API and decode the JSON answer.
    ///
    /// # Errors
    /// Returns an `AppError` on encode failure, transport failure, non-2xx status, or
    /// undecodable body.
    pub async fn patch_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        session: &Session,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let url = self.api_url(path);
        let payload = encode(body)?;
        let builder = self.request(Method::PATCH, &url, session)?.body(payload);

        let response = send(builder, "PATCH", &url).await?;
        handle_json_response(response).await
    }

    /// PUT to an absolute URL and hand back the raw response, whatever its status.
    ///
    /// # Errors
    /// Returns an `AppError` only when the body cannot be encoded or the request
    /// never gets an answer (connect failure, timeout).
    pub async fn put_raw<B: Serialize + ?Sized>(
        &self,
        session: &Session,
        url: &str,
        body: Option<&B>,
    ) -> Result<Response, AppError> {
        let mut builder = self.request(Method::PUT, url, session)?;
        if let Some(body) = body {
            builder = builder.body(encode(body)?);
        }

        send(builder, "PUT", url).await
    }

    fn request(
        &self,
        method: Method,
        url: &str,
        session: &Session,
    ) -> Result<RequestBuilder, AppError> {
        Ok(self
            .client
            .request(method, url)
            .headers(auth_headers(session)?))
    }
}

/// Headers attached to every authenticated call.
///
/// # Errors
/// Returns `AppError::Config` if the token cannot be carried in a header.
pub fn auth_headers(session: &Session) -> Result<HeaderMap, AppError> {
    let mut authorization = HeaderValue::from_str(&session.bearer())
        .map_err(|_| AppError::Config("access token is not a valid header value".to_string()))?;
    authorization.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, authorization);
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    Ok(headers)
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<Vec<u8>, AppError> {
    serde_json::to_vec(body)
        .map_err(|err| AppError::Serialization(format!("Failed to encode request: {err}")))
}

async fn send(builder: RequestBuilder, method: &str, url: &str) -> Result<Response, AppError> {
    let span = info_span!("petcare.api", http.method = method, url = %url);

    let response = builder
        .send()
        .instrument(span)
        .await
        .map_err(map_request_error)?;

    debug!("{} {} -> {}", method, url, response.status());

    Ok(response)
}

/// Maps transport errors into `AppError` variants with timeout detection.
fn map_request_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else {
        AppError::Network(format!("Unable to reach the server: {err}"))
    }
}

/// Parses JSON responses and surfaces HTTP errors with sanitized bodies.
async fn handle_json_response<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let status = response.status();
    let body = response.text().await.map_err(map_request_error)?;

    if status.is_success() {
        serde_json::from_str::<T>(&body)
            .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
    } else {
        Err(AppError::Http {
            status: status.as_u16(),
            message: sanitize_body(&body),
        })
    }
}

/// Trims and truncates HTTP error bodies before they reach callers.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
