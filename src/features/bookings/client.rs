//! Booking API calls.
//!
//! The update is a plain pass-through: one PUT, no retry, and the response is
//! handed back untouched so the caller decides what a 4xx/5xx means.

use crate::api::{config::encode_path, ApiClient, AppError, Session};
use reqwest::Response;
use serde::Serialize;
use tracing::{debug, instrument};

/// Path of a booking inside an organization.
///
/// # Errors
/// Returns `AppError::Config` if an id is blank or a dot segment.
pub fn booking_path(org_id: &str, booking_id: &str) -> Result<String, AppError> {
    encode_path(&["org", org_id, "bookings", booking_id])
}

/// Replace a booking with `payload` and return the raw response.
///
/// # Errors
/// Returns an `AppError` only if the ids do not form a valid path, the payload
/// cannot be encoded, or the request gets no answer. Error statuses are returned as `Ok`.
#[instrument(skip(client, session, payload), fields(org_id = session.org_id()))]
pub async fn update_booking<B: Serialize + ?Sized>(
    client: &ApiClient,
    session: &Session,
    booking_id: &str,
    payload: Option<&B>,
) -> Result<Response, AppError> {
    let url = client.booking_url(&booking_path(session.org_id(), booking_id)?);

    let response = client.put_raw(session, &url, payload).await?;

    debug!("booking {} update answered {}", booking_id, response.status());

    Ok(response)
}
