use crate::cli::globals::GlobalArgs;
use crate::features::bookings::update_booking;
use anyhow::{bail, Result};
use serde_json::Value;
use tracing::info;

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub booking_id: String,
    pub payload: Option<Value>,
}

/// Send the booking update and print the status and body the server answered.
///
/// # Errors
/// Returns an error if the request gets no answer or the server rejects it.
pub async fn execute(args: Args) -> Result<()> {
    let client = args.globals.client()?;

    let response = update_booking(
        &client,
        &args.globals.session,
        &args.booking_id,
        args.payload.as_ref(),
    )
    .await?;

    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    println!("{status}");
    if !body.is_empty() {
        println!("{body}");
    }

    if !status.is_success() {
        bail!("booking {} update failed with {}", args.booking_id, status);
    }

    info!("booking {} updated", args.booking_id);

    Ok(())
}
