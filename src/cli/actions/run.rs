use crate::cli::actions::{booking, idp, mfa, Action};
use anyhow::Result;

/// Single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::BookingUpdate(args) => booking::execute(args).await,
        Action::MfaStatus(args) => mfa::status(args).await,
        Action::MfaToggle(args) => mfa::toggle(args).await,
        Action::MfaFields(args) => {
            mfa::fields(&args);
            Ok(())
        }
        Action::IdpPatch(args) => idp::execute(args).await,
    }
}
