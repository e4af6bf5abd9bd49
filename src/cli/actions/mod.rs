pub mod booking;
pub mod idp;
pub mod mfa;

mod run;

#[derive(Debug)]
pub enum Action {
    BookingUpdate(booking::Args),
    MfaStatus(mfa::StatusArgs),
    MfaToggle(mfa::ToggleArgs),
    MfaFields(mfa::FieldsArgs),
    IdpPatch(idp::Args),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
