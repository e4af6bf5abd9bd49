//! Multi-factor authentication panels: Email OTP, SMS OTP and TOTP.

pub mod errors;
pub mod form;
pub mod mechanism;
pub mod panel;

pub use self::errors::{PanelActionError, PanelError};
pub use self::form::{FormError, FormField, SettingsForm};
pub use self::mechanism::{MfaMechanism, PanelCapability};
pub use self::panel::{ConfirmIntent, LoadOutcome, MfaPanel, PanelPhase, PanelView, ToggleAction};
