use super::form::{FormField, EMAIL_FIELDS, SMS_FIELDS};
use std::{fmt, str::FromStr};

pub const EMAIL_OTP_AUTHENTICATOR: &str = "email-otp";
pub const SMS_OTP_AUTHENTICATOR: &str = "sms-otp";
pub const TOTP_AUTHENTICATOR: &str = "totp";

/// What a panel offers besides the login flow toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelCapability {
    HasForm(&'static [FormField]),
    ToggleOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MfaMechanism {
    Email,
    Sms,
    Totp,
}

impl MfaMechanism {
    pub const ALL: [Self; 3] = [Self::Email, Self::Sms, Self::Totp];

    #[must_use]
    pub const fn authenticator_id(self) -> &'static str {
        match self {
            Self::Email => EMAIL_OTP_AUTHENTICATOR,
            Self::Sms => SMS_OTP_AUTHENTICATOR,
            Self::Totp => TOTP_AUTHENTICATOR,
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Email => "Email OTP",
            Self::Sms => "SMS OTP",
            Self::Totp => "TOTP",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Email => "Configure Email as multi-factor authentication.",
            Self::Sms => "Configure SMS as multi-factor authentication.",
            Self::Totp => "Configure TOTP as multi-factor authentication.",
        }
    }

    #[must_use]
    pub const fn capability(self) -> PanelCapability {
        match self {
            Self::Email => PanelCapability::HasForm(EMAIL_FIELDS),
            Self::Sms => PanelCapability::HasForm(SMS_FIELDS),
            Self::Totp => PanelCapability::ToggleOnly,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Sms => "sms",
            Self::Totp => "totp",
        }
    }
}

impl fmt::Display for MfaMechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MfaMechanism {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_lowercase().as_str() {
            "email" | "email-otp" => Ok(Self::Email),
            "sms" | "sms-otp" => Ok(Self::Sms),
            "totp" => Ok(Self::Totp),
            other => Err(format!("unknown MFA mechanism: {other}")),
        }
    }
}
