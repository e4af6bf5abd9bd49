//! Settings form schemas for the MFA panels and a small form model with the
//! same rules the admin UI applies: every field is required, and submit is
//! only allowed for a dirty form without validation errors.

use std::collections::BTreeMap;
use thiserror::Error;

pub const REQUIRED_FIELD_MESSAGE: &str = "This field cannot be empty";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub helper_text: Option<&'static str>,
    /// Rendered masked and never echoed back.
    pub secret: bool,
}

impl FormField {
    const fn new(name: &'static str, label: &'static str, helper_text: Option<&'static str>) -> Self {
        Self {
            name,
            label,
            helper_text,
            secret: false,
        }
    }

    const fn secret(mut self) -> Self {
        self.secret = true;
        self
    }
}

pub const EMAIL_FIELDS: &[FormField] = &[
    FormField::new(
        "server_host",
        "Server Host",
        Some("The Server Host usually begins with smtp, followed by the domain name of the email service provider."),
    ),
    FormField::new("server_port", "Server Port", None),
    FormField::new(
        "from_address",
        "From Address",
        Some("The From Address is the email address you want to appear as the sender of your outgoing emails."),
    ),
    FormField::new(
        "reply_to_address",
        "Reply-to Address",
        Some("The Reply-To Address is used to specify the email address that recipients should use if they want to reply to your message."),
    ),
    FormField::new(
        "username",
        "Username",
        Some("The SMTP username is usually the same as your email address."),
    ),
    FormField::new(
        "password",
        "Password",
        Some("The SMTP password is a security credential that is used to authenticate and verify your identity when sending emails through the SMTP server."),
    )
    .secret(),
    FormField::new(
        "display_name",
        "Display Name",
        Some("The Display Name is used to specify the name that recipients will see in their email inbox when they receive your message."),
    ),
];

pub const SMS_FIELDS: &[FormField] = &[
    FormField::new(
        "sms_provider_name",
        "SMS Provider Name",
        Some("The name of the SMS provider."),
    ),
    FormField::new(
        "sms_provider_url",
        "SMS Provider URL",
        Some("The URL of the SMS provider."),
    ),
    FormField::new(
        "sms_provider_auth_key",
        "SMS Provider Auth Key",
        Some("The auth key of the SMS provider."),
    )
    .secret(),
    FormField::new(
        "sms_provider_auth_secret",
        "SMS Provider Auth Secret",
        Some("The auth secret of the SMS provider."),
    )
    .secret(),
    FormField::new("sender", "Sender", Some("The sender of the SMS.")),
    FormField::new(
        "content_type",
        "Content Type",
        Some("The content type of the API request used for sending the SMS."),
    ),
    FormField::new(
        "headers",
        "Headers",
        Some("Headers to be included in the send SMS API request."),
    ),
    FormField::new(
        "http_method",
        "HTTP Method",
        Some("The HTTP method of the API request used for sending the SMS."),
    ),
    FormField::new("payload", "Payload", Some("Payload of the SMS API request.")),
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("unknown form field: {0}")]
    UnknownField(String),
    #[error("nothing to submit, the form is unchanged")]
    Pristine,
    #[error("a submission is already in progress")]
    Submitting,
    #[error("form has {} invalid field(s)", .0.len())]
    Invalid(BTreeMap<&'static str, String>),
}

#[derive(Debug, Clone)]
pub struct SettingsForm {
    fields: &'static [FormField],
    values: BTreeMap<&'static str, String>,
    pristine: bool,
    submitting: bool,
}

impl SettingsForm {
    #[must_use]
    pub fn new(fields: &'static [FormField]) -> Self {
        Self {
            fields,
            values: BTreeMap::new(),
            pristine: true,
            submitting: false,
        }
    }

    #[must_use]
    pub fn fields(&self) -> &'static [FormField] {
        self.fields
    }

    /// Set a field value by name.
    ///
    /// # Errors
    /// Returns `FormError::UnknownField` if the schema has no such field.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        let field = self
            .fields
            .iter()
            .find(|field| field.name == name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;

        self.values.insert(field.name, value.into());
        self.pristine = false;

        Ok(())
    }

    /// Required-field errors keyed by field name; empty when the form is valid.
    #[must_use]
    pub fn validate(&self) -> BTreeMap<&'static str, String> {
        self.fields
            .iter()
            .filter(|field| {
                self.values
                    .get(field.name)
                    .map_or(true, |value| value.trim().is_empty())
            })
            .map(|field| (field.name, REQUIRED_FIELD_MESSAGE.to_string()))
            .collect()
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.submitting && !self.pristine && self.validate().is_empty()
    }

    /// Accept the current values and restart the form.
    ///
    /// The form is cleared and stays marked submitting; there is no settings
    /// endpoint to report completion.
    ///
    /// # Errors
    /// Returns a `FormError` if the form is pristine, already submitting, or invalid.
    pub fn submit(&mut self) -> Result<BTreeMap<&'static str, String>, FormError> {
        if self.submitting {
            return Err(FormError::Submitting);
        }
        if self.pristine {
            return Err(FormError::Pristine);
        }
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(FormError::Invalid(errors));
        }

        let values = std::mem::take(&mut self.values);
        self.pristine = true;
        self.submitting = true;

        Ok(values)
    }
}
