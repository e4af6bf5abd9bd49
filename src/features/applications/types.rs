//! Wire types for the application management API.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSummary {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationList {
    #[serde(default)]
    pub total_results: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_index: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(default)]
    pub applications: Vec<ApplicationSummary>,
}

impl ApplicationList {
    /// The application the admin operates on: the first one the server lists.
    #[must_use]
    pub fn first(&self) -> Option<&ApplicationSummary> {
        if self.total_results == 0 {
            return None;
        }
        self.applications.first()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub authentication_sequence: AuthenticationSequence,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationSequence {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub sequence_type: Option<String>,
    #[serde(default)]
    pub steps: Vec<AuthenticationStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_step_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute_step_id: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AuthenticationStep {
    pub id: u32,
    #[serde(default)]
    pub options: Vec<AuthenticatorOption>,
}

impl AuthenticationStep {
    /// Identifiers of the authenticators usable at this step.
    pub fn authenticators(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(|option| option.authenticator.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AuthenticatorOption {
    pub idp: String,
    pub authenticator: String,
}

/// Body of the PATCH that replaces an application's login flow.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAuthenticationSequenceRequest<'a> {
    pub authentication_sequence: &'a AuthenticationSequence,
}
