use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum PatchOperationKind {
    Add,
    Replace,
    Remove,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PatchOperation {
    pub operation: PatchOperationKind,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl PatchOperation {
    #[must_use]
    pub fn replace(path: impl Into<String>, value: Value) -> Self {
        Self {
            operation: PatchOperationKind::Replace,
            path: path.into(),
            value: Some(value),
        }
    }
}

impl FromStr for PatchOperation {
    type Err = String;

    /// Parses `path=value` into a REPLACE operation. Values that are valid JSON are
    /// sent as JSON, anything else as a string.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (path, value) = raw
            .split_once('=')
            .ok_or_else(|| format!("expected path=value, got {raw}"))?;
        let path = path.trim();
        if !path.starts_with('/') {
            return Err(format!("patch path must start with '/', got {path}"));
        }

        let value = value.trim();
        let value =
            serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));

        Ok(Self::replace(path, value))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IdentityProvider {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
}
