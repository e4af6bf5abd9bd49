use secrecy::{ExposeSecret, SecretString};

/// Caller identity for every remote call: a bearer access token and the
/// organization it acts for. Issued elsewhere; this crate only carries it.
#[derive(Debug, Clone)]
pub struct Session {
    access_token: SecretString,
    org_id: String,
}

impl Session {
    #[must_use]
    pub fn new(access_token: SecretString, org_id: impl Into<String>) -> Self {
        Self {
            access_token,
            org_id: org_id.into(),
        }
    }

    #[must_use]
    pub fn org_id(&self) -> &str {
        &self.org_id
    }

    pub(crate) fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token.expose_secret())
    }
}
