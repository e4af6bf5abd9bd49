use super::form::FormError;
use crate::api::AppError;
use crate::features::applications::sequence::SequenceError;
use thiserror::Error;

/// Why a panel could not finish loading or applying a change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PanelError {
    #[error("application not found")]
    NotFound,
    #[error("failed to load applications: {0}")]
    TransientFetch(String),
    #[error("unexpected response from the identity service: {0}")]
    FatalConfig(String),
}

impl PanelError {
    /// Only `NotFound` stays silent; the panel simply shows no toggle.
    #[must_use]
    pub fn is_user_visible(&self) -> bool {
        !matches!(self, Self::NotFound)
    }
}

impl From<AppError> for PanelError {
    fn from(err: AppError) -> Self {
        if err.status() == Some(404) {
            Self::NotFound
        } else if err.is_transient() {
            Self::TransientFetch(err.to_string())
        } else {
            Self::FatalConfig(err.to_string())
        }
    }
}

/// Why a user action on a panel was refused or failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PanelActionError {
    #[error("login flow membership is not known yet")]
    NotReady,
    #[error("no confirmation is open")]
    NoConfirmation,
    #[error("this mechanism has no settings form")]
    NoForm,
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    Sequence(#[from] SequenceError),
    #[error(transparent)]
    Panel(#[from] PanelError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_app_errors() {
        assert_eq!(
            PanelError::from(AppError::Http {
                status: 404,
                message: "gone".to_string()
            }),
            PanelError::NotFound
        );
        assert!(matches!(
            PanelError::from(AppError::Timeout("slow".to_string())),
            PanelError::TransientFetch(_)
        ));
        assert!(matches!(
            PanelError::from(AppError::Http {
                status: 500,
                message: "boom".to_string()
            }),
            PanelError::TransientFetch(_)
        ));
        assert!(matches!(
            PanelError::from(AppError::Parse("bad json".to_string())),
            PanelError::FatalConfig(_)
        ));
        assert!(matches!(
            PanelError::from(AppError::Http {
                status: 403,
                message: "denied".to_string()
            }),
            PanelError::FatalConfig(_)
        ));
    }

    #[test]
    fn only_not_found_is_hidden() {
        assert!(!PanelError::NotFound.is_user_visible());
        assert!(PanelError::TransientFetch("x".to_string()).is_user_visible());
        assert!(PanelError::FatalConfig("x".to_string()).is_user_visible());
    }
}
