//! Login flow (authentication sequence) inspection and edits.
//!
//! The membership check is pure: it never mutates the application and gives the
//! same answer for the same inputs. Edits work on an owned copy of the sequence
//! that the caller then sends back to the server.

use super::types::{Application, AuthenticationSequence, AuthenticationStep, AuthenticatorOption};
use thiserror::Error;

/// Identity provider name used for authenticators hosted by the platform itself.
pub const LOCAL_IDP: &str = "LOCAL";

/// Whether an authenticator takes part in a login flow, and at which step first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Membership {
    pub present: bool,
    pub step_index: Option<usize>,
}

impl Membership {
    const ABSENT: Self = Self {
        present: false,
        step_index: None,
    };
}

/// Membership as seen by a panel: not loaded yet, in the flow, or not in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginFlowState {
    #[default]
    Unknown,
    InFlow {
        step_index: usize,
    },
    NotInFlow,
}

impl From<Membership> for LoginFlowState {
    fn from(membership: Membership) -> Self {
        match membership.step_index {
            Some(step_index) if membership.present => Self::InFlow { step_index },
            _ => Self::NotInFlow,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    #[error("authenticator id must not be empty")]
    EmptyAuthenticator,
}

/// Scan the application's steps in order and report the first step offering
/// `authenticator_id`.
///
/// Callers must only invoke this once the application detail has been loaded.
#[must_use]
pub fn check_authenticator_in_auth_sequence(
    application: &Application,
    authenticator_id: &str,
) -> Membership {
    find_step(&application.authentication_sequence.steps, authenticator_id).map_or(
        Membership::ABSENT,
        |index| Membership {
            present: true,
            step_index: Some(index),
        },
    )
}

fn find_step(steps: &[AuthenticationStep], authenticator_id: &str) -> Option<usize> {
    steps
        .iter()
        .position(|step| step.authenticators().any(|id| id == authenticator_id))
}

/// Add `authenticator` to the login flow.
///
/// The option joins the second step when the flow already has one, otherwise a
/// new step is appended. Returns `Ok(false)` if the authenticator was already
/// offered somewhere.
///
/// # Errors
/// Returns `SequenceError::EmptyAuthenticator` for a blank authenticator id.
pub fn add_authenticator(
    sequence: &mut AuthenticationSequence,
    idp: &str,
    authenticator: &str,
) -> Result<bool, SequenceError> {
    if authenticator.trim().is_empty() {
        return Err(SequenceError::EmptyAuthenticator);
    }
    if find_step(&sequence.steps, authenticator).is_some() {
        return Ok(false);
    }

    let option = AuthenticatorOption {
        idp: idp.to_string(),
        authenticator: authenticator.to_string(),
    };

    if let Some(second) = sequence.steps.get_mut(1) {
        second.options.push(option);
    } else {
        let id = step_id(sequence.steps.len());
        sequence.steps.push(AuthenticationStep {
            id,
            options: vec![option],
        });
    }

    Ok(true)
}

/// Remove `authenticator` from every step of the login flow.
///
/// Steps left without options are dropped and the remaining steps renumbered
/// from 1. Returns `Ok(false)` if the authenticator was not offered anywhere.
///
/// # Errors
/// Returns `SequenceError::EmptyAuthenticator` for a blank authenticator id.
pub fn remove_authenticator(
    sequence: &mut AuthenticationSequence,
    authenticator: &str,
) -> Result<bool, SequenceError> {
    if authenticator.trim().is_empty() {
        return Err(SequenceError::EmptyAuthenticator);
    }
    if find_step(&sequence.steps, authenticator).is_none() {
        return Ok(false);
    }

    for step in &mut sequence.steps {
        step.options
            .retain(|option| option.authenticator != authenticator);
    }
    sequence.steps.retain(|step| !step.options.is_empty());

    for (index, step) in sequence.steps.iter_mut().enumerate() {
        step.id = step_id(index);
    }

    let last = u32::try_from(sequence.steps.len()).unwrap_or(u32::MAX);
    sequence.subject_step_id = clamp_step_id(sequence.subject_step_id, last);
    sequence.attribute_step_id = clamp_step_id(sequence.attribute_step_id, last);

    Ok(true)
}

fn step_id(index: usize) -> u32 {
    u32::try_from(index + 1).unwrap_or(u32::MAX)
}

fn clamp_step_id(id: Option<u32>, last: u32) -> Option<u32> {
    if last == 0 {
        return None;
    }
    id.map(|id| id.clamp(1, last))
}
