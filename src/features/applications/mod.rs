//! Applications and their login flows.

pub mod client;
pub mod controller;
pub mod sequence;
pub mod types;

pub use self::controller::{ApplicationController, HttpApplicationController, RetryPolicy};
pub use self::sequence::{check_authenticator_in_auth_sequence, LoginFlowState, Membership};
pub use self::types::{Application, ApplicationList, ApplicationSummary};
