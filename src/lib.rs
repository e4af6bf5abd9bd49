//! # petcare-admin (Business Admin for the Pet-Care Platform)
//!
//! `petcare-admin` is the headless controller layer of the pet-care business
//! admin. It updates bookings against the booking API and manages which MFA
//! authenticators (email OTP, SMS OTP, TOTP) take part in the login flow of the
//! organization's application.
//!
//! ## Login Flow Model
//!
//! An application owns an ordered authentication sequence. Each step offers a set
//! of authenticators; a user must satisfy one option per step to log in.
//!
//! - **Default Application:** the admin always operates on the first application
//!   returned by the application listing.
//! - **Membership:** an authenticator is "in the login flow" when any step offers
//!   it. Membership is derived on every detail fetch and never stored.
//!
//! ## MFA Panels
//!
//! One generic panel drives every mechanism. A load cycle fetches the application
//! list, then the first application's detail, then computes membership. Cycles are
//! numbered; results of an older cycle are dropped.
//!
//! ## Sessions
//!
//! Access tokens and organization ids are passed explicitly to every call and are
//! never logged.

pub mod api;
pub mod cli;
pub mod features;
pub mod mfa;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
