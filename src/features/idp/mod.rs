//! Identity provider settings.

pub mod client;
pub mod types;

pub use self::client::patch_identity_provider;
pub use self::types::{IdentityProvider, PatchOperation, PatchOperationKind};
