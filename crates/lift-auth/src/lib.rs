//! # lift-auth
//!
//! Passwordless email sign-in for liftlog.
//!
//! Provides the emailed-link flow against a GoTrue-compatible auth API
//! ([`client`]), parsing of whatever the user pastes back from the email
//! ([`link`]), session persistence in the OS keychain with a file fallback
//! ([`session_store`]), and the [`IdentityProvider`] that ties them together
//! and notifies subscribers whenever the signed-in owner changes.

pub mod claims;
pub mod client;
pub mod error;
pub mod link;
pub mod provider;
pub mod session;
pub mod session_store;

pub use client::{AuthApi, AuthClient};
pub use error::AuthError;
pub use link::SignInProof;
pub use provider::IdentityProvider;
pub use session::Session;
pub use session_store::SessionStore;
