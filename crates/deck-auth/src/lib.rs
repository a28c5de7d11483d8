//! # deck-auth
//!
//! Account registration, password login, and bearer-session resolution.
//!
//! Sessions are opaque 64-character hex tokens stored server-side with an
//! expiry. The CLI keeps the current token in `~/.taskdeck/credentials`;
//! `TASKDECK_AUTH__TOKEN` overrides the file.

pub mod authenticator;
pub mod credentials;
pub mod error;
pub mod password;
pub mod token;
pub mod token_store;

pub use authenticator::{AuthPolicy, Authenticator};
pub use error::AuthError;
pub use token_store::TokenSource;

/// Locate the stored session token for this machine.
///
/// # Errors
///
/// Returns `AuthError::NotAuthenticated` if neither the env var nor the
/// credentials file holds a token.
pub fn resolve_token() -> Result<String, AuthError> {
    token_store::load().ok_or(AuthError::NotAuthenticated)
}

/// Forget the locally stored token.
///
/// # Errors
///
/// Returns `AuthError::TokenStore` if the credentials file cannot be removed.
pub fn logout() -> Result<(), AuthError> {
    token_store::delete()?;
    tracing::info!("logged out, credentials cleared");
    Ok(())
}
