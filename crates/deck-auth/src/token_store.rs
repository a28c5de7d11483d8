use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AuthError;

pub const TOKEN_ENV_VAR: &str = "TASKDECK_AUTH__TOKEN";
const CREDENTIALS_FILE_NAME: &str = "credentials";

/// Where a resolved token came from, for `deck auth status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Env,
    File,
}

impl TokenSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Env => "env",
            Self::File => "file",
        }
    }
}

/// Persist a session token to `~/.taskdeck/credentials` (0600).
///
/// # Errors
///
/// Returns `AuthError::TokenStore` if the home directory is unknown or the
/// file cannot be written.
pub fn store(token: &str) -> Result<(), AuthError> {
    store_at(&credentials_path()?, token)
}

/// Load a token. Priority: `TASKDECK_AUTH__TOKEN` env, then the credentials file.
#[must_use]
pub fn load() -> Option<String> {
    if let Some(token) = env_token() {
        return Some(token);
    }
    credentials_path().ok().and_then(|p| load_from(&p))
}

/// Delete the credentials file if present.
///
/// # Errors
///
/// Returns `AuthError::TokenStore` if the file exists but cannot be removed.
pub fn delete() -> Result<(), AuthError> {
    delete_at(&credentials_path()?)
}

#[must_use]
pub fn detect_token_source() -> Option<TokenSource> {
    if env_token().is_some() {
        return Some(TokenSource::Env);
    }
    credentials_path()
        .ok()
        .and_then(|p| load_from(&p))
        .map(|_| TokenSource::File)
}

/// # Errors
///
/// Returns `AuthError::TokenStore` if the home directory cannot be resolved.
pub fn credentials_path() -> Result<PathBuf, AuthError> {
    dirs::home_dir()
        .map(|h| h.join(".taskdeck").join(CREDENTIALS_FILE_NAME))
        .ok_or_else(|| {
            AuthError::TokenStore("home directory not found, cannot store credentials".into())
        })
}

fn env_token() -> Option<String> {
    std::env::var(TOKEN_ENV_VAR)
        .ok()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

pub(crate) fn store_at(path: &Path, token: &str) -> Result<(), AuthError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| AuthError::TokenStore(format!("mkdir {}: {e}", parent.display())))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
            }
        }
    }
    fs::write(path, token)
        .map_err(|e| AuthError::TokenStore(format!("write {}: {e}", path.display())))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))
            .map_err(|e| AuthError::TokenStore(format!("chmod {}: {e}", path.display())))?;
    }

    Ok(())
}

pub(crate) fn load_from(path: &Path) -> Option<String> {
    fs::read_to_string(path)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

pub(crate) fn delete_at(path: &Path) -> Result<(), AuthError> {
    if path.exists() {
        fs::remove_file(path).map_err(|e| {
            AuthError::TokenStore(format!("failed to delete {}: {e}", path.display()))
        })?;
    }
    Ok(())
}
