use deck_db::error::DatabaseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not authenticated: run `deck auth login`")]
    NotAuthenticated,

    #[error("session expired: run `deck auth login` again")]
    SessionExpired,

    /// Unknown email and wrong password share this variant.
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("email already registered: {0}")]
    EmailTaken(String),

    #[error("{0}")]
    Validation(String),

    #[error("password hashing failed: {0}")]
    Hash(String),

    #[error("token store error: {0}")]
    TokenStore(String),

    #[error(transparent)]
    Database(DatabaseError),
}

impl From<DatabaseError> for AuthError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::Conflict(msg) => Self::EmailTaken(msg),
            other => Self::Database(other),
        }
    }
}

impl AuthError {
    /// True for failures that mean "no usable session" (HTTP 401).
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Self::NotAuthenticated | Self::SessionExpired | Self::InvalidCredentials
        )
    }
}
