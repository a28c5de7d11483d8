use thiserror::Error;

use deck_auth::AuthError;
use deck_core::errors::CoreError;
use deck_db::error::DatabaseError;

/// Every failure the API reports, one variant per status code.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Method Not Allowed")]
    MethodNotAllowed { allow: &'static str },

    #[error("{0}")]
    Conflict(String),

    /// Details are logged, never returned.
    #[error("Internal Server Error")]
    Internal,
}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::Unauthorized(_) => 401,
            Self::NotFound(_) => 404,
            Self::MethodNotAllowed { .. } => 405,
            Self::Conflict(_) => 409,
            Self::Internal => 500,
        }
    }

    pub(crate) fn unauthorized() -> Self {
        Self::Unauthorized("Unauthorized".into())
    }
}

impl From<DatabaseError> for ApiError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::Core(core @ CoreError::NotFound { .. }) => Self::NotFound(core.to_string()),
            DatabaseError::Core(CoreError::Validation(message)) => Self::BadRequest(message),
            DatabaseError::Conflict(message) => Self::Conflict(message),
            other => {
                tracing::error!(error = %other, "storage failure");
                Self::Internal
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::Validation(message) => Self::BadRequest(message),
            taken @ AuthError::EmailTaken(_) => Self::Conflict(taken.to_string()),
            AuthError::NotAuthenticated => Self::unauthorized(),
            AuthError::SessionExpired => Self::Unauthorized("session expired".into()),
            invalid @ AuthError::InvalidCredentials => Self::Unauthorized(invalid.to_string()),
            AuthError::Database(db) => db.into(),
            other => {
                tracing::error!(error = %other, "auth failure");
                Self::Internal
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn foreign_and_missing_tasks_map_to_the_same_404() {
        let missing: ApiError = DatabaseError::Core(CoreError::task_not_found(9)).into();
        assert_eq!(missing.status(), 404);
        assert!(missing.to_string().contains('9'));
    }

    #[test]
    fn storage_details_are_hidden() {
        let err: ApiError = DatabaseError::Query("disk I/O error at page 12".into()).into();
        assert_eq!(err.status(), 500);
        assert_eq!(err.to_string(), "Internal Server Error");
    }

    #[test]
    fn auth_errors_map_to_statuses() {
        assert_eq!(ApiError::from(AuthError::NotAuthenticated).status(), 401);
        assert_eq!(ApiError::from(AuthError::InvalidCredentials).status(), 401);
        assert_eq!(ApiError::from(AuthError::EmailTaken("a@b.c".into())).status(), 409);
        assert_eq!(ApiError::from(AuthError::Validation("bad".into())).status(), 400);
        assert_eq!(ApiError::from(AuthError::Hash("boom".into())).status(), 500);
    }
}
