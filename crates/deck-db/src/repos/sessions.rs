//! Login session repository.

use chrono::{DateTime, Duration, Utc};

use deck_core::entities::Session;

use crate::error::DatabaseError;
use crate::helpers::{format_datetime, parse_datetime, stored_now};
use crate::service::DeckService;

const SELECT_COLS: &str = "token, user_id, created_at, expires_at";

fn row_to_session(row: &libsql::Row) -> Result<Session, DatabaseError> {
    Ok(Session {
        token: row.get(0)?,
        user_id: row.get(1)?,
        created_at: parse_datetime(&row.get::<String>(2)?)?,
        expires_at: parse_datetime(&row.get::<String>(3)?)?,
    })
}

impl DeckService {
    /// Store a session for `user_id` that expires `ttl` from now.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Query` when `ttl` pushes the expiry out of
    /// range, or `DatabaseError` if the insert fails (unknown user,
    /// duplicate token).
    pub async fn create_session(
        &self,
        user_id: &str,
        token: &str,
        ttl: Duration,
    ) -> Result<Session, DatabaseError> {
        let now = stored_now();
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| DatabaseError::Query(format!("session lifetime out of range: {ttl}")))?;
        let session = Session {
            token: token.to_string(),
            user_id: user_id.to_string(),
            created_at: now,
            expires_at,
        };
        self.db()
            .conn()
            .execute(
                &format!("INSERT INTO sessions ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4)"),
                libsql::params![
                    session.token.as_str(),
                    session.user_id.as_str(),
                    format_datetime(session.created_at),
                    format_datetime(session.expires_at)
                ],
            )
            .await?;
        tracing::debug!(user_id, "created session");
        Ok(session)
    }

    /// Fetch a session by token, expired or not.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn get_session(&self, token: &str) -> Result<Option<Session>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM sessions WHERE token = ?1"),
                [token],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_session(&row)?)),
            None => Ok(None),
        }
    }

    /// Remove a session. Returns whether one existed.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the delete fails.
    pub async fn delete_session(&self, token: &str) -> Result<bool, DatabaseError> {
        let deleted = self
            .db()
            .conn()
            .execute("DELETE FROM sessions WHERE token = ?1", [token])
            .await?;
        Ok(deleted > 0)
    }

    /// Drop every session that expired before `now`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the delete fails.
    pub async fn purge_expired_sessions(&self, now: DateTime<Utc>) -> Result<u64, DatabaseError> {
        let purged = self
            .db()
            .conn()
            .execute(
                "DELETE FROM sessions WHERE expires_at <= ?1",
                [format_datetime(now)],
            )
            .await?;
        if purged > 0 {
            tracing::debug!(purged, "purged expired sessions");
        }
        Ok(purged)
    }
}
