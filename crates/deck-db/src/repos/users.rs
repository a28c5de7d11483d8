//! User repository.

use deck_core::entities::User;

use crate::error::DatabaseError;
use crate::helpers::{format_datetime, get_opt_string, parse_datetime, stored_now};
use crate::service::DeckService;

pub const PREFIX_USER: &str = "usr";

const SELECT_COLS: &str = "id, email, name, created_at, password_hash";

/// A user row together with its stored password hash.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

fn row_to_credentials(row: &libsql::Row) -> Result<UserCredentials, DatabaseError> {
    Ok(UserCredentials {
        user: User {
            id: row.get(0)?,
            email: row.get(1)?,
            name: get_opt_string(row, 2)?,
            created_at: parse_datetime(&row.get::<String>(3)?)?,
        },
        password_hash: row.get(4)?,
    })
}

/// Insert a user row through any connection (plain or transactional).
pub(crate) async fn insert_user(
    conn: &libsql::Connection,
    user: &User,
    password_hash: &str,
) -> Result<(), DatabaseError> {
    let result = conn
        .execute(
            &format!("INSERT INTO users ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5)"),
            libsql::params![
                user.id.as_str(),
                user.email.as_str(),
                user.name.as_deref(),
                format_datetime(user.created_at),
                password_hash
            ],
        )
        .await;
    match result {
        Ok(_) => Ok(()),
        Err(e) if e.to_string().contains("UNIQUE") => Err(DatabaseError::Conflict(format!(
            "email already registered: {}",
            user.email
        ))),
        Err(e) => Err(e.into()),
    }
}

impl DeckService {
    /// Create a user. The caller supplies an already-normalized email and a
    /// password hash.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Conflict` if the email is taken.
    pub async fn create_user(
        &self,
        email: &str,
        name: Option<&str>,
        password_hash: &str,
    ) -> Result<User, DatabaseError> {
        let user = User {
            id: self.db().generate_id(PREFIX_USER).await?,
            email: email.to_string(),
            name: name.map(String::from),
            created_at: stored_now(),
        };
        insert_user(self.db().conn(), &user, password_hash).await?;
        tracing::debug!(user_id = %user.id, "created user");
        Ok(user)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no such user exists.
    pub async fn get_user(&self, id: &str) -> Result<User, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM users WHERE id = ?1"), [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row_to_credentials(&row)?.user)
    }

    /// Look up a user and password hash by exact email.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn find_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM users WHERE email = ?1"),
                [email],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_credentials(&row)?)),
            None => Ok(None),
        }
    }
}
