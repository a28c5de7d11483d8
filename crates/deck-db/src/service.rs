//! Service layer that hosts every repository method.
//!
//! `DeckService` wraps `DeckDb`. Repository modules add methods through
//! `impl DeckService` blocks, so callers hold one handle for users, sessions,
//! and tasks. The process entry point constructs it and passes it down.

use crate::DeckDb;
use crate::error::DatabaseError;

pub struct DeckService {
    db: DeckDb,
}

impl DeckService {
    /// Open (and migrate) a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = DeckDb::open_local(db_path).await?;
        Ok(Self { db })
    }

    #[must_use]
    pub const fn from_db(db: DeckDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &DeckDb {
        &self.db
    }
}
