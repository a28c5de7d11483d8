//! Account registration with catalogue seeding.
//!
//! The user row and the whole seed catalogue are written in one transaction:
//! either the account arrives with its starter tasks or nothing is stored.

use std::collections::HashMap;

use deck_core::entities::User;
use deck_core::seed::{SeedTask, resolve_dependencies};

use crate::error::DatabaseError;
use crate::helpers::{stored_now, to_json_list};
use crate::repos::tasks::insert_task;
use crate::repos::users::{PREFIX_USER, insert_user};
use crate::service::DeckService;

/// A freshly registered account and how many tasks it was seeded with.
#[derive(Debug, Clone)]
pub struct Registration {
    pub user: User,
    pub seeded_tasks: usize,
}

impl DeckService {
    /// Create a user and seed `catalogue` for them atomically.
    ///
    /// Dependencies are remapped from catalogue numbers to the new storage
    /// ids; numbers that were not inserted are dropped.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Conflict` if the email is taken, or any
    /// storage error, in which case nothing is committed.
    pub async fn register_with_catalogue(
        &self,
        email: &str,
        name: Option<&str>,
        password_hash: &str,
        catalogue: &[SeedTask],
    ) -> Result<Registration, DatabaseError> {
        let now = stored_now();
        let user = User {
            id: self.db().generate_id(PREFIX_USER).await?,
            email: email.to_string(),
            name: name.map(String::from),
            created_at: now,
        };

        let tx = self.db().conn().transaction().await?;
        let seeded = match write_registration(&tx, &user, password_hash, catalogue).await {
            Ok(seeded) => seeded,
            Err(error) => {
                if let Err(rollback) = tx.rollback().await {
                    tracing::warn!(%rollback, "registration rollback failed");
                }
                return Err(error);
            }
        };
        tx.commit().await?;
        tracing::debug!(user_id = %user.id, seeded, "registered user");

        Ok(Registration {
            user,
            seeded_tasks: seeded,
        })
    }
}

async fn write_registration(
    conn: &libsql::Connection,
    user: &User,
    password_hash: &str,
    catalogue: &[SeedTask],
) -> Result<usize, DatabaseError> {
    insert_user(conn, user, password_hash).await?;

    let mut ids: HashMap<u32, i64> = HashMap::with_capacity(catalogue.len());
    for seed in catalogue {
        let draft = seed.to_new_task(user.created_at).normalize()?;
        let id = insert_task(conn, &user.id, &draft, &[], user.created_at).await?;
        ids.insert(seed.number, id);
    }

    for seed in catalogue.iter().filter(|s| !s.dependencies.is_empty()) {
        let deps = resolve_dependencies(seed, &ids);
        let Some(id) = ids.get(&seed.number) else {
            continue;
        };
        if deps.is_empty() {
            continue;
        }
        conn.execute(
            "UPDATE tasks SET dependencies = ?1 WHERE id = ?2",
            libsql::params![to_json_list(&deps)?, *id],
        )
        .await?;
    }

    Ok(ids.len())
}
