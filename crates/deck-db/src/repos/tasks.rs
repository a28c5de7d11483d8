//! Task repository: owner-scoped queries, creation, and the completion toggle.
//!
//! Every statement carries `user_id = ?` so a foreign task id behaves exactly
//! like a missing one.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use deck_core::entities::{NewTask, Task};
use deck_core::errors::CoreError;
use deck_core::filter::{Selection, StatusFilter, TaskFilter};
use deck_core::responses::ToggleResponse;
use deck_core::stats::CompletionStats;

use crate::error::DatabaseError;
use crate::helpers::{
    format_datetime, get_opt_string, parse_datetime, parse_enum, parse_json_list,
    parse_optional_datetime, to_json_list,
};
use crate::service::DeckService;
use crate::updates::task::TaskUpdate;

const SELECT_COLS: &str = "id, user_id, title, description, category, priority, complexity, \
     deadline, estimated_hours, dependencies, tags, completed, completed_at, created_at";

const INSERT_COLS: &str = "user_id, title, description, category, priority, complexity, \
     deadline, estimated_hours, dependencies, tags, completed, completed_at, created_at";

const RANK_ORDER: &str = "CASE priority \
     WHEN 'CRITICAL' THEN 1 WHEN 'HIGH' THEN 2 WHEN 'MEDIUM' THEN 3 ELSE 4 END ASC, \
     created_at DESC, id ASC";

fn row_to_task(row: &libsql::Row) -> Result<Task, DatabaseError> {
    Ok(Task {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        description: get_opt_string(row, 3)?,
        category: parse_enum(&row.get::<String>(4)?)?,
        priority: parse_enum(&row.get::<String>(5)?)?,
        complexity: get_opt_string(row, 6)?
            .map(|c| parse_enum(&c))
            .transpose()?,
        deadline: parse_optional_datetime(get_opt_string(row, 7)?.as_deref())?,
        estimated_hours: row.get::<Option<f64>>(8)?,
        dependencies: parse_json_list(&row.get::<String>(9)?)?,
        tags: parse_json_list(&row.get::<String>(10)?)?,
        completed: row.get::<i64>(11)? != 0,
        completed_at: parse_optional_datetime(get_opt_string(row, 12)?.as_deref())?,
        created_at: parse_datetime(&row.get::<String>(13)?)?,
    })
}

/// Storage-level listing options.
///
/// Score ordering depends on the evaluation time and is applied in memory,
/// so storage only offers insertion order or rank order.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskQuery {
    pub filter: TaskFilter,
    /// Order by priority rank then newest first, instead of insertion order.
    pub rank_ordered: bool,
    pub limit: Option<usize>,
    pub offset: usize,
}

/// Build `user_id = ?1 AND ...` for a filter. Status is judged against the
/// stored `completed` column.
fn where_clause(owner: &str, filter: &TaskFilter) -> (String, Vec<libsql::Value>) {
    let mut conditions = Vec::new();
    let mut params: Vec<libsql::Value> = Vec::new();

    params.push(libsql::Value::Text(owner.to_string()));
    conditions.push(format!("user_id = ?{}", params.len()));

    match filter.status {
        StatusFilter::All => {}
        StatusFilter::Active => conditions.push("completed = 0".to_string()),
        StatusFilter::Completed => conditions.push("completed = 1".to_string()),
    }
    if let Selection::Only(category) = filter.category {
        params.push(libsql::Value::Text(category.as_str().to_string()));
        conditions.push(format!("category = ?{}", params.len()));
    }
    if let Selection::Only(priority) = filter.priority {
        params.push(libsql::Value::Text(priority.as_str().to_string()));
        conditions.push(format!("priority = ?{}", params.len()));
    }

    (format!("WHERE {}", conditions.join(" AND ")), params)
}

/// Insert one normalized task through any connection (plain or
/// transactional) and return its storage id.
pub(crate) async fn insert_task(
    conn: &libsql::Connection,
    owner: &str,
    task: &NewTask,
    dependencies: &[i64],
    now: DateTime<Utc>,
) -> Result<i64, DatabaseError> {
    let category = task
        .category
        .ok_or_else(|| CoreError::Validation("category is required".into()))?;
    let priority = task
        .priority
        .ok_or_else(|| CoreError::Validation("priority is required".into()))?;

    conn.execute(
        &format!(
            "INSERT INTO tasks ({INSERT_COLS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, 0, NULL, ?11)"
        ),
        libsql::params![
            owner,
            task.title.as_str(),
            task.description.as_deref(),
            category.as_str(),
            priority.as_str(),
            task.complexity.map(|c| c.as_str()),
            task.deadline.map(format_datetime),
            task.estimated_hours,
            to_json_list(dependencies)?,
            to_json_list(&task.tags)?,
            format_datetime(now)
        ],
    )
    .await?;
    Ok(conn.last_insert_rowid())
}

impl DeckService {
    /// Validate and store a new task for `owner`.
    ///
    /// Dependencies that do not name one of the owner's tasks are dropped.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` (wrapped) before touching storage when
    /// the draft is invalid.
    pub async fn create_task(&self, owner: &str, draft: NewTask) -> Result<Task, DatabaseError> {
        let draft = draft.normalize()?;

        let dependencies = if draft.dependencies.is_empty() {
            Vec::new()
        } else {
            let owned = self.owned_task_ids(owner).await?;
            draft
                .dependencies
                .iter()
                .copied()
                .filter(|id| owned.contains(id))
                .collect()
        };

        let id = insert_task(self.db().conn(), owner, &draft, &dependencies, Utc::now()).await?;
        tracing::debug!(task_id = id, owner, "created task");
        self.get_task(owner, id).await
    }

    /// Fetch one of the owner's tasks.
    ///
    /// # Errors
    ///
    /// Returns the undifferentiated `CoreError::NotFound` when the task is
    /// missing or owned by someone else.
    pub async fn get_task(&self, owner: &str, id: i64) -> Result<Task, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM tasks WHERE id = ?1 AND user_id = ?2"),
                libsql::params![id, owner],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| CoreError::task_not_found(id))?;
        row_to_task(&row)
    }

    /// List the owner's tasks matching `query`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn find_by_owner(
        &self,
        owner: &str,
        query: &TaskQuery,
    ) -> Result<Vec<Task>, DatabaseError> {
        let (where_sql, params) = where_clause(owner, &query.filter);
        let order = if query.rank_ordered { RANK_ORDER } else { "id ASC" };
        let page = match query.limit {
            Some(limit) => format!("LIMIT {limit} OFFSET {}", query.offset),
            None if query.offset > 0 => format!("LIMIT -1 OFFSET {}", query.offset),
            None => String::new(),
        };
        let sql = format!("SELECT {SELECT_COLS} FROM tasks {where_sql} ORDER BY {order} {page}");

        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next().await? {
            tasks.push(row_to_task(&row)?);
        }
        Ok(tasks)
    }

    /// Count the owner's tasks matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn count_tasks(&self, owner: &str, filter: &TaskFilter) -> Result<u64, DatabaseError> {
        let (where_sql, params) = where_clause(owner, filter);
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT COUNT(*) FROM tasks {where_sql}"),
                libsql::params_from_iter(params),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        u64::try_from(row.get::<i64>(0)?)
            .map_err(|e| DatabaseError::Query(format!("negative count: {e}")))
    }

    /// Apply a partial update to one of the owner's tasks.
    ///
    /// Setting `completed` to its current value leaves `completed_at`
    /// untouched. Changing it stamps or clears `completed_at`.
    ///
    /// # Errors
    ///
    /// Returns the undifferentiated `CoreError::NotFound` when the task is
    /// missing or owned by someone else.
    pub async fn update_task(
        &self,
        owner: &str,
        id: i64,
        update: TaskUpdate,
    ) -> Result<Task, DatabaseError> {
        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(completed) = update.completed {
            params.push(libsql::Value::Integer(i64::from(completed)));
            let flag = params.len();
            params.push(libsql::Value::Text(format_datetime(Utc::now())));
            let stamp = params.len();
            sets.push(format!(
                "completed_at = CASE WHEN completed = ?{flag} THEN completed_at \
                 WHEN ?{flag} = 1 THEN ?{stamp} ELSE NULL END"
            ));
            sets.push(format!("completed = ?{flag}"));
        }

        if sets.is_empty() {
            return self.get_task(owner, id).await;
        }

        params.push(libsql::Value::Integer(id));
        let id_idx = params.len();
        params.push(libsql::Value::Text(owner.to_string()));
        let owner_idx = params.len();
        let sql = format!(
            "UPDATE tasks SET {} WHERE id = ?{id_idx} AND user_id = ?{owner_idx}",
            sets.join(", ")
        );

        let changed = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if changed == 0 {
            return Err(CoreError::task_not_found(id).into());
        }
        tracing::debug!(task_id = id, owner, ?update, "updated task");
        self.get_task(owner, id).await
    }

    /// Flip `completed` in a single owner-scoped statement.
    ///
    /// `completed_at` becomes now on the transition to done and NULL on the
    /// transition back. Calling twice restores the original state.
    ///
    /// # Errors
    ///
    /// Returns the undifferentiated `CoreError::NotFound` when the task is
    /// missing or owned by someone else.
    pub async fn toggle_completion(&self, owner: &str, id: i64) -> Result<Task, DatabaseError> {
        let changed = self
            .db()
            .conn()
            .execute(
                "UPDATE tasks
                 SET completed = 1 - completed,
                     completed_at = CASE WHEN completed = 0 THEN ?1 ELSE NULL END
                 WHERE id = ?2 AND user_id = ?3",
                libsql::params![format_datetime(Utc::now()), id, owner],
            )
            .await?;
        if changed == 0 {
            return Err(CoreError::task_not_found(id).into());
        }
        let task = self.get_task(owner, id).await?;
        tracing::debug!(task_id = id, owner, completed = task.completed, "toggled task");
        Ok(task)
    }

    /// Toggle and recompute the owner's completion stats.
    ///
    /// # Errors
    ///
    /// See [`Self::toggle_completion`].
    pub async fn toggle_with_stats(
        &self,
        owner: &str,
        id: i64,
    ) -> Result<ToggleResponse, DatabaseError> {
        let task = self.toggle_completion(owner, id).await?;
        let completion_stats = self.completion_stats(owner).await?;
        Ok(ToggleResponse {
            task,
            completion_stats,
        })
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn completion_stats(&self, owner: &str) -> Result<CompletionStats, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT COUNT(*), COALESCE(SUM(completed), 0) FROM tasks WHERE user_id = ?1",
                [owner],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let total = u64::try_from(row.get::<i64>(0)?).unwrap_or(0);
        let completed = u64::try_from(row.get::<i64>(1)?).unwrap_or(0);
        Ok(CompletionStats::new(total, completed))
    }

    async fn owned_task_ids(&self, owner: &str) -> Result<HashSet<i64>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query("SELECT id FROM tasks WHERE user_id = ?1", [owner])
            .await?;
        let mut ids = HashSet::new();
        while let Some(row) = rows.next().await? {
            ids.insert(row.get::<i64>(0)?);
        }
        Ok(ids)
    }
}
