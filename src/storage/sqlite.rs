//! SQLite storage backend using sqlx.
//!
//! Provides [`SqliteStore`], a single pool serving all five tables through
//! the generic [`DataService`] implementation.
//!
//! # Feature flag
//!
//! This module is gated behind the `sqlite` feature flag:
//! ```toml
//! [dependencies]
//! liftlog = { version = "0.1", features = ["sqlite"] }
//! ```
//!
//! # Schema
//!
//! One table per record type with columns named after the record fields.
//! Foreign keys are declared `ON DELETE CASCADE` and enforced on every
//! connection, so the database performs cascading deletes itself. Keys use
//! `AUTOINCREMENT` and are never reused.

use crate::core::entity::{
    EntityKind, Exercise, ForeignKey, Record, SessionExercise, SessionLog, User, WorkoutLog,
};
use crate::core::error::{StoreError, ValidationError};
use crate::core::service::DataService;
use crate::core::validation;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{SqliteConnection, SqlitePool};
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Schema management
// ---------------------------------------------------------------------------

const SCHEMA: &[(&str, &str)] = &[
    (
        "users",
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username VARCHAR(20) NOT NULL UNIQUE
        )",
    ),
    (
        "exercises",
        "CREATE TABLE IF NOT EXISTS exercises (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            external_exercise_id INTEGER NOT NULL,
            external_exercise_name VARCHAR(100) NOT NULL,
            external_exercise_bodypart VARCHAR(20) NOT NULL,
            personal_best SMALLINT NOT NULL DEFAULT 0
                CHECK (personal_best BETWEEN -32768 AND 32767)
        )",
    ),
    (
        "workout_logs",
        "CREATE TABLE IF NOT EXISTS workout_logs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            exercise_id INTEGER NOT NULL REFERENCES exercises(id) ON DELETE CASCADE,
            date_time TEXT NOT NULL,
            reps SMALLINT NOT NULL CHECK (reps BETWEEN 1 AND 32767),
            weight_kg SMALLINT NOT NULL CHECK (weight_kg BETWEEN 1 AND 32767),
            sets SMALLINT NOT NULL CHECK (sets BETWEEN 1 AND 32767)
        )",
    ),
    (
        "session_logs",
        "CREATE TABLE IF NOT EXISTS session_logs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            date_time TEXT NOT NULL,
            session_name VARCHAR(30) NOT NULL
        )",
    ),
    (
        "session_log_exercises",
        "CREATE TABLE IF NOT EXISTS session_log_exercises (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            session_id INTEGER NOT NULL REFERENCES session_logs(id) ON DELETE CASCADE,
            exercise_id INTEGER NOT NULL REFERENCES exercises(id) ON DELETE CASCADE
        )",
    ),
    (
        "indexes",
        "CREATE INDEX IF NOT EXISTS idx_exercises_user ON exercises(user_id);
         CREATE INDEX IF NOT EXISTS idx_workout_logs_exercise ON workout_logs(exercise_id);
         CREATE INDEX IF NOT EXISTS idx_session_logs_user ON session_logs(user_id);
         CREATE INDEX IF NOT EXISTS idx_session_log_exercises_session ON session_log_exercises(session_id);
         CREATE INDEX IF NOT EXISTS idx_session_log_exercises_exercise ON session_log_exercises(exercise_id)",
    ),
];

/// Apply the required tables and indexes (idempotent).
///
/// Safe to call on every startup.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<()> {
    for (name, ddl) in SCHEMA {
        sqlx::raw_sql(ddl)
            .execute(pool)
            .await
            .map_err(|e| anyhow!("Failed to create {}: {}", name, e))?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Per-table SQL
// ---------------------------------------------------------------------------

/// SQL needed by the generic [`DataService`] implementation for one table
#[async_trait]
pub(crate) trait SqlRow:
    Record + for<'r> sqlx::FromRow<'r, SqliteRow> + Unpin
{
    const TABLE: &'static str;

    const COLUMNS: &'static str;

    /// Column guarded by a UNIQUE constraint, if any
    const UNIQUE_COLUMN: Option<&'static str> = None;

    /// Parents that must exist before insert, checked in order
    fn parents(_draft: &Self::Draft) -> Vec<(EntityKind, &'static str, i64)> {
        Vec::new()
    }

    /// Column holding the given foreign key, if this table has one
    fn foreign_column(_key: ForeignKey) -> Option<(&'static str, i64)> {
        None
    }

    async fn insert(conn: &mut SqliteConnection, draft: &Self::Draft) -> sqlx::Result<Self>;

    /// Write the mutable columns, returning `None` when the row is gone
    async fn update(conn: &mut SqliteConnection, record: &Self) -> sqlx::Result<Option<Self>>;
}

#[async_trait]
impl SqlRow for User {
    const TABLE: &'static str = "users";
    const COLUMNS: &'static str = "id, username";
    const UNIQUE_COLUMN: Option<&'static str> = Some("username");

    async fn insert(conn: &mut SqliteConnection, draft: &Self::Draft) -> sqlx::Result<Self> {
        sqlx::query_as("INSERT INTO users (username) VALUES (?) RETURNING id, username")
            .bind(&draft.username)
            .fetch_one(conn)
            .await
    }

    async fn update(conn: &mut SqliteConnection, record: &Self) -> sqlx::Result<Option<Self>> {
        sqlx::query_as("UPDATE users SET username = ? WHERE id = ? RETURNING id, username")
            .bind(&record.username)
            .bind(record.id)
            .fetch_optional(conn)
            .await
    }
}

#[async_trait]
impl SqlRow for Exercise {
    const TABLE: &'static str = "exercises";
    const COLUMNS: &'static str = "id, user_id, external_exercise_id, external_exercise_name, \
                                   external_exercise_bodypart, personal_best";

    fn parents(draft: &Self::Draft) -> Vec<(EntityKind, &'static str, i64)> {
        vec![(EntityKind::User, User::TABLE, draft.user_id)]
    }

    fn foreign_column(key: ForeignKey) -> Option<(&'static str, i64)> {
        match key {
            ForeignKey::User(id) => Some(("user_id", id)),
            _ => None,
        }
    }

    async fn insert(conn: &mut SqliteConnection, draft: &Self::Draft) -> sqlx::Result<Self> {
        sqlx::query_as(
            "INSERT INTO exercises (user_id, external_exercise_id, external_exercise_name, \
             external_exercise_bodypart, personal_best) VALUES (?, ?, ?, ?, 0) \
             RETURNING id, user_id, external_exercise_id, external_exercise_name, \
             external_exercise_bodypart, personal_best",
        )
        .bind(draft.user_id)
        .bind(draft.external_exercise_id)
        .bind(&draft.external_exercise_name)
        .bind(&draft.external_exercise_bodypart)
        .fetch_one(conn)
        .await
    }

    async fn update(conn: &mut SqliteConnection, record: &Self) -> sqlx::Result<Option<Self>> {
        sqlx::query_as(
            "UPDATE exercises SET personal_best = ? WHERE id = ? \
             RETURNING id, user_id, external_exercise_id, external_exercise_name, \
             external_exercise_bodypart, personal_best",
        )
        .bind(record.personal_best)
        .bind(record.id)
        .fetch_optional(conn)
        .await
    }
}

#[async_trait]
impl SqlRow for WorkoutLog {
    const TABLE: &'static str = "workout_logs";
    const COLUMNS: &'static str = "id, exercise_id, date_time, reps, weight_kg, sets";

    fn parents(draft: &Self::Draft) -> Vec<(EntityKind, &'static str, i64)> {
        vec![(EntityKind::Exercise, Exercise::TABLE, draft.exercise_id)]
    }

    fn foreign_column(key: ForeignKey) -> Option<(&'static str, i64)> {
        match key {
            ForeignKey::Exercise(id) => Some(("exercise_id", id)),
            _ => None,
        }
    }

    async fn insert(conn: &mut SqliteConnection, draft: &Self::Draft) -> sqlx::Result<Self> {
        sqlx::query_as(
            "INSERT INTO workout_logs (exercise_id, date_time, reps, weight_kg, sets) \
             VALUES (?, ?, ?, ?, ?) \
             RETURNING id, exercise_id, date_time, reps, weight_kg, sets",
        )
        .bind(draft.exercise_id)
        .bind(Utc::now())
        .bind(draft.reps)
        .bind(draft.weight_kg)
        .bind(draft.sets)
        .fetch_one(conn)
        .await
    }

    async fn update(conn: &mut SqliteConnection, record: &Self) -> sqlx::Result<Option<Self>> {
        sqlx::query_as(
            "UPDATE workout_logs SET reps = ?, weight_kg = ?, sets = ? WHERE id = ? \
             RETURNING id, exercise_id, date_time, reps, weight_kg, sets",
        )
        .bind(record.reps)
        .bind(record.weight_kg)
        .bind(record.sets)
        .bind(record.id)
        .fetch_optional(conn)
        .await
    }
}

#[async_trait]
impl SqlRow for SessionLog {
    const TABLE: &'static str = "session_logs";
    const COLUMNS: &'static str = "id, user_id, date_time, session_name";

    fn parents(draft: &Self::Draft) -> Vec<(EntityKind, &'static str, i64)> {
        vec![(EntityKind::User, User::TABLE, draft.user_id)]
    }

    fn foreign_column(key: ForeignKey) -> Option<(&'static str, i64)> {
        match key {
            ForeignKey::User(id) => Some(("user_id", id)),
            _ => None,
        }
    }

    async fn insert(conn: &mut SqliteConnection, draft: &Self::Draft) -> sqlx::Result<Self> {
        sqlx::query_as(
            "INSERT INTO session_logs (user_id, date_time, session_name) VALUES (?, ?, ?) \
             RETURNING id, user_id, date_time, session_name",
        )
        .bind(draft.user_id)
        .bind(Utc::now())
        .bind(&draft.session_name)
        .fetch_one(conn)
        .await
    }

    async fn update(conn: &mut SqliteConnection, record: &Self) -> sqlx::Result<Option<Self>> {
        sqlx::query_as(
            "UPDATE session_logs SET session_name = ? WHERE id = ? \
             RETURNING id, user_id, date_time, session_name",
        )
        .bind(&record.session_name)
        .bind(record.id)
        .fetch_optional(conn)
        .await
    }
}

#[async_trait]
impl SqlRow for SessionExercise {
    const TABLE: &'static str = "session_log_exercises";
    const COLUMNS: &'static str = "id, session_id, exercise_id";

    fn parents(draft: &Self::Draft) -> Vec<(EntityKind, &'static str, i64)> {
        vec![
            (EntityKind::Exercise, Exercise::TABLE, draft.exercise_id),
            (EntityKind::SessionLog, SessionLog::TABLE, draft.session_id),
        ]
    }

    fn foreign_column(key: ForeignKey) -> Option<(&'static str, i64)> {
        match key {
            ForeignKey::Session(id) => Some(("session_id", id)),
            ForeignKey::Exercise(id) => Some(("exercise_id", id)),
            ForeignKey::User(_) => None,
        }
    }

    async fn insert(conn: &mut SqliteConnection, draft: &Self::Draft) -> sqlx::Result<Self> {
        sqlx::query_as(
            "INSERT INTO session_log_exercises (session_id, exercise_id) VALUES (?, ?) \
             RETURNING id, session_id, exercise_id",
        )
        .bind(draft.session_id)
        .bind(draft.exercise_id)
        .fetch_one(conn)
        .await
    }

    async fn update(conn: &mut SqliteConnection, record: &Self) -> sqlx::Result<Option<Self>> {
        // No mutable columns; re-read so a vanished row still reports as missing
        sqlx::query_as("SELECT id, session_id, exercise_id FROM session_log_exercises WHERE id = ?")
            .bind(record.id)
            .fetch_optional(conn)
            .await
    }
}

/// Translate a driver error raised by a write on table `T`
fn write_error<T: SqlRow>(err: sqlx::Error) -> StoreError {
    let unique = err
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation());

    match T::UNIQUE_COLUMN {
        Some(field) if unique => ValidationError::Duplicate {
            entity: T::KIND,
            field,
        }
        .into(),
        _ => StoreError::Database(err),
    }
}

// ---------------------------------------------------------------------------
// SqliteStore
// ---------------------------------------------------------------------------

/// Storage backed by a SQLite database.
///
/// # Example
///
/// ```rust,ignore
/// use liftlog::storage::SqliteStore;
///
/// let store = SqliteStore::connect("sqlite://liftlog.db").await?;
/// let services = Services::from_store(store);
/// ```
#[derive(Clone, Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `url` and apply the schema
    ///
    /// In-memory databases are pinned to a single connection so every call
    /// sees the same data.
    pub async fn connect(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| anyhow!("Invalid SQLite url '{}': {}", url, e))?
            .foreign_keys(true)
            .create_if_missing(true);

        let in_memory = url.contains(":memory:") || url.contains("mode=memory");
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| anyhow!("Failed to open SQLite database '{}': {}", url, e))?;

        ensure_schema(&pool).await?;
        tracing::info!(url, "SQLite storage ready");

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl<T: SqlRow> DataService<T> for SqliteStore {
    async fn create(&self, draft: T::Draft) -> Result<T, StoreError> {
        validation::check(T::KIND, &draft)?;

        let mut tx = self.pool.begin().await?;

        for (kind, table, id) in T::parents(&draft) {
            let sql = format!("SELECT id FROM {} WHERE id = ?", table);
            let found: Option<i64> = sqlx::query_scalar(&sql)
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
            if found.is_none() {
                return Err(StoreError::Missing(kind));
            }
        }

        let row = T::insert(&mut *tx, &draft).await.map_err(write_error::<T>)?;
        tx.commit().await?;

        tracing::debug!(entity = %T::KIND, id = row.id(), "row inserted");
        Ok(row)
    }

    async fn get(&self, id: i64) -> Result<Option<T>, StoreError> {
        let sql = format!("SELECT {} FROM {} WHERE id = ?", T::COLUMNS, T::TABLE);
        let row = sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list(&self) -> Result<Vec<T>, StoreError> {
        let sql = format!("SELECT {} FROM {} ORDER BY id", T::COLUMNS, T::TABLE);
        let rows = sqlx::query_as::<_, T>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn list_by(&self, key: ForeignKey) -> Result<Vec<T>, StoreError> {
        let Some((column, id)) = T::foreign_column(key) else {
            return Ok(Vec::new());
        };

        let sql = format!(
            "SELECT {} FROM {} WHERE {} = ? ORDER BY id",
            T::COLUMNS,
            T::TABLE,
            column
        );
        let rows = sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn update(&self, record: T) -> Result<T, StoreError> {
        validation::check(T::KIND, &record)?;

        let mut conn = self.pool.acquire().await?;
        let row = T::update(&mut *conn, &record)
            .await
            .map_err(write_error::<T>)?
            .ok_or(StoreError::Missing(T::KIND))?;

        tracing::debug!(entity = %T::KIND, id = row.id(), "row updated");
        Ok(row)
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = ?", T::TABLE);
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Missing(T::KIND));
        }

        tracing::debug!(entity = %T::KIND, id, "row deleted with dependents");
        Ok(())
    }
}
