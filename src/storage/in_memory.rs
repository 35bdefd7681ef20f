//! In-memory implementation of every table for testing and development

use crate::core::entity::{
    EntityKind, Exercise, ForeignKey, Record, SessionExercise, SessionLog, User, WorkoutLog,
};
use crate::core::error::{StoreError, ValidationError};
use crate::core::service::DataService;
use crate::core::validation;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// One table: rows in key order plus the last key handed out
pub(crate) struct Table<T> {
    rows: BTreeMap<i64, T>,
    last_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T: Record> Table<T> {
    fn contains(&self, id: i64) -> bool {
        self.rows.contains_key(&id)
    }

    fn children(&self, key: ForeignKey) -> Vec<i64> {
        self.rows
            .values()
            .filter(|row| row.references(key))
            .map(Record::id)
            .collect()
    }

    fn remove_children(&mut self, key: ForeignKey) {
        self.rows.retain(|_, row| !row.references(key));
    }
}

#[derive(Default)]
pub(crate) struct Tables {
    users: Table<User>,
    exercises: Table<Exercise>,
    workouts: Table<WorkoutLog>,
    sessions: Table<SessionLog>,
    session_exercises: Table<SessionExercise>,
}

impl Tables {
    fn ensure_user(&self, id: i64) -> Result<(), StoreError> {
        if self.users.contains(id) {
            Ok(())
        } else {
            Err(StoreError::Missing(EntityKind::User))
        }
    }

    fn ensure_exercise(&self, id: i64) -> Result<(), StoreError> {
        if self.exercises.contains(id) {
            Ok(())
        } else {
            Err(StoreError::Missing(EntityKind::Exercise))
        }
    }

    fn ensure_session(&self, id: i64) -> Result<(), StoreError> {
        if self.sessions.contains(id) {
            Ok(())
        } else {
            Err(StoreError::Missing(EntityKind::SessionLog))
        }
    }

    fn remove_user(&mut self, id: i64) {
        self.users.rows.remove(&id);
        for exercise_id in self.exercises.children(ForeignKey::User(id)) {
            self.remove_exercise(exercise_id);
        }
        for session_id in self.sessions.children(ForeignKey::User(id)) {
            self.remove_session(session_id);
        }
    }

    fn remove_exercise(&mut self, id: i64) {
        self.exercises.rows.remove(&id);
        self.workouts.remove_children(ForeignKey::Exercise(id));
        self.session_exercises
            .remove_children(ForeignKey::Exercise(id));
    }

    fn remove_session(&mut self, id: i64) {
        self.sessions.rows.remove(&id);
        self.session_exercises
            .remove_children(ForeignKey::Session(id));
    }
}

/// Per-table hooks used by the generic [`DataService`] implementation
pub(crate) trait TableRow: Record {
    fn table(tables: &Tables) -> &Table<Self>;

    fn table_mut(tables: &mut Tables) -> &mut Table<Self>;

    /// Check parents and build the row that will receive key `id`
    fn build(tables: &Tables, id: i64, draft: Self::Draft) -> Result<Self, StoreError>;

    /// Copy the mutable columns of `update` onto `stored`
    fn apply(stored: &mut Self, update: Self);

    fn check_unique(_tables: &Tables, _row: &Self) -> Result<(), StoreError> {
        Ok(())
    }

    fn remove(tables: &mut Tables, id: i64);
}

impl TableRow for User {
    fn table(tables: &Tables) -> &Table<Self> {
        &tables.users
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.users
    }

    fn build(_tables: &Tables, id: i64, draft: Self::Draft) -> Result<Self, StoreError> {
        Ok(User {
            id,
            username: draft.username,
        })
    }

    fn apply(stored: &mut Self, update: Self) {
        stored.username = update.username;
    }

    fn check_unique(tables: &Tables, row: &Self) -> Result<(), StoreError> {
        let taken = tables
            .users
            .rows
            .values()
            .any(|other| other.id != row.id && other.username == row.username);

        if taken {
            Err(ValidationError::Duplicate {
                entity: EntityKind::User,
                field: "username",
            }
            .into())
        } else {
            Ok(())
        }
    }

    fn remove(tables: &mut Tables, id: i64) {
        tables.remove_user(id);
    }
}

impl TableRow for Exercise {
    fn table(tables: &Tables) -> &Table<Self> {
        &tables.exercises
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.exercises
    }

    fn build(tables: &Tables, id: i64, draft: Self::Draft) -> Result<Self, StoreError> {
        tables.ensure_user(draft.user_id)?;
        Ok(Exercise {
            id,
            user_id: draft.user_id,
            external_exercise_id: draft.external_exercise_id,
            external_exercise_name: draft.external_exercise_name,
            external_exercise_bodypart: draft.external_exercise_bodypart,
            personal_best: 0,
        })
    }

    fn apply(stored: &mut Self, update: Self) {
        stored.personal_best = update.personal_best;
    }

    fn remove(tables: &mut Tables, id: i64) {
        tables.remove_exercise(id);
    }
}

impl TableRow for WorkoutLog {
    fn table(tables: &Tables) -> &Table<Self> {
        &tables.workouts
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.workouts
    }

    fn build(tables: &Tables, id: i64, draft: Self::Draft) -> Result<Self, StoreError> {
        tables.ensure_exercise(draft.exercise_id)?;
        Ok(WorkoutLog {
            id,
            exercise_id: draft.exercise_id,
            date_time: Utc::now(),
            reps: draft.reps,
            weight_kg: draft.weight_kg,
            sets: draft.sets,
        })
    }

    fn apply(stored: &mut Self, update: Self) {
        stored.reps = update.reps;
        stored.weight_kg = update.weight_kg;
        stored.sets = update.sets;
    }

    fn remove(tables: &mut Tables, id: i64) {
        tables.workouts.rows.remove(&id);
    }
}

impl TableRow for SessionLog {
    fn table(tables: &Tables) -> &Table<Self> {
        &tables.sessions
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.sessions
    }

    fn build(tables: &Tables, id: i64, draft: Self::Draft) -> Result<Self, StoreError> {
        tables.ensure_user(draft.user_id)?;
        Ok(SessionLog {
            id,
            user_id: draft.user_id,
            date_time: Utc::now(),
            session_name: draft.session_name,
        })
    }

    fn apply(stored: &mut Self, update: Self) {
        stored.session_name = update.session_name;
    }

    fn remove(tables: &mut Tables, id: i64) {
        tables.remove_session(id);
    }
}

impl TableRow for SessionExercise {
    fn table(tables: &Tables) -> &Table<Self> {
        &tables.session_exercises
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.session_exercises
    }

    fn build(tables: &Tables, id: i64, draft: Self::Draft) -> Result<Self, StoreError> {
        tables.ensure_exercise(draft.exercise_id)?;
        tables.ensure_session(draft.session_id)?;
        Ok(SessionExercise {
            id,
            session_id: draft.session_id,
            exercise_id: draft.exercise_id,
        })
    }

    // A join row has no mutable columns
    fn apply(_stored: &mut Self, _update: Self) {}

    fn remove(tables: &mut Tables, id: i64) {
        tables.session_exercises.rows.remove(&id);
    }
}

/// In-memory store implementation
///
/// Useful for testing and development. All tables sit behind one RwLock, so
/// every create, update and cascading delete is atomic.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    /// Create a new, empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, StoreError> {
        self.tables
            .read()
            .map_err(|e| StoreError::Backend(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, StoreError> {
        self.tables
            .write()
            .map_err(|e| StoreError::Backend(format!("Failed to acquire write lock: {}", e)))
    }
}

#[async_trait]
impl<T: TableRow> DataService<T> for InMemoryStore {
    async fn create(&self, draft: T::Draft) -> Result<T, StoreError> {
        validation::check(T::KIND, &draft)?;

        let mut tables = self.write()?;

        // Keys are only consumed by successful inserts
        let id = T::table(&tables).last_id + 1;
        let row = T::build(&tables, id, draft)?;
        T::check_unique(&tables, &row)?;

        let table = T::table_mut(&mut tables);
        table.last_id = id;
        table.rows.insert(id, row.clone());

        tracing::debug!(entity = %T::KIND, id, "row inserted");
        Ok(row)
    }

    async fn get(&self, id: i64) -> Result<Option<T>, StoreError> {
        let tables = self.read()?;
        Ok(T::table(&tables).rows.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<T>, StoreError> {
        let tables = self.read()?;
        Ok(T::table(&tables).rows.values().cloned().collect())
    }

    async fn list_by(&self, key: ForeignKey) -> Result<Vec<T>, StoreError> {
        let tables = self.read()?;
        Ok(T::table(&tables)
            .rows
            .values()
            .filter(|row| row.references(key))
            .cloned()
            .collect())
    }

    async fn update(&self, record: T) -> Result<T, StoreError> {
        validation::check(T::KIND, &record)?;

        let mut tables = self.write()?;
        let id = record.id();

        let mut updated = T::table(&tables)
            .rows
            .get(&id)
            .cloned()
            .ok_or(StoreError::Missing(T::KIND))?;
        T::apply(&mut updated, record);
        T::check_unique(&tables, &updated)?;

        T::table_mut(&mut tables).rows.insert(id, updated.clone());

        tracing::debug!(entity = %T::KIND, id, "row updated");
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut tables = self.write()?;

        if !T::table(&tables).contains(id) {
            return Err(StoreError::Missing(T::KIND));
        }
        T::remove(&mut tables, id);

        tracing::debug!(entity = %T::KIND, id, "row deleted with dependents");
        Ok(())
    }
}
