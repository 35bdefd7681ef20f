//! Service traits for table access

use crate::core::entity::{
    Exercise, ForeignKey, Record, SessionExercise, SessionLog, User, WorkoutLog,
};
use crate::core::error::StoreError;
use async_trait::async_trait;
use std::sync::Arc;

/// Service trait for one table
///
/// Implementations own key assignment, column constraints, referential
/// integrity and cascading deletes for rows of type `T`. Each call is one
/// atomic unit of work against the backend.
#[async_trait]
pub trait DataService<T: Record>: Send + Sync {
    /// Insert a new row and return it with its assigned key
    ///
    /// Fails with [`StoreError::Missing`] naming the parent table when a
    /// referenced parent row does not exist.
    async fn create(&self, draft: T::Draft) -> Result<T, StoreError>;

    /// Get a row by primary key
    async fn get(&self, id: i64) -> Result<Option<T>, StoreError>;

    /// List all rows in key order
    async fn list(&self) -> Result<Vec<T>, StoreError>;

    /// List rows pointing at the given parent, in key order
    ///
    /// A parent that does not exist, or a key this table has no column for,
    /// yields an empty list.
    async fn list_by(&self, key: ForeignKey) -> Result<Vec<T>, StoreError>;

    /// Overwrite the mutable columns of an existing row
    async fn update(&self, record: T) -> Result<T, StoreError>;

    /// Delete a row and, transitively, every row referencing it
    async fn delete(&self, id: i64) -> Result<(), StoreError>;
}

/// Handles to every table, injected into the API layer
///
/// All five handles usually point at the same backend so cascades and
/// parent checks see one consistent state.
#[derive(Clone)]
pub struct Services {
    pub users: Arc<dyn DataService<User>>,
    pub exercises: Arc<dyn DataService<Exercise>>,
    pub workouts: Arc<dyn DataService<WorkoutLog>>,
    pub sessions: Arc<dyn DataService<SessionLog>>,
    pub session_exercises: Arc<dyn DataService<SessionExercise>>,
}

impl Services {
    /// Build the handles from a single backend serving every table
    pub fn from_store<S>(store: S) -> Self
    where
        S: DataService<User>
            + DataService<Exercise>
            + DataService<WorkoutLog>
            + DataService<SessionLog>
            + DataService<SessionExercise>
            + 'static,
    {
        let store = Arc::new(store);
        Self {
            users: store.clone(),
            exercises: store.clone(),
            workouts: store.clone(),
            sessions: store.clone(),
            session_exercises: store,
        }
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}
