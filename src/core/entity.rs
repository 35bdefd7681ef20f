//! Persisted records and the drafts used to create them
//!
//! Every table has two shapes:
//! - a record (`User`, `Exercise`, ...) holding the stored row, including the
//!   primary key and any server-assigned timestamp
//! - a draft (`NewUser`, `NewExercise`, ...) holding the caller-supplied
//!   columns of a row that does not exist yet
//!
//! Both derive [`Validate`] so the store can check column constraints on
//! create and on update with the same rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Largest value a small integer column can hold.
pub const SMALL_INT_MAX: i32 = 32_767;

/// Smallest value a small integer column can hold.
pub const SMALL_INT_MIN: i32 = -32_768;

/// The five tables of the schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    User,
    Exercise,
    WorkoutLog,
    SessionLog,
    SessionExercise,
}

impl EntityKind {
    /// Name used in error messages, matching the table's model name.
    pub fn name(self) -> &'static str {
        match self {
            EntityKind::User => "User",
            EntityKind::Exercise => "Exercise",
            EntityKind::WorkoutLog => "WorkoutLog",
            EntityKind::SessionLog => "SessionLog",
            EntityKind::SessionExercise => "SessionLog_Exercise",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A foreign-key value used to filter child rows by their parent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForeignKey {
    User(i64),
    Exercise(i64),
    Session(i64),
}

/// Common behaviour of every stored row
pub trait Record: Validate + Clone + Send + Sync + 'static {
    /// Columns supplied by the caller on create
    type Draft: Validate + Send + Sync + 'static;

    /// Which table the record lives in
    const KIND: EntityKind;

    /// Primary key
    fn id(&self) -> i64;

    /// Whether this row points at the given parent
    fn references(&self, key: ForeignKey) -> bool;
}

// =============================================================================
// User
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "sqlite", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    #[validate(length(min = 1, max = 20, message = "must be between 1 and 20 characters"))]
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 1, max = 20, message = "must be between 1 and 20 characters"))]
    pub username: String,
}

impl Record for User {
    type Draft = NewUser;
    const KIND: EntityKind = EntityKind::User;

    fn id(&self) -> i64 {
        self.id
    }

    fn references(&self, _key: ForeignKey) -> bool {
        false
    }
}

// =============================================================================
// Exercise
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "sqlite", derive(sqlx::FromRow))]
pub struct Exercise {
    pub id: i64,
    pub user_id: i64,
    pub external_exercise_id: i32,
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub external_exercise_name: String,
    #[validate(length(max = 20, message = "must be at most 20 characters"))]
    pub external_exercise_bodypart: String,
    #[validate(range(min = SMALL_INT_MIN, max = SMALL_INT_MAX, message = "must fit in a small integer"))]
    pub personal_best: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NewExercise {
    pub user_id: i64,
    pub external_exercise_id: i32,
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub external_exercise_name: String,
    #[validate(length(max = 20, message = "must be at most 20 characters"))]
    pub external_exercise_bodypart: String,
}

impl Record for Exercise {
    type Draft = NewExercise;
    const KIND: EntityKind = EntityKind::Exercise;

    fn id(&self) -> i64 {
        self.id
    }

    fn references(&self, key: ForeignKey) -> bool {
        key == ForeignKey::User(self.user_id)
    }
}

// =============================================================================
// WorkoutLog
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "sqlite", derive(sqlx::FromRow))]
pub struct WorkoutLog {
    pub id: i64,
    pub exercise_id: i64,
    pub date_time: DateTime<Utc>,
    #[validate(range(min = 1, max = SMALL_INT_MAX, message = "must be a positive small integer"))]
    pub reps: i32,
    #[validate(range(min = 1, max = SMALL_INT_MAX, message = "must be a positive small integer"))]
    pub weight_kg: i32,
    #[validate(range(min = 1, max = SMALL_INT_MAX, message = "must be a positive small integer"))]
    pub sets: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NewWorkoutLog {
    pub exercise_id: i64,
    #[validate(range(min = 1, max = SMALL_INT_MAX, message = "must be a positive small integer"))]
    pub reps: i32,
    #[validate(range(min = 1, max = SMALL_INT_MAX, message = "must be a positive small integer"))]
    pub weight_kg: i32,
    #[validate(range(min = 1, max = SMALL_INT_MAX, message = "must be a positive small integer"))]
    pub sets: i32,
}

impl Record for WorkoutLog {
    type Draft = NewWorkoutLog;
    const KIND: EntityKind = EntityKind::WorkoutLog;

    fn id(&self) -> i64 {
        self.id
    }

    fn references(&self, key: ForeignKey) -> bool {
        key == ForeignKey::Exercise(self.exercise_id)
    }
}

// =============================================================================
// SessionLog
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "sqlite", derive(sqlx::FromRow))]
pub struct SessionLog {
    pub id: i64,
    pub user_id: i64,
    pub date_time: DateTime<Utc>,
    #[validate(length(min = 1, max = 30, message = "must be between 1 and 30 characters"))]
    pub session_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NewSessionLog {
    pub user_id: i64,
    #[validate(length(min = 1, max = 30, message = "must be between 1 and 30 characters"))]
    pub session_name: String,
}

impl Record for SessionLog {
    type Draft = NewSessionLog;
    const KIND: EntityKind = EntityKind::SessionLog;

    fn id(&self) -> i64 {
        self.id
    }

    fn references(&self, key: ForeignKey) -> bool {
        key == ForeignKey::User(self.user_id)
    }
}

// =============================================================================
// SessionLog_Exercise
// =============================================================================

/// Join row placing an exercise in a training session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "sqlite", derive(sqlx::FromRow))]
pub struct SessionExercise {
    pub id: i64,
    pub session_id: i64,
    pub exercise_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NewSessionExercise {
    pub session_id: i64,
    pub exercise_id: i64,
}

impl Record for SessionExercise {
    type Draft = NewSessionExercise;
    const KIND: EntityKind = EntityKind::SessionExercise;

    fn id(&self) -> i64 {
        self.id
    }

    fn references(&self, key: ForeignKey) -> bool {
        key == ForeignKey::Session(self.session_id) || key == ForeignKey::Exercise(self.exercise_id)
    }
}
