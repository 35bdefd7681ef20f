//! Core module containing the schema records, errors and storage traits

pub mod entity;
pub mod error;
pub mod service;
pub mod validation;

pub use entity::{
    EntityKind, Exercise, ForeignKey, NewExercise, NewSessionExercise, NewSessionLog, NewUser,
    NewWorkoutLog, Record, SessionExercise, SessionLog, User, WorkoutLog,
};
pub use error::{BoundaryError, FieldViolation, LiftError, StoreError, ValidationError};
pub use service::{DataService, Services};
