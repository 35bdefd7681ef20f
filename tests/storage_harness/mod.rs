//! Shared test harness for storage backend testing
//!
//! Provides draft builders for every table and the `store_contract_tests!`
//! macro that checks a backend against the `DataService` contract.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! store_contract_tests!(InMemoryStore::new());
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod store_contract_tests;

use liftlog::core::entity::{
    NewExercise, NewSessionExercise, NewSessionLog, NewUser, NewWorkoutLog,
};

pub fn new_user(username: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
    }
}

pub fn new_exercise(user_id: i64, name: &str) -> NewExercise {
    NewExercise {
        user_id,
        external_exercise_id: 1,
        external_exercise_name: name.to_string(),
        external_exercise_bodypart: "Legs".to_string(),
    }
}

pub fn new_workout(exercise_id: i64) -> NewWorkoutLog {
    NewWorkoutLog {
        exercise_id,
        reps: 10,
        weight_kg: 20,
        sets: 3,
    }
}

pub fn new_session(user_id: i64, name: &str) -> NewSessionLog {
    NewSessionLog {
        user_id,
        session_name: name.to_string(),
    }
}

pub fn new_session_exercise(session_id: i64, exercise_id: i64) -> NewSessionExercise {
    NewSessionExercise {
        session_id,
        exercise_id,
    }
}
