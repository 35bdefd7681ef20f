//! Read-side resolvers: list all, get by key, list by parent key

use super::{children, fetch};
use crate::core::entity::{Exercise, ForeignKey, SessionExercise, SessionLog, User, WorkoutLog};
use crate::core::error::LiftError;
use crate::core::service::Services;

// =============================================================================
// Users
// =============================================================================

pub async fn list_users(services: &Services) -> Result<Vec<User>, LiftError> {
    Ok(services.users.list().await?)
}

pub async fn get_user(services: &Services, id: Option<i64>) -> Result<User, LiftError> {
    fetch(&*services.users, id).await
}

// =============================================================================
// Exercises
// =============================================================================

pub async fn list_exercises(services: &Services) -> Result<Vec<Exercise>, LiftError> {
    Ok(services.exercises.list().await?)
}

pub async fn list_exercises_by_user(
    services: &Services,
    user_id: Option<i64>,
) -> Result<Vec<Exercise>, LiftError> {
    children(&*services.exercises, user_id.map(ForeignKey::User)).await
}

pub async fn get_exercise(services: &Services, id: Option<i64>) -> Result<Exercise, LiftError> {
    fetch(&*services.exercises, id).await
}

// =============================================================================
// Sessions
// =============================================================================

pub async fn list_sessions(services: &Services) -> Result<Vec<SessionLog>, LiftError> {
    Ok(services.sessions.list().await?)
}

pub async fn list_sessions_by_user(
    services: &Services,
    user_id: Option<i64>,
) -> Result<Vec<SessionLog>, LiftError> {
    children(&*services.sessions, user_id.map(ForeignKey::User)).await
}

pub async fn get_session(services: &Services, id: Option<i64>) -> Result<SessionLog, LiftError> {
    fetch(&*services.sessions, id).await
}

// =============================================================================
// Workouts
// =============================================================================

pub async fn list_workouts(services: &Services) -> Result<Vec<WorkoutLog>, LiftError> {
    Ok(services.workouts.list().await?)
}

pub async fn list_workouts_by_exercise(
    services: &Services,
    exercise_id: Option<i64>,
) -> Result<Vec<WorkoutLog>, LiftError> {
    children(&*services.workouts, exercise_id.map(ForeignKey::Exercise)).await
}

pub async fn get_workout(services: &Services, id: Option<i64>) -> Result<WorkoutLog, LiftError> {
    fetch(&*services.workouts, id).await
}

// =============================================================================
// Session exercises
// =============================================================================

pub async fn list_session_exercises(
    services: &Services,
) -> Result<Vec<SessionExercise>, LiftError> {
    Ok(services.session_exercises.list().await?)
}

pub async fn list_session_exercises_by_session(
    services: &Services,
    session_id: Option<i64>,
) -> Result<Vec<SessionExercise>, LiftError> {
    children(&*services.session_exercises, session_id.map(ForeignKey::Session)).await
}

pub async fn list_session_exercises_by_exercise(
    services: &Services,
    exercise_id: Option<i64>,
) -> Result<Vec<SessionExercise>, LiftError> {
    children(&*services.session_exercises, exercise_id.map(ForeignKey::Exercise)).await
}

pub async fn get_session_exercise(
    services: &Services,
    id: Option<i64>,
) -> Result<SessionExercise, LiftError> {
    fetch(&*services.session_exercises, id).await
}
