//! Write-side resolvers
//!
//! Creates resolve every referenced parent before writing, so a missing
//! parent is reported with the parent's NotFound error and nothing is
//! persisted. Updates overwrite only the columns each table allows to
//! change. Deletes return the row as it was before removal.

use super::fetch;
use crate::core::entity::{
    EntityKind, Exercise, NewExercise, NewSessionExercise, NewSessionLog, NewUser,
    NewWorkoutLog, SessionExercise, SessionLog, User, WorkoutLog,
};
use crate::core::error::LiftError;
use crate::core::service::Services;
use crate::core::validation;

// =============================================================================
// Users
// =============================================================================

pub async fn create_user(services: &Services, username: String) -> Result<User, LiftError> {
    let user = services.users.create(NewUser { username }).await?;

    tracing::info!(user_id = user.id, "user created");
    Ok(user)
}

pub async fn update_user(
    services: &Services,
    id: i64,
    username: String,
) -> Result<User, LiftError> {
    let mut user = fetch(&*services.users, Some(id)).await?;
    user.username = username;
    let user = services.users.update(user).await?;

    tracing::info!(user_id = user.id, "user updated");
    Ok(user)
}

pub async fn delete_user(services: &Services, id: i64) -> Result<User, LiftError> {
    let user = fetch(&*services.users, Some(id)).await?;
    services.users.delete(user.id).await?;

    tracing::info!(user_id = user.id, "user deleted");
    Ok(user)
}

// =============================================================================
// Exercises
// =============================================================================

/// `external_exercise_id` arrives as text and must parse as an integer
pub async fn create_exercise(
    services: &Services,
    user_id: i64,
    external_exercise_id: &str,
    external_exercise_name: String,
    external_exercise_bodypart: String,
) -> Result<Exercise, LiftError> {
    let user = fetch(&*services.users, Some(user_id)).await?;
    let external_exercise_id = validation::parse_integer_column(
        EntityKind::Exercise,
        "external_exercise_id",
        external_exercise_id,
    )?;

    let exercise = services
        .exercises
        .create(NewExercise {
            user_id: user.id,
            external_exercise_id,
            external_exercise_name,
            external_exercise_bodypart,
        })
        .await?;

    tracing::info!(exercise_id = exercise.id, user_id = user.id, "exercise created");
    Ok(exercise)
}

pub async fn update_exercise(
    services: &Services,
    id: i64,
    personal_best: i32,
) -> Result<Exercise, LiftError> {
    let mut exercise = fetch(&*services.exercises, Some(id)).await?;
    exercise.personal_best = personal_best;
    let exercise = services.exercises.update(exercise).await?;

    tracing::info!(exercise_id = exercise.id, personal_best, "exercise updated");
    Ok(exercise)
}

pub async fn delete_exercise(services: &Services, id: i64) -> Result<Exercise, LiftError> {
    let exercise = fetch(&*services.exercises, Some(id)).await?;
    services.exercises.delete(exercise.id).await?;

    tracing::info!(exercise_id = exercise.id, "exercise deleted");
    Ok(exercise)
}

// =============================================================================
// Workouts
// =============================================================================

pub async fn create_workout(
    services: &Services,
    exercise_id: i64,
    weight_kg: i32,
    reps: i32,
    sets: i32,
) -> Result<WorkoutLog, LiftError> {
    let exercise = fetch(&*services.exercises, Some(exercise_id)).await?;

    let workout = services
        .workouts
        .create(NewWorkoutLog {
            exercise_id: exercise.id,
            reps,
            weight_kg,
            sets,
        })
        .await?;

    tracing::info!(workout_id = workout.id, exercise_id = exercise.id, "workout created");
    Ok(workout)
}

pub async fn update_workout(
    services: &Services,
    id: i64,
    weight_kg: i32,
    reps: i32,
    sets: i32,
) -> Result<WorkoutLog, LiftError> {
    let mut workout = fetch(&*services.workouts, Some(id)).await?;
    workout.weight_kg = weight_kg;
    workout.reps = reps;
    workout.sets = sets;
    let workout = services.workouts.update(workout).await?;

    tracing::info!(workout_id = workout.id, "workout updated");
    Ok(workout)
}

pub async fn delete_workout(services: &Services, id: i64) -> Result<WorkoutLog, LiftError> {
    let workout = fetch(&*services.workouts, Some(id)).await?;
    services.workouts.delete(workout.id).await?;

    tracing::info!(workout_id = workout.id, "workout deleted");
    Ok(workout)
}

// =============================================================================
// Sessions
// =============================================================================

pub async fn create_session(
    services: &Services,
    user_id: i64,
    session_name: String,
) -> Result<SessionLog, LiftError> {
    let user = fetch(&*services.users, Some(user_id)).await?;

    let session = services
        .sessions
        .create(NewSessionLog {
            user_id: user.id,
            session_name,
        })
        .await?;

    tracing::info!(session_id = session.id, user_id = user.id, "session created");
    Ok(session)
}

pub async fn update_session(
    services: &Services,
    id: i64,
    session_name: String,
) -> Result<SessionLog, LiftError> {
    let mut session = fetch(&*services.sessions, Some(id)).await?;
    session.session_name = session_name;
    let session = services.sessions.update(session).await?;

    tracing::info!(session_id = session.id, "session updated");
    Ok(session)
}

pub async fn delete_session(services: &Services, id: i64) -> Result<SessionLog, LiftError> {
    let session = fetch(&*services.sessions, Some(id)).await?;
    services.sessions.delete(session.id).await?;

    tracing::info!(session_id = session.id, "session deleted");
    Ok(session)
}

// =============================================================================
// Session exercises
// =============================================================================

/// The exercise is resolved before the session
pub async fn create_session_exercise(
    services: &Services,
    exercise_id: i64,
    session_id: i64,
) -> Result<SessionExercise, LiftError> {
    let exercise = fetch(&*services.exercises, Some(exercise_id)).await?;
    let session = fetch(&*services.sessions, Some(session_id)).await?;

    let join = services
        .session_exercises
        .create(NewSessionExercise {
            session_id: session.id,
            exercise_id: exercise.id,
        })
        .await?;

    tracing::info!(
        session_exercise_id = join.id,
        session_id = session.id,
        exercise_id = exercise.id,
        "exercise added to session"
    );
    Ok(join)
}

pub async fn delete_session_exercise(
    services: &Services,
    id: i64,
) -> Result<SessionExercise, LiftError> {
    let join = fetch(&*services.session_exercises, Some(id)).await?;
    services.session_exercises.delete(join.id).await?;

    tracing::info!(session_exercise_id = join.id, "exercise removed from session");
    Ok(join)
}
