//! Object types exposed by the schema
//!
//! One hand-written projection per table. Foreign keys resolve to the parent
//! object and reverse relations to the child lists, each with a store lookup
//! per returned row.

use crate::core::entity::{Exercise, SessionExercise, SessionLog, User, WorkoutLog};
use crate::core::service::Services;
use crate::resolvers::queries;
use async_graphql::{Context, ErrorExtensions, ID, Object, Result};
use chrono::{DateTime, Utc};

fn key(id: i64) -> ID {
    ID(id.to_string())
}

fn services<'a>(ctx: &Context<'a>) -> Result<&'a Services> {
    ctx.data::<Services>()
}

// =============================================================================
// User
// =============================================================================

pub struct UserType(pub User);

#[Object]
impl UserType {
    async fn user_id(&self) -> ID {
        key(self.0.id)
    }

    async fn username(&self) -> &str {
        &self.0.username
    }

    async fn exercise_set(&self, ctx: &Context<'_>) -> Result<Vec<ExerciseType>> {
        let rows = queries::list_exercises_by_user(services(ctx)?, Some(self.0.id))
            .await
            .map_err(|e| e.extend())?;
        Ok(rows.into_iter().map(ExerciseType).collect())
    }

    async fn sessionlog_set(&self, ctx: &Context<'_>) -> Result<Vec<SessionLogType>> {
        let rows = queries::list_sessions_by_user(services(ctx)?, Some(self.0.id))
            .await
            .map_err(|e| e.extend())?;
        Ok(rows.into_iter().map(SessionLogType).collect())
    }
}

// =============================================================================
// Exercise
// =============================================================================

pub struct ExerciseType(pub Exercise);

#[Object]
impl ExerciseType {
    async fn exercise_id(&self) -> ID {
        key(self.0.id)
    }

    /// Owning user
    async fn user_id(&self, ctx: &Context<'_>) -> Result<UserType> {
        let user = queries::get_user(services(ctx)?, Some(self.0.user_id))
            .await
            .map_err(|e| e.extend())?;
        Ok(UserType(user))
    }

    async fn external_exercise_id(&self) -> i32 {
        self.0.external_exercise_id
    }

    async fn external_exercise_name(&self) -> &str {
        &self.0.external_exercise_name
    }

    async fn external_exercise_bodypart(&self) -> &str {
        &self.0.external_exercise_bodypart
    }

    async fn personal_best(&self) -> i32 {
        self.0.personal_best
    }

    async fn workoutlog_set(&self, ctx: &Context<'_>) -> Result<Vec<WorkoutLogType>> {
        let rows = queries::list_workouts_by_exercise(services(ctx)?, Some(self.0.id))
            .await
            .map_err(|e| e.extend())?;
        Ok(rows.into_iter().map(WorkoutLogType).collect())
    }

    async fn sessionlog_exercise_set(
        &self,
        ctx: &Context<'_>,
    ) -> Result<Vec<SessionLogExerciseType>> {
        let rows = queries::list_session_exercises_by_exercise(services(ctx)?, Some(self.0.id))
            .await
            .map_err(|e| e.extend())?;
        Ok(rows.into_iter().map(SessionLogExerciseType).collect())
    }
}

// =============================================================================
// WorkoutLog
// =============================================================================

pub struct WorkoutLogType(pub WorkoutLog);

#[Object]
impl WorkoutLogType {
    async fn workout_id(&self) -> ID {
        key(self.0.id)
    }

    /// Exercise this set was logged against
    async fn exercise_id(&self, ctx: &Context<'_>) -> Result<ExerciseType> {
        let exercise = queries::get_exercise(services(ctx)?, Some(self.0.exercise_id))
            .await
            .map_err(|e| e.extend())?;
        Ok(ExerciseType(exercise))
    }

    async fn date_time(&self) -> DateTime<Utc> {
        self.0.date_time
    }

    async fn reps(&self) -> i32 {
        self.0.reps
    }

    async fn weight_kg(&self) -> i32 {
        self.0.weight_kg
    }

    async fn sets(&self) -> i32 {
        self.0.sets
    }
}

// =============================================================================
// SessionLog
// =============================================================================

pub struct SessionLogType(pub SessionLog);

#[Object]
impl SessionLogType {
    async fn session_id(&self) -> ID {
        key(self.0.id)
    }

    async fn user_id(&self, ctx: &Context<'_>) -> Result<UserType> {
        let user = queries::get_user(services(ctx)?, Some(self.0.user_id))
            .await
            .map_err(|e| e.extend())?;
        Ok(UserType(user))
    }

    async fn date_time(&self) -> DateTime<Utc> {
        self.0.date_time
    }

    async fn session_name(&self) -> &str {
        &self.0.session_name
    }

    async fn sessionlog_exercise_set(
        &self,
        ctx: &Context<'_>,
    ) -> Result<Vec<SessionLogExerciseType>> {
        let rows = queries::list_session_exercises_by_session(services(ctx)?, Some(self.0.id))
            .await
            .map_err(|e| e.extend())?;
        Ok(rows.into_iter().map(SessionLogExerciseType).collect())
    }
}

// =============================================================================
// SessionLog_Exercise
// =============================================================================

pub struct SessionLogExerciseType(pub SessionExercise);

#[Object]
impl SessionLogExerciseType {
    async fn session_exercise_id(&self) -> ID {
        key(self.0.id)
    }

    async fn session_id(&self, ctx: &Context<'_>) -> Result<SessionLogType> {
        let session = queries::get_session(services(ctx)?, Some(self.0.session_id))
            .await
            .map_err(|e| e.extend())?;
        Ok(SessionLogType(session))
    }

    async fn exercise_id(&self, ctx: &Context<'_>) -> Result<ExerciseType> {
        let exercise = queries::get_exercise(services(ctx)?, Some(self.0.exercise_id))
            .await
            .map_err(|e| e.extend())?;
        Ok(ExerciseType(exercise))
    }
}
