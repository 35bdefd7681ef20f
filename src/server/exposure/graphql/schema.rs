//! Root query and mutation objects
//!
//! Every root field is nullable: a failing operation reports one error entry
//! and leaves `data.<field>` null without affecting sibling fields.

use super::coercion;
use super::errors::report;
use super::types::{ExerciseType, SessionLogExerciseType, SessionLogType, UserType, WorkoutLogType};
use crate::core::error::LiftError;
use crate::core::service::Services;
use crate::resolvers::{mutations, queries};
use async_graphql::{Context, EmptySubscription, ID, Object, Result, Schema};

/// The executable schema served by the GraphQL exposure
pub type LiftSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema with `services` as shared context data
pub fn build_schema(services: Services) -> LiftSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(services)
        .finish()
}

fn services<'a>(ctx: &Context<'a>) -> Result<&'a Services> {
    ctx.data::<Services>()
}

/// Map a resolver outcome onto a nullable root field
fn resolved<T, U>(
    ctx: &Context<'_>,
    result: Result<T, LiftError>,
    project: impl FnOnce(T) -> U,
) -> Result<Option<U>> {
    match result {
        Ok(value) => Ok(Some(project(value))),
        Err(err) => Err(report(ctx, err)),
    }
}

fn each<T, U>(project: impl Fn(T) -> U) -> impl FnOnce(Vec<T>) -> Vec<U> {
    move |rows| rows.into_iter().map(project).collect()
}

// =============================================================================
// Queries
// =============================================================================

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn list_users(&self, ctx: &Context<'_>) -> Result<Option<Vec<UserType>>> {
        let result = queries::list_users(services(ctx)?).await;
        resolved(ctx, result, each(UserType))
    }

    async fn get_user_by_id(&self, ctx: &Context<'_>, id: Option<i32>) -> Result<Option<UserType>> {
        let result = queries::get_user(services(ctx)?, id.map(i64::from)).await;
        resolved(ctx, result, UserType)
    }

    async fn list_exercises(&self, ctx: &Context<'_>) -> Result<Option<Vec<ExerciseType>>> {
        let result = queries::list_exercises(services(ctx)?).await;
        resolved(ctx, result, each(ExerciseType))
    }

    async fn list_exercises_by_user_id(
        &self,
        ctx: &Context<'_>,
        user_id: Option<i32>,
    ) -> Result<Option<Vec<ExerciseType>>> {
        let result = queries::list_exercises_by_user(services(ctx)?, user_id.map(i64::from)).await;
        resolved(ctx, result, each(ExerciseType))
    }

    async fn get_exercise_by_id(
        &self,
        ctx: &Context<'_>,
        id: Option<i32>,
    ) -> Result<Option<ExerciseType>> {
        let result = queries::get_exercise(services(ctx)?, id.map(i64::from)).await;
        resolved(ctx, result, ExerciseType)
    }

    async fn list_sessions(&self, ctx: &Context<'_>) -> Result<Option<Vec<SessionLogType>>> {
        let result = queries::list_sessions(services(ctx)?).await;
        resolved(ctx, result, each(SessionLogType))
    }

    async fn list_sessions_by_user_id(
        &self,
        ctx: &Context<'_>,
        user_id: Option<i32>,
    ) -> Result<Option<Vec<SessionLogType>>> {
        let result = queries::list_sessions_by_user(services(ctx)?, user_id.map(i64::from)).await;
        resolved(ctx, result, each(SessionLogType))
    }

    async fn get_session_by_id(
        &self,
        ctx: &Context<'_>,
        id: Option<i32>,
    ) -> Result<Option<SessionLogType>> {
        let result = queries::get_session(services(ctx)?, id.map(i64::from)).await;
        resolved(ctx, result, SessionLogType)
    }

    async fn list_workouts(&self, ctx: &Context<'_>) -> Result<Option<Vec<WorkoutLogType>>> {
        let result = queries::list_workouts(services(ctx)?).await;
        resolved(ctx, result, each(WorkoutLogType))
    }

    async fn list_workouts_by_exercise_id(
        &self,
        ctx: &Context<'_>,
        exercise_id: Option<i32>,
    ) -> Result<Option<Vec<WorkoutLogType>>> {
        let result =
            queries::list_workouts_by_exercise(services(ctx)?, exercise_id.map(i64::from)).await;
        resolved(ctx, result, each(WorkoutLogType))
    }

    async fn get_workout_by_id(
        &self,
        ctx: &Context<'_>,
        id: Option<i32>,
    ) -> Result<Option<WorkoutLogType>> {
        let result = queries::get_workout(services(ctx)?, id.map(i64::from)).await;
        resolved(ctx, result, WorkoutLogType)
    }

    async fn list_session_exercises(
        &self,
        ctx: &Context<'_>,
    ) -> Result<Option<Vec<SessionLogExerciseType>>> {
        let result = queries::list_session_exercises(services(ctx)?).await;
        resolved(ctx, result, each(SessionLogExerciseType))
    }

    async fn list_session_exercises_by_session_id(
        &self,
        ctx: &Context<'_>,
        session_id: Option<i32>,
    ) -> Result<Option<Vec<SessionLogExerciseType>>> {
        let result =
            queries::list_session_exercises_by_session(services(ctx)?, session_id.map(i64::from))
                .await;
        resolved(ctx, result, each(SessionLogExerciseType))
    }

    async fn list_session_exercises_by_exercise_id(
        &self,
        ctx: &Context<'_>,
        exercise_id: Option<i32>,
    ) -> Result<Option<Vec<SessionLogExerciseType>>> {
        let result =
            queries::list_session_exercises_by_exercise(services(ctx)?, exercise_id.map(i64::from))
                .await;
        resolved(ctx, result, each(SessionLogExerciseType))
    }

    async fn get_session_exercise_by_id(
        &self,
        ctx: &Context<'_>,
        id: Option<i32>,
    ) -> Result<Option<SessionLogExerciseType>> {
        let result = queries::get_session_exercise(services(ctx)?, id.map(i64::from)).await;
        resolved(ctx, result, SessionLogExerciseType)
    }
}

// =============================================================================
// Mutations
// =============================================================================

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_user(&self, ctx: &Context<'_>, username: String) -> Result<Option<UserType>> {
        let result = mutations::create_user(services(ctx)?, username).await;
        resolved(ctx, result, UserType)
    }

    async fn update_user(
        &self,
        ctx: &Context<'_>,
        id: ID,
        username: String,
    ) -> Result<Option<UserType>> {
        let services = services(ctx)?;
        let result = async {
            let id = coercion::key(&id, "id")?;
            mutations::update_user(services, id, username).await
        }
        .await;
        resolved(ctx, result, UserType)
    }

    async fn delete_user(&self, ctx: &Context<'_>, id: ID) -> Result<Option<UserType>> {
        let services = services(ctx)?;
        let result = async {
            let id = coercion::key(&id, "id")?;
            mutations::delete_user(services, id).await
        }
        .await;
        resolved(ctx, result, UserType)
    }

    async fn create_exercise(
        &self,
        ctx: &Context<'_>,
        user_id: ID,
        external_exercise_id: String,
        external_exercise_name: String,
        external_exercise_bodypart: String,
    ) -> Result<Option<ExerciseType>> {
        let services = services(ctx)?;
        let result = async {
            let user_id = coercion::key(&user_id, "userId")?;
            mutations::create_exercise(
                services,
                user_id,
                &external_exercise_id,
                external_exercise_name,
                external_exercise_bodypart,
            )
            .await
        }
        .await;
        resolved(ctx, result, ExerciseType)
    }

    async fn update_exercise(
        &self,
        ctx: &Context<'_>,
        id: ID,
        personal_best: i32,
    ) -> Result<Option<ExerciseType>> {
        let services = services(ctx)?;
        let result = async {
            let id = coercion::key(&id, "id")?;
            mutations::update_exercise(services, id, personal_best).await
        }
        .await;
        resolved(ctx, result, ExerciseType)
    }

    async fn delete_exercise(&self, ctx: &Context<'_>, id: ID) -> Result<Option<ExerciseType>> {
        let services = services(ctx)?;
        let result = async {
            let id = coercion::key(&id, "id")?;
            mutations::delete_exercise(services, id).await
        }
        .await;
        resolved(ctx, result, ExerciseType)
    }

    async fn create_workout(
        &self,
        ctx: &Context<'_>,
        exercise_id: ID,
        weight_kg: i32,
        reps: i32,
        sets: i32,
    ) -> Result<Option<WorkoutLogType>> {
        let services = services(ctx)?;
        let result = async {
            let exercise_id = coercion::key(&exercise_id, "exerciseId")?;
            mutations::create_workout(services, exercise_id, weight_kg, reps, sets).await
        }
        .await;
        resolved(ctx, result, WorkoutLogType)
    }

    async fn update_workout(
        &self,
        ctx: &Context<'_>,
        id: ID,
        weight_kg: i32,
        reps: i32,
        sets: i32,
    ) -> Result<Option<WorkoutLogType>> {
        let services = services(ctx)?;
        let result = async {
            let id = coercion::key(&id, "id")?;
            mutations::update_workout(services, id, weight_kg, reps, sets).await
        }
        .await;
        resolved(ctx, result, WorkoutLogType)
    }

    async fn delete_workout(&self, ctx: &Context<'_>, id: ID) -> Result<Option<WorkoutLogType>> {
        let services = services(ctx)?;
        let result = async {
            let id = coercion::key(&id, "id")?;
            mutations::delete_workout(services, id).await
        }
        .await;
        resolved(ctx, result, WorkoutLogType)
    }

    async fn create_session(
        &self,
        ctx: &Context<'_>,
        user_id: ID,
        session_name: String,
    ) -> Result<Option<SessionLogType>> {
        let services = services(ctx)?;
        let result = async {
            let user_id = coercion::key(&user_id, "userId")?;
            mutations::create_session(services, user_id, session_name).await
        }
        .await;
        resolved(ctx, result, SessionLogType)
    }

    async fn update_session(
        &self,
        ctx: &Context<'_>,
        id: ID,
        session_name: String,
    ) -> Result<Option<SessionLogType>> {
        let services = services(ctx)?;
        let result = async {
            let id = coercion::key(&id, "id")?;
            mutations::update_session(services, id, session_name).await
        }
        .await;
        resolved(ctx, result, SessionLogType)
    }

    async fn delete_session(&self, ctx: &Context<'_>, id: ID) -> Result<Option<SessionLogType>> {
        let services = services(ctx)?;
        let result = async {
            let id = coercion::key(&id, "id")?;
            mutations::delete_session(services, id).await
        }
        .await;
        resolved(ctx, result, SessionLogType)
    }

    async fn create_session_exercise(
        &self,
        ctx: &Context<'_>,
        exercise_id: ID,
        session_id: ID,
    ) -> Result<Option<SessionLogExerciseType>> {
        let services = services(ctx)?;
        let result = async {
            let exercise_id = coercion::key(&exercise_id, "exerciseId")?;
            let session_id = coercion::key(&session_id, "sessionId")?;
            mutations::create_session_exercise(services, exercise_id, session_id).await
        }
        .await;
        resolved(ctx, result, SessionLogExerciseType)
    }

    async fn delete_session_exercise(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> Result<Option<SessionLogExerciseType>> {
        let services = services(ctx)?;
        let result = async {
            let id = coercion::key(&id, "id")?;
            mutations::delete_session_exercise(services, id).await
        }
        .await;
        resolved(ctx, result, SessionLogExerciseType)
    }
}
