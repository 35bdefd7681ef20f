//! Schema-level tests for the GraphQL API
//!
//! These tests execute operations directly against the schema and check:
//! - Create, read, update and delete for every table
//! - Nested parent and child resolution
//! - Error entries (message, path, code) and null propagation
//! - Cascading deletes as seen through the API

use liftlog::prelude::*;
use serde_json::{Value, json};

// =============================================================================
// Helpers
// =============================================================================

fn schema() -> LiftSchema {
    build_schema(Services::from_store(InMemoryStore::new()))
}

async fn run(schema: &LiftSchema, query: &str) -> Value {
    serde_json::to_value(schema.execute(query).await).unwrap()
}

async fn run_ok(schema: &LiftSchema, query: &str) -> Value {
    let body = run(schema, query).await;
    assert!(body.get("errors").is_none(), "unexpected errors: {}", body);
    body["data"].clone()
}

fn only_error(body: &Value) -> &Value {
    let errors = body["errors"].as_array().expect("errors array");
    assert_eq!(errors.len(), 1, "expected one error: {}", body);
    &errors[0]
}

/// alice, one Squat exercise and one workout set
async fn seed(schema: &LiftSchema) {
    run_ok(schema, r#"mutation { createUser(username: "alice") { userId } }"#).await;
    run_ok(
        schema,
        r#"mutation {
            createExercise(userId: "1", externalExerciseId: "1",
                           externalExerciseName: "Squat", externalExerciseBodypart: "Legs") {
                exerciseId
            }
        }"#,
    )
    .await;
    run_ok(
        schema,
        r#"mutation { createWorkout(exerciseId: "1", weightKg: 20, reps: 10, sets: 3) { workoutId } }"#,
    )
    .await;
}

// =============================================================================
// Scenario Tests
// =============================================================================

mod scenario_tests {
    use super::*;

    #[tokio::test]
    async fn test_logged_workout_is_listed_under_its_exercise() {
        let schema = schema();
        seed(&schema).await;

        let data = run_ok(
            &schema,
            r#"{
                listWorkoutsByExerciseId(exerciseId: 1) {
                    workoutId reps weightKg sets
                    exerciseId { exerciseId externalExerciseName }
                }
            }"#,
        )
        .await;

        assert_eq!(
            data["listWorkoutsByExerciseId"],
            json!([{
                "workoutId": "1",
                "reps": 10,
                "weightKg": 20,
                "sets": 3,
                "exerciseId": { "exerciseId": "1", "externalExerciseName": "Squat" }
            }])
        );
    }

    #[tokio::test]
    async fn test_unknown_user_id_reports_not_found() {
        let schema = schema();

        let body = run(&schema, "{ getUserById(id: 42) { userId username } }").await;

        assert_eq!(body["data"]["getUserById"], Value::Null);
        let error = only_error(&body);
        assert_eq!(error["message"], "User matching query does not exist.");
        assert_eq!(error["path"], json!(["getUserById"]));
        assert_eq!(error["extensions"]["code"], "ENTITY_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_create_exercise_for_unknown_user_persists_nothing() {
        let schema = schema();

        let body = run(
            &schema,
            r#"mutation {
                createExercise(userId: "9", externalExerciseId: "1",
                               externalExerciseName: "Squat", externalExerciseBodypart: "Legs") {
                    exerciseId
                }
            }"#,
        )
        .await;

        assert_eq!(body["data"]["createExercise"], Value::Null);
        assert_eq!(
            only_error(&body)["message"],
            "User matching query does not exist."
        );

        let data = run_ok(&schema, "{ listExercises { exerciseId } }").await;
        assert_eq!(data["listExercises"], json!([]));
    }

    #[tokio::test]
    async fn test_deleting_user_empties_their_exercises() {
        let schema = schema();
        seed(&schema).await;

        let data = run_ok(
            &schema,
            r#"mutation { deleteUser(id: "1") { userId username } }"#,
        )
        .await;
        assert_eq!(data["deleteUser"], json!({ "userId": "1", "username": "alice" }));

        let data = run_ok(
            &schema,
            "{ listExercisesByUserId(userId: 1) { exerciseId } listWorkouts { workoutId } }",
        )
        .await;
        assert_eq!(data["listExercisesByUserId"], json!([]));
        assert_eq!(data["listWorkouts"], json!([]));
    }
}

// =============================================================================
// Query Tests
// =============================================================================

mod query_tests {
    use super::*;

    #[tokio::test]
    async fn test_get_without_id_is_not_found() {
        let schema = schema();
        seed(&schema).await;

        let body = run(&schema, "{ getExerciseById { exerciseId } }").await;
        assert_eq!(body["data"]["getExerciseById"], Value::Null);
        assert_eq!(
            only_error(&body)["message"],
            "Exercise matching query does not exist."
        );
    }

    #[tokio::test]
    async fn test_list_by_parent_without_argument_is_empty() {
        let schema = schema();
        seed(&schema).await;

        let data = run_ok(
            &schema,
            "{ listExercisesByUserId { exerciseId } listSessionsByUserId(userId: 77) { sessionId } }",
        )
        .await;
        assert_eq!(data["listExercisesByUserId"], json!([]));
        assert_eq!(data["listSessionsByUserId"], json!([]));
    }

    #[tokio::test]
    async fn test_wrong_literal_type_is_rejected_before_execution() {
        let schema = schema();

        let body = run(&schema, r#"{ getUserById(id: "abc") { userId } }"#).await;
        assert_eq!(body["data"], Value::Null);
        assert!(!body["errors"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failing_field_does_not_null_siblings() {
        let schema = schema();
        seed(&schema).await;

        let body = run(
            &schema,
            "{ missing: getUserById(id: 5) { userId } listUsers { username } }",
        )
        .await;

        assert_eq!(body["data"]["missing"], Value::Null);
        assert_eq!(body["data"]["listUsers"], json!([{ "username": "alice" }]));
        assert_eq!(only_error(&body)["path"], json!(["missing"]));
    }

    #[tokio::test]
    async fn test_get_is_idempotent() {
        let schema = schema();
        seed(&schema).await;

        let query = "{ getWorkoutById(id: 1) { workoutId dateTime reps } }";
        let first = run_ok(&schema, query).await;
        let second = run_ok(&schema, query).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_user_reverse_relations() {
        let schema = schema();
        seed(&schema).await;
        run_ok(
            &schema,
            r#"mutation { createSession(userId: "1", sessionName: "Leg day") { sessionId } }"#,
        )
        .await;
        run_ok(
            &schema,
            r#"mutation { createSessionExercise(exerciseId: "1", sessionId: "1") { sessionExerciseId } }"#,
        )
        .await;

        let data = run_ok(
            &schema,
            r#"{
                getUserById(id: 1) {
                    exerciseSet {
                        externalExerciseName
                        workoutlogSet { reps }
                        sessionlogExerciseSet { sessionId { sessionName } }
                    }
                    sessionlogSet {
                        sessionName
                        userId { username }
                        sessionlogExerciseSet { exerciseId { externalExerciseBodypart } }
                    }
                }
            }"#,
        )
        .await;

        assert_eq!(
            data["getUserById"],
            json!({
                "exerciseSet": [{
                    "externalExerciseName": "Squat",
                    "workoutlogSet": [{ "reps": 10 }],
                    "sessionlogExerciseSet": [{ "sessionId": { "sessionName": "Leg day" } }]
                }],
                "sessionlogSet": [{
                    "sessionName": "Leg day",
                    "userId": { "username": "alice" },
                    "sessionlogExerciseSet": [{ "exerciseId": { "externalExerciseBodypart": "Legs" } }]
                }]
            })
        );
    }

    #[tokio::test]
    async fn test_session_exercise_queries() {
        let schema = schema();
        seed(&schema).await;
        run_ok(
            &schema,
            r#"mutation { createSession(userId: "1", sessionName: "Push") { sessionId } }"#,
        )
        .await;
        run_ok(
            &schema,
            r#"mutation { createSessionExercise(exerciseId: "1", sessionId: "1") { sessionExerciseId } }"#,
        )
        .await;

        let data = run_ok(
            &schema,
            r#"{
                listSessionExercises { sessionExerciseId }
                listSessionExercisesBySessionId(sessionId: 1) { sessionExerciseId }
                listSessionExercisesByExerciseId(exerciseId: 1) { sessionExerciseId }
                getSessionExerciseById(id: 1) { sessionId { sessionId } exerciseId { exerciseId } }
            }"#,
        )
        .await;

        assert_eq!(data["listSessionExercises"], json!([{ "sessionExerciseId": "1" }]));
        assert_eq!(
            data["listSessionExercisesBySessionId"],
            json!([{ "sessionExerciseId": "1" }])
        );
        assert_eq!(
            data["listSessionExercisesByExerciseId"],
            json!([{ "sessionExerciseId": "1" }])
        );
        assert_eq!(
            data["getSessionExerciseById"],
            json!({ "sessionId": { "sessionId": "1" }, "exerciseId": { "exerciseId": "1" } })
        );
    }
}

// =============================================================================
// Mutation Tests
// =============================================================================

mod mutation_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_user_returns_string_key() {
        let schema = schema();

        let data = run_ok(
            &schema,
            r#"mutation { createUser(username: "alice") { userId username exerciseSet { exerciseId } } }"#,
        )
        .await;

        assert_eq!(
            data["createUser"],
            json!({ "userId": "1", "username": "alice", "exerciseSet": [] })
        );
    }

    #[tokio::test]
    async fn test_duplicate_username_is_a_validation_error() {
        let schema = schema();
        run_ok(&schema, r#"mutation { createUser(username: "alice") { userId } }"#).await;

        let body = run(&schema, r#"mutation { createUser(username: "alice") { userId } }"#).await;

        assert_eq!(body["data"]["createUser"], Value::Null);
        let error = only_error(&body);
        assert_eq!(error["message"], "User with this username already exists.");
        assert_eq!(error["extensions"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_missing_required_argument_is_rejected() {
        let schema = schema();

        let body = run(&schema, "mutation { createUser { userId } }").await;
        assert_eq!(body["data"], Value::Null);
        let message = body["errors"][0]["message"].as_str().unwrap();
        assert!(message.contains("username"), "message: {}", message);
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_a_boundary_error() {
        let schema = schema();
        seed(&schema).await;

        let body = run(&schema, r#"mutation { deleteUser(id: "alice") { userId } }"#).await;

        assert_eq!(body["data"]["deleteUser"], Value::Null);
        let error = only_error(&body);
        assert_eq!(error["extensions"]["code"], "BAD_USER_INPUT");
        assert_eq!(
            error["message"],
            "Field 'id' expected a number but got 'alice'."
        );

        let data = run_ok(&schema, "{ listUsers { userId } }").await;
        assert_eq!(data["listUsers"], json!([{ "userId": "1" }]));
    }

    #[tokio::test]
    async fn test_integer_id_literal_is_accepted() {
        let schema = schema();
        seed(&schema).await;

        let data = run_ok(&schema, "mutation { deleteWorkout(id: 1) { workoutId reps } }").await;
        assert_eq!(data["deleteWorkout"], json!({ "workoutId": "1", "reps": 10 }));
    }

    #[tokio::test]
    async fn test_non_numeric_external_id_is_a_validation_error() {
        let schema = schema();
        run_ok(&schema, r#"mutation { createUser(username: "alice") { userId } }"#).await;

        let body = run(
            &schema,
            r#"mutation {
                createExercise(userId: "1", externalExerciseId: "squat",
                               externalExerciseName: "Squat", externalExerciseBodypart: "Legs") {
                    exerciseId
                }
            }"#,
        )
        .await;

        assert_eq!(body["data"]["createExercise"], Value::Null);
        assert_eq!(only_error(&body)["extensions"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_update_exercise_touches_only_personal_best() {
        let schema = schema();
        seed(&schema).await;

        let data = run_ok(
            &schema,
            r#"mutation {
                updateExercise(id: "1", personalBest: 140) {
                    personalBest externalExerciseId externalExerciseName externalExerciseBodypart
                }
            }"#,
        )
        .await;

        assert_eq!(
            data["updateExercise"],
            json!({
                "personalBest": 140,
                "externalExerciseId": 1,
                "externalExerciseName": "Squat",
                "externalExerciseBodypart": "Legs"
            })
        );
    }

    #[tokio::test]
    async fn test_update_workout_keeps_timestamp() {
        let schema = schema();
        seed(&schema).await;

        let before = run_ok(&schema, "{ getWorkoutById(id: 1) { dateTime } }").await;
        let data = run_ok(
            &schema,
            r#"mutation { updateWorkout(id: "1", weightKg: 25, reps: 8, sets: 4) { dateTime reps weightKg sets } }"#,
        )
        .await;

        assert_eq!(data["updateWorkout"]["dateTime"], before["getWorkoutById"]["dateTime"]);
        assert_eq!(data["updateWorkout"]["reps"], 8);
        assert_eq!(data["updateWorkout"]["weightKg"], 25);
        assert_eq!(data["updateWorkout"]["sets"], 4);
    }

    #[tokio::test]
    async fn test_update_unknown_session_is_not_found() {
        let schema = schema();

        let body = run(
            &schema,
            r#"mutation { updateSession(id: "3", sessionName: "Pull") { sessionId } }"#,
        )
        .await;

        assert_eq!(body["data"]["updateSession"], Value::Null);
        assert_eq!(
            only_error(&body)["message"],
            "SessionLog matching query does not exist."
        );
    }

    #[tokio::test]
    async fn test_create_session_exercise_reports_exercise_first() {
        let schema = schema();

        let body = run(
            &schema,
            r#"mutation { createSessionExercise(exerciseId: "1", sessionId: "1") { sessionExerciseId } }"#,
        )
        .await;

        assert_eq!(
            only_error(&body)["message"],
            "Exercise matching query does not exist."
        );
    }

    #[tokio::test]
    async fn test_delete_session_exercise_returns_row() {
        let schema = schema();
        seed(&schema).await;
        run_ok(
            &schema,
            r#"mutation { createSession(userId: "1", sessionName: "Legs") { sessionId } }"#,
        )
        .await;
        run_ok(
            &schema,
            r#"mutation { createSessionExercise(exerciseId: "1", sessionId: "1") { sessionExerciseId } }"#,
        )
        .await;

        let data = run_ok(
            &schema,
            r#"mutation { deleteSessionExercise(id: "1") { sessionExerciseId } }"#,
        )
        .await;
        assert_eq!(data["deleteSessionExercise"], json!({ "sessionExerciseId": "1" }));

        let body = run(&schema, "{ getSessionExerciseById(id: 1) { sessionExerciseId } }").await;
        assert_eq!(
            only_error(&body)["message"],
            "SessionLog_Exercise matching query does not exist."
        );
    }

    #[tokio::test]
    async fn test_keys_are_not_reused() {
        let schema = schema();
        run_ok(&schema, r#"mutation { createUser(username: "alice") { userId } }"#).await;
        run_ok(&schema, r#"mutation { deleteUser(id: "1") { userId } }"#).await;

        let data = run_ok(&schema, r#"mutation { createUser(username: "bob") { userId } }"#).await;
        assert_eq!(data["createUser"]["userId"], "2");
    }
}

// =============================================================================
// Schema Tests
// =============================================================================

mod schema_tests {
    use super::*;

    #[test]
    fn test_sdl_names_projection_types() {
        let sdl = schema().sdl();

        for name in [
            "type UserType",
            "type ExerciseType",
            "type WorkoutLogType",
            "type SessionLogType",
            "type SessionLogExerciseType",
        ] {
            assert!(sdl.contains(name), "missing {} in SDL", name);
        }
        assert!(sdl.contains("getUserById(id: Int): UserType"));
        assert!(sdl.contains("deleteUser(id: ID!): UserType"));
    }
}
