//! Macro-generated test suite for the storage contract.
//!
//! The `store_contract_tests!` macro generates a test module that validates a
//! backend implementing `DataService` for all five tables: key assignment,
//! column constraints, parent checks, cascading deletes and concurrent access.
//!
//! # Generated Tests
//!
//! ## CRUD
//! - `test_create_and_get`: create then retrieve, verify all fields
//! - `test_get_nonexistent`: unknown key returns None
//! - `test_list_empty`: list on empty store returns empty vec
//! - `test_list_in_key_order`: list follows insertion order
//! - `test_update_existing`: mutable columns persisted, others kept
//! - `test_update_nonexistent`: update unknown key reports Missing
//! - `test_delete_nonexistent`: delete unknown key reports Missing
//!
//! ## Integrity
//! - `test_missing_parent`: write naming an absent parent reports that parent
//! - `test_duplicate_username`: unique column on create and update
//! - `test_constraint_violation`: out-of-range columns rejected
//! - `test_keys_not_reused`: deleted keys stay retired
//! - `test_cascade_from_user` / `test_cascade_from_exercise` / `test_cascade_from_session`
//! - `test_list_by_parent`: filtering by each foreign key
//!
//! ## Concurrency
//! - `test_concurrent_creates`: parallel creates from spawned tasks

/// Generate a full storage conformance test suite.
///
/// `$factory` must be an expression (it may contain `.await`) evaluating to a
/// store implementing `DataService` for every record type. It is re-evaluated
/// for each test to ensure isolation.
#[macro_export]
macro_rules! store_contract_tests {
    ($factory:expr) => {
        mod store_contract_tests {
            use super::*;
            use liftlog::core::entity::{
                EntityKind, Exercise, ForeignKey, SessionExercise, SessionLog, User, WorkoutLog,
            };
            use liftlog::core::error::{StoreError, ValidationError};
            use liftlog::core::service::Services;

            async fn services() -> Services {
                Services::from_store($factory)
            }

            /// alice with one exercise, one workout, one session and the join row
            async fn populated() -> (Services, User, Exercise, SessionLog) {
                let s = services().await;
                let alice = s.users.create(new_user("alice")).await.unwrap();
                let squat = s.exercises.create(new_exercise(alice.id, "Squat")).await.unwrap();
                s.workouts.create(new_workout(squat.id)).await.unwrap();
                let session = s.sessions.create(new_session(alice.id, "Legs")).await.unwrap();
                s.session_exercises
                    .create(new_session_exercise(session.id, squat.id))
                    .await
                    .unwrap();
                (s, alice, squat, session)
            }

            // ==================================================================
            // CRUD
            // ==================================================================

            #[tokio::test]
            async fn test_create_and_get() {
                let s = services().await;
                let alice = s.users.create(new_user("alice")).await.unwrap();
                let squat = s.exercises.create(new_exercise(alice.id, "Squat")).await.unwrap();

                assert_eq!(squat.user_id, alice.id);
                assert_eq!(squat.external_exercise_name, "Squat");
                assert_eq!(squat.external_exercise_bodypart, "Legs");
                assert_eq!(squat.personal_best, 0);

                let fetched = s.exercises.get(squat.id).await.unwrap();
                assert_eq!(fetched, Some(squat));
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let s = services().await;
                assert_eq!(s.users.get(12345).await.unwrap(), None);
                assert_eq!(s.workouts.get(1).await.unwrap(), None);
            }

            #[tokio::test]
            async fn test_list_empty() {
                let s = services().await;
                assert!(s.users.list().await.unwrap().is_empty());
                assert!(s.exercises.list().await.unwrap().is_empty());
                assert!(s.workouts.list().await.unwrap().is_empty());
                assert!(s.sessions.list().await.unwrap().is_empty());
                assert!(s.session_exercises.list().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_list_in_key_order() {
                let s = services().await;
                for name in ["zoe", "adam", "mia"] {
                    s.users.create(new_user(name)).await.unwrap();
                }

                let users = s.users.list().await.unwrap();
                let ids: Vec<i64> = users.iter().map(|u| u.id).collect();
                let names: Vec<&str> = users.iter().map(|u| u.username.as_str()).collect();
                assert_eq!(ids, vec![1, 2, 3]);
                assert_eq!(names, vec!["zoe", "adam", "mia"]);
            }

            #[tokio::test]
            async fn test_update_existing() {
                let (s, _, squat, session) = populated().await;

                let workout = s.workouts.list().await.unwrap().remove(0);
                let mut edit = workout.clone();
                edit.reps = 5;
                edit.weight_kg = 100;
                edit.sets = 5;
                let updated = s.workouts.update(edit).await.unwrap();
                assert_eq!((updated.reps, updated.weight_kg, updated.sets), (5, 100, 5));
                assert_eq!(updated.date_time, workout.date_time);
                assert_eq!(updated.exercise_id, squat.id);

                let mut edit = session.clone();
                edit.session_name = "Legs & core".to_string();
                let renamed = s.sessions.update(edit).await.unwrap();
                assert_eq!(renamed.session_name, "Legs & core");
                assert_eq!(s.sessions.get(session.id).await.unwrap(), Some(renamed));
            }

            #[tokio::test]
            async fn test_update_nonexistent() {
                let s = services().await;
                let ghost = User {
                    id: 77,
                    username: "ghost".to_string(),
                };
                let result = s.users.update(ghost).await;
                assert!(matches!(result, Err(StoreError::Missing(EntityKind::User))));
            }

            #[tokio::test]
            async fn test_delete_nonexistent() {
                let s = services().await;
                let result = s.exercises.delete(5).await;
                assert!(matches!(result, Err(StoreError::Missing(EntityKind::Exercise))));
            }

            // ==================================================================
            // Integrity
            // ==================================================================

            #[tokio::test]
            async fn test_missing_parent() {
                let s = services().await;

                let result = s.exercises.create(new_exercise(9, "Squat")).await;
                assert!(matches!(result, Err(StoreError::Missing(EntityKind::User))));

                let result = s.workouts.create(new_workout(9)).await;
                assert!(matches!(result, Err(StoreError::Missing(EntityKind::Exercise))));

                let result = s.sessions.create(new_session(9, "Legs")).await;
                assert!(matches!(result, Err(StoreError::Missing(EntityKind::User))));

                assert!(s.exercises.list().await.unwrap().is_empty());
                assert!(s.workouts.list().await.unwrap().is_empty());
                assert!(s.sessions.list().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_duplicate_username() {
                let s = services().await;
                s.users.create(new_user("alice")).await.unwrap();
                let bob = s.users.create(new_user("bob")).await.unwrap();

                let result = s.users.create(new_user("alice")).await;
                assert!(matches!(
                    result,
                    Err(StoreError::Invalid(ValidationError::Duplicate { .. }))
                ));

                let mut edit = bob.clone();
                edit.username = "alice".to_string();
                let result = s.users.update(edit).await;
                assert!(matches!(
                    result,
                    Err(StoreError::Invalid(ValidationError::Duplicate { .. }))
                ));
                assert_eq!(s.users.get(bob.id).await.unwrap(), Some(bob));
            }

            #[tokio::test]
            async fn test_constraint_violation() {
                let s = services().await;
                let alice = s.users.create(new_user("alice")).await.unwrap();

                let result = s.users.create(new_user("")).await;
                assert!(matches!(result, Err(StoreError::Invalid(_))));

                let mut exercise = new_exercise(alice.id, "Squat");
                exercise.external_exercise_bodypart = "x".repeat(21);
                let result = s.exercises.create(exercise).await;
                assert!(matches!(result, Err(StoreError::Invalid(_))));

                let squat = s.exercises.create(new_exercise(alice.id, "Squat")).await.unwrap();
                let mut workout = new_workout(squat.id);
                workout.reps = 40_000;
                let result = s.workouts.create(workout).await;
                assert!(matches!(result, Err(StoreError::Invalid(_))));
                assert!(s.workouts.list().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_keys_not_reused() {
                let s = services().await;
                let first = s.users.create(new_user("alice")).await.unwrap();
                s.users.delete(first.id).await.unwrap();

                let second = s.users.create(new_user("bob")).await.unwrap();
                assert!(second.id > first.id);
            }

            #[tokio::test]
            async fn test_cascade_from_user() {
                let (s, alice, _, _) = populated().await;
                let bob = s.users.create(new_user("bob")).await.unwrap();
                let bench = s.exercises.create(new_exercise(bob.id, "Bench")).await.unwrap();

                s.users.delete(alice.id).await.unwrap();

                assert_eq!(s.exercises.list().await.unwrap(), vec![bench]);
                assert!(s.workouts.list().await.unwrap().is_empty());
                assert!(s.sessions.list().await.unwrap().is_empty());
                assert!(s.session_exercises.list().await.unwrap().is_empty());
                assert!(s.users.get(bob.id).await.unwrap().is_some());
            }

            #[tokio::test]
            async fn test_cascade_from_exercise() {
                let (s, _, squat, session) = populated().await;

                s.exercises.delete(squat.id).await.unwrap();

                assert!(s.workouts.list().await.unwrap().is_empty());
                assert!(s.session_exercises.list().await.unwrap().is_empty());
                assert!(s.sessions.get(session.id).await.unwrap().is_some());
            }

            #[tokio::test]
            async fn test_cascade_from_session() {
                let (s, _, squat, session) = populated().await;

                s.sessions.delete(session.id).await.unwrap();

                assert!(s.session_exercises.list().await.unwrap().is_empty());
                assert!(s.exercises.get(squat.id).await.unwrap().is_some());
                assert_eq!(s.workouts.list().await.unwrap().len(), 1);
            }

            #[tokio::test]
            async fn test_list_by_parent() {
                let (s, alice, squat, session) = populated().await;

                let exercises: Vec<Exercise> =
                    s.exercises.list_by(ForeignKey::User(alice.id)).await.unwrap();
                assert_eq!(exercises, vec![squat.clone()]);

                let workouts: Vec<WorkoutLog> =
                    s.workouts.list_by(ForeignKey::Exercise(squat.id)).await.unwrap();
                assert_eq!(workouts.len(), 1);

                let joins: Vec<SessionExercise> = s
                    .session_exercises
                    .list_by(ForeignKey::Session(session.id))
                    .await
                    .unwrap();
                assert_eq!(joins.len(), 1);
                assert_eq!(
                    s.session_exercises
                        .list_by(ForeignKey::Exercise(squat.id))
                        .await
                        .unwrap(),
                    joins
                );

                assert!(s.exercises.list_by(ForeignKey::User(404)).await.unwrap().is_empty());
                assert!(
                    s.workouts
                        .list_by(ForeignKey::User(alice.id))
                        .await
                        .unwrap()
                        .is_empty()
                );
            }

            // ==================================================================
            // Concurrency
            // ==================================================================

            #[tokio::test]
            async fn test_concurrent_creates() {
                let s = services().await;

                let mut handles = Vec::new();
                for i in 0..10 {
                    let s = s.clone();
                    handles.push(tokio::spawn(async move {
                        s.users.create(new_user(&format!("user{}", i))).await
                    }));
                }
                for handle in handles {
                    handle.await.unwrap().unwrap();
                }

                let mut ids: Vec<i64> =
                    s.users.list().await.unwrap().iter().map(|u| u.id).collect();
                ids.dedup();
                assert_eq!(ids.len(), 10);
            }
        }
    };
}
