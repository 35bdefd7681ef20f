//! # liftlog
//!
//! A GraphQL API for tracking strength training: users, the exercises they
//! follow, logged workout sets, training sessions and the exercises performed
//! in each session.
//!
//! ## Features
//!
//! - **Relational model**: five tables with foreign keys and cascading deletes
//! - **Typed errors**: every failure carries a stable code in the GraphQL error extensions
//! - **Pluggable storage**: in-memory by default, SQLite behind the `sqlite` feature
//! - **Configuration-Based**: bind address, endpoint path and backend from YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use liftlog::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     ServerBuilder::new()
//!         .with_store(InMemoryStore::new())
//!         .serve("127.0.0.1:8000")
//!         .await
//! }
//! ```
//!
//! Then:
//!
//! ```graphql
//! mutation { createUser(username: "alice") { userId username } }
//! query { listExercisesByUserId(userId: 1) { externalExerciseName personalBest } }
//! ```

pub mod config;
pub mod core;
pub mod resolvers;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        entity::{
            EntityKind, Exercise, ForeignKey, NewExercise, NewSessionExercise, NewSessionLog,
            NewUser, NewWorkoutLog, Record, SessionExercise, SessionLog, User, WorkoutLog,
        },
        error::{BoundaryError, LiftError, StoreError, ValidationError},
        service::{DataService, Services},
    };

    // === Resolvers ===
    pub use crate::resolvers::{mutations, queries};

    // === Storage ===
    pub use crate::storage::InMemoryStore;
    #[cfg(feature = "sqlite")]
    pub use crate::storage::SqliteStore;

    // === Config ===
    pub use crate::config::{ServerConfig, StorageConfig};

    // === Server ===
    pub use crate::server::exposure::graphql::{LiftSchema, build_schema};
    pub use crate::server::{ServerBuilder, ServerHost};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
}
