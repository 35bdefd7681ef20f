//! Server module for building the HTTP server
//!
//! This module provides a `ServerBuilder` that wires together:
//! - the GraphQL endpoint over the configured storage backend
//! - health check routes
//! - request tracing and optional CORS

pub mod builder;
pub mod exposure;
pub mod host;

pub use builder::ServerBuilder;
pub use host::ServerHost;
