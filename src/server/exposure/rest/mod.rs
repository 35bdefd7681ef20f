//! REST exposure: liveness routes and caller-supplied custom routes
//!
//! The data API itself is GraphQL only; this router carries what load
//! balancers and operators poke at directly.

use super::super::host::ServerHost;
use anyhow::Result;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use std::sync::Arc;

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from a host
    ///
    /// Returns health check routes merged with every custom router.
    pub fn build_router(_host: Arc<ServerHost>, custom_routes: Vec<Router>) -> Result<Router> {
        let mut app = Self::health_routes();

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        Ok(app)
    }

    /// Build health check routes
    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    /// Health check endpoint handler
    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
        }))
    }
}
