//! GraphQL API exposure
//!
//! Serves the static schema from [`schema`] over HTTP: queries and mutations
//! on `POST <graphql_path>`, the GraphiQL explorer on `GET <graphql_path>` and
//! the schema SDL on `GET <graphql_path>/schema`.

pub mod coercion;
mod errors;
mod schema;
pub mod types;

pub use schema::{LiftSchema, MutationRoot, QueryRoot, build_schema};

use crate::server::host::ServerHost;
use anyhow::Result;
use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Router,
    extract::Extension,
    http::header,
    response::{Html, IntoResponse},
    routing::{get, post},
};
use std::sync::Arc;

/// GraphQL API exposure implementation
///
/// Consumes a [`ServerHost`] and produces the GraphQL routes. The schema is
/// built once per router and shared by every request.
pub struct GraphQLExposure;

impl GraphQLExposure {
    /// Build the GraphQL router from a host
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let host = Arc::new(builder.build_host()?);
    /// let graphql_app = GraphQLExposure::build_router(host)?;
    /// ```
    pub fn build_router(host: Arc<ServerHost>) -> Result<Router> {
        let schema = build_schema(host.services.clone());
        let config = &host.config;

        let endpoint = if config.graphiql {
            post(graphql_handler).get(graphiql)
        } else {
            post(graphql_handler)
        };

        let router = Router::new()
            .route(&config.graphql_path, endpoint)
            .route(&config.schema_path(), get(graphql_sdl))
            .layer(Extension(schema))
            .layer(Extension(host.clone()));

        tracing::debug!(path = %host.config.graphql_path, "GraphQL routes registered");
        Ok(router)
    }
}

/// Handler for GraphQL queries and mutations
async fn graphql_handler(
    Extension(schema): Extension<LiftSchema>,
    request: GraphQLRequest,
) -> GraphQLResponse {
    schema.execute(request.into_inner()).await.into()
}

/// Handler for the GraphiQL explorer
async fn graphiql(Extension(host): Extension<Arc<ServerHost>>) -> impl IntoResponse {
    Html(
        GraphiQLSource::build()
            .endpoint(&host.config.graphql_path)
            .finish(),
    )
}

/// Handler for GraphQL schema SDL export
async fn graphql_sdl(Extension(schema): Extension<LiftSchema>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        schema.sdl(),
    )
}
