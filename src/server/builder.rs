//! ServerBuilder for fluent API to build HTTP servers

use super::exposure::{GraphQLExposure, RestExposure};
use super::host::ServerHost;
use crate::config::ServerConfig;
use crate::core::entity::{Exercise, SessionExercise, SessionLog, User, WorkoutLog};
use crate::core::service::{DataService, Services};
use crate::storage;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builder for the HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(ServerConfig::from_yaml_file("liftlog.yaml")?)
///     .with_configured_storage()
///     .await?
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: ServerConfig,
    services: Option<Services>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with the default configuration
    pub fn new() -> Self {
        Self {
            config: ServerConfig::default(),
            services: None,
            custom_routes: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Use one backend for every table
    pub fn with_store<S>(mut self, store: S) -> Self
    where
        S: DataService<User>
            + DataService<Exercise>
            + DataService<WorkoutLog>
            + DataService<SessionLog>
            + DataService<SessionExercise>
            + 'static,
    {
        self.services = Some(Services::from_store(store));
        self
    }

    /// Use already assembled table handles
    pub fn with_services(mut self, services: Services) -> Self {
        self.services = Some(services);
        self
    }

    /// Open the backend named by the configuration's `storage` section
    pub async fn with_configured_storage(mut self) -> Result<Self> {
        self.services = Some(storage::connect(&self.config.storage).await?);
        Ok(self)
    }

    /// Add custom routes to the server
    ///
    /// # Example
    ///
    /// ```ignore
    /// let metrics = Router::new().route("/version", get(version_handler));
    ///
    /// ServerBuilder::new()
    ///     .with_store(InMemoryStore::new())
    ///     .with_custom_routes(metrics)
    ///     .build()?;
    /// ```
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the transport-agnostic host
    pub fn build_host(mut self) -> Result<ServerHost> {
        let services = self.services.take().ok_or_else(|| {
            anyhow::anyhow!(
                "Storage is required. Call .with_store(), .with_services() or .with_configured_storage()"
            )
        })?;

        Ok(ServerHost::new(self.config, services))
    }

    /// Build the final router
    ///
    /// This merges:
    /// - Health check routes and custom routes (REST)
    /// - GraphQL endpoint, explorer and SDL routes
    ///
    /// and wraps them in request tracing plus, when `allow_any_origin` is
    /// set, a permissive CORS layer.
    pub fn build(mut self) -> Result<Router> {
        let custom_routes = std::mem::take(&mut self.custom_routes);
        let host = Arc::new(self.build_host()?);

        let cors = host.config.allow_any_origin.then(CorsLayer::permissive);

        let app = RestExposure::build_router(host.clone(), custom_routes)?
            .merge(GraphQLExposure::build_router(host)?)
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .option_layer(cors),
            );

        Ok(app)
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    ///
    /// # Example
    ///
    /// ```ignore
    /// ServerBuilder::new()
    ///     .with_store(InMemoryStore::new())
    ///     .serve("127.0.0.1:8000").await?;
    /// ```
    pub async fn serve(self, addr: &str) -> Result<()> {
        let graphql_path = self.config.graphql_path.clone();
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {} (GraphQL at {})", addr, graphql_path);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for Ctrl+C or SIGTERM
///
/// A signal handler that cannot be installed leaves that branch pending,
/// so the server keeps running until the other one fires.
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
