//! Server host for transport-agnostic API exposure
//!
//! The host holds the state every exposure needs (configuration and table
//! handles) without knowing anything about HTTP or GraphQL.

use crate::config::ServerConfig;
use crate::core::service::Services;
use std::sync::Arc;

/// Host context shared by the REST and GraphQL exposures
///
/// # Example
///
/// ```rust,ignore
/// let host = Arc::new(ServerHost::new(config, services));
/// let rest_app = RestExposure::build_router(host.clone(), vec![])?;
/// let graphql_app = GraphQLExposure::build_router(host)?;
/// ```
#[derive(Debug)]
pub struct ServerHost {
    pub config: Arc<ServerConfig>,

    /// Table handles injected into the schema
    pub services: Services,
}

impl ServerHost {
    pub fn new(config: ServerConfig, services: Services) -> Self {
        Self {
            config: Arc::new(config),
            services,
        }
    }
}
