//! Configuration loading and management

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Storage backend selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StorageConfig {
    /// Process-local tables, lost on shutdown
    #[default]
    Memory,

    /// SQLite database (requires the `sqlite` feature)
    Sqlite {
        /// e.g. "sqlite://liftlog.db" or "sqlite::memory:"
        #[serde(default = "default_sqlite_url")]
        url: String,
    },
}

/// Complete configuration for the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Path of the GraphQL endpoint
    #[serde(default = "default_graphql_path")]
    pub graphql_path: String,

    /// Serve the GraphiQL explorer on GET
    #[serde(default = "default_true")]
    pub graphiql: bool,

    /// Add a permissive CORS layer
    #[serde(default)]
    pub allow_any_origin: bool,

    /// tracing-subscriber filter used when RUST_LOG is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    #[serde(default)]
    pub storage: StorageConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            graphql_path: default_graphql_path(),
            graphiql: true,
            allow_any_origin: false,
            log_filter: default_log_filter(),
            storage: StorageConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.check()?;
        Ok(config)
    }

    /// Path serving the schema SDL
    pub fn schema_path(&self) -> String {
        format!("{}/schema", self.graphql_path.trim_end_matches('/'))
    }

    fn check(&self) -> Result<()> {
        if !self.graphql_path.starts_with('/') {
            anyhow::bail!(
                "graphql_path must start with '/', got '{}'",
                self.graphql_path
            );
        }
        Ok(())
    }
}

fn default_bind_address() -> String {
    "127.0.0.1:8000".to_string()
}

fn default_graphql_path() -> String {
    "/graphql".to_string()
}

fn default_log_filter() -> String {
    "liftlog=info,tower_http=info".to_string()
}

fn default_sqlite_url() -> String {
    "sqlite://liftlog.db".to_string()
}

fn default_true() -> bool {
    true
}
