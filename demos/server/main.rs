//! Workout log GraphQL server
//!
//! Usage:
//!
//! ```text
//! cargo run --example server                      # defaults, in-memory storage
//! cargo run --example server -- liftlog.yaml      # YAML configuration
//! cargo run --example server --features sqlite -- demos/server/sqlite.yaml
//! ```

use anyhow::Result;
use liftlog::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => ServerConfig::from_yaml_file(&path)?,
        None => ServerConfig::default(),
    };

    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let addr = config.bind_address.clone();

    println!("\n🏋️  liftlog GraphQL server");
    println!("\n🌐 Listening on http://{}", addr);
    println!("\n📚 Available endpoints:");
    println!("    POST   {}          - GraphQL endpoint", config.graphql_path);
    if config.graphiql {
        println!("    GET    {}          - GraphiQL explorer", config.graphql_path);
    }
    println!("    GET    {}   - Schema SDL", config.schema_path());
    println!("    GET    /health            - Health check");
    println!("\n  Example mutation:");
    println!("    mutation {{ createUser(username: \"alice\") {{ userId username }} }}");
    println!();

    ServerBuilder::new()
        .with_config(config)
        .with_configured_storage()
        .await?
        .serve(&addr)
        .await
}
