//! HTTP server exposing recipe extraction as a JSON API

pub mod handlers;
pub mod routes;

use std::sync::Arc;

use anyhow::Result;
use log::info;

use crate::builder::RecipeParser;
use crate::config::ServiceConfig;

pub use routes::create_router;

/// Shared, read-only state handed to every request
pub struct ServerState {
    pub parser: RecipeParser,
}

impl ServerState {
    pub fn new(parser: RecipeParser) -> Self {
        Self { parser }
    }
}

/// Bind the configured address and serve until the process is stopped
pub async fn run_server(config: ServiceConfig) -> Result<()> {
    let addr = config.socket_addr()?;
    let parser = RecipeParser::from_config(&config)?;

    info!("Starting recipe server on {}", addr);
    info!("Resolving recipes against {}", parser.base_url());

    let app = create_router(Arc::new(ServerState::new(parser)));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Ready to serve");

    axum::serve(listener, app).await?;
    Ok(())
}
