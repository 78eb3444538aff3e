//! Axum router configuration

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::server::handlers;
use crate::server::ServerState;

/// Create the main application router
pub fn create_router(state: Arc<ServerState>) -> Router {
    // Any origin may read recipes
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/recipe/:id", get(handlers::get_recipe))
        .with_state(state)
        .layer(cors)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::RecipeParser;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_check() {
        let parser = RecipeParser::builder().quiet().build().unwrap();
        let app = create_router(Arc::new(ServerState::new(parser)));

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
