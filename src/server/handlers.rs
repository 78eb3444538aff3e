//! HTTP request handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::{error, info, warn};

use crate::server::ServerState;

/// Extract one recipe
///
/// GET /api/recipe/:id
pub async fn get_recipe(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> Response {
    info!("Recipe request: {}", id);

    match state.parser.extract(&id).await {
        Ok(recipe) => Json(recipe).into_response(),
        Err(err) if err.is_not_found() => {
            warn!("Recipe {} not found: {}", id, err);
            (StatusCode::NOT_FOUND, err.to_string()).into_response()
        }
        Err(err) => {
            error!("Failed to extract recipe {}: {}", id, err);
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}
