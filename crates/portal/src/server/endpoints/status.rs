use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;

use crate::types::PortalState;

/// GET /health
pub async fn get_health(State(s): State<Arc<PortalState>>) -> Response {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "policy_loaded": s.policy_store.is_loaded(),
        })),
    )
        .into_response()
}
