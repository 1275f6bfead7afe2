use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version and embedding model.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "UP",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "skillmatch",
        "model": state.engine.model()
    }))
}
