use axum::response::Json;
use serde_json::{Value, json};

/// Liveness check
pub async fn ping() -> Json<Value> {
    Json(json!({ "message": "pong" }))
}
