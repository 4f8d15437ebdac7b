use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers::{agent, api, token};
use crate::state::AppState;
use std::sync::Arc;

/// Create the API router
///
/// Note: Header middleware should be applied in main.rs after state is available
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(api::ping))
        .route("/agent/invite", post(agent::invite_agent))
        .route("/agent/remove", post(agent::remove_agent))
        .route("/token/getNew", post(token::get_new_token))
        .layer(TraceLayer::new_for_http())
}
