use std::sync::Arc;

use axum::{
    extract::{State, rejection::JsonRejection},
    response::Json,
};

use crate::core::convoai::{
    InviteAgentRequest, InviteAgentResponse, RemoveAgentRequest, RemoveAgentResponse,
};
use crate::errors::AppResult;
use crate::state::AppState;

/// Start an agent in the caller's channel
pub async fn invite_agent(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<InviteAgentRequest>, JsonRejection>,
) -> AppResult<Json<InviteAgentResponse>> {
    let Json(request) = payload?;
    let response = state.convoai.invite_agent(&request).await?;
    Ok(Json(response))
}

/// Stop a running agent
pub async fn remove_agent(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RemoveAgentRequest>, JsonRejection>,
) -> AppResult<Json<RemoveAgentResponse>> {
    let Json(request) = payload?;
    let response = state.convoai.remove_agent(&request).await?;
    Ok(Json(response))
}
