use std::sync::Arc;

use axum::{
    extract::{State, rejection::JsonRejection},
    response::Json,
};
use serde::{Deserialize, Serialize};

use crate::core::token::{DEFAULT_TOKEN_EXPIRE_SECS, RtcRole};
use crate::errors::{AppError, AppResult};
use crate::state::AppState;

/// Uid as sent by clients: either a JSON number or a string
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TokenUid {
    Numeric(u64),
    Text(String),
}

impl Default for TokenUid {
    fn default() -> Self {
        TokenUid::Numeric(0)
    }
}

impl TokenUid {
    fn into_string(self) -> String {
        match self {
            TokenUid::Numeric(n) => n.to_string(),
            TokenUid::Text(s) => s,
        }
    }
}

/// Request body for `POST /token/getNew`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRequest {
    pub token_type: String,
    #[serde(default)]
    pub channel: String,
    #[serde(default)]
    pub uid: TokenUid,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub expire: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Issue an RTC token for a client joining a channel
pub async fn get_new_token(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TokenRequest>, JsonRejection>,
) -> AppResult<Json<TokenResponse>> {
    let Json(request) = payload?;

    if !request.token_type.eq_ignore_ascii_case("rtc") {
        return Err(AppError::BadRequest(format!(
            "unsupported token type: {}",
            request.token_type
        )));
    }

    let role = match request.role.as_deref() {
        Some(role) if !role.is_empty() => role.parse::<RtcRole>()?,
        _ => RtcRole::default(),
    };
    let expire = request
        .expire
        .filter(|e| *e > 0)
        .unwrap_or(DEFAULT_TOKEN_EXPIRE_SECS);

    let token = state.token_issuer.issue_rtc_token(
        &request.channel,
        &request.uid.into_string(),
        role,
        expire,
    )?;

    Ok(Json(TokenResponse { token }))
}
