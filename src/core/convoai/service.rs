//! Agent invitation and removal on top of an [`AgentPlatform`].
//!
//! Requests are validated here before any token is minted or platform call made.

use std::sync::Arc;

use tracing::{debug, info};

use super::builder::build_start_request;
use super::client::AgentPlatform;
use super::error::{ConvoAIError, ConvoAIResult};
use super::types::{InviteAgentRequest, InviteAgentResponse, RemoveAgentRequest, RemoveAgentResponse};
use crate::config::ServerConfig;
use crate::core::token::TokenIssuer;

pub const CHANNEL_NAME_MIN_LEN: usize = 3;
pub const CHANNEL_NAME_MAX_LEN: usize = 64;

/// Reject an invitation before any token is minted or request sent.
///
/// Channel length is counted in bytes.
pub fn validate_invite_request(req: &InviteAgentRequest) -> ConvoAIResult<()> {
    if req.requester_id.is_empty() {
        return Err(ConvoAIError::InvalidRequest(
            "requester_id is required".to_string(),
        ));
    }

    if req.channel_name.is_empty() {
        return Err(ConvoAIError::InvalidRequest(
            "channel_name is required".to_string(),
        ));
    }

    let len = req.channel_name.len();
    if !(CHANNEL_NAME_MIN_LEN..=CHANNEL_NAME_MAX_LEN).contains(&len) {
        return Err(ConvoAIError::InvalidRequest(format!(
            "channel_name length must be between {CHANNEL_NAME_MIN_LEN} and {CHANNEL_NAME_MAX_LEN} characters"
        )));
    }

    Ok(())
}

pub fn validate_remove_request(req: &RemoveAgentRequest) -> ConvoAIResult<()> {
    if req.agent_id.is_empty() {
        return Err(ConvoAIError::InvalidRequest("agent_id is required".to_string()));
    }
    Ok(())
}

/// Orchestrates invitations and removals.
///
/// Stateless between calls; safe to share across request handlers.
#[derive(Clone)]
pub struct ConvoAIService {
    config: Arc<ServerConfig>,
    token_issuer: Arc<dyn TokenIssuer>,
    platform: Arc<dyn AgentPlatform>,
}

impl ConvoAIService {
    pub fn new(
        config: Arc<ServerConfig>,
        token_issuer: Arc<dyn TokenIssuer>,
        platform: Arc<dyn AgentPlatform>,
    ) -> Self {
        Self {
            config,
            token_issuer,
            platform,
        }
    }

    /// Validate, build the start request and ask the platform to join.
    pub async fn invite_agent(&self, req: &InviteAgentRequest) -> ConvoAIResult<InviteAgentResponse> {
        validate_invite_request(req)?;

        let start = build_start_request(req, &self.config, self.token_issuer.as_ref())?;

        if tracing::enabled!(tracing::Level::DEBUG) {
            let pretty = serde_json::to_string_pretty(&start.redacted())?;
            debug!("Agent start request:\n{pretty}");
        }

        info!(
            channel = %req.channel_name,
            requester_id = %req.requester_id,
            session = %start.name,
            "Inviting agent"
        );

        self.platform.join(&start).await
    }

    pub async fn remove_agent(&self, req: &RemoveAgentRequest) -> ConvoAIResult<RemoveAgentResponse> {
        validate_remove_request(req)?;

        info!(agent_id = %req.agent_id, "Removing agent");
        self.platform.leave(&req.agent_id).await
    }
}
