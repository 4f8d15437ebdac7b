use std::time::Duration;

use thiserror::Error;

use super::tts::TtsConfigError;
use crate::core::token::TokenError;

pub type ConvoAIResult<T> = Result<T, ConvoAIError>;

/// Errors raised while inviting or removing an agent
#[derive(Debug, Error)]
pub enum ConvoAIError {
    /// Caller input rejected before any work was done
    #[error("{0}")]
    InvalidRequest(String),

    #[error("failed to generate token: {0}")]
    TokenGeneration(#[source] TokenError),

    #[error("failed to get TTS config: {0}")]
    TtsConfig(#[from] TtsConfigError),

    #[error("failed to marshal request: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid platform URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to send request: {source} (URL: {url})")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request timed out after {}s (URL: {url})", .timeout.as_secs())]
    Timeout { url: String, timeout: Duration },

    #[error("failed to start conversation: status={status}, body={body}, url={url}")]
    StartFailed {
        status: u16,
        body: String,
        url: String,
    },

    #[error("failed to remove agent: status={status}, body={body}")]
    RemoveFailed { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ConvoAIError {
    pub fn is_client_error(&self) -> bool {
        matches!(self, ConvoAIError::InvalidRequest(_))
    }

    /// Upstream HTTP status, when the platform answered with a failure
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            ConvoAIError::StartFailed { status, .. } | ConvoAIError::RemoveFailed { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}
