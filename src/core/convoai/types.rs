//! Wire types for the agent endpoints and the agent platform's start request.
//!
//! Inbound request/response bodies mirror the gateway's public API; the
//! `StartAgentRequest` family mirrors the agent platform's `join` body.

use serde::{Deserialize, Serialize};

use super::tts::TtsConfig;

/// Request body for `POST /agent/invite`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InviteAgentRequest {
    #[serde(default)]
    pub requester_id: String,
    #[serde(default)]
    pub channel_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rtc_codec: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_modalities: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_modalities: Option<Vec<String>>,
}

/// Request body for `POST /agent/remove`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RemoveAgentRequest {
    #[serde(default)]
    pub agent_id: String,
}

/// Lifecycle state reported for a freshly created agent
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgentStatus {
    Running,
}

/// Response body for a successful invitation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InviteAgentResponse {
    pub agent_id: String,
    /// Unix timestamp (seconds) at which the gateway observed the creation
    pub create_ts: i64,
    pub status: AgentStatus,
}

/// Response body for a successful removal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RemoveAgentResponse {
    pub success: bool,
    pub agent_id: String,
}

/// Body of the agent platform's `join` call
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StartAgentRequest {
    pub name: String,
    pub properties: AgentProperties,
}

/// Full per-session configuration sent to the agent platform
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AgentProperties {
    pub channel: String,
    pub token: String,
    pub agent_rtc_uid: String,
    pub remote_rtc_uids: Vec<String>,
    pub enable_string_uid: bool,
    pub idle_timeout: u32,
    pub asr: AsrConfig,
    pub llm: LlmConfig,
    pub tts: TtsConfig,
    pub vad: VadConfig,
    pub advanced_features: AdvancedFeatures,
}

/// Speech recognition settings
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AsrConfig {
    pub language: String,
    pub task: String,
}

/// Language model settings
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LlmConfig {
    pub url: String,
    pub api_key: String,
    pub system_messages: Vec<SystemMessage>,
    pub greeting_message: String,
    pub failure_message: String,
    pub max_history: u32,
    pub params: LlmParams,
    pub input_modalities: Vec<String>,
    pub output_modalities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SystemMessage {
    pub role: String,
    pub content: String,
}

/// Sampling parameters forwarded to the model
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LlmParams {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
}

/// Voice activity detection tuning
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VadConfig {
    pub silence_duration_ms: u32,
    pub speech_duration_ms: u32,
    pub threshold: f64,
    pub interrupt_duration_ms: u32,
    pub prefix_padding_ms: u32,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct AdvancedFeatures {
    pub enable_aivad: bool,
    pub enable_bhvs: bool,
}

/// Subset of the platform's `join` response the gateway relies on.
///
/// Any other fields are ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct JoinResponse {
    pub agent_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invite_request_optional_fields() {
        let req: InviteAgentRequest =
            serde_json::from_str(r#"{"requester_id":"123","channel_name":"test-channel"}"#)
                .unwrap();
        assert_eq!(req.requester_id, "123");
        assert!(req.input_modalities.is_none());
        assert!(req.output_modalities.is_none());
        assert!(req.rtc_codec.is_none());
    }

    #[test]
    fn test_agent_status_serializes_uppercase() {
        let resp = InviteAgentResponse {
            agent_id: "a".to_string(),
            create_ts: 1,
            status: AgentStatus::Running,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["status"], "RUNNING");
    }

    #[test]
    fn test_join_response_ignores_extra_fields() {
        let resp: JoinResponse =
            serde_json::from_str(r#"{"agent_id":"x","create_ts":5,"status":"RUNNING"}"#).unwrap();
        assert_eq!(resp.agent_id, "x");
    }
}
