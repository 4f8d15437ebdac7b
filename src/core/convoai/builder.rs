//! Assembles the platform `join` body for an invitation.
//!
//! Everything caller-independent is fixed here; the caller only contributes
//! the channel, its own uid and optionally the modalities.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;

use super::error::{ConvoAIError, ConvoAIResult};
use super::modality::resolve_modalities;
use super::tts::{REDACTED, resolve_tts_config};
use super::types::{
    AdvancedFeatures, AgentProperties, AsrConfig, InviteAgentRequest, LlmConfig, LlmParams,
    StartAgentRequest, SystemMessage, VadConfig,
};
use super::uid::{is_string_uid, remote_rtc_uids};
use crate::config::ServerConfig;
use crate::core::token::{DEFAULT_TOKEN_EXPIRE_SECS, RtcRole, TokenIssuer};

/// Uid the agent's channel token is scoped to (`0` = any user)
pub const AGENT_TOKEN_UID: &str = "0";

pub const IDLE_TIMEOUT_SECS: u32 = 30;

pub const ASR_LANGUAGE: &str = "en-US";
pub const ASR_TASK: &str = "conversation";

pub const SYSTEM_PROMPT: &str = "You are a helpful assistant. Pretend that the text input is audio, and you are responding to it. Speak fast, clearly, and concisely.";
pub const GREETING_MESSAGE: &str = "Hello! How can I assist you today?";
pub const FAILURE_MESSAGE: &str = "Please wait a moment.";

pub const MAX_HISTORY: u32 = 10;
pub const MAX_TOKENS: u32 = 1024;
pub const TEMPERATURE: f64 = 0.7;
pub const TOP_P: f64 = 0.95;

pub const VAD_SILENCE_DURATION_MS: u32 = 480;
pub const VAD_SPEECH_DURATION_MS: u32 = 15000;
pub const VAD_THRESHOLD: f64 = 0.5;
pub const VAD_INTERRUPT_DURATION_MS: u32 = 160;
pub const VAD_PREFIX_PADDING_MS: u32 = 300;

const SESSION_SUFFIX_LEN: usize = 6;

/// Unique-per-call session name: `agent-{unix nanos}-{6 random lowercase letters}`
pub fn generate_session_name() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();

    let mut rng = rand::thread_rng();
    let suffix: String = (0..SESSION_SUFFIX_LEN)
        .map(|_| rng.gen_range(b'a'..=b'z') as char)
        .collect();

    format!("agent-{nanos}-{suffix}")
}

/// Build the platform start request for a validated invitation.
///
/// The token is minted first; a failure there aborts before TTS resolution.
pub fn build_start_request(
    req: &InviteAgentRequest,
    config: &ServerConfig,
    issuer: &dyn TokenIssuer,
) -> ConvoAIResult<StartAgentRequest> {
    let token = issuer
        .issue_rtc_token(
            &req.channel_name,
            AGENT_TOKEN_UID,
            RtcRole::Publisher,
            DEFAULT_TOKEN_EXPIRE_SECS,
        )
        .map_err(ConvoAIError::TokenGeneration)?;

    let tts = resolve_tts_config(&config.tts_vendor, &config.tts_credentials)?;

    let input_modalities =
        resolve_modalities(req.input_modalities.as_deref(), &config.input_modalities);
    let output_modalities =
        resolve_modalities(req.output_modalities.as_deref(), &config.output_modalities);

    Ok(StartAgentRequest {
        name: generate_session_name(),
        properties: AgentProperties {
            channel: req.channel_name.clone(),
            token,
            agent_rtc_uid: config.agent_uid.clone(),
            remote_rtc_uids: remote_rtc_uids(&req.requester_id),
            enable_string_uid: is_string_uid(&req.requester_id),
            idle_timeout: IDLE_TIMEOUT_SECS,
            asr: AsrConfig {
                language: ASR_LANGUAGE.to_string(),
                task: ASR_TASK.to_string(),
            },
            llm: LlmConfig {
                url: config.llm_url.clone(),
                api_key: config.llm_token.clone(),
                system_messages: vec![SystemMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                }],
                greeting_message: GREETING_MESSAGE.to_string(),
                failure_message: FAILURE_MESSAGE.to_string(),
                max_history: MAX_HISTORY,
                params: LlmParams {
                    model: config.llm_model.clone(),
                    max_tokens: MAX_TOKENS,
                    temperature: TEMPERATURE,
                    top_p: TOP_P,
                },
                input_modalities,
                output_modalities,
            },
            tts,
            vad: VadConfig {
                silence_duration_ms: VAD_SILENCE_DURATION_MS,
                speech_duration_ms: VAD_SPEECH_DURATION_MS,
                threshold: VAD_THRESHOLD,
                interrupt_duration_ms: VAD_INTERRUPT_DURATION_MS,
                prefix_padding_ms: VAD_PREFIX_PADDING_MS,
            },
            advanced_features: AdvancedFeatures::default(),
        },
    })
}

impl StartAgentRequest {
    /// Copy with the channel token and vendor credentials masked
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.properties.token = REDACTED.to_string();
        copy.properties.llm.api_key = REDACTED.to_string();
        copy.properties.tts = self.properties.tts.redacted();
        copy
    }
}
