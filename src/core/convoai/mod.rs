//! Conversational agent lifecycle.
//!
//! An invitation is validated, turned into a full platform start request
//! (fresh RTC token, resolved TTS vendor, modalities, fixed ASR/LLM/VAD
//! settings) and sent to the agent platform's `join` endpoint. Removal
//! forwards the agent id to `leave`.

pub mod builder;
pub mod client;
pub mod error;
pub mod modality;
pub mod service;
pub mod tts;
pub mod types;
pub mod uid;

pub use builder::{build_start_request, generate_session_name};
pub use client::{AgentLifecycleClient, AgentPlatform, basic_auth};
pub use error::{ConvoAIError, ConvoAIResult};
pub use service::{ConvoAIService, validate_invite_request, validate_remove_request};
pub use tts::{TtsConfig, TtsConfigError, TtsCredentials, TtsVendor, resolve_tts_config};
pub use types::{
    AgentStatus, InviteAgentRequest, InviteAgentResponse, RemoveAgentRequest,
    RemoveAgentResponse, StartAgentRequest,
};
