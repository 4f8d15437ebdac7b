//! Shared fixtures for integration tests
//!
//! - `test_config` - complete configuration pointing at a mock platform
//! - `StubIssuer` - deterministic token issuer

// Not every test binary uses every fixture
#![allow(dead_code)]

use convoai_gateway::ServerConfig;
use convoai_gateway::core::convoai::tts::{MicrosoftTtsCredentials, TtsCredentials};
use convoai_gateway::core::token::{RtcRole, TokenError, TokenIssuer};

pub const APP_ID: &str = "970CA35de60c44645bbae8a215061b33";
pub const APP_CERTIFICATE: &str = "5CFd2fd1755d40ecb72977518be15d3b";
pub const CUSTOMER_ID: &str = "test-customer-id";
pub const CUSTOMER_SECRET: &str = "test-customer-secret";

/// Complete configuration with the platform base URL set to `base_url`
pub fn test_config(base_url: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_allow_origin: None,
        app_id: APP_ID.to_string(),
        app_certificate: APP_CERTIFICATE.to_string(),
        customer_id: CUSTOMER_ID.to_string(),
        customer_secret: CUSTOMER_SECRET.to_string(),
        convo_ai_base_url: base_url.to_string(),
        agent_uid: "123456".to_string(),
        llm_url: "https://api.openai.com/v1/chat/completions".to_string(),
        llm_token: "test-llm-token".to_string(),
        llm_model: "gpt-4o-mini".to_string(),
        tts_vendor: "microsoft".to_string(),
        tts_credentials: TtsCredentials {
            microsoft: Some(MicrosoftTtsCredentials {
                key: "test-ms-key".to_string(),
                region: "eastus".to_string(),
                voice_name: "en-US-AriaNeural".to_string(),
                rate: "1.0".to_string(),
                volume: "1.0".to_string(),
            }),
            elevenlabs: None,
        },
        input_modalities: vec!["text".to_string()],
        output_modalities: vec!["text".to_string(), "audio".to_string()],
    }
}

/// Issues `stub-token-{channel}` for any request
pub struct StubIssuer;

impl TokenIssuer for StubIssuer {
    fn issue_rtc_token(
        &self,
        channel: &str,
        _uid: &str,
        _role: RtcRole,
        _expire_secs: u32,
    ) -> Result<String, TokenError> {
        if channel.is_empty() {
            return Err(TokenError::MissingChannel);
        }
        Ok(format!("stub-token-{channel}"))
    }
}
