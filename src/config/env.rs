use std::env;

use super::ConfigError;
use crate::core::convoai::modality::{
    DEFAULT_INPUT_MODALITIES, DEFAULT_OUTPUT_MODALITIES, parse_modality_list, to_owned_list,
};
use crate::core::convoai::tts::{
    ElevenLabsTtsCredentials, MicrosoftTtsCredentials, TtsCredentials,
};

/// Raw values read from the process environment.
///
/// Unset and empty variables are treated the same way.
#[derive(Debug, Default)]
pub(super) struct EnvConfig {
    pub host: String,
    pub port: u16,
    pub cors_allow_origin: Option<String>,
    pub app_id: String,
    pub app_certificate: String,
    pub customer_id: String,
    pub customer_secret: String,
    pub convo_ai_base_url: String,
    pub agent_uid: String,
    pub llm_url: String,
    pub llm_token: String,
    pub llm_model: String,
    pub tts_vendor: String,
    pub tts_credentials: TtsCredentials,
    pub input_modalities: Vec<String>,
    pub output_modalities: Vec<String>,
}

fn var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn var_or_empty(name: &str) -> String {
    var(name).unwrap_or_default()
}

fn modalities(name: &'static str, default: &[&str]) -> Result<Vec<String>, ConfigError> {
    let parsed = match var(name) {
        Some(raw) => parse_modality_list(&raw)
            .map_err(|reason| ConfigError::InvalidModalities { name, reason })?,
        None => None,
    };
    Ok(parsed.unwrap_or_else(|| to_owned_list(default)))
}

/// Microsoft credentials are present when the key is set
fn microsoft_credentials() -> Option<MicrosoftTtsCredentials> {
    let key = var("MICROSOFT_TTS_KEY")?;
    Some(MicrosoftTtsCredentials {
        key,
        region: var_or_empty("MICROSOFT_TTS_REGION"),
        voice_name: var_or_empty("MICROSOFT_TTS_VOICE_NAME"),
        rate: var_or_empty("MICROSOFT_TTS_RATE"),
        volume: var_or_empty("MICROSOFT_TTS_VOLUME"),
    })
}

/// ElevenLabs credentials are present when the API key is set
fn elevenlabs_credentials() -> Option<ElevenLabsTtsCredentials> {
    let api_key = var("ELEVENLABS_API_KEY")?;
    Some(ElevenLabsTtsCredentials {
        api_key,
        voice_id: var_or_empty("ELEVENLABS_VOICE_ID"),
        model_id: var_or_empty("ELEVENLABS_MODEL_ID"),
    })
}

impl EnvConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let port = match var("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                name: "PORT",
                value: raw.clone(),
            })?,
            None => 8080,
        };

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            cors_allow_origin: var("CORS_ALLOW_ORIGIN"),
            app_id: var_or_empty("AGORA_APP_ID"),
            app_certificate: var_or_empty("AGORA_APP_CERTIFICATE"),
            customer_id: var_or_empty("AGORA_CUSTOMER_ID"),
            customer_secret: var_or_empty("AGORA_CUSTOMER_SECRET"),
            convo_ai_base_url: var_or_empty("AGORA_CONVO_AI_BASE_URL"),
            agent_uid: var_or_empty("AGENT_UID"),
            llm_url: var_or_empty("LLM_URL"),
            llm_token: var_or_empty("LLM_TOKEN"),
            llm_model: var_or_empty("LLM_MODEL"),
            tts_vendor: var_or_empty("TTS_VENDOR"),
            tts_credentials: TtsCredentials {
                microsoft: microsoft_credentials(),
                elevenlabs: elevenlabs_credentials(),
            },
            input_modalities: modalities("INPUT_MODALITIES", DEFAULT_INPUT_MODALITIES)?,
            output_modalities: modalities("OUTPUT_MODALITIES", DEFAULT_OUTPUT_MODALITIES)?,
        })
    }
}
