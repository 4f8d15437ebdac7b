use serde::Deserialize;
use std::path::PathBuf;

use super::ConfigError;

/// Complete YAML configuration structure
///
/// All fields are optional to allow partial configuration. Values present in
/// the file override the corresponding environment variables.
///
/// # Example YAML structure
/// ```yaml
/// server:
///   host: "0.0.0.0"
///   port: 8080
///
/// agora:
///   app_id: "your-app-id"
///   app_certificate: "your-app-certificate"
///   customer_id: "your-customer-id"
///   customer_secret: "your-customer-secret"
///   base_url: "https://api.agora.io/api/conversational-ai-agent/v2/projects"
///   agent_uid: "333"
///
/// llm:
///   url: "https://api.openai.com/v1/chat/completions"
///   token: "your-llm-token"
///   model: "gpt-4o-mini"
///
/// tts:
///   vendor: "microsoft"
///   microsoft:
///     key: "your-azure-key"
///     region: "eastus"
///     voice_name: "en-US-AndrewMultilingualNeural"
///     rate: "1.1"
///     volume: "70"
///   elevenlabs:
///     api_key: "your-elevenlabs-key"
///     voice_id: "XrExE9yKIg1WjnnlVkGX"
///     model_id: "eleven_flash_v2_5"
///
/// modalities:
///   input: "text"
///   output: "text,audio"
///
/// security:
///   cors_allow_origin: "https://app.example.com"
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub server: Option<ServerYaml>,
    pub agora: Option<AgoraYaml>,
    pub llm: Option<LlmYaml>,
    pub tts: Option<TtsYaml>,
    pub modalities: Option<ModalitiesYaml>,
    pub security: Option<SecurityYaml>,
}

/// Server configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ServerYaml {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Agora app and agent platform credentials from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AgoraYaml {
    pub app_id: Option<String>,
    pub app_certificate: Option<String>,
    pub customer_id: Option<String>,
    pub customer_secret: Option<String>,
    pub base_url: Option<String>,
    pub agent_uid: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LlmYaml {
    pub url: Option<String>,
    pub token: Option<String>,
    pub model: Option<String>,
}

/// TTS vendor selection and per-vendor credentials from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TtsYaml {
    pub vendor: Option<String>,
    pub microsoft: Option<MicrosoftYaml>,
    pub elevenlabs: Option<ElevenLabsYaml>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct MicrosoftYaml {
    pub key: Option<String>,
    pub region: Option<String>,
    pub voice_name: Option<String>,
    pub rate: Option<String>,
    pub volume: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ElevenLabsYaml {
    pub api_key: Option<String>,
    pub voice_id: Option<String>,
    pub model_id: Option<String>,
}

/// Comma-separated modality lists, same format as the environment variables
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ModalitiesYaml {
    pub input: Option<String>,
    pub output: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SecurityYaml {
    pub cors_allow_origin: Option<String>,
}

impl YamlConfig {
    /// Load YAML configuration from a file
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config: YamlConfig = serde_yaml::from_str(&contents)?;
        Ok(config)
    }
}
