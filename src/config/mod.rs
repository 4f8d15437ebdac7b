//! Configuration module for the ConvoAI gateway
//!
//! This module handles server configuration from various sources: .env files, YAML files,
//! and environment variables. Priority: YAML > ENV vars > .env values > defaults.
//!
//! # Modules
//! - `env`: Environment variable loading
//! - `yaml`: YAML configuration file loading
//! - `merge`: Applying YAML overrides on top of the environment
//! - `validation`: Startup validation
//!
//! # Example
//! ```rust,no_run
//! use convoai_gateway::config::ServerConfig;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load from environment variables only
//! let config = ServerConfig::from_env()?;
//!
//! // Load from YAML file with environment variable base
//! let config_path = PathBuf::from("config.yaml");
//! let config = ServerConfig::from_file(&config_path)?;
//!
//! println!("Server listening on {}", config.address());
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use thiserror::Error;

use crate::core::convoai::tts::{TtsConfigError, TtsCredentials};

mod env;
mod merge;
mod validation;
mod yaml;

pub use yaml::YamlConfig;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config error: Agora credentials (AGORA_APP_ID, AGORA_APP_CERTIFICATE) are not set")]
    MissingAppCredentials,

    #[error(
        "config error: Agora Conversation AI credentials (AGORA_CUSTOMER_ID, AGORA_CUSTOMER_SECRET, AGORA_CONVO_AI_BASE_URL) are not set"
    )]
    MissingPlatformCredentials,

    #[error("config error: LLM configuration (LLM_URL, LLM_TOKEN) is not set")]
    MissingLlmConfig,

    #[error("config error: TTS_VENDOR is not set")]
    MissingTtsVendor,

    #[error("config error: {0}")]
    Tts(#[from] TtsConfigError),

    #[error("config error: Invalid {name} format: {reason}")]
    InvalidModalities { name: &'static str, reason: String },

    #[error("config error: Invalid {name} value '{value}'")]
    InvalidValue { name: &'static str, value: String },

    #[error("config error: failed to read {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("config error: failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Server configuration
///
/// Contains all configuration needed to run the gateway:
/// - Server settings (host, port, CORS)
/// - Agora RTC app credentials used to sign tokens
/// - Agent platform credentials and base URL
/// - LLM endpoint forwarded to every agent
/// - TTS vendor selection and credentials
/// - Fallback input/output modalities
///
/// Loaded once at startup and shared read-only for the process lifetime.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    // Server settings
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins (comma-separated list or "*").
    /// None rejects every cross-origin request.
    pub cors_allow_origin: Option<String>,

    // Agora RTC app
    pub app_id: String,
    pub app_certificate: String,

    // Agent platform
    pub customer_id: String,
    pub customer_secret: String,
    pub convo_ai_base_url: String,
    /// RTC identity the agent joins the channel with
    pub agent_uid: String,

    // LLM
    pub llm_url: String,
    pub llm_token: String,
    pub llm_model: String,

    // TTS
    /// Vendor tag, resolved against `tts_credentials` (e.g. "microsoft", "elevenlabs")
    pub tts_vendor: String,
    pub tts_credentials: TtsCredentials,

    // Modalities used when the caller sends none
    pub input_modalities: Vec<String>,
    pub output_modalities: Vec<String>,
}

/// Zeroize secret fields when the configuration is dropped.
/// TTS credentials zeroize themselves.
impl Drop for ServerConfig {
    fn drop(&mut self) {
        use zeroize::Zeroize;

        self.app_certificate.zeroize();
        self.customer_secret.zeroize();
        self.llm_token.zeroize();
    }
}

impl ServerConfig {
    /// Load configuration from environment variables and validate it
    ///
    /// The .env file, if any, is loaded in main.rs before this is called so
    /// real environment variables take precedence over .env values.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = merge::merge_config(None)?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a YAML file with environment variable base
    ///
    /// Environment variables (with defaults) form the base; values present in
    /// the YAML file override them. The merged configuration is validated.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The YAML file cannot be read or is malformed
    /// - Environment variables have invalid formats
    /// - Configuration validation fails
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let yaml_config = yaml::YamlConfig::from_file(path)?;
        let config = merge::merge_config(Some(yaml_config))?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Get the server address as a string
    ///
    /// Returns the address in the format "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Agent platform base URL without a trailing slash
    pub fn platform_base_url(&self) -> &str {
        self.convo_ai_base_url.trim_end_matches('/')
    }
}
