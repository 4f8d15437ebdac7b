use super::{ConfigError, ServerConfig};
use crate::core::convoai::tts::resolve_tts_config;

/// Check that every setting the gateway needs to serve requests is present.
///
/// The TTS vendor is resolved against the configured credentials so a bad
/// vendor or incomplete credential block fails at startup rather than on the
/// first invitation.
pub(super) fn validate(config: &ServerConfig) -> Result<(), ConfigError> {
    if config.app_id.is_empty() || config.app_certificate.is_empty() {
        return Err(ConfigError::MissingAppCredentials);
    }

    if config.customer_id.is_empty()
        || config.customer_secret.is_empty()
        || config.convo_ai_base_url.is_empty()
    {
        return Err(ConfigError::MissingPlatformCredentials);
    }

    if config.llm_url.is_empty() || config.llm_token.is_empty() {
        return Err(ConfigError::MissingLlmConfig);
    }

    if config.tts_vendor.is_empty() {
        return Err(ConfigError::MissingTtsVendor);
    }

    resolve_tts_config(&config.tts_vendor, &config.tts_credentials)?;

    Ok(())
}
