use super::env::EnvConfig;
use super::yaml::YamlConfig;
use super::{ConfigError, ServerConfig};
use crate::core::convoai::modality::parse_modality_list;

fn override_string(target: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *target = value;
    }
}

fn override_modalities(
    target: &mut Vec<String>,
    name: &'static str,
    value: Option<String>,
) -> Result<(), ConfigError> {
    let Some(raw) = value else {
        return Ok(());
    };
    let parsed = parse_modality_list(&raw)
        .map_err(|reason| ConfigError::InvalidModalities { name, reason })?;
    if let Some(parsed) = parsed {
        *target = parsed;
    }
    Ok(())
}

/// Build the server configuration from the environment, then apply YAML
/// overrides field by field.
pub(super) fn merge_config(yaml: Option<YamlConfig>) -> Result<ServerConfig, ConfigError> {
    let env = EnvConfig::load()?;

    let mut config = ServerConfig {
        host: env.host,
        port: env.port,
        cors_allow_origin: env.cors_allow_origin,
        app_id: env.app_id,
        app_certificate: env.app_certificate,
        customer_id: env.customer_id,
        customer_secret: env.customer_secret,
        convo_ai_base_url: env.convo_ai_base_url,
        agent_uid: env.agent_uid,
        llm_url: env.llm_url,
        llm_token: env.llm_token,
        llm_model: env.llm_model,
        tts_vendor: env.tts_vendor,
        tts_credentials: env.tts_credentials,
        input_modalities: env.input_modalities,
        output_modalities: env.output_modalities,
    };

    let Some(yaml) = yaml else {
        return Ok(config);
    };

    if let Some(server) = yaml.server {
        override_string(&mut config.host, server.host);
        if let Some(port) = server.port {
            config.port = port;
        }
    }

    if let Some(agora) = yaml.agora {
        override_string(&mut config.app_id, agora.app_id);
        override_string(&mut config.app_certificate, agora.app_certificate);
        override_string(&mut config.customer_id, agora.customer_id);
        override_string(&mut config.customer_secret, agora.customer_secret);
        override_string(&mut config.convo_ai_base_url, agora.base_url);
        override_string(&mut config.agent_uid, agora.agent_uid);
    }

    if let Some(llm) = yaml.llm {
        override_string(&mut config.llm_url, llm.url);
        override_string(&mut config.llm_token, llm.token);
        override_string(&mut config.llm_model, llm.model);
    }

    if let Some(tts) = yaml.tts {
        override_string(&mut config.tts_vendor, tts.vendor);

        if let Some(ms) = tts.microsoft {
            let creds = config
                .tts_credentials
                .microsoft
                .get_or_insert_with(Default::default);
            override_string(&mut creds.key, ms.key);
            override_string(&mut creds.region, ms.region);
            override_string(&mut creds.voice_name, ms.voice_name);
            override_string(&mut creds.rate, ms.rate);
            override_string(&mut creds.volume, ms.volume);
        }

        if let Some(el) = tts.elevenlabs {
            let creds = config
                .tts_credentials
                .elevenlabs
                .get_or_insert_with(Default::default);
            override_string(&mut creds.api_key, el.api_key);
            override_string(&mut creds.voice_id, el.voice_id);
            override_string(&mut creds.model_id, el.model_id);
        }
    }

    if let Some(modalities) = yaml.modalities {
        override_modalities(
            &mut config.input_modalities,
            "input_modalities",
            modalities.input,
        )?;
        override_modalities(
            &mut config.output_modalities,
            "output_modalities",
            modalities.output,
        )?;
    }

    if let Some(origin) = yaml.security.and_then(|s| s.cors_allow_origin) {
        config.cors_allow_origin = Some(origin);
    }

    Ok(config)
}
