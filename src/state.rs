use std::sync::Arc;

use crate::config::ServerConfig;
use crate::core::convoai::{AgentLifecycleClient, AgentPlatform, ConvoAIService};
use crate::core::token::{AgoraTokenIssuer, TokenIssuer};

/// Shared state handed to every handler
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub token_issuer: Arc<dyn TokenIssuer>,
    pub convoai: ConvoAIService,
}

impl AppState {
    /// Production wiring: AccessToken2 issuer and the HTTP platform client
    pub fn new(config: ServerConfig) -> Arc<Self> {
        let token_issuer: Arc<dyn TokenIssuer> = Arc::new(AgoraTokenIssuer::new(
            config.app_id.as_str(),
            config.app_certificate.as_str(),
        ));
        let platform: Arc<dyn AgentPlatform> = Arc::new(AgentLifecycleClient::from_config(&config));
        Self::with_components(config, token_issuer, platform)
    }

    /// Build state around caller-supplied issuer and platform
    pub fn with_components(
        config: ServerConfig,
        token_issuer: Arc<dyn TokenIssuer>,
        platform: Arc<dyn AgentPlatform>,
    ) -> Arc<Self> {
        let config = Arc::new(config);
        let convoai = ConvoAIService::new(config.clone(), token_issuer.clone(), platform);
        Arc::new(Self {
            config,
            token_issuer,
            convoai,
        })
    }
}
