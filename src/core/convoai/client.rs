//! HTTP client for the agent platform's lifecycle endpoints

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::StatusCode;
use tracing::{debug, info, warn};

use super::error::{ConvoAIError, ConvoAIResult};
use super::types::{
    AgentStatus, InviteAgentResponse, JoinResponse, RemoveAgentResponse, StartAgentRequest,
};
use crate::config::ServerConfig;

pub const JOIN_TIMEOUT: Duration = Duration::from_secs(30);
pub const LEAVE_TIMEOUT: Duration = Duration::from_secs(10);

/// Remote service that runs agents.
///
/// The service layer only talks to the platform through this trait.
#[async_trait]
pub trait AgentPlatform: Send + Sync {
    /// Start an agent session
    async fn join(&self, request: &StartAgentRequest) -> ConvoAIResult<InviteAgentResponse>;

    /// Stop a running agent
    async fn leave(&self, agent_id: &str) -> ConvoAIResult<RemoveAgentResponse>;
}

/// `Basic` authorization header value for the customer credentials
pub fn basic_auth(customer_id: &str, customer_secret: &str) -> String {
    format!(
        "Basic {}",
        STANDARD.encode(format!("{customer_id}:{customer_secret}"))
    )
}

fn unix_now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}

/// reqwest-backed [`AgentPlatform`]
pub struct AgentLifecycleClient {
    client: reqwest::Client,
    base_url: String,
    app_id: String,
    authorization: String,
    join_timeout: Duration,
    leave_timeout: Duration,
}

impl AgentLifecycleClient {
    pub fn new(
        base_url: impl Into<String>,
        app_id: impl Into<String>,
        customer_id: &str,
        customer_secret: &str,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            app_id: app_id.into(),
            authorization: basic_auth(customer_id, customer_secret),
            join_timeout: JOIN_TIMEOUT,
            leave_timeout: LEAVE_TIMEOUT,
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(
            config.platform_base_url(),
            config.app_id.as_str(),
            &config.customer_id,
            &config.customer_secret,
        )
    }

    /// Override the per-call timeouts
    pub fn with_timeouts(mut self, join: Duration, leave: Duration) -> Self {
        self.join_timeout = join;
        self.leave_timeout = leave;
        self
    }

    pub fn join_url(&self) -> ConvoAIResult<String> {
        self.endpoint(&[self.app_id.as_str(), "join"])
    }

    /// The agent id is encoded as a single path segment.
    pub fn leave_url(&self, agent_id: &str) -> ConvoAIResult<String> {
        if agent_id == "." || agent_id == ".." {
            return Err(ConvoAIError::InvalidRequest(format!(
                "invalid agent_id: {agent_id:?}"
            )));
        }
        self.endpoint(&[self.app_id.as_str(), "agents", agent_id, "leave"])
    }

    fn endpoint(&self, segments: &[&str]) -> ConvoAIResult<String> {
        let invalid = |reason: String| ConvoAIError::InvalidUrl {
            url: self.base_url.clone(),
            reason,
        };

        let mut url = reqwest::Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("cannot be a base URL".to_string()))?
            .pop_if_empty()
            .extend(segments);

        Ok(url.into())
    }

    async fn post(
        &self,
        url: &str,
        body: Option<&StartAgentRequest>,
        timeout: Duration,
    ) -> ConvoAIResult<reqwest::Response> {
        let mut request = self
            .client
            .post(url)
            .timeout(timeout)
            .header("Content-Type", "application/json")
            .header("Authorization", &self.authorization);

        if let Some(body) = body {
            request = request.body(serde_json::to_vec(body)?);
        }

        request.send().await.map_err(|e| {
            if e.is_timeout() {
                ConvoAIError::Timeout {
                    url: url.to_string(),
                    timeout,
                }
            } else {
                ConvoAIError::Transport {
                    url: url.to_string(),
                    source: e,
                }
            }
        })
    }
}

#[async_trait]
impl AgentPlatform for AgentLifecycleClient {
    async fn join(&self, request: &StartAgentRequest) -> ConvoAIResult<InviteAgentResponse> {
        let url = self.join_url()?;
        debug!(url = %url, session = %request.name, "Sending join request");

        let response = self.post(&url, Some(request), self.join_timeout).await?;

        let status = response.status();
        let body = response.text().await.map_err(|e| ConvoAIError::Transport {
            url: url.clone(),
            source: e,
        })?;

        if status != StatusCode::OK {
            warn!(status = status.as_u16(), url = %url, "Agent platform rejected join");
            return Err(ConvoAIError::StartFailed {
                status: status.as_u16(),
                body,
                url,
            });
        }

        let joined: JoinResponse = serde_json::from_str(&body)
            .map_err(|e| ConvoAIError::Decode(format!("invalid join response: {e}")))?;

        info!(agent_id = %joined.agent_id, "Agent started");

        Ok(InviteAgentResponse {
            agent_id: joined.agent_id,
            create_ts: unix_now_secs(),
            status: AgentStatus::Running,
        })
    }

    async fn leave(&self, agent_id: &str) -> ConvoAIResult<RemoveAgentResponse> {
        let url = self.leave_url(agent_id)?;
        debug!(url = %url, "Sending leave request");

        let response = self.post(&url, None, self.leave_timeout).await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), agent_id = %agent_id, "Agent platform rejected leave");
            return Err(ConvoAIError::RemoveFailed {
                status: status.as_u16(),
                body,
            });
        }

        info!(agent_id = %agent_id, "Agent removed");

        Ok(RemoveAgentResponse {
            success: true,
            agent_id: agent_id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_auth() {
        // base64("user:pass")
        assert_eq!(basic_auth("user", "pass"), "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn test_urls() {
        let client = AgentLifecycleClient::new("https://api.example.com/", "app123", "id", "secret");
        assert_eq!(client.join_url().unwrap(), "https://api.example.com/app123/join");
        assert_eq!(
            client.leave_url("agent-1").unwrap(),
            "https://api.example.com/app123/agents/agent-1/leave"
        );
    }

    #[test]
    fn test_leave_url_keeps_agent_id_in_one_segment() {
        let client = AgentLifecycleClient::new("https://api.example.com/v2", "app123", "id", "secret");
        assert_eq!(
            client.leave_url("x/../../other/join?q#f").unwrap(),
            "https://api.example.com/v2/app123/agents/x%2F..%2F..%2Fother%2Fjoin%3Fq%23f/leave"
        );

        for dots in [".", ".."] {
            let err = client.leave_url(dots).unwrap_err();
            assert!(err.is_client_error());
        }
    }

    #[test]
    fn test_unparseable_base_url() {
        let client = AgentLifecycleClient::new("not a url", "app123", "id", "secret");
        assert!(matches!(
            client.join_url().unwrap_err(),
            ConvoAIError::InvalidUrl { .. }
        ));
    }

    #[test]
    fn test_default_timeouts() {
        let client = AgentLifecycleClient::new("http://localhost", "app", "id", "secret");
        assert_eq!(client.join_timeout, Duration::from_secs(30));
        assert_eq!(client.leave_timeout, Duration::from_secs(10));

        let client = client.with_timeouts(Duration::from_millis(100), Duration::from_millis(50));
        assert_eq!(client.join_timeout, Duration::from_millis(100));
        assert_eq!(client.leave_timeout, Duration::from_millis(50));
    }
}
