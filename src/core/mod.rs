pub mod convoai;
pub mod token;

// Re-export commonly used types for convenience
pub use convoai::{
    AgentLifecycleClient, AgentPlatform, ConvoAIError, ConvoAIResult, ConvoAIService,
    InviteAgentRequest, InviteAgentResponse, RemoveAgentRequest, RemoveAgentResponse,
    StartAgentRequest,
};

pub use token::{AgoraTokenIssuer, RtcRole, TokenError, TokenIssuer};
