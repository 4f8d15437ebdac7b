//! RTC token issuance.
//!
//! The agent session builder only depends on the [`TokenIssuer`] trait so
//! tests can substitute a stub; [`AgoraTokenIssuer`] is the production
//! implementation backed by [`access_token::AccessToken`].

pub mod access_token;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

use access_token::{
    AccessToken, PRIVILEGE_JOIN_CHANNEL, PRIVILEGE_PUBLISH_AUDIO_STREAM,
    PRIVILEGE_PUBLISH_DATA_STREAM, PRIVILEGE_PUBLISH_VIDEO_STREAM, RtcService,
};

/// Token lifetime used when the caller does not ask for one
pub const DEFAULT_TOKEN_EXPIRE_SECS: u32 = 3600;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("invalid app id: expected 32 hex characters")]
    InvalidAppId,

    #[error("invalid app certificate: expected 32 hex characters")]
    InvalidAppCertificate,

    #[error("channel name is required")]
    MissingChannel,

    #[error("invalid role: {0}")]
    InvalidRole(String),

    #[error("token signing failed: {0}")]
    Signing(String),

    #[error("token compression failed: {0}")]
    Compression(#[from] std::io::Error),
}

/// Role granted inside the RTC channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RtcRole {
    #[default]
    Publisher,
    Subscriber,
}

impl RtcRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            RtcRole::Publisher => "publisher",
            RtcRole::Subscriber => "subscriber",
        }
    }
}

impl fmt::Display for RtcRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RtcRole {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "publisher" => Ok(RtcRole::Publisher),
            "subscriber" => Ok(RtcRole::Subscriber),
            other => Err(TokenError::InvalidRole(other.to_string())),
        }
    }
}

/// Capability to mint RTC access tokens
pub trait TokenIssuer: Send + Sync {
    fn issue_rtc_token(
        &self,
        channel: &str,
        uid: &str,
        role: RtcRole,
        expire_secs: u32,
    ) -> Result<String, TokenError>;
}

/// Issues AccessToken2 tokens signed with the app certificate
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct AgoraTokenIssuer {
    app_id: String,
    app_certificate: String,
}

impl AgoraTokenIssuer {
    pub fn new(app_id: impl Into<String>, app_certificate: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            app_certificate: app_certificate.into(),
        }
    }
}

impl fmt::Debug for AgoraTokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgoraTokenIssuer")
            .field("app_id", &self.app_id)
            .finish_non_exhaustive()
    }
}

/// Packed form of a uid: numeric `0` is the wildcard user and packs as `""`
fn packed_uid(uid: &str) -> String {
    match uid.parse::<u32>() {
        Ok(0) => String::new(),
        Ok(n) => n.to_string(),
        Err(_) => uid.to_string(),
    }
}

impl TokenIssuer for AgoraTokenIssuer {
    fn issue_rtc_token(
        &self,
        channel: &str,
        uid: &str,
        role: RtcRole,
        expire_secs: u32,
    ) -> Result<String, TokenError> {
        if channel.is_empty() {
            return Err(TokenError::MissingChannel);
        }

        let mut service = RtcService::new(channel, packed_uid(uid));
        service.add_privilege(PRIVILEGE_JOIN_CHANNEL, expire_secs);
        if role == RtcRole::Publisher {
            service.add_privilege(PRIVILEGE_PUBLISH_AUDIO_STREAM, expire_secs);
            service.add_privilege(PRIVILEGE_PUBLISH_VIDEO_STREAM, expire_secs);
            service.add_privilege(PRIVILEGE_PUBLISH_DATA_STREAM, expire_secs);
        }

        let mut token = AccessToken::new(&self.app_id, &self.app_certificate, expire_secs);
        token.add_service(service);

        let built = token.build()?;
        tracing::debug!(channel = %channel, role = %role, expire_secs, "Issued RTC token");
        Ok(built)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const APP_ID: &str = "970CA35de60c44645bbae8a215061b33";
    const APP_CERT: &str = "5CFd2fd1755d40ecb72977518be15d3b";

    #[test]
    fn test_packed_uid() {
        assert_eq!(packed_uid("0"), "");
        assert_eq!(packed_uid("123"), "123");
        assert_eq!(packed_uid("user-1"), "user-1");
        assert_eq!(packed_uid(""), "");
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("publisher".parse::<RtcRole>().unwrap(), RtcRole::Publisher);
        assert_eq!("Subscriber".parse::<RtcRole>().unwrap(), RtcRole::Subscriber);
        assert!("admin".parse::<RtcRole>().is_err());
        assert_eq!(RtcRole::default(), RtcRole::Publisher);
    }

    #[test]
    fn test_issue_rtc_token() {
        let issuer = AgoraTokenIssuer::new(APP_ID, APP_CERT);
        let token = issuer
            .issue_rtc_token("test-channel", "0", RtcRole::Publisher, DEFAULT_TOKEN_EXPIRE_SECS)
            .unwrap();
        assert!(token.starts_with(access_token::VERSION));
        assert!(token.len() > 100);
    }

    #[test]
    fn test_issue_rtc_token_requires_channel() {
        let issuer = AgoraTokenIssuer::new(APP_ID, APP_CERT);
        let err = issuer
            .issue_rtc_token("", "0", RtcRole::Publisher, 60)
            .unwrap_err();
        assert!(matches!(err, TokenError::MissingChannel));
    }

    #[test]
    fn test_issue_rtc_token_invalid_credentials() {
        let issuer = AgoraTokenIssuer::new("test-app-id", "test-app-cert");
        let err = issuer
            .issue_rtc_token("test-channel", "0", RtcRole::Publisher, 60)
            .unwrap_err();
        assert!(matches!(err, TokenError::InvalidAppId));
    }

    #[test]
    fn test_debug_hides_certificate() {
        let issuer = AgoraTokenIssuer::new(APP_ID, APP_CERT);
        let debug = format!("{issuer:?}");
        assert!(debug.contains(APP_ID));
        assert!(!debug.contains(APP_CERT));
    }
}
