//! AccessToken2 ("007") builder for RTC tokens.
//!
//! Layout of the token body before compression:
//!
//! ```text
//! signature: u16 len + bytes
//! app_id:    u16 len + bytes
//! issue_ts:  u32
//! expire:    u32
//! salt:      u32
//! services:  u16 count + packed services (sorted by service type)
//! ```
//!
//! All integers are little-endian. The body is zlib-compressed and base64
//! encoded behind the version prefix.

use std::collections::BTreeMap;
use std::io::Write;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;

use super::TokenError;

type HmacSha256 = Hmac<Sha256>;

pub const VERSION: &str = "007";

const SERVICE_TYPE_RTC: u16 = 1;

pub const PRIVILEGE_JOIN_CHANNEL: u16 = 1;
pub const PRIVILEGE_PUBLISH_AUDIO_STREAM: u16 = 2;
pub const PRIVILEGE_PUBLISH_VIDEO_STREAM: u16 = 3;
pub const PRIVILEGE_PUBLISH_DATA_STREAM: u16 = 4;

fn pack_u16(buf: &mut Vec<u8>, value: u16) {
    buf.extend_from_slice(&value.to_le_bytes());
}

fn pack_u32(buf: &mut Vec<u8>, value: u32) {
    buf.extend_from_slice(&value.to_le_bytes());
}

fn pack_bytes(buf: &mut Vec<u8>, value: &[u8]) -> Result<(), TokenError> {
    let len = u16::try_from(value.len())
        .map_err(|_| TokenError::Signing(format!("field too long: {} bytes", value.len())))?;
    pack_u16(buf, len);
    buf.extend_from_slice(value);
    Ok(())
}

fn pack_privileges(buf: &mut Vec<u8>, privileges: &BTreeMap<u16, u32>) {
    pack_u16(buf, privileges.len() as u16);
    for (privilege, expire) in privileges {
        pack_u16(buf, *privilege);
        pack_u32(buf, *expire);
    }
}

fn hmac_sha256(key: &[u8], message: &[u8]) -> Result<Vec<u8>, TokenError> {
    let mut mac =
        HmacSha256::new_from_slice(key).map_err(|e| TokenError::Signing(e.to_string()))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// 32 hex characters, the shape of app ids and certificates
fn is_hex_id(value: &str) -> bool {
    value.len() == 32 && value.chars().all(|c| c.is_ascii_hexdigit())
}

/// RTC service grant: channel, user and per-privilege expirations
#[derive(Debug, Clone, PartialEq)]
pub struct RtcService {
    channel_name: String,
    uid: String,
    privileges: BTreeMap<u16, u32>,
}

impl RtcService {
    /// `uid` is packed verbatim; pass `""` for the wildcard user.
    pub fn new(channel_name: impl Into<String>, uid: impl Into<String>) -> Self {
        Self {
            channel_name: channel_name.into(),
            uid: uid.into(),
            privileges: BTreeMap::new(),
        }
    }

    pub fn add_privilege(&mut self, privilege: u16, expire_secs: u32) {
        self.privileges.insert(privilege, expire_secs);
    }

    fn pack(&self, buf: &mut Vec<u8>) -> Result<(), TokenError> {
        pack_u16(buf, SERVICE_TYPE_RTC);
        pack_privileges(buf, &self.privileges);
        pack_bytes(buf, self.channel_name.as_bytes())?;
        pack_bytes(buf, self.uid.as_bytes())
    }
}

/// Builder for a single AccessToken2
pub struct AccessToken<'a> {
    app_id: &'a str,
    app_certificate: &'a str,
    issue_ts: u32,
    expire_secs: u32,
    salt: u32,
    services: Vec<RtcService>,
}

impl<'a> AccessToken<'a> {
    /// New token valid for `expire_secs` from now, with a random salt
    pub fn new(app_id: &'a str, app_certificate: &'a str, expire_secs: u32) -> Self {
        let issue_ts = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs() as u32)
            .unwrap_or_default();

        Self {
            app_id,
            app_certificate,
            issue_ts,
            expire_secs,
            salt: rand::thread_rng().gen_range(1..=99_999_999),
            services: Vec::new(),
        }
    }

    /// Pin issue time and salt so output is reproducible
    pub fn with_issue_ts_and_salt(mut self, issue_ts: u32, salt: u32) -> Self {
        self.issue_ts = issue_ts;
        self.salt = salt;
        self
    }

    pub fn add_service(&mut self, service: RtcService) {
        self.services.push(service);
    }

    fn signing_key(&self) -> Result<Vec<u8>, TokenError> {
        let key = hmac_sha256(&self.issue_ts.to_le_bytes(), self.app_certificate.as_bytes())?;
        hmac_sha256(&self.salt.to_le_bytes(), &key)
    }

    fn signing_info(&self) -> Result<Vec<u8>, TokenError> {
        let mut info = Vec::with_capacity(128);
        pack_bytes(&mut info, self.app_id.as_bytes())?;
        pack_u32(&mut info, self.issue_ts);
        pack_u32(&mut info, self.expire_secs);
        pack_u32(&mut info, self.salt);
        pack_u16(&mut info, self.services.len() as u16);
        for service in &self.services {
            service.pack(&mut info)?;
        }
        Ok(info)
    }

    /// Sign, compress and encode the token
    pub fn build(&self) -> Result<String, TokenError> {
        if !is_hex_id(self.app_id) {
            return Err(TokenError::InvalidAppId);
        }
        if !is_hex_id(self.app_certificate) {
            return Err(TokenError::InvalidAppCertificate);
        }

        let info = self.signing_info()?;
        let signature = hmac_sha256(&self.signing_key()?, &info)?;

        let mut content = Vec::with_capacity(info.len() + signature.len() + 2);
        pack_bytes(&mut content, &signature)?;
        content.extend_from_slice(&info);

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&content)?;
        let compressed = encoder.finish()?;

        Ok(format!("{VERSION}{}", STANDARD.encode(compressed)))
    }
}
