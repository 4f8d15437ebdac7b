//! TTS vendor resolution.
//!
//! The configured vendor tag and the raw credentials loaded from the
//! environment are turned into a vendor-tagged [`TtsConfig`] that serializes
//! as `{"vendor": "...", "params": {...}}`. Resolution is pure, so it runs
//! both at startup (fail fast) and for every invitation.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Supported TTS vendors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TtsVendor {
    Microsoft,
    ElevenLabs,
}

impl TtsVendor {
    pub fn as_str(&self) -> &'static str {
        match self {
            TtsVendor::Microsoft => "microsoft",
            TtsVendor::ElevenLabs => "elevenlabs",
        }
    }
}

impl fmt::Display for TtsVendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TtsVendor {
    type Err = TtsConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "microsoft" => Ok(TtsVendor::Microsoft),
            "elevenlabs" => Ok(TtsVendor::ElevenLabs),
            _ => Err(TtsConfigError::UnsupportedVendor(s.to_string())),
        }
    }
}

/// Errors produced while resolving the TTS configuration
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TtsConfigError {
    #[error("unsupported TTS vendor: {0}")]
    UnsupportedVendor(String),

    #[error("missing {0} TTS configuration")]
    MissingConfiguration(TtsVendor),

    #[error("missing {vendor} TTS configuration: {field} is empty")]
    MissingField {
        vendor: TtsVendor,
        field: &'static str,
    },

    #[error("invalid rate value: {0}")]
    InvalidRate(String),

    #[error("invalid volume value: {0}")]
    InvalidVolume(String),
}

/// Microsoft Azure TTS credentials as loaded from configuration.
///
/// `rate` and `volume` stay strings here and are parsed during resolution.
#[derive(Debug, Clone, Default, PartialEq, Zeroize, ZeroizeOnDrop)]
pub struct MicrosoftTtsCredentials {
    pub key: String,
    pub region: String,
    pub voice_name: String,
    pub rate: String,
    pub volume: String,
}

/// ElevenLabs TTS credentials as loaded from configuration
#[derive(Debug, Clone, Default, PartialEq, Zeroize, ZeroizeOnDrop)]
pub struct ElevenLabsTtsCredentials {
    pub api_key: String,
    pub voice_id: String,
    pub model_id: String,
}

/// Credential blocks available to the resolver.
///
/// A block is present when its vendor's key was configured; only the block
/// matching the selected vendor is consulted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TtsCredentials {
    pub microsoft: Option<MicrosoftTtsCredentials>,
    pub elevenlabs: Option<ElevenLabsTtsCredentials>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MicrosoftTtsParams {
    pub key: String,
    pub region: String,
    pub voice_name: String,
    pub rate: f64,
    pub volume: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ElevenLabsTtsParams {
    pub api_key: String,
    pub model_id: String,
    pub voice_id: String,
}

/// Vendor-tagged TTS block of the agent start request
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "vendor", content = "params", rename_all = "lowercase")]
pub enum TtsConfig {
    Microsoft(MicrosoftTtsParams),
    ElevenLabs(ElevenLabsTtsParams),
}

impl TtsConfig {
    pub fn vendor(&self) -> TtsVendor {
        match self {
            TtsConfig::Microsoft(_) => TtsVendor::Microsoft,
            TtsConfig::ElevenLabs(_) => TtsVendor::ElevenLabs,
        }
    }

    /// Copy with secrets masked, for logging
    pub fn redacted(&self) -> Self {
        match self {
            TtsConfig::Microsoft(params) => TtsConfig::Microsoft(MicrosoftTtsParams {
                key: REDACTED.to_string(),
                ..params.clone()
            }),
            TtsConfig::ElevenLabs(params) => TtsConfig::ElevenLabs(ElevenLabsTtsParams {
                api_key: REDACTED.to_string(),
                ..params.clone()
            }),
        }
    }
}

pub(crate) const REDACTED: &str = "***";

fn require(value: &str, vendor: TtsVendor, field: &'static str) -> Result<(), TtsConfigError> {
    if value.is_empty() {
        return Err(TtsConfigError::MissingField { vendor, field });
    }
    Ok(())
}

/// Resolve the TTS block for `vendor` from the configured credentials.
///
/// Fails if the vendor is unknown, its credential block is absent, any
/// required field is empty, or Microsoft's rate/volume are not numbers.
pub fn resolve_tts_config(
    vendor: &str,
    credentials: &TtsCredentials,
) -> Result<TtsConfig, TtsConfigError> {
    match vendor.parse::<TtsVendor>()? {
        TtsVendor::Microsoft => {
            let vendor = TtsVendor::Microsoft;
            let creds = credentials
                .microsoft
                .as_ref()
                .ok_or(TtsConfigError::MissingConfiguration(vendor))?;

            require(&creds.key, vendor, "key")?;
            require(&creds.region, vendor, "region")?;
            require(&creds.voice_name, vendor, "voice_name")?;
            require(&creds.rate, vendor, "rate")?;
            require(&creds.volume, vendor, "volume")?;

            let rate = parse_finite(&creds.rate).map_err(TtsConfigError::InvalidRate)?;
            let volume = parse_finite(&creds.volume).map_err(TtsConfigError::InvalidVolume)?;

            Ok(TtsConfig::Microsoft(MicrosoftTtsParams {
                key: creds.key.clone(),
                region: creds.region.clone(),
                voice_name: creds.voice_name.clone(),
                rate,
                volume,
            }))
        }
        TtsVendor::ElevenLabs => {
            let vendor = TtsVendor::ElevenLabs;
            let creds = credentials
                .elevenlabs
                .as_ref()
                .ok_or(TtsConfigError::MissingConfiguration(vendor))?;

            require(&creds.api_key, vendor, "api_key")?;
            require(&creds.voice_id, vendor, "voice_id")?;
            require(&creds.model_id, vendor, "model_id")?;

            Ok(TtsConfig::ElevenLabs(ElevenLabsTtsParams {
                api_key: creds.api_key.clone(),
                model_id: creds.model_id.clone(),
                voice_id: creds.voice_id.clone(),
            }))
        }
    }
}

/// `NaN` and infinities parse as `f64` but serialize to `null`.
fn parse_finite(raw: &str) -> Result<f64, String> {
    let value = raw.parse::<f64>().map_err(|e| format!("{raw:?}: {e}"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("{raw:?}: not a finite number"))
    }
}
