//! Input/output modality handling.
//!
//! Caller-supplied modality lists are passed through untouched; only the
//! configured fallbacks are checked against the known set, at startup.

use std::fmt;
use std::str::FromStr;

/// A medium the agent can consume or produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modality {
    Text,
    Audio,
}

impl Modality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Modality::Text => "text",
            Modality::Audio => "audio",
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Modality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "text" => Ok(Modality::Text),
            "audio" => Ok(Modality::Audio),
            other => Err(format!("unknown modality: {other}")),
        }
    }
}

/// Default input modalities when neither the caller nor the config sets any
pub const DEFAULT_INPUT_MODALITIES: &[&str] = &["text"];

/// Default output modalities when neither the caller nor the config sets any
pub const DEFAULT_OUTPUT_MODALITIES: &[&str] = &["text", "audio"];

/// Resolve the effective modality list.
///
/// Returns `requested` unchanged when it is present and non-empty, otherwise
/// a copy of `fallback`. Elements of `requested` are not validated.
pub fn resolve_modalities(requested: Option<&[String]>, fallback: &[String]) -> Vec<String> {
    match requested {
        Some(values) if !values.is_empty() => values.to_vec(),
        _ => fallback.to_vec(),
    }
}

/// Parse a comma-separated modality list such as `"text, audio"`.
///
/// An empty or blank string yields `Ok(None)` so callers can fall back to
/// defaults. Any unknown entry is an error.
pub fn parse_modality_list(raw: &str) -> Result<Option<Vec<String>>, String> {
    if raw.trim().is_empty() {
        return Ok(None);
    }

    raw.split(',')
        .map(|entry| entry.parse::<Modality>().map(|m| m.as_str().to_string()))
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

pub(crate) fn to_owned_list(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
