//! HTTP request handlers
//!
//! This module organizes all API handlers into logical groups:
//! - `api` - Liveness endpoint
//! - `agent` - Agent invitation and removal
//! - `token` - RTC token issuance

pub mod agent;
pub mod api;
pub mod token;

// Re-export commonly used handlers for convenient access
pub use agent::{invite_agent, remove_agent};
pub use api::ping;
pub use token::get_new_token;
