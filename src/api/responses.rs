//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::EngineSnapshot;

/// Response for control endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    /// Snapshot at the time the command was queued
    pub countdown: EngineSnapshot,
}

impl ControlResponse {
    /// Create a new control response
    pub fn accepted(message: String, countdown: EngineSnapshot) -> Self {
        Self {
            status: "accepted".to_string(),
            message,
            timestamp: Utc::now(),
            countdown,
        }
    }
}

/// Status response with the current countdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub countdown: EngineSnapshot,
    pub remaining_seconds: u64,
    pub uptime: String,
    pub port: u16,
    pub host: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
