//! Countdown lifecycle phase and observable snapshot

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Configuration, RemainingDuration};

/// Lifecycle of a countdown engine
///
/// `NotStarted -> Running <-> Suspended -> Completed`, plus
/// `Running -> Stopped` on explicit teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    NotStarted,
    Running,
    Suspended,
    Completed,
    Stopped,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Completed | Phase::Stopped)
    }
}

/// Point-in-time view of an engine for observers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub phase: Phase,
    pub remaining: RemainingDuration,
    pub target: DateTime<Utc>,
    pub title: String,
    pub timezone: String,
    pub theme: String,
    pub ticks: u64,
}

impl EngineSnapshot {
    /// Snapshot of an engine that has not ticked yet
    pub fn not_started(config: &Configuration) -> Self {
        Self {
            phase: Phase::NotStarted,
            remaining: RemainingDuration::ZERO,
            target: config.target,
            title: config.title.clone(),
            timezone: config.timezone.clone(),
            theme: config.theme.clone(),
            ticks: 0,
        }
    }
}
