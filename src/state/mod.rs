//! State management module
//!
//! This module contains the countdown data model: the resolved configuration,
//! the remaining duration, the engine lifecycle and the shared application state.

pub mod app_state;
pub mod engine_state;
pub mod remaining;
pub mod target;

// Re-export main types
pub use app_state::{AppState, TaskChannels};
pub use engine_state::{EngineSnapshot, Phase};
pub use remaining::RemainingDuration;
pub use target::Configuration;
