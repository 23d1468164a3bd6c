//! Flapboard - a split-flap style countdown board
//!
//! This library resolves a countdown target from launch parameters, computes
//! the remaining time once per second and pushes only the digits that changed
//! to a display adapter. A small HTTP control surface forwards visibility and
//! teardown events to the running countdown.

pub mod config;
pub mod state;
pub mod display;
pub mod engine;
pub mod tasks;
pub mod api;
pub mod utils;

// Re-export commonly used types
pub use config::{Config, LaunchParams};
pub use state::{AppState, Configuration, RemainingDuration};
pub use display::{DisplayAdapter, FlapBoard};
pub use engine::CountdownEngine;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
