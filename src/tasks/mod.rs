//! Background tasks module
//!
//! This module contains the countdown task that owns the periodic tick.

pub mod countdown_ticker;

// Re-export main items
pub use countdown_ticker::{countdown_task, Control, TICK_PERIOD};
