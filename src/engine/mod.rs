//! Countdown engine module
//!
//! This module contains the tick/diff logic that turns a target instant into
//! digit updates, and the clock seam it reads time through.

pub mod clock;
pub mod countdown;

// Re-export main types
pub use clock::{Clock, ManualClock, SystemClock};
pub use countdown::{CompletionCallback, CountdownEngine};
