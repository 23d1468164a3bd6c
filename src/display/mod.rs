//! Display module
//!
//! This module contains the display adapter seam the countdown engine writes
//! to, and the terminal split-flap board that implements it.

pub mod board;
pub mod theme;

use std::fmt;

use serde::{Deserialize, Serialize};

// Re-export main types
pub use board::FlapBoard;
pub use theme::Theme;

/// Time unit shown on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl Unit {
    pub const ALL: [Unit; 4] = [Unit::Days, Unit::Hours, Unit::Minutes, Unit::Seconds];

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Days => "days",
            Unit::Hours => "hours",
            Unit::Minutes => "minutes",
            Unit::Seconds => "seconds",
        }
    }
}

/// Position of a digit within a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigitPosition {
    Tens,
    Ones,
}

impl DigitPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            DigitPosition::Tens => "tens",
            DigitPosition::Ones => "ones",
        }
    }
}

/// One of the eight addressable digit slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DigitSlot {
    pub unit: Unit,
    pub position: DigitPosition,
}

impl DigitSlot {
    pub fn new(unit: Unit, position: DigitPosition) -> Self {
        Self { unit, position }
    }

    /// All slots in board order
    pub fn all() -> impl Iterator<Item = DigitSlot> {
        Unit::ALL.into_iter().flat_map(|unit| {
            [DigitPosition::Tens, DigitPosition::Ones]
                .into_iter()
                .map(move |position| DigitSlot::new(unit, position))
        })
    }

    /// Dense index in `0..8`, matching [`DigitSlot::all`] order
    pub fn index(&self) -> usize {
        let unit = match self.unit {
            Unit::Days => 0,
            Unit::Hours => 1,
            Unit::Minutes => 2,
            Unit::Seconds => 3,
        };
        let position = match self.position {
            DigitPosition::Tens => 0,
            DigitPosition::Ones => 1,
        };
        unit * 2 + position
    }
}

impl fmt::Display for DigitSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.unit.as_str(), self.position.as_str())
    }
}

/// Rendering surface the countdown engine pushes digit updates to.
///
/// Digits are not clamped to `0..=9`: the tens value of a unit is
/// `value / 10`, which exceeds nine once a countdown runs past 99 days.
pub trait DisplayAdapter: Send {
    /// Digit currently shown in a slot, or `None` if the slot does not exist
    fn read_digit(&self, slot: DigitSlot) -> Option<u64>;

    /// Replace the digit shown in a slot
    fn write_digit(&mut self, slot: DigitSlot, value: u64);

    fn set_title(&mut self, _title: &str) {}

    /// Styling sink, only called for non-default themes
    fn apply_theme(&mut self, _theme: &str) {}

    fn mark_completed(&mut self) {}

    /// Frame boundary, called once at the end of every tick
    fn present(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_are_dense_and_ordered() {
        let slots: Vec<DigitSlot> = DigitSlot::all().collect();
        assert_eq!(slots.len(), 8);
        for (i, slot) in slots.iter().enumerate() {
            assert_eq!(slot.index(), i);
        }
    }

    #[test]
    fn slot_identifiers() {
        let slot = DigitSlot::new(Unit::Minutes, DigitPosition::Tens);
        assert_eq!(slot.to_string(), "minutes-tens");
    }
}
