//! Terminal split-flap board

use std::io::Write;

use tracing::warn;

use super::{DigitPosition, DigitSlot, DisplayAdapter, Theme, Unit};

/// Split-flap style board drawn as a single refreshing terminal line
pub struct FlapBoard<W: Write + Send> {
    out: W,
    digits: [Option<u64>; 8],
    title: String,
    theme: Theme,
    completed: bool,
    write_failed: bool,
}

impl<W: Write + Send> FlapBoard<W> {
    /// Create a board with all eight slots showing zero
    pub fn new(out: W) -> Self {
        Self {
            out,
            digits: [Some(0); 8],
            title: String::new(),
            theme: Theme::default(),
            completed: false,
            write_failed: false,
        }
    }

    /// Remove a slot from the board, as a partial layout would
    pub fn without_slot(mut self, slot: DigitSlot) -> Self {
        self.digits[slot.index()] = None;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Board contents without the leading carriage return
    pub fn render(&self) -> String {
        let mut line = String::new();
        line.push_str(self.theme.style());

        if !self.title.is_empty() {
            line.push_str(&self.title);
            line.push_str("  ");
        }

        let cells: Vec<String> = Unit::ALL
            .iter()
            .map(|unit| {
                let tens = self.digits[DigitSlot::new(*unit, DigitPosition::Tens).index()];
                let ones = self.digits[DigitSlot::new(*unit, DigitPosition::Ones).index()];
                format!(
                    "[{}|{}] {}",
                    flap(tens),
                    flap(ones),
                    unit.as_str().to_uppercase()
                )
            })
            .collect();
        line.push_str(&cells.join("  "));

        if self.completed {
            line.push_str("  ** ARRIVED **");
        }

        line.push_str(self.theme.reset());
        line
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn flap(digit: Option<u64>) -> String {
    match digit {
        Some(value) => value.to_string(),
        None => " ".to_string(),
    }
}

impl<W: Write + Send> DisplayAdapter for FlapBoard<W> {
    fn read_digit(&self, slot: DigitSlot) -> Option<u64> {
        self.digits[slot.index()]
    }

    fn write_digit(&mut self, slot: DigitSlot, value: u64) {
        if let Some(digit) = self.digits[slot.index()].as_mut() {
            *digit = value;
        }
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn apply_theme(&mut self, theme: &str) {
        self.theme = Theme::from_name(theme);
    }

    fn mark_completed(&mut self) {
        self.completed = true;
    }

    fn present(&mut self) {
        let line = self.render();
        let result = write!(self.out, "\r{}\x1b[K", line).and_then(|_| self.out.flush());

        if let Err(e) = result {
            if !self.write_failed {
                warn!("Failed to draw board: {}", e);
                self.write_failed = true;
            }
        }
    }
}
