//! Countdown engine: remaining-time computation and change-driven digit updates

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::Clock;
use crate::display::{DigitPosition, DigitSlot, DisplayAdapter, Unit};
use crate::state::{Configuration, EngineSnapshot, Phase, RemainingDuration};

/// One-time completion notification, handed the original target
pub type CompletionCallback = Box<dyn FnOnce(DateTime<Utc>) + Send>;

/// Drives a display adapter towards a target instant.
///
/// The engine is synchronous; scheduling ticks is the caller's job (see
/// [`crate::tasks::countdown_task`]). `previous` always holds the last
/// duration pushed to the display.
pub struct CountdownEngine<D: DisplayAdapter> {
    config: Configuration,
    display: D,
    clock: Arc<dyn Clock>,
    previous: RemainingDuration,
    phase: Phase,
    ticks: u64,
    on_complete: Option<CompletionCallback>,
}

impl<D: DisplayAdapter> CountdownEngine<D> {
    pub fn new<F>(config: Configuration, display: D, clock: Arc<dyn Clock>, on_complete: F) -> Self
    where
        F: FnOnce(DateTime<Utc>) + Send + 'static,
    {
        Self {
            config,
            display,
            clock,
            previous: RemainingDuration::ZERO,
            phase: Phase::NotStarted,
            ticks: 0,
            on_complete: Some(Box::new(on_complete)),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn previous(&self) -> RemainingDuration {
        self.previous
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Bind title and theme to the display, then tick once
    pub fn start(&mut self) -> Phase {
        if self.phase != Phase::NotStarted {
            debug!("Countdown already started ({:?}), ignoring start", self.phase);
            return self.phase;
        }

        info!("Starting countdown to {}", self.config.target.to_rfc3339());
        self.display.set_title(&self.config.title);
        if self.config.has_custom_theme() {
            self.display.apply_theme(&self.config.theme);
        }

        self.phase = Phase::Running;
        self.tick()
    }

    /// Recompute the remaining time and push changed units to the display.
    ///
    /// A no-op before start and once completed or stopped.
    pub fn tick(&mut self) -> Phase {
        if self.phase == Phase::NotStarted || self.phase.is_terminal() {
            return self.phase;
        }

        self.ticks += 1;
        let now = self.clock.now();
        let remaining_ms = (self.config.target - now).num_milliseconds();

        if remaining_ms <= 0 {
            self.show(RemainingDuration::ZERO);
            self.display.mark_completed();
            self.display.present();
            self.complete();
            return self.phase;
        }

        let remaining = RemainingDuration::from_millis(remaining_ms);
        debug!(
            "Tick {}: {}d {}h {}m {}s remaining",
            self.ticks, remaining.days, remaining.hours, remaining.minutes, remaining.seconds
        );
        self.show(remaining);
        self.display.present();
        self.phase
    }

    /// Explicit teardown. Safe to call any number of times.
    pub fn stop(&mut self) {
        if self.phase.is_terminal() {
            return;
        }

        info!("Stopping countdown");
        self.phase = Phase::Stopped;
    }

    /// Page hidden. Returns true if the engine was running.
    pub fn suspend(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }

        debug!("Countdown suspended");
        self.phase = Phase::Suspended;
        true
    }

    /// Page visible again: tick immediately. Returns the resulting phase.
    pub fn resume(&mut self) -> Phase {
        if self.phase != Phase::Suspended {
            return self.phase;
        }

        debug!("Countdown resumed");
        self.phase = Phase::Running;
        self.tick()
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            phase: self.phase,
            remaining: self.previous,
            target: self.config.target,
            title: self.config.title.clone(),
            timezone: self.config.timezone.clone(),
            theme: self.config.theme.clone(),
            ticks: self.ticks,
        }
    }

    fn complete(&mut self) {
        self.phase = Phase::Completed;
        if let Some(on_complete) = self.on_complete.take() {
            info!("Countdown to {} complete", self.config.target.to_rfc3339());
            on_complete(self.config.target);
        }
    }

    fn show(&mut self, current: RemainingDuration) {
        for unit in Unit::ALL {
            let value = current.get(unit);
            if value != self.previous.get(unit) {
                self.update_unit_digit(unit, DigitPosition::Tens, value / 10);
                self.update_unit_digit(unit, DigitPosition::Ones, value % 10);
            }
        }

        self.previous = current;
    }

    fn update_unit_digit(&mut self, unit: Unit, position: DigitPosition, value: u64) {
        let slot = DigitSlot::new(unit, position);
        match self.display.read_digit(slot) {
            None => debug!("Display has no {} slot, skipping", slot),
            Some(shown) if shown == value => {}
            Some(_) => self.display.write_digit(slot, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ManualClock;
    use chrono::{Duration, TimeZone};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Display that records every write
    #[derive(Default)]
    struct RecordingDisplay {
        digits: HashMap<DigitSlot, u64>,
        writes: Vec<(DigitSlot, u64)>,
        completed: bool,
        title: String,
        theme: Option<String>,
    }

    impl RecordingDisplay {
        fn full() -> Self {
            Self {
                digits: DigitSlot::all().map(|slot| (slot, 0)).collect(),
                ..Self::default()
            }
        }

        fn without(mut self, slot: DigitSlot) -> Self {
            self.digits.remove(&slot);
            self
        }

        fn writes_for(&self, unit: Unit) -> Vec<(DigitPosition, u64)> {
            self.writes
                .iter()
                .filter(|(slot, _)| slot.unit == unit)
                .map(|(slot, value)| (slot.position, *value))
                .collect()
        }
    }

    impl DisplayAdapter for RecordingDisplay {
        fn read_digit(&self, slot: DigitSlot) -> Option<u64> {
            self.digits.get(&slot).copied()
        }

        fn write_digit(&mut self, slot: DigitSlot, value: u64) {
            self.writes.push((slot, value));
            self.digits.insert(slot, value);
        }

        fn set_title(&mut self, title: &str) {
            self.title = title.to_string();
        }

        fn apply_theme(&mut self, theme: &str) {
            self.theme = Some(theme.to_string());
        }

        fn mark_completed(&mut self) {
            self.completed = true;
        }
    }

    fn start_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
    }

    fn config(target: DateTime<Utc>, theme: &str) -> Configuration {
        Configuration {
            target,
            timezone: "UTC".to_string(),
            title: "Departure".to_string(),
            theme: theme.to_string(),
        }
    }

    fn engine_at(
        offset: Duration,
        display: RecordingDisplay,
    ) -> (CountdownEngine<RecordingDisplay>, ManualClock, Arc<AtomicUsize>) {
        let clock = ManualClock::new(start_instant());
        let completions = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&completions);
        let engine = CountdownEngine::new(
            config(start_instant() + offset, "default"),
            display,
            Arc::new(clock.clone()),
            move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            },
        );
        (engine, clock, completions)
    }

    #[test]
    fn pushes_tens_and_ones_for_each_changed_unit() {
        let (mut engine, _, _) = engine_at(Duration::milliseconds(90_061_000), RecordingDisplay::full());

        assert_eq!(engine.start(), Phase::Running);
        assert_eq!(engine.previous(), RemainingDuration::new(1, 1, 1, 1));

        for unit in Unit::ALL {
            // The tens slot already shows 0, so only the ones digit is written
            assert_eq!(engine.display().writes_for(unit), vec![(DigitPosition::Ones, 1)]);
            assert_eq!(
                engine.display().read_digit(DigitSlot::new(unit, DigitPosition::Tens)),
                Some(0)
            );
        }
        assert_eq!(engine.display().title, "Departure");
        assert_eq!(engine.display().theme, None);
    }

    #[test]
    fn unchanged_units_are_not_written() {
        let (mut engine, clock, _) = engine_at(Duration::seconds(3 * 3_600 + 25 * 60 + 45), RecordingDisplay::full());
        engine.start();
        let writes_after_start = engine.display().writes.len();

        clock.advance(Duration::seconds(1));
        engine.tick();

        let new_writes = &engine.display().writes[writes_after_start..];
        assert_eq!(
            new_writes,
            &[(DigitSlot::new(Unit::Seconds, DigitPosition::Ones), 4)]
        );
        assert_eq!(engine.previous(), RemainingDuration::new(0, 3, 25, 44));
    }

    #[test]
    fn large_day_counts_keep_whole_tens() {
        let (mut engine, _, _) = engine_at(Duration::days(365), RecordingDisplay::full());
        engine.start();

        assert_eq!(
            engine.display().writes_for(Unit::Days),
            vec![(DigitPosition::Tens, 36), (DigitPosition::Ones, 5)]
        );
    }

    #[test]
    fn expired_target_completes_exactly_once() {
        let (mut engine, clock, completions) = engine_at(Duration::seconds(2), RecordingDisplay::full());
        engine.start();

        clock.advance(Duration::seconds(2));
        assert_eq!(engine.tick(), Phase::Completed);
        assert_eq!(engine.previous(), RemainingDuration::ZERO);
        assert!(engine.display().completed);
        assert_eq!(completions.load(Ordering::SeqCst), 1);

        clock.advance(Duration::seconds(5));
        assert_eq!(engine.tick(), Phase::Completed);
        engine.stop();
        assert_eq!(engine.phase(), Phase::Completed);
        assert_eq!(completions.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn past_target_completes_on_start() {
        let (mut engine, _, completions) = engine_at(Duration::seconds(-30), RecordingDisplay::full());

        assert_eq!(engine.start(), Phase::Completed);
        assert!(engine.display().writes.is_empty());
        assert_eq!(completions.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn completion_carries_the_target() {
        let target = start_instant();
        let (sender, receiver) = std::sync::mpsc::channel();
        let mut engine = CountdownEngine::new(
            config(target, "default"),
            RecordingDisplay::full(),
            Arc::new(ManualClock::new(target)),
            move |fired| {
                let _ = sender.send(fired);
            },
        );

        engine.start();
        assert_eq!(receiver.try_recv(), Ok(target));
    }

    #[test]
    fn final_countdown_to_zero_clears_digits() {
        let (mut engine, clock, _) = engine_at(Duration::seconds(12), RecordingDisplay::full());
        engine.start();

        clock.advance(Duration::seconds(12));
        engine.tick();

        let seconds = engine.display().writes_for(Unit::Seconds);
        assert_eq!(
            seconds,
            vec![
                (DigitPosition::Tens, 1),
                (DigitPosition::Ones, 2),
                (DigitPosition::Tens, 0),
                (DigitPosition::Ones, 0),
            ]
        );
    }

    #[test]
    fn missing_slots_are_skipped() {
        let display = RecordingDisplay::full().without(DigitSlot::new(Unit::Hours, DigitPosition::Ones));
        let (mut engine, _, _) = engine_at(Duration::seconds(5 * 3_600 + 7), display);
        engine.start();

        assert!(engine.display().writes_for(Unit::Hours).is_empty());
        assert_eq!(engine.display().writes_for(Unit::Seconds), vec![(DigitPosition::Ones, 7)]);
        assert_eq!(engine.previous().hours, 5);
    }

    #[test]
    fn shown_digit_suppresses_write() {
        let mut display = RecordingDisplay::full();
        display.digits.insert(DigitSlot::new(Unit::Minutes, DigitPosition::Ones), 4);
        let (mut engine, _, _) = engine_at(Duration::seconds(4 * 60), display);
        engine.start();

        assert!(engine.display().writes_for(Unit::Minutes).is_empty());
    }

    #[test]
    fn suspend_and_resume_tick_against_wall_clock() {
        let (mut engine, clock, _) = engine_at(Duration::seconds(600), RecordingDisplay::full());
        engine.start();

        assert!(engine.suspend());
        assert_eq!(engine.phase(), Phase::Suspended);
        assert!(!engine.suspend());

        clock.advance(Duration::seconds(125));
        assert_eq!(engine.resume(), Phase::Running);
        assert_eq!(engine.previous(), RemainingDuration::new(0, 0, 7, 55));
    }

    #[test]
    fn resume_after_expiry_completes() {
        let (mut engine, clock, completions) = engine_at(Duration::seconds(10), RecordingDisplay::full());
        engine.start();
        engine.suspend();

        clock.advance(Duration::seconds(60));
        assert_eq!(engine.resume(), Phase::Completed);
        assert_eq!(completions.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn stop_is_idempotent_and_final() {
        let (mut engine, clock, completions) = engine_at(Duration::seconds(10), RecordingDisplay::full());
        engine.start();

        engine.stop();
        engine.stop();
        assert_eq!(engine.phase(), Phase::Stopped);

        clock.advance(Duration::seconds(60));
        assert_eq!(engine.tick(), Phase::Stopped);
        assert_eq!(engine.resume(), Phase::Stopped);
        assert_eq!(completions.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn tick_before_start_does_nothing() {
        let (mut engine, _, _) = engine_at(Duration::seconds(10), RecordingDisplay::full());

        assert_eq!(engine.tick(), Phase::NotStarted);
        assert!(engine.display().writes.is_empty());
        assert_eq!(engine.snapshot().ticks, 0);
    }

    #[test]
    fn custom_theme_reaches_display() {
        let clock = ManualClock::new(start_instant());
        let mut engine = CountdownEngine::new(
            config(start_instant() + Duration::hours(1), "neon"),
            RecordingDisplay::full(),
            Arc::new(clock),
            |_| {},
        );
        engine.start();

        assert_eq!(engine.display().theme.as_deref(), Some("neon"));
        assert_eq!(engine.snapshot().remaining, RemainingDuration::new(0, 1, 0, 0));
    }

    #[test]
    fn remaining_seconds_match_floored_difference() {
        for offset_ms in [1_001_i64, 59_999, 3_600_500, 86_399_999, 1_000_000_007] {
            let (mut engine, _, _) = engine_at(Duration::milliseconds(offset_ms), RecordingDisplay::full());
            engine.start();
            assert_eq!(
                engine.previous().total_seconds() as i64,
                offset_ms / 1_000,
                "offset_ms = {}",
                offset_ms
            );
        }
    }
}
