//! Shared application state for the control surface

use std::time::Instant;

use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, mpsc, watch};
use tracing::warn;

use super::{Configuration, EngineSnapshot};
use crate::tasks::Control;

/// Capacity of the control command queue
const CONTROL_QUEUE: usize = 16;

/// State shared between the control surface and the binary.
///
/// The countdown engine itself is owned by its task; everything here talks
/// to it through channels.
#[derive(Debug)]
pub struct AppState {
    pub configuration: Configuration,
    /// Commands for the countdown task (visibility, teardown)
    pub control_tx: mpsc::Sender<Control>,
    /// Latest engine snapshot published by the countdown task
    pub snapshot_rx: watch::Receiver<EngineSnapshot>,
    /// Completion notifications, carrying the original target
    pub completion_tx: broadcast::Sender<DateTime<Utc>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
}

/// Task-side ends of the channels held by [`AppState`]
#[derive(Debug)]
pub struct TaskChannels {
    pub control_rx: mpsc::Receiver<Control>,
    pub snapshot_tx: watch::Sender<EngineSnapshot>,
}

impl AppState {
    /// Create a new AppState together with the countdown task's channel ends
    pub fn new(configuration: Configuration, port: u16, host: String) -> (Self, TaskChannels) {
        let (control_tx, control_rx) = mpsc::channel(CONTROL_QUEUE);
        let (snapshot_tx, snapshot_rx) = watch::channel(EngineSnapshot::not_started(&configuration));
        let (completion_tx, _) = broadcast::channel(4);

        let state = Self {
            configuration,
            control_tx,
            snapshot_rx,
            completion_tx,
            start_time: Instant::now(),
            port,
            host,
        };

        (state, TaskChannels { control_rx, snapshot_tx })
    }

    /// Forward a command to the countdown task
    pub async fn send_control(&self, control: Control) -> Result<(), String> {
        self.control_tx
            .send(control)
            .await
            .map_err(|e| format!("Countdown task is no longer running: {}", e))
    }

    /// Get the latest engine snapshot
    pub fn snapshot(&self) -> EngineSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Calculate uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}

/// Send a completion on a broadcast channel, tolerating absent listeners
pub fn notify_completion(completion_tx: &broadcast::Sender<DateTime<Utc>>, target: DateTime<Utc>) {
    if let Err(e) = completion_tx.send(target) {
        warn!("No listeners for countdown completion: {}", e);
    }
}
