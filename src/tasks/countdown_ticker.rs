//! Countdown ticker background task

use std::time::Duration;

use tokio::{
    sync::{mpsc, watch},
    time::{interval_at, Instant, Interval, MissedTickBehavior},
};
use tracing::{debug, info};

use crate::{
    display::DisplayAdapter,
    engine::CountdownEngine,
    state::{EngineSnapshot, Phase},
};

/// Period between ticks
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Commands from the hosting surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Board no longer visible: cancel the periodic tick
    Hide,
    /// Board visible again: tick now and restart the periodic tick
    Show,
    /// Teardown
    Stop,
}

/// The single periodic timer handle
#[derive(Default)]
struct Schedule {
    interval: Option<Interval>,
}

impl Schedule {
    /// Start a fresh period, cancelling any prior one
    fn arm(&mut self) {
        self.cancel();
        let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
    }

    fn cancel(&mut self) {
        if self.interval.take().is_some() {
            debug!("Tick schedule cancelled");
        }
    }

    /// Wait for the next tick. Never resolves while cancelled.
    async fn next(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending().await,
        }
    }
}

/// Background task that drives a countdown engine once per second.
///
/// Runs until a [`Control::Stop`] arrives or every control sender is dropped,
/// and hands the engine back when done.
pub async fn countdown_task<D: DisplayAdapter>(
    mut engine: CountdownEngine<D>,
    mut control_rx: mpsc::Receiver<Control>,
    snapshot_tx: watch::Sender<EngineSnapshot>,
) -> CountdownEngine<D> {
    info!("Starting countdown task");

    let mut schedule = Schedule::default();
    if engine.start() == Phase::Running {
        schedule.arm();
    }
    snapshot_tx.send_replace(engine.snapshot());

    loop {
        tokio::select! {
            _ = schedule.next() => {
                if engine.tick() != Phase::Running {
                    info!("Countdown finished, cancelling tick schedule");
                    schedule.cancel();
                }
            }

            command = control_rx.recv() => {
                match command {
                    Some(Control::Hide) => {
                        if engine.suspend() {
                            info!("Board hidden, suspending ticks");
                            schedule.cancel();
                        }
                    }
                    Some(Control::Show) => {
                        if engine.phase() == Phase::Suspended {
                            info!("Board visible, resuming ticks");
                            if engine.resume() == Phase::Running {
                                schedule.arm();
                            }
                        }
                    }
                    Some(Control::Stop) | None => {
                        engine.stop();
                        schedule.cancel();
                        snapshot_tx.send_replace(engine.snapshot());
                        break;
                    }
                }
            }
        }

        snapshot_tx.send_replace(engine.snapshot());
    }

    info!("Countdown task stopped");
    engine
}
