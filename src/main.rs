//! Flapboard - a split-flap style countdown board
//!
//! This is the main entry point for the flapboard application.

use std::sync::Arc;
use chrono::{DateTime, Local, Utc};
use tokio::{net::TcpListener, sync::broadcast};
use tracing::{error, info, warn};

use flapboard::{
    api::create_router,
    config::Config,
    display::FlapBoard,
    engine::{CountdownEngine, SystemClock},
    state::{app_state::notify_completion, AppState, Configuration},
    tasks::{countdown_task, Control},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr, the board owns stdout
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(format!("flapboard={},tower_http=info", config.log_level()))
        .init();

    info!("Starting flapboard v{}", env!("CARGO_PKG_VERSION"));

    let configuration = Configuration::resolve(&config.launch_params(), Local::now());
    let (state, channels) = AppState::new(configuration.clone(), config.port, config.host.clone());
    let state = Arc::new(state);
    let mut completion_rx = state.completion_tx.subscribe();

    let completion_tx = state.completion_tx.clone();
    let engine = CountdownEngine::new(
        configuration,
        FlapBoard::new(std::io::stdout()),
        Arc::new(SystemClock),
        move |target| notify_completion(&completion_tx, target),
    );

    let mut countdown = tokio::spawn(countdown_task(engine, channels.control_rx, channels.snapshot_tx));

    if config.no_control {
        info!("Control surface disabled");
    } else {
        let addr = config.address();
        let listener = TcpListener::bind(&addr).await?;
        let app = create_router(Arc::clone(&state));

        info!("Control surface on http://{}", addr);
        info!("  POST /hide   - Suspend ticking (board hidden)");
        info!("  POST /show   - Tick now and resume (board visible)");
        info!("  POST /stop   - Tear the countdown down");
        info!("  GET  /status - Current countdown");
        info!("  GET  /health - Health check");

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                error!("Control surface error: {}", e);
            }
        });
    }

    let finished = tokio::select! {
        result = &mut countdown => {
            if let Err(e) = result {
                error!("Countdown task failed: {}", e);
            }
            true
        }
        target = wait_for_completion(&mut completion_rx), if config.exit_on_complete => {
            info!("Countdown to {} complete, exiting", target.to_rfc3339());
            false
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
            false
        }
    };

    // Same as a page unload: never leave the timer running
    if !finished {
        if let Err(e) = state.send_control(Control::Stop).await {
            warn!("{}", e);
        }
        if let Err(e) = countdown.await {
            error!("Countdown task failed: {}", e);
        }
    }

    println!();
    info!("Flapboard shutdown complete");
    Ok(())
}

/// Resolve with the first completion broadcast
async fn wait_for_completion(completion_rx: &mut broadcast::Receiver<DateTime<Utc>>) -> DateTime<Utc> {
    loop {
        match completion_rx.recv().await {
            Ok(target) => return target,
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!("Missed {} completion notifications", skipped);
            }
            Err(broadcast::error::RecvError::Closed) => std::future::pending::<()>().await,
        }
    }
}
