//! Runs the daemon in the foreground.
//!
//! Wires the Roblox provider, the snapshot slot, the scheduler and the HTTP
//! server together and keeps them running until SIGTERM/SIGINT.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use rbxpresence_providers::roblox::{RobloxConfig, RobloxProvider};
use rbxpresence_server::{
    HttpServer, Refresher, Scheduler, SchedulerConfig, SchedulerHandle, ServerConfig,
    SignalHandler, SnapshotSlot,
};

use crate::cli::Cli;
use crate::error::CliResult;

/// How long the scheduler gets to finish its current cycle on shutdown.
const SCHEDULER_STOP_TIMEOUT: Duration = Duration::from_secs(5);

/// Starts the daemon and blocks until a shutdown signal is received.
///
/// Every error returned from here happens before the server starts
/// answering requests, except a failure of the server loop itself.
pub async fn run(cli: &Cli) -> CliResult<()> {
    let roblox_config = RobloxConfig::new().with_token(cli.token.as_deref());
    let provider = Arc::new(RobloxProvider::new(roblox_config)?);
    if !provider.is_authenticated() {
        debug!("No token given, upstream requests are anonymous");
    }

    let slot = SnapshotSlot::new();
    let refresher = Arc::new(Refresher::new(provider, cli.user.as_str(), slot.clone())?);

    // Bind before spawning anything so a taken port fails fast.
    let server = HttpServer::bind(&ServerConfig::new(cli.port), slot).await?;

    let signal_handler = SignalHandler::new();
    signal_handler.spawn_listener();

    let scheduler = Scheduler::new(SchedulerConfig::default());
    let scheduler_handle = scheduler.handle();

    let cycle_refresher = refresher.clone();
    let scheduler_task = tokio::spawn(scheduler.run(move || {
        let refresher = cycle_refresher.clone();
        async move { refresher.run_cycle().await }
    }));

    let reload_task = tokio::spawn(forward_reloads(
        signal_handler.reloads(),
        scheduler_handle.clone(),
    ));

    info!(user_id = %refresher.user_id(), port = cli.port, "Starting rbxpresence");
    info!("Server is running: http://localhost:{}", cli.port);

    server
        .run_until_shutdown(signal_handler.shutdown().wait())
        .await?;

    info!("Shutting down...");
    reload_task.abort();
    if let Err(e) = scheduler_handle.stop().await {
        warn!(error = %e, "Failed to send stop command to scheduler");
    }
    match tokio::time::timeout(SCHEDULER_STOP_TIMEOUT, scheduler_task).await {
        Ok(Ok(state)) => info!(
            cycles = state.cycles,
            consecutive_failures = state.consecutive_failures,
            last_sync = ?state.last_sync,
            last_error = ?state.last_error,
            "Scheduler stopped"
        ),
        Ok(Err(e)) => warn!(error = %e, "Scheduler task failed"),
        Err(_) => warn!("Scheduler did not stop in time"),
    }

    info!("rbxpresence stopped");
    Ok(())
}

/// Turns every SIGHUP into an immediate refresh.
async fn forward_reloads(
    mut reloads: tokio::sync::watch::Receiver<u64>,
    scheduler: SchedulerHandle,
) {
    while reloads.changed().await.is_ok() {
        debug!("Refresh requested by signal");
        if scheduler.sync_now().await.is_err() {
            break;
        }
    }
}
