//! Unix signal handling for the daemon.
//!
//! - SIGTERM/SIGINT: graceful shutdown
//! - SIGHUP: immediate refresh

use tokio::sync::watch;
use tracing::{debug, error, info};

/// Turns OS signals into watch channel updates.
///
/// Shutdown is a latched flag. Reloads are counted so that two SIGHUPs in a
/// row are both observed.
pub struct SignalHandler {
    shutdown_tx: watch::Sender<bool>,
    reload_tx: watch::Sender<u64>,
}

impl Default for SignalHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalHandler {
    /// Creates a handler; nothing is delivered until [`spawn_listener`].
    ///
    /// [`spawn_listener`]: SignalHandler::spawn_listener
    pub fn new() -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        let (reload_tx, _) = watch::channel(0);
        Self {
            shutdown_tx,
            reload_tx,
        }
    }

    /// Spawns the signal listener task.
    ///
    /// If the Unix handlers cannot be installed the error is logged and
    /// only Ctrl+C is honoured.
    #[cfg(unix)]
    pub fn spawn_listener(&self) {
        let shutdown_tx = self.shutdown_tx.clone();
        let reload_tx = self.reload_tx.clone();

        tokio::spawn(async move {
            use tokio::signal::unix::{SignalKind, signal};

            let installed = signal(SignalKind::terminate()).and_then(|term| {
                Ok((
                    term,
                    signal(SignalKind::interrupt())?,
                    signal(SignalKind::hangup())?,
                ))
            });
            let (mut sigterm, mut sigint, mut sighup) = match installed {
                Ok(signals) => signals,
                Err(e) => {
                    error!(error = %e, "Failed to install signal handlers, falling back to Ctrl+C");
                    if tokio::signal::ctrl_c().await.is_ok() {
                        info!("Received Ctrl+C, initiating shutdown");
                        shutdown_tx.send_replace(true);
                    }
                    return;
                }
            };

            loop {
                tokio::select! {
                    _ = sigterm.recv() => {
                        info!("Received SIGTERM, initiating shutdown");
                        break;
                    }
                    _ = sigint.recv() => {
                        info!("Received SIGINT, initiating shutdown");
                        break;
                    }
                    _ = sighup.recv() => {
                        info!("Received SIGHUP, requesting refresh");
                        reload_tx.send_modify(|n| *n = n.wrapping_add(1));
                    }
                }
            }
            shutdown_tx.send_replace(true);

            debug!("Signal listener stopped");
        });
    }

    /// Non-Unix implementation: Ctrl+C only.
    #[cfg(not(unix))]
    pub fn spawn_listener(&self) {
        let shutdown_tx = self.shutdown_tx.clone();

        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Received Ctrl+C, initiating shutdown");
                shutdown_tx.send_replace(true);
            }
        });
    }

    /// Returns a future that completes when a shutdown signal is received.
    pub fn shutdown(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.shutdown_tx.subscribe(),
        }
    }

    /// Returns a receiver whose value changes on every SIGHUP.
    pub fn reloads(&self) -> watch::Receiver<u64> {
        self.reload_tx.subscribe()
    }
}

/// Completes once shutdown has been signaled.
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl ShutdownSignal {
    /// Waits for the shutdown signal.
    ///
    /// Also returns once the handler is dropped, since shutdown can then
    /// never be signaled.
    pub async fn wait(mut self) {
        let _ = self.rx.wait_for(|down| *down).await;
    }
}
