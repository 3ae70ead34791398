//! Background scheduler for refresh cycles.
//!
//! The scheduler runs one cycle as soon as it starts and then one per fixed
//! interval for as long as it lives. A failed cycle is logged and the next
//! one happens on the normal schedule; there is no backoff. The loop ends
//! when [`SchedulerHandle::stop`] is called or every handle is dropped, and
//! hands back its [`SchedulerState`] for the shutdown log.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Scheduler configuration.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Time between the end of one cycle and the start of the next.
    pub interval: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
        }
    }
}

impl SchedulerConfig {
    /// Creates a new scheduler config with the given interval.
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

/// Commands that can be sent to the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerCommand {
    /// Run a cycle now; the interval restarts afterwards.
    SyncNow,
    /// Stop the scheduler.
    Stop,
}

/// Bookkeeping about past cycles.
#[derive(Debug, Clone, Default)]
pub struct SchedulerState {
    /// Number of cycles run so far.
    pub cycles: u64,
    /// Number of consecutive failed cycles.
    pub consecutive_failures: u32,
    /// Last successful cycle.
    pub last_sync: Option<DateTime<Utc>>,
    /// Last cycle, successful or not.
    pub last_attempt: Option<DateTime<Utc>>,
    /// Error message of the last failed cycle.
    pub last_error: Option<String>,
}

impl SchedulerState {
    /// Creates a new scheduler state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a successful cycle.
    pub fn record_success(&mut self) {
        self.cycles += 1;
        self.consecutive_failures = 0;
        self.last_sync = Some(Utc::now());
        self.last_attempt = self.last_sync;
        self.last_error = None;
    }

    /// Records a failed cycle.
    pub fn record_failure(&mut self, error: impl Into<String>) {
        self.cycles += 1;
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        self.last_attempt = Some(Utc::now());
        self.last_error = Some(error.into());
    }
}

/// The scheduler drives periodic refresh cycles.
pub struct Scheduler {
    config: SchedulerConfig,
    command_tx: mpsc::Sender<SchedulerCommand>,
    command_rx: mpsc::Receiver<SchedulerCommand>,
}

impl Scheduler {
    /// Creates a new scheduler with the given configuration.
    pub fn new(config: SchedulerConfig) -> Self {
        let (command_tx, command_rx) = mpsc::channel(16);
        Self {
            config,
            command_tx,
            command_rx,
        }
    }

    /// Returns a handle for sending commands to the scheduler.
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            command_tx: self.command_tx.clone(),
        }
    }

    /// Runs the scheduler loop with the given cycle function.
    ///
    /// The cycle function is awaited to completion each time; a cycle is
    /// never cancelled by a command. Errors are logged and counted. Returns
    /// the bookkeeping of every cycle run.
    pub async fn run<F, Fut, O, E>(self, cycle: F) -> SchedulerState
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<O, E>> + Send,
        O: fmt::Debug + Send,
        E: fmt::Display + Send,
    {
        let Self {
            config,
            command_tx,
            mut command_rx,
        } = self;
        let mut state = SchedulerState::new();
        // Only external handles keep the loop alive.
        drop(command_tx);

        info!(interval_secs = config.interval.as_secs_f64(), "Scheduler started");

        run_cycle(&mut state, &cycle).await;

        loop {
            debug!(
                delay_secs = config.interval.as_secs_f64(),
                "Scheduling next cycle"
            );

            tokio::select! {
                _ = tokio::time::sleep(config.interval) => {
                    run_cycle(&mut state, &cycle).await;
                }
                cmd = command_rx.recv() => {
                    match cmd {
                        Some(SchedulerCommand::SyncNow) => {
                            debug!("Received SyncNow command");
                            run_cycle(&mut state, &cycle).await;
                        }
                        Some(SchedulerCommand::Stop) | None => {
                            info!(cycles = state.cycles, "Scheduler stopping");
                            break;
                        }
                    }
                }
            }
        }

        state
    }
}

async fn run_cycle<F, Fut, O, E>(state: &mut SchedulerState, cycle: &F)
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<O, E>>,
    O: fmt::Debug,
    E: fmt::Display,
{
    debug!("Starting refresh cycle");
    match cycle().await {
        Ok(outcome) => {
            debug!(?outcome, "Refresh cycle completed");
            state.record_success();
        }
        Err(e) => {
            let message = e.to_string();
            state.record_failure(message.clone());
            warn!(
                error = %message,
                consecutive_failures = state.consecutive_failures,
                "Refresh cycle failed, keeping previous snapshot"
            );
        }
    }
}

/// Handle for sending commands to a running scheduler.
#[derive(Clone, Debug)]
pub struct SchedulerHandle {
    command_tx: mpsc::Sender<SchedulerCommand>,
}

impl SchedulerHandle {
    /// Triggers an immediate cycle.
    pub async fn sync_now(&self) -> Result<(), mpsc::error::SendError<SchedulerCommand>> {
        self.command_tx.send(SchedulerCommand::SyncNow).await
    }

    /// Stops the scheduler.
    pub async fn stop(&self) -> Result<(), mpsc::error::SendError<SchedulerCommand>> {
        self.command_tx.send(SchedulerCommand::Stop).await
    }
}
