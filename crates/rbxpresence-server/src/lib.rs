//! Daemon: snapshot slot, refresher, scheduler, HTTP state server.
//!
//! This crate provides the two long-running halves of rbxpresence:
//! - A scheduler that runs refresh cycles on a fixed interval and installs
//!   each new [`StateSnapshot`](rbxpresence_core::StateSnapshot) into a
//!   shared [`SnapshotSlot`]
//! - An HTTP server that answers every request with the slot's contents
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use rbxpresence_providers::roblox::{RobloxConfig, RobloxProvider};
//! use rbxpresence_server::{
//!     HttpServer, Refresher, Scheduler, SchedulerConfig, ServerConfig, SnapshotSlot,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let slot = SnapshotSlot::new();
//!     let provider = Arc::new(RobloxProvider::new(RobloxConfig::new())?);
//!     let refresher = Arc::new(Refresher::new(provider, "42", slot.clone())?);
//!
//!     let scheduler = Scheduler::new(SchedulerConfig::default());
//!     tokio::spawn(scheduler.run(move || {
//!         let refresher = refresher.clone();
//!         async move { refresher.run_cycle().await }
//!     }));
//!
//!     let server = HttpServer::bind(&ServerConfig::default(), slot).await?;
//!     server.run_until_shutdown(std::future::pending()).await?;
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod http;
mod refresher;
mod scheduler;
mod signals;
mod slot;

pub use config::{DEFAULT_PORT, ServerConfig};
pub use error::{ServerError, ServerResult};
pub use http::{HttpServer, build_router};
pub use refresher::{RefreshOutcome, Refresher, refresh_once};
pub use scheduler::{
    Scheduler, SchedulerCommand, SchedulerConfig, SchedulerHandle, SchedulerState,
};
pub use signals::{ShutdownSignal, SignalHandler};
pub use slot::SnapshotSlot;
