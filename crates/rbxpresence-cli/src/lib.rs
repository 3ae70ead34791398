//! rbxpresence binary: flags, wiring, exit codes.

pub mod cli;
pub mod error;
pub mod serve;

pub use cli::Cli;
pub use error::{CliError, CliResult};
