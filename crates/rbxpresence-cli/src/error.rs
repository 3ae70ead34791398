//! CLI error types.

use thiserror::Error;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Fatal startup and runtime errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Logging could not be set up.
    #[error("failed to initialize logging: {0}")]
    Tracing(#[from] rbxpresence_core::TracingError),

    /// The upstream provider could not be built.
    #[error("provider error: {0}")]
    Provider(#[from] rbxpresence_providers::ProviderError),

    /// Binding or serving failed.
    #[error("server error: {0}")]
    Server(#[from] rbxpresence_server::ServerError),
}
