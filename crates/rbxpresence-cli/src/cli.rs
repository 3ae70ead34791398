//! Command-line interface definition.

use clap::Parser;
use rbxpresence_core::{TracingConfig, TracingOutputFormat};
use rbxpresence_server::DEFAULT_PORT;

/// rbxpresence - Serve what game a Roblox user is playing as JSON
#[derive(Debug, Parser)]
#[command(name = "rbxpresence")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Roblox user id to track
    #[arg(long, short, env = "USER_ID")]
    pub user: String,

    /// .ROBLOSECURITY token sent with upstream requests
    #[arg(long, short, env = "TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Port to serve the state on
    #[arg(long, short, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    /// Log output format (pretty, compact, json)
    #[arg(long, env = "LOG_FORMAT", default_value_t = TracingOutputFormat::Compact)]
    pub log_format: TracingOutputFormat,
}

impl Cli {
    /// Tracing configuration matching the flags.
    pub fn tracing_config(&self) -> TracingConfig {
        let config = if self.debug {
            TracingConfig::verbose()
        } else {
            TracingConfig::daemon()
        };
        config.with_format(self.log_format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tracing::Level;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn short_flags() {
        let cli = Cli::try_parse_from(["rbxpresence", "-u", "42", "-t", "secret", "-p", "8080"])
            .unwrap();

        assert_eq!(cli.user, "42");
        assert_eq!(cli.token.as_deref(), Some("secret"));
        assert_eq!(cli.port, 8080);
        assert!(!cli.debug);
    }

    #[test]
    fn long_flags_and_defaults() {
        let cli = Cli::try_parse_from(["rbxpresence", "--user", "42"]).unwrap();

        assert_eq!(cli.user, "42");
        assert!(cli.token.is_none());
        assert_eq!(cli.port, 3000);
        assert_eq!(cli.log_format, TracingOutputFormat::Compact);
    }

    #[test]
    fn user_is_required() {
        let err = Cli::try_parse_from(["rbxpresence", "-p", "8080"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn port_must_be_numeric() {
        let err = Cli::try_parse_from(["rbxpresence", "-u", "42", "-p", "http"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn debug_and_format_shape_tracing() {
        let cli =
            Cli::try_parse_from(["rbxpresence", "-u", "42", "-v", "--log-format", "json"]).unwrap();
        let config = cli.tracing_config();

        assert_eq!(config.default_level, Level::DEBUG);
        assert_eq!(config.output_format, TracingOutputFormat::Json);
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        assert!(Cli::try_parse_from(["rbxpresence", "-u", "42", "--log-format", "xml"]).is_err());
    }
}
