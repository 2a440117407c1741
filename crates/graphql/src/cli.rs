use clap::CommandFactory;
use crate::commands;

const DEFAULT_LOG_LEVEL: tracing::Level = tracing::Level::INFO;

/// Validate GraphQL schemas and execute GraphQL operations against them.
#[derive(clap::Parser, Debug)]
#[command(name = "graphql", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) cmd: Option<commands::CommandEnum>,

    #[arg(
        help="Enable verbose output.",
        long,
        short='v',
    )]
    pub verbose: bool,
}
impl Cli {
    /// The maximum level to log at: `DEBUG` with `--verbose`, otherwise the
    /// `LOG_LEVEL` environment variable. An unrecognized `LOG_LEVEL` falls
    /// back to the default and is returned as a warning to report.
    pub(crate) fn log_level(&self) -> (tracing::Level, Option<String>) {
        if self.verbose {
            return (tracing::Level::DEBUG, None);
        }

        let env_val = std::env::var("LOG_LEVEL").map(|s| s.trim().to_string());
        let level = match env_val.as_deref() {
            Ok("DEBUG" | "debug" | "VERBOSE" | "verbose") => tracing::Level::DEBUG,
            Ok("ERROR" | "error") => tracing::Level::ERROR,
            Ok("INFO" | "info") => tracing::Level::INFO,
            Ok("TRACE" | "trace") => tracing::Level::TRACE,
            Ok("WARN" | "warn") => tracing::Level::WARN,
            Ok(other) => return (
                DEFAULT_LOG_LEVEL,
                Some(format!("Invalid `LOG_LEVEL` environment variable value: `{other}`")),
            ),
            Err(_) => DEFAULT_LOG_LEVEL,
        };
        (level, None)
    }

    pub(crate) async fn run_default(self) -> anyhow::Result<()> {
        Self::command().print_help()?;
        Ok(())
    }
}
