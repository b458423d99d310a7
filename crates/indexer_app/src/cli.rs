//! Command-line surface of the `indexer` binary.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use indexer_core::{NotificationType, SubmitterConfig};

#[derive(Debug, Parser)]
#[command(
    name = "indexer",
    version,
    about = "Submit URLs to the Web Search Indexing API"
)]
pub struct Cli {
    /// RON configuration file (defaults to ./indexer.ron when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Service-account JSON key.
    #[arg(long, global = true)]
    pub credential: Option<PathBuf>,

    /// Indexing API base URL.
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Also write logs to a file (indexer.log when no path is given).
    #[arg(
        long,
        global = true,
        num_args = 0..=1,
        default_missing_value = indexer_logging::DEFAULT_LOG_FILE
    )]
    pub log_file: Option<PathBuf>,

    /// Raise log verbosity (-v info, -vv debug).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Notify the indexing service about every URL in the input file.
    Submit(SubmitArgs),
    /// Show the latest notifications recorded for each URL.
    Status(StatusArgs),
    /// Validate the credential and the token exchange.
    Check(CheckArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TypeArg {
    Updated,
    Deleted,
}

impl From<TypeArg> for NotificationType {
    fn from(value: TypeArg) -> Self {
        match value {
            TypeArg::Updated => NotificationType::UrlUpdated,
            TypeArg::Deleted => NotificationType::UrlDeleted,
        }
    }
}

#[derive(Debug, Default, Args)]
pub struct SubmitArgs {
    /// Line-delimited URL list.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Where failed URLs are written for a retry run.
    #[arg(long)]
    pub failure_file: Option<PathBuf>,

    /// Delay between consecutive requests, in milliseconds.
    #[arg(long)]
    pub pacing_ms: Option<u64>,

    /// Requests allowed per rolling window.
    #[arg(long)]
    pub max_per_window: Option<u32>,

    #[arg(long = "type", value_enum)]
    pub notification_type: Option<TypeArg>,
}

#[derive(Debug, Default, Args)]
pub struct StatusArgs {
    /// Line-delimited URL list, used when no URLs are given.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    #[arg(long)]
    pub pacing_ms: Option<u64>,

    pub urls: Vec<String>,
}

#[derive(Debug, Default, Args)]
pub struct CheckArgs {
    /// Publish one notification for this URL after authenticating.
    #[arg(long)]
    pub probe: Option<String>,
}

impl Cli {
    /// Fold command-line flags over a loaded configuration.
    pub fn apply(&self, config: &mut SubmitterConfig) {
        if let Some(path) = &self.credential {
            config.credential_path = path.clone();
        }
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        match &self.command {
            Some(Command::Submit(args)) => args.apply(config),
            Some(Command::Status(args)) => {
                if let Some(path) = &args.input {
                    config.input_path = path.clone();
                }
                if let Some(ms) = args.pacing_ms {
                    config.pacing_interval_ms = ms;
                }
            }
            Some(Command::Check(_)) | None => {}
        }
    }
}

impl SubmitArgs {
    fn apply(&self, config: &mut SubmitterConfig) {
        if let Some(path) = &self.input {
            config.input_path = path.clone();
        }
        if let Some(path) = &self.failure_file {
            config.output_failure_path = path.clone();
        }
        if let Some(ms) = self.pacing_ms {
            config.pacing_interval_ms = ms;
        }
        if let Some(max) = self.max_per_window {
            config.max_requests_per_window = max;
        }
        if let Some(kind) = self.notification_type {
            config.notification_type = kind.into();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn submit_flags_override_config() {
        let cli = Cli::parse_from([
            "indexer",
            "--credential",
            "key.json",
            "submit",
            "--input",
            "retry.txt",
            "--pacing-ms",
            "1500",
            "--type",
            "deleted",
        ]);
        let mut config = SubmitterConfig::default();
        cli.apply(&mut config);

        assert_eq!(config.credential_path, PathBuf::from("key.json"));
        assert_eq!(config.input_path, PathBuf::from("retry.txt"));
        assert_eq!(config.pacing_interval_ms, 1500);
        assert_eq!(config.notification_type, NotificationType::UrlDeleted);
        assert_eq!(config.output_failure_path, PathBuf::from("failed-urls.txt"));
    }

    #[test]
    fn bare_invocation_keeps_defaults() {
        let cli = Cli::parse_from(["indexer"]);
        assert!(cli.command.is_none());
        let mut config = SubmitterConfig::default();
        cli.apply(&mut config);
        assert_eq!(config, SubmitterConfig::default());
    }

    #[test]
    fn status_takes_positional_urls() {
        let cli = Cli::parse_from(["indexer", "status", "https://example.com/a"]);
        match cli.command {
            Some(Command::Status(args)) => assert_eq!(args.urls, vec!["https://example.com/a"]),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
