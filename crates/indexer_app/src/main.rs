mod cli;
mod commands;
mod config;
mod console;

use std::process::ExitCode;

use clap::Parser;
use indexer_logging::LogDestination;
use log::LevelFilter;

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    indexer_logging::initialize(log_destination(&cli), log_level(cli.verbose));

    ExitCode::from(exit_status(run(cli).await))
}

/// Item failures still count as a completed run; only setup errors fail.
fn exit_status(result: anyhow::Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {err:#}");
            1
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = config::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    config.validate()?;

    match &cli.command {
        None | Some(Command::Submit(_)) => commands::submit(&config).await,
        Some(Command::Status(args)) => commands::status(&config, args).await,
        Some(Command::Check(args)) => commands::check(&config, args).await,
    }
}

fn log_destination(cli: &Cli) -> LogDestination {
    match &cli.log_file {
        Some(path) => LogDestination::Both(path.clone()),
        None => LogDestination::Terminal,
    }
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const FIXTURE_KEY: &str = concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../indexer_engine/tests/fixtures/service-account.json"
    );

    fn write_config(dir: &Path, credential: &Path, server: &MockServer) -> std::path::PathBuf {
        let input = dir.join("sitemap-urls.txt");
        fs::write(
            &input,
            "https://example.com/a\nhttps://example.com/b\nhttps://example.com/c\n",
        )
        .unwrap();
        let config = dir.join("indexer.ron");
        fs::write(
            &config,
            format!(
                "(credential_path: {:?}, input_path: {:?}, output_failure_path: {:?}, \
                 pacing_interval_ms: 0, endpoint: {:?}, token_uri: Some({:?}))",
                credential,
                input,
                dir.join("failed-urls.txt"),
                server.uri(),
                format!("{}/token", server.uri()),
            ),
        )
        .unwrap();
        config
    }

    async fn mount_indexing_api(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "ya29.app",
                "expires_in": 3599,
                "token_type": "Bearer"
            })))
            .expect(1)
            .mount(server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v3/urlNotifications:publish"))
            .and(body_json(json!({ "url": "https://example.com/b", "type": "URL_UPDATED" })))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": {
                    "code": 403,
                    "message": "Permission denied. Failed to verify the URL ownership.",
                    "status": "PERMISSION_DENIED"
                }
            })))
            .with_priority(1)
            .mount(server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v3/urlNotifications:publish"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "urlNotificationMetadata": { "url": "https://example.com/a" }
            })))
            .expect(2)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn completed_run_with_item_failures_exits_zero() {
        let server = MockServer::start().await;
        mount_indexing_api(&server).await;
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path(), Path::new(FIXTURE_KEY), &server);

        let cli = Cli::parse_from(["indexer", "--config", config.to_str().unwrap(), "submit"]);
        assert_eq!(exit_status(run(cli).await), 0);
        assert_eq!(
            fs::read_to_string(dir.path().join("failed-urls.txt")).unwrap(),
            "https://example.com/b\n"
        );
    }

    #[tokio::test]
    async fn missing_credential_exits_non_zero() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let config = write_config(dir.path(), &dir.path().join("missing.json"), &server);

        let cli = Cli::parse_from(["indexer", "--config", config.to_str().unwrap()]);
        assert_eq!(exit_status(run(cli).await), 1);
        assert!(server.received_requests().await.unwrap().is_empty());
        assert!(!dir.path().join("failed-urls.txt").exists());
    }

    #[test]
    fn verbosity_flags_raise_log_level() {
        assert_eq!(log_level(0), LevelFilter::Warn);
        assert_eq!(log_level(1), LevelFilter::Info);
        assert_eq!(log_level(2), LevelFilter::Debug);
        assert_eq!(log_level(5), LevelFilter::Debug);
    }
}
