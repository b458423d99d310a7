use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::Local;
use indexer_core::{NotificationType, SubmitterConfig};
use indexer_engine::{
    check_statuses, connect, load_url_list, run_batch, Notifier, TokioPacer,
};
use indexer_logging::indexer_info;

use crate::cli::{CheckArgs, StatusArgs};
use crate::console::{render_summary, ConsoleSink};

pub async fn submit(config: &SubmitterConfig) -> Result<()> {
    println!(
        "Batch URL submission started {}",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    let (client, key) = connect(config)?;
    indexer_info!("Authenticating as {}", key.client_email);

    let run = run_batch(
        config,
        Arc::new(client),
        Arc::new(TokioPacer::new()),
        &ConsoleSink,
    )
    .await?;

    print!(
        "{}",
        render_summary(&run.report, run.saved_failure_file(), config)
    );
    if let Err(err) = &run.failure_file {
        eprintln!(
            "warning: could not save failed URLs to {}: {err}",
            config.output_failure_path.display()
        );
    }
    Ok(())
}

pub async fn status(config: &SubmitterConfig, args: &StatusArgs) -> Result<()> {
    let urls = if args.urls.is_empty() {
        load_url_list(&config.input_path)?
    } else {
        args.urls.clone()
    };
    let (client, _key) = connect(config)?;
    client
        .authenticate()
        .await
        .context("authentication failed")?;

    let results = check_statuses(
        &client,
        &TokioPacer::new(),
        config.pacing_interval(),
        &urls,
        &ConsoleSink,
    )
    .await;
    let failed = results.iter().filter(|r| r.result.is_err()).count();
    println!("\nChecked {} URLs, {} without metadata", results.len(), failed);
    Ok(())
}

pub async fn check(config: &SubmitterConfig, args: &CheckArgs) -> Result<()> {
    let (client, key) = connect(config)?;
    println!("Credential: {}", config.credential_path.display());
    println!("  Email:   {}", key.client_email);
    println!(
        "  Project: {}",
        key.project_id.as_deref().unwrap_or("(not set)")
    );

    if let Err(err) = client.authenticate().await {
        println!("Token exchange failed: {err}");
        println!("  Check that the key is current and the service account is enabled.");
        bail!("authentication failed: {err}");
    }
    println!("Token exchange OK");

    if let Some(url) = &args.probe {
        match client.notify(url, NotificationType::UrlUpdated).await {
            Ok(ack) => println!(
                "Probe accepted for {url} (notify time {})",
                ack.notify_time.as_deref().unwrap_or("n/a")
            ),
            Err(err) => {
                println!("Probe failed for {url}: {err}");
                println!("  Enable the Web Search Indexing API for the project, and add");
                println!("  {} as an Owner of the Search Console property.", key.client_email);
                bail!("probe failed: {err}");
            }
        }
    }
    Ok(())
}
