#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;

use std::io::Write;
use std::process;

use anyhow::Context;
use feishu_core::ServiceHealth;
use feishu_probe::{ProbeResult, Prober};
use feishu_reqwest::FeishuClient;

use crate::config::Cli;

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "feishu_cli::startup";
pub const TRACING_TARGET_SHUTDOWN: &str = "feishu_cli::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "feishu_cli::config";
pub const TRACING_TARGET_PROBE: &str = "feishu_cli::probe";

#[tokio::main]
async fn main() {
    let error = match run().await {
        Ok(true) => process::exit(0),
        Ok(false) => process::exit(1),
        Err(error) => error,
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            error = %error,
            "probe terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Runs the configured probes and reports whether the last one succeeded.
async fn run() -> anyhow::Result<bool> {
    let cli = Cli::init();

    Cli::init_tracing();
    cli.log();

    let client =
        FeishuClient::new(cli.http.clone()).context("failed to create open platform client")?;
    let prober = Prober::from_config(client.into_service(), &cli.probe);

    let credentials = cli.credentials.to_credentials();
    let options = cli.probe_options();

    let mut last = None;
    for _ in 0..cli.repeat {
        let result = prober.probe(credentials.as_ref(), options).await;
        let health = report(&mut std::io::stdout().lock(), &result)?;
        last = Some(health);
    }

    Ok(last.is_some_and(|health| health.is_healthy()))
}

/// Writes one probe result as a JSON line and logs the resulting health.
fn report(writer: &mut impl Write, result: &ProbeResult) -> anyhow::Result<ServiceHealth> {
    serde_json::to_writer(&mut *writer, result).context("failed to encode probe result")?;
    writeln!(writer).context("failed to write probe result")?;

    let health = result.to_health();
    tracing::info!(
        target: TRACING_TARGET_PROBE,
        app_id = result.app_id(),
        status = ?health.status,
        message = health.message.as_deref(),
        checked_at = %health.checked_at,
        "Bot health"
    );

    Ok(health)
}
