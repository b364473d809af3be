//! Slug share worker entry point.
//!
//! Usage: `slugshare-worker [JOB_FILE]`. The share request is read as JSON
//! from `JOB_FILE`, or from stdin when no file is given.

mod config;

use std::io::Read;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use slugshare_coordinator::EtcdClient;
use slugshare_share::{EventLogger, ShareItem, TracingEventLogger};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<ExitCode> {
    let config = config::Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        etcd = %config.etcd_endpoint,
        "starting slug share worker"
    );

    let payload = read_job(std::env::args().nth(1))?;

    let rt = tokio::runtime::Runtime::new()?;
    let shared = rt.block_on(run(&config, &payload))?;

    Ok(if shared {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn run(config: &config::Config, payload: &[u8]) -> anyhow::Result<bool> {
    let coordinator = EtcdClient::new(&config.etcd_endpoint, config.request_timeout())
        .context("building etcd client")?;

    let item = ShareItem::from_slice(payload, Arc::new(coordinator), |event_id| {
        Arc::new(TracingEventLogger::new(event_id)) as Arc<dyn EventLogger>
    })
    .context("decoding share request")?;

    let outcome = item.run().await;
    match &outcome.result {
        Ok(()) => tracing::info!(share_id = %item.share_id(), "share finished"),
        Err(e) => tracing::error!(share_id = %item.share_id(), error = %e, "share failed"),
    }
    if let slugshare_share::StatusReport::NotRecorded { reason } = &outcome.report {
        tracing::warn!(share_id = %item.share_id(), %reason, "share result was not recorded");
    }

    Ok(outcome.is_success())
}

fn read_job(path: Option<String>) -> anyhow::Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(&path).with_context(|| format!("reading job file {path}")),
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("reading job from stdin")?;
            Ok(buf)
        }
    }
}
