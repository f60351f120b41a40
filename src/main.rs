#[macro_use]
extern crate tracing;

use assign_lb_ip::{
    assign::StatusAssigner,
    cli::Args,
    cluster,
    store::KubeServiceStore,
};
use clap::Parser;
use eyre::{
    Context as _,
    Result,
};
use std::future::Future;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let timeout = args.timeout;

    with_deadline(timeout, run(args)).await
}

async fn run(args: Args) -> Result<()> {
    let addresses = args.addresses()?;
    let ns = args.namespace.as_str();
    let name = args.service.as_str();

    debug!(?addresses, dry_run = args.dry_run, "assigning load balancer addresses to {ns}/{name}");

    let client = cluster::client().await.context("Failed to create k8s client")?;
    let assigner = StatusAssigner::new(KubeServiceStore::new(client));

    if args.dry_run {
        let plan = assigner.plan(ns, name, &addresses).await?;
        let load_balancer = plan.service.status.and_then(|status| status.load_balancer);
        let yaml = serde_yaml::to_string(&load_balancer).context("Failed to serialize status")?;
        print!("{yaml}");
        return Ok(());
    }

    assigner.assign(ns, name, &addresses).await?;
    Ok(())
}

async fn with_deadline<F>(deadline: Option<std::time::Duration>, fut: F) -> Result<()>
where
    F: Future<Output = Result<()>>,
{
    let Some(deadline) = deadline else {
        return fut.await;
    };

    match tokio::time::timeout(deadline, fut).await {
        Ok(result) => result,
        Err(_) => eyre::bail!("Timed out after {}", humantime::format_duration(deadline)),
    }
}
