use tracing_subscriber::EnvFilter;

use aws_service_inventory::config::Config;
use aws_service_inventory::out::{emit_stdout, post_report, OutMode};
use aws_service_inventory::Inventory;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    let inventory = Inventory::aws(config.concurrency);

    let report = inventory.scan_all().await?;
    tracing::info!(
        resources = report.total_count,
        scopes = report.scopes_scanned,
        scope_errors = report.scope_errors.len(),
        scanner_failures = report.scanner_failures.len(),
        "scan complete"
    );

    match config.out {
        OutMode::Stdout => emit_stdout(&report)?,
        OutMode::Http => post_report(&config.endpoint, &report).await?,
    }

    Ok(())
}
