use anyhow::Context;
use tracing::info;

use grafana_query_export::core::config::exporter_config::ExporterConfig;
use grafana_query_export::core::logging::init_logging;
use grafana_query_export::domain::export::service::export_service::run_export;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _guard = init_logging()?;

    let cfg = ExporterConfig::from_env().context("Failed to load exporter configuration")?;
    info!(config = ?cfg, "Starting query export");

    match run_export(&cfg).await {
        Ok(outcome) => {
            info!(
                path = %outcome.output_path.display(),
                queries = outcome.query_count,
                "Export finished"
            );
            Ok(())
        }
        // Already reported on the console; nothing was written.
        Err(err) if err.is_connection() => Ok(()),
        Err(err) => Err(err.into()),
    }
}
