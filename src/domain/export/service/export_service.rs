use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::core::client::grafana_client::{DashboardHealthApi, GrafanaClient, HealthInfo};
use crate::core::config::exporter_config::ExporterConfig;
use crate::core::persistence::export::export_document_entity::{ExportDocument, QueryDefinition};
use crate::core::persistence::export::export_fs_adapter::ExportFsAdapter;
use crate::core::persistence::export::export_fs_adapter_trait::ExportFsAdapterTrait;
use crate::domain::catalog::query_catalog::{INSTRUCTIONS, QUERY_CATALOG};
use crate::errors::ExportError;

const RULE_WIDTH: usize = 60;
const DOCS_PATH: &str = "docs/GRAFANA_CONSULTAS_BASICAS.md";

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub output_path: PathBuf,
    pub query_count: usize,
    pub health: HealthInfo,
}

/// Health check, write and summary against the real dashboard, printing to stdout.
pub async fn run_export(cfg: &ExporterConfig) -> Result<ExportOutcome, ExportError> {
    let client = GrafanaClient::from_config(cfg)?;
    let adapter = ExportFsAdapter::new();
    let mut out = io::stdout();
    run_export_with(&client, &adapter, cfg, &mut out).await
}

/// Same as [`run_export`] with every side effect injected.
///
/// On a failed health check the error message is printed and the error is
/// returned before anything touches the filesystem.
pub async fn run_export_with<H, A, W>(
    health: &H,
    adapter: &A,
    cfg: &ExporterConfig,
    out: &mut W,
) -> Result<ExportOutcome, ExportError>
where
    H: DashboardHealthApi + ?Sized,
    A: ExportFsAdapterTrait + ?Sized,
    W: Write,
{
    console(writeln!(out, "🔄 Conectando con Grafana..."))?;

    let health_info = match health.check_health().await {
        Ok(info) => info,
        Err(err) => {
            error!(error = %err, url = %cfg.health_url(), "Dashboard health check failed");
            console(writeln!(out, "❌ Error conectando a Grafana: {}", err))?;
            return Err(err);
        }
    };
    console(writeln!(out, "✅ Conectado a Grafana correctamente\n"))?;

    let doc = build_export_document();
    console(writeln!(
        out,
        "📝 Importando {} consultas guardadas...\n",
        doc.queries.len()
    ))?;

    write_export_file(adapter, &doc, &cfg.output_path)?;
    info!(
        path = %cfg.output_path.display(),
        queries = doc.queries.len(),
        "Query catalog exported"
    );

    console(print_summary(
        out,
        &doc.queries,
        &cfg.output_path,
        &cfg.explore_url(),
    ))?;

    Ok(ExportOutcome {
        output_path: cfg.output_path.clone(),
        query_count: doc.queries.len(),
        health: health_info,
    })
}

pub fn build_export_document() -> ExportDocument {
    ExportDocument {
        queries: QUERY_CATALOG.to_vec(),
        instructions: INSTRUCTIONS,
    }
}

pub fn write_export_file<A>(adapter: &A, doc: &ExportDocument, path: &Path) -> Result<(), ExportError>
where
    A: ExportFsAdapterTrait + ?Sized,
{
    adapter.write(path, doc)
}

/// Human-readable listing of the catalog plus Explore usage steps.
pub fn print_summary<W: Write>(
    out: &mut W,
    catalog: &[QueryDefinition],
    output_path: &Path,
    explore_url: &str,
) -> io::Result<()> {
    writeln!(out, "✅ Consultas exportadas a: {}\n", output_path.display())?;
    writeln!(out, "📋 Lista de consultas guardadas:")?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;

    for (i, query) in catalog.iter().enumerate() {
        writeln!(out, "\n{}. {}", i + 1, query.name)?;
        writeln!(out, "   📝 {}", query.description)?;
        writeln!(out, "   🔍 {}", query.query)?;
    }

    writeln!(out, "\n{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "\n💡 Para usar estas consultas en Grafana Explore:")?;
    writeln!(out, "   1. Abre: {}", explore_url)?;
    writeln!(out, "   2. Selecciona datasource: Loki")?;
    writeln!(out, "   3. Copia y pega cualquier consulta de arriba")?;
    writeln!(out, "   4. Haz clic en 'Run query'")?;
    writeln!(out, "   5. Para guardar: haz clic en el icono de estrella ⭐")?;
    writeln!(out, "\n📖 Consulta la documentación completa en:")?;
    writeln!(out, "   {}", DOCS_PATH)?;
    writeln!(out)?;
    out.flush()
}

fn console(result: io::Result<()>) -> Result<(), ExportError> {
    result.map_err(|source| ExportError::Io {
        path: "<stdout>".into(),
        source,
    })
}
