use std::path::Path;

use crate::errors::ExportError;

use super::export_document_entity::ExportDocument;

/// Storage abstraction for the export document.
pub trait ExportFsAdapterTrait {
    fn read(&self, path: &Path) -> Result<ExportDocument, ExportError>;

    /// Replaces whatever is at `path` with `doc`.
    fn write(&self, path: &Path, doc: &ExportDocument) -> Result<(), ExportError>;
}
