use std::{
    fs::{self, File},
    io::Write,
    path::Path,
};

use tracing::{debug, warn};

use crate::errors::ExportError;

use super::export_document_entity::ExportDocument;
use super::export_fs_adapter_trait::ExportFsAdapterTrait;

/// FS adapter for the export document.
///
/// Writes 2-space indented UTF-8 JSON through a temp file + rename, so an
/// existing export is either fully replaced or left as it was.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExportFsAdapter;

impl ExportFsAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl ExportFsAdapterTrait for ExportFsAdapter {
    fn read(&self, path: &Path) -> Result<ExportDocument, ExportError> {
        let bytes = fs::read(path).map_err(|e| io_error(path, e))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn write(&self, path: &Path, doc: &ExportDocument) -> Result<(), ExportError> {
        let bytes = serde_json::to_vec_pretty(doc)?;

        let dir = path.parent().filter(|d| !d.as_os_str().is_empty());
        if let Some(dir) = dir {
            fs::create_dir_all(dir).map_err(|e| io_error(dir, e))?;
        }

        let tmp_path = path.with_extension("json.tmp");
        if let Err(e) = write_synced(&tmp_path, &bytes) {
            let _ = fs::remove_file(&tmp_path);
            return Err(io_error(path, e));
        }
        if let Err(e) = fs::rename(&tmp_path, path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(io_error(path, e));
        }

        #[cfg(unix)]
        if let Some(dir) = dir {
            sync_dir(dir);
        }

        debug!(path = %path.display(), bytes = bytes.len(), "Export document written");
        Ok(())
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut f = File::create(path)?;
    f.write_all(bytes)?;
    f.flush()?;
    f.sync_all()
}

/// Runs after the rename, when the new export is already in place, so a
/// failure here is logged and not returned.
#[cfg(unix)]
fn sync_dir(dir: &Path) -> bool {
    match File::open(dir).and_then(|f| f.sync_all()) {
        Ok(()) => true,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "Failed to sync export directory");
            false
        }
    }
}

fn io_error(path: &Path, source: std::io::Error) -> ExportError {
    ExportError::Io {
        path: path.display().to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::persistence::export::export_document_entity::{
        Instructions, QueryDefinition,
    };
    use std::borrow::Cow;

    fn sample_doc() -> ExportDocument {
        ExportDocument {
            queries: vec![QueryDefinition::new(
                "Autenticación",
                "Eventos relacionados con login/logout",
                r#"{job="freesquash-api"} | json | action=~"login|logout""#,
                "Loki",
            )],
            instructions: Instructions {
                es: Cow::Borrowed("Pega la query"),
                en: Cow::Borrowed("Paste the query"),
            },
        }
    }

    #[test]
    fn writes_indented_json_with_unescaped_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");

        ExportFsAdapter::new().write(&path, &sample_doc()).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n  \"queries\": [\n    {\n      \"name\": \"Autenticación\""));
        assert!(text.contains(r#""query": "{job=\"freesquash-api\"} | json | action=~\"login|logout\"""#));
        assert!(!dir.path().join("export.json.tmp").exists());
    }

    #[test]
    fn overwrites_existing_file_and_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("export.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "stale").unwrap();

        let adapter = ExportFsAdapter::new();
        adapter.write(&path, &sample_doc()).unwrap();

        assert_eq!(adapter.read(&path).unwrap(), sample_doc());
    }

    #[test]
    fn unwritable_target_reports_io_error_and_keeps_old_file() {
        let dir = tempfile::tempdir().unwrap();
        // A directory in place of the file makes the final rename fail.
        let path = dir.path().join("export.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();

        let err = ExportFsAdapter::new().write(&path, &sample_doc()).unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
        assert!(path.join("keep").exists());
        assert!(!dir.path().join("export.json.tmp").exists());
    }

    #[cfg(unix)]
    #[test]
    fn directory_sync_failure_does_not_fail_the_write() {
        let dir = tempfile::tempdir().unwrap();
        assert!(sync_dir(dir.path()));
        assert!(!sync_dir(&dir.path().join("gone")));
    }

    #[test]
    fn reading_garbage_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");
        fs::write(&path, "not json").unwrap();

        let err = ExportFsAdapter::new().read(&path).unwrap_err();
        assert!(matches!(err, ExportError::Serialization(_)));
    }
}
