use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, warn};
use validator::Validate;

use crate::errors::{config_error, ExportError};

pub const DEFAULT_GRAFANA_URL: &str = "http://localhost:3000";
pub const DEFAULT_GRAFANA_USER: &str = "admin";
pub const DEFAULT_EXPORT_PATH: &str = "grafana_queries_export.json";

/// Connection and output settings for one export run.
#[derive(Clone, Validate)]
pub struct ExporterConfig {
    /// Dashboard base URL, without trailing slash.
    #[validate(url)]
    pub base_url: String,
    /// Basic auth user.
    #[validate(length(min = 1))]
    pub username: String,
    /// Basic auth password.
    pub password: Option<String>,
    /// Request timeout in milliseconds. `None` keeps the client default.
    #[validate(range(min = 1))]
    pub timeout_ms: Option<u64>,
    /// Where the export document is written.
    pub output_path: PathBuf,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GRAFANA_URL.into(),
            username: DEFAULT_GRAFANA_USER.into(),
            password: None,
            timeout_ms: None,
            output_path: PathBuf::from(DEFAULT_EXPORT_PATH),
        }
    }
}

impl ExporterConfig {
    /// Loads `.env` (if any) and reads the `GRAFANA_*` variables.
    pub fn from_env() -> Result<Self, ExportError> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "Loaded .env file");
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ExportError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(v) = lookup("GRAFANA_URL").and_then(normalize_string) {
            cfg.base_url = v;
        }
        if let Some(v) = lookup("GRAFANA_USER").and_then(normalize_string) {
            cfg.username = v;
        }
        cfg.password = lookup("GRAFANA_PASSWORD").and_then(normalize_string);
        if let Some(v) = lookup("GRAFANA_TIMEOUT_MS").and_then(normalize_string) {
            let ms = v
                .parse::<u64>()
                .map_err(|e| config_error(format!("GRAFANA_TIMEOUT_MS={}: {}", v, e)))?;
            cfg.timeout_ms = Some(ms);
        }
        if let Some(v) = lookup("GRAFANA_EXPORT_PATH").and_then(normalize_string) {
            cfg.output_path = PathBuf::from(v);
        }

        cfg.base_url = cfg.base_url.trim_end_matches('/').to_string();
        cfg.validate().map_err(config_error)?;

        if cfg.password.is_none() {
            warn!("GRAFANA_PASSWORD is not set; health check will be sent without a password");
        }

        Ok(cfg)
    }

    pub fn health_url(&self) -> String {
        format!("{}/api/health", self.base_url)
    }

    pub fn explore_url(&self) -> String {
        format!("{}/explore", self.base_url)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Mask the password for safe display (keeps last 4 chars).
    pub fn masked_password(&self) -> Option<String> {
        self.password.as_ref().map(|t| {
            let len = t.chars().count();
            if len <= 8 {
                "***".into()
            } else {
                let tail: String = t.chars().skip(len - 4).collect();
                format!("***{}", tail)
            }
        })
    }
}

impl fmt::Debug for ExporterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExporterConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &self.masked_password())
            .field("timeout_ms", &self.timeout_ms)
            .field("output_path", &self.output_path)
            .finish()
    }
}

fn normalize_string(v: String) -> Option<String> {
    let s = v.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
