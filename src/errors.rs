use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("request to {url} failed: {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {status}")]
    UnhealthyStatus { url: String, status: StatusCode },

    #[error("Failed to write export file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ExportError {
    /// True for every failure that means the dashboard could not be reached
    /// or did not answer with a 2xx.
    pub fn is_connection(&self) -> bool {
        matches!(
            self,
            ExportError::Connection { .. } | ExportError::UnhealthyStatus { .. }
        )
    }
}

/// Helper for mapping any config problem into a config error
pub fn config_error<E: ToString>(err: E) -> ExportError {
    ExportError::Config(err.to_string())
}
