use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::core::config::exporter_config::ExporterConfig;
use crate::errors::{config_error, ExportError};

/// Fields Grafana reports on `/api/health`. Everything is optional; the body
/// is only used for logging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HealthInfo {
    pub version: Option<String>,
    pub database: Option<String>,
    pub commit: Option<String>,
}

/// Liveness probe against the dashboard service.
#[async_trait]
pub trait DashboardHealthApi: Send + Sync {
    async fn check_health(&self) -> Result<HealthInfo, ExportError>;
}

pub struct GrafanaClient {
    client: Client,
    health_url: String,
    username: String,
    password: Option<String>,
}

impl GrafanaClient {
    pub fn new(client: Client, cfg: &ExporterConfig) -> Self {
        Self {
            client,
            health_url: cfg.health_url(),
            username: cfg.username.clone(),
            password: cfg.password.clone(),
        }
    }

    /// Builds the underlying HTTP client, applying the configured timeout.
    pub fn from_config(cfg: &ExporterConfig) -> Result<Self, ExportError> {
        let mut builder = Client::builder();
        if let Some(timeout) = cfg.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| config_error(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::new(client, cfg))
    }
}

#[async_trait]
impl DashboardHealthApi for GrafanaClient {
    async fn check_health(&self) -> Result<HealthInfo, ExportError> {
        let resp = self
            .client
            .get(&self.health_url)
            .basic_auth(&self.username, self.password.as_deref())
            .send()
            .await
            .map_err(|source| ExportError::Connection {
                url: self.health_url.clone(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ExportError::UnhealthyStatus {
                url: self.health_url.clone(),
                status,
            });
        }

        // Any 2xx is healthy; the body shape is not checked.
        let text = match resp.text().await {
            Ok(text) => text,
            Err(e) => {
                debug!(url = %self.health_url, error = %e, "Failed to read health response body");
                String::new()
            }
        };
        let info = serde_json::from_str::<HealthInfo>(&text).unwrap_or_default();
        debug!(
            url = %self.health_url,
            version = ?info.version,
            database = ?info.database,
            "Dashboard health check passed"
        );

        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_info_decodes_partial_bodies() {
        let full: HealthInfo = serde_json::from_str(
            r#"{"commit":"abc123","database":"ok","version":"10.2.0"}"#,
        )
        .unwrap();
        assert_eq!(full.version.as_deref(), Some("10.2.0"));
        assert_eq!(full.database.as_deref(), Some("ok"));

        let empty: HealthInfo = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, HealthInfo::default());
    }

    #[tokio::test]
    async fn truncated_2xx_body_still_counts_as_healthy() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            // Promises 100 bytes, sends 2, then hangs up.
            let _ = socket
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\n{}")
                .await;
        });

        let cfg = ExporterConfig {
            base_url: format!("http://{}", addr),
            timeout_ms: Some(5_000),
            ..ExporterConfig::default()
        };
        let client = GrafanaClient::from_config(&cfg).unwrap();

        let info = client.check_health().await.expect("2xx must pass");
        assert_eq!(info, HealthInfo::default());
    }

    #[tokio::test]
    async fn refused_connection_is_a_connection_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let cfg = ExporterConfig {
            base_url: format!("http://127.0.0.1:{}", port),
            ..ExporterConfig::default()
        };
        let client = GrafanaClient::from_config(&cfg).unwrap();

        let err = client.check_health().await.unwrap_err();
        assert!(matches!(err, ExportError::Connection { .. }));
        assert!(err.is_connection());
    }
}
