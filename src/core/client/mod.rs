pub mod grafana_client;
