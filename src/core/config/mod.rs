pub mod exporter_config;
