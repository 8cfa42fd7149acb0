use std::borrow::Cow;

use crate::core::persistence::export::export_document_entity::{Instructions, QueryDefinition};

pub const LOKI_DATASOURCE: &str = "Loki";

/// Saved Loki queries for the freesquash API logs, in display order.
pub static QUERY_CATALOG: &[QueryDefinition] = &[
    QueryDefinition::new(
        "Todos los logs",
        "Ver todos los logs de la aplicación",
        r#"{job="freesquash-api"}"#,
        LOKI_DATASOURCE,
    ),
    QueryDefinition::new(
        "Solo errores",
        "Filtrar solo logs de nivel ERROR (50)",
        r#"{job="freesquash-api"} | json | level="50""#,
        LOKI_DATASOURCE,
    ),
    QueryDefinition::new(
        "Eventos de negocio",
        "Ver eventos de negocio (partidos, usuarios, cierres)",
        r#"{job="freesquash-api"} | json | type="business_event""#,
        LOKI_DATASOURCE,
    ),
    QueryDefinition::new(
        "Requests HTTP",
        "Ver todas las peticiones HTTP con detalles",
        r#"{job="freesquash-api"} | json | type="http_request""#,
        LOKI_DATASOURCE,
    ),
    QueryDefinition::new(
        "Errores y warnings",
        "Errores (50) y warnings (40)",
        r#"{job="freesquash-api"} | json | level=~"40|50""#,
        LOKI_DATASOURCE,
    ),
    QueryDefinition::new(
        "Requests lentos",
        "Requests HTTP con tiempo de respuesta > 1000ms",
        r#"{job="freesquash-api"} | json | type="http_request" | responseTime > 1000"#,
        LOKI_DATASOURCE,
    ),
    QueryDefinition::new(
        "Partidos creados",
        "Eventos de creación de partidos",
        r#"{job="freesquash-api"} | json | event="match_created""#,
        LOKI_DATASOURCE,
    ),
    QueryDefinition::new(
        "Usuarios registrados",
        "Eventos de registro de usuarios",
        r#"{job="freesquash-api"} | json | event="user_registered""#,
        LOKI_DATASOURCE,
    ),
    QueryDefinition::new(
        "Autenticación",
        "Eventos relacionados con login/logout",
        r#"{job="freesquash-api"} | json | action=~"login|logout""#,
        LOKI_DATASOURCE,
    ),
    QueryDefinition::new(
        "Tasa de errores",
        "Porcentaje de errores sobre total de logs",
        r#"sum(rate({job="freesquash-api"} | json | level="50" [5m])) / sum(rate({job="freesquash-api"} [5m]))"#,
        LOKI_DATASOURCE,
    ),
];

pub const INSTRUCTIONS: Instructions = Instructions {
    es: Cow::Borrowed(
        "Para usar estas consultas: 1) Ve a Explore en Grafana, 2) Selecciona datasource Loki, 3) Pega la query, 4) Haz clic en la estrella para guardar",
    ),
    en: Cow::Borrowed(
        "To use these queries: 1) Go to Explore in Grafana, 2) Select Loki datasource, 3) Paste the query, 4) Click the star to save",
    ),
};
