use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// One saved query as it appears in the export file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryDefinition {
    /// Short human label.
    pub name: Cow<'static, str>,
    /// Free-text explanation.
    pub description: Cow<'static, str>,
    /// Query-language string, passed through unmodified.
    pub query: Cow<'static, str>,
    /// Backend the query targets (e.g., Loki).
    pub datasource: Cow<'static, str>,
}

impl QueryDefinition {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        query: &'static str,
        datasource: &'static str,
    ) -> Self {
        Self {
            name: Cow::Borrowed(name),
            description: Cow::Borrowed(description),
            query: Cow::Borrowed(query),
            datasource: Cow::Borrowed(datasource),
        }
    }
}

/// Usage instructions shipped alongside the queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instructions {
    pub es: Cow<'static, str>,
    pub en: Cow<'static, str>,
}

/// The file written by an export run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub queries: Vec<QueryDefinition>,
    pub instructions: Instructions,
}
