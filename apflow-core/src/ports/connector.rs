// apflow-core/src/ports/connector.rs

// What the pipeline needs from a SQL engine, without knowing which one runs it.

use crate::error::ApflowError;
use async_trait::async_trait;

/// A column as reported by the engine catalog.
#[derive(Debug, Clone)]
pub struct ColumnSchema {
    pub name: String,
    pub data_type: String,
    pub is_nullable: bool,
}

/// A fully materialized result set. Every value is rendered as text by the
/// engine (NULL stays `None`), typed decoding happens in the domain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl QueryResult {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.eq_ignore_ascii_case(name))
    }

    /// Value of `column` in row `row`, `None` for NULL or an unknown column.
    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)?.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[async_trait]
pub trait Connector: Send + Sync {
    async fn execute(&self, query: &str) -> Result<(), ApflowError>;

    async fn fetch_columns(&self, table_name: &str) -> Result<Vec<ColumnSchema>, ApflowError>;

    /// Exposes a delimited extract as a relation named `name`.
    async fn register_source(&self, name: &str, path: &str) -> Result<(), ApflowError>;

    async fn query_scalar(&self, query: &str) -> Result<u64, ApflowError>;

    async fn query_rows(&self, query: &str) -> Result<QueryResult, ApflowError>;

    fn engine_name(&self) -> &str;
}
