// apflow-core/src/ports/mock.rs

// In-memory connector for use case tests: records every statement and
// answers scalar queries from substring rules.

#![allow(clippy::unwrap_used)]

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::error::ApflowError;
use crate::ports::connector::{ColumnSchema, Connector, QueryResult};

#[derive(Clone, Default)]
pub(crate) struct MockConnector {
    pub executed_queries: Arc<Mutex<Vec<String>>>,
    pub registered: Arc<Mutex<Vec<(String, String)>>>,
    scalars: Vec<(String, u64)>,
    fail_on: Option<String>,
}

impl MockConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// `query_scalar` returns `value` for the first rule whose needle appears
    /// in the query, 0 otherwise.
    pub fn with_scalar(mut self, needle: &str, value: u64) -> Self {
        self.scalars.push((needle.to_string(), value));
        self
    }

    /// `execute` fails for statements containing `needle`.
    pub fn failing_on(mut self, needle: &str) -> Self {
        self.fail_on = Some(needle.to_string());
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.executed_queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl Connector for MockConnector {
    async fn execute(&self, query: &str) -> Result<(), ApflowError> {
        self.executed_queries.lock().unwrap().push(query.to_string());
        match &self.fail_on {
            Some(needle) if query.contains(needle.as_str()) => {
                Err(ApflowError::InternalError(format!("mock failure on '{}'", needle)))
            }
            _ => Ok(()),
        }
    }

    async fn fetch_columns(&self, _table_name: &str) -> Result<Vec<ColumnSchema>, ApflowError> {
        Ok(vec![])
    }

    async fn register_source(&self, name: &str, path: &str) -> Result<(), ApflowError> {
        self.registered
            .lock()
            .unwrap()
            .push((name.to_string(), path.to_string()));
        Ok(())
    }

    async fn query_scalar(&self, query: &str) -> Result<u64, ApflowError> {
        self.executed_queries.lock().unwrap().push(query.to_string());
        Ok(self
            .scalars
            .iter()
            .find(|(needle, _)| query.contains(needle.as_str()))
            .map(|(_, v)| *v)
            .unwrap_or(0))
    }

    async fn query_rows(&self, query: &str) -> Result<QueryResult, ApflowError> {
        self.executed_queries.lock().unwrap().push(query.to_string());
        Ok(QueryResult::default())
    }

    fn engine_name(&self) -> &str {
        "mock"
    }
}
