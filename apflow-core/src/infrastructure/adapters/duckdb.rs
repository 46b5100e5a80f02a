// apflow-core/src/infrastructure/adapters/duckdb.rs

use async_trait::async_trait;
use duckdb::{Config, Connection};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

use crate::error::ApflowError;
use crate::infrastructure::error::{DatabaseError, InfrastructureError};
use crate::ports::connector::{ColumnSchema, Connector, QueryResult};

pub struct DuckDBConnector {
    conn: Arc<Mutex<Connection>>,
}

impl DuckDBConnector {
    pub fn new(db_path: &str) -> Result<Self, InfrastructureError> {
        let config = Config::default();

        let conn = if db_path == ":memory:" {
            Connection::open_in_memory_with_flags(config)?
        } else {
            Connection::open_with_flags(db_path, config)?
        };

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, ApflowError> {
        self.conn.lock().map_err(|_| {
            ApflowError::Infrastructure(InfrastructureError::Database(DatabaseError::Poisoned))
        })
    }
}

/// Single-quoted SQL string literal.
fn sql_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

#[async_trait]
impl Connector for DuckDBConnector {
    async fn execute(&self, query: &str) -> Result<(), ApflowError> {
        let conn = self.lock()?;
        conn.execute_batch(query)?;
        Ok(())
    }

    async fn fetch_columns(&self, table_name: &str) -> Result<Vec<ColumnSchema>, ApflowError> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", sql_literal(table_name)))?;

        let rows = stmt.query_map([], |row| {
            Ok(ColumnSchema {
                name: row.get("name")?,
                data_type: row.get("type")?,
                is_nullable: !row.get::<_, bool>("notnull")?,
            })
        })?;

        let mut columns = Vec::new();
        for row in rows {
            columns.push(row?);
        }

        Ok(columns)
    }

    async fn register_source(&self, name: &str, path: &str) -> Result<(), ApflowError> {
        // all_varchar: SAP keys carry leading zeros and dates look like integers,
        // typing belongs to the casting stage.
        let query = format!(
            "CREATE OR REPLACE VIEW \"{}\" AS SELECT * FROM read_csv({}, header = true, all_varchar = true)",
            name,
            sql_literal(path)
        );
        debug!(source = name, path, "Registering source");
        self.execute(&query).await
    }

    async fn query_scalar(&self, query: &str) -> Result<u64, ApflowError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(query)?;
        let mut rows = stmt.query([])?;

        let row = rows
            .next()?
            .ok_or_else(|| ApflowError::InternalError("No scalar value returned".into()))?;

        let value: Option<i64> = row.get(0)?;
        u64::try_from(value.unwrap_or(0))
            .map_err(|_| ApflowError::InternalError(format!("Negative scalar from: {}", query)))
    }

    async fn query_rows(&self, query: &str) -> Result<QueryResult, ApflowError> {
        let query = query.trim().trim_end_matches(';');
        let conn = self.lock()?;

        // Column names first, then every value cast to text by the engine.
        let mut describe = conn.prepare(&format!("DESCRIBE {}", query))?;
        let columns: Vec<String> = describe
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        let mut stmt = conn.prepare(&format!("SELECT COLUMNS(*)::VARCHAR FROM ({})", query))?;
        let mut rows = stmt.query([])?;

        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(columns.len());
            for i in 0..columns.len() {
                values.push(row.get::<_, Option<String>>(i)?);
            }
            out.push(values);
        }

        Ok(QueryResult { columns, rows: out })
    }

    fn engine_name(&self) -> &str {
        "duckdb"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::io::Write;

    #[tokio::test]
    async fn test_duckdb_flow() -> Result<()> {
        let connector = DuckDBConnector::new(":memory:")?;

        connector
            .execute("CREATE TABLE vendors (lifnr VARCHAR, open_amount DECIMAL(15,2))")
            .await?;

        let columns = connector.fetch_columns("vendors").await?;
        assert_eq!(columns.len(), 2);

        let lifnr = columns
            .iter()
            .find(|c| c.name == "lifnr")
            .ok_or_else(|| anyhow::anyhow!("Column 'lifnr' not found"))?;
        assert_eq!(lifnr.data_type, "VARCHAR");
        Ok(())
    }

    #[tokio::test]
    async fn test_query_rows_renders_text_and_nulls() -> Result<()> {
        let connector = DuckDBConnector::new(":memory:")?;
        let result = connector
            .query_rows("SELECT 42 AS answer, NULL::VARCHAR AS nothing, DATE '2024-01-15' AS d;")
            .await?;

        assert_eq!(result.columns, vec!["answer", "nothing", "d"]);
        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.value(0, "answer"), Some("42"));
        assert_eq!(result.value(0, "nothing"), None);
        assert_eq!(result.value(0, "d"), Some("2024-01-15"));
        Ok(())
    }

    #[tokio::test]
    async fn test_query_scalar_counts() -> Result<()> {
        let connector = DuckDBConnector::new(":memory:")?;
        let count = connector
            .query_scalar("SELECT count(*) FROM range(7)")
            .await?;
        assert_eq!(count, 7);
        Ok(())
    }

    #[tokio::test]
    async fn test_register_source_keeps_leading_zeros() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("sap_bseg_line_items.csv");
        let mut file = std::fs::File::create(&path)?;
        writeln!(file, "BUZEI,GJAHR,LIFNR")?;
        writeln!(file, "001,2024,")?;
        drop(file);

        let connector = DuckDBConnector::new(":memory:")?;
        connector
            .register_source("bseg", &path.to_string_lossy())
            .await?;

        let result = connector.query_rows("SELECT * FROM bseg").await?;
        assert_eq!(result.value(0, "BUZEI"), Some("001"));
        assert_eq!(result.value(0, "GJAHR"), Some("2024"));
        assert_eq!(result.value(0, "LIFNR"), None);

        let columns = connector.fetch_columns("bseg").await?;
        assert!(columns.iter().all(|c| c.data_type == "VARCHAR"));
        Ok(())
    }

    #[tokio::test]
    async fn test_duckdb_error() -> Result<()> {
        let connector = DuckDBConnector::new(":memory:")?;
        let result = connector.execute("SELECT * FROM non_existent_table").await;
        assert!(result.is_err());
        Ok(())
    }
}
