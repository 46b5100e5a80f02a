// apflow-core/src/application/engine.rs

use std::time::Instant;
use tracing::{debug, error, instrument};

use crate::error::ApflowError;
use crate::ports::connector::{Connector, QueryResult};

/// Runs an ad-hoc query with timing, returning every row as text.
#[instrument(skip(connector), fields(query.len = query.len()))]
pub async fn execute_query(connector: &dyn Connector, query: &str) -> Result<QueryResult, ApflowError> {
    let start = Instant::now();
    debug!("Executing query: {}", query);

    let result = connector.query_rows(query).await;
    let duration = start.elapsed();

    match result {
        Ok(rows) => {
            debug!(rows = rows.rows.len(), "Query finished in {:.2?}", duration);
            Ok(rows)
        }
        Err(e) => {
            error!("Query failed after {:.2?}: {}", duration, e);
            Err(e)
        }
    }
}
