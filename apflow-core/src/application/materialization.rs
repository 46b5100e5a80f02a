// apflow-core/src/application/materialization.rs

use tracing::debug;

use crate::domain::compiler::quote_identifier;
use crate::domain::transform::{StageDefinition, StageKind};
use crate::error::ApflowError;
use crate::ports::connector::Connector;

pub struct Materializer;

impl Materializer {
    /// DDL replacing the stage's relation with the result of `select_sql`.
    /// Every run is a full recompute, there is no incremental strategy.
    pub fn ddl(stage: &StageDefinition, select_sql: &str) -> Result<String, ApflowError> {
        let name = quote_identifier(&stage.name)?;
        let ddl = match stage.kind {
            StageKind::Table => format!("CREATE OR REPLACE TABLE {} AS\n{}", name, select_sql),
            StageKind::View => format!("CREATE OR REPLACE VIEW {} AS\n{}", name, select_sql),
        };
        Ok(ddl)
    }

    /// Runs the DDL of one stage. A failure is wrapped with the stage name.
    pub async fn materialize(
        connector: &dyn Connector,
        stage: &StageDefinition,
        ddl: &str,
    ) -> Result<(), ApflowError> {
        debug!(stage = %stage.name, "Executing DDL:\n{}", ddl);
        connector
            .execute(ddl)
            .await
            .map_err(|e| ApflowError::StageFailed {
                stage: stage.name.clone(),
                source: Box::new(e),
            })
    }
}
