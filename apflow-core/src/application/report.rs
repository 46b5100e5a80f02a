// apflow-core/src/application/report.rs

// Reads the summary views back into typed report rows.

use tracing::instrument;

use crate::domain::compiler::quote_identifier;
use crate::domain::project::ProjectConfig;
use crate::domain::report::{QualitySummary, VendorSummary};
use crate::error::ApflowError;
use crate::ports::connector::Connector;

#[instrument(skip_all)]
pub async fn load_quality_summary(
    connector: &dyn Connector,
    config: &ProjectConfig,
) -> Result<QualitySummary, ApflowError> {
    let view = quote_identifier(&config.tables.quality_summary)?;
    let result = connector
        .query_rows(&format!("SELECT * FROM {}", view))
        .await?;
    Ok(QualitySummary::from_result(&result)?)
}

/// Vendors by descending net open amount. `limit = None` returns all of them.
#[instrument(skip(connector, config))]
pub async fn load_vendor_summaries(
    connector: &dyn Connector,
    config: &ProjectConfig,
    limit: Option<usize>,
) -> Result<Vec<VendorSummary>, ApflowError> {
    let view = quote_identifier(&config.tables.vendor_summary)?;
    let mut sql = format!(
        "SELECT * FROM {} ORDER BY net_open_amount DESC, vendor_number",
        view
    );
    if let Some(n) = limit {
        sql.push_str(&format!(" LIMIT {}", n));
    }
    let result = connector.query_rows(&sql).await?;
    Ok(VendorSummary::from_result(&result)?)
}
