// apflow-core/src/application/validation.rs

// Post-flight checks. They run once every stage has been materialized and
// compare row counts across the raw line items, staging and fact tables.

use tracing::{info, warn};

use crate::domain::compiler::quote_identifier;
use crate::domain::project::ProjectConfig;
use crate::domain::report::{CheckOutcome, CheckStatus};
use crate::domain::sap::SapTable;
use crate::domain::transform::rules;
use crate::error::ApflowError;
use crate::ports::connector::Connector;

pub const CHECK_FACT_MATCHES_STAGING: &str = "fact_matches_staging";
pub const CHECK_STAGING_MATCHES_LINE_ITEMS: &str = "staging_matches_line_items";
pub const CHECK_FACT_KEY_UNIQUE: &str = "fact_key_unique";

/// Key of one line item in the fact table.
const FACT_KEY: &str = "mandt, company_code, document_number, fiscal_year, line_item_number";

pub async fn run_checks(
    connector: &dyn Connector,
    config: &ProjectConfig,
) -> Result<Vec<CheckOutcome>, ApflowError> {
    let staging = quote_identifier(&config.tables.staging)?;
    let fact = quote_identifier(&config.tables.fact)?;

    let staging_rows = count(connector, &format!("SELECT COUNT(*) FROM {}", staging)).await?;
    let fact_rows = count(connector, &format!("SELECT COUNT(*) FROM {}", fact)).await?;

    let mut outcomes = Vec::with_capacity(3);

    // 1. The business rule stage derives columns only, never rows.
    outcomes.push(if fact_rows == staging_rows {
        CheckOutcome::pass(
            CHECK_FACT_MATCHES_STAGING,
            format!("{} rows in both tables", fact_rows),
        )
    } else {
        CheckOutcome::fail(
            CHECK_FACT_MATCHES_STAGING,
            format!("fact has {} rows, staging has {}", fact_rows, staging_rows),
        )
    });

    // 2. Retained line items without a header are dropped by the inner join.
    let retained_rows = count(
        connector,
        &format!(
            "SELECT COUNT(*) FROM \"{}\" WHERE KOART IN ({})",
            SapTable::LineItems.relation(),
            rules::retained_account_types()
        ),
    )
    .await?;
    outcomes.push(if retained_rows == staging_rows {
        CheckOutcome::pass(
            CHECK_STAGING_MATCHES_LINE_ITEMS,
            format!("{} retained line items staged", staging_rows),
        )
    } else {
        soft_failure(
            config.strict,
            CHECK_STAGING_MATCHES_LINE_ITEMS,
            format!(
                "{} retained line items but {} staged rows (line items without a document header?)",
                retained_rows, staging_rows
            ),
        )
    });

    // 3. Duplicate keys in the extracts fan out through the joins.
    let duplicate_keys = count(
        connector,
        &format!(
            "SELECT COUNT(*) FROM (SELECT 1 FROM {} GROUP BY {} HAVING COUNT(*) > 1)",
            fact, FACT_KEY
        ),
    )
    .await?;
    outcomes.push(if duplicate_keys == 0 {
        CheckOutcome::pass(CHECK_FACT_KEY_UNIQUE, "no duplicate line item keys")
    } else {
        soft_failure(
            config.strict,
            CHECK_FACT_KEY_UNIQUE,
            format!("{} line item keys occur more than once", duplicate_keys),
        )
    });

    for outcome in &outcomes {
        match outcome.status {
            CheckStatus::Pass => info!(check = %outcome.name, "{}", outcome.message),
            CheckStatus::Warning | CheckStatus::Fail => {
                warn!(check = %outcome.name, status = ?outcome.status, "{}", outcome.message)
            }
        }
    }

    Ok(outcomes)
}

fn soft_failure(strict: bool, name: &str, message: String) -> CheckOutcome {
    if strict {
        CheckOutcome::fail(name, message)
    } else {
        CheckOutcome::warning(name, message)
    }
}

async fn count(connector: &dyn Connector, sql: &str) -> Result<u64, ApflowError> {
    connector.query_scalar(sql).await
}
