// End-to-end runs of the pipeline against an in-memory DuckDB.

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;
use tempfile::TempDir;

use apflow_core::ApflowError;
use apflow_core::application::{load_quality_summary, load_vendor_summaries, run_pipeline};
use apflow_core::domain::project::{NetDueDateBasis, ProjectConfig};
use apflow_core::domain::report::{CheckStatus, RunResult};
use apflow_core::domain::sap::{
    DocumentHeaderRecord, LineItemRecord, SapTable, VendorMasterRecord,
};
use apflow_core::infrastructure::adapters::DuckDBConnector;
use apflow_core::infrastructure::compiler::JinjaRenderer;
use apflow_core::infrastructure::extracts::write_extract;
use apflow_core::ports::{Connector, QueryResult};

const FACT_ORDER: &str = "ORDER BY document_number, line_item_number";

fn header(belnr: &str, blart: &str, bldat: &str, budat: &str) -> DocumentHeaderRecord {
    DocumentHeaderRecord {
        mandt: "100".into(),
        bukrs: "1000".into(),
        belnr: belnr.into(),
        gjahr: "2024".into(),
        blart: blart.into(),
        bldat: bldat.into(),
        budat: budat.into(),
        cpudt: bldat.into(),
        waers: "EUR".into(),
        usnam: "USER01".into(),
        ..Default::default()
    }
}

fn item(belnr: &str, buzei: &str, koart: &str, shkzg: &str, dmbtr: &str, lifnr: &str) -> LineItemRecord {
    LineItemRecord {
        mandt: "100".into(),
        bukrs: "1000".into(),
        belnr: belnr.into(),
        gjahr: "2024".into(),
        buzei: buzei.into(),
        koart: koart.into(),
        shkzg: shkzg.into(),
        dmbtr: dmbtr.into(),
        wrbtr: dmbtr.into(),
        lifnr: lifnr.into(),
        ..Default::default()
    }
}

/// Five documents covering the casting and business rule edge cases, plus
/// optionally one line item whose header is missing.
fn write_fixture(data_dir: &Path, with_orphan: bool) -> Result<()> {
    let vendors = vec![VendorMasterRecord {
        mandt: "100".into(),
        lifnr: "0000000001".into(),
        name1: "Siemens AG".into(),
        ort01: "München".into(),
        land1: "DE".into(),
        ..Default::default()
    }];

    let headers = vec![
        header("5100000001", "RE", "20240115", "20240115"),
        header("5100000002", "KZ", "20240210", "20240210"),
        header("5100000003", "XX", "2024-03-05", "2024-03-05"),
        header("5100000004", "RE", "20240220", "20240220"),
        header("5100000005", "KG", "20240301", "notadate"),
    ];

    let mut items = vec![
        // Invoice with thousands separator and payment terms
        item("5100000001", "001", "S", "S", "1,234.56", ""),
        LineItemRecord {
            zfbdt: "20240115".into(),
            zbd1t: "14".into(),
            zbd3t: "30".into(),
            zterm: "0001".into(),
            ..item("5100000001", "002", "K", "H", "1,234.56", "0000000001")
        },
        item("5100000001", "003", "D", "S", "5.00", ""),
        // Payment to a vendor missing from the master, blank amount
        item("5100000002", "001", "K", "S", "250.00", "0000000099"),
        item("5100000002", "002", "S", "H", "", "   "),
        // Unknown indicator, garbage amount, other document type
        item("5100000003", "001", "K", "X", "abc", ""),
        item("5100000003", "002", "A", "S", "1.00", ""),
        // RE / S / 100.00
        item("5100000004", "001", "K", "S", "100.00", "0000000001"),
        item("5100000004", "002", "S", "S", "100.00", ""),
        // Credit memo with an unreadable posting date: no indicator, space
        // as thousands separator, unreadable baseline dates
        item("5100000005", "001", "S", "", "1 234.56", ""),
        LineItemRecord {
            zfbdt: "bad".into(),
            zbd1t: "14".into(),
            ..item("5100000005", "002", "K", "H", " 12 ", "0000000001")
        },
        LineItemRecord {
            zfbdt: "2024-1-5".into(),
            zbd1t: "14".into(),
            ..item("5100000005", "003", "S", "S", "5.00", "")
        },
    ];
    if with_orphan {
        items.push(item("5100000009", "001", "K", "S", "10.00", "0000000001"));
    }

    write_extract(&data_dir.join(SapTable::VendorMaster.default_file_name()), &vendors)?;
    write_extract(&data_dir.join(SapTable::DocumentHeader.default_file_name()), &headers)?;
    write_extract(&data_dir.join(SapTable::LineItems.default_file_name()), &items)?;
    Ok(())
}

struct TestProject {
    dir: TempDir,
    config: ProjectConfig,
    connector: DuckDBConnector,
}

impl TestProject {
    fn new(with_orphan: bool) -> Result<Self> {
        let dir = tempfile::tempdir()?;
        write_fixture(&dir.path().join("data"), with_orphan)?;
        Ok(Self {
            dir,
            config: ProjectConfig::new("sap_ap_test", "1.0"),
            connector: DuckDBConnector::new(":memory:")?,
        })
    }

    async fn run_at(&self, ts: DateTime<Utc>) -> Result<RunResult, ApflowError> {
        run_pipeline(
            &JinjaRenderer::new(),
            self.dir.path(),
            &self.config,
            &self.connector,
            ts,
        )
        .await
    }

    async fn run(&self) -> Result<RunResult> {
        Ok(self.run_at(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()).await?)
    }

    async fn fact(&self, columns: &str) -> Result<QueryResult> {
        Ok(self
            .connector
            .query_rows(&format!("SELECT {} FROM accounts_payable_fact {}", columns, FACT_ORDER))
            .await?)
    }
}

fn row_of(result: &QueryResult, belnr: &str, buzei: &str) -> Result<usize> {
    (0..result.rows.len())
        .find(|&i| {
            result.value(i, "document_number") == Some(belnr)
                && result.value(i, "line_item_number") == Some(buzei)
        })
        .with_context(|| format!("row {}/{} not found", belnr, buzei))
}

#[tokio::test]
async fn test_only_vendor_and_gl_lines_are_kept() -> Result<()> {
    let project = TestProject::new(false)?;
    let result = project.run().await?;

    assert!(result.success);
    assert_eq!(result.stage("accounts_payable_staging").unwrap().row_count, Some(10));
    assert_eq!(result.stage("accounts_payable_fact").unwrap().row_count, Some(10));

    let fact = project.fact("document_number, line_item_number, account_type").await?;
    assert!(
        (0..fact.rows.len()).all(|i| matches!(fact.value(i, "account_type"), Some("K") | Some("S")))
    );
    // Leading zeros survive.
    assert_eq!(fact.value(0, "line_item_number"), Some("001"));
    Ok(())
}

#[tokio::test]
async fn test_casting_of_dates_and_amounts() -> Result<()> {
    let project = TestProject::new(false)?;
    project.run().await?;

    let fact = project
        .fact("document_number, line_item_number, posting_date, amount_local_currency, fiscal_year")
        .await?;

    let invoice = row_of(&fact, "5100000001", "001")?;
    assert_eq!(fact.value(invoice, "posting_date"), Some("2024-01-15"));
    assert_eq!(fact.value(invoice, "amount_local_currency"), Some("1234.56"));
    assert_eq!(fact.value(invoice, "fiscal_year"), Some("2024"));

    let blank = row_of(&fact, "5100000002", "002")?;
    assert_eq!(fact.value(blank, "amount_local_currency"), Some("0.00"));

    let garbage = row_of(&fact, "5100000003", "001")?;
    assert_eq!(fact.value(garbage, "amount_local_currency"), None);
    assert_eq!(fact.value(garbage, "posting_date"), Some("2024-03-05"));

    let spaced = row_of(&fact, "5100000005", "001")?;
    assert_eq!(fact.value(spaced, "amount_local_currency"), Some("1234.56"));
    // Unreadable date: NULL, row kept
    assert_eq!(fact.value(spaced, "posting_date"), None);
    let padded = row_of(&fact, "5100000005", "002")?;
    assert_eq!(fact.value(padded, "amount_local_currency"), Some("12.00"));

    let columns = project.connector.fetch_columns("accounts_payable_staging").await?;
    let type_of = |name: &str| {
        columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.data_type.clone())
    };
    assert_eq!(type_of("amount_local_currency").as_deref(), Some("DECIMAL(15,2)"));
    assert_eq!(type_of("posting_date").as_deref(), Some("DATE"));
    assert_eq!(type_of("fiscal_year").as_deref(), Some("INTEGER"));
    Ok(())
}

#[tokio::test]
async fn test_signed_amount_and_liability() -> Result<()> {
    let project = TestProject::new(false)?;
    project.run().await?;

    let fact = project
        .fact(
            "document_number, line_item_number, signed_amount, vendor_liability_amount, \
             document_type, document_type_description",
        )
        .await?;

    // RE / S / 100.00 on a vendor line and on a GL line
    let vendor_line = row_of(&fact, "5100000004", "001")?;
    assert_eq!(fact.value(vendor_line, "document_type_description"), Some("Invoice"));
    assert_eq!(fact.value(vendor_line, "signed_amount"), Some("100.00"));
    assert_eq!(fact.value(vendor_line, "vendor_liability_amount"), Some("100.00"));
    let gl_line = row_of(&fact, "5100000004", "002")?;
    assert_eq!(fact.value(gl_line, "signed_amount"), Some("100.00"));
    assert_eq!(fact.value(gl_line, "vendor_liability_amount"), Some("0.00"));

    let credit = row_of(&fact, "5100000001", "002")?;
    assert_eq!(fact.value(credit, "signed_amount"), Some("-1234.56"));

    let unknown_indicator = row_of(&fact, "5100000003", "001")?;
    assert_eq!(fact.value(unknown_indicator, "signed_amount"), Some("0.00"));
    assert_eq!(fact.value(unknown_indicator, "document_type"), Some("XX"));
    assert_eq!(fact.value(unknown_indicator, "document_type_description"), Some("Other"));

    let payment = row_of(&fact, "5100000002", "001")?;
    assert_eq!(fact.value(payment, "document_type_description"), Some("Payment"));

    let no_indicator = row_of(&fact, "5100000005", "001")?;
    assert_eq!(fact.value(no_indicator, "signed_amount"), Some("0.00"));
    assert_eq!(fact.value(no_indicator, "document_type_description"), Some("Credit Memo"));
    let credit_memo_vendor = row_of(&fact, "5100000005", "002")?;
    assert_eq!(fact.value(credit_memo_vendor, "signed_amount"), Some("-12.00"));
    assert_eq!(fact.value(credit_memo_vendor, "vendor_liability_amount"), Some("12.00"));
    Ok(())
}

#[tokio::test]
async fn test_vendor_flags() -> Result<()> {
    let project = TestProject::new(false)?;
    project.run().await?;

    let fact = project
        .fact(
            "document_number, line_item_number, vendor_number, vendor_name, \
             is_missing_vendor, is_vendor_not_in_master, is_zero_amount",
        )
        .await?;

    for i in 0..fact.rows.len() {
        let missing = fact.value(i, "is_missing_vendor") == Some("1");
        assert_eq!(missing, fact.value(i, "vendor_number").is_none(), "row {}", i);
    }

    let whitespace_vendor = row_of(&fact, "5100000002", "002")?;
    assert_eq!(fact.value(whitespace_vendor, "is_missing_vendor"), Some("1"));
    assert_eq!(fact.value(whitespace_vendor, "is_zero_amount"), Some("1"));

    // Vendor number present but absent from the master: row kept, name NULL
    let unknown_vendor = row_of(&fact, "5100000002", "001")?;
    assert_eq!(fact.value(unknown_vendor, "vendor_number"), Some("0000000099"));
    assert_eq!(fact.value(unknown_vendor, "is_vendor_not_in_master"), Some("1"));
    assert_eq!(fact.value(unknown_vendor, "is_missing_vendor"), Some("0"));
    assert_eq!(fact.value(unknown_vendor, "vendor_name"), None);

    let known_vendor = row_of(&fact, "5100000004", "001")?;
    assert_eq!(fact.value(known_vendor, "vendor_name"), Some("Siemens AG"));
    assert_eq!(fact.value(known_vendor, "is_vendor_not_in_master"), Some("0"));
    Ok(())
}

#[tokio::test]
async fn test_due_dates_follow_configured_basis() -> Result<()> {
    let mut project = TestProject::new(false)?;
    project.run().await?;

    let columns = "document_number, line_item_number, net_due_date, cash_discount_due_date";
    let fact = project.fact(columns).await?;
    let row = row_of(&fact, "5100000001", "002")?;
    assert_eq!(fact.value(row, "cash_discount_due_date"), Some("2024-01-29"));
    assert_eq!(fact.value(row, "net_due_date"), Some("2024-01-29"));

    // No baseline date: no due date
    let gl = row_of(&fact, "5100000001", "001")?;
    assert_eq!(fact.value(gl, "net_due_date"), None);

    // Unreadable baseline dates, including a delimited 8-character value
    for buzei in ["002", "003"] {
        let row = row_of(&fact, "5100000005", buzei)?;
        assert_eq!(fact.value(row, "cash_discount_due_date"), None);
        assert_eq!(fact.value(row, "net_due_date"), None);
    }

    project.config.net_due_date_basis = NetDueDateBasis::NetDays;
    project.run().await?;
    let fact = project.fact(columns).await?;
    let row = row_of(&fact, "5100000001", "002")?;
    assert_eq!(fact.value(row, "cash_discount_due_date"), Some("2024-01-29"));
    assert_eq!(fact.value(row, "net_due_date"), Some("2024-02-14"));
    Ok(())
}

#[tokio::test]
async fn test_rerun_is_identical_except_timestamp() -> Result<()> {
    let project = TestProject::new(false)?;
    let snapshot = "SELECT * EXCLUDE (etl_load_timestamp) FROM accounts_payable_fact \
                    ORDER BY document_number, line_item_number";

    project.run_at(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()).await?;
    let mut first = project.connector.query_rows(snapshot).await?;
    let first_ts = project
        .connector
        .query_rows("SELECT DISTINCT etl_load_timestamp FROM accounts_payable_fact")
        .await?;

    project.run_at(Utc.with_ymd_and_hms(2024, 6, 2, 0, 0, 0).unwrap()).await?;
    let mut second = project.connector.query_rows(snapshot).await?;
    let second_ts = project
        .connector
        .query_rows("SELECT DISTINCT etl_load_timestamp FROM accounts_payable_fact")
        .await?;

    first.rows.sort();
    second.rows.sort();
    assert_eq!(first, second);
    assert_eq!(first_ts.rows.len(), 1);
    assert_eq!(first_ts.value(0, "etl_load_timestamp"), Some("2024-06-01 00:00:00"));
    assert_eq!(second_ts.value(0, "etl_load_timestamp"), Some("2024-06-02 00:00:00"));
    Ok(())
}

#[tokio::test]
async fn test_summary_views() -> Result<()> {
    let project = TestProject::new(false)?;
    project.run().await?;

    let quality = load_quality_summary(&project.connector, &project.config).await?;
    assert_eq!(quality.total_line_items, 10);
    assert_eq!(quality.missing_vendor_count, 6);
    assert_eq!(quality.zero_amount_count, 1);
    assert_eq!(quality.vendor_not_in_master_count, 7);
    assert_eq!(quality.unique_vendors, 2);
    assert_eq!(quality.unique_documents, 5);
    assert_eq!(quality.invoice_count, 4);
    assert_eq!(quality.payment_count, 2);
    assert_eq!(quality.earliest_posting_date.map(|d| d.to_string()).as_deref(), Some("2024-01-15"));
    assert_eq!(quality.latest_posting_date.map(|d| d.to_string()).as_deref(), Some("2024-03-05"));
    assert_eq!(quality.net_vendor_liability, Decimal::from_str("443.00")?);

    let vendors = load_vendor_summaries(&project.connector, &project.config, None).await?;
    assert_eq!(vendors.len(), 2);
    assert_eq!(vendors[0].vendor_number, "0000000001");
    assert_eq!(vendors[0].vendor_name.as_deref(), Some("Siemens AG"));
    assert_eq!(vendors[0].document_count, 3);
    assert_eq!(vendors[0].total_invoices, Decimal::from_str("1334.56")?);
    assert_eq!(vendors[0].net_open_amount, Decimal::from_str("1346.56")?);
    assert_eq!(vendors[1].vendor_number, "0000000099");
    assert_eq!(vendors[1].vendor_name, None);
    assert_eq!(vendors[1].total_payments, Decimal::from_str("250.00")?);

    let top = load_vendor_summaries(&project.connector, &project.config, Some(1)).await?;
    assert_eq!(top.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_line_items_without_header_warn() -> Result<()> {
    let project = TestProject::new(true)?;
    let result = project.run().await?;

    assert!(result.success);
    assert_eq!(result.stage("accounts_payable_staging").unwrap().row_count, Some(10));
    let warnings: Vec<_> = result.warnings().collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].name, "staging_matches_line_items");
    Ok(())
}

#[tokio::test]
async fn test_line_items_without_header_fail_in_strict_mode() -> Result<()> {
    let mut project = TestProject::new(true)?;
    project.config.strict = true;

    let err = project.run().await.unwrap_err();
    assert!(err.to_string().contains("staging_matches_line_items"));

    let report: RunResult = serde_json::from_str(&std::fs::read_to_string(
        project.dir.path().join("target/run_results.json"),
    )?)?;
    assert!(!report.success);
    assert!(report.checks.iter().any(|c| c.status == CheckStatus::Fail));
    Ok(())
}

#[tokio::test]
async fn test_generated_sample_data_runs_clean() -> Result<()> {
    use apflow_core::application::{GenerateOptions, generate_dataset, write_dataset};

    let dir = tempfile::tempdir()?;
    let dataset = generate_dataset(&GenerateOptions {
        seed: 42,
        vendors: 20,
        documents_per_year: 30,
        years: vec![2023, 2024],
    })?;
    write_dataset(&dataset, &dir.path().join("data"))?;

    let connector = DuckDBConnector::new(":memory:")?;
    let config = ProjectConfig::new("generated", "1.0");
    let result = run_pipeline(&JinjaRenderer::new(), dir.path(), &config, &connector, Utc::now()).await?;

    assert!(result.success);
    assert_eq!(result.warnings().count(), 0);
    assert_eq!(
        result.stage("accounts_payable_fact").unwrap().row_count,
        Some(dataset.line_items.len() as u64)
    );

    let quality = load_quality_summary(&connector, &config).await?;
    assert_eq!(quality.unique_documents, 60);
    assert_eq!(quality.vendor_not_in_master_count, quality.missing_vendor_count);
    // Every generated document balances.
    assert_eq!(quality.net_vendor_liability, Decimal::ZERO);
    Ok(())
}
