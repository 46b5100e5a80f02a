// apflow/src/commands/summary.rs
//
// USE CASE: Print the summary views.

use comfy_table::{CellAlignment, Table, presets::UTF8_FULL};
use std::path::PathBuf;

use apflow_core::application::{load_quality_summary, load_vendor_summaries};

use super::{load_config, open_existing_database};

pub async fn execute(project_dir: PathBuf, vendors: usize) -> anyhow::Result<()> {
    let config = load_config(&project_dir)?;
    let connector = open_existing_database(&project_dir, &config)?;

    let quality = load_quality_summary(&connector, &config).await?;
    let date = |d: Option<chrono::NaiveDate>| d.map(|d| d.to_string()).unwrap_or_else(|| "-".into());

    println!("📊 Data quality ({})", config.tables.quality_summary);
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Metric", "Value"]);
    for (metric, value) in [
        ("Total line items", quality.total_line_items.to_string()),
        ("Missing vendor", quality.missing_vendor_count.to_string()),
        ("Zero amount", quality.zero_amount_count.to_string()),
        ("Vendor not in master", quality.vendor_not_in_master_count.to_string()),
        ("Unique vendors", quality.unique_vendors.to_string()),
        ("Unique documents", quality.unique_documents.to_string()),
        ("Invoice lines", quality.invoice_count.to_string()),
        ("Payment lines", quality.payment_count.to_string()),
        ("Earliest posting date", date(quality.earliest_posting_date)),
        ("Latest posting date", date(quality.latest_posting_date)),
        ("Net vendor liability", quality.net_vendor_liability.to_string()),
    ] {
        table.add_row(vec![metric.to_string(), value]);
    }
    println!("{table}");

    let top = load_vendor_summaries(&connector, &config, Some(vendors)).await?;
    println!("\n🏢 Top {} vendors by net open amount ({})", top.len(), config.tables.vendor_summary);
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        "Vendor", "Name", "City", "Country", "Documents", "Invoices", "Payments", "Net open",
    ]);
    for v in &top {
        table.add_row(vec![
            v.vendor_number.clone(),
            v.vendor_name.clone().unwrap_or_else(|| "NULL".into()),
            v.vendor_city.clone().unwrap_or_default(),
            v.vendor_country.clone().unwrap_or_default(),
            v.document_count.to_string(),
            v.total_invoices.to_string(),
            v.total_payments.to_string(),
            v.net_open_amount.to_string(),
        ]);
    }
    for column in 4..8 {
        if let Some(c) = table.column_mut(column) {
            c.set_cell_alignment(CellAlignment::Right);
        }
    }
    println!("{table}");
    Ok(())
}
