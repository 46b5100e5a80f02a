// apflow-core/src/domain/report/summary.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::error::DomainError;
use crate::ports::QueryResult;

/// One row of the data quality summary view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualitySummary {
    pub total_line_items: u64,
    pub missing_vendor_count: u64,
    pub zero_amount_count: u64,
    pub vendor_not_in_master_count: u64,
    pub unique_vendors: u64,
    pub unique_documents: u64,
    pub invoice_count: u64,
    pub payment_count: u64,
    pub earliest_posting_date: Option<NaiveDate>,
    pub latest_posting_date: Option<NaiveDate>,
    pub net_vendor_liability: Decimal,
}

/// One row of the vendor summary view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorSummary {
    pub vendor_number: String,
    pub vendor_name: Option<String>,
    pub vendor_city: Option<String>,
    pub vendor_country: Option<String>,
    pub document_count: u64,
    pub total_invoices: Decimal,
    pub total_payments: Decimal,
    pub net_open_amount: Decimal,
}

impl QualitySummary {
    /// Aggregates over an empty fact table come back as NULL; they read as 0.
    pub fn from_result(result: &QueryResult) -> Result<Self, DomainError> {
        if result.is_empty() {
            return Ok(Self::default());
        }
        let row = RowReader { result, row: 0 };
        Ok(Self {
            total_line_items: row.count("total_line_items")?,
            missing_vendor_count: row.count("missing_vendor_count")?,
            zero_amount_count: row.count("zero_amount_count")?,
            vendor_not_in_master_count: row.count("vendor_not_in_master_count")?,
            unique_vendors: row.count("unique_vendors")?,
            unique_documents: row.count("unique_documents")?,
            invoice_count: row.count("invoice_count")?,
            payment_count: row.count("payment_count")?,
            earliest_posting_date: row.date("earliest_posting_date")?,
            latest_posting_date: row.date("latest_posting_date")?,
            net_vendor_liability: row.amount("net_vendor_liability")?,
        })
    }
}

impl VendorSummary {
    pub fn from_result(result: &QueryResult) -> Result<Vec<Self>, DomainError> {
        (0..result.rows.len())
            .map(|i| {
                let row = RowReader { result, row: i };
                Ok(Self {
                    vendor_number: row.text("vendor_number").unwrap_or_default(),
                    vendor_name: row.text("vendor_name"),
                    vendor_city: row.text("vendor_city"),
                    vendor_country: row.text("vendor_country"),
                    document_count: row.count("document_count")?,
                    total_invoices: row.amount("total_invoices")?,
                    total_payments: row.amount("total_payments")?,
                    net_open_amount: row.amount("net_open_amount")?,
                })
            })
            .collect()
    }
}

struct RowReader<'a> {
    result: &'a QueryResult,
    row: usize,
}

impl RowReader<'_> {
    fn text(&self, column: &str) -> Option<String> {
        self.result.value(self.row, column).map(str::to_string)
    }

    fn count(&self, column: &str) -> Result<u64, DomainError> {
        match self.result.value(self.row, column) {
            None => Ok(0),
            Some(v) => v.trim().parse().map_err(|_| invalid(column, v)),
        }
    }

    fn amount(&self, column: &str) -> Result<Decimal, DomainError> {
        match self.result.value(self.row, column) {
            None => Ok(Decimal::ZERO),
            Some(v) => Decimal::from_str(v.trim()).map_err(|_| invalid(column, v)),
        }
    }

    fn date(&self, column: &str) -> Result<Option<NaiveDate>, DomainError> {
        self.result
            .value(self.row, column)
            .map(|v| NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d").map_err(|_| invalid(column, v)))
            .transpose()
    }
}

fn invalid(column: &str, value: &str) -> DomainError {
    DomainError::InvalidReportValue {
        column: column.to_string(),
        value: value.to_string(),
    }
}
