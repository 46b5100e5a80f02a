// apflow-core/src/domain/project/configuration.rs

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::compiler::validate_identifier;
use crate::domain::error::DomainError;
use crate::domain::sap::SapTable;

/// Which day count drives `net_due_date`.
///
/// The observed business logic adds the first cash discount tier (ZBD1T) to
/// the baseline date for both due dates, which makes `net_due_date` a copy of
/// `cash_discount_due_date`. `NetDays` uses ZBD3T (net payment days) instead.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum NetDueDateBasis {
    #[default]
    DiscountDays,
    NetDays,
}

impl NetDueDateBasis {
    /// Staging column holding the day count.
    pub fn staging_column(&self) -> &'static str {
        match self {
            Self::DiscountDays => "cash_discount_days_1",
            Self::NetDays => "net_payment_days",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProjectConfig {
    pub name: String,
    pub version: String,

    #[serde(rename = "database-path", default = "default_database_path")]
    pub database_path: String,

    #[serde(rename = "target-path", default = "default_target_path")]
    pub target_path: String,

    #[serde(rename = "clean-targets", default = "default_clean_targets")]
    pub clean_targets: Vec<String>,

    #[serde(rename = "data-dir", default = "default_data_dir")]
    pub data_dir: String,

    #[serde(default)]
    pub sources: SourcePaths,

    #[serde(default)]
    pub tables: TableNames,

    #[serde(rename = "net-due-date-basis", default)]
    pub net_due_date_basis: NetDueDateBasis,

    /// Turns post-flight warnings into errors.
    #[serde(default)]
    pub strict: bool,
}

impl ProjectConfig {
    /// Minimal configuration with every default applied.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            database_path: default_database_path(),
            target_path: default_target_path(),
            clean_targets: default_clean_targets(),
            data_dir: default_data_dir(),
            sources: SourcePaths::default(),
            tables: TableNames::default(),
            net_due_date_basis: NetDueDateBasis::default(),
            strict: false,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        self.tables.validate()
    }
}

/// Extract locations, relative to `data-dir` unless absolute.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct SourcePaths {
    #[serde(default = "default_vendor_master")]
    pub vendor_master: PathBuf,
    #[serde(default = "default_document_header")]
    pub document_header: PathBuf,
    #[serde(default = "default_line_items")]
    pub line_items: PathBuf,
}

impl SourcePaths {
    pub fn get(&self, table: SapTable) -> &PathBuf {
        match table {
            SapTable::VendorMaster => &self.vendor_master,
            SapTable::DocumentHeader => &self.document_header,
            SapTable::LineItems => &self.line_items,
        }
    }
}

impl Default for SourcePaths {
    fn default() -> Self {
        Self {
            vendor_master: default_vendor_master(),
            document_header: default_document_header(),
            line_items: default_line_items(),
        }
    }
}

/// Names of the relations the pipeline creates.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct TableNames {
    #[serde(default = "default_staging")]
    pub staging: String,
    #[serde(default = "default_fact")]
    pub fact: String,
    #[serde(default = "default_quality_summary")]
    pub quality_summary: String,
    #[serde(default = "default_vendor_summary")]
    pub vendor_summary: String,
}

impl TableNames {
    pub fn validate(&self) -> Result<(), DomainError> {
        for name in [
            &self.staging,
            &self.fact,
            &self.quality_summary,
            &self.vendor_summary,
        ] {
            validate_identifier(name)?;
        }
        Ok(())
    }
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            staging: default_staging(),
            fact: default_fact(),
            quality_summary: default_quality_summary(),
            vendor_summary: default_vendor_summary(),
        }
    }
}

fn default_database_path() -> String {
    "apflow.duckdb".to_string()
}
fn default_target_path() -> String {
    "target".to_string()
}
fn default_clean_targets() -> Vec<String> {
    vec!["target".to_string()]
}
fn default_data_dir() -> String {
    "data".to_string()
}
fn default_vendor_master() -> PathBuf {
    PathBuf::from(SapTable::VendorMaster.default_file_name())
}
fn default_document_header() -> PathBuf {
    PathBuf::from(SapTable::DocumentHeader.default_file_name())
}
fn default_line_items() -> PathBuf {
    PathBuf::from(SapTable::LineItems.default_file_name())
}
fn default_staging() -> String {
    "accounts_payable_staging".to_string()
}
fn default_fact() -> String {
    "accounts_payable_fact".to_string()
}
fn default_quality_summary() -> String {
    "ap_data_quality_summary".to_string()
}
fn default_vendor_summary() -> String {
    "ap_vendor_summary".to_string()
}
