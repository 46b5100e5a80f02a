// apflow-core/src/domain/sap/tables.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three raw SAP extracts consumed by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SapTable {
    /// LFA1, vendor master.
    VendorMaster,
    /// BKPF, accounting document header.
    DocumentHeader,
    /// BSEG, accounting document line items.
    LineItems,
}

impl SapTable {
    pub const ALL: [SapTable; 3] = [Self::VendorMaster, Self::DocumentHeader, Self::LineItems];

    pub fn sap_name(&self) -> &'static str {
        match self {
            Self::VendorMaster => "LFA1",
            Self::DocumentHeader => "BKPF",
            Self::LineItems => "BSEG",
        }
    }

    /// Name of the raw relation registered in the engine.
    pub fn relation(&self) -> &'static str {
        match self {
            Self::VendorMaster => "lfa1",
            Self::DocumentHeader => "bkpf",
            Self::LineItems => "bseg",
        }
    }

    pub fn default_file_name(&self) -> &'static str {
        match self {
            Self::VendorMaster => "sap_lfa1_vendor_master.csv",
            Self::DocumentHeader => "sap_bkpf_document_header.csv",
            Self::LineItems => "sap_bseg_line_items.csv",
        }
    }

    /// File name prefix used when searching a data directory for the extract.
    pub fn file_prefix(&self) -> &'static str {
        match self {
            Self::VendorMaster => "sap_lfa1",
            Self::DocumentHeader => "sap_bkpf",
            Self::LineItems => "sap_bseg",
        }
    }

    pub fn from_relation(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.relation().eq_ignore_ascii_case(name) || t.sap_name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for SapTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sap_name())
    }
}
