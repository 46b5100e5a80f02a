// apflow-core/src/domain/sap/codes.rs

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::error::DomainError;

/// `BSEG-KOART`. Only vendor and G/L lines make it into the staging table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountType {
    #[serde(rename = "K")]
    Vendor,
    #[serde(rename = "S")]
    GeneralLedger,
    #[serde(rename = "D")]
    Customer,
    #[serde(rename = "A")]
    Asset,
    #[serde(rename = "M")]
    Material,
}

impl AccountType {
    /// Account types retained by the casting stage.
    pub const RETAINED: [AccountType; 2] = [AccountType::Vendor, AccountType::GeneralLedger];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Vendor => "K",
            Self::GeneralLedger => "S",
            Self::Customer => "D",
            Self::Asset => "A",
            Self::Material => "M",
        }
    }

    pub fn is_retained(&self) -> bool {
        Self::RETAINED.contains(self)
    }
}

impl std::str::FromStr for AccountType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "K" => Ok(Self::Vendor),
            "S" => Ok(Self::GeneralLedger),
            "D" => Ok(Self::Customer),
            "A" => Ok(Self::Asset),
            "M" => Ok(Self::Material),
            other => Err(DomainError::UnknownCode {
                kind: "account type",
                code: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// `BSEG-SHKZG`: S (Soll) is a debit, H (Haben) a credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DebitCreditIndicator {
    #[serde(rename = "S")]
    Debit,
    #[serde(rename = "H")]
    Credit,
}

impl DebitCreditIndicator {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Debit => "S",
            Self::Credit => "H",
        }
    }

    /// +1 for a debit, -1 for a credit.
    pub fn sign(&self) -> i8 {
        match self {
            Self::Debit => 1,
            Self::Credit => -1,
        }
    }

    /// Lenient lookup: anything but S/H has no sign.
    pub fn from_code(code: Option<&str>) -> Option<Self> {
        match code.map(str::trim) {
            Some("S") => Some(Self::Debit),
            Some("H") => Some(Self::Credit),
            _ => None,
        }
    }
}

impl fmt::Display for DebitCreditIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// `BKPF-BLART`, restricted to the accounts payable document types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    #[serde(rename = "RE")]
    Invoice,
    #[serde(rename = "KZ")]
    Payment,
    #[serde(rename = "KG")]
    CreditMemo,
}

impl DocumentType {
    pub const ALL: [DocumentType; 3] = [Self::Invoice, Self::Payment, Self::CreditMemo];

    /// Description used for any code outside `ALL`.
    pub const OTHER_DESCRIPTION: &'static str = "Other";

    pub fn code(&self) -> &'static str {
        match self {
            Self::Invoice => "RE",
            Self::Payment => "KZ",
            Self::CreditMemo => "KG",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Invoice => "Invoice",
            Self::Payment => "Payment",
            Self::CreditMemo => "Credit Memo",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|dt| dt.code() == code.trim())
    }

    /// Description for a raw code, "Other" when the code is unknown.
    pub fn describe(code: Option<&str>) -> &'static str {
        code.and_then(Self::from_code)
            .map(|dt| dt.description())
            .unwrap_or(Self::OTHER_DESCRIPTION)
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
