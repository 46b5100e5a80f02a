// apflow-core/src/domain/sap/mod.rs

pub mod codes;
pub mod records;
pub mod tables;

pub use codes::{AccountType, DebitCreditIndicator, DocumentType};
pub use records::{DocumentHeaderRecord, LineItemRecord, VendorMasterRecord};
pub use tables::SapTable;
