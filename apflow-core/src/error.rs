// apflow-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum ApflowError {
    // --- DOMAIN ERRORS (codes, identifiers, invariants) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE ERRORS (IO, parsing, SQL engine) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Infrastructure(#[from] InfrastructureError),

    // --- GENERIC / APPLICATION ERRORS ---
    #[error("Internal Error: {0}")]
    #[diagnostic(code(apflow::internal))]
    InternalError(String),

    #[error("Stage '{stage}' failed: {source}")]
    #[diagnostic(
        code(apflow::stage),
        help("The executed DDL was written to the target/compiled directory.")
    )]
    StageFailed {
        stage: String,
        #[source]
        source: Box<ApflowError>,
    },

    #[error("Unsafe path traversal detected: {0}")]
    #[diagnostic(code(apflow::unsafe_path))]
    UnsafePath(String),
}

// Manual implementation to avoid duplicate enum variant but keep ergonomics
impl From<std::io::Error> for ApflowError {
    fn from(err: std::io::Error) -> Self {
        ApflowError::Infrastructure(InfrastructureError::Io(err))
    }
}

impl From<duckdb::Error> for ApflowError {
    fn from(err: duckdb::Error) -> Self {
        ApflowError::Infrastructure(InfrastructureError::from(err))
    }
}
