// apflow-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Invalid SQL identifier '{0}'")]
    #[diagnostic(
        code(apflow::domain::identifier),
        help("Table names must match ^[A-Za-z_][A-Za-z0-9_]*$.")
    )]
    InvalidIdentifier(String),

    #[error("Invariant violated on {relation}: {message}")]
    #[diagnostic(code(apflow::domain::invariant))]
    InvariantViolation { relation: String, message: String },

    #[error("Unknown {kind} code '{code}'")]
    #[diagnostic(code(apflow::domain::code))]
    UnknownCode { kind: &'static str, code: String },

    #[error("Invalid report value in column '{column}': {value}")]
    #[diagnostic(code(apflow::domain::report))]
    InvalidReportValue { column: String, value: String },
}
