// apflow-core/src/domain/compiler/identifier.rs

use regex::Regex;
use std::sync::OnceLock;

use crate::domain::error::DomainError;

fn re_identifier() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap_or_else(|_| {
            // Hardcoded pattern, cannot fail. Fallback matches nothing.
            Regex::new("$^").unwrap_or_else(|_| unreachable!())
        })
    })
}

/// Table and view names are interpolated into DDL, so only plain identifiers
/// are accepted.
pub fn validate_identifier(name: &str) -> Result<&str, DomainError> {
    if re_identifier().is_match(name) {
        Ok(name)
    } else {
        Err(DomainError::InvalidIdentifier(name.to_string()))
    }
}

/// Double-quoted identifier, safe for DuckDB.
pub fn quote_identifier(name: &str) -> Result<String, DomainError> {
    validate_identifier(name).map(|n| format!("\"{}\"", n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_identifiers_pass() {
        assert!(validate_identifier("accounts_payable_fact").is_ok());
        assert!(validate_identifier("_tmp1").is_ok());
        assert_eq!(
            quote_identifier("ap_vendor_summary").ok(),
            Some("\"ap_vendor_summary\"".to_string())
        );
    }

    #[test]
    fn test_injection_attempts_are_rejected() {
        for bad in ["", "1fact", "fact; DROP TABLE bseg", "fact\"", "a.b", "with space"] {
            assert!(
                matches!(validate_identifier(bad), Err(DomainError::InvalidIdentifier(_))),
                "{bad:?} should be rejected"
            );
        }
    }
}
