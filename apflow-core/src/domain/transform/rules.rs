// apflow-core/src/domain/transform/rules.rs

// SQL expressions of the business rule stage.

use crate::domain::sap::{AccountType, DebitCreditIndicator, DocumentType};

use super::casting::AMOUNT_TYPE;

fn zero_amount() -> String {
    format!("CAST(0 AS {})", AMOUNT_TYPE)
}

/// +amount on debit, -amount on credit, 0 for any other indicator (NULL too).
pub fn signed_amount(indicator: &str, amount: &str) -> String {
    format!(
        "CASE WHEN {i} = '{debit}' THEN {a} WHEN {i} = '{credit}' THEN -{a} ELSE {zero} END",
        i = indicator,
        a = amount,
        debit = DebitCreditIndicator::Debit.code(),
        credit = DebitCreditIndicator::Credit.code(),
        zero = zero_amount()
    )
}

/// The amount on vendor lines, 0 on every other line.
pub fn vendor_liability(account_type: &str, amount: &str) -> String {
    format!(
        "CASE WHEN {t} = '{vendor}' THEN {a} ELSE {zero} END",
        t = account_type,
        a = amount,
        vendor = AccountType::Vendor.code(),
        zero = zero_amount()
    )
}

pub fn document_type_description(code: &str) -> String {
    let branches: Vec<String> = DocumentType::ALL
        .iter()
        .map(|dt| format!("WHEN {} = '{}' THEN '{}'", code, dt.code(), dt.description()))
        .collect();
    format!(
        "CASE {} ELSE '{}' END",
        branches.join(" "),
        DocumentType::OTHER_DESCRIPTION
    )
}

/// `base + days` when both are known.
pub fn due_date(base: &str, days: &str) -> String {
    format!(
        "CASE WHEN {b} IS NOT NULL AND {d} IS NOT NULL THEN {b} + {d} ELSE NULL END",
        b = base,
        d = days
    )
}

/// 0/1 integer flag.
pub fn flag(condition: &str) -> String {
    format!("CASE WHEN {} THEN 1 ELSE 0 END", condition)
}

/// SQL list of the retained account types, e.g. `'K', 'S'`.
pub fn retained_account_types() -> String {
    AccountType::RETAINED
        .iter()
        .map(|t| format!("'{}'", t.code()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_amount_expression() {
        assert_eq!(
            signed_amount("dc", "amt"),
            "CASE WHEN dc = 'S' THEN amt WHEN dc = 'H' THEN -amt ELSE CAST(0 AS DECIMAL(15,2)) END"
        );
    }

    #[test]
    fn test_document_type_lookup_covers_all_codes() {
        let expr = document_type_description("document_type_code");
        assert!(expr.contains("WHEN document_type_code = 'RE' THEN 'Invoice'"));
        assert!(expr.contains("WHEN document_type_code = 'KZ' THEN 'Payment'"));
        assert!(expr.contains("WHEN document_type_code = 'KG' THEN 'Credit Memo'"));
        assert!(expr.ends_with("ELSE 'Other' END"));
    }

    #[test]
    fn test_retained_account_types_list() {
        assert_eq!(retained_account_types(), "'K', 'S'");
    }
}
