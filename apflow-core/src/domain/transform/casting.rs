// apflow-core/src/domain/transform/casting.rs

// SQL expressions of the casting stage. Each one takes a raw VARCHAR column
// and degrades to NULL (dates, integers, text) or zero (amounts) instead of
// failing the row.

/// Fixed-point type of every amount column.
pub const AMOUNT_TYPE: &str = "DECIMAL(15,2)";

fn is_blank(column: &str) -> String {
    format!("{c} IS NULL OR TRIM({c}) = ''", c = column)
}

/// SAP date: `YYYYMMDD` is split positionally, any other non-blank value is
/// handed to the engine's own date parser. Failures become NULL.
/// Only the length is checked, so an 8-character delimited value such as
/// `2024-1-5` is split positionally as well and ends up NULL.
pub fn sap_date(column: &str) -> String {
    format!(
        "TRY_CAST(CASE WHEN {blank} THEN NULL \
         WHEN LENGTH(TRIM({c})) = 8 THEN CONCAT(SUBSTRING(TRIM({c}), 1, 4), '-', SUBSTRING(TRIM({c}), 5, 2), '-', SUBSTRING(TRIM({c}), 7, 2)) \
         ELSE {c} END AS DATE)",
        blank = is_blank(column),
        c = column
    )
}

/// Amount with thousands separators (commas, spaces) stripped. Blank is zero.
pub fn sap_amount(column: &str) -> String {
    format!(
        "TRY_CAST(CASE WHEN {blank} THEN '0' ELSE REPLACE(REPLACE({c}, ',', ''), ' ', '') END AS {ty})",
        blank = is_blank(column),
        c = column,
        ty = AMOUNT_TYPE
    )
}

/// Integer (fiscal year, day counts). Blank is NULL.
pub fn sap_int(column: &str) -> String {
    format!(
        "TRY_CAST(CASE WHEN {blank} THEN NULL ELSE TRIM({c}) END AS INT)",
        blank = is_blank(column),
        c = column
    )
}

/// Blank text becomes NULL, everything else passes through untouched.
pub fn blank_to_null(column: &str) -> String {
    format!("CASE WHEN TRIM({c}) = '' THEN NULL ELSE {c} END", c = column)
}
