// apflow-core/src/domain/transform/sql.rs

// Stage templates (minijinja). Each renders to a single SELECT; the
// materializer wraps it into CREATE OR REPLACE TABLE / VIEW.

/// Casting stage: raw VARCHAR extracts to typed, joined rows.
pub const STAGING: &str = r#"SELECT
    -- Document keys (kept as text for leading zeros)
    bseg.MANDT AS mandt,
    bseg.BUKRS AS company_code,
    bseg.BELNR AS document_number,
    {{ sap_int("bseg.GJAHR") }} AS fiscal_year,
    bseg.BUZEI AS line_item_number,

    -- Document header
    bkpf.BLART AS document_type_code,
    {{ sap_date("bkpf.BLDAT") }} AS document_date,
    {{ sap_date("bkpf.BUDAT") }} AS posting_date,
    bkpf.WAERS AS currency,
    bkpf.USNAM AS user_name,
    bkpf.BKTXT AS document_header_text,
    bkpf.XBLNR AS reference_document,
    bkpf.TCODE AS transaction_code,

    -- Line item
    bseg.SHKZG AS debit_credit_indicator,
    bseg.KOART AS account_type,
    {{ blank_to_null("bseg.LIFNR") }} AS vendor_number,
    bseg.HKONT AS gl_account,
    {{ sap_amount("bseg.DMBTR") }} AS amount_local_currency,
    {{ sap_amount("bseg.WRBTR") }} AS amount_document_currency,
    {{ sap_amount("bseg.MWSTS") }} AS tax_amount,
    bseg.ZUONR AS assignment_reference,
    bseg.SGTXT AS line_item_text,

    -- Payment terms
    {{ sap_date("bseg.ZFBDT") }} AS baseline_payment_date,
    {{ sap_int("bseg.ZBD1T") }} AS cash_discount_days_1,
    {{ sap_int("bseg.ZBD2T") }} AS cash_discount_days_2,
    {{ sap_int("bseg.ZBD3T") }} AS net_payment_days,
    {{ blank_to_null("bseg.ZTERM") }} AS payment_terms,
    {{ sap_amount("bseg.SKFBT") }} AS cash_discount_amount,

    -- Vendor master
    {{ blank_to_null("lfa1.NAME1") }} AS vendor_name,
    {{ blank_to_null("lfa1.NAME2") }} AS vendor_name_2,
    {{ blank_to_null("lfa1.ORT01") }} AS vendor_city,
    {{ blank_to_null("lfa1.LAND1") }} AS vendor_country,
    {{ blank_to_null("lfa1.PSTLZ") }} AS vendor_postal_code,
    {{ blank_to_null("lfa1.STRAS") }} AS vendor_street,
    {{ blank_to_null("lfa1.STCD1") }} AS vendor_tax_number_1,
    {{ blank_to_null("lfa1.STCEG") }} AS vendor_vat_number,
    {{ blank_to_null("lfa1.KTOKK") }} AS vendor_account_group,

    -- Quality
    {{ flag("lfa1.LIFNR IS NULL") }} AS is_vendor_not_in_master
FROM {{ source("BSEG") }} AS bseg
INNER JOIN {{ source("BKPF") }} AS bkpf
    ON bseg.MANDT = bkpf.MANDT
    AND bseg.BUKRS = bkpf.BUKRS
    AND bseg.BELNR = bkpf.BELNR
    AND bseg.GJAHR = bkpf.GJAHR
LEFT JOIN {{ source("LFA1") }} AS lfa1
    ON bseg.MANDT = lfa1.MANDT
    AND bseg.LIFNR = lfa1.LIFNR
WHERE bseg.KOART IN ({{ retained_account_types }})"#;

/// Business rule stage: pure column derivation over the staging table.
pub const FACT: &str = r#"SELECT
    -- Document keys
    mandt AS MANDT,
    company_code,
    document_number,
    fiscal_year,
    line_item_number,

    -- Document header
    document_type_code AS document_type,
    document_date,
    posting_date,
    currency,
    user_name,
    document_header_text,
    reference_document,
    transaction_code,

    -- Line item
    debit_credit_indicator,
    account_type,
    vendor_number,
    gl_account,
    amount_local_currency,
    amount_document_currency,
    tax_amount,
    assignment_reference,
    line_item_text,

    -- Payment terms
    baseline_payment_date,
    cash_discount_days_1,
    cash_discount_days_2,
    net_payment_days,
    payment_terms,
    cash_discount_amount,

    -- Vendor master
    vendor_name,
    vendor_name_2,
    vendor_city,
    vendor_country,
    vendor_postal_code,
    vendor_street,
    vendor_tax_number_1,
    vendor_vat_number,
    vendor_account_group,

    -- Derived
    {{ signed_amount("debit_credit_indicator", "amount_local_currency") }} AS signed_amount,
    {{ vendor_liability("account_type", "amount_local_currency") }} AS vendor_liability_amount,
    {{ document_type_description("document_type_code") }} AS document_type_description,
    {{ due_date("baseline_payment_date", net_due_days_column) }} AS net_due_date,
    {{ due_date("baseline_payment_date", "cash_discount_days_1") }} AS cash_discount_due_date,

    -- Quality flags
    {{ flag("vendor_number IS NULL") }} AS is_missing_vendor,
    {{ flag("amount_local_currency = 0") }} AS is_zero_amount,
    is_vendor_not_in_master,

    -- Lineage
    TIMESTAMP '{{ load_timestamp }}' AS etl_load_timestamp
FROM {{ ref(staging_table) }}"#;

pub const QUALITY_SUMMARY: &str = r#"SELECT
    COUNT(*) AS total_line_items,
    SUM(is_missing_vendor) AS missing_vendor_count,
    SUM(is_zero_amount) AS zero_amount_count,
    SUM(is_vendor_not_in_master) AS vendor_not_in_master_count,
    COUNT(DISTINCT vendor_number) AS unique_vendors,
    COUNT(DISTINCT document_number) AS unique_documents,
    SUM({{ flag("document_type = '" ~ invoice_code ~ "'") }}) AS invoice_count,
    SUM({{ flag("document_type = '" ~ payment_code ~ "'") }}) AS payment_count,
    MIN(posting_date) AS earliest_posting_date,
    MAX(posting_date) AS latest_posting_date,
    SUM(signed_amount) AS net_vendor_liability
FROM {{ ref(fact_table) }}"#;

pub const VENDOR_SUMMARY: &str = r#"SELECT
    vendor_number,
    vendor_name,
    vendor_city,
    vendor_country,
    COUNT(DISTINCT document_number) AS document_count,
    SUM(CASE WHEN document_type = '{{ invoice_code }}' THEN vendor_liability_amount ELSE 0 END) AS total_invoices,
    SUM(CASE WHEN document_type = '{{ payment_code }}' THEN vendor_liability_amount ELSE 0 END) AS total_payments,
    SUM(vendor_liability_amount) AS net_open_amount
FROM {{ ref(fact_table) }}
WHERE vendor_number IS NOT NULL
GROUP BY
    vendor_number,
    vendor_name,
    vendor_city,
    vendor_country"#;
