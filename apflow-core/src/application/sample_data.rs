// apflow-core/src/application/sample_data.rs

// Synthetic LFA1 / BKPF / BSEG extracts. Deterministic for a given seed, so
// the same options always produce byte-identical files.

use chrono::{Days, NaiveDate};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::domain::sap::{
    AccountType, DebitCreditIndicator, DocumentHeaderRecord, DocumentType, LineItemRecord,
    SapTable, VendorMasterRecord,
};
use crate::error::ApflowError;
use crate::infrastructure::extracts::write_extract;

const CLIENT: &str = "100";
const CURRENCY: &str = "EUR";
const FIRST_DOCUMENT_NUMBER: u64 = 5_100_000_001;
const VENDOR_CLEARING_ACCOUNT: &str = "160000";
const BANK_ACCOUNT: &str = "113100";

const VENDOR_NAMES: [&str; 110] = [
    // Manufacturing
    "Siemens AG", "BASF SE", "Volkswagen AG", "Bosch GmbH", "Bayer AG",
    "Daimler AG", "BMW AG", "ThyssenKrupp AG", "Continental AG", "Schaeffler AG",
    "ZF Friedrichshafen", "Linde AG", "Henkel AG", "Merck KGaA", "Fresenius SE",
    "Heidelberg Cement", "Evonik Industries", "Covestro AG", "KION Group", "Knorr-Bremse",
    // Utilities & energy
    "E.ON SE", "RWE AG", "EnBW AG", "Innogy SE", "Vattenfall GmbH",
    "50Hertz Transmission", "TenneT TSO", "Stadtwerke München", "EWE AG", "MVV Energie",
    // Logistics
    "Deutsche Post DHL", "DB Schenker", "Kühne + Nagel", "Dachser SE", "Hellmann Worldwide",
    "Rhenus Logistics", "BLG Logistics", "Fiege Logistik", "Meyer & Meyer", "Mosolf SE",
    // Technology
    "SAP SE", "Software AG", "Deutsche Telekom", "Telefónica Germany", "1&1 AG",
    "TeamViewer AG", "Adesso SE", "Cancom SE", "Bechtle AG", "Dataport",
    // Financial services
    "Deutsche Bank", "Commerzbank AG", "Allianz SE", "Munich Re", "DZ Bank AG",
    "KfW Bankengruppe", "Talanx AG", "Hannover Rück", "ERGO Group", "R+V Versicherung",
    // Retail
    "ALDI Süd", "LIDL Stiftung", "REWE Group", "EDEKA Zentrale", "Metro AG",
    "Kaufland", "dm-drogerie markt", "Rossmann", "OTTO Group", "Zalando SE",
    // Chemicals
    "Wacker Chemie", "Lanxess AG", "Symrise AG", "Fuchs Petrolub", "K+S AG",
    "Brenntag SE", "Altana AG", "Clariant", "Evonik Degussa", "BASF Coatings",
    // Construction
    "Hochtief AG", "Bilfinger SE", "Strabag SE", "Max Bögl", "Ed. Züblin AG",
    "BAM Deutschland", "Porr AG", "Goldbeck GmbH", "Wolff & Müller", "HABAU Group",
    // Pharma
    "Fresenius Medical Care", "B. Braun Melsungen", "Stada Arzneimittel", "Grünenthal GmbH", "Dr. Reddy's",
    "Sanofi-Aventis", "Boehringer Ingelheim", "Roche Deutschland", "Novartis Pharma", "Pfizer Deutschland",
    // Others
    "TÜV Rheinland", "TÜV SÜD", "Dekra SE", "Bertelsmann SE", "Axel Springer",
    "ProSiebenSat.1", "Freenet AG", "Uniper SE", "Vonovia SE", "Deutsche Wohnen",
];

/// (city, postal code, region)
const CITIES: [(&str, &str, &str); 15] = [
    ("München", "80331", "BY"),
    ("Berlin", "10115", "BE"),
    ("Hamburg", "20095", "HH"),
    ("Frankfurt", "60311", "HE"),
    ("Köln", "50667", "NW"),
    ("Stuttgart", "70173", "BW"),
    ("Düsseldorf", "40210", "NW"),
    ("Leipzig", "04109", "SN"),
    ("Dortmund", "44135", "NW"),
    ("Essen", "45127", "NW"),
    ("Bremen", "28195", "HB"),
    ("Dresden", "01067", "SN"),
    ("Hannover", "30159", "NI"),
    ("Nürnberg", "90402", "BY"),
    ("Bochum", "44787", "NW"),
];

const STREETS: [&str; 10] = [
    "Hauptstraße", "Bahnhofstraße", "Marktplatz", "Kirchstraße", "Gartenstraße",
    "Schulstraße", "Bergstraße", "Am Markt", "Lindenstraße", "Dorfstraße",
];

const INDUSTRIES: [&str; 8] = ["0001", "0002", "0003", "0004", "0005", "0006", "0007", "0008"];
const VENDOR_GROUPS: [&str; 5] = ["KRED", "LIEF", "SONST", "INTER", "EINM"];
const COMPANY_CODES: [&str; 3] = ["1000", "2000", "3000"];
const COST_CENTERS: [&str; 5] = ["1000", "2000", "3000", "4000", "5000"];

/// Q4 carries the most volume.
const MONTH_WEIGHTS: [u32; 12] = [8, 8, 9, 9, 7, 6, 6, 7, 9, 10, 11, 12];

/// (document type, weight in percent)
const DOCUMENT_TYPE_WEIGHTS: [(DocumentType, u32); 3] = [
    (DocumentType::Invoice, 60),
    (DocumentType::Payment, 35),
    (DocumentType::CreditMemo, 5),
];

/// (GL account, weight in per mille)
const GL_ACCOUNTS: [(&str, u32); 14] = [
    ("400000", 150), // raw materials
    ("410000", 120), // consumables
    ("420000", 100), // services
    ("430000", 80),  // maintenance
    ("440000", 80),  // IT / software
    ("450000", 70),  // marketing
    ("460000", 60),  // travel
    ("470000", 50),  // utilities
    ("480000", 50),  // rent
    ("490000", 40),  // insurance
    ("500000", 40),  // consulting
    ("510000", 30),  // legal
    ("520000", 30),  // training
    ("160000", 100), // vendor clearing
];

/// Accounts carrying 19% input VAT.
const TAXED_ACCOUNTS: [&str; 3] = ["420000", "440000", "450000"];

#[derive(Debug, Clone, Copy, PartialEq)]
struct PaymentTerms {
    code: &'static str,
    net_days: u32,
    /// Percent with three decimals, e.g. 2.000
    discount_pct_milli: i64,
    discount_days: u32,
}

impl PaymentTerms {
    const fn new(code: &'static str, net_days: u32, discount_pct_milli: i64, discount_days: u32) -> Self {
        Self {
            code,
            net_days,
            discount_pct_milli,
            discount_days,
        }
    }

    fn has_discount(&self) -> bool {
        self.discount_pct_milli > 0
    }
}

const PAYMENT_TERMS: [PaymentTerms; 7] = [
    PaymentTerms::new("0001", 30, 2_000, 14),
    PaymentTerms::new("0002", 60, 3_000, 10),
    PaymentTerms::new("0003", 14, 0, 0),
    PaymentTerms::new("0004", 45, 2_500, 21),
    PaymentTerms::new("0005", 90, 1_500, 30),
    PaymentTerms::new("0006", 30, 0, 0),
    PaymentTerms::new("0007", 7, 0, 0),
];

#[derive(Debug, Clone, PartialEq)]
pub struct GenerateOptions {
    pub seed: u64,
    pub vendors: usize,
    pub documents_per_year: usize,
    pub years: Vec<i32>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            seed: 42,
            vendors: 100,
            documents_per_year: 500,
            years: vec![2023, 2024],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleDataset {
    pub vendors: Vec<VendorMasterRecord>,
    pub headers: Vec<DocumentHeaderRecord>,
    pub line_items: Vec<LineItemRecord>,
}

/// Counts printed after generation.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetStats {
    pub vendors: usize,
    pub cities: usize,
    pub documents: usize,
    pub documents_by_type: Vec<(DocumentType, usize)>,
    pub line_items: usize,
    pub vendor_lines: usize,
    pub gl_lines: usize,
    pub vendors_used: usize,
}

impl SampleDataset {
    pub fn stats(&self) -> DatasetStats {
        let lines_of = |t: AccountType| self.line_items.iter().filter(|l| l.koart == t.code()).count();

        DatasetStats {
            vendors: self.vendors.len(),
            cities: self.vendors.iter().map(|v| v.ort01.as_str()).collect::<BTreeSet<_>>().len(),
            documents: self.headers.len(),
            documents_by_type: DocumentType::ALL
                .iter()
                .map(|dt| (*dt, self.headers.iter().filter(|h| h.blart == dt.code()).count()))
                .collect(),
            line_items: self.line_items.len(),
            vendor_lines: lines_of(AccountType::Vendor),
            gl_lines: lines_of(AccountType::GeneralLedger),
            vendors_used: self
                .line_items
                .iter()
                .filter(|l| l.koart == AccountType::Vendor.code())
                .map(|l| l.lifnr.as_str())
                .collect::<BTreeSet<_>>()
                .len(),
        }
    }
}

/// One written extract.
#[derive(Debug, Clone, PartialEq)]
pub struct WrittenExtract {
    pub table: SapTable,
    pub path: PathBuf,
    pub rows: usize,
}

#[instrument(skip_all, fields(seed = options.seed))]
pub fn generate_dataset(options: &GenerateOptions) -> Result<SampleDataset, ApflowError> {
    if options.vendors == 0 && options.documents_per_year > 0 && !options.years.is_empty() {
        return Err(ApflowError::InternalError(
            "Cannot generate documents without vendors".into(),
        ));
    }

    let mut generator = Generator::new(options.seed)?;
    let vendors = generator.vendors(options.vendors);
    let headers = generator.headers(options.documents_per_year, &options.years)?;
    let line_items = generator.line_items(&headers, &vendors)?;

    info!(
        vendors = vendors.len(),
        documents = headers.len(),
        line_items = line_items.len(),
        "Sample dataset generated"
    );

    Ok(SampleDataset {
        vendors,
        headers,
        line_items,
    })
}

/// Writes the three CSV files under `out_dir` with their default names.
pub fn write_dataset(dataset: &SampleDataset, out_dir: &Path) -> Result<Vec<WrittenExtract>, ApflowError> {
    let mut written = Vec::with_capacity(3);
    for table in SapTable::ALL {
        let path = out_dir.join(table.default_file_name());
        let rows = match table {
            SapTable::VendorMaster => write_extract(&path, &dataset.vendors)?,
            SapTable::DocumentHeader => write_extract(&path, &dataset.headers)?,
            SapTable::LineItems => write_extract(&path, &dataset.line_items)?,
        };
        info!(table = table.sap_name(), rows, path = ?path, "Extract written");
        written.push(WrittenExtract { table, path, rows });
    }
    Ok(written)
}

struct Generator {
    rng: StdRng,
    months: WeightedIndex<u32>,
    document_types: WeightedIndex<u32>,
    gl_accounts: WeightedIndex<u32>,
}

impl Generator {
    fn new(seed: u64) -> Result<Self, ApflowError> {
        let weights = |w: &[u32]| {
            WeightedIndex::new(w.iter().copied())
                .map_err(|e| ApflowError::InternalError(format!("Invalid weights: {}", e)))
        };
        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            months: weights(&MONTH_WEIGHTS)?,
            document_types: weights(&DOCUMENT_TYPE_WEIGHTS.map(|(_, w)| w))?,
            gl_accounts: weights(&GL_ACCOUNTS.map(|(_, w)| w))?,
        })
    }

    fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        // All pools are non-empty constants.
        *items.choose(&mut self.rng).unwrap_or(&items[0])
    }

    fn vendors(&mut self, count: usize) -> Vec<VendorMasterRecord> {
        (0..count)
            .map(|i| {
                let name = match VENDOR_NAMES.get(i) {
                    Some(name) => name.to_string(),
                    None => format!("Firma {} GmbH & Co. KG {}", (b'A' + (i % 26) as u8) as char, i),
                };
                let (city, postal_code, region) = self.pick(&CITIES);
                let street = format!("{} {}", self.pick(&STREETS), self.rng.gen_range(1..=150));

                VendorMasterRecord {
                    mandt: CLIENT.into(),
                    lifnr: format!("{:010}", i + 1),
                    name1: truncate(&name, 35),
                    name2: String::new(),
                    sortl: truncate(&name, 10).to_uppercase(),
                    stras: truncate(&street, 35),
                    ort01: city.into(),
                    pstlz: postal_code.into(),
                    land1: "DE".into(),
                    regio: region.into(),
                    stcd1: format!("DE{}", self.rng.gen_range(100_000_000..=999_999_999u64)),
                    stcd2: self.rng.gen_range(1_000_000_000..=9_999_999_999u64).to_string(),
                    stceg: format!("DE{}", self.rng.gen_range(100_000_000..=999_999_999u64)),
                    ktokk: self.pick(&VENDOR_GROUPS).into(),
                    brsch: self.pick(&INDUSTRIES).into(),
                    ..Default::default()
                }
            })
            .collect()
    }

    fn headers(&mut self, per_year: usize, years: &[i32]) -> Result<Vec<DocumentHeaderRecord>, ApflowError> {
        let mut headers = Vec::with_capacity(per_year * years.len());
        let mut number = FIRST_DOCUMENT_NUMBER;

        for &year in years {
            for _ in 0..per_year {
                let month = self.months.sample(&mut self.rng) as u32 + 1;
                let day = self.rng.gen_range(1..=28);
                let document_date = NaiveDate::from_ymd_opt(year, month, day)
                    .ok_or_else(|| ApflowError::InternalError(format!("Invalid year {}", year)))?;
                let entry_date = document_date + Days::new(self.rng.gen_range(0..=2));
                let posting_date = entry_date + Days::new(self.rng.gen_range(0..=1));

                let doc_type = DOCUMENT_TYPE_WEIGHTS[self.document_types.sample(&mut self.rng)].0;
                let belnr = format!("{:010}", number);
                let tcode = match doc_type {
                    DocumentType::Invoice => self.pick(&["FB60", "MIRO"]),
                    DocumentType::Payment => self.pick(&["F-53", "F110"]),
                    DocumentType::CreditMemo => "FB65",
                };
                let xblnr = if doc_type == DocumentType::Invoice {
                    format!("EXT{}", self.rng.gen_range(100_000..=999_999))
                } else {
                    String::new()
                };

                headers.push(DocumentHeaderRecord {
                    mandt: CLIENT.into(),
                    bukrs: self.pick(&COMPANY_CODES).into(),
                    gjahr: year.to_string(),
                    blart: doc_type.code().into(),
                    bldat: sap_date(document_date),
                    budat: sap_date(posting_date),
                    cpudt: sap_date(entry_date),
                    waers: CURRENCY.into(),
                    kursf: "1.00000".into(),
                    usnam: format!("USER{:02}", self.rng.gen_range(1..=20)),
                    tcode: tcode.into(),
                    bktxt: truncate(&format!("{} {}", doc_type.description(), belnr), 25),
                    xblnr,
                    belnr,
                    ..Default::default()
                });
                number += 1;
            }
        }
        Ok(headers)
    }

    fn line_items(
        &mut self,
        headers: &[DocumentHeaderRecord],
        vendors: &[VendorMasterRecord],
    ) -> Result<Vec<LineItemRecord>, ApflowError> {
        let mut items = Vec::new();
        for header in headers {
            match DocumentType::from_code(&header.blart) {
                Some(DocumentType::Invoice) => self.invoice_lines(header, vendors, &mut items),
                Some(DocumentType::Payment) => self.payment_lines(header, vendors, &mut items),
                Some(DocumentType::CreditMemo) => self.credit_memo_lines(header, vendors, &mut items),
                None => {
                    return Err(ApflowError::InternalError(format!(
                        "Unexpected document type '{}'",
                        header.blart
                    )));
                }
            }
        }
        Ok(items)
    }

    fn pick_vendor<'v>(&mut self, vendors: &'v [VendorMasterRecord]) -> Option<&'v VendorMasterRecord> {
        vendors.choose(&mut self.rng)
    }

    /// 1..5 GL debit lines and one vendor credit line for their total.
    fn invoice_lines(
        &mut self,
        header: &DocumentHeaderRecord,
        vendors: &[VendorMasterRecord],
        items: &mut Vec<LineItemRecord>,
    ) {
        let line_count = self.rng.gen_range(1..=5);
        let mut total = Decimal::ZERO;

        for n in 1..=line_count {
            let account = GL_ACCOUNTS[self.gl_accounts.sample(&mut self.rng)].0;
            let amount = self.amount_for_account(account);
            total += amount;

            let tax = if TAXED_ACCOUNTS.contains(&account) {
                (amount * Decimal::new(19, 2)).round_dp(2)
            } else {
                Decimal::ZERO
            };

            items.push(LineItemRecord {
                buzei: format!("{:03}", n),
                koart: AccountType::GeneralLedger.code().into(),
                shkzg: DebitCreditIndicator::Debit.code().into(),
                mwsts: money(tax),
                hkont: account.into(),
                kostl: self.pick(&COST_CENTERS).into(),
                sgtxt: format!("Expense {}", account),
                ..line(header, amount)
            });
        }

        let Some(vendor) = self.pick_vendor(vendors) else {
            return;
        };
        let terms = self.pick(&PAYMENT_TERMS);

        items.push(LineItemRecord {
            buzei: format!("{:03}", line_count + 1),
            koart: AccountType::Vendor.code().into(),
            shkzg: DebitCreditIndicator::Credit.code().into(),
            mwsts: money(Decimal::ZERO),
            hkont: VENDOR_CLEARING_ACCOUNT.into(),
            lifnr: vendor.lifnr.clone(),
            zfbdt: header.bldat.clone(),
            zbd1t: if terms.discount_days > 0 {
                terms.discount_days.to_string()
            } else {
                String::new()
            },
            zbd1p: if terms.has_discount() {
                Decimal::new(terms.discount_pct_milli, 3).to_string()
            } else {
                String::new()
            },
            zbd3t: terms.net_days.to_string(),
            zterm: terms.code.into(),
            skfbt: if terms.has_discount() {
                money(total)
            } else {
                String::new()
            },
            sgtxt: format!("AP {}", truncate(&vendor.name1, 30)),
            zuonr: vendor.lifnr.clone(),
            ..line(header, total)
        });
    }

    /// Bank credit line, then the vendor debit line clearing it.
    fn payment_lines(
        &mut self,
        header: &DocumentHeaderRecord,
        vendors: &[VendorMasterRecord],
        items: &mut Vec<LineItemRecord>,
    ) {
        let amount = self.cents(1_000, 100_000);
        items.push(LineItemRecord {
            buzei: "001".into(),
            koart: AccountType::GeneralLedger.code().into(),
            shkzg: DebitCreditIndicator::Credit.code().into(),
            mwsts: money(Decimal::ZERO),
            hkont: BANK_ACCOUNT.into(),
            sgtxt: "Payment".into(),
            ..line(header, amount)
        });

        let Some(vendor) = self.pick_vendor(vendors) else {
            return;
        };
        items.push(LineItemRecord {
            buzei: "002".into(),
            koart: AccountType::Vendor.code().into(),
            shkzg: DebitCreditIndicator::Debit.code().into(),
            mwsts: money(Decimal::ZERO),
            hkont: VENDOR_CLEARING_ACCOUNT.into(),
            lifnr: vendor.lifnr.clone(),
            sgtxt: format!("Payment to {}", truncate(&vendor.name1, 30)),
            zuonr: vendor.lifnr.clone(),
            ..line(header, amount)
        });
    }

    /// Vendor debit line, then the GL credit line reducing the expense.
    fn credit_memo_lines(
        &mut self,
        header: &DocumentHeaderRecord,
        vendors: &[VendorMasterRecord],
        items: &mut Vec<LineItemRecord>,
    ) {
        let Some(vendor) = self.pick_vendor(vendors) else {
            return;
        };
        let amount = self.cents(100, 10_000);
        items.push(LineItemRecord {
            buzei: "001".into(),
            koart: AccountType::Vendor.code().into(),
            shkzg: DebitCreditIndicator::Debit.code().into(),
            mwsts: money(Decimal::ZERO),
            hkont: VENDOR_CLEARING_ACCOUNT.into(),
            lifnr: vendor.lifnr.clone(),
            sgtxt: format!("Credit from {}", truncate(&vendor.name1, 30)),
            zuonr: vendor.lifnr.clone(),
            ..line(header, amount)
        });

        let account = self.pick(&GL_ACCOUNTS).0;
        items.push(LineItemRecord {
            buzei: "002".into(),
            koart: AccountType::GeneralLedger.code().into(),
            shkzg: DebitCreditIndicator::Credit.code().into(),
            mwsts: money(Decimal::ZERO),
            hkont: account.into(),
            kostl: self.pick(&COST_CENTERS).into(),
            sgtxt: "Credit adjustment".into(),
            ..line(header, amount)
        });
    }

    fn amount_for_account(&mut self, account: &str) -> Decimal {
        match account {
            "400000" | "410000" => self.cents(500, 50_000),
            "420000" | "430000" | "440000" => self.cents(200, 20_000),
            "480000" | "490000" => self.cents(1_000, 100_000),
            _ => self.cents(100, 10_000),
        }
    }

    /// Uniform amount in [min, max] euros, whole cents.
    fn cents(&mut self, min: i64, max: i64) -> Decimal {
        Decimal::new(self.rng.gen_range(min * 100..=max * 100), 2)
    }
}

/// Key and amount fields shared by every line of a document.
fn line(header: &DocumentHeaderRecord, amount: Decimal) -> LineItemRecord {
    LineItemRecord {
        mandt: header.mandt.clone(),
        bukrs: header.bukrs.clone(),
        belnr: header.belnr.clone(),
        gjahr: header.gjahr.clone(),
        dmbtr: money(amount),
        wrbtr: money(amount),
        pswsl: CURRENCY.into(),
        ..Default::default()
    }
}

fn money(amount: Decimal) -> String {
    format!("{:.2}", amount)
}

fn sap_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

fn truncate(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}
