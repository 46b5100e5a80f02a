// apflow-core/src/domain/sap/records.rs

// Raw extract rows, one struct per SAP table. Every field is text: that is how
// the extracts arrive, and the casting stage owns all typing decisions.
// Field order is the column order of the CSV files.

use serde::{Deserialize, Serialize};

/// LFA1 row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct VendorMasterRecord {
    pub mandt: String,
    pub lifnr: String,
    pub name1: String,
    pub name2: String,
    pub sortl: String,
    pub stras: String,
    pub ort01: String,
    pub pstlz: String,
    pub land1: String,
    pub regio: String,
    pub stcd1: String,
    pub stcd2: String,
    pub stceg: String,
    pub ktokk: String,
    pub brsch: String,
    pub loevm: String,
    pub sperr: String,
    pub telf1: String,
    pub smtp_addr: String,
}

/// BKPF row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct DocumentHeaderRecord {
    pub mandt: String,
    pub bukrs: String,
    pub belnr: String,
    pub gjahr: String,
    pub blart: String,
    pub bldat: String,
    pub budat: String,
    pub cpudt: String,
    pub waers: String,
    pub kursf: String,
    pub usnam: String,
    pub tcode: String,
    pub bktxt: String,
    pub xblnr: String,
    pub bstat: String,
    pub stblg: String,
    pub stjah: String,
}

/// BSEG row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct LineItemRecord {
    pub mandt: String,
    pub bukrs: String,
    pub belnr: String,
    pub gjahr: String,
    pub buzei: String,
    pub koart: String,
    pub shkzg: String,
    pub dmbtr: String,
    pub wrbtr: String,
    pub pswsl: String,
    pub mwsts: String,
    pub hkont: String,
    pub kostl: String,
    pub lifnr: String,
    pub zfbdt: String,
    pub zbd1t: String,
    pub zbd1p: String,
    pub zbd2t: String,
    pub zbd3t: String,
    pub zterm: String,
    pub skfbt: String,
    pub sgtxt: String,
    pub zuonr: String,
}

impl LineItemRecord {
    /// Key of the parent BKPF row.
    pub fn header_key(&self) -> (&str, &str, &str, &str) {
        (&self.mandt, &self.bukrs, &self.belnr, &self.gjahr)
    }
}

impl DocumentHeaderRecord {
    pub fn key(&self) -> (&str, &str, &str, &str) {
        (&self.mandt, &self.bukrs, &self.belnr, &self.gjahr)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_records_serialize_with_sap_column_names() {
        let mut wtr = csv::Writer::from_writer(vec![]);
        wtr.serialize(VendorMasterRecord {
            mandt: "100".into(),
            lifnr: "0000000001".into(),
            smtp_addr: "".into(),
            ..Default::default()
        })
        .unwrap();
        let out = String::from_utf8(wtr.into_inner().unwrap()).unwrap();
        let header = out.lines().next().unwrap();

        assert!(header.starts_with("MANDT,LIFNR,NAME1,NAME2"));
        assert!(header.ends_with("TELF1,SMTP_ADDR"));
    }
}
