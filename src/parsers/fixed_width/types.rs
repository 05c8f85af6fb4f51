use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// One named column of a fixed-width layout, in characters. `end: None`
/// takes the rest of the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub start: usize,
    pub end: Option<usize>,
}

const fn bounded(name: &'static str, start: usize, end: usize) -> FieldSpec {
    FieldSpec {
        name,
        start,
        end: Some(end),
    }
}

/// Name of the row index column that decides whether a row is data.
pub const INDEX_FIELD: &str = "No.";

/// Columns both layouts share, `No.` through `Credit`.
const SHARED_PREFIX: [FieldSpec; 20] = [
    bounded(INDEX_FIELD, 0, 7),
    bounded("Trx_Code", 7, 16),
    bounded("Tanggal_Trx", 16, 28),
    bounded("Jam_Trx", 28, 37),
    bounded("Ref_No", 37, 50),
    bounded("Trace_No", 50, 59),
    bounded("Terminal_ID", 59, 76),
    bounded("Merchant_PAN", 76, 96),
    bounded("Acquirer", 96, 108),
    bounded("Issuer", 108, 120),
    bounded("Customer_PAN", 120, 140),
    bounded("Nominal", 140, 157),
    bounded("Merchant_Category", 157, 175),
    bounded("Merchant_Criteria", 175, 193),
    bounded("Response_Code", 193, 207),
    bounded("Merchant_Name", 207, 232),
    bounded("Location", 232, 245),
    bounded("Country", 245, 248),
    bounded("Convenience_Fee", 248, 261),
    bounded("Credit", 261, 263),
];

const STANDARD_TAIL: [FieldSpec; 1] = [FieldSpec {
    name: "Interchange_Fee",
    start: 263,
    end: None,
}];

const DISPUTE_TAIL: [FieldSpec; 6] = [
    bounded("Interchange_Fee", 263, 279),
    bounded("Dispute_Tran_Code", 279, 299),
    bounded("Dispute_Amount", 299, 317),
    bounded("Fee_Return", 317, 335),
    bounded("Dispute_Net_Amount", 335, 355),
    bounded("Registration_Number", 355, 374),
];

static STANDARD_FIELDS: LazyLock<Vec<FieldSpec>> =
    LazyLock::new(|| [SHARED_PREFIX.as_slice(), &STANDARD_TAIL].concat());

static DISPUTE_FIELDS: LazyLock<Vec<FieldSpec>> =
    LazyLock::new(|| [SHARED_PREFIX.as_slice(), &DISPUTE_TAIL].concat());

/// Column layout of a report section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layout {
    /// Main transaction tables, 21 columns
    #[serde(rename = "standard")]
    Standard,
    /// Dispute sub-report, 26 columns
    #[serde(rename = "dispute")]
    Dispute,
}

impl Layout {
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            Layout::Standard => STANDARD_FIELDS.as_slice(),
            Layout::Dispute => DISPUTE_FIELDS.as_slice(),
        }
    }

    /// Header names in declaration order.
    pub fn column_names(self) -> impl Iterator<Item = &'static str> {
        self.fields().iter().map(|field| field.name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields().iter().position(|field| field.name == name)
    }
}
