use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Symbology family inferred from the FNC1 prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CarrierType {
    /// GS1 DataMatrix (`]d2`)
    #[serde(rename = "gs1_datamatrix")]
    DataMatrix,
    /// GS1 QR Code (`]Q3`)
    #[serde(rename = "gs1_qrcode")]
    QrCode,
    /// EAN/UPC (`]e0`)
    #[serde(rename = "ean")]
    Ean,
    /// GS1-128 (`]C1`)
    #[serde(rename = "gs1_128")]
    Gs1128,
    /// No configured prefix matched
    #[serde(rename = "unknown")]
    Unknown,
}

impl CarrierType {
    /// Stable lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            CarrierType::DataMatrix => "gs1_datamatrix",
            CarrierType::QrCode => "gs1_qrcode",
            CarrierType::Ean => "ean",
            CarrierType::Gs1128 => "gs1_128",
            CarrierType::Unknown => "unknown",
        }
    }

    /// Check if the symbology was identified
    pub fn is_known(&self) -> bool {
        !matches!(self, CarrierType::Unknown)
    }
}

impl fmt::Display for CarrierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoded GS1 element string
///
/// Produced once per parse call and never mutated afterwards. `ais` holds
/// the fields whose code the caller registered as known; every other field
/// lands in `buffer` in encounter order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Barcode {
    raw: String,
    #[serde(rename = "type")]
    carrier_type: CarrierType,
    ais: BTreeMap<String, String>,
    buffer: Vec<String>,
    fnc1_prefix: String,
}

impl Barcode {
    /// Create a barcode from already decoded parts
    pub fn new(
        raw: impl Into<String>,
        carrier_type: CarrierType,
        ais: BTreeMap<String, String>,
        buffer: Vec<String>,
        fnc1_prefix: impl Into<String>,
    ) -> Self {
        Self {
            raw: raw.into(),
            carrier_type,
            ais,
            buffer,
            fnc1_prefix: fnc1_prefix.into(),
        }
    }

    /// Trimmed input exactly as tokenized
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Detected symbology
    pub fn carrier_type(&self) -> CarrierType {
        self.carrier_type
    }

    /// All decoded AI fields, keyed by code
    pub fn ais(&self) -> &BTreeMap<String, String> {
        &self.ais
    }

    /// Segments not resolved to a known AI
    pub fn buffer(&self) -> &[String] {
        &self.buffer
    }

    /// Check whether `code` was decoded
    pub fn has_ai(&self, code: &str) -> bool {
        self.ais.contains_key(code)
    }

    /// Value of `code`, or an empty string if absent.
    ///
    /// The tokenizer never stores empty values, so an empty result always
    /// means the AI is absent. Use [`Barcode::get_ai`] to get an `Option`.
    pub fn ai(&self, code: &str) -> &str {
        self.get_ai(code).unwrap_or("")
    }

    /// Value of `code`, if decoded
    pub fn get_ai(&self, code: &str) -> Option<&str> {
        self.ais.get(code).map(String::as_str)
    }

    /// Literal FNC1 prefix consumed at the start (possibly empty)
    pub fn fnc1_prefix(&self) -> &str {
        &self.fnc1_prefix
    }

    /// Raw content with the FNC1 prefix removed
    pub fn normalized(&self) -> &str {
        self.raw.get(self.fnc1_prefix.len()..).unwrap_or("")
    }
}
