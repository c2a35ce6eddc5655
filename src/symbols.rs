//! GS1 symbol table
//!
//! Literal sequences a decoder emits in place of the non-printable FNC1
//! character, plus the default group separator.

use crate::models::CarrierType;

/// ASCII GS (0x1D), terminates variable-length element strings
pub const GROUP_SEPARATOR_SYMBOL: &str = "\u{1d}";

/// Symbology identifier for GS1 DataMatrix
pub const FNC1_GS1_DATAMATRIX_SEQUENCE: &str = "]d2";
/// Symbology identifier for GS1 QR Code
pub const FNC1_GS1_QRCODE_SEQUENCE: &str = "]Q3";
/// Symbology identifier for EAN/UPC
pub const FNC1_GS1_EAN_SEQUENCE: &str = "]e0";
/// Symbology identifier for GS1-128
pub const FNC1_GS1_128_SEQUENCE: &str = "]C1";

/// Default prefix map, in match priority order
pub const DEFAULT_PREFIX_MAP: [(&str, CarrierType); 4] = [
    (FNC1_GS1_DATAMATRIX_SEQUENCE, CarrierType::DataMatrix),
    (FNC1_GS1_128_SEQUENCE, CarrierType::Gs1128),
    (FNC1_GS1_QRCODE_SEQUENCE, CarrierType::QrCode),
    (FNC1_GS1_EAN_SEQUENCE, CarrierType::Ean),
];

/// Characters stripped from both ends of scanner input.
/// GS (0x1D) is not in this set.
pub(crate) fn is_trimmable(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\0' | '\x0B')
}

/// Trim scanner input the way the tokenizer and validator both expect
pub fn trim_input(text: &str) -> &str {
    text.trim_matches(is_trimmable)
}
