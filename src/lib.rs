//! gs1_parser - GS1 barcode payload tokenizer and validator
//!
//! Decodes scanned GS1 element strings (DataMatrix, QR Code, GS1-128, EAN)
//! into Application Identifier fields and checks them against caller rules.
//! Input is the text a scanner already produced; no image decoding here.
//!
//! # Example
//! ```
//! use gs1_parser::{BarcodeParser, Parser, ParserConfig, CarrierType};
//!
//! let parser = Parser::new(ParserConfig::default().with_known_ais(["01", "17", "10"]));
//! let barcode = parser.parse("]d201034531200000111719112510ABCD1234").unwrap();
//!
//! assert_eq!(barcode.carrier_type(), CarrierType::DataMatrix);
//! assert_eq!(barcode.ai("01"), "03453120000011");
//! assert_eq!(barcode.ai("17"), "191125");
//! assert_eq!(barcode.ai("10"), "ABCD1234");
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Decoded data structures (Barcode, Resolution, error codes)
pub mod models;
/// Tokenizer, its configuration and failure kinds
pub mod parser;
/// GS1 symbol table (FNC1 sequences, group separator)
pub mod symbols;
/// Helpers for the command-line tool (escapes, line input, batch stats)
pub mod tools;
/// Presence and format rules over decoded barcodes
pub mod validator;

pub use models::{Barcode, CarrierType, ErrorCode, Resolution, Violation};
pub use parser::{BarcodeParser, ConfigError, ParseError, Parser, ParserConfig};
pub use validator::{AiConstraint, ScanInput, Validator, ValidatorConfig};

/// Parse `text` with the default configuration
///
/// Equivalent to `Parser::default().parse(text)`: an FNC1 prefix is
/// required and no AI is known, so every field lands in the buffer.
pub fn parse(text: &str) -> Result<Barcode, ParseError> {
    Parser::default().parse(text)
}

/// Parse `text` under `config`
pub fn parse_with(text: &str, config: &ParserConfig) -> Result<Barcode, ParseError> {
    Parser::new(config.clone()).parse(text)
}
