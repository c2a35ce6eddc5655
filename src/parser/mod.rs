//! GS1 element string tokenizer
//!
//! This module turns scanner text into a [`Barcode`](crate::Barcode):
//! - Configuration (prefix map, group separator, known AIs)
//! - Predefined-length AI table and encodable character set
//! - Tokenizer with fixed-length lookahead and separator splitting

pub mod config;
/// Tokenizer failure kinds
pub mod error;
/// GS1 tables (predefined-length AIs, character set 82)
pub mod tables;
pub mod tokenizer;

pub use config::{ConfigError, ParserConfig};
pub use error::ParseError;
pub use tokenizer::{BarcodeParser, Parser};
