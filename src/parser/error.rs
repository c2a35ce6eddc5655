use serde::Serialize;
use thiserror::Error;

/// Tokenizer failure. Deterministic for a given input and configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseError {
    /// Input was blank after trimming
    #[error("Barcode is empty")]
    EmptyInput,

    /// No configured prefix matched and one is required
    #[error("FNC1 sequence is not found at the start of barcode")]
    MissingPrefix,

    /// Nothing follows the prefix
    #[error("Barcode does not contain data")]
    NoDataPresent,

    /// Fixed-length field runs past the end of input
    #[error("Not enough data for AI \"{code}\": {expected} expected but {actual} exists")]
    InsufficientLength {
        /// Two-character AI code
        code: String,
        /// Field length the table requires, code included
        expected: usize,
        /// Characters left from the cursor
        actual: usize,
    },

    /// Group separator inside a fixed-length field
    #[error("Group separator was not expected in AI \"{value}\"")]
    UnexpectedSeparator {
        /// Offending raw field
        value: String,
    },

    /// Field holds characters outside the GS1 encodable set
    #[error("Value contains invalid characters: {}", quote_all(.chars))]
    InvalidCharacters {
        /// Distinct offending characters, in encounter order
        chars: Vec<char>,
    },
}

impl ParseError {
    /// Stable machine name of the failure kind
    pub fn kind(&self) -> &'static str {
        match self {
            ParseError::EmptyInput => "empty_input",
            ParseError::MissingPrefix => "missing_prefix",
            ParseError::NoDataPresent => "no_data_present",
            ParseError::InsufficientLength { .. } => "insufficient_length",
            ParseError::UnexpectedSeparator { .. } => "unexpected_separator",
            ParseError::InvalidCharacters { .. } => "invalid_characters",
        }
    }
}

fn quote_all(chars: &[char]) -> String {
    chars
        .iter()
        .map(|c| format!("\"{c}\""))
        .collect::<Vec<_>>()
        .join(", ")
}
