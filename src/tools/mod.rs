//! Helpers shared by the command-line tool

use crate::models::{Barcode, Resolution};
use crate::parser::ParseError;
use std::io::{self, BufRead};
use thiserror::Error;

/// Bad escape sequence in a command-line argument
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EscapeError {
    /// Backslash at end of input
    #[error("dangling backslash at end of {0:?}")]
    Dangling(String),

    /// `\x` not followed by two hex digits
    #[error("invalid \\x escape in {0:?}")]
    InvalidHex(String),

    /// Unsupported escape letter
    #[error("unsupported escape \\{1} in {0:?}")]
    Unsupported(String, char),
}

/// Decode `\xHH`, `\t`, `\n` and `\\` so control characters such as GS
/// can be typed on a shell command line.
pub fn decode_escapes(input: &str) -> Result<String, EscapeError> {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            None => return Err(EscapeError::Dangling(input.to_string())),
            Some('\\') => out.push('\\'),
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('x') => {
                let hex: String = chars.by_ref().take(2).collect();
                let byte = (hex.len() == 2)
                    .then(|| u8::from_str_radix(&hex, 16).ok())
                    .flatten()
                    .filter(u8::is_ascii)
                    .ok_or_else(|| EscapeError::InvalidHex(input.to_string()))?;
                out.push(byte as char);
            }
            Some(other) => return Err(EscapeError::Unsupported(input.to_string(), other)),
        }
    }

    Ok(out)
}

/// Read one code per line, skipping blank lines
pub fn read_codes<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    let mut codes = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if !line.trim().is_empty() {
            codes.push(line);
        }
    }
    Ok(codes)
}

/// Outcome counts for a batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// Inputs processed
    pub total: usize,
    /// Inputs accepted
    pub accepted: usize,
    /// Inputs rejected
    pub rejected: usize,
}

impl BatchStats {
    /// Count parse outcomes
    pub fn from_parsed(results: &[Result<Barcode, ParseError>]) -> Self {
        Self::tally(results.iter().map(Result::is_ok))
    }

    /// Count validation outcomes
    pub fn from_resolutions(results: &[Resolution]) -> Self {
        Self::tally(results.iter().map(Resolution::is_valid))
    }

    fn tally(outcomes: impl Iterator<Item = bool>) -> Self {
        outcomes.fold(Self::default(), |mut stats, ok| {
            stats.total += 1;
            if ok {
                stats.accepted += 1;
            } else {
                stats.rejected += 1;
            }
            stats
        })
    }

    /// Share of accepted inputs, 0.0 for an empty batch
    pub fn acceptance_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.accepted as f64 / self.total as f64
        }
    }
}
