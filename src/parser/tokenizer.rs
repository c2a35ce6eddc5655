use super::config::ParserConfig;
use super::error::ParseError;
use super::tables::{FIXED_AI_LENGTH, fixed_field_length, is_encodable};
use crate::models::{Barcode, CarrierType};
use crate::symbols::trim_input;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::ops::Range;
use tracing::{debug, trace};

/// Anything that turns scanner text into a [`Barcode`]
pub trait BarcodeParser {
    /// Tokenize `text`
    fn parse(&self, text: &str) -> Result<Barcode, ParseError>;
}

impl<T: BarcodeParser + ?Sized> BarcodeParser for &T {
    fn parse(&self, text: &str) -> Result<Barcode, ParseError> {
        (**self).parse(text)
    }
}

/// GS1 element string tokenizer
///
/// Performs parsing according to the GS1 General Specifications: a
/// table-driven lookahead for predefined-length AIs, falling back to the
/// caller's known variable-length AIs terminated by the group separator.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

/// One tokenized field before it is filed into the barcode
struct Field<'a> {
    ai: Option<&'a [u8]>,
    value: Range<usize>,
}

#[derive(Default)]
struct Decoded {
    ais: BTreeMap<String, String>,
    buffer: Vec<String>,
}

impl Parser {
    /// Create a parser over `config`
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse many inputs in parallel. Results keep input order.
    pub fn parse_batch<S>(&self, inputs: &[S]) -> Vec<Result<Barcode, ParseError>>
    where
        S: AsRef<str> + Sync,
    {
        inputs
            .par_iter()
            .map(|input| self.parse(input.as_ref()))
            .collect()
    }

    fn fetch_fnc1_prefix(&self, data: &str) -> Option<(&str, CarrierType)> {
        self.config
            .prefix_map()
            .iter()
            .find(|(prefix, _)| starts_with_ignore_case(data.as_bytes(), prefix.as_bytes()))
            .map(|(prefix, kind)| (prefix.as_str(), *kind))
    }

    /// Tokenize from `offset` to end of input into AI fields and leftovers
    fn tokenize(&self, text: &str, offset: usize) -> Result<Decoded, ParseError> {
        let data = text.as_bytes();
        let separator = self.config.group_separator().as_bytes();
        let mut decoded = Decoded::default();
        let mut position = offset;

        while position < data.len() {
            let field = match self.fetch_fixed_ai(data, position) {
                Some((code, length)) => {
                    let available = data.len() - position;
                    if length > available {
                        return Err(ParseError::InsufficientLength {
                            code: String::from_utf8_lossy(code).into_owned(),
                            expected: length,
                            actual: available,
                        });
                    }

                    let end = position + length;
                    let field = if self.config.is_known_ai(code) {
                        Field {
                            ai: Some(code),
                            value: position + FIXED_AI_LENGTH..end,
                        }
                    } else {
                        Field {
                            ai: None,
                            value: position..end,
                        }
                    };

                    if find(&data[position + FIXED_AI_LENGTH..end], separator).is_some() {
                        return Err(ParseError::UnexpectedSeparator {
                            value: widened(text, field.value.clone()).to_string(),
                        });
                    }

                    position += length;
                    field
                }
                None => {
                    let length = find(&data[position..], separator)
                        .unwrap_or(data.len() - position);
                    let ai_length = self
                        .fetch_known_ai(data, position)
                        .map_or(0, <[u8]>::len)
                        .min(length);
                    let start = position;

                    // Past end-of-text when no separator follows; the loop ends there
                    position += length + separator.len();
                    Field {
                        ai: (ai_length > 0).then(|| &data[start..start + ai_length]),
                        value: start + ai_length..start + length,
                    }
                }
            };

            if field.value.is_empty() {
                continue;
            }

            let value = validated_text(text, field.value)?;
            match field.ai {
                Some(code) => {
                    let code = String::from_utf8_lossy(code).into_owned();
                    trace!(ai = %code, value = %value, "decoded AI");
                    decoded.ais.insert(code, value);
                }
                None => {
                    trace!(segment = %value, "buffered segment");
                    decoded.buffer.push(value);
                }
            }
        }

        Ok(decoded)
    }

    fn fetch_fixed_ai<'a>(&self, data: &'a [u8], position: usize) -> Option<(&'a [u8], usize)> {
        let code = data.get(position..position + FIXED_AI_LENGTH)?;
        fixed_field_length(code).map(|length| (code, length))
    }

    /// First known AI matching at `position`, as spelled in the input
    fn fetch_known_ai<'a>(&self, data: &'a [u8], position: usize) -> Option<&'a [u8]> {
        let rest = &data[position..];
        self.config
            .known_ais()
            .iter()
            .find(|ai| starts_with_ignore_case(rest, ai.as_bytes()))
            .map(|ai| &rest[..ai.len()])
    }
}

impl BarcodeParser for Parser {
    fn parse(&self, text: &str) -> Result<Barcode, ParseError> {
        let data = trim_input(text);

        if data.is_empty() {
            debug!("rejecting empty barcode");
            return Err(ParseError::EmptyInput);
        }

        let (fnc1_prefix, carrier_type) = match self.fetch_fnc1_prefix(data) {
            Some((prefix, kind)) => (prefix, kind),
            None if self.config.is_fnc1_required() => {
                debug!("no FNC1 sequence at start of barcode");
                return Err(ParseError::MissingPrefix);
            }
            None => ("", CarrierType::Unknown),
        };
        debug!(prefix = fnc1_prefix, carrier = %carrier_type, "matched carrier prefix");

        let offset = fnc1_prefix.len();
        if data.len() <= offset {
            return Err(ParseError::NoDataPresent);
        }

        let Decoded { ais, buffer } =
            self.tokenize(data, offset).inspect_err(|err| {
                debug!(kind = err.kind(), %err, "tokenizing failed");
            })?;

        Ok(Barcode::new(data, carrier_type, ais, buffer, fnc1_prefix))
    }
}

fn starts_with_ignore_case(data: &[u8], prefix: &[u8]) -> bool {
    data.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|window| window == needle)
}

/// Widen a byte range of `text` outward to the nearest char boundaries
fn widened(text: &str, range: Range<usize>) -> &str {
    let mut start = range.start;
    let mut end = range.end;
    while !text.is_char_boundary(start) {
        start -= 1;
    }
    while !text.is_char_boundary(end) {
        end += 1;
    }
    &text[start..end]
}

/// Check a field of `text` against the encodable set and convert it to text
///
/// A field cut from the middle of a multibyte character reports that whole
/// character.
fn validated_text(text: &str, range: Range<usize>) -> Result<String, ParseError> {
    let bytes = &text.as_bytes()[range.clone()];
    if bytes.iter().all(|&b| is_encodable(b)) {
        // Encodable bytes are all ASCII
        return Ok(bytes.iter().map(|&b| b as char).collect());
    }

    let mut invalid: Vec<char> = Vec::new();
    for c in widened(text, range).chars() {
        let allowed = c.is_ascii() && is_encodable(c as u8);
        if !allowed && !invalid.contains(&c) {
            invalid.push(c);
        }
    }
    Err(ParseError::InvalidCharacters { chars: invalid })
}
