use super::config::ValidatorConfig;
use super::input::ScanInput;
use crate::models::{ErrorCode, Resolution};
use crate::parser::{BarcodeParser, Parser};
use crate::symbols::trim_input;
use rayon::prelude::*;
use tracing::debug;

/// Ordered, short-circuiting rule chain over parsed barcodes
#[derive(Debug, Clone)]
pub struct Validator<P = Parser> {
    parser: P,
    config: ValidatorConfig,
}

impl<P: BarcodeParser> Validator<P> {
    /// Create a validator running `parser` under `config`
    pub fn new(parser: P, config: ValidatorConfig) -> Self {
        Self { parser, config }
    }

    /// Parser in use
    pub fn parser(&self) -> &P {
        &self.parser
    }

    /// Rules in use
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate one value. Stops at the first failing rule.
    pub fn validate<'a>(&self, value: impl Into<ScanInput<'a>>) -> Resolution {
        let allow_empty = self.config.is_allow_empty();

        let text = match value.into() {
            ScanInput::Absent if allow_empty => return Resolution::valid(),
            ScanInput::Text(text) => text,
            ScanInput::Absent | ScanInput::Other(_) => {
                return reject(ErrorCode::ValueIsNotString, "Value is not a string".to_string());
            }
        };

        let trimmed = trim_input(text);
        if trimmed.is_empty() {
            return if allow_empty {
                Resolution::valid()
            } else {
                reject(ErrorCode::ValueEmpty, "Value is empty".to_string())
            };
        }

        let barcode = match self.parser.parse(trimmed) {
            Ok(barcode) => barcode,
            Err(err) => {
                debug!(code = %ErrorCode::InvalidValue, kind = err.kind(), "barcode rejected");
                return Resolution::unparsable(err);
            }
        };

        let missing: Vec<&str> = self
            .config
            .required_ais()
            .iter()
            .filter(|code| !barcode.has_ai(code))
            .map(String::as_str)
            .collect();
        if !missing.is_empty() {
            return reject(
                ErrorCode::MissingAis,
                format!("AIs are missing: {}", quote_codes(&missing)),
            );
        }

        let forbidden: Vec<&str> = self
            .config
            .forbidden_ais()
            .iter()
            .filter(|code| barcode.has_ai(code))
            .map(String::as_str)
            .collect();
        if !forbidden.is_empty() {
            return reject(
                ErrorCode::ForbiddenAis,
                format!("AIs are forbidden: {}", quote_codes(&forbidden)),
            );
        }

        for (code, constraint) in self.config.ai_constraints() {
            let Some(value) = barcode.get_ai(code) else {
                continue;
            };
            if !constraint.evaluate(value) {
                return reject(
                    ErrorCode::InvalidValue,
                    format!("AI is invalid: code={code}, value={value}"),
                );
            }
        }

        Resolution::valid()
    }

    /// Validate many values in parallel. Results keep input order.
    pub fn validate_batch<S>(&self, values: &[S]) -> Vec<Resolution>
    where
        S: AsRef<str> + Sync,
        P: Sync,
    {
        values
            .par_iter()
            .map(|value| self.validate(value.as_ref()))
            .collect()
    }
}

impl Validator<Parser> {
    /// Validator over a default-configured [`Parser`]
    pub fn with_config(config: ValidatorConfig) -> Self {
        Self::new(Parser::default(), config)
    }
}

fn reject(code: ErrorCode, message: String) -> Resolution {
    debug!(%code, %message, "barcode rejected");
    Resolution::invalid(code, message)
}

fn quote_codes(codes: &[&str]) -> String {
    codes
        .iter()
        .map(|code| format!("\"{code}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Barcode, CarrierType};
    use crate::parser::ParseError;
    use serde_json::json;
    use std::collections::BTreeMap;

    /// Always returns the same barcode, or always fails
    struct StubParser(Result<Barcode, ParseError>);

    impl BarcodeParser for StubParser {
        fn parse(&self, _text: &str) -> Result<Barcode, ParseError> {
            self.0.clone()
        }
    }

    fn stub() -> StubParser {
        let mut ais = BTreeMap::new();
        ais.insert("01".to_string(), "03453120000011".to_string());
        StubParser(Ok(Barcode::new(
            "]d201034531200000111719112510ABCD1234",
            CarrierType::DataMatrix,
            ais,
            vec!["17191125".to_string(), "10ABCD1234".to_string()],
            "]d2",
        )))
    }

    const CODE: &str = "]d201034531200000111719112510ABCD1234";

    #[test]
    fn test_valid_default() {
        let validator = Validator::new(stub(), ValidatorConfig::default());
        assert!(validator.validate(CODE).is_valid());
    }

    #[test]
    fn test_allow_empty() {
        let validator = Validator::new(stub(), ValidatorConfig::new().with_allow_empty(true));
        assert!(validator.validate("").is_valid());
        assert!(validator.validate("  \t").is_valid());
        assert!(validator.validate(None::<&str>).is_valid());
        assert!(validator.validate(&json!(null)).is_valid());
    }

    #[test]
    fn test_not_a_string() {
        let validator = Validator::new(stub(), ValidatorConfig::default());
        assert_eq!(
            validator.validate(None::<&str>).error_code(),
            Some(ErrorCode::ValueIsNotString)
        );
        assert_eq!(
            validator.validate(&json!(10)).error_code(),
            Some(ErrorCode::ValueIsNotString)
        );

        let allow_empty = Validator::new(stub(), ValidatorConfig::new().with_allow_empty(true));
        assert_eq!(
            allow_empty.validate(&json!(10)).error_code(),
            Some(ErrorCode::ValueIsNotString)
        );
    }

    #[test]
    fn test_empty() {
        let validator = Validator::new(stub(), ValidatorConfig::default());
        let resolution = validator.validate(" ");
        assert_eq!(resolution.error_code(), Some(ErrorCode::ValueEmpty));
        assert_eq!(resolution.errors()[0].message, "Value is empty");
    }

    #[test]
    fn test_missing_required_ai() {
        let config = ValidatorConfig::new().with_required_ais(["10", "21", "01"]);
        let resolution = Validator::new(stub(), config).validate(CODE);
        assert_eq!(resolution.error_code(), Some(ErrorCode::MissingAis));
        assert_eq!(resolution.errors()[0].message, "AIs are missing: \"10\", \"21\"");
    }

    #[test]
    fn test_forbidden_ai() {
        let config = ValidatorConfig::new().with_forbidden_ais(["01", "17"]);
        let resolution = Validator::new(stub(), config).validate(CODE);
        assert_eq!(resolution.error_code(), Some(ErrorCode::ForbiddenAis));
        assert_eq!(resolution.errors()[0].message, "AIs are forbidden: \"01\"");
    }

    #[test]
    fn test_constraints() {
        let accept = ValidatorConfig::new().with_ai_constraint("01", |_: &str| true);
        assert!(Validator::new(stub(), accept).validate(CODE).is_valid());

        let reject = ValidatorConfig::new().with_ai_constraint("01", |_: &str| false);
        let resolution = Validator::new(stub(), reject).validate(CODE);
        assert_eq!(resolution.error_code(), Some(ErrorCode::InvalidValue));
        assert_eq!(
            resolution.errors()[0].message,
            "AI is invalid: code=01, value=03453120000011"
        );
    }

    #[test]
    fn test_constraint_on_absent_ai_is_skipped() {
        let config = ValidatorConfig::new().with_ai_constraint("21", |_: &str| false);
        assert!(Validator::new(stub(), config).validate(CODE).is_valid());
    }

    #[test]
    fn test_first_failing_constraint_wins() {
        let mut ais = BTreeMap::new();
        ais.insert("01".to_string(), "A".to_string());
        ais.insert("21".to_string(), "B".to_string());
        let parser = StubParser(Ok(Barcode::new("x", CarrierType::Unknown, ais, vec![], "")));
        let config = ValidatorConfig::new()
            .with_ai_constraint("21", |_: &str| false)
            .with_ai_constraint("01", |_: &str| false);
        let resolution = Validator::new(parser, config).validate("x");
        assert_eq!(resolution.errors().len(), 1);
        assert_eq!(resolution.errors()[0].message, "AI is invalid: code=21, value=B");
    }

    #[test]
    fn test_missing_reported_before_forbidden() {
        let config = ValidatorConfig::new()
            .with_required_ais(["10"])
            .with_forbidden_ais(["01"])
            .with_ai_constraint("01", |_: &str| false);
        let resolution = Validator::new(stub(), config).validate(CODE);
        assert_eq!(resolution.errors().len(), 1);
        assert_eq!(resolution.error_code(), Some(ErrorCode::MissingAis));
    }

    #[test]
    fn test_parse_error_is_wrapped() {
        let parser = StubParser(Err(ParseError::MissingPrefix));
        let resolution = Validator::new(parser, ValidatorConfig::default()).validate(CODE);
        assert!(!resolution.is_valid());
        let violation = resolution.error().unwrap();
        assert_eq!(violation.code, ErrorCode::InvalidValue);
        assert_eq!(violation.cause, Some(ParseError::MissingPrefix));
    }

    #[test]
    fn test_validate_batch() {
        let validator = Validator::with_config(ValidatorConfig::default());
        let results = validator.validate_batch(&["]d21", "", "nope"]);
        assert!(results[0].is_valid());
        assert_eq!(results[1].error_code(), Some(ErrorCode::ValueEmpty));
        assert_eq!(results[2].error_code(), Some(ErrorCode::InvalidValue));
    }
}
