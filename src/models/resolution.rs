use crate::parser::ParseError;
use serde::Serialize;
use std::fmt;

/// Machine-matchable validation failure code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input was not text (or absent without `allow_empty`)
    ValueIsNotString,
    /// Input was blank
    ValueEmpty,
    /// Input failed to parse, or an AI failed its constraint
    InvalidValue,
    /// A required AI was not decoded
    MissingAis,
    /// A forbidden AI was decoded
    ForbiddenAis,
}

impl ErrorCode {
    /// Symbolic name
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValueIsNotString => "VALUE_IS_NOT_STRING",
            ErrorCode::ValueEmpty => "VALUE_EMPTY",
            ErrorCode::InvalidValue => "INVALID_VALUE",
            ErrorCode::MissingAis => "MISSING_AIS",
            ErrorCode::ForbiddenAis => "FORBIDDEN_AIS",
        }
    }

    /// Stable UUID identifier for cross-system matching
    pub fn uuid(&self) -> &'static str {
        match self {
            ErrorCode::ValueIsNotString => "c211cd00-71fe-4e35-a666-6f7d6ad8aa50",
            ErrorCode::ValueEmpty => "26e4f25e-7109-4ded-a460-12791e6f1413",
            ErrorCode::InvalidValue => "5ba19646-7e8d-4c8e-a282-0eadc12a9d9d",
            ErrorCode::MissingAis => "13a6b47f-7f45-4f40-b9a2-a0064e2284dd",
            ErrorCode::ForbiddenAis => "8517a465-02ee-43b7-a824-8ce79ef4e3d8",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rule failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Failure code
    pub code: ErrorCode,
    /// Human readable message
    pub message: String,
    /// Underlying tokenizer failure, for `INVALID_VALUE` raised by parsing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<ParseError>,
}

/// Verdict of a validation call
///
/// Carries at most one violation: the rule chain stops at the first failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    is_valid: bool,
    errors: Vec<Violation>,
}

impl Resolution {
    /// Accepting verdict
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    /// Rejecting verdict with one violation
    pub fn invalid(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::from_violation(Violation {
            code,
            message: message.into(),
            cause: None,
        })
    }

    /// Rejecting verdict for a tokenizer failure
    pub fn unparsable(error: ParseError) -> Self {
        Self::from_violation(Violation {
            code: ErrorCode::InvalidValue,
            message: format!("Value is invalid: {error}"),
            cause: Some(error),
        })
    }

    fn from_violation(violation: Violation) -> Self {
        Self {
            is_valid: false,
            errors: vec![violation],
        }
    }

    /// Whether the input was accepted
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Violations (empty or exactly one)
    pub fn errors(&self) -> &[Violation] {
        &self.errors
    }

    /// The violation, if any
    pub fn error(&self) -> Option<&Violation> {
        self.errors.first()
    }

    /// Code of the violation, if any
    pub fn error_code(&self) -> Option<ErrorCode> {
        self.error().map(|v| v.code)
    }
}
