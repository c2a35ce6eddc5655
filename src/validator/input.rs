use serde_json::Value;

/// Value handed to the validator
///
/// Statically typed callers pass `&str` or `Option<&str>`; callers holding
/// dynamically typed data (JSON payloads, form fields) pass a
/// [`serde_json::Value`] and get `VALUE_IS_NOT_STRING` for non-text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanInput<'a> {
    /// No value at all
    Absent,
    /// Text to parse
    Text(&'a str),
    /// A value that is not text; carries its type name
    Other(&'static str),
}

impl<'a> From<&'a str> for ScanInput<'a> {
    fn from(text: &'a str) -> Self {
        ScanInput::Text(text)
    }
}

impl<'a> From<&'a String> for ScanInput<'a> {
    fn from(text: &'a String) -> Self {
        ScanInput::Text(text)
    }
}

impl<'a> From<Option<&'a str>> for ScanInput<'a> {
    fn from(text: Option<&'a str>) -> Self {
        text.map_or(ScanInput::Absent, ScanInput::Text)
    }
}

impl<'a> From<&'a Value> for ScanInput<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Null => ScanInput::Absent,
            Value::String(text) => ScanInput::Text(text),
            Value::Bool(_) => ScanInput::Other("boolean"),
            Value::Number(_) => ScanInput::Other("number"),
            Value::Array(_) => ScanInput::Other("array"),
            Value::Object(_) => ScanInput::Other("object"),
        }
    }
}
