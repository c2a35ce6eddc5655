use crate::models::CarrierType;
use crate::symbols::{DEFAULT_PREFIX_MAP, GROUP_SEPARATOR_SYMBOL};
use thiserror::Error;

/// Configuration mistake
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Empty group separator
    #[error("Group separator must not be empty")]
    EmptyGroupSeparator,

    /// Environment override could not be parsed
    #[error("Invalid value {value:?} for {name}")]
    InvalidEnv {
        /// Variable name
        name: &'static str,
        /// Rejected value
        value: String,
    },
}

/// Environment variable toggling the FNC1 requirement (`0`/`1`/`true`/`false`)
pub const ENV_FNC1_REQUIRED: &str = "GS1_FNC1_REQUIRED";
/// Environment variable overriding the group separator
pub const ENV_GROUP_SEPARATOR: &str = "GS1_GROUP_SEPARATOR";
/// Environment variable listing known AIs, comma separated
pub const ENV_KNOWN_AIS: &str = "GS1_KNOWN_AIS";

/// Tokenizer configuration
///
/// Built once and shared read-only. Prefix map and known AIs are matched
/// in the order given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    fnc1_required: bool,
    prefix_map: Vec<(String, CarrierType)>,
    group_separator: String,
    known_ais: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            fnc1_required: true,
            prefix_map: DEFAULT_PREFIX_MAP
                .iter()
                .map(|&(prefix, kind)| (prefix.to_string(), kind))
                .collect(),
            group_separator: GROUP_SEPARATOR_SYMBOL.to_string(),
            known_ais: Vec::new(),
        }
    }
}

impl ParserConfig {
    /// Default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults with `GS1_*` environment overrides applied
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults with overrides resolved through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_FNC1_REQUIRED) {
            config.fnc1_required = parse_env_bool(ENV_FNC1_REQUIRED, &raw)?;
        }
        if let Some(raw) = lookup(ENV_GROUP_SEPARATOR) {
            config = config.with_group_separator(raw)?;
        }
        if let Some(raw) = lookup(ENV_KNOWN_AIS) {
            config = config.with_known_ais(raw.split(',').map(str::trim));
        }

        Ok(config)
    }

    /// Require (or not) an FNC1 prefix at the start of input
    pub fn with_fnc1_required(mut self, required: bool) -> Self {
        self.fnc1_required = required;
        self
    }

    /// Replace the prefix map
    pub fn with_prefix_map<I, S>(mut self, prefix_map: I) -> Self
    where
        I: IntoIterator<Item = (S, CarrierType)>,
        S: Into<String>,
    {
        self.prefix_map = prefix_map
            .into_iter()
            .map(|(prefix, kind)| (prefix.into(), kind))
            .collect();
        self
    }

    /// Replace the group separator; may be multi-character
    pub fn with_group_separator(
        mut self,
        separator: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let separator = separator.into();
        if separator.is_empty() {
            return Err(ConfigError::EmptyGroupSeparator);
        }
        self.group_separator = separator;
        Ok(self)
    }

    /// Replace the known AI list. Empty codes are dropped.
    pub fn with_known_ais<I, S>(mut self, known_ais: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known_ais = known_ais
            .into_iter()
            .map(Into::into)
            .filter(|code: &String| !code.is_empty())
            .collect();
        self
    }

    /// Whether an FNC1 prefix is mandatory
    pub fn is_fnc1_required(&self) -> bool {
        self.fnc1_required
    }

    /// Prefix to carrier type mapping, in match order
    pub fn prefix_map(&self) -> &[(String, CarrierType)] {
        &self.prefix_map
    }

    /// Group separator
    pub fn group_separator(&self) -> &str {
        &self.group_separator
    }

    /// Known AI codes, in match order
    pub fn known_ais(&self) -> &[String] {
        &self.known_ais
    }

    /// Check membership in the known AI list
    pub fn is_known_ai(&self, code: &[u8]) -> bool {
        self.known_ais.iter().any(|ai| ai.as_bytes() == code)
    }
}

fn parse_env_bool(name: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidEnv {
            name,
            value: raw.to_string(),
        }),
    }
}
