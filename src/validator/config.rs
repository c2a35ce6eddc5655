use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Predicate over a decoded AI value
pub trait AiConstraint: Send + Sync {
    /// Whether `value` is acceptable
    fn evaluate(&self, value: &str) -> bool;
}

impl<F> AiConstraint for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn evaluate(&self, value: &str) -> bool {
        self(value)
    }
}

/// Rule set applied to every decoded barcode
#[derive(Clone, Default)]
pub struct ValidatorConfig {
    required_ais: BTreeSet<String>,
    forbidden_ais: BTreeSet<String>,
    ai_constraints: Vec<(String, Arc<dyn AiConstraint>)>,
    allow_empty: bool,
}

impl ValidatorConfig {
    /// No rules; empty input rejected
    pub fn new() -> Self {
        Self::default()
    }

    /// AIs that must be decoded
    pub fn with_required_ais<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_ais = codes.into_iter().map(Into::into).collect();
        self
    }

    /// AIs that must not be decoded
    pub fn with_forbidden_ais<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.forbidden_ais = codes.into_iter().map(Into::into).collect();
        self
    }

    /// Append a constraint for `code`. Constraints run in the order added.
    pub fn with_ai_constraint<C>(mut self, code: impl Into<String>, constraint: C) -> Self
    where
        C: AiConstraint + 'static,
    {
        self.ai_constraints.push((code.into(), Arc::new(constraint)));
        self
    }

    /// Accept absent or blank input
    pub fn with_allow_empty(mut self, allow_empty: bool) -> Self {
        self.allow_empty = allow_empty;
        self
    }

    /// Required AI codes
    pub fn required_ais(&self) -> &BTreeSet<String> {
        &self.required_ais
    }

    /// Forbidden AI codes
    pub fn forbidden_ais(&self) -> &BTreeSet<String> {
        &self.forbidden_ais
    }

    /// Constraints in evaluation order
    pub fn ai_constraints(&self) -> impl Iterator<Item = (&str, &dyn AiConstraint)> {
        self.ai_constraints
            .iter()
            .map(|(code, constraint)| (code.as_str(), constraint.as_ref()))
    }

    /// Whether absent or blank input is accepted
    pub fn is_allow_empty(&self) -> bool {
        self.allow_empty
    }
}

impl fmt::Debug for ValidatorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let constrained: Vec<&str> = self
            .ai_constraints
            .iter()
            .map(|(code, _)| code.as_str())
            .collect();
        f.debug_struct("ValidatorConfig")
            .field("required_ais", &self.required_ais)
            .field("forbidden_ais", &self.forbidden_ais)
            .field("ai_constraints", &constrained)
            .field("allow_empty", &self.allow_empty)
            .finish()
    }
}
