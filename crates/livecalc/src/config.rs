//! Calculator configuration

use crate::core::evaluator::{EvaluationPolicy, Evaluator, DEFAULT_DIVISION_EPSILON};
use crate::core::format::DEFAULT_DECIMAL_PLACES;
use serde::{Deserialize, Serialize};

/// Per-session calculator settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalcConfig {
    /// Evaluation policy
    pub policy: EvaluationPolicy,
    /// Maximum fractional digits shown
    pub decimal_places: usize,
    /// Divisor magnitude below which division fails
    pub division_epsilon: f64,
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            policy: EvaluationPolicy::Precedence,
            decimal_places: DEFAULT_DECIMAL_PLACES,
            division_epsilon: DEFAULT_DIVISION_EPSILON,
        }
    }
}

impl CalcConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set evaluation policy
    #[must_use]
    pub const fn with_policy(mut self, policy: EvaluationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set displayed decimal places
    #[must_use]
    pub const fn with_decimal_places(mut self, decimal_places: usize) -> Self {
        self.decimal_places = decimal_places;
        self
    }

    /// Set division epsilon
    #[must_use]
    pub const fn with_division_epsilon(mut self, epsilon: f64) -> Self {
        self.division_epsilon = epsilon;
        self
    }

    /// Builds the evaluator described by this configuration
    #[must_use]
    pub const fn evaluator(&self) -> Evaluator {
        Evaluator::with_policy(self.policy).with_epsilon(self.division_epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CalcConfig::default();
        assert_eq!(config.policy, EvaluationPolicy::Precedence);
        assert_eq!(config.decimal_places, 7);
        assert_eq!(config.division_epsilon, 1e-12);
    }

    #[test]
    fn test_builders() {
        let config = CalcConfig::new()
            .with_policy(EvaluationPolicy::Sequential)
            .with_decimal_places(3)
            .with_division_epsilon(1e-6);
        assert_eq!(config.policy, EvaluationPolicy::Sequential);
        assert_eq!(config.decimal_places, 3);
        assert_eq!(config.division_epsilon, 1e-6);
    }

    #[test]
    fn test_evaluator_from_config() {
        let config = CalcConfig::new().with_policy(EvaluationPolicy::Sequential);
        let evaluator = config.evaluator();
        assert_eq!(evaluator.policy(), EvaluationPolicy::Sequential);
        assert_eq!(evaluator.epsilon(), 1e-12);
    }

    #[test]
    fn test_serde_roundtrip_partial() {
        let config: CalcConfig = serde_json::from_str(r#"{"policy":"sequential"}"#).unwrap();
        assert_eq!(config.policy, EvaluationPolicy::Sequential);
        assert_eq!(config.decimal_places, 7);
    }

    #[test]
    fn test_serde_rejects_unknown_policy() {
        let result: Result<CalcConfig, _> = serde_json::from_str(r#"{"policy":"rpn"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_lowercase_policy() {
        let json = serde_json::to_string(&CalcConfig::default()).unwrap();
        assert!(json.contains("\"policy\":\"precedence\""));
    }
}
