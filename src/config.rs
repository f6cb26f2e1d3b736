//! Engine configuration, validated once at construction.

use crate::decision::{AllocationPolicy, DecisionMethod};
use crate::error::{ConfigError, Result};

/// Validated configuration for a [`crate::engine::PortfolioEngine`].
///
/// Constructed via [`EngineConfig::new`] (validating) or
/// [`EngineConfig::default`] followed by field overrides and an explicit
/// [`EngineConfig::validate`] call.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct EngineConfig {
    /// Scoring method used to rank candidates for admission.
    pub decision_method: DecisionMethod,
    /// Policy used to size capital allocations among admitted equities.
    pub allocation_policy: AllocationPolicy,
    /// Starting capital for the portfolio.
    pub initial_capital: f64,
    /// Minimum decision score required for admission (before `effective_minimum_decision`).
    pub minimum_decision: f64,
    /// Minimum number of equities the assembler tries to keep admitted.
    pub minimum_concurrent: usize,
    /// Maximum number of equities the assembler may admit at once.
    pub maximum_concurrent: usize,
    /// Marginal fractions at or above this value are rejected as outliers.
    pub max_marginal_increment: f64,
    /// Whether raw confidences are scaled by the dataset-size compensation factor.
    pub dataset_size_compensation: bool,
    /// Whether the `RunLength` decision method compensates for streak length.
    pub run_length_compensation: bool,
    /// Whether decision scores are inverted, favoring mean-reverting candidates.
    pub reverse_sense: bool,
    /// Whether to skip assembly for equities with no new observation this interval.
    pub invest_only_if_updated: bool,
    /// Whether to skip statistics updates for equities with no new observation this interval.
    pub stats_only_if_updated: bool,
    /// Upper bound on the margin reciprocal the assembler may size into.
    pub max_margin_reciprocal: f64,
    /// Seed for the `Random` decision method's RNG. An ambient addition:
    /// the distilled spec calls only for determinism given a fixed seed,
    /// not for where the seed comes from.
    pub random_seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            decision_method: DecisionMethod::AvgRms,
            allocation_policy: AllocationPolicy::Equal,
            initial_capital: 1000.0,
            minimum_decision: 1.0,
            minimum_concurrent: 10,
            maximum_concurrent: 10,
            max_marginal_increment: 1.0,
            dataset_size_compensation: true,
            run_length_compensation: false,
            reverse_sense: false,
            invest_only_if_updated: false,
            stats_only_if_updated: false,
            max_margin_reciprocal: 1.0,
            random_seed: 0,
        }
    }
}

impl EngineConfig {
    /// Validates field-level invariants. Called once by
    /// `PortfolioEngine::new`; never re-checked mid-stream.
    pub fn validate(&self) -> Result<()> {
        if self.initial_capital <= 0.0 {
            return Err(ConfigError::non_positive_capital(self.initial_capital));
        }
        if self.minimum_concurrent > self.maximum_concurrent {
            return Err(ConfigError::concurrency_bounds_inverted(
                self.minimum_concurrent,
                self.maximum_concurrent,
            ));
        }
        if self.max_marginal_increment <= 0.0 {
            return Err(ConfigError::non_positive_marginal_increment(
                self.max_marginal_increment,
            ));
        }
        if self.max_margin_reciprocal < 1.0 {
            return Err(ConfigError::invalid_max_margin_reciprocal(
                self.max_margin_reciprocal,
            ));
        }
        Ok(())
    }

    /// The effective minimum decision threshold, lowered to `-1.0` for
    /// `Random` or `reverse_sense` per §4.5.
    pub fn effective_minimum_decision(&self) -> f64 {
        if self.decision_method == DecisionMethod::Random || self.reverse_sense {
            -1.0
        } else {
            self.minimum_decision
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_capital() {
        let cfg = EngineConfig {
            initial_capital: 0.0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_inverted_concurrency_bounds() {
        let cfg = EngineConfig {
            minimum_concurrent: 5,
            maximum_concurrent: 2,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_sub_unity_max_margin_reciprocal() {
        let cfg = EngineConfig {
            max_margin_reciprocal: 0.5,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn random_and_reverse_sense_lower_the_decision_floor() {
        let cfg = EngineConfig {
            decision_method: DecisionMethod::Random,
            ..Default::default()
        };
        assert_eq!(cfg.effective_minimum_decision(), -1.0);

        let cfg = EngineConfig {
            reverse_sense: true,
            ..Default::default()
        };
        assert_eq!(cfg.effective_minimum_decision(), -1.0);
    }
}
