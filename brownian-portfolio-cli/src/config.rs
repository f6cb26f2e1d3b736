use brownian_portfolio::{AllocationPolicy, DecisionMethod, EngineConfig};
use clap::{Args, ValueEnum};

use crate::error::{CliError, Result};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DecisionMethodArg {
    AvgRms,
    Rms,
    Avg,
    RunLength,
    Persistence,
    Random,
}

impl From<DecisionMethodArg> for DecisionMethod {
    fn from(value: DecisionMethodArg) -> Self {
        match value {
            DecisionMethodArg::AvgRms => DecisionMethod::AvgRms,
            DecisionMethodArg::Rms => DecisionMethod::Rms,
            DecisionMethodArg::Avg => DecisionMethod::Avg,
            DecisionMethodArg::RunLength => DecisionMethod::RunLength,
            DecisionMethodArg::Persistence => DecisionMethod::Persistence,
            DecisionMethodArg::Random => DecisionMethod::Random,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum AllocationPolicyArg {
    Equal,
    MaxGain,
    MinRisk,
}

impl From<AllocationPolicyArg> for AllocationPolicy {
    fn from(value: AllocationPolicyArg) -> Self {
        match value {
            AllocationPolicyArg::Equal => AllocationPolicy::Equal,
            AllocationPolicyArg::MaxGain => AllocationPolicy::MaxGain,
            AllocationPolicyArg::MinRisk => AllocationPolicy::MinRisk,
        }
    }
}

/// Command-line surface for [`EngineConfig`]. Every field mirrors a
/// configuration knob from the engine; defaults match
/// [`EngineConfig::default`].
#[derive(Debug, Args)]
pub struct EngineArgs {
    /// Decision scoring method.
    #[arg(long, value_enum, default_value = "avg-rms")]
    pub decision_method: DecisionMethodArg,

    /// Capital allocation policy.
    #[arg(long, value_enum, default_value = "equal")]
    pub allocation_policy: AllocationPolicyArg,

    /// Starting uninvested capital.
    #[arg(long, default_value_t = 1000.0)]
    pub initial_capital: f64,

    /// Minimum decision score required to be investable.
    #[arg(long, default_value_t = 1.0)]
    pub minimum_decision: f64,

    /// Minimum number of equities to hold once any are investable.
    #[arg(long, default_value_t = 10)]
    pub minimum_concurrent: usize,

    /// Maximum number of equities held concurrently.
    #[arg(long, default_value_t = 10)]
    pub maximum_concurrent: usize,

    /// Reject marginal increments at or above this fraction.
    #[arg(long, default_value_t = 1.0)]
    pub max_marginal_increment: f64,

    /// Disable data-set-size compensation (P_comp).
    #[arg(long)]
    pub no_dataset_size_compensation: bool,

    /// Enable run-length-duration compensation.
    #[arg(long)]
    pub run_length_compensation: bool,

    /// Sort by ascending decision instead of descending.
    #[arg(long)]
    pub reverse_sense: bool,

    /// Only consider admitting an equity updated in the prior interval.
    #[arg(long)]
    pub invest_only_if_updated: bool,

    /// Only update statistics for equities observed this interval.
    #[arg(long)]
    pub stats_only_if_updated: bool,

    /// Maximum leverage factor, must be >= 1.0.
    #[arg(long, default_value_t = 1.0)]
    pub max_margin_reciprocal: f64,

    /// Seed for the Random decision method's RNG.
    #[arg(long, default_value_t = 0)]
    pub random_seed: u64,
}

impl EngineArgs {
    /// Builds and validates an [`EngineConfig`] from the parsed arguments.
    pub fn into_engine_config(self) -> Result<EngineConfig> {
        if self.minimum_concurrent > self.maximum_concurrent {
            return Err(CliError::InvalidArgument(format!(
                "minimum-concurrent ({}) exceeds maximum-concurrent ({})",
                self.minimum_concurrent, self.maximum_concurrent
            )));
        }
        // EngineConfig is #[non_exhaustive], so downstream crates build it
        // from Default and assign fields rather than using struct-literal
        // syntax.
        let mut cfg = EngineConfig::default();
        cfg.decision_method = self.decision_method.into();
        cfg.allocation_policy = self.allocation_policy.into();
        cfg.initial_capital = self.initial_capital;
        cfg.minimum_decision = self.minimum_decision;
        cfg.minimum_concurrent = self.minimum_concurrent;
        cfg.maximum_concurrent = self.maximum_concurrent;
        cfg.max_marginal_increment = self.max_marginal_increment;
        cfg.dataset_size_compensation = !self.no_dataset_size_compensation;
        cfg.run_length_compensation = self.run_length_compensation;
        cfg.reverse_sense = self.reverse_sense;
        cfg.invest_only_if_updated = self.invest_only_if_updated;
        cfg.stats_only_if_updated = self.stats_only_if_updated;
        cfg.max_margin_reciprocal = self.max_margin_reciprocal;
        cfg.random_seed = self.random_seed;
        Ok(cfg)
    }
}
