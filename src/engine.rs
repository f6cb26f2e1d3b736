//! `PortfolioEngine`: the owned value wiring statistics, scoring,
//! assembly, and index tracking together. The single entry point the CLI
//! (or any embedder) drives.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::trace;

use crate::assembler::{self, Portfolio};
use crate::config::EngineConfig;
use crate::decision;
use crate::dispatcher::{Holding, OutputRecord};
use crate::error::Result;
#[cfg(test)]
use crate::error::ConfigError;
use crate::index::IndexTracker;
use crate::normal;
use crate::registry::Registry;

/// Owns the equity registry, portfolio aggregates, index tracker, and the
/// seeded RNG backing the `Random` decision method.
pub struct PortfolioEngine {
    config: EngineConfig,
    registry: Registry,
    portfolio: Portfolio,
    index: IndexTracker,
    rng: ChaCha8Rng,
}

impl PortfolioEngine {
    /// Validates `config` and constructs a fresh engine. Fails before any
    /// records are read if configuration invariants don't hold.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let portfolio = Portfolio::new(config.initial_capital);
        let index = IndexTracker::new(config.initial_capital);
        let rng = ChaCha8Rng::seed_from_u64(config.random_seed);
        Ok(Self {
            registry: Registry::new(),
            portfolio,
            index,
            rng,
            config,
        })
    }

    /// The validated configuration this engine was built from.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The current equity registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The current portfolio aggregates.
    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    /// The current index tracker state.
    pub fn index(&self) -> &IndexTracker {
        &self.index
    }

    /// Records a within-interval price observation. Last price wins for a
    /// repeated ticker in the same interval.
    pub fn observe(&mut self, ticker: &str, price: f64) {
        let idx = self.registry.index_for(ticker, price);
        self.registry.get_mut(idx).observe_price(price);
    }

    /// Completes the current interval: statistics, then scoring, then
    /// assembly, then index update, returning the snapshot to emit.
    pub fn end_interval(&mut self, timestamp: String) -> OutputRecord {
        let table = normal::shared();

        for eq in self.registry.equities_mut() {
            eq.update_statistics(
                table,
                self.config.max_marginal_increment,
                self.config.stats_only_if_updated,
            );
        }

        for eq in self.registry.equities_mut() {
            decision::score(
                eq,
                self.config.decision_method,
                self.config.allocation_policy,
                self.config.dataset_size_compensation,
                self.config.run_length_compensation,
                &mut self.rng,
            );
        }

        assembler::assemble(&mut self.portfolio, &mut self.registry, &self.config);
        self.index
            .update(self.registry.equities(), self.portfolio.margin_reciprocal);

        trace!(
            timestamp = %timestamp,
            held = self.portfolio.held.len(),
            portfolio_value = self.portfolio.portfolio_value,
            "interval complete"
        );

        self.snapshot(timestamp)
    }

    fn snapshot(&self, timestamp: String) -> OutputRecord {
        let holdings = self
            .portfolio
            .held
            .iter()
            .map(|&idx| {
                let eq = self.registry.get(idx);
                let allocation = if eq.capital > 0.0 && self.portfolio.portfolio_value > 0.0 {
                    Some(eq.capital / self.portfolio.portfolio_value)
                } else {
                    None
                };
                Holding {
                    ticker: eq.ticker.clone(),
                    allocation,
                }
            })
            .collect();

        let margin_fraction = if self.config.max_margin_reciprocal > 1.0 {
            Some(self.portfolio.margin_fraction())
        } else {
            None
        };

        OutputRecord {
            timestamp,
            index: self.index.average_index,
            average_value: self.index.average_value,
            portfolio_value: self.portfolio.portfolio_value,
            margin_fraction,
            holdings,
        }
    }
}
