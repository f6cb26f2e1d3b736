//! # brownian-portfolio
//!
//! A streaming portfolio optimizer over a random-walk model of equity
//! prices. Feed it a merged stream of `(timestamp, ticker, price)`
//! samples; it maintains per-equity statistics, compensates each equity's
//! estimated Shannon probability for data-set size and run-length, ranks
//! equities at each time step, and assembles a balanced portfolio by
//! incrementally admitting equities under one of six decision methods and
//! three allocation policies.
//!
//! ## Quick Start
//!
//! ```
//! use brownian_portfolio::config::EngineConfig;
//! use brownian_portfolio::engine::PortfolioEngine;
//!
//! let mut engine = PortfolioEngine::new(EngineConfig::default())?;
//! for price in [100.0, 110.0, 121.0] {
//!     engine.observe("ABC", price);
//!     let interval = engine.end_interval("2024-01-01".to_string());
//!     println!("portfolio value: {}", interval.portfolio_value);
//! }
//! # Ok::<(), brownian_portfolio::error::ConfigError>(())
//! ```
//!
//! ## Driving it from an iterator of records
//!
//! The engine itself never reads a file or parses a command line; that's
//! the CLI crate's job. [`dispatcher::dispatch`] wires any
//! `IntoIterator<Item = dispatcher::Record>` and any
//! [`dispatcher::OutputSink`] into the engine.

#![warn(missing_docs)]
#![allow(clippy::too_many_arguments)]

/// Portfolio assembler: admission, weighting, and margin sizing.
pub mod assembler;
/// Engine configuration, validated once at construction.
pub mod config;
/// Decision scoring: methods and allocation policies.
pub mod decision;
/// Tick dispatcher and the `Record`/`OutputSink` abstractions.
pub mod dispatcher;
/// Engine construction/configuration errors.
pub mod error;
/// `PortfolioEngine`, the facade wiring every component together.
pub mod engine;
/// Per-equity streaming statistics.
pub mod equity;
/// Two aggregate indices tracked parallel to the portfolio.
pub mod index;
/// Cumulative standard-normal lookup table.
pub mod normal;
/// Dense equity registry (ticker lookup + insertion-ordered storage).
pub mod registry;
/// Confidence-adjusted Shannon probability solvers.
pub mod solvers;

pub use config::EngineConfig;
pub use decision::{AllocationPolicy, DecisionMethod};
pub use dispatcher::{OutputRecord, OutputSink, Record};
pub use engine::PortfolioEngine;
pub use error::ConfigError;
