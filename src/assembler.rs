//! Portfolio assembler: sorts equities by decision score, incrementally
//! admits them while portfolio gain increases, and sizes margin.

use crate::config::EngineConfig;
use crate::decision::{AllocationPolicy, DecisionMethod};
use crate::equity::EquityState;
use crate::registry::Registry;

/// Portfolio-level aggregates mutated only by the assembler.
#[derive(Debug, Clone)]
pub struct Portfolio {
    /// Uninvested capital.
    pub capital: f64,
    /// `capital` plus the sum of held equities' capital.
    pub portfolio_value: f64,
    /// Leverage factor, clamped to `[1, max_margin_reciprocal]`.
    pub margin_reciprocal: f64,
    /// Indices into the registry of currently held equities, in ascending
    /// desirability order (the reverse of admission order), as printed.
    pub held: Vec<usize>,
}

impl Portfolio {
    /// Seeds an unlevered, fully-uninvested portfolio with `initial_capital`.
    pub fn new(initial_capital: f64) -> Self {
        Self {
            capital: initial_capital,
            portfolio_value: initial_capital,
            margin_reciprocal: 1.0,
            held: Vec::new(),
        }
    }

    /// `1 - 1/margin_reciprocal`, the fraction of the portfolio bought on
    /// margin.
    pub fn margin_fraction(&self) -> f64 {
        1.0 - 1.0 / self.margin_reciprocal
    }
}

fn candidate_p_p(method: DecisionMethod, avg_p: f64, rms_p: f64) -> Option<f64> {
    match method {
        DecisionMethod::Rms => Some(((rms_p + 1.0) / 2.0).clamp(0.0, 1.0)),
        DecisionMethod::Avg => {
            if avg_p < 0.0 {
                None
            } else {
                Some(((avg_p.sqrt() + 1.0) / 2.0).clamp(0.0, 1.0))
            }
        }
        DecisionMethod::AvgRms | DecisionMethod::RunLength | DecisionMethod::Persistence => {
            if rms_p == 0.0 {
                None
            } else {
                Some(((avg_p / rms_p + 1.0) / 2.0).clamp(0.0, 1.0))
            }
        }
        DecisionMethod::Random => Some(((rms_p + 1.0) / 2.0).clamp(0.0, 1.0)),
    }
}

fn modeled_gain(rms_p: f64, p_p: f64) -> f64 {
    if rms_p >= 1.0 {
        0.0
    } else {
        (1.0 + rms_p).powf(p_p) * (1.0 - rms_p).powf(1.0 - p_p)
    }
}

/// Runs one assembler pass: liquidates the previous holdings, sorts by
/// decision, admits a prefix of the sorted list, assigns weights, and
/// sizes margin.
pub fn assemble(portfolio: &mut Portfolio, registry: &mut Registry, cfg: &EngineConfig) {
    liquidate(portfolio, registry);

    let mut order: Vec<usize> = (0..registry.len()).collect();
    order.sort_by(|&a, &b| {
        let da = registry.get(a).decision;
        let db = registry.get(b).decision;
        if cfg.reverse_sense {
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        } else {
            db.partial_cmp(&da).unwrap_or(std::cmp::Ordering::Equal)
        }
    });

    let min_decision = cfg.effective_minimum_decision();
    let mut admitted: Vec<usize> = Vec::new();
    let mut sum_avg = 0.0_f64;
    let mut sum_rms_sq = 0.0_f64;
    let mut g_prev = 0.0_f64;

    for idx in order {
        let eq = registry.get(idx);
        if eq.transactions <= 1 {
            continue;
        }
        if eq.consecutive_updated_intervals <= 1 && cfg.invest_only_if_updated {
            continue;
        }
        if eq.decision <= min_decision {
            continue;
        }
        if admitted.len() >= cfg.maximum_concurrent {
            break;
        }

        let n = admitted.len();
        let avg_p = (sum_avg + eq.avg) / (n as f64 + 1.0);
        let rms_p = (sum_rms_sq + eq.rms * eq.rms).sqrt() / (n as f64 + 1.0).sqrt();
        let p_p = candidate_p_p(cfg.decision_method, avg_p, rms_p);
        let g_p = p_p.map(|p| modeled_gain(rms_p, p)).unwrap_or(0.0);

        let relaxed = n < cfg.minimum_concurrent;
        if g_p < g_prev && !relaxed {
            break;
        }

        sum_avg += eq.avg;
        sum_rms_sq += eq.rms * eq.rms;
        g_prev = g_p;
        admitted.push(idx);

        if let Some(p_p) = p_p
            && p_p >= 1.0
            && admitted.len() > cfg.minimum_concurrent
            && avg_p >= rms_p
        {
            break;
        }
    }

    let weights = allocation_weights(registry, &admitted, cfg.allocation_policy);
    for (&idx, &w) in admitted.iter().zip(weights.iter()) {
        let eq = registry.get_mut(idx);
        eq.capital = portfolio.portfolio_value * w;
        portfolio.capital -= eq.capital;
    }

    portfolio.margin_reciprocal = size_margin(registry, &admitted, &weights, cfg);
    // Printed in ascending desirability: reverse of admission (descending) order.
    portfolio.held = admitted.into_iter().rev().collect();
}

fn liquidate(portfolio: &mut Portfolio, registry: &mut Registry) {
    for &idx in &portfolio.held {
        let eq = registry.get_mut(idx);
        if eq.transactions >= 2 {
            eq.capital *= 1.0 + eq.last_fraction;
        }
        portfolio.capital += eq.capital;
        eq.capital = 0.0;
    }
    portfolio.held.clear();
    portfolio.portfolio_value = portfolio.capital;
}

fn allocation_weights(
    registry: &Registry,
    admitted: &[usize],
    policy: AllocationPolicy,
) -> Vec<f64> {
    if admitted.is_empty() {
        return Vec::new();
    }
    if policy == AllocationPolicy::Equal {
        return vec![1.0 / admitted.len() as f64; admitted.len()];
    }
    let total: f64 = admitted
        .iter()
        .map(|&i| registry.get(i).allocation_fraction)
        .sum();
    if total <= 0.0 {
        return vec![1.0 / admitted.len() as f64; admitted.len()];
    }
    admitted
        .iter()
        .map(|&i| registry.get(i).allocation_fraction / total)
        .collect()
}

fn size_margin(
    registry: &Registry,
    admitted: &[usize],
    weights: &[f64],
    cfg: &EngineConfig,
) -> f64 {
    if admitted.is_empty() {
        return 1.0;
    }
    let avg_p: f64 = admitted
        .iter()
        .zip(weights)
        .map(|(&i, &w)| {
            let eq: &EquityState = registry.get(i);
            (2.0 * eq.p_eff_a - 1.0).powi(2) * w
        })
        .sum();
    let inner_sum: f64 = admitted
        .iter()
        .zip(weights)
        .map(|(&i, &w)| {
            let eq = registry.get(i);
            (2.0 * eq.rms - (2.0 * eq.p_eff_r - 1.0)) * w
        })
        .sum();
    // The spec's rms_P formula squares then immediately re-roots the same
    // weighted sum, which is just its absolute value.
    let rms_p = inner_sum.abs();
    if rms_p == 0.0 {
        return cfg.max_margin_reciprocal;
    }
    (avg_p / (rms_p * rms_p) - 1.0).clamp(1.0, cfg.max_margin_reciprocal)
}
