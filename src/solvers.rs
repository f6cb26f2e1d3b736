//! Confidence-adjusted Shannon probability solvers.
//!
//! Three independent bisection searches over the [`NormalTable`], each
//! converting an equity's `(avg, rms, N)` into a Shannon probability `P`,
//! a confidence multiplier `c`, and their product `P_eff = P · c`.

use crate::normal::{NormalTable, STEPS_PER_SIGMA};

/// Output of a confidence solver: probability, confidence, and their product.
///
/// All three fields are always in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverOutput {
    /// Shannon probability under this method's formulation.
    pub p: f64,
    /// Confidence multiplier derived from the bisected σ.
    pub c: f64,
    /// `p * c`, the effective (size-compensated) probability.
    pub p_eff: f64,
}

const SAFE_DEFAULT: SolverOutput = SolverOutput {
    p: 0.5,
    c: 0.5,
    p_eff: 0.25,
};

fn finish(p: f64, c: f64) -> SolverOutput {
    let p = p.clamp(0.0, 1.0);
    let c = c.clamp(0.0, 1.0);
    SolverOutput {
        p,
        c,
        p_eff: (p * c).clamp(0.0, 1.0),
    }
}

/// Binary search over table indices `[0, max_index]` for the crossing
/// point of a monotonically non-increasing function `f(sigma)`.
///
/// Returns the largest index at which `f >= 0`, clamped to the search
/// bound when `f` never crosses (both endpoints on the same side).
fn bisect_sigma(max_index: usize, mut f: impl FnMut(f64) -> f64) -> usize {
    let idx_to_sigma = |i: usize| i as f64 / STEPS_PER_SIGMA as f64;

    let mut lo = 0usize;
    let mut hi = max_index;
    if hi == lo {
        return lo;
    }
    if f(idx_to_sigma(lo)) < 0.0 {
        return lo;
    }
    if f(idx_to_sigma(hi)) > 0.0 {
        return hi;
    }
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        if f(idx_to_sigma(mid)) >= 0.0 {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    lo
}

/// rms-only confidence solver.
///
/// Solves `rms − (rms·σ/√(2N)) + 1 − (rms+1)·Φ(σ) = 0` for σ.
pub fn solve_rms(table: &NormalTable, rms: f64, samples: f64) -> SolverOutput {
    if samples <= 0.0 {
        return SAFE_DEFAULT;
    }
    let denom = (2.0 * samples).sqrt();
    let idx = bisect_sigma(table.len() - 1, |sigma| {
        rms - (rms * sigma / denom) + 1.0 - (rms + 1.0) * table.cdf(sigma)
    });
    let c = table.cdf_at(idx);
    finish((rms + 1.0) / 2.0, c)
}

/// avg-only confidence solver.
///
/// Solves `√(avg − rms·σ/√N) + 1 − (√avg + 1)·Φ(σ) = 0` for σ, restricted
/// to the interval keeping the radicand non-negative.
pub fn solve_avg(table: &NormalTable, avg: f64, rms: f64, samples: f64) -> SolverOutput {
    if rms == 0.0 || avg < 0.0 || samples <= 0.0 {
        return SAFE_DEFAULT;
    }
    let sqrt_n = samples.sqrt();
    let max_index = ((avg / rms) * sqrt_n * STEPS_PER_SIGMA as f64) as usize;
    let max_index = max_index.min(table.len() - 1);

    let idx = bisect_sigma(max_index, |sigma| {
        let radicand = avg - rms * sigma / sqrt_n;
        if radicand < 0.0 {
            return f64::NEG_INFINITY;
        }
        radicand.sqrt() + 1.0 - (avg.sqrt() + 1.0) * table.cdf(sigma)
    });
    let c = table.cdf_at(idx);
    finish((avg.sqrt() + 1.0) / 2.0, c)
}

/// Combined avg/rms confidence solver.
///
/// Performs two independent bisections and multiplies their confidence
/// values: `c_ar = c_rms_branch · c_avg_branch`.
pub fn solve_avg_rms(table: &NormalTable, avg: f64, rms: f64, samples: f64) -> SolverOutput {
    if rms == 0.0 || samples <= 0.0 {
        return SAFE_DEFAULT;
    }
    let ratio = avg / rms;
    let sqrt_n = samples.sqrt();
    let sqrt_2n = (2.0 * samples).sqrt();

    let idx_rms_branch = bisect_sigma(table.len() - 1, |sigma| {
        avg / (rms + sigma * rms / sqrt_2n) + 1.0 - (ratio + 1.0) * table.cdf(sigma)
    });
    let idx_avg_branch = bisect_sigma(table.len() - 1, |sigma| {
        (avg - sigma * rms / sqrt_n) / rms + 1.0 - (ratio + 1.0) * table.cdf(sigma)
    });

    let c_rms_branch = table.cdf_at(idx_rms_branch);
    let c_avg_branch = table.cdf_at(idx_avg_branch);
    finish((ratio + 1.0) / 2.0, c_rms_branch * c_avg_branch)
}
