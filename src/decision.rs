//! Decision scoring: converts per-equity statistics into a ranking score
//! and an unnormalized allocation weight.

use crate::equity::EquityState;
use rand::Rng;

/// Scoring method selecting which compensated probability drives ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecisionMethod {
    /// Combined avg/rms Shannon probability.
    #[default]
    AvgRms,
    /// rms-only Shannon probability.
    Rms,
    /// avg-only Shannon probability.
    Avg,
    /// Mean-reversion (void-counter) probability.
    RunLength,
    /// Persistence-histogram probability.
    Persistence,
    /// Uniform random score, for baseline comparison.
    Random,
}

/// Capital allocation policy for the admitted set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AllocationPolicy {
    /// Split capital evenly across admitted equities.
    #[default]
    Equal,
    /// Weight by `2P - 1`, same as `Equal`'s allocation fraction.
    MaxGain,
    /// Weight to minimize portfolio variance given avg/rms confidence.
    MinRisk,
}

/// Probability and deviation picked out for a given decision method.
struct MethodInputs {
    p: f64,
    v: f64,
    /// Whether the equity is skipped outright (e.g. `Avg` with negative avg).
    skip: bool,
}

fn method_inputs(
    eq: &EquityState,
    method: DecisionMethod,
    dataset_size_compensation: bool,
    rng: &mut impl Rng,
) -> MethodInputs {
    match method {
        DecisionMethod::AvgRms => MethodInputs {
            p: if dataset_size_compensation {
                eq.p_eff_ar
            } else {
                eq.p_ar
            },
            v: eq.rms,
            skip: false,
        },
        DecisionMethod::Rms => MethodInputs {
            p: if dataset_size_compensation {
                eq.p_eff_r
            } else {
                eq.p_r
            },
            v: eq.rms,
            skip: false,
        },
        DecisionMethod::Avg => MethodInputs {
            p: if dataset_size_compensation {
                eq.p_eff_a
            } else {
                eq.p_a
            },
            v: eq.avg.max(0.0).sqrt(),
            skip: eq.avg < 0.0,
        },
        DecisionMethod::RunLength => MethodInputs {
            p: if dataset_size_compensation {
                eq.p_t * eq.c_r
            } else {
                eq.p_t
            },
            v: eq.rms,
            skip: false,
        },
        DecisionMethod::Persistence => MethodInputs {
            p: if dataset_size_compensation {
                eq.p_p * eq.c_r
            } else {
                eq.p_p
            },
            v: eq.rms,
            skip: false,
        },
        DecisionMethod::Random => MethodInputs {
            p: rng.gen_range(0.0..=1.0),
            v: eq.rms,
            skip: false,
        },
    }
}

/// Computes `decision` and `allocation_fraction` for one equity, mutating
/// both fields in place.
pub fn score(
    eq: &mut EquityState,
    method: DecisionMethod,
    policy: AllocationPolicy,
    dataset_size_compensation: bool,
    run_length_compensation: bool,
    rng: &mut impl Rng,
) {
    let inputs = method_inputs(eq, method, dataset_size_compensation, rng);
    if inputs.skip {
        eq.decision = 0.0;
        eq.allocation_fraction = 0.0;
        return;
    }

    let p = if run_length_compensation {
        inputs.p * eq.p_comp
    } else {
        inputs.p
    };
    let v = inputs.v;

    eq.decision = if v >= 1.0 || p >= 1.0 {
        0.0
    } else {
        let d = (1.0 + v).powf(p) * (1.0 - v).powf(1.0 - p);
        if d.is_finite() && d >= 0.0 {
            d
        } else {
            0.0
        }
    };

    eq.allocation_fraction = match policy {
        AllocationPolicy::Equal | AllocationPolicy::MaxGain => {
            if p > 0.5 {
                2.0 * p - 1.0
            } else {
                0.0
            }
        }
        AllocationPolicy::MinRisk => {
            let ar = eq.p_ar * eq.p_comp;
            let a = eq.p_a * eq.p_comp;
            if ar > 0.5 && ar < 1.0 && a > 0.5 && a < 1.0 {
                (2.0 * ar - 1.0) / (2.0 * a - 1.0).powi(2)
            } else {
                0.0
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normal::NormalTable;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn grown_equity() -> EquityState {
        let table = NormalTable::build();
        let mut eq = EquityState::new("ABC", 100.0);
        for p in [110.0, 121.0, 133.1] {
            eq.observe_price(p);
            eq.update_statistics(&table, 1.0, false);
        }
        eq
    }

    #[test]
    fn decision_is_non_negative() {
        let mut eq = grown_equity();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        score(
            &mut eq,
            DecisionMethod::AvgRms,
            AllocationPolicy::Equal,
            true,
            false,
            &mut rng,
        );
        assert!(eq.decision >= 0.0);
    }

    #[test]
    fn equal_policy_matches_max_gain() {
        let mut eq_a = grown_equity();
        let mut eq_b = grown_equity();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        score(
            &mut eq_a,
            DecisionMethod::AvgRms,
            AllocationPolicy::Equal,
            true,
            false,
            &mut rng,
        );
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        score(
            &mut eq_b,
            DecisionMethod::AvgRms,
            AllocationPolicy::MaxGain,
            true,
            false,
            &mut rng,
        );
        assert_eq!(eq_a.allocation_fraction, eq_b.allocation_fraction);
    }

    #[test]
    fn random_method_is_deterministic_given_seed() {
        let mut eq_a = grown_equity();
        let mut eq_b = grown_equity();
        let mut rng_a = ChaCha8Rng::seed_from_u64(42);
        let mut rng_b = ChaCha8Rng::seed_from_u64(42);
        score(
            &mut eq_a,
            DecisionMethod::Random,
            AllocationPolicy::Equal,
            false,
            false,
            &mut rng_a,
        );
        score(
            &mut eq_b,
            DecisionMethod::Random,
            AllocationPolicy::Equal,
            false,
            false,
            &mut rng_b,
        );
        assert_eq!(eq_a.decision, eq_b.decision);
    }

    #[test]
    fn avg_method_skips_negative_avg() {
        let table = NormalTable::build();
        let mut eq = EquityState::new("DOWN", 100.0);
        for p in [95.0, 90.0, 85.0] {
            eq.observe_price(p);
            eq.update_statistics(&table, 1.0, false);
        }
        assert!(eq.avg < 0.0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        score(
            &mut eq,
            DecisionMethod::Avg,
            AllocationPolicy::Equal,
            true,
            false,
            &mut rng,
        );
        assert_eq!(eq.decision, 0.0);
        assert_eq!(eq.allocation_fraction, 0.0);
    }
}
