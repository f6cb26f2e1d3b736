//! Two aggregate indices tracked parallel to the portfolio.

use crate::equity::EquityState;

/// Tracks an average-balanced index and a raw average-value index,
/// both seeded from the configured initial capital.
#[derive(Debug, Clone)]
pub struct IndexTracker {
    /// Compounds `(1 + fraction_i / total_equity_count)` across equities
    /// with at least 2 transactions, each interval.
    pub average_index: f64,
    /// Mean of `current_value` across all known equities.
    pub average_value: f64,
}

impl IndexTracker {
    /// Seeds both indices from the configured initial capital.
    pub fn new(initial_capital: f64) -> Self {
        Self {
            average_index: initial_capital,
            average_value: initial_capital,
        }
    }

    /// Advances both indices by one interval given the full equity set and
    /// this interval's effective margin reciprocal.
    pub fn update(&mut self, equities: &[EquityState], margin_reciprocal: f64) {
        if equities.is_empty() {
            return;
        }
        let total = equities.len() as f64;
        let mut factor = 1.0;
        for eq in equities {
            if eq.transactions >= 2 {
                factor *= 1.0 + (eq.last_fraction / total) * margin_reciprocal;
            }
        }
        self.average_index *= factor;

        self.average_value =
            equities.iter().map(|eq| eq.current_value).sum::<f64>() / total;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_registry_leaves_indices_unchanged() {
        let mut idx = IndexTracker::new(1000.0);
        idx.update(&[], 1.0);
        assert_eq!(idx.average_index, 1000.0);
        assert_eq!(idx.average_value, 1000.0);
    }

    #[test]
    fn average_value_is_mean_of_current_prices() {
        let mut idx = IndexTracker::new(1000.0);
        let mut a = EquityState::new("A", 100.0);
        let mut b = EquityState::new("B", 200.0);
        a.transactions = 2;
        b.transactions = 2;
        idx.update(&[a, b], 1.0);
        assert_eq!(idx.average_value, 150.0);
    }

    #[test]
    fn untouched_equities_do_not_move_the_index() {
        let mut idx = IndexTracker::new(1000.0);
        let a = EquityState::new("A", 100.0); // transactions == 0
        idx.update(std::slice::from_ref(&a), 1.0);
        assert_eq!(idx.average_index, 1000.0);
    }
}
