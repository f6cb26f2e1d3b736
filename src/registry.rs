//! Dense equity registry: an owning `Vec<EquityState>` plus a ticker → index
//! lookup, replacing the teacher's intrusive-list pattern with plain index
//! vectors rebuilt each interval.

use std::collections::HashMap;

use crate::equity::EquityState;

/// Owns every tracked equity's state, addressed by dense index, with a
/// `HashMap` ticker lookup. Insertion order is preserved and never
/// reordered; the assembler builds its own sorted `Vec<usize>` views.
#[derive(Debug, Default)]
pub struct Registry {
    equities: Vec<EquityState>,
    index_of: HashMap<String, usize>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            equities: Vec::new(),
            index_of: HashMap::new(),
        }
    }

    /// Returns the dense index for `ticker`, inserting a fresh
    /// [`EquityState`] at `price` if this is the first time it's been seen.
    pub fn index_for(&mut self, ticker: &str, price: f64) -> usize {
        if let Some(&idx) = self.index_of.get(ticker) {
            return idx;
        }
        let idx = self.equities.len();
        self.equities.push(EquityState::new(ticker, price));
        self.index_of.insert(ticker.to_string(), idx);
        idx
    }

    /// All tracked equities, in insertion order.
    pub fn equities(&self) -> &[EquityState] {
        &self.equities
    }

    /// Mutable access to all tracked equities, in insertion order.
    pub fn equities_mut(&mut self) -> &mut [EquityState] {
        &mut self.equities
    }

    /// Number of tracked equities.
    pub fn len(&self) -> usize {
        self.equities.len()
    }

    /// Whether the registry has no tracked equities yet.
    pub fn is_empty(&self) -> bool {
        self.equities.is_empty()
    }

    /// Returns the equity at registry index `idx`.
    pub fn get(&self, idx: usize) -> &EquityState {
        &self.equities[idx]
    }

    /// Returns a mutable reference to the equity at registry index `idx`.
    pub fn get_mut(&mut self, idx: usize) -> &mut EquityState {
        &mut self.equities[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_ticker_reuses_index() {
        let mut reg = Registry::new();
        let a = reg.index_for("ABC", 100.0);
        let b = reg.index_for("ABC", 101.0);
        assert_eq!(a, b);
        assert_eq!(reg.len(), 1);
        // Price at creation is fixed; later observations go through
        // EquityState::observe_price, not index_for.
        assert_eq!(reg.get(a).current_value, 100.0);
    }

    #[test]
    fn distinct_tickers_get_distinct_indices_in_insertion_order() {
        let mut reg = Registry::new();
        let a = reg.index_for("ABC", 100.0);
        let b = reg.index_for("XYZ", 50.0);
        assert_eq!(a, 0);
        assert_eq!(b, 1);
        assert_eq!(reg.equities()[0].ticker, "ABC");
        assert_eq!(reg.equities()[1].ticker, "XYZ");
    }
}
