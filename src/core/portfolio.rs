//! The portfolio model: current holdings and target allocation weights.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A snapshot of a portfolio for one planning session.
///
/// `holdings` maps each asset to its current value in a single currency;
/// `targets` maps the same assets to a desired weight in `[0, 1]`. Both maps
/// are keyed by asset name; `BTreeMap` keeps every derived result in a
/// stable first-by-key order. Constructed once from user input or config and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub holdings: BTreeMap<String, f64>,
    pub targets: BTreeMap<String, f64>,
}

impl Portfolio {
    pub fn new(holdings: BTreeMap<String, f64>, targets: BTreeMap<String, f64>) -> Self {
        Portfolio { holdings, targets }
    }

    /// Sum of all current holdings.
    pub fn total_value(&self) -> f64 {
        self.holdings.values().sum()
    }

    /// Current weight of each asset.
    ///
    /// When the portfolio is empty-valued the weights are all zero instead
    /// of dividing by zero.
    pub fn current_weights(&self) -> BTreeMap<String, f64> {
        let total = self.total_value();
        self.holdings
            .iter()
            .map(|(asset, value)| {
                let weight = if total == 0.0 { 0.0 } else { value / total };
                (asset.clone(), weight)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, proptest};

    fn portfolio(entries: &[(&str, f64, f64)]) -> Portfolio {
        let holdings = entries
            .iter()
            .map(|(name, value, _)| (name.to_string(), *value))
            .collect();
        let targets = entries
            .iter()
            .map(|(name, _, target)| (name.to_string(), *target))
            .collect();
        Portfolio::new(holdings, targets)
    }

    #[test]
    fn total_value_sums_holdings() {
        let p = portfolio(&[("A", 900.0, 0.5), ("B", 100.0, 0.5)]);
        assert_eq!(p.total_value(), 1000.0);
    }

    #[test]
    fn current_weights_divide_by_total() {
        let p = portfolio(&[("A", 900.0, 0.5), ("B", 100.0, 0.5)]);
        let weights = p.current_weights();
        assert_eq!(weights["A"], 0.9);
        assert_eq!(weights["B"], 0.1);
    }

    #[test]
    fn zero_total_yields_all_zero_weights() {
        let p = portfolio(&[("A", 0.0, 0.6), ("B", 0.0, 0.4)]);
        let weights = p.current_weights();
        assert!(weights.values().all(|w| *w == 0.0));
        assert_eq!(weights.len(), 2);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(32))]

        #[test]
        fn prop_weights_sum_to_one_when_total_is_positive(
            values in proptest::collection::vec(1u32..1_000_000, 1..8)
        ) {
            let holdings: BTreeMap<String, f64> = values
                .iter()
                .enumerate()
                .map(|(i, v)| (format!("asset-{i}"), *v as f64))
                .collect();
            let targets = holdings
                .keys()
                .map(|k| (k.clone(), 1.0 / holdings.len() as f64))
                .collect();
            let p = Portfolio::new(holdings, targets);

            let sum: f64 = p.current_weights().values().sum();
            prop_assert!((sum - 1.0).abs() < 1e-9);
        }
    }
}
