use crate::models::Candle;
use crate::registry::AlgorithmSpec;
use crate::strategy::{SignalAction, Strategy};
use std::collections::HashMap;

/// Hidden naive-hold baseline: 100% allocation on the first bar, forced
/// liquidation on the last. Identical mechanics to buy & hold, kept as a
/// separate id so comparison runs never show up in the public catalog.
pub struct MarketBenchmarkStrategy;

impl MarketBenchmarkStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MarketBenchmarkStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for MarketBenchmarkStrategy {
    fn algorithm_id(&self) -> &str {
        "market_benchmark"
    }

    fn signal(&self, _candles: &[Candle], _index: usize) -> SignalAction {
        SignalAction::Buy
    }

    fn min_data_points(&self) -> usize {
        0
    }
}

pub fn spec() -> AlgorithmSpec {
    AlgorithmSpec {
        id: "market_benchmark",
        name: "Market Benchmark",
        category: "Benchmark",
        description: "Standard buy-and-hold market baseline.",
        params: Vec::new(),
        build: |_params: &HashMap<String, f64>| Ok(Box::new(MarketBenchmarkStrategy::new())),
        hidden: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_is_hidden() {
        assert!(spec().hidden);
        assert_eq!(MarketBenchmarkStrategy::new().signal(&[], 0), SignalAction::Buy);
    }
}
