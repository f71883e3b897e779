use crate::models::Candle;
use crate::registry::AlgorithmSpec;
use crate::strategy::{SignalAction, Strategy};
use std::collections::HashMap;

/// Hidden perfect-foresight benchmark: reads the next bar's close and buys
/// before every rise, sells before every fall. Not tradable; used purely as
/// the upper bound a real strategy is compared against.
pub struct OmniscientBenchmarkStrategy;

impl OmniscientBenchmarkStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl Default for OmniscientBenchmarkStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for OmniscientBenchmarkStrategy {
    fn algorithm_id(&self) -> &str {
        "omniscient_benchmark"
    }

    fn signal(&self, candles: &[Candle], index: usize) -> SignalAction {
        let Some(next) = candles.get(index + 1) else {
            // Last bar: nothing left to foresee, forced liquidation applies.
            return SignalAction::Hold;
        };
        let close = candles[index].close;
        if next.close > close {
            SignalAction::Buy
        } else if next.close < close {
            SignalAction::Sell
        } else {
            SignalAction::Hold
        }
    }

    fn min_data_points(&self) -> usize {
        0
    }
}

pub fn spec() -> AlgorithmSpec {
    AlgorithmSpec {
        id: "omniscient_benchmark",
        name: "Omniscient benchmark",
        category: "Benchmark",
        description: "Ideal, non-tradable benchmark that knows all future prices and buys before each upswing and sells before each downswing.",
        params: Vec::new(),
        build: |_params: &HashMap<String, f64>| Ok(Box::new(OmniscientBenchmarkStrategy::new())),
        hidden: true,
    }
}
