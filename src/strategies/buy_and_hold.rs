use crate::models::Candle;
use crate::registry::AlgorithmSpec;
use crate::strategy::{SignalAction, Strategy};
use std::collections::HashMap;

/// Buys with the full capital on the first evaluated bar and never signals
/// an exit; the executor's forced last-bar liquidation closes the position.
pub struct BuyAndHoldStrategy;

impl BuyAndHoldStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BuyAndHoldStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for BuyAndHoldStrategy {
    fn algorithm_id(&self) -> &str {
        "buy_and_hold"
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
        id: "buy_and_hold",
        name: "Buy & Hold",
        category: "Benchmark",
        description: "Buys the asset at the first close of the period and holds it until the last close.",
        params: Vec::new(),
        build: |_params: &HashMap<String, f64>| Ok(Box::new(BuyAndHoldStrategy::new())),
        hidden: false,
    }
}
