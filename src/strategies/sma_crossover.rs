use crate::error::{EngineError, Result};
use crate::indicators;
use crate::models::Candle;
use crate::params::{get_param_usize, ParamDef, ParamKind};
use crate::registry::AlgorithmSpec;
use crate::strategy::{SignalAction, Strategy};
use std::collections::HashMap;

/// Long-only SMA crossover: long while the fast average is above the slow
/// one, flat while it is below.
#[derive(Debug)]
pub struct SmaCrossoverStrategy {
    fast_window: usize,
    slow_window: usize,
}

impl SmaCrossoverStrategy {
    pub fn new(parameters: &HashMap<String, f64>) -> Result<Self> {
        let fast_window = get_param_usize(parameters, "fast_window", 20);
        let slow_window = get_param_usize(parameters, "slow_window", 50);

        if fast_window == 0 || slow_window == 0 {
            return Err(EngineError::Parameter(
                "fast_window and slow_window must be > 0".to_string(),
            ));
        }
        if fast_window >= slow_window {
            return Err(EngineError::Parameter(format!(
                "fast_window must be < slow_window (got {fast_window} >= {slow_window})"
            )));
        }

        Ok(Self {
            fast_window,
            slow_window,
        })
    }
}

impl Strategy for SmaCrossoverStrategy {
    fn algorithm_id(&self) -> &str {
        "sma_crossover"
    }

    fn signal(&self, candles: &[Candle], index: usize) -> SignalAction {
        let closes: Vec<f64> = candles[..=index].iter().map(|c| c.close).collect();
        let fast = indicators::sma_at(&closes, self.fast_window, index);
        let slow = indicators::sma_at(&closes, self.slow_window, index);

        match (fast, slow) {
            (Some(fast), Some(slow)) if fast > slow => SignalAction::Buy,
            (Some(fast), Some(slow)) if fast < slow => SignalAction::Sell,
            _ => SignalAction::Hold,
        }
    }

    fn min_data_points(&self) -> usize {
        self.slow_window
    }

    fn warmup_days(&self) -> i64 {
        2 * self.slow_window as i64
    }
}

pub fn spec() -> AlgorithmSpec {
    AlgorithmSpec {
        id: "sma_crossover",
        name: "SMA Crossover",
        category: "Trend-following",
        description: "Long-only SMA crossover: enters long when the fast SMA is above the slow SMA and exits when it crosses below.",
        params: vec![
            ParamDef {
                name: "fast_window",
                label: "Fast SMA window",
                kind: ParamKind::Int,
                min: 5.0,
                max: 50.0,
                step: 1.0,
                default: 20.0,
                description: Some("Number of days for the fast moving average."),
            },
            ParamDef {
                name: "slow_window",
                label: "Slow SMA window",
                kind: ParamKind::Int,
                min: 20.0,
                max: 200.0,
                step: 1.0,
                default: 50.0,
                description: Some("Number of days for the slow moving average."),
            },
        ],
        build: |params| Ok(Box::new(SmaCrossoverStrategy::new(params)?)),
        hidden: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::test_support::candles_from_closes;

    fn strategy(fast: f64, slow: f64) -> Result<SmaCrossoverStrategy> {
        let mut params = HashMap::new();
        params.insert("fast_window".to_string(), fast);
        params.insert("slow_window".to_string(), slow);
        SmaCrossoverStrategy::new(&params)
    }

    #[test]
    fn rejects_inverted_windows() {
        let err = strategy(50.0, 20.0).unwrap_err();
        assert!(matches!(err, EngineError::Parameter(_)));
    }

    #[test]
    fn signals_follow_crossover() {
        let strategy = strategy(2.0, 3.0).unwrap();
        // Rising closes: fast SMA above slow SMA once both are formed.
        let rising = candles_from_closes("AAA", &[10.0, 11.0, 12.0, 13.0, 14.0]);
        assert_eq!(strategy.signal(&rising, 4), SignalAction::Buy);

        let falling = candles_from_closes("AAA", &[14.0, 13.0, 12.0, 11.0, 10.0]);
        assert_eq!(strategy.signal(&falling, 4), SignalAction::Sell);
    }

    #[test]
    fn holds_before_slow_window_is_formed() {
        let strategy = strategy(2.0, 3.0).unwrap();
        let candles = candles_from_closes("AAA", &[10.0, 11.0]);
        assert_eq!(strategy.signal(&candles, 1), SignalAction::Hold);
    }

    #[test]
    fn holds_on_flat_series() {
        let strategy = strategy(2.0, 3.0).unwrap();
        let flat = candles_from_closes("AAA", &[10.0; 6]);
        assert_eq!(strategy.signal(&flat, 5), SignalAction::Hold);
    }
}
