use crate::error::{EngineError, Result};
use crate::indicators;
use crate::models::Candle;
use crate::params::{get_param_usize, ParamDef, ParamKind};
use crate::registry::AlgorithmSpec;
use crate::strategy::{SignalAction, Strategy};
use std::collections::HashMap;

/// Time-series momentum: long while the trailing rate of change is
/// positive, flat while it is negative.
#[derive(Debug)]
pub struct TimeSeriesMomentumStrategy {
    momentum_period: usize,
}

impl TimeSeriesMomentumStrategy {
    pub fn new(parameters: &HashMap<String, f64>) -> Result<Self> {
        let momentum_period = get_param_usize(parameters, "momentum_period", 252);
        if momentum_period < 10 {
            return Err(EngineError::Parameter(format!(
                "momentum_period must be >= 10 (got {momentum_period})"
            )));
        }
        Ok(Self { momentum_period })
    }
}

impl Strategy for TimeSeriesMomentumStrategy {
    fn algorithm_id(&self) -> &str {
        "time_series_momentum"
    }

    fn signal(&self, candles: &[Candle], index: usize) -> SignalAction {
        let closes: Vec<f64> = candles[..=index].iter().map(|c| c.close).collect();
        match indicators::roc_at(&closes, self.momentum_period, index) {
            Some(roc) if roc > 0.0 => SignalAction::Buy,
            Some(roc) if roc < 0.0 => SignalAction::Sell,
            _ => SignalAction::Hold,
        }
    }

    fn min_data_points(&self) -> usize {
        self.momentum_period + 1
    }

    fn warmup_days(&self) -> i64 {
        2 * self.momentum_period as i64
    }
}

pub fn spec() -> AlgorithmSpec {
    AlgorithmSpec {
        id: "time_series_momentum",
        name: "Time Series Momentum",
        category: "Trend-following",
        description: "Buys when the trailing return (ROC) is positive; sells when it turns negative.",
        params: vec![ParamDef {
            name: "momentum_period",
            label: "Momentum Period",
            kind: ParamKind::Int,
            min: 10.0,
            max: 500.0,
            step: 1.0,
            default: 252.0,
            description: Some("Number of days to look back for momentum (ROC)."),
        }],
        build: |params| Ok(Box::new(TimeSeriesMomentumStrategy::new(params)?)),
        hidden: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::test_support::candles_from_closes;

    fn strategy(period: f64) -> Result<TimeSeriesMomentumStrategy> {
        let mut params = HashMap::new();
        params.insert("momentum_period".to_string(), period);
        TimeSeriesMomentumStrategy::new(&params)
    }

    #[test]
    fn rejects_short_period() {
        assert!(matches!(
            strategy(9.0).unwrap_err(),
            EngineError::Parameter(_)
        ));
    }

    #[test]
    fn positive_momentum_buys_negative_sells() {
        let strategy = strategy(10.0).unwrap();
        let rising: Vec<f64> = (1..=12).map(|i| 100.0 + i as f64).collect();
        let candles = candles_from_closes("AAA", &rising);
        assert_eq!(strategy.signal(&candles, 11), SignalAction::Buy);

        let falling: Vec<f64> = (1..=12).map(|i| 100.0 - i as f64).collect();
        let candles = candles_from_closes("AAA", &falling);
        assert_eq!(strategy.signal(&candles, 11), SignalAction::Sell);
    }

    #[test]
    fn holds_without_enough_history_or_on_flat_prices() {
        let strategy = strategy(10.0).unwrap();
        let short = candles_from_closes("AAA", &[100.0, 101.0, 102.0]);
        assert_eq!(strategy.signal(&short, 2), SignalAction::Hold);

        let flat = candles_from_closes("AAA", &[100.0; 15]);
        assert_eq!(strategy.signal(&flat, 14), SignalAction::Hold);
    }
}
