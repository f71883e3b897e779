use crate::error::{EngineError, Result};
use crate::indicators;
use crate::models::Candle;
use crate::params::{get_param_f64, get_param_usize, ParamDef, ParamKind};
use crate::registry::AlgorithmSpec;
use crate::strategy::{SignalAction, Strategy};
use std::collections::HashMap;

/// Mean reversion on the RSI oscillator: enters when the asset looks
/// oversold, exits once it reaches overbought territory.
#[derive(Debug)]
pub struct RsiReversionStrategy {
    rsi_period: usize,
    oversold: f64,
    overbought: f64,
}

impl RsiReversionStrategy {
    pub fn new(parameters: &HashMap<String, f64>) -> Result<Self> {
        let rsi_period = get_param_usize(parameters, "rsi_period", 14);
        let oversold = get_param_f64(parameters, "oversold", 30.0);
        let overbought = get_param_f64(parameters, "overbought", 70.0);

        if rsi_period <= 1 {
            return Err(EngineError::Parameter(format!(
                "rsi_period must be > 1 (got {rsi_period})"
            )));
        }
        if !(0.0 <= oversold && oversold < overbought && overbought <= 100.0) {
            return Err(EngineError::Parameter(format!(
                "require 0 <= oversold < overbought <= 100 (got {oversold} / {overbought})"
            )));
        }

        Ok(Self {
            rsi_period,
            oversold,
            overbought,
        })
    }
}

impl Strategy for RsiReversionStrategy {
    fn algorithm_id(&self) -> &str {
        "rsi_reversion"
    }

    fn signal(&self, candles: &[Candle], index: usize) -> SignalAction {
        let closes: Vec<f64> = candles[..=index].iter().map(|c| c.close).collect();
        match indicators::rsi_at(&closes, self.rsi_period, index) {
            Some(rsi) if rsi < self.oversold => SignalAction::Buy,
            Some(rsi) if rsi > self.overbought => SignalAction::Sell,
            _ => SignalAction::Hold,
        }
    }

    fn min_data_points(&self) -> usize {
        self.rsi_period + 1
    }

    fn warmup_days(&self) -> i64 {
        2 * self.rsi_period as i64
    }
}

pub fn spec() -> AlgorithmSpec {
    AlgorithmSpec {
        id: "rsi_reversion",
        name: "RSI Mean Reversion",
        category: "Mean-reversion",
        description: "Long-only RSI strategy: buys when the RSI indicates oversold and exits when it reaches overbought levels.",
        params: vec![
            ParamDef {
                name: "rsi_period",
                label: "RSI period",
                kind: ParamKind::Int,
                min: 2.0,
                max: 100.0,
                step: 1.0,
                default: 14.0,
                description: Some("Number of days to compute the RSI."),
            },
            ParamDef {
                name: "oversold",
                label: "Oversold level",
                kind: ParamKind::Float,
                min: 5.0,
                max: 50.0,
                step: 1.0,
                default: 30.0,
                description: Some("RSI threshold below which the asset is considered oversold."),
            },
            ParamDef {
                name: "overbought",
                label: "Overbought level",
                kind: ParamKind::Float,
                min: 50.0,
                max: 95.0,
                step: 1.0,
                default: 70.0,
                description: Some("RSI threshold above which the asset is considered overbought."),
            },
        ],
        build: |params| Ok(Box::new(RsiReversionStrategy::new(params)?)),
        hidden: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::test_support::candles_from_closes;

    fn strategy(period: f64, oversold: f64, overbought: f64) -> Result<RsiReversionStrategy> {
        let mut params = HashMap::new();
        params.insert("rsi_period".to_string(), period);
        params.insert("oversold".to_string(), oversold);
        params.insert("overbought".to_string(), overbought);
        RsiReversionStrategy::new(&params)
    }

    #[test]
    fn rejects_inconsistent_thresholds() {
        assert!(matches!(
            strategy(14.0, 70.0, 30.0).unwrap_err(),
            EngineError::Parameter(_)
        ));
        assert!(matches!(
            strategy(1.0, 30.0, 70.0).unwrap_err(),
            EngineError::Parameter(_)
        ));
    }

    #[test]
    fn oversold_buys_overbought_sells() {
        let strategy = strategy(5.0, 30.0, 70.0).unwrap();
        let falling: Vec<f64> = (0..10).map(|i| 100.0 - 3.0 * i as f64).collect();
        let candles = candles_from_closes("AAA", &falling);
        assert_eq!(strategy.signal(&candles, 9), SignalAction::Buy);

        let rising: Vec<f64> = (0..10).map(|i| 100.0 + 3.0 * i as f64).collect();
        let candles = candles_from_closes("AAA", &rising);
        assert_eq!(strategy.signal(&candles, 9), SignalAction::Sell);
    }

    #[test]
    fn neutral_rsi_holds() {
        let strategy = strategy(5.0, 30.0, 70.0).unwrap();
        let flat = candles_from_closes("AAA", &[100.0; 10]);
        assert_eq!(strategy.signal(&flat, 9), SignalAction::Hold);
    }
}
