use crate::error::{EngineError, Result};
use crate::indicators;
use crate::models::Candle;
use crate::params::{get_param_usize, ParamDef, ParamKind};
use crate::registry::AlgorithmSpec;
use crate::strategy::{SignalAction, Strategy};
use std::collections::HashMap;

/// Donchian channel breakout: enters when the close clears the highest high
/// of the previous N bars, exits when it falls below the lowest low of the
/// previous N bars. The channel always ends at the prior bar, so the
/// breakout bar never feeds its own channel.
#[derive(Debug)]
pub struct DonchianBreakoutStrategy {
    lookback_period: usize,
}

impl DonchianBreakoutStrategy {
    pub fn new(parameters: &HashMap<String, f64>) -> Result<Self> {
        let lookback_period = get_param_usize(parameters, "lookback_period", 20);
        if lookback_period < 5 {
            return Err(EngineError::Parameter(format!(
                "lookback_period must be >= 5 (got {lookback_period})"
            )));
        }
        Ok(Self { lookback_period })
    }
}

impl Strategy for DonchianBreakoutStrategy {
    fn algorithm_id(&self) -> &str {
        "donchian_breakout"
    }

    fn signal(&self, candles: &[Candle], index: usize) -> SignalAction {
        if index == 0 {
            return SignalAction::Hold;
        }
        let highs: Vec<f64> = candles[..index].iter().map(|c| c.high).collect();
        let lows: Vec<f64> = candles[..index].iter().map(|c| c.low).collect();
        let channel_high = indicators::window_max_at(&highs, self.lookback_period, index - 1);
        let channel_low = indicators::window_min_at(&lows, self.lookback_period, index - 1);

        let close = candles[index].close;
        match (channel_high, channel_low) {
            (Some(high), _) if close > high => SignalAction::Buy,
            (_, Some(low)) if close < low => SignalAction::Sell,
            _ => SignalAction::Hold,
        }
    }

    fn min_data_points(&self) -> usize {
        self.lookback_period + 1
    }

    fn warmup_days(&self) -> i64 {
        2 * self.lookback_period as i64
    }
}

pub fn spec() -> AlgorithmSpec {
    AlgorithmSpec {
        id: "donchian_breakout",
        name: "Donchian Breakout",
        category: "Trend-following",
        description: "Enters long when price exceeds the recent high; exits when price falls below the recent low.",
        params: vec![ParamDef {
            name: "lookback_period",
            label: "Lookback Period",
            kind: ParamKind::Int,
            min: 5.0,
            max: 200.0,
            step: 1.0,
            default: 20.0,
            description: Some("Number of days for the High/Low channel."),
        }],
        build: |params| Ok(Box::new(DonchianBreakoutStrategy::new(params)?)),
        hidden: false,
    }
}
