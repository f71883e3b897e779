use crate::models::Candle;

/// What a strategy wants to do at the close of one bar. The executor maps
/// `Buy`/`Sell` onto the flat/long state machine; redundant signals (a `Buy`
/// while already long) are ignored there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalAction {
    Buy,
    Sell,
    Hold,
}

/// One long-only trading strategy variant.
///
/// A strategy only reads bars; all cash, position and trade bookkeeping
/// lives in the executor so every variant shares the same state machine.
pub trait Strategy {
    fn algorithm_id(&self) -> &str;

    /// Signal for the bar at `index`. Called only once `min_data_points`
    /// bars have accumulated, so indicator readiness is guaranteed here for
    /// strategies that size `min_data_points` to their lookback.
    fn signal(&self, candles: &[Candle], index: usize) -> SignalAction;

    /// Number of bars (warmup included) that must exist before `signal`
    /// is evaluated at all.
    fn min_data_points(&self) -> usize;

    /// Extra calendar days of history to fetch before the official window,
    /// used purely to prime indicators. The fixed heuristic is twice the
    /// lookback; it is not trading-calendar aware.
    fn warmup_days(&self) -> i64 {
        0
    }
}

#[path = "strategies/buy_and_hold.rs"]
pub mod buy_and_hold;

pub use buy_and_hold::BuyAndHoldStrategy;

#[path = "strategies/sma_crossover.rs"]
pub mod sma_crossover;

pub use sma_crossover::SmaCrossoverStrategy;

#[path = "strategies/donchian_breakout.rs"]
pub mod donchian_breakout;

pub use donchian_breakout::DonchianBreakoutStrategy;

#[path = "strategies/time_series_momentum.rs"]
pub mod time_series_momentum;

pub use time_series_momentum::TimeSeriesMomentumStrategy;

#[path = "strategies/rsi_reversion.rs"]
pub mod rsi_reversion;

pub use rsi_reversion::RsiReversionStrategy;

#[path = "strategies/market_benchmark.rs"]
pub mod market_benchmark;

pub use market_benchmark::MarketBenchmarkStrategy;

#[path = "strategies/omniscient_benchmark.rs"]
pub mod omniscient_benchmark;

pub use omniscient_benchmark::OmniscientBenchmarkStrategy;
