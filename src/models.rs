use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candle {
    pub symbol: String,
    pub ts: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    /// Trading day of this bar. Daily bars carry a midnight UTC timestamp.
    pub fn date(&self) -> NaiveDate {
        self.ts.date_naive()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeSide::Buy => "buy",
            TradeSide::Sell => "sell",
        }
    }
}

/// One executed order. `profit_loss` is always 0.0 on buys and carries the
/// realized gain or loss of the position on the matching sell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub side: TradeSide,
    pub price: f64,
    pub quantity: f64,
    pub profit_loss: f64,
}

/// Mark-to-market portfolio value at the close of one official-window bar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub equity: f64,
}

/// Display metadata for the simulated asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetMeta {
    pub symbol: String,
    pub name: String,
    pub asset_type: String,
}

impl AssetMeta {
    /// Fallback used when the data source has no record for the symbol.
    pub fn unknown(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: symbol.to_string(),
            asset_type: "stock".to_string(),
        }
    }
}

/// Canonical result bundle of one backtest run. Ownership passes to the
/// caller; the engine keeps nothing between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestResult {
    pub status: String,
    pub asset_symbol: String,
    pub asset_name: String,
    pub asset_type: String,
    pub algorithm: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub initial_capital: f64,
    pub final_equity: f64,
    pub total_return: f64,
    pub max_drawdown: f64,
    pub sharpe_ratio: f64,
    pub equity_curve: Vec<EquityPoint>,
    pub trades: Vec<Trade>,
    pub number_of_trades: i32,
    pub winning_trades: i32,
    pub losing_trades: i32,
    pub accuracy: f64,
}

/// Headline metrics of the comparison benchmark attached next to a primary
/// result. Built from a full `BacktestResult` of the hidden benchmark run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkSummary {
    pub name: String,
    pub final_equity: f64,
    pub total_return: f64,
    pub max_drawdown: f64,
    pub sharpe_ratio: f64,
    pub equity_curve: Vec<EquityPoint>,
}
