use crate::models::{Candle, EquityPoint, Trade, TradeSide};
use crate::strategy::{SignalAction, Strategy};
use chrono::NaiveDate;
use log::debug;

/// Trade log and official-window equity trace of one simulation.
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    pub equity_curve: Vec<EquityPoint>,
    pub trades: Vec<Trade>,
}

/// Runs the long-only flat/long state machine over an ordered bar sequence.
///
/// Bars dated before `official_start` are warmup: they prime indicators but
/// produce no signal, no trade and no equity point. Inside the official
/// window every bar yields exactly one mark-to-market equity point, and the
/// last bar force-liquidates any open position so the run ends flat.
pub fn run_simulation(
    strategy: &dyn Strategy,
    candles: &[Candle],
    official_start: NaiveDate,
    initial_capital: f64,
) -> SimulationOutcome {
    let mut cash = initial_capital;
    let mut quantity = 0.0f64;
    let mut entry_price = 0.0f64;

    let mut trades: Vec<Trade> = Vec::new();
    let mut equity_curve: Vec<EquityPoint> = Vec::new();

    let n = candles.len();
    for (i, candle) in candles.iter().enumerate() {
        let date = candle.date();
        if date < official_start {
            continue;
        }

        let price = candle.close;

        // Before the indicator is formed no signal is evaluated, but equity
        // is still recorded below.
        let action = if i + 1 >= strategy.min_data_points() {
            strategy.signal(candles, i)
        } else {
            SignalAction::Hold
        };

        match action {
            SignalAction::Buy if quantity == 0.0 && price > 0.0 => {
                let size = cash / price;
                if size > 0.0 {
                    quantity = size;
                    cash = 0.0;
                    entry_price = price;
                    trades.push(Trade {
                        date,
                        side: TradeSide::Buy,
                        price,
                        quantity: size,
                        profit_loss: 0.0,
                    });
                }
            }
            SignalAction::Sell if quantity > 0.0 => {
                cash += quantity * price;
                trades.push(Trade {
                    date,
                    side: TradeSide::Sell,
                    price,
                    quantity,
                    profit_loss: (price - entry_price) * quantity,
                });
                quantity = 0.0;
                entry_price = 0.0;
            }
            _ => {}
        }

        // Forced liquidation at the final close so every run ends flat.
        if i + 1 == n && quantity > 0.0 {
            cash += quantity * price;
            trades.push(Trade {
                date,
                side: TradeSide::Sell,
                price,
                quantity,
                profit_loss: (price - entry_price) * quantity,
            });
            quantity = 0.0;
            entry_price = 0.0;
        }

        equity_curve.push(EquityPoint {
            date,
            equity: cash + quantity * price,
        });
    }

    // A window with zero official bars still yields one flat equity point.
    if equity_curve.is_empty() {
        equity_curve.push(EquityPoint {
            date: official_start,
            equity: initial_capital,
        });
    }

    debug!(
        "simulated {} with {} official bars, {} trades",
        strategy.algorithm_id(),
        equity_curve.len(),
        trades.len()
    );

    SimulationOutcome {
        equity_curve,
        trades,
    }
}

#[cfg(test)]
pub mod test_support {
    use crate::models::Candle;
    use chrono::{Duration, TimeZone, Utc};

    /// Daily candles from a close series; open/high/low mirror the close.
    pub fn candles_from_closes(symbol: &str, closes: &[f64]) -> Vec<Candle> {
        let base = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Candle {
                symbol: symbol.to_string(),
                ts: base + Duration::days(i as i64),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1_000.0,
            })
            .collect()
    }
}
