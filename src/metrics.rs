use crate::models::{EquityPoint, Trade, TradeSide};
use statrs::statistics::Statistics;

/// Trading days per year, used to annualize the Sharpe ratio.
const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Degenerate short or low-variance samples produce absurd Sharpe readings;
/// everything is clipped into this band.
const SHARPE_CLIP: f64 = 5.0;

/// Maximum peak-to-trough decline as a ratio in [0, 1]. Returns 0.0 for an
/// empty or never-declining curve.
pub fn compute_max_drawdown(equity_curve: &[EquityPoint]) -> f64 {
    let Some(first) = equity_curve.first() else {
        return 0.0;
    };

    let mut peak = first.equity;
    let mut max_dd = 0.0f64;
    for point in equity_curve {
        if point.equity > peak {
            peak = point.equity;
        }
        let dd = if peak != 0.0 {
            (peak - point.equity) / peak
        } else {
            0.0
        };
        if dd > max_dd {
            max_dd = dd;
        }
    }
    max_dd
}

/// Annualized Sharpe ratio of the simple daily returns, without a risk-free
/// leg, clipped to [-5, 5]. Pairs whose previous equity is 0 are skipped;
/// fewer than two usable returns yield 0.0.
pub fn compute_sharpe(equity_curve: &[EquityPoint]) -> f64 {
    if equity_curve.len() < 2 {
        return 0.0;
    }

    let returns: Vec<f64> = equity_curve
        .windows(2)
        .filter(|pair| pair[0].equity != 0.0)
        .map(|pair| (pair[1].equity - pair[0].equity) / pair[0].equity)
        .collect();

    if returns.len() < 2 {
        return 0.0;
    }

    let mean_return = returns.clone().mean();
    let std_dev = returns.std_dev();
    if std_dev == 0.0 {
        return 0.0;
    }

    let sharpe = mean_return / std_dev * TRADING_DAYS_PER_YEAR.sqrt();
    sharpe.clamp(-SHARPE_CLIP, SHARPE_CLIP)
}

/// `(winning, losing, accuracy%)` over closed (sell-side) trades only.
/// Accuracy is 0.0 when no trade has been closed.
pub fn trade_stats(trades: &[Trade]) -> (i32, i32, f64) {
    let mut winning = 0i32;
    let mut losing = 0i32;
    for trade in trades.iter().filter(|t| t.side == TradeSide::Sell) {
        if trade.profit_loss > 0.0 {
            winning += 1;
        } else if trade.profit_loss < 0.0 {
            losing += 1;
        }
    }

    let closed = winning + losing;
    let accuracy = if closed > 0 {
        f64::from(winning) / f64::from(closed) * 100.0
    } else {
        0.0
    };
    (winning, losing, accuracy)
}

/// Simple return over the run, guarded against a zero starting capital.
pub fn total_return(final_equity: f64, initial_capital: f64) -> f64 {
    if initial_capital != 0.0 {
        final_equity / initial_capital - 1.0
    } else {
        0.0
    }
}
