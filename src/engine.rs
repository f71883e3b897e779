use crate::data::MarketDataSource;
use crate::error::{EngineError, Result};
use crate::executor::run_simulation;
use crate::metrics;
use crate::models::{AssetMeta, BacktestResult, BenchmarkSummary};
use crate::params::merge_params;
use crate::registry::AlgorithmRegistry;
use chrono::{Duration, NaiveDate};
use log::{info, warn};
use std::collections::HashMap;

/// Hidden algorithm used for the best-effort comparison run.
pub const BENCHMARK_ALGORITHM_ID: &str = "omniscient_benchmark";
const BENCHMARK_NAME: &str = "Omniscient benchmark";

/// One backtest request. `params` may carry unknown keys (ignored) and omit
/// known ones (defaults apply). `initial_capital > 0` is the caller's
/// responsibility; the engine only guards its divisions.
#[derive(Debug, Clone)]
pub struct BacktestRequest {
    pub symbol: String,
    pub algorithm_id: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub initial_capital: f64,
    pub params: HashMap<String, f64>,
}

/// Stateless orchestrator: resolve, validate, fetch, simulate, measure.
/// Nothing computed in one run is reused by another, so a single engine can
/// serve concurrent callers.
pub struct BacktestEngine<S: MarketDataSource> {
    registry: AlgorithmRegistry,
    source: S,
}

impl<S: MarketDataSource> BacktestEngine<S> {
    pub fn new(registry: AlgorithmRegistry, source: S) -> Self {
        Self { registry, source }
    }

    pub fn registry(&self) -> &AlgorithmRegistry {
        &self.registry
    }

    /// Runs one backtest to completion. Either the full result bundle is
    /// returned or an error; no partial results are ever emitted.
    pub fn run(&self, request: &BacktestRequest) -> Result<BacktestResult> {
        if request.start > request.end {
            return Err(EngineError::Parameter(format!(
                "start_date {} is after end_date {}",
                request.start, request.end
            )));
        }

        let spec = self.registry.resolve(&request.algorithm_id)?;
        let params = merge_params(&spec.params, &request.params);
        // Constructors validate parameters, so bad requests fail here,
        // before any data is fetched.
        let strategy = (spec.build)(&params)?;

        let fetch_start = request.start - Duration::days(strategy.warmup_days());
        let candles = self
            .source
            .load_candles(&request.symbol, fetch_start, request.end)?;

        let warmup_bars = candles.iter().filter(|c| c.date() < request.start).count();
        info!(
            "Running {} on {}: {} bars fetched, {} warmup bars before {}",
            spec.id,
            request.symbol,
            candles.len(),
            warmup_bars,
            request.start
        );

        let outcome = run_simulation(
            strategy.as_ref(),
            &candles,
            request.start,
            request.initial_capital,
        );

        let final_equity = outcome
            .equity_curve
            .last()
            .map(|p| p.equity)
            .unwrap_or(request.initial_capital);
        let (winning_trades, losing_trades, accuracy) = metrics::trade_stats(&outcome.trades);

        let asset = self
            .source
            .asset_meta(&request.symbol)
            .unwrap_or_else(|| AssetMeta::unknown(&request.symbol));

        Ok(BacktestResult {
            status: "completed".to_string(),
            asset_symbol: asset.symbol,
            asset_name: asset.name,
            asset_type: asset.asset_type,
            algorithm: spec.id.to_string(),
            start_date: request.start,
            end_date: request.end,
            initial_capital: request.initial_capital,
            final_equity,
            total_return: metrics::total_return(final_equity, request.initial_capital),
            max_drawdown: metrics::compute_max_drawdown(&outcome.equity_curve),
            sharpe_ratio: metrics::compute_sharpe(&outcome.equity_curve),
            number_of_trades: outcome.trades.len() as i32,
            winning_trades,
            losing_trades,
            accuracy,
            equity_curve: outcome.equity_curve,
            trades: outcome.trades,
        })
    }

    /// Runs the primary backtest plus a best-effort benchmark comparison
    /// over the same window. A benchmark failure is logged and swallowed;
    /// it never affects the primary result.
    pub fn run_with_benchmark(
        &self,
        request: &BacktestRequest,
    ) -> Result<(BacktestResult, Option<BenchmarkSummary>)> {
        let primary = self.run(request)?;

        let benchmark_request = BacktestRequest {
            algorithm_id: BENCHMARK_ALGORITHM_ID.to_string(),
            params: HashMap::new(),
            ..request.clone()
        };
        let benchmark = match self.run(&benchmark_request) {
            Ok(result) => Some(BenchmarkSummary {
                name: BENCHMARK_NAME.to_string(),
                final_equity: result.final_equity,
                total_return: result.total_return,
                max_drawdown: result.max_drawdown,
                sharpe_ratio: result.sharpe_ratio,
                equity_curve: result.equity_curve,
            }),
            Err(err) => {
                warn!(
                    "Benchmark run for {} over {}..{} failed: {err}",
                    request.symbol, request.start, request.end
                );
                None
            }
        };

        Ok((primary, benchmark))
    }
}
