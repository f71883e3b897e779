use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::info;
use std::collections::HashMap;
use std::path::PathBuf;
use tradesim::data::{MarketDataSnapshot, SnapshotDataSource};
use tradesim::engine::{BacktestEngine, BacktestRequest};
use tradesim::registry::AlgorithmRegistry;

#[derive(Parser)]
#[command(name = "tradesim")]
#[command(about = "A daily-bar trading strategy backtesting engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one backtest against a market data snapshot
    Run {
        /// Asset symbol to simulate
        symbol: String,
        /// Algorithm id (see `algorithms`)
        algorithm: String,
        /// First day of the official window (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,
        /// Last day of the official window (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,
        /// Starting cash
        #[arg(long, default_value_t = 10_000.0)]
        capital: f64,
        /// Strategy parameter override, repeatable (e.g. --param fast_window=10)
        #[arg(long = "param", value_name = "NAME=VALUE")]
        params: Vec<String>,
        /// Path to the market data snapshot file
        #[arg(long = "data-file", value_name = "PATH")]
        data_file: PathBuf,
        /// Also run the hidden benchmark and attach the comparison
        #[arg(long)]
        benchmark: bool,
    },
    /// Print the visible algorithm catalog as JSON
    Algorithms,
    /// Build a market data snapshot from a JSON candle file
    Snapshot {
        /// JSON file with `assets` and `candles` arrays
        #[arg(short, long)]
        input: PathBuf,
        /// Destination snapshot file
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn parse_params(raw: &[String]) -> Result<HashMap<String, f64>> {
    let mut params = HashMap::new();
    for entry in raw {
        let (name, value) = entry
            .split_once('=')
            .ok_or_else(|| anyhow!("Expected NAME=VALUE, got '{entry}'"))?;
        let value: f64 = value
            .parse()
            .with_context(|| format!("Parameter '{name}' has a non-numeric value"))?;
        params.insert(name.to_string(), value);
    }
    Ok(params)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            symbol,
            algorithm,
            start,
            end,
            capital,
            params,
            data_file,
            benchmark,
        } => {
            let source = SnapshotDataSource::load_from_file(&data_file)?;
            let engine = BacktestEngine::new(AlgorithmRegistry::builtin()?, source);
            let request = BacktestRequest {
                symbol,
                algorithm_id: algorithm,
                start,
                end,
                initial_capital: capital,
                params: parse_params(&params)?,
            };

            if benchmark {
                let (result, comparison) = engine.run_with_benchmark(&request)?;
                let bundle = serde_json::json!({
                    "result": result,
                    "benchmark": comparison,
                });
                println!("{}", serde_json::to_string_pretty(&bundle)?);
            } else {
                let result = engine.run(&request)?;
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
        }
        Commands::Algorithms => {
            let registry = AlgorithmRegistry::builtin()?;
            println!(
                "{}",
                serde_json::to_string_pretty(&registry.list_visible())?
            );
        }
        Commands::Snapshot { input, output } => {
            let snapshot = MarketDataSnapshot::from_json_file(&input)?;
            snapshot.save_to_file(&output)?;
            info!("Snapshot written to {}", output.display());
        }
    }

    Ok(())
}
