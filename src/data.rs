use crate::error::{EngineError, Result};
use crate::models::{AssetMeta, Candle};
use anyhow::{anyhow, Context};
use chrono::{DateTime, NaiveDate, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

const MARKET_DATA_SNAPSHOT_VERSION: u32 = 1;

/// Ordered daily bars for one symbol and date range. The engine's only I/O
/// dependency; everything behind this trait (databases, providers, caches)
/// is out of scope for the engine itself.
pub trait MarketDataSource {
    /// Bars for `symbol` with dates inside `[start, end]`, ascending.
    /// Fails with `DataNotFound` when the symbol is unknown or the range
    /// yields zero rows.
    fn load_candles(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<Candle>>;

    /// Display metadata for the symbol, if the source knows it.
    fn asset_meta(&self, symbol: &str) -> Option<AssetMeta>;
}

/// On-disk market data bundle, written and read with bincode.
#[derive(Serialize, Deserialize)]
pub struct MarketDataSnapshot {
    version: u32,
    generated_at: DateTime<Utc>,
    assets: Vec<AssetMeta>,
    candles: Vec<Candle>,
}

/// Accepted JSON input shape for `snapshot` imports: just the payload,
/// version and timestamp are stamped on conversion.
#[derive(Deserialize)]
struct SnapshotInput {
    #[serde(default)]
    assets: Vec<AssetMeta>,
    candles: Vec<Candle>,
}

impl MarketDataSnapshot {
    pub fn new(assets: Vec<AssetMeta>, candles: Vec<Candle>) -> Self {
        Self {
            version: MARKET_DATA_SNAPSHOT_VERSION,
            generated_at: Utc::now(),
            assets,
            candles,
        }
    }

    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open candle file {}", path.display()))?;
        let input: SnapshotInput = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse candle file {}", path.display()))?;
        Ok(Self::new(input.assets, input.candles))
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create snapshot file {}", path.display()))?;
        bincode::serialize_into(BufWriter::new(file), self)
            .with_context(|| format!("Failed to write snapshot to {}", path.display()))?;
        info!(
            "Wrote market data snapshot with {} candles for {} assets to {}",
            self.candles.len(),
            self.assets.len(),
            path.display()
        );
        Ok(())
    }

    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open snapshot file {}", path.display()))?;
        let snapshot: Self = bincode::deserialize_from(BufReader::new(file))
            .with_context(|| format!("Failed to read snapshot from {}", path.display()))?;
        if snapshot.version != MARKET_DATA_SNAPSHOT_VERSION {
            return Err(anyhow!(
                "Unsupported snapshot version {} in {} (expected {})",
                snapshot.version,
                path.display(),
                MARKET_DATA_SNAPSHOT_VERSION
            ));
        }
        Ok(snapshot)
    }
}

fn select_range(
    series: Option<&Vec<Candle>>,
    symbol: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<Candle>> {
    let not_found = || EngineError::DataNotFound {
        symbol: symbol.to_string(),
        start,
        end,
    };

    let selected: Vec<Candle> = series
        .ok_or_else(not_found)?
        .iter()
        .filter(|c| {
            let date = c.date();
            date >= start && date <= end
        })
        .cloned()
        .collect();

    if selected.is_empty() {
        return Err(not_found());
    }
    Ok(selected)
}

/// Data source backed by a loaded snapshot: candles grouped per symbol and
/// sorted by date once, then served from memory for every run.
pub struct SnapshotDataSource {
    assets: HashMap<String, AssetMeta>,
    candles: HashMap<String, Vec<Candle>>,
}

impl SnapshotDataSource {
    pub fn from_snapshot(snapshot: MarketDataSnapshot) -> Self {
        let assets = snapshot
            .assets
            .into_iter()
            .map(|meta| (meta.symbol.clone(), meta))
            .collect();

        let mut candles: HashMap<String, Vec<Candle>> = HashMap::new();
        for candle in snapshot.candles {
            candles.entry(candle.symbol.clone()).or_default().push(candle);
        }
        for series in candles.values_mut() {
            series.sort_by(|a, b| a.ts.cmp(&b.ts));
        }

        Self { assets, candles }
    }

    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let snapshot = MarketDataSnapshot::load_from_file(path)?;
        let source = Self::from_snapshot(snapshot);
        info!(
            "Loaded market data for {} symbols from {}",
            source.candles.len(),
            path.display()
        );
        Ok(source)
    }
}

impl MarketDataSource for SnapshotDataSource {
    fn load_candles(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<Candle>> {
        select_range(self.candles.get(symbol), symbol, start, end)
    }

    fn asset_meta(&self, symbol: &str) -> Option<AssetMeta> {
        self.assets.get(symbol).cloned()
    }
}

/// Hand-built data source for tests and embedding.
#[derive(Default)]
pub struct InMemoryDataSource {
    assets: HashMap<String, AssetMeta>,
    candles: HashMap<String, Vec<Candle>>,
}

impl InMemoryDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_asset(&mut self, meta: AssetMeta) {
        self.assets.insert(meta.symbol.clone(), meta);
    }

    pub fn add_candles(&mut self, symbol: &str, candles: Vec<Candle>) {
        let series = self.candles.entry(symbol.to_string()).or_default();
        series.extend(candles);
        series.sort_by(|a, b| a.ts.cmp(&b.ts));
    }
}

impl MarketDataSource for InMemoryDataSource {
    fn load_candles(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<Candle>> {
        select_range(self.candles.get(symbol), symbol, start, end)
    }

    fn asset_meta(&self, symbol: &str) -> Option<AssetMeta> {
        self.assets.get(symbol).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn sample_candles(symbol: &str, count: i64) -> Vec<Candle> {
        let base = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        (0..count)
            .map(|i| Candle {
                symbol: symbol.to_string(),
                ts: base + Duration::days(i),
                open: 10.0,
                high: 11.0,
                low: 9.0,
                close: 10.0,
                volume: 100.0,
            })
            .collect()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn unknown_symbol_is_data_not_found() {
        let source = InMemoryDataSource::new();
        let err = source
            .load_candles("NOPE", date(2020, 1, 1), date(2020, 2, 1))
            .unwrap_err();
        assert!(matches!(err, EngineError::DataNotFound { .. }));
    }

    #[test]
    fn empty_range_is_data_not_found() {
        let mut source = InMemoryDataSource::new();
        source.add_candles("AAA", sample_candles("AAA", 5));
        let err = source
            .load_candles("AAA", date(2021, 1, 1), date(2021, 2, 1))
            .unwrap_err();
        assert!(matches!(err, EngineError::DataNotFound { .. }));
    }

    #[test]
    fn range_filter_is_inclusive_and_sorted() {
        let mut source = InMemoryDataSource::new();
        let mut candles = sample_candles("AAA", 10);
        candles.reverse(); // add_candles must restore order
        source.add_candles("AAA", candles);

        let loaded = source
            .load_candles("AAA", date(2020, 1, 3), date(2020, 1, 6))
            .unwrap();
        assert_eq!(loaded.len(), 4);
        assert_eq!(loaded.first().unwrap().date(), date(2020, 1, 3));
        assert_eq!(loaded.last().unwrap().date(), date(2020, 1, 6));
        assert!(loaded.windows(2).all(|w| w[0].ts < w[1].ts));
    }

    #[test]
    fn snapshot_roundtrip_preserves_candles() {
        let dir = std::env::temp_dir().join("tradesim-snapshot-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("roundtrip.bin");

        let assets = vec![AssetMeta {
            symbol: "AAA".to_string(),
            name: "Triple A Corp".to_string(),
            asset_type: "stock".to_string(),
        }];
        let snapshot = MarketDataSnapshot::new(assets, sample_candles("AAA", 3));
        snapshot.save_to_file(&path).unwrap();

        let source = SnapshotDataSource::load_from_file(&path).unwrap();
        let candles = source
            .load_candles("AAA", date(2020, 1, 1), date(2020, 1, 3))
            .unwrap();
        assert_eq!(candles.len(), 3);
        assert_eq!(source.asset_meta("AAA").unwrap().name, "Triple A Corp");

        std::fs::remove_file(&path).ok();
    }
}
