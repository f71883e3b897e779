use crate::error::{EngineError, Result};
use crate::params::ParamDef;
use crate::strategy::{self, Strategy};
use serde::Serialize;
use std::collections::HashMap;

/// Builds a validated strategy instance from merged parameters. Fails with
/// `EngineError::Parameter` on inconsistent values, before any data fetch.
pub type StrategyBuilder =
    fn(&HashMap<String, f64>) -> Result<Box<dyn Strategy + Send + Sync>>;

/// Everything the engine knows about one algorithm: catalog metadata,
/// parameter schema and the constructor for its strategy.
pub struct AlgorithmSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    pub params: Vec<ParamDef>,
    pub build: StrategyBuilder,
    /// Hidden specs (internal benchmarks) resolve by id but are never listed.
    pub hidden: bool,
}

/// Catalog entry returned by `list_visible`, the external wire shape.
#[derive(Debug, Clone, Serialize)]
pub struct AlgorithmDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    pub params: Vec<ParamDef>,
}

/// Immutable algorithm table, built once at startup. Reads need no
/// synchronization afterwards; there is no way to mutate a built registry.
pub struct AlgorithmRegistry {
    specs: Vec<AlgorithmSpec>,
}

impl AlgorithmRegistry {
    /// The full built-in algorithm set, benchmarks included.
    pub fn builtin() -> Result<Self> {
        let mut registry = Self { specs: Vec::new() };
        registry.register(strategy::buy_and_hold::spec())?;
        registry.register(strategy::sma_crossover::spec())?;
        registry.register(strategy::donchian_breakout::spec())?;
        registry.register(strategy::time_series_momentum::spec())?;
        registry.register(strategy::rsi_reversion::spec())?;
        registry.register(strategy::market_benchmark::spec())?;
        registry.register(strategy::omniscient_benchmark::spec())?;
        Ok(registry)
    }

    fn register(&mut self, spec: AlgorithmSpec) -> Result<()> {
        if self.specs.iter().any(|existing| existing.id == spec.id) {
            return Err(EngineError::DuplicateAlgorithm(spec.id.to_string()));
        }
        self.specs.push(spec);
        Ok(())
    }

    pub fn resolve(&self, algorithm_id: &str) -> Result<&AlgorithmSpec> {
        self.specs
            .iter()
            .find(|spec| spec.id == algorithm_id)
            .ok_or_else(|| EngineError::UnknownAlgorithm(algorithm_id.to_string()))
    }

    pub fn list_visible(&self) -> Vec<AlgorithmDescriptor> {
        self.specs
            .iter()
            .filter(|spec| !spec.hidden)
            .map(|spec| AlgorithmDescriptor {
                id: spec.id,
                name: spec.name,
                category: spec.category,
                description: spec.description,
                params: spec.params.clone(),
            })
            .collect()
    }
}
