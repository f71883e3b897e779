pub mod data;
pub mod engine;
pub mod error;
pub mod executor;
pub mod indicators;
pub mod metrics;
pub mod models;
pub mod params;
pub mod registry;
pub mod strategy;
