//! Screener Core — the decision engine for quality-screened portfolios.
//!
//! This crate contains the heart of the screener:
//! - Tabular model (tagged cells, header-addressed tables)
//! - Value normalization (booleans, locale numerics, drawdowns)
//! - Recognized-column schema with safe defaults for absent columns
//! - Rule evaluator (required-quality gates, sell/buy logic)
//! - Action classifier (six mutually exclusive actions with reasons)
//! - Result aggregation with deterministic stable ordering
//! - Table sources (CSV file, remote CSV export, synthetic demo data)
//!
//! The engine is a pure synchronous single-pass transformation: it never
//! raises on malformed data, never mutates its input, and holds no state
//! across invocations beyond the immutable resolved configuration.

pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod normalize;
pub mod schema;
pub mod table;

pub use config::ScreenerConfig;
pub use data::{CsvFileSource, RemoteCsvSource, SourceError, SyntheticSource, TableSource};
pub use domain::{Action, Decision, Record};
pub use engine::compute_actions;
pub use table::{Cell, Table};
