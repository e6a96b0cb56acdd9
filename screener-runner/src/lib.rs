//! Screener Runner — screen orchestration, risk profiles, and artifacts.
//!
//! This crate builds on `screener-core` to provide:
//! - Named risk profiles with threshold interpolation over a 0–100 dial
//! - Single-source and multi-source screen runners
//! - Action tallies and top-entry summaries for display
//! - JSON/CSV/Markdown artifact export with schema versioning

pub mod export;
pub mod profiles;
pub mod runner;
pub mod summary;

pub use export::{export_json, export_table_csv, import_json, load_artifacts, save_artifacts};
pub use profiles::{resolve, Profile, ProfileError, ProfileSet, ThresholdOverrides};
pub use runner::{run_screen, screen_all, screen_table, ScreenError, ScreenResult, SCHEMA_VERSION};
pub use summary::{action_counts, top_entries, TopEntry};
