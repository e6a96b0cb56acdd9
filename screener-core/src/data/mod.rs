//! Table sources — the I/O boundary the engine sits behind.
//!
//! The engine consumes a [`crate::table::Table`] and never performs I/O
//! itself. A [`TableSource`] produces that table: from a local CSV file,
//! from a remote CSV export over HTTP, or synthesized for demos and
//! benchmarks.

pub mod csv_file;
pub mod remote;
pub mod source;
pub mod synthetic;

pub use csv_file::CsvFileSource;
pub use remote::RemoteCsvSource;
pub use source::{SourceError, TableSource};
pub use synthetic::SyntheticSource;
