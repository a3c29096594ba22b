//! Observability for tabsieve.
//! `tracing` crate with `EnvFilter`, per-module log levels.
//!
//! Detectors emit events with stable field names: `elapsed_ms`,
//! `n_neighbors`, `contamination`, `n_records`, `n_outliers`,
//! `skipped_fits`, `n_periods`.

pub mod setup;

pub use setup::init_tracing;
