//! # tabsieve-bench
//!
//! Deterministic dataset generators shared by the tabsieve test suites and
//! the Criterion benchmarks in `benches/`.

pub mod fixtures;

pub use fixtures::{daily_dates, uniform_with_injected_outliers, FixtureSize, SimpleRng};
