//! # tabsieve-core
//!
//! Shared foundation for the tabsieve outlier engine:
//! - **types**: column-oriented `Dataset`, `FeatureSet`, `FeatureMatrix`, measure enums
//! - **errors**: one `thiserror` enum per concern plus stable error codes
//! - **config**: TOML configuration with layered resolution
//! - **tracing**: `tracing-subscriber` setup and structured field names
//! - **constants**: compiled defaults for every heuristic

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

pub use errors::{DetectionError, DetectionResult};
pub use types::{Dataset, FeatureMatrix, FeatureSet};
