//! Configuration system for tabsieve.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod contamination_config;
pub mod coverage_config;
pub mod density_config;
pub mod tabsieve_config;

pub use contamination_config::ContaminationConfig;
pub use coverage_config::CoverageConfig;
pub use density_config::DensityConfig;
pub use tabsieve_config::{CliOverrides, TabsieveConfig};
