//! Error handling for tabsieve.
//! One error enum per concern, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod dataset_error;
pub mod detection_error;
pub mod error_code;

pub use config_error::ConfigError;
pub use dataset_error::DatasetError;
pub use detection_error::{DetectionError, DetectionResult};
pub use error_code::SieveErrorCode;
