//! SieveErrorCode trait for stable, machine-readable error codes.

/// Every error enum implements this to expose a code that callers can
/// match on without parsing messages.
pub trait SieveErrorCode {
    /// Returns the error code string (e.g., "INVALID_ARGUMENT").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";
pub const DEGENERATE_INPUT: &str = "DEGENERATE_INPUT";
pub const CONVERGENCE_FAILURE: &str = "CONVERGENCE_FAILURE";
pub const DATASET_ERROR: &str = "DATASET_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
