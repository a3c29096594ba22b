//! Detection errors.

use super::dataset_error::DatasetError;
use super::error_code::{self, SieveErrorCode};

pub type DetectionResult<T> = Result<T, DetectionError>;

/// Errors raised by the contamination estimator, the detectors and the
/// coverage analyzer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DetectionError {
    /// Unrecognized enum value, empty feature list, wrong column type.
    #[error("Invalid argument `{argument}`: {message}")]
    InvalidArgument { argument: String, message: String },

    /// Dataset too small for the requested computation.
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    /// A per-feature regression could not be fitted. Recorded, not fatal.
    #[error("Regression on `{feature}` did not converge: {reason}")]
    ConvergenceFailure { feature: String, reason: String },

    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

impl DetectionError {
    pub fn invalid_argument(argument: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument: argument.into(),
            message: message.into(),
        }
    }

    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateInput(message.into())
    }
}

impl SieveErrorCode for DetectionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => error_code::INVALID_ARGUMENT,
            Self::DegenerateInput(_) => error_code::DEGENERATE_INPUT,
            Self::ConvergenceFailure { .. } => error_code::CONVERGENCE_FAILURE,
            Self::Dataset(e) => e.error_code(),
        }
    }
}
