//! Contamination estimation.
//!
//! Each feature gets fences from an `ExceedanceRule`; the share of records
//! outside them is that feature's exceed-fraction. The estimate is the
//! median exceed-fraction across features.
//!
//! Rules:
//! - `SigmaRule`: center ± k·spread (three-sigma by default)
//! - `TukeyRule`: IQR fences

pub mod estimator;
pub mod rules;

pub use estimator::{ContaminationEstimator, FeatureExceedance};
pub use rules::{ExceedanceRule, Fences, SigmaRule, TukeyRule};
