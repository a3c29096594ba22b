//! Data model for tabsieve: datasets, feature spaces, measures and labels.

pub mod collections;
pub mod dataset;
pub mod features;
pub mod labels;
pub mod measures;

pub use collections::{BTreeMap, FxHashMap, FxHashSet};
pub use dataset::{Column, ColumnData, ColumnKind, Dataset, Record, Value};
pub use features::{FeatureMatrix, FeatureSet};
pub use labels::{ContaminationEstimate, CoveragePeriod, InfluenceScore, OutlierLabel};
pub use measures::{CenterMeasure, ContaminationMode, IdentifyBy, SpreadEstimator};
