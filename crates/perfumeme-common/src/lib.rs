//! perfumeme-common — Shared error type and assessment configuration used across all perfumeme crates.

pub mod error;
pub mod assessment_config;

// Re-export commonly used types
pub use error::{PerfumemeError, Result};
pub use assessment_config::{
    AggregationConfig, AggregationPolicy, AssessmentConfig, ClassificationThresholds,
    ExtractionConfig, VolatilityModelConfig,
};
