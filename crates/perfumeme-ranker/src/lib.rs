//! perfumeme-ranker — volatility modelling, note classification and
//! perfume suitability verdicts.

pub mod model;
pub mod classifier;
pub mod aggregate;
pub mod assessment;

pub use aggregate::{evaluate, evaluate_with, OverallVerdict, SuitabilityVerdict};
pub use assessment::{
    assess_extraction, assess_suitability, assess_suitability_with_config,
    assess_suitability_with_curve, CompoundAssessment, CompoundAssessor, CurveAssessment,
};
pub use classifier::{classify_note, NoteType, VolatilityVerdict};
pub use model::{CurvePoint, EvaporationCurve, ModelPath, VolatilityModel, VolatilityProjection};
