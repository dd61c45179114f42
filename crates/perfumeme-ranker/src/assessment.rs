//! Entry points: one compound document in, one suitability verdict out.

use std::sync::Arc;

use perfumeme_common::{AssessmentConfig, Result};
use perfumeme_ingestion::sources::{IdentifierResolver, OdorNoteSource, RecordSource};
use perfumeme_ingestion::{extract_properties, CompoundId, CompoundRecord, ExtractionResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::aggregate::{evaluate_with, SuitabilityVerdict};
use crate::classifier::VolatilityVerdict;
use crate::model::{CurvePoint, ModelPath, VolatilityModel};

/// Verdict plus the sampled evaporation curve, for plotting collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveAssessment {
    pub verdict: SuitabilityVerdict,
    /// Empty when no curve could be modelled.
    pub points: Vec<CurvePoint>,
    pub path: Option<ModelPath>,
    /// Boiling point the fallback curve was built from.
    pub boiling_point_c: Option<f64>,
}

impl CurveAssessment {
    /// Legend text for the curve, e.g. "Fallback model - Tb = 198.0 °C".
    pub fn label(&self) -> Option<String> {
        match (self.path?, self.boiling_point_c) {
            (ModelPath::BoilingPointFallback, Some(bp)) => {
                Some(format!("{} - Tb = {:.1} °C", ModelPath::BoilingPointFallback.label(), bp))
            }
            (path, _) => Some(path.label().to_string()),
        }
    }
}

/// Assess already-extracted properties.
pub fn assess_extraction(extraction: &ExtractionResult, config: &AssessmentConfig) -> SuitabilityVerdict {
    let model = VolatilityModel::from_config(config);
    evaluate_with(
        config.aggregation.policy,
        extraction.has_smell,
        extraction.is_skin_toxic,
        || {
            let projection = model.project_extraction(extraction);
            VolatilityVerdict::classify(
                projection,
                extraction.boiling_point_c,
                &config.classification,
            )
        },
    )
}

/// Assess one compound with the default configuration.
pub fn assess_suitability<S: AsRef<str>>(
    id: CompoundId,
    record: &CompoundRecord,
    descriptions: &[S],
) -> SuitabilityVerdict {
    assess_suitability_with_config(id, record, descriptions, &AssessmentConfig::default())
}

#[instrument(skip(record, descriptions, config))]
pub fn assess_suitability_with_config<S: AsRef<str>>(
    id: CompoundId,
    record: &CompoundRecord,
    descriptions: &[S],
    config: &AssessmentConfig,
) -> SuitabilityVerdict {
    let extraction = extract_properties(record, descriptions, &config.extraction);
    let verdict = assess_extraction(&extraction, config);
    debug!(overall = ?verdict.overall, note = %verdict.volatility.note_type, "compound assessed");
    verdict
}

#[instrument(skip(record, descriptions))]
pub fn assess_suitability_with_curve<S: AsRef<str>>(
    id: CompoundId,
    record: &CompoundRecord,
    descriptions: &[S],
) -> CurveAssessment {
    let config = AssessmentConfig::default();
    let extraction = extract_properties(record, descriptions, &config.extraction);
    let verdict = assess_extraction(&extraction, &config);
    let (points, path) = match &verdict.volatility.curve {
        Some(curve) => (curve.points.clone(), Some(curve.path)),
        None => (Vec::new(), None),
    };
    let boiling_point_c = match path {
        Some(ModelPath::BoilingPointFallback) => extraction.boiling_point_c,
        _ => None,
    };
    CurveAssessment { verdict, points, path, boiling_point_c }
}

// ── Collaborator-driven assessment ────────────────────────────────────────────

/// Result of [`CompoundAssessor::assess`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundAssessment {
    pub query: String,
    pub id: CompoundId,
    pub extraction: ExtractionResult,
    pub verdict: SuitabilityVerdict,
    pub known_odor_notes: Option<Vec<String>>,
}

/// Resolve, fetch, extract and assess in one call.
pub struct CompoundAssessor {
    resolver: Arc<dyn IdentifierResolver>,
    records: Arc<dyn RecordSource>,
    odor_notes: Option<Arc<dyn OdorNoteSource>>,
    config: AssessmentConfig,
}

impl CompoundAssessor {
    pub fn new(resolver: Arc<dyn IdentifierResolver>, records: Arc<dyn RecordSource>) -> Self {
        Self {
            resolver,
            records,
            odor_notes: None,
            config: AssessmentConfig::default(),
        }
    }

    pub fn with_odor_notes(mut self, odor_notes: Arc<dyn OdorNoteSource>) -> Self {
        self.odor_notes = Some(odor_notes);
        self
    }

    pub fn with_config(mut self, config: AssessmentConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the configuration with the one named by `PERFUMEME_CONFIG`,
    /// or the defaults when it is unset.
    pub fn with_env_config(self) -> Result<Self> {
        Ok(self.with_config(AssessmentConfig::load()?))
    }

    pub fn config(&self) -> &AssessmentConfig {
        &self.config
    }

    /// Lookup failures (unresolved identifier, failed fetch) propagate; every
    /// later step degrades into the verdict instead.
    #[instrument(skip(self))]
    pub fn assess(&self, name_or_structure: &str) -> Result<CompoundAssessment> {
        let id = self.resolver.resolve(name_or_structure)?;
        let record = self.records.fetch_record(id)?;
        let descriptions = self.records.fetch_descriptions(id)?;

        let extraction = extract_properties(&record, &descriptions, &self.config.extraction);
        let verdict = assess_extraction(&extraction, &self.config);
        let known_odor_notes = self
            .odor_notes
            .as_ref()
            .and_then(|table| table.lookup_known_odor_notes(name_or_structure));

        info!(
            compound = %id,
            overall = ?verdict.overall,
            note = %verdict.volatility.note_type,
            "Suitability verdict"
        );
        Ok(CompoundAssessment {
            query: name_or_structure.to_string(),
            id,
            extraction,
            verdict,
            known_odor_notes,
        })
    }
}
