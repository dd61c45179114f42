//! Property extraction: turns one compound document into an [`ExtractionResult`].
//!
//! Every extractor is a pure function over the section forest (and, for smell,
//! the description list). Nothing here fails: a miss is an unset field.

pub mod smell;
pub mod toxicity;
pub mod volatility;

use perfumeme_common::ExtractionConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{CompoundRecord, PhysicalQuantity};

pub use smell::has_smell;
pub use toxicity::has_skin_toxicity_data;
pub use volatility::{extract_boiling_point, extract_enthalpy, extract_vapor_pressure};

/// Everything the model and aggregator need to know about one compound.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub has_smell: bool,
    /// A skin or dermal toxicity assessment exists in the record.
    pub is_skin_toxic: bool,
    pub vapor_pressure: Option<PhysicalQuantity>,
    pub boiling_point_c: Option<f64>,
    pub enthalpy_j_per_mol: Option<f64>,
}

impl ExtractionResult {
    /// At least one quantity the volatility model can work from.
    pub fn has_volatility_data(&self) -> bool {
        self.vapor_pressure.is_some() || self.boiling_point_c.is_some()
    }
}

/// Run every extractor over `record` and `descriptions`.
pub fn extract_properties<S: AsRef<str>>(
    record: &CompoundRecord,
    descriptions: &[S],
    config: &ExtractionConfig,
) -> ExtractionResult {
    let result = ExtractionResult {
        has_smell: has_smell(descriptions),
        is_skin_toxic: has_skin_toxicity_data(&record.sections),
        vapor_pressure: extract_vapor_pressure(
            &record.sections,
            config.default_reference_temperature_c,
        ),
        boiling_point_c: extract_boiling_point(&record.sections),
        enthalpy_j_per_mol: extract_enthalpy(&record.sections),
    };
    debug!(
        has_smell = result.has_smell,
        is_skin_toxic = result.is_skin_toxic,
        vapor_pressure = ?result.vapor_pressure,
        boiling_point_c = ?result.boiling_point_c,
        enthalpy_j_per_mol = ?result.enthalpy_j_per_mol,
        "properties extracted"
    );
    result
}
