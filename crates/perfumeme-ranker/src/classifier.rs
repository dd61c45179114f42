//! Note classification against fixed threshold bands.
//!
//! Skin-temperature vapor pressure takes precedence; the boiling point is
//! only consulted when no usable pressure exists.

use perfumeme_common::ClassificationThresholds;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::{EvaporationCurve, ModelPath, VolatilityProjection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteType {
    Top,
    Heart,
    Base,
    TooVolatile,
    NotVolatileEnough,
    Undetermined,
}

impl NoteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoteType::Top               => "top note",
            NoteType::Heart             => "heart note",
            NoteType::Base              => "base note",
            NoteType::TooVolatile       => "too volatile",
            NoteType::NotVolatileEnough => "not volatile enough",
            NoteType::Undetermined      => "undetermined",
        }
    }

    /// One of the three usable perfume notes.
    pub fn is_note(&self) -> bool {
        matches!(self, NoteType::Top | NoteType::Heart | NoteType::Base)
    }
}

impl fmt::Display for NoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Band for a vapor pressure at 37 °C, in mmHg.
pub fn classify_pvap(pvap: f64, t: &ClassificationThresholds) -> NoteType {
    if pvap > t.too_volatile_above {
        NoteType::TooVolatile
    } else if pvap > t.top_above {
        NoteType::Top
    } else if pvap > t.heart_above {
        NoteType::Heart
    } else if pvap >= t.base_min {
        NoteType::Base
    } else {
        NoteType::NotVolatileEnough
    }
}

/// Band for a boiling point in Celsius.
pub fn classify_boiling_point(bp: f64, t: &ClassificationThresholds) -> NoteType {
    if bp < t.boiling_top_below {
        NoteType::Top
    } else if bp <= t.boiling_heart_max {
        NoteType::Heart
    } else {
        NoteType::Base
    }
}

pub fn classify_note(
    pvap_at_37c: Option<f64>,
    boiling_point_c: Option<f64>,
    thresholds: &ClassificationThresholds,
) -> NoteType {
    match (
        pvap_at_37c.filter(|v| v.is_finite()),
        boiling_point_c.filter(|v| v.is_finite()),
    ) {
        (Some(pvap), _) => classify_pvap(pvap, thresholds),
        (None, Some(bp)) => classify_boiling_point(bp, thresholds),
        (None, None) => NoteType::Undetermined,
    }
}

/// Volatility facet of a suitability verdict.
///
/// `curve` is only ever present when a vapor pressure or a boiling point was.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolatilityVerdict {
    pub note_type: NoteType,
    pub pvap_at_37c: Option<f64>,
    pub curve: Option<EvaporationCurve>,
}

impl VolatilityVerdict {
    /// No figures at all, e.g. when evaluation stopped before the model ran.
    pub fn undetermined() -> Self {
        Self {
            note_type: NoteType::Undetermined,
            pvap_at_37c: None,
            curve: None,
        }
    }

    pub fn classify(
        projection: VolatilityProjection,
        boiling_point_c: Option<f64>,
        thresholds: &ClassificationThresholds,
    ) -> Self {
        Self {
            note_type: classify_note(projection.pvap_at_37c, boiling_point_c, thresholds),
            pvap_at_37c: projection.pvap_at_37c,
            curve: projection.curve,
        }
    }

    pub fn model_path(&self) -> Option<ModelPath> {
        self.curve.as_ref().map(|c| c.path)
    }
}
