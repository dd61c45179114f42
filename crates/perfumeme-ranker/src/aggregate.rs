//! Suitability aggregation: smell, skin and volatility facets into one verdict.

use perfumeme_common::AggregationPolicy;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::classifier::{NoteType, VolatilityVerdict};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallVerdict {
    Suitable,
    UnsuitableNoSmell,
    UnsuitableToxicityUnconfirmed,
    UnsuitableTooVolatile,
    UnsuitableNotVolatileEnough,
    UndeterminedInsufficientData,
}

impl OverallVerdict {
    /// Precedence: smell, skin, too volatile, not volatile enough, missing data.
    pub fn combine(smell_ok: bool, skin_safe: bool, note_type: NoteType) -> Self {
        if !smell_ok {
            return OverallVerdict::UnsuitableNoSmell;
        }
        if !skin_safe {
            return OverallVerdict::UnsuitableToxicityUnconfirmed;
        }
        match note_type {
            NoteType::TooVolatile       => OverallVerdict::UnsuitableTooVolatile,
            NoteType::NotVolatileEnough => OverallVerdict::UnsuitableNotVolatileEnough,
            NoteType::Undetermined      => OverallVerdict::UndeterminedInsufficientData,
            NoteType::Top | NoteType::Heart | NoteType::Base => OverallVerdict::Suitable,
        }
    }

    pub fn is_suitable(&self) -> bool {
        *self == OverallVerdict::Suitable
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuitabilityVerdict {
    pub smell_ok: bool,
    pub skin_safe: bool,
    pub volatility: VolatilityVerdict,
    pub overall: OverallVerdict,
}

impl SuitabilityVerdict {
    /// One sentence for the overall outcome.
    pub fn headline(&self) -> String {
        let pvap = self.volatility.pvap_at_37c;
        match self.overall {
            OverallVerdict::Suitable => format!(
                "The molecule is suitable for perfume use and behaves as a {}.",
                self.volatility.note_type
            ),
            OverallVerdict::UnsuitableNoSmell => "The molecule has no detectable smell.".to_string(),
            OverallVerdict::UnsuitableToxicityUnconfirmed => {
                "Skin safety of the molecule could not be confirmed.".to_string()
            }
            OverallVerdict::UnsuitableTooVolatile => format!(
                "The molecule is too volatile (Pvap at 37°C: {:.2} mmHg) for perfume use.",
                pvap.unwrap_or(f64::NAN)
            ),
            OverallVerdict::UnsuitableNotVolatileEnough => format!(
                "The molecule is not volatile enough (Pvap at 37°C: {:.4} mmHg) to be noticeable in a perfume.",
                pvap.unwrap_or(f64::NAN)
            ),
            OverallVerdict::UndeterminedInsufficientData => {
                "The molecule might be suitable, but lacks sufficient volatility data to classify."
                    .to_string()
            }
        }
    }

    /// Multi-line report: one line per facet, then the headline.
    pub fn summary(&self) -> String {
        let smell = if self.smell_ok { "detected" } else { "not detected" };
        let skin = if self.skin_safe {
            "skin toxicity assessment found"
        } else {
            "no skin toxicity assessment"
        };
        let mut volatility = self.volatility.note_type.to_string();
        if let Some(pvap) = self.volatility.pvap_at_37c {
            volatility.push_str(&format!(" (Pvap at 37°C: {:.4} mmHg)", pvap));
        }
        if let Some(path) = self.volatility.model_path() {
            volatility.push_str(&format!(", curve: {}", path.label()));
        }
        format!(
            "Smell: {}\nSkin: {}\nVolatility: {}\n{}",
            smell,
            skin,
            volatility,
            self.headline()
        )
    }
}

impl fmt::Display for SuitabilityVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

/// Combine already-computed facets.
pub fn evaluate(smell_ok: bool, skin_safe: bool, volatility: VolatilityVerdict) -> SuitabilityVerdict {
    SuitabilityVerdict {
        smell_ok,
        skin_safe,
        overall: OverallVerdict::combine(smell_ok, skin_safe, volatility.note_type),
        volatility,
    }
}

/// Combine facets under `policy`, computing volatility lazily.
///
/// With [`AggregationPolicy::ShortCircuit`] a failing smell or skin facet
/// returns at once; `volatility` is never called and the volatility facet is
/// reported as undetermined.
pub fn evaluate_with<F>(
    policy: AggregationPolicy,
    smell_ok: bool,
    skin_safe: bool,
    volatility: F,
) -> SuitabilityVerdict
where
    F: FnOnce() -> VolatilityVerdict,
{
    let volatility = match policy {
        AggregationPolicy::ShortCircuit if !(smell_ok && skin_safe) => {
            VolatilityVerdict::undetermined()
        }
        _ => volatility(),
    };
    evaluate(smell_ok, skin_safe, volatility)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn verdict(note_type: NoteType, pvap: Option<f64>) -> VolatilityVerdict {
        VolatilityVerdict { note_type, pvap_at_37c: pvap, curve: None }
    }

    #[test]
    fn test_precedence() {
        use OverallVerdict::*;
        assert_eq!(OverallVerdict::combine(false, false, NoteType::TooVolatile), UnsuitableNoSmell);
        assert_eq!(OverallVerdict::combine(true, false, NoteType::TooVolatile), UnsuitableToxicityUnconfirmed);
        assert_eq!(OverallVerdict::combine(true, true, NoteType::TooVolatile), UnsuitableTooVolatile);
        assert_eq!(OverallVerdict::combine(true, true, NoteType::NotVolatileEnough), UnsuitableNotVolatileEnough);
        assert_eq!(OverallVerdict::combine(true, true, NoteType::Undetermined), UndeterminedInsufficientData);
        assert_eq!(OverallVerdict::combine(true, true, NoteType::Base), Suitable);
    }

    #[test]
    fn test_short_circuit_skips_volatility() {
        let calls = Cell::new(0);
        let v = evaluate_with(AggregationPolicy::ShortCircuit, false, true, || {
            calls.set(calls.get() + 1);
            verdict(NoteType::Heart, Some(1.0))
        });
        assert_eq!(calls.get(), 0);
        assert_eq!(v.overall, OverallVerdict::UnsuitableNoSmell);
        assert_eq!(v.volatility, VolatilityVerdict::undetermined());
    }

    #[test]
    fn test_short_circuit_runs_volatility_when_facets_pass() {
        let v = evaluate_with(AggregationPolicy::ShortCircuit, true, true, || {
            verdict(NoteType::Top, Some(20.0))
        });
        assert_eq!(v.overall, OverallVerdict::Suitable);
        assert_eq!(v.volatility.note_type, NoteType::Top);
    }

    #[test]
    fn test_full_evaluation_reports_volatility() {
        let calls = Cell::new(0);
        let v = evaluate_with(AggregationPolicy::FullEvaluation, false, false, || {
            calls.set(calls.get() + 1);
            verdict(NoteType::Heart, Some(1.0))
        });
        assert_eq!(calls.get(), 1);
        assert_eq!(v.overall, OverallVerdict::UnsuitableNoSmell);
        assert_eq!(v.volatility.note_type, NoteType::Heart);
    }

    #[test]
    fn test_summary_lines() {
        let v = evaluate(true, true, verdict(NoteType::Heart, Some(0.5)));
        let summary = v.summary();
        let lines: Vec<&str> = summary.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Smell: detected");
        assert_eq!(lines[1], "Skin: skin toxicity assessment found");
        assert_eq!(lines[2], "Volatility: heart note (Pvap at 37°C: 0.5000 mmHg)");
        assert_eq!(
            lines[3],
            "The molecule is suitable for perfume use and behaves as a heart note."
        );
        assert_eq!(v.to_string(), summary);
    }

    #[test]
    fn test_too_volatile_headline() {
        let v = evaluate(true, true, verdict(NoteType::TooVolatile, Some(150.0)));
        assert_eq!(
            v.headline(),
            "The molecule is too volatile (Pvap at 37°C: 150.00 mmHg) for perfume use."
        );
        assert!(!v.overall.is_suitable());
    }

    #[test]
    fn test_verdict_serialises() {
        let v = evaluate(true, false, VolatilityVerdict::undetermined());
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["overall"], "unsuitable_toxicity_unconfirmed");
        assert_eq!(json["volatility"]["note_type"], "undetermined");
    }
}
