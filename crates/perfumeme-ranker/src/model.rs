//! Volatility model.
//!
//! Two independent figures come out of one set of extracted quantities:
//!
//! - `pvap_at_37c`: the reported vapor pressure corrected to skin temperature
//!   with an empirical exponential, `P_ref · exp(−c · (T_skin − T_ref))`.
//! - an evaporation curve of relative concentration over time, from a
//!   single-point Clausius–Clapeyron extrapolation when enthalpy and vapor
//!   pressure are both usable, else from a boiling-point heuristic.
//!
//! The two are not reconciled with each other.
//!
//! Inputs that cannot enter a logarithm or a division (non-finite or
//! non-positive) are treated as absent and logged; the next path is tried.

use perfumeme_common::{AssessmentConfig, ExtractionConfig, VolatilityModelConfig};
use perfumeme_ingestion::{ExtractionResult, PhysicalQuantity};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const KELVIN_OFFSET: f64 = 273.15;

/// Which model produced an evaporation curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelPath {
    ClausiusClapeyron,
    BoilingPointFallback,
}

impl ModelPath {
    pub fn label(&self) -> &'static str {
        match self {
            ModelPath::ClausiusClapeyron    => "Model with Clausius-Clapeyron",
            ModelPath::BoilingPointFallback => "Fallback model",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub time_hours: f64,
    pub relative_concentration: f64,
}

/// Sampled relative concentration, normalised so the first point is 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaporationCurve {
    pub path: ModelPath,
    pub points: Vec<CurvePoint>,
}

impl EvaporationCurve {
    /// Relative concentration left at the end of the horizon.
    pub fn final_concentration(&self) -> Option<f64> {
        self.points.last().map(|p| p.relative_concentration)
    }
}

/// Output of [`VolatilityModel::project`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VolatilityProjection {
    pub pvap_at_37c: Option<f64>,
    pub curve: Option<EvaporationCurve>,
}

impl VolatilityProjection {
    pub fn path(&self) -> Option<ModelPath> {
        self.curve.as_ref().map(|c| c.path)
    }
}

/// A vapor pressure that passed domain checks.
#[derive(Debug, Clone, Copy)]
struct ReferencePressure {
    mmhg: f64,
    reference_c: f64,
    reference_k: f64,
}

fn usable(name: &str, value: Option<f64>) -> Option<f64> {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => Some(v),
        Some(v) => {
            warn!(quantity = name, value = v, "value outside model domain, treated as absent");
            None
        }
        None => None,
    }
}

/// `n` evenly spaced samples from `start` to `end`, both inclusive.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            out[n - 1] = end;
            out
        }
    }
}

/// Divide every sample by the first. `None` when the first sample cannot be
/// a divisor.
fn normalise_to_first(times: &[f64], raw: Vec<f64>) -> Option<Vec<CurvePoint>> {
    let first = *raw.first()?;
    if !(first.is_finite() && first > 0.0) {
        return None;
    }
    Some(
        times
            .iter()
            .zip(raw)
            .map(|(&time_hours, r)| CurvePoint {
                time_hours,
                relative_concentration: r / first,
            })
            .collect(),
    )
}

pub struct VolatilityModel {
    config: VolatilityModelConfig,
    default_reference_c: f64,
}

impl VolatilityModel {
    pub fn new(config: VolatilityModelConfig) -> Self {
        Self {
            config,
            default_reference_c: ExtractionConfig::default().default_reference_temperature_c,
        }
    }

    pub fn from_config(config: &AssessmentConfig) -> Self {
        Self {
            config: config.model.clone(),
            default_reference_c: config.extraction.default_reference_temperature_c,
        }
    }

    /// Sample times in hours.
    pub fn time_axis(&self) -> Vec<f64> {
        linspace(0.0, self.config.horizon_hours, self.config.samples)
    }

    pub fn project_extraction(&self, extraction: &ExtractionResult) -> VolatilityProjection {
        self.project(
            extraction.enthalpy_j_per_mol,
            extraction.vapor_pressure.as_ref(),
            extraction.boiling_point_c,
        )
    }

    /// Skin-temperature vapor pressure and evaporation curve from whatever
    /// subset of the three inputs is present and usable.
    pub fn project(
        &self,
        enthalpy_j_per_mol: Option<f64>,
        vapor_pressure: Option<&PhysicalQuantity>,
        boiling_point_c: Option<f64>,
    ) -> VolatilityProjection {
        let pressure = vapor_pressure.and_then(|q| self.reference_pressure(q));
        let enthalpy = usable("enthalpy_j_per_mol", enthalpy_j_per_mol);

        let pvap_at_37c = pressure.and_then(|p| self.pvap_at_skin_temperature(p));

        let clausius_clapeyron = match (enthalpy, pressure) {
            (Some(dh), Some(p)) => self
                .clausius_clapeyron_curve(dh, p)
                .map(|points| EvaporationCurve { path: ModelPath::ClausiusClapeyron, points }),
            _ => None,
        };
        let curve = clausius_clapeyron.or_else(|| {
            let bp = usable("boiling_point_c", boiling_point_c)?;
            self.boiling_point_curve(bp)
                .map(|points| EvaporationCurve { path: ModelPath::BoilingPointFallback, points })
        });

        debug!(
            pvap_at_37c = ?pvap_at_37c,
            path = ?curve.as_ref().map(|c| c.path),
            "volatility projected"
        );
        VolatilityProjection { pvap_at_37c, curve }
    }

    fn reference_pressure(&self, quantity: &PhysicalQuantity) -> Option<ReferencePressure> {
        let mmhg = usable("vapor_pressure_mmhg", Some(quantity.value))?;
        let reference_c = quantity
            .reference_temperature_c
            .unwrap_or(self.default_reference_c);
        let reference_k = usable("reference_temperature_k", Some(reference_c + KELVIN_OFFSET))?;
        Some(ReferencePressure { mmhg, reference_c, reference_k })
    }

    fn pvap_at_skin_temperature(&self, p: ReferencePressure) -> Option<f64> {
        let delta = self.config.skin_temperature_c - p.reference_c;
        let pvap = p.mmhg * (-self.config.correction_coefficient * delta).exp();
        if pvap.is_finite() {
            Some(pvap)
        } else {
            warn!(pvap, "skin-temperature vapor pressure not finite, treated as absent");
            None
        }
    }

    /// `P(T) = exp(C − ΔH/(R·T))` with `C = ln P_ref + ΔH/(R·T_ref)`,
    /// evaluated along a linear temperature ramp; concentration
    /// `exp(−k·t / P(T(t)))`.
    fn clausius_clapeyron_curve(&self, dh: f64, p: ReferencePressure) -> Option<Vec<CurvePoint>> {
        let r = self.config.gas_constant;
        let c = p.mmhg.ln() + dh / (r * p.reference_k);

        let times = self.time_axis();
        let ramp = linspace(self.config.ramp_start_k, self.config.ramp_end_k, times.len());
        let raw: Vec<f64> = times
            .iter()
            .zip(&ramp)
            .map(|(&t, &temperature_k)| {
                let pressure = (c - dh / (r * temperature_k)).exp();
                (-self.config.evaporation_k * t / pressure).exp()
            })
            .collect();

        let points = normalise_to_first(&times, raw);
        if points.is_none() {
            warn!(dh, mmhg = p.mmhg, "Clausius-Clapeyron curve degenerate, trying boiling point");
        }
        points
    }

    /// `exp(−k_fb · t / (Tb / scale))`.
    fn boiling_point_curve(&self, bp: f64) -> Option<Vec<CurvePoint>> {
        let scaled = bp / self.config.fallback_boiling_point_scale;
        let times = self.time_axis();
        let raw: Vec<f64> = times
            .iter()
            .map(|&t| (-self.config.fallback_k * t / scaled).exp())
            .collect();
        normalise_to_first(&times, raw)
    }
}

impl Default for VolatilityModel {
    fn default() -> Self {
        Self::new(VolatilityModelConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mmhg(value: f64, at_c: f64) -> PhysicalQuantity {
        PhysicalQuantity::pressure_mmhg(value, Some(at_c))
    }

    #[test]
    fn test_linspace_inclusive_endpoints() {
        let xs = linspace(0.0, 25.0, 300);
        assert_eq!(xs.len(), 300);
        assert_eq!(xs[0], 0.0);
        assert_eq!(xs[299], 25.0);
        assert!((xs[1] - 25.0 / 299.0).abs() < 1e-12);
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(3.0, 9.0, 1), vec![3.0]);
    }

    #[test]
    fn test_clausius_clapeyron_curve_shape() {
        let model = VolatilityModel::default();
        let p = model.project(Some(40_000.0), Some(&mmhg(1.0, 25.0)), None);
        let curve = p.curve.unwrap();
        assert_eq!(curve.path, ModelPath::ClausiusClapeyron);
        assert_eq!(curve.points.len(), 300);
        assert_eq!(curve.points[0].relative_concentration, 1.0);
        assert_eq!(curve.points[299].time_hours, 25.0);
        for w in curve.points.windows(2) {
            assert!(w[1].relative_concentration <= w[0].relative_concentration + 1e-15);
        }
        assert!(curve.final_concentration().unwrap() < 1.0);
    }

    #[test]
    fn test_pvap_skin_correction() {
        let model = VolatilityModel::default();
        let p = model.project(None, Some(&mmhg(1.0, 25.0)), None);
        let expected = (-0.1f64 * 12.0).exp();
        assert!((p.pvap_at_37c.unwrap() - expected).abs() < 1e-12);
        // No enthalpy and no boiling point: no curve.
        assert!(p.curve.is_none());
    }

    #[test]
    fn test_pvap_computed_even_when_curve_uses_fallback() {
        let model = VolatilityModel::default();
        let p = model.project(None, Some(&mmhg(0.5, 37.0)), Some(200.0));
        assert_eq!(p.pvap_at_37c, Some(0.5));
        assert_eq!(p.path(), Some(ModelPath::BoilingPointFallback));
    }

    #[test]
    fn test_boiling_point_fallback_formula() {
        let model = VolatilityModel::default();
        let p = model.project(Some(40_000.0), None, Some(200.0));
        assert!(p.pvap_at_37c.is_none());
        let curve = p.curve.unwrap();
        assert_eq!(curve.path, ModelPath::BoilingPointFallback);
        assert_eq!(curve.points[0].relative_concentration, 1.0);
        let last = curve.points.last().unwrap();
        assert!((last.relative_concentration - (-0.2f64 * 25.0 / 20.0).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_inputs_fall_through() {
        let model = VolatilityModel::default();

        // Zero pressure: no logarithm, no pvap, fallback curve instead.
        let p = model.project(Some(40_000.0), Some(&mmhg(0.0, 25.0)), Some(180.0));
        assert!(p.pvap_at_37c.is_none());
        assert_eq!(p.path(), Some(ModelPath::BoilingPointFallback));

        // Negative pressure, as parsed from "-5 mmHg".
        let p = model.project(None, Some(&mmhg(-5.0, 25.0)), Some(180.0));
        assert!(p.pvap_at_37c.is_none());
        assert_eq!(p.path(), Some(ModelPath::BoilingPointFallback));

        // Negative enthalpy: fallback.
        let p = model.project(Some(-5.0), Some(&mmhg(1.0, 25.0)), Some(180.0));
        assert_eq!(p.path(), Some(ModelPath::BoilingPointFallback));
        assert!(p.pvap_at_37c.is_some());

        // Reference temperature below absolute zero.
        let p = model.project(Some(40_000.0), Some(&mmhg(1.0, -300.0)), None);
        assert_eq!(p, VolatilityProjection::default());

        // Non-positive and non-finite boiling points cannot be divided by.
        assert!(model.project(None, None, Some(0.0)).curve.is_none());
        assert!(model.project(None, None, Some(-20.0)).curve.is_none());
        assert!(model.project(None, None, Some(f64::NAN)).curve.is_none());
    }

    #[test]
    fn test_missing_reference_temperature_uses_default() {
        let model = VolatilityModel::default();
        let p = model.project(None, Some(&PhysicalQuantity::pressure_mmhg(2.0, None)), None);
        assert!((p.pvap_at_37c.unwrap() - 2.0 * (-1.2f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_no_data() {
        let p = VolatilityModel::default().project(None, None, None);
        assert_eq!(p, VolatilityProjection::default());
        assert_eq!(p.path(), None);
    }

    #[test]
    fn test_configured_sample_count() {
        let config = VolatilityModelConfig { samples: 10, ..VolatilityModelConfig::default() };
        let model = VolatilityModel::new(config);
        let p = model.project(None, None, Some(150.0));
        assert_eq!(p.curve.unwrap().points.len(), 10);
    }
}
