//! Assessment configuration.
//!
//! Every constant the extraction, volatility model, classifier and aggregator
//! rely on lives here, with defaults matching the reference behaviour. Users
//! can override any subset via YAML/JSON/TOML; missing fields keep their
//! defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::PerfumemeError;

/// Complete assessment configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssessmentConfig {
    /// Property-extraction policies
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Volatility model constants
    #[serde(default)]
    pub model: VolatilityModelConfig,

    /// Note-type threshold bands
    #[serde(default)]
    pub classification: ClassificationThresholds,

    /// Facet aggregation
    #[serde(default)]
    pub aggregation: AggregationConfig,
}

// ── Extraction ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Reference temperature assumed for a vapor pressure reported without
    /// an "at T" suffix. 25 °C is the standard reporting condition.
    #[serde(default = "default_reference_temperature")]
    pub default_reference_temperature_c: f64,
}

fn default_reference_temperature() -> f64 { 25.0 }

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            default_reference_temperature_c: default_reference_temperature(),
        }
    }
}

// ── Volatility Model ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolatilityModelConfig {
    /// Gas constant R in J/(mol·K)
    #[serde(default = "default_gas_constant")]
    pub gas_constant: f64,

    /// Evaporation rate constant k for the Clausius–Clapeyron curve
    #[serde(default = "default_evaporation_k")]
    pub evaporation_k: f64,

    /// Rate constant for the boiling-point fallback curve
    #[serde(default = "default_fallback_k")]
    pub fallback_k: f64,

    /// Divisor applied to the boiling point in the fallback curve
    #[serde(default = "default_fallback_scale")]
    pub fallback_boiling_point_scale: f64,

    /// Length of the simulated time axis in hours
    #[serde(default = "default_horizon")]
    pub horizon_hours: f64,

    /// Number of samples on the time axis (endpoints included)
    #[serde(default = "default_samples")]
    pub samples: usize,

    /// Start of the synthetic temperature ramp (K)
    #[serde(default = "default_ramp_start")]
    pub ramp_start_k: f64,

    /// End of the synthetic temperature ramp (K)
    #[serde(default = "default_ramp_end")]
    pub ramp_end_k: f64,

    /// Skin temperature the vapor pressure is projected to (°C)
    #[serde(default = "default_skin_temperature")]
    pub skin_temperature_c: f64,

    /// Coefficient of the empirical exponential temperature correction
    #[serde(default = "default_correction")]
    pub correction_coefficient: f64,
}

fn default_gas_constant()     -> f64   { 8.314 }
fn default_evaporation_k()    -> f64   { 0.05 }
fn default_fallback_k()       -> f64   { 0.2 }
fn default_fallback_scale()   -> f64   { 10.0 }
fn default_horizon()          -> f64   { 25.0 }
fn default_samples()          -> usize { 300 }
fn default_ramp_start()       -> f64   { 298.0 }
fn default_ramp_end()         -> f64   { 318.0 }
fn default_skin_temperature() -> f64   { 37.0 }
fn default_correction()       -> f64   { 0.1 }

impl Default for VolatilityModelConfig {
    fn default() -> Self {
        Self {
            gas_constant:                 default_gas_constant(),
            evaporation_k:                default_evaporation_k(),
            fallback_k:                   default_fallback_k(),
            fallback_boiling_point_scale: default_fallback_scale(),
            horizon_hours:                default_horizon(),
            samples:                      default_samples(),
            ramp_start_k:                 default_ramp_start(),
            ramp_end_k:                   default_ramp_end(),
            skin_temperature_c:           default_skin_temperature(),
            correction_coefficient:       default_correction(),
        }
    }
}

// ── Classification ────────────────────────────────────────────────────────────

/// Threshold bands for note classification.
///
/// Vapor pressures are in mmHg at skin temperature, boiling points in °C.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationThresholds {
    /// Above this: too volatile (exclusive)
    #[serde(default = "default_too_volatile")]
    pub too_volatile_above: f64,

    /// Above this and up to `too_volatile_above`: top note
    #[serde(default = "default_top_above")]
    pub top_above: f64,

    /// Above this and up to `top_above`: heart note
    #[serde(default = "default_heart_above")]
    pub heart_above: f64,

    /// From this (inclusive) up to `heart_above`: base note; below: not volatile enough
    #[serde(default = "default_base_min")]
    pub base_min: f64,

    /// Boiling point strictly below this: top note
    #[serde(default = "default_bp_top_below")]
    pub boiling_top_below: f64,

    /// Boiling point up to this (inclusive): heart note; above: base note
    #[serde(default = "default_bp_heart_max")]
    pub boiling_heart_max: f64,
}

fn default_too_volatile() -> f64 { 100.0 }
fn default_top_above()    -> f64 { 10.0 }
fn default_heart_above()  -> f64 { 0.1 }
fn default_base_min()     -> f64 { 0.01 }
fn default_bp_top_below() -> f64 { 150.0 }
fn default_bp_heart_max() -> f64 { 250.0 }

impl Default for ClassificationThresholds {
    fn default() -> Self {
        Self {
            too_volatile_above: default_too_volatile(),
            top_above:          default_top_above(),
            heart_above:        default_heart_above(),
            base_min:           default_base_min(),
            boiling_top_below:  default_bp_top_below(),
            boiling_heart_max:  default_bp_heart_max(),
        }
    }
}

// ── Aggregation ───────────────────────────────────────────────────────────────

/// How smell, skin and volatility facets are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationPolicy {
    /// Return on the first failing facet without computing volatility.
    ShortCircuit,
    /// Compute every facet and report them together.
    #[default]
    FullEvaluation,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AggregationConfig {
    #[serde(default)]
    pub policy: AggregationPolicy,
}

// ── Helper Methods ─────────────────────────────────────────────────────────────

impl AssessmentConfig {
    /// Load configuration from the file named by PERFUMEME_CONFIG.
    /// Falls back to built-in defaults when the variable is unset.
    pub fn load() -> anyhow::Result<Self> {
        let Ok(path) = std::env::var("PERFUMEME_CONFIG") else {
            tracing::debug!("PERFUMEME_CONFIG not set, using built-in defaults");
            return Ok(Self::default());
        };

        if !Path::new(&path).exists() {
            anyhow::bail!("Config file not found: {}", path);
        }

        let config = match Path::new(&path).extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&path)?,
            Some("json") => Self::from_json(&path)?,
            Some("toml") => Self::from_toml(&path)?,
            other => anyhow::bail!("Unsupported config extension: {:?}", other),
        };
        Ok(config)
    }

    /// Load from YAML file
    pub fn from_yaml(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.checked(path)
    }

    /// Load from JSON file
    pub fn from_json(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.checked(path)
    }

    /// Load from TOML file
    pub fn from_toml(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.checked(path)
    }

    fn checked(self, path: &str) -> anyhow::Result<Self> {
        if let Err(e) = self.validate() {
            tracing::warn!(path, error = %e, "rejecting assessment configuration");
            return Err(e.into());
        }
        Ok(self)
    }

    /// Save to YAML file
    pub fn to_yaml(&self, path: &str) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject values the model cannot work with.
    pub fn validate(&self) -> crate::Result<()> {
        let m = &self.model;
        let finite = [
            self.extraction.default_reference_temperature_c,
            m.gas_constant,
            m.evaporation_k,
            m.fallback_k,
            m.fallback_boiling_point_scale,
            m.horizon_hours,
            m.ramp_start_k,
            m.ramp_end_k,
            m.skin_temperature_c,
            m.correction_coefficient,
        ];
        if finite.iter().any(|v| !v.is_finite()) {
            return Err(PerfumemeError::Config("non-finite model constant".into()));
        }
        if m.gas_constant <= 0.0 || m.fallback_boiling_point_scale <= 0.0 {
            return Err(PerfumemeError::Config(
                "gas constant and fallback scale must be positive".into(),
            ));
        }
        if m.samples < 2 {
            return Err(PerfumemeError::Config(format!(
                "at least 2 samples required, got {}",
                m.samples
            )));
        }
        if m.horizon_hours <= 0.0 {
            return Err(PerfumemeError::Config("horizon must be positive".into()));
        }
        if m.ramp_start_k <= 0.0 || m.ramp_end_k < m.ramp_start_k {
            return Err(PerfumemeError::Config(format!(
                "invalid temperature ramp {}K..{}K",
                m.ramp_start_k, m.ramp_end_k
            )));
        }

        let c = &self.classification;
        let ordered = c.base_min <= c.heart_above
            && c.heart_above <= c.top_above
            && c.top_above <= c.too_volatile_above
            && c.boiling_top_below <= c.boiling_heart_max;
        if !ordered {
            return Err(PerfumemeError::Config("threshold bands are not ordered".into()));
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AssessmentConfig::default();
        assert_eq!(config.extraction.default_reference_temperature_c, 25.0);
        assert_eq!(config.model.samples, 300);
        assert_eq!(config.classification.top_above, 10.0);
        assert_eq!(config.aggregation.policy, AggregationPolicy::FullEvaluation);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "aggregation:\n  policy: short_circuit\nclassification:\n  top_above: 12.5\n";
        let config: AssessmentConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.aggregation.policy, AggregationPolicy::ShortCircuit);
        assert_eq!(config.classification.top_above, 12.5);
        assert_eq!(config.classification.too_volatile_above, 100.0);
        assert_eq!(config.model.gas_constant, 8.314);
    }

    #[test]
    fn test_toml_file_roundtrip() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[model]\nsamples = 500\n\n[extraction]\ndefault_reference_temperature_c = 20.0").unwrap();
        let config = AssessmentConfig::from_toml(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.model.samples, 500);
        assert_eq!(config.extraction.default_reference_temperature_c, 20.0);
    }

    #[test]
    fn test_yaml_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assessment.yaml");
        let path = path.to_str().unwrap();
        let mut config = AssessmentConfig::default();
        config.aggregation.policy = AggregationPolicy::ShortCircuit;
        config.to_yaml(path).unwrap();
        let parsed = AssessmentConfig::from_yaml(path).unwrap();
        assert_eq!(parsed.aggregation.policy, AggregationPolicy::ShortCircuit);
    }

    // Every PERFUMEME_CONFIG branch lives in this one test so no other test
    // observes the variable while it is set.
    #[test]
    fn test_load_from_env() {
        std::env::remove_var("PERFUMEME_CONFIG");
        let config = AssessmentConfig::load().unwrap();
        assert_eq!(config.aggregation.policy, AggregationPolicy::FullEvaluation);

        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.yaml");
        std::env::set_var("PERFUMEME_CONFIG", &missing);
        let err = AssessmentConfig::load().unwrap_err();
        assert!(err.to_string().contains("Config file not found"));

        let ini = dir.path().join("assessment.ini");
        std::fs::write(&ini, "policy = short_circuit").unwrap();
        std::env::set_var("PERFUMEME_CONFIG", &ini);
        let err = AssessmentConfig::load().unwrap_err();
        assert!(err.to_string().contains("Unsupported config extension"));

        let yaml = dir.path().join("assessment.yml");
        std::fs::write(&yaml, "aggregation:\n  policy: short_circuit\n").unwrap();
        std::env::set_var("PERFUMEME_CONFIG", &yaml);
        let config = AssessmentConfig::load().unwrap();
        assert_eq!(config.aggregation.policy, AggregationPolicy::ShortCircuit);

        let json = dir.path().join("assessment.json");
        std::fs::write(&json, r#"{"classification": {"top_above": 12.0}}"#).unwrap();
        std::env::set_var("PERFUMEME_CONFIG", &json);
        let config = AssessmentConfig::load().unwrap();
        assert_eq!(config.classification.top_above, 12.0);

        let toml = dir.path().join("assessment.toml");
        std::fs::write(&toml, "[model]\nsamples = 120\n").unwrap();
        std::env::set_var("PERFUMEME_CONFIG", &toml);
        let config = AssessmentConfig::load().unwrap();
        assert_eq!(config.model.samples, 120);

        std::fs::write(&toml, "[model]\nsamples = 1\n").unwrap();
        assert!(AssessmentConfig::load().is_err());

        std::env::remove_var("PERFUMEME_CONFIG");
    }

    #[test]
    fn test_unordered_bands_rejected() {
        let mut config = AssessmentConfig::default();
        config.classification.heart_above = 50.0;
        assert!(matches!(config.validate(), Err(PerfumemeError::Config(_))));
    }

    #[test]
    fn test_single_sample_rejected() {
        let mut config = AssessmentConfig::default();
        config.model.samples = 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_json_file_rejected() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        writeln!(file, r#"{{"model": {{"ramp_start_k": 320.0, "ramp_end_k": 300.0}}}}"#).unwrap();
        assert!(AssessmentConfig::from_json(file.path().to_str().unwrap()).is_err());
    }
}
