//! Free-text physical quantity normalisation.
//!
//! Grammar, case-insensitive and whitespace-tolerant:
//!
//! ```text
//! number      := (digits ["." digits] | "." digits) ["e" [sign] digits]
//!                [ ("x" | "×") "10" ["^"] [sign] digits ]
//! pressure    := [sign] number (mmHg | mm Hg | kPa | Pa)
//! temperature := "at" [sign] number ["°" | "deg"] (C | F)
//! boiling     := [sign] number ["°" | "deg"] (C | F)
//! enthalpy    := number (kJ | J) "/" mol
//! ```
//!
//! A number must start at the beginning of the text or after a character that
//! is not a digit, dot or comma. Every parser returns `None` on a miss,
//! including malformed numbers; callers treat that as "quantity not found" for
//! the entry and move on. Signs are kept: rejecting a negative pressure is the
//! volatility model's job.
//!
//! # Example
//! ```
//! use perfumeme_ingestion::normalise::units::{parse_pressure, parse_temperature};
//!
//! let p = parse_pressure("101.325 kPa").unwrap();
//! assert!((p.value - 760.0).abs() < 0.01);
//! assert!((parse_temperature("at 77 F").unwrap() - 25.0).abs() < 1e-9);
//! ```

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::models::PhysicalQuantity;

/// mmHg per kPa.
pub const MMHG_PER_KPA: f64 = 7.50062;
/// Pa per mmHg.
pub const PA_PER_MMHG: f64 = 133.322;

const MANTISSA: &str = r"(?:\d+(?:\.\d*)?|\.\d+)(?:e[-+]?\d+)?";
const TIMES_TEN: &str = r"(?:\s*[x×]\s*10\s*\^?\s*([-+−]?\d+))?";
// A number starts at the beginning of the text or after anything but a digit,
// dot or comma, so "1.2.3" and "2,340" are never read from their tail and a
// sign after a digit ("173-175") is a range separator.
const NUMBER_START: &str = r"(?:^|[^\d.,])";
const DEGREE: &str = r"(?:°|º|deg(?:rees)?\.?)?";

fn pressure_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(
            r"(?i){NUMBER_START}([-+−]?{MANTISSA}){TIMES_TEN}\s*(mm\s*hg|kpa|pa)\b"
        ))
        .unwrap()
    })
}

fn temperature_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(
            r"(?i)\bat\s+([-+−]?{MANTISSA}){TIMES_TEN}\s*{DEGREE}\s*(c(?:elsius)?|f(?:ahrenheit)?)\b"
        ))
        .unwrap()
    })
}

fn boiling_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(
            r"(?i){NUMBER_START}([-+−]?{MANTISSA}){TIMES_TEN}\s*{DEGREE}\s*(c(?:elsius)?|f(?:ahrenheit)?)\b"
        ))
        .unwrap()
    })
}

fn enthalpy_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(r"(?i){NUMBER_START}({MANTISSA}){TIMES_TEN}\s*(kj|j)\s*/\s*mol")).unwrap()
    })
}

/// Parse the number held in capture groups 1 (mantissa, optional `e` exponent)
/// and 2 (optional `×10^n` exponent).
fn capture_number(caps: &Captures<'_>) -> Option<f64> {
    let mantissa: f64 = caps.get(1)?.as_str().replace('−', "-").parse().ok()?;
    let value = match caps.get(2) {
        Some(exp) => {
            let exp: i32 = exp.as_str().replace('−', "-").parse().ok()?;
            mantissa * 10f64.powi(exp)
        }
        None => mantissa,
    };
    value.is_finite().then_some(value)
}

/// Temperature scale a reading was reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemperatureScale {
    Celsius,
    Fahrenheit,
}

/// A boiling point, already converted to Celsius, with the scale it was reported in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoilingPointReading {
    pub celsius: f64,
    pub scale: TemperatureScale,
}

pub fn fahrenheit_to_celsius(f: f64) -> f64 {
    (f - 32.0) * 5.0 / 9.0
}

fn to_celsius(value: f64, unit: &str) -> (f64, TemperatureScale) {
    if unit.starts_with('f') || unit.starts_with('F') {
        (fahrenheit_to_celsius(value), TemperatureScale::Fahrenheit)
    } else {
        (value, TemperatureScale::Celsius)
    }
}

/// First pressure mention in `text`, converted to mmHg.
///
/// The reference temperature is filled from an "at T°C/F" suffix when the
/// text carries one; otherwise it is left unset for the caller to default.
pub fn parse_pressure(text: &str) -> Option<PhysicalQuantity> {
    let caps = pressure_regex().captures(text)?;
    let raw = capture_number(&caps)?;
    let unit: String = caps
        .get(3)?
        .as_str()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();
    let mmhg = match unit.as_str() {
        "mmhg" => raw,
        "kpa"  => raw * MMHG_PER_KPA,
        "pa"   => raw / PA_PER_MMHG,
        _ => return None,
    };
    Some(PhysicalQuantity::pressure_mmhg(mmhg, parse_temperature(text)))
}

/// Reference temperature from an "at T°C" / "at T F" phrase, in Celsius.
pub fn parse_temperature(text: &str) -> Option<f64> {
    let caps = temperature_regex().captures(text)?;
    let value = capture_number(&caps)?;
    Some(to_celsius(value, caps.get(3)?.as_str()).0)
}

/// Boiling point with an explicit Celsius or Fahrenheit marker.
///
/// A bare number with neither marker is ambiguous and yields `None`.
pub fn parse_boiling_point(text: &str) -> Option<BoilingPointReading> {
    let caps = boiling_regex().captures(text)?;
    let value = capture_number(&caps)?;
    let (celsius, scale) = to_celsius(value, caps.get(3)?.as_str());
    Some(BoilingPointReading { celsius, scale })
}

/// Enthalpy of vaporization in J/mol.
pub fn parse_enthalpy(text: &str) -> Option<f64> {
    let caps = enthalpy_regex().captures(text)?;
    let value = capture_number(&caps)?;
    let unit = caps.get(3)?.as_str().to_lowercase();
    Some(if unit == "kj" { value * 1000.0 } else { value })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Unit;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_kpa_to_mmhg() {
        let p = parse_pressure("101.325 kPa").unwrap();
        assert_eq!(p.unit, Unit::MmHg);
        assert!(close(p.value, 760.0, 0.01), "got {}", p.value);
    }

    #[test]
    fn test_pa_to_mmhg() {
        let p = parse_pressure("133.322 Pa").unwrap();
        assert!(close(p.value, 1.0, 0.01), "got {}", p.value);
    }

    #[test]
    fn test_mmhg_with_reference_temperature() {
        let p = parse_pressure("0.0263 mm Hg at 25 °C").unwrap();
        assert!(close(p.value, 0.0263, 1e-12));
        assert_eq!(p.reference_temperature_c, Some(25.0));
    }

    #[test]
    fn test_pressure_without_temperature_leaves_reference_unset() {
        let p = parse_pressure("0.5 mmHg").unwrap();
        assert_eq!(p.reference_temperature_c, None);
    }

    #[test]
    fn test_scientific_notation() {
        let p = parse_pressure("1.2e-3 mmHg").unwrap();
        assert!(close(p.value, 1.2e-3, 1e-15));
        let p = parse_pressure("VP: 4.5E+01 kPa").unwrap();
        assert!(close(p.value, 45.0 * MMHG_PER_KPA, 1e-9));
    }

    #[test]
    fn test_times_ten_notation() {
        let p = parse_pressure("3.7X10-2 mm Hg at 25 °C").unwrap();
        assert!(close(p.value, 0.037, 1e-12));
        let p = parse_pressure("2.1 x 10^-4 mmHg").unwrap();
        assert!(close(p.value, 2.1e-4, 1e-15));
    }

    #[test]
    fn test_malformed_numbers_are_miss() {
        assert!(parse_pressure("1.2.3 mmHg").is_none());
        assert!(parse_pressure("2,340 Pa").is_none());
        assert!(parse_enthalpy("1.40.5 kJ/mol").is_none());
    }

    #[test]
    fn test_signed_pressure_keeps_sign() {
        assert!(close(parse_pressure("-5 mmHg").unwrap().value, -5.0, 1e-12));
        assert!(close(parse_pressure("VP: −2 kPa").unwrap().value, -2.0 * MMHG_PER_KPA, 1e-9));
        // After a digit the dash separates a range.
        assert!(close(parse_pressure("10-20 mmHg").unwrap().value, 20.0, 1e-12));
    }

    #[test]
    fn test_unknown_unit_is_miss() {
        assert!(parse_pressure("0.5 atm").is_none());
        assert!(parse_pressure("1.3 hPa").is_none());
        assert!(parse_pressure("no data").is_none());
        assert!(parse_pressure("").is_none());
    }

    #[test]
    fn test_first_pressure_wins() {
        let p = parse_pressure("0.02 mmHg at 20 °C; 5 Pa at 30 °C").unwrap();
        assert!(close(p.value, 0.02, 1e-12));
    }

    #[test]
    fn test_fahrenheit_reference_temperature() {
        assert!(close(parse_temperature("at 77 F").unwrap(), 25.0, 0.01));
        assert!(close(parse_temperature("0.1 mmHg at 68 °F").unwrap(), 20.0, 0.01));
        assert!(close(parse_temperature("at 20 deg C").unwrap(), 20.0, 1e-12));
    }

    #[test]
    fn test_temperature_requires_at_phrase() {
        assert!(parse_temperature("25 °C").is_none());
        assert!(parse_temperature("at room temperature").is_none());
    }

    #[test]
    fn test_boiling_point_markers() {
        let c = parse_boiling_point("198 °C").unwrap();
        assert_eq!(c.scale, TemperatureScale::Celsius);
        assert!(close(c.celsius, 198.0, 1e-12));

        let bare = parse_boiling_point("230C at 760 mm Hg").unwrap();
        assert!(close(bare.celsius, 230.0, 1e-12));

        let f = parse_boiling_point("388 °F at 760 mm Hg (NTP, 1992)").unwrap();
        assert_eq!(f.scale, TemperatureScale::Fahrenheit);
        assert!(close(f.celsius, 197.777_777, 1e-5));

        let bare_f = parse_boiling_point("212 F").unwrap();
        assert!(close(bare_f.celsius, 100.0, 1e-12));
    }

    #[test]
    fn test_boiling_point_sign_and_range() {
        assert!(close(parse_boiling_point("-78.5 °C").unwrap().celsius, -78.5, 1e-12));
        assert!(close(parse_boiling_point("bp 173-175 °C").unwrap().celsius, 175.0, 1e-12));
    }

    #[test]
    fn test_boiling_point_without_marker_is_miss() {
        assert!(parse_boiling_point("198").is_none());
        assert!(parse_boiling_point("approximately 200 at 1 atm").is_none());
        assert!(parse_boiling_point("decomposes").is_none());
    }

    #[test]
    fn test_enthalpy_units() {
        assert!(close(parse_enthalpy("42.3 kJ/mol at 25 °C").unwrap(), 42_300.0, 1e-9));
        assert!(close(parse_enthalpy("Enthalpy: 38600 J/mol").unwrap(), 38_600.0, 1e-9));
        assert!(close(parse_enthalpy("40.5 KJ / MOL").unwrap(), 40_500.0, 1e-9));
        assert!(parse_enthalpy("42.3 kcal/mol").is_none());
    }

    #[test]
    fn test_conversion_constants() {
        assert!(close(MMHG_PER_KPA * 1000.0 / PA_PER_MMHG, 56.26, 0.01));
        assert!(close(fahrenheit_to_celsius(32.0), 0.0, 1e-12));
    }
}
