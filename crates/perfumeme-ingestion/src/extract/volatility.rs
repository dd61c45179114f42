//! Volatility data: enthalpy of vaporization, vapor pressure, boiling point.
//!
//! The three searches are independent; a miss in one leaves only that field
//! unset. Values are returned as parsed. Domain checks (positivity, finiteness)
//! belong to the model that consumes them.

use tracing::debug;

use crate::models::{PhysicalQuantity, Section};
use crate::normalise::{parse_boiling_point, parse_enthalpy, parse_pressure, TemperatureScale};
use crate::search::{find_sections, heading_contains_any};

pub const ENTHALPY_KEYWORDS: &[&str] = &[
    "enthalpy",
    "heat",
    "vaporization",
    "vaporisation",
    "evaporation",
];
pub const VAPOR_PRESSURE_KEYWORDS: &[&str] = &["vapor pressure", "vapour pressure"];
pub const BOILING_POINT_KEYWORDS: &[&str] = &["boiling point"];

/// Enthalpy of vaporization in J/mol. Every value string of every matching
/// section is scanned; the last match in traversal order is kept.
pub fn extract_enthalpy(sections: &[Section]) -> Option<f64> {
    let mut found = None;
    for section in find_sections(sections, heading_contains_any(ENTHALPY_KEYWORDS)) {
        for text in section.value_strings() {
            if let Some(j_per_mol) = parse_enthalpy(text) {
                debug!(heading = %section.heading, j_per_mol, "enthalpy candidate");
                found = Some(j_per_mol);
            }
        }
    }
    found
}

/// Vapor pressure in mmHg with its reference temperature.
///
/// Only the first string of each entry is read; the last entry that parses,
/// in traversal order, is kept. A missing reference temperature is set to
/// `default_reference_c`.
pub fn extract_vapor_pressure(
    sections: &[Section],
    default_reference_c: f64,
) -> Option<PhysicalQuantity> {
    let mut found = None;
    for section in find_sections(sections, heading_contains_any(VAPOR_PRESSURE_KEYWORDS)) {
        for entry in &section.information {
            let parsed = entry.value_strings.first().and_then(|s| parse_pressure(s));
            if let Some(mut quantity) = parsed {
                quantity.reference_temperature_c =
                    quantity.reference_temperature_c.or(Some(default_reference_c));
                debug!(heading = %section.heading, pressure = %quantity, "vapor pressure candidate");
                found = Some(quantity);
            }
        }
    }
    found
}

/// Boiling point in Celsius.
///
/// Only the first string of each entry is read. The first Fahrenheit-reported
/// value wins outright. Celsius values are only a fallback: the last one seen
/// is returned when no Fahrenheit value exists.
pub fn extract_boiling_point(sections: &[Section]) -> Option<f64> {
    let mut celsius_fallback = None;
    for section in find_sections(sections, heading_contains_any(BOILING_POINT_KEYWORDS)) {
        for entry in &section.information {
            let Some(reading) = entry.value_strings.first().and_then(|s| parse_boiling_point(s))
            else {
                continue;
            };
            match reading.scale {
                TemperatureScale::Fahrenheit => {
                    debug!(celsius = reading.celsius, "boiling point from Fahrenheit reading");
                    return Some(reading.celsius);
                }
                TemperatureScale::Celsius => celsius_fallback = Some(reading.celsius),
            }
        }
    }
    if let Some(celsius) = celsius_fallback {
        debug!(celsius, "boiling point from Celsius reading");
    }
    celsius_fallback
}
