//! Unit normalisation.
//!
//! Maps free-text quantity mentions from compound documents to canonical
//! units: pressures in mmHg, temperatures in °C, enthalpies in J/mol.

pub mod units;

pub use units::{
    parse_boiling_point, parse_enthalpy, parse_pressure, parse_temperature,
    BoilingPointReading, TemperatureScale,
};
