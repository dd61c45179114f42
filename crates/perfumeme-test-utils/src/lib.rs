//! Shared fixtures for perfumeme tests.
//!
//! Builders produce PubChem-shaped JSON (`serde_json::Value`) so each crate's
//! tests exercise the real document adapter instead of hand-built trees.

use serde_json::{json, Value};

pub use pretty_assertions;

// ── PUG-View building blocks ──────────────────────────────────────────────────

/// A PUG-View section with string values and child sections.
pub fn section(heading: &str, values: &[&str], children: Vec<Value>) -> Value {
    let information: Vec<Value> = values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            json!({
                "ReferenceNumber": i + 1,
                "Value": { "StringWithMarkup": [{ "String": v }] }
            })
        })
        .collect();
    json!({
        "TOCHeading": heading,
        "Information": information,
        "Section": children,
    })
}

/// A PUG-View section whose single value is numeric with a unit.
pub fn numeric_section(heading: &str, number: f64, unit: &str) -> Value {
    json!({
        "TOCHeading": heading,
        "Information": [{ "Value": { "Number": [number], "Unit": unit } }],
    })
}

/// Wrap top-level sections in a PUG-View record envelope.
pub fn record(cid: u64, sections: Vec<Value>) -> Value {
    json!({
        "Record": {
            "RecordType": "CID",
            "RecordNumber": cid,
            "Section": sections,
        }
    })
}

/// Experimental-properties subtree under "Chemical and Physical Properties".
pub fn physical_properties(properties: Vec<Value>) -> Value {
    section(
        "Chemical and Physical Properties",
        &[],
        vec![section("Experimental Properties", &[], properties)],
    )
}

/// A PUG-REST description payload. `None` entries are title-only items.
pub fn descriptions(cid: u64, items: &[Option<&str>]) -> Value {
    let information: Vec<Value> = items
        .iter()
        .map(|item| match item {
            Some(text) => json!({ "CID": cid, "Description": text }),
            None => json!({ "CID": cid, "Title": "Compound" }),
        })
        .collect();
    json!({ "InformationList": { "Information": information } })
}

// ── Compound fixtures ─────────────────────────────────────────────────────────

/// Only a boiling point, reported in Celsius.
pub fn boiling_point_only_record() -> Value {
    record(
        637566,
        vec![physical_properties(vec![section("Boiling Point", &["198 °C"], vec![])])],
    )
}

/// Linalool-like: enthalpy, vapor pressure, boiling point, skin toxicity.
pub fn linalool_record() -> Value {
    record(
        6549,
        vec![
            section("Names and Identifiers", &[], vec![section("Synonyms", &["Linalol"], vec![])]),
            physical_properties(vec![
                section("Boiling Point", &["198 °C", "388 °F at 760 mm Hg"], vec![]),
                section("Vapor Pressure", &["0.16 mm Hg at 23.5 °C"], vec![]),
                section("Enthalpy of Vaporization", &["58.4 kJ/mol"], vec![]),
            ]),
            section(
                "Safety and Hazards",
                &[],
                vec![section(
                    "Hazards Identification",
                    &[],
                    vec![section("Skin Sensitization", &["May cause an allergic skin reaction."], vec![])],
                )],
            ),
        ],
    )
}

/// Volatile solvent: vapor pressure far above the top-note band.
pub fn diethyl_ether_record() -> Value {
    record(
        3283,
        vec![
            physical_properties(vec![
                section("Vapor Pressure", &["71.7 kPa at 25 °C"], vec![]),
                section("Boiling Point", &["34.6 °C"], vec![]),
            ]),
            section("Toxicity", &[], vec![section("Dermal Toxicity", &["LD50 rabbit > 20 ml/kg"], vec![])]),
        ],
    )
}

/// Enthalpy and boiling point but no vapor pressure.
pub fn enthalpy_without_vapor_pressure_record() -> Value {
    record(
        8842,
        vec![
            physical_properties(vec![
                section("Heat of Vaporization", &["41.0 kJ/mol"], vec![]),
                section("Boiling Point", &["225 °C"], vec![]),
            ]),
            section("Toxicity", &[], vec![section("Skin", &["Mild irritant"], vec![])]),
        ],
    )
}

pub fn odorous_descriptions(cid: u64) -> Value {
    descriptions(
        cid,
        &[None, Some("A monoterpenoid with a pleasant floral odor, used in fragrances.")],
    )
}

pub fn odorless_descriptions(cid: u64) -> Value {
    descriptions(cid, &[None, Some("A colourless crystalline solid.")])
}
