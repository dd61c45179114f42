//! Adapter from PubChem JSON payloads to the section-tree model.
//!
//! Two shapes are handled:
//! - PUG-View records: `{"Record": {"Section": [{"TOCHeading", "Information", "Section"}]}}`
//! - PUG-REST descriptions: `{"InformationList": {"Information": [{"Description"}]}}`
//!
//! Both are pure conversions over text that has already been fetched.

use perfumeme_common::Result;
use serde::Deserialize;

use crate::models::{CompoundRecord, InformationEntry, Section};

#[derive(Debug, Deserialize)]
struct PugViewEnvelope {
    #[serde(rename = "Record", default)]
    record: PugViewRecord,
}

#[derive(Debug, Default, Deserialize)]
struct PugViewRecord {
    #[serde(rename = "Section", default)]
    sections: Vec<PugViewSection>,
}

#[derive(Debug, Deserialize)]
struct PugViewSection {
    #[serde(rename = "TOCHeading", default)]
    heading: String,
    #[serde(rename = "Information", default)]
    information: Vec<PugViewInformation>,
    #[serde(rename = "Section", default)]
    sections: Vec<PugViewSection>,
}

#[derive(Debug, Deserialize)]
struct PugViewInformation {
    #[serde(rename = "Value", default)]
    value: PugViewValue,
}

#[derive(Debug, Default, Deserialize)]
struct PugViewValue {
    #[serde(rename = "StringWithMarkup", default)]
    strings: Vec<StringWithMarkup>,
    #[serde(rename = "Number", default)]
    numbers: Vec<f64>,
    #[serde(rename = "Unit")]
    unit: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StringWithMarkup {
    #[serde(rename = "String", default)]
    string: String,
}

#[derive(Debug, Deserialize)]
struct DescriptionEnvelope {
    #[serde(rename = "InformationList", default)]
    list: DescriptionList,
}

#[derive(Debug, Default, Deserialize)]
struct DescriptionList {
    #[serde(rename = "Information", default)]
    information: Vec<DescriptionItem>,
}

#[derive(Debug, Deserialize)]
struct DescriptionItem {
    #[serde(rename = "Description")]
    description: Option<String>,
}

impl From<PugViewSection> for Section {
    fn from(raw: PugViewSection) -> Self {
        Section {
            heading: raw.heading,
            information: raw.information.into_iter().map(|i| i.value.into()).collect(),
            children: raw.sections.into_iter().map(Section::from).collect(),
        }
    }
}

impl From<PugViewValue> for InformationEntry {
    /// Numeric values are rendered back to text ("78.2 °C") so the
    /// extractors see one uniform free-text representation.
    fn from(value: PugViewValue) -> Self {
        let mut value_strings: Vec<String> =
            value.strings.into_iter().map(|s| s.string).collect();
        let unit = value.unit.unwrap_or_default();
        value_strings.extend(value.numbers.into_iter().map(|n| {
            if unit.is_empty() {
                n.to_string()
            } else {
                format!("{} {}", n, unit)
            }
        }));
        InformationEntry { value_strings }
    }
}

impl CompoundRecord {
    /// Parse a PUG-View compound record.
    pub fn from_pug_view_json(json: &str) -> Result<Self> {
        let envelope: PugViewEnvelope = serde_json::from_str(json)?;
        Ok(Self::from_envelope(envelope))
    }

    /// Same as [`CompoundRecord::from_pug_view_json`] for an already-decoded value.
    pub fn from_pug_view_value(value: serde_json::Value) -> Result<Self> {
        let envelope: PugViewEnvelope = serde_json::from_value(value)?;
        Ok(Self::from_envelope(envelope))
    }

    fn from_envelope(envelope: PugViewEnvelope) -> Self {
        CompoundRecord {
            sections: envelope.record.sections.into_iter().map(Section::from).collect(),
        }
    }
}

/// Extract the natural-language descriptions from a PUG-REST description payload.
/// Title-only items (no `Description`) are skipped.
pub fn descriptions_from_json(json: &str) -> Result<Vec<String>> {
    let envelope: DescriptionEnvelope = serde_json::from_str(json)?;
    Ok(envelope
        .list
        .information
        .into_iter()
        .filter_map(|item| item.description)
        .collect())
}
