//! Data models for compound documents and normalised quantities.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Resolved database identifier for one compound (PubChem CID).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompoundId(pub u64);

impl fmt::Display for CompoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One free-text value block attached to a section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InformationEntry {
    pub value_strings: Vec<String>,
}

impl InformationEntry {
    pub fn new<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self {
            value_strings: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// A headed node in the compound document tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub heading: String,
    #[serde(default)]
    pub information: Vec<InformationEntry>,
    #[serde(default)]
    pub children: Vec<Section>,
}

impl Section {
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            information: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Attach a single-string information entry.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        let value: String = value.into();
        self.information.push(InformationEntry::new([value]));
        self
    }

    pub fn with_child(mut self, child: Section) -> Self {
        self.children.push(child);
        self
    }

    /// Every value string of every entry, in document order.
    pub fn value_strings(&self) -> impl Iterator<Item = &str> {
        self.information
            .iter()
            .flat_map(|entry| entry.value_strings.iter().map(String::as_str))
    }
}

/// Nested property document for one compound: an ordered forest of sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompoundRecord {
    pub sections: Vec<Section>,
}

impl CompoundRecord {
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }
}

/// Canonical units after normalisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    MmHg,
    Celsius,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::MmHg    => "mmHg",
            Unit::Celsius => "°C",
        }
    }
}

/// A normalised physical quantity. Pressures are always mmHg,
/// temperatures always Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalQuantity {
    pub value: f64,
    pub unit: Unit,
    pub reference_temperature_c: Option<f64>,
}

impl PhysicalQuantity {
    pub fn pressure_mmhg(value: f64, reference_temperature_c: Option<f64>) -> Self {
        Self { value, unit: Unit::MmHg, reference_temperature_c }
    }

    pub fn celsius(value: f64) -> Self {
        Self { value, unit: Unit::Celsius, reference_temperature_c: None }
    }
}

impl fmt::Display for PhysicalQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit.as_str())?;
        if let Some(t) = self.reference_temperature_c {
            write!(f, " at {} °C", t)?;
        }
        Ok(())
    }
}
