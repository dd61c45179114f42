//! perfumeme-ingestion — compound documents, unit normalisation and property extraction.

pub mod models;
pub mod document;
pub mod search;
pub mod normalise;
pub mod extract;
pub mod sources;

pub use document::descriptions_from_json;
pub use extract::{extract_properties, ExtractionResult};
pub use models::{CompoundId, CompoundRecord, InformationEntry, PhysicalQuantity, Section, Unit};
