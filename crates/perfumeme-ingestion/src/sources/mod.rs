//! Collaborator interfaces: where records, identifiers and odor notes come from.
//!
//! The engine never performs I/O itself. Network clients, caches and
//! spreadsheets plug in behind these traits; [`memory`] provides the
//! in-memory implementations used by tests and embedders.

pub mod memory;

use perfumeme_common::Result;

use crate::models::{CompoundId, CompoundRecord};

pub use memory::{InMemoryRecordSource, InMemoryResolver, OdorNoteTable};

/// Supplies compound documents for resolved identifiers.
pub trait RecordSource: Send + Sync {
    /// Full nested property document.
    ///
    /// A retrieval failure is `PerfumemeError::FetchFailed`; a record that
    /// exists but carries no relevant sections is `Ok` with those sections
    /// missing.
    fn fetch_record(&self, id: CompoundId) -> Result<CompoundRecord>;

    /// Natural-language descriptions. No descriptions is `Ok(vec![])`.
    fn fetch_descriptions(&self, id: CompoundId) -> Result<Vec<String>>;
}

/// Maps a common name or a structure string to a database identifier.
pub trait IdentifierResolver: Send + Sync {
    /// Unknown input is `PerfumemeError::UnresolvedIdentifier`.
    fn resolve(&self, name_or_structure: &str) -> Result<CompoundId>;
}

/// Read-only table of known odor notes, keyed by compound name.
pub trait OdorNoteSource: Send + Sync {
    fn lookup_known_odor_notes(&self, name: &str) -> Option<Vec<String>>;
}
