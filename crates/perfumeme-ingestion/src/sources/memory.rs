//! In-memory collaborator implementations.

use std::collections::HashMap;

use perfumeme_common::{PerfumemeError, Result};

use super::{IdentifierResolver, OdorNoteSource, RecordSource};
use crate::models::{CompoundId, CompoundRecord};

fn normalise_name(name: &str) -> String {
    name.trim().to_lowercase()
}

// ── Record Source ─────────────────────────────────────────────────────────────

/// Records and descriptions held in maps, with optional injected failures.
pub struct InMemoryRecordSource {
    records: HashMap<CompoundId, CompoundRecord>,
    descriptions: HashMap<CompoundId, Vec<String>>,
    failures: HashMap<CompoundId, String>,
}

impl InMemoryRecordSource {
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
            descriptions: HashMap::new(),
            failures: HashMap::new(),
        }
    }

    pub fn with_record(mut self, id: CompoundId, record: CompoundRecord) -> Self {
        self.records.insert(id, record);
        self
    }

    pub fn with_descriptions<S: Into<String>>(
        mut self,
        id: CompoundId,
        descriptions: impl IntoIterator<Item = S>,
    ) -> Self {
        self.descriptions
            .insert(id, descriptions.into_iter().map(Into::into).collect());
        self
    }

    /// Every fetch for `id` fails with `reason`.
    pub fn with_failure(mut self, id: CompoundId, reason: &str) -> Self {
        self.failures.insert(id, reason.to_string());
        self
    }

    fn check_failure(&self, id: CompoundId) -> Result<()> {
        match self.failures.get(&id) {
            Some(reason) => Err(PerfumemeError::FetchFailed {
                identifier: id.to_string(),
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl Default for InMemoryRecordSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordSource for InMemoryRecordSource {
    fn fetch_record(&self, id: CompoundId) -> Result<CompoundRecord> {
        self.check_failure(id)?;
        self.records
            .get(&id)
            .cloned()
            .ok_or_else(|| PerfumemeError::FetchFailed {
                identifier: id.to_string(),
                reason: "record not found".to_string(),
            })
    }

    fn fetch_descriptions(&self, id: CompoundId) -> Result<Vec<String>> {
        self.check_failure(id)?;
        Ok(self.descriptions.get(&id).cloned().unwrap_or_default())
    }
}

// ── Identifier Resolver ───────────────────────────────────────────────────────

/// Names match case-insensitively after trimming; structure strings are
/// opaque and match verbatim.
pub struct InMemoryResolver {
    names: HashMap<String, CompoundId>,
    structures: HashMap<String, CompoundId>,
}

impl InMemoryResolver {
    pub fn new() -> Self {
        Self {
            names: HashMap::new(),
            structures: HashMap::new(),
        }
    }

    pub fn with_name(mut self, name: &str, id: CompoundId) -> Self {
        self.names.insert(normalise_name(name), id);
        self
    }

    pub fn with_structure(mut self, structure: &str, id: CompoundId) -> Self {
        self.structures.insert(structure.to_string(), id);
        self
    }
}

impl Default for InMemoryResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentifierResolver for InMemoryResolver {
    fn resolve(&self, name_or_structure: &str) -> Result<CompoundId> {
        self.structures
            .get(name_or_structure)
            .or_else(|| self.names.get(&normalise_name(name_or_structure)))
            .copied()
            .ok_or_else(|| PerfumemeError::UnresolvedIdentifier(name_or_structure.to_string()))
    }
}

// ── Odor Notes ────────────────────────────────────────────────────────────────

/// Known odor notes stored the way the source dataset writes them:
/// one semicolon-separated string per compound ("floral;rose;fresh").
pub struct OdorNoteTable {
    notes: HashMap<String, String>,
}

impl OdorNoteTable {
    pub fn new() -> Self {
        Self {
            notes: HashMap::new(),
        }
    }

    pub fn with(mut self, name: &str, notes: &str) -> Self {
        self.notes.insert(normalise_name(name), notes.to_string());
        self
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

impl Default for OdorNoteTable {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: AsRef<str>, V: AsRef<str>> FromIterator<(N, V)> for OdorNoteTable {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |table, (name, notes)| table.with(name.as_ref(), notes.as_ref()))
    }
}

impl OdorNoteSource for OdorNoteTable {
    fn lookup_known_odor_notes(&self, name: &str) -> Option<Vec<String>> {
        let raw = self.notes.get(&normalise_name(name))?;
        let notes: Vec<String> = raw
            .split(';')
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .collect();
        (!notes.is_empty()).then_some(notes)
    }
}
