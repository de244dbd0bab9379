use super::codec;
use super::types::{Comment, Example, NameRecord, SeeAlso, Snapshot, canonical_key};
use crate::error::Result;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// The active snapshot, indexed for constant-time lookups.
///
/// Only [`DocsIndex::replace`] mutates it, and it swaps the whole index in
/// a single assignment.
#[derive(Debug, Default)]
pub struct DocsIndex {
    source: String,
    captured_at: String,
    /// Records in canonical key order
    records: Vec<(String, NameRecord)>,
    /// Map from canonical key to position in `records`
    by_key: HashMap<String, usize>,
}

/// Describes which snapshot is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveMeta {
    pub source: String,
    pub captured_at: String,
    pub record_count: usize,
}

/// Examples of one symbol together with its canonical URL.
#[derive(Debug, Clone, Copy)]
pub struct ExamplesView<'a> {
    pub examples: &'a [Example],
    pub url: Option<&'a str>,
}

impl DocsIndex {
    /// Build an index from a snapshot. Records come out of the snapshot's
    /// `BTreeMap` already in canonical key order.
    pub fn build(snapshot: Snapshot) -> Self {
        let mut records = Vec::with_capacity(snapshot.records.len());
        let mut by_key = HashMap::with_capacity(snapshot.records.len());

        for (idx, (key, record)) in snapshot.records.into_iter().enumerate() {
            by_key.insert(key.clone(), idx);
            records.push((key, record));
        }

        DocsIndex {
            source: snapshot.source,
            captured_at: snapshot.captured_at,
            records,
            by_key,
        }
    }

    /// Swap the active index for `snapshot`.
    pub fn replace(&mut self, snapshot: Snapshot) {
        let next = DocsIndex::build(snapshot);
        *self = next;
        info!(
            source = %self.source,
            records = self.records.len(),
            "snapshot activated"
        );
    }

    /// Load a snapshot from disk and activate it. On failure the current
    /// index stays active.
    pub fn load_snapshot(&mut self, path: &Path) -> Result<(usize, String)> {
        let snapshot = codec::load(path)?;
        let count = snapshot.records.len();
        let captured_at = snapshot.captured_at.clone();
        self.replace(snapshot);
        Ok((count, captured_at))
    }

    pub fn lookup(&self, ns: &str, name: &str) -> Option<&NameRecord> {
        self.by_key
            .get(&canonical_key(ns, name))
            .map(|idx| &self.records[*idx].1)
    }

    /// All records in canonical key order.
    pub fn all_records(&self) -> impl Iterator<Item = (&str, &NameRecord)> {
        self.records.iter().map(|(key, record)| (key.as_str(), record))
    }

    pub fn active_meta(&self) -> ActiveMeta {
        ActiveMeta {
            source: self.source.clone(),
            captured_at: self.captured_at.clone(),
            record_count: self.records.len(),
        }
    }

    pub fn examples(&self, ns: &str, name: &str) -> ExamplesView<'_> {
        match self.lookup(ns, name) {
            Some(record) => ExamplesView {
                examples: &record.examples,
                url: Some(&record.href),
            },
            None => ExamplesView {
                examples: &[],
                url: None,
            },
        }
    }

    pub fn comments(&self, ns: &str, name: &str) -> &[Comment] {
        self.lookup(ns, name)
            .map(|r| r.comments.as_slice())
            .unwrap_or_default()
    }

    pub fn see_also(&self, ns: &str, name: &str) -> &[SeeAlso] {
        self.lookup(ns, name)
            .map(|r| r.see_alsos.as_slice())
            .unwrap_or_default()
    }

}
