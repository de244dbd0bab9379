use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Namespace used when a symbol is given without one.
pub const DEFAULT_NS: &str = "clojure.core";

/// Canonical `namespace/name` identifier of one documented symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolKey {
    pub ns: String,
    pub name: String,
}

impl SymbolKey {
    pub fn new(ns: impl Into<String>, name: impl Into<String>) -> Self {
        SymbolKey {
            ns: ns.into(),
            name: name.into(),
        }
    }

    /// Accepts `ns/name` or a bare `name`. Splits at the first `/` so that
    /// `clojure.core//` resolves to the symbol named `/`.
    pub fn parse(input: &str, default_ns: &str) -> Self {
        match input.split_once('/') {
            Some((ns, name)) if !ns.is_empty() && !name.is_empty() => SymbolKey::new(ns, name),
            _ => SymbolKey::new(default_ns, input),
        }
    }

    pub fn canonical(&self) -> String {
        canonical_key(&self.ns, &self.name)
    }
}

impl fmt::Display for SymbolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.ns, self.name)
    }
}

pub fn canonical_key(ns: &str, name: &str) -> String {
    format!("{}/{}", ns, name)
}

// Field declaration order is the serialized order. Do not reorder.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Example {
    pub function: String,
    pub ns: String,
    pub library: String,
    pub library_version: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Comment {
    pub function: String,
    pub ns: String,
    pub library: String,
    pub library_version: String,
    pub author: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SeeAlso {
    pub name: String,
    #[serde(default)]
    pub url_friendly_name: String,
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub library_version: String,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
    #[serde(default)]
    pub ns: Option<String>,
    #[serde(default)]
    pub weight: i64,
    #[serde(default)]
    pub line: Option<u32>,
    /// Argument lists of the target, e.g. `["[f coll]", "[f c1 c2]"]`.
    #[serde(default)]
    pub arglists: Vec<String>,
}

impl SeeAlso {
    /// `ns/name` when the target namespace is known, the bare name otherwise.
    pub fn display_name(&self) -> String {
        match &self.ns {
            Some(ns) if !ns.is_empty() => canonical_key(ns, &self.name),
            _ => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NameRecord {
    pub name: String,
    pub ns: String,
    pub href: String,
    pub id: i64,
    #[serde(default)]
    pub see_alsos: Vec<SeeAlso>,
    #[serde(default)]
    pub examples: Vec<Example>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl NameRecord {
    pub fn key(&self) -> SymbolKey {
        SymbolKey::new(self.ns.clone(), self.name.clone())
    }

    /// Sort nested collections into their canonical order: examples and
    /// comments by creation time, see-alsos by target name. Sorts are
    /// stable so equal timestamps keep their relative order.
    pub fn canonicalize(&mut self) {
        self.see_alsos.sort_by(|a, b| a.name.cmp(&b.name));
        self.examples.sort_by_key(|e| e.created_at);
        self.comments.sort_by_key(|c| c.created_at);
    }

    /// Whether [`canonicalize`](Self::canonicalize) would leave this record unchanged.
    pub fn is_canonical(&self) -> bool {
        self.see_alsos.is_sorted_by(|a, b| a.name <= b.name)
            && self.examples.is_sorted_by_key(|e| e.created_at)
            && self.comments.is_sorted_by_key(|c| c.created_at)
    }
}

/// A timestamped capture of documentation metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Snapshot {
    /// Where the snapshot was read from. Assigned on load, never persisted.
    #[serde(skip)]
    pub source: String,
    pub captured_at: String,
    pub records: BTreeMap<String, NameRecord>,
}

impl Snapshot {
    pub fn new(source: impl Into<String>, captured_at: impl Into<String>) -> Self {
        Snapshot {
            source: source.into(),
            captured_at: captured_at.into(),
            records: BTreeMap::new(),
        }
    }

    /// Insert a record under its canonical key. A record already stored
    /// under the same key is replaced.
    pub fn insert(&mut self, record: NameRecord) -> Option<NameRecord> {
        self.records.insert(record.key().canonical(), record)
    }

    pub fn canonicalize(&mut self) {
        for record in self.records.values_mut() {
            record.canonicalize();
        }
    }

    pub fn is_canonical(&self) -> bool {
        self.records.values().all(NameRecord::is_canonical)
    }
}
