//! Assemble a new snapshot from a documentation source and persist it.

use crate::docs::{Comment, DocsIndex, Example, NameRecord, SeeAlso, Snapshot, SymbolKey, codec};
use crate::error::Result;
use crate::search::Query;
use chrono::Local;
use std::path::Path;
use tracing::{debug, info};

/// One symbol as listed by a [`DocSource`].
#[derive(Debug, Clone, PartialEq)]
pub struct SourceEntry {
    pub key: SymbolKey,
    pub href: String,
    pub id: i64,
}

/// Anything that can enumerate symbols and serve their examples,
/// comments and see-alsos, such as a remote documentation API.
pub trait DocSource {
    /// Short description recorded as the snapshot's source.
    fn describe(&self) -> String;
    fn symbols(&self) -> Result<Vec<SourceEntry>>;
    fn examples(&self, key: &SymbolKey) -> Result<Vec<Example>>;
    fn comments(&self, key: &SymbolKey) -> Result<Vec<Comment>>;
    fn see_alsos(&self, key: &SymbolKey) -> Result<Vec<SeeAlso>>;
}

/// Serves records out of an already loaded index.
pub struct SnapshotSource<'a> {
    docs: &'a DocsIndex,
}

impl<'a> SnapshotSource<'a> {
    pub fn new(docs: &'a DocsIndex) -> Self {
        SnapshotSource { docs }
    }

    fn record(&self, key: &SymbolKey) -> Option<&'a NameRecord> {
        self.docs.lookup(&key.ns, &key.name)
    }
}

impl DocSource for SnapshotSource<'_> {
    fn describe(&self) -> String {
        self.docs.active_meta().source
    }

    fn symbols(&self) -> Result<Vec<SourceEntry>> {
        Ok(self
            .docs
            .all_records()
            .map(|(_, record)| SourceEntry {
                key: record.key(),
                href: record.href.clone(),
                id: record.id,
            })
            .collect())
    }

    fn examples(&self, key: &SymbolKey) -> Result<Vec<Example>> {
        Ok(self.record(key).map(|r| r.examples.clone()).unwrap_or_default())
    }

    fn comments(&self, key: &SymbolKey) -> Result<Vec<Comment>> {
        Ok(self.record(key).map(|r| r.comments.clone()).unwrap_or_default())
    }

    fn see_alsos(&self, key: &SymbolKey) -> Result<Vec<SeeAlso>> {
        Ok(self.record(key).map(|r| r.see_alsos.clone()).unwrap_or_default())
    }
}

/// Capture time in the human-readable form stored in snapshots,
/// e.g. `Mar 4, 2024 9:15:02 PM`.
pub fn capture_timestamp() -> String {
    Local::now().format("%b %-d, %Y %-I:%M:%S %p").to_string()
}

/// Walk `source`, keep the symbols whose bare name matches `query` (and
/// whose namespace equals `ns_filter`, when given), and save the result
/// to `output`. A symbol listed twice keeps its last record.
pub fn build_snapshot(
    source: &dyn DocSource,
    ns_filter: Option<&str>,
    query: &Query,
    output: &Path,
) -> Result<Snapshot> {
    let origin = source.describe();
    info!(source = %origin, output = %output.display(), "building snapshot");

    let mut snapshot = Snapshot::new(output.display().to_string(), capture_timestamp());

    for entry in source.symbols()? {
        if ns_filter.is_some_and(|ns| entry.key.ns != ns) || !query.matches(&entry.key.name) {
            continue;
        }

        let record = NameRecord {
            name: entry.key.name.clone(),
            ns: entry.key.ns.clone(),
            href: entry.href,
            id: entry.id,
            see_alsos: source.see_alsos(&entry.key)?,
            examples: source.examples(&entry.key)?,
            comments: source.comments(&entry.key)?,
        };
        debug!(
            symbol = %entry.key,
            examples = record.examples.len(),
            comments = record.comments.len(),
            "captured"
        );

        if snapshot.insert(record).is_some() {
            debug!(symbol = %entry.key, "duplicate symbol, keeping later record");
        }
    }

    snapshot.canonicalize();
    codec::save(&snapshot, output)?;
    info!(records = snapshot.records.len(), "snapshot written");

    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    /// A source listing `clojure.core/map` twice, with different ids.
    struct FakeRemote;

    fn entry(ns: &str, name: &str, id: i64) -> SourceEntry {
        SourceEntry {
            key: SymbolKey::new(ns, name),
            href: format!("/{}/{}", ns, name),
            id,
        }
    }

    impl DocSource for FakeRemote {
        fn describe(&self) -> String {
            "fake-remote".to_string()
        }

        fn symbols(&self) -> Result<Vec<SourceEntry>> {
            Ok(vec![
                entry("clojure.core", "map", 1),
                entry("clojure.core", "filter", 2),
                entry("clojure.string", "join", 3),
                entry("clojure.core", "map", 4),
            ])
        }

        fn examples(&self, key: &SymbolKey) -> Result<Vec<Example>> {
            Ok(vec![Example {
                function: key.name.clone(),
                ns: key.ns.clone(),
                library: "org.clojure/clojure".into(),
                library_version: "1.11.1".into(),
                created_at: 0,
                updated_at: 0,
                body: format!("({} ...)", key.name),
            }])
        }

        fn comments(&self, _key: &SymbolKey) -> Result<Vec<Comment>> {
            Ok(vec![])
        }

        fn see_alsos(&self, _key: &SymbolKey) -> Result<Vec<SeeAlso>> {
            Ok(vec![])
        }
    }

    struct BrokenRemote;

    impl DocSource for BrokenRemote {
        fn describe(&self) -> String {
            "broken".to_string()
        }

        fn symbols(&self) -> Result<Vec<SourceEntry>> {
            Err(Error::io(
                "remote",
                std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "offline"),
            ))
        }

        fn examples(&self, _key: &SymbolKey) -> Result<Vec<Example>> {
            unreachable!()
        }

        fn comments(&self, _key: &SymbolKey) -> Result<Vec<Comment>> {
            unreachable!()
        }

        fn see_alsos(&self, _key: &SymbolKey) -> Result<Vec<SeeAlso>> {
            unreachable!()
        }
    }

    #[test]
    fn test_build_filters_and_saves() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("core.json");

        let snapshot =
            build_snapshot(&FakeRemote, Some("clojure.core"), &Query::literal(""), &output)
                .unwrap();

        let keys: Vec<_> = snapshot.records.keys().map(String::as_str).collect();
        assert_eq!(keys, ["clojure.core/filter", "clojure.core/map"]);
        assert_eq!(snapshot.records["clojure.core/map"].id, 4);

        let loaded = codec::load(&output).unwrap();
        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn test_build_with_pattern() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("j.json");
        let query = Query::pattern("^j").unwrap();

        let snapshot = build_snapshot(&FakeRemote, None, &query, &output).unwrap();
        assert_eq!(snapshot.records.len(), 1);
        assert!(snapshot.records.contains_key("clojure.string/join"));
    }

    #[test]
    fn test_build_propagates_source_failure() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("never.json");

        let err = build_snapshot(&BrokenRemote, None, &Query::literal(""), &output).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn test_snapshot_source_serves_loaded_index() {
        let mut base = Snapshot::new("base.json", "then");
        base.insert(NameRecord {
            name: "map".into(),
            ns: "clojure.core".into(),
            href: "/clojure.core/map".into(),
            id: 9,
            see_alsos: vec![],
            examples: FakeRemote.examples(&SymbolKey::new("clojure.core", "map")).unwrap(),
            comments: vec![],
        });
        let docs = DocsIndex::build(base);
        let source = SnapshotSource::new(&docs);

        assert_eq!(source.describe(), "base.json");
        assert_eq!(source.symbols().unwrap(), [entry("clojure.core", "map", 9)]);
        let key = SymbolKey::new("clojure.core", "map");
        assert_eq!(source.examples(&key).unwrap().len(), 1);
        assert!(source.comments(&key).unwrap().is_empty());
    }

    #[test]
    fn test_capture_timestamp_shape() {
        let ts = capture_timestamp();
        assert!(ts.ends_with("AM") || ts.ends_with("PM"));
        assert!(ts.contains(", "));
    }
}
