//! Per-namespace example coverage.

use crate::docs::DocsIndex;
use std::collections::BTreeMap;

const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamespaceStats {
    pub ns: String,
    pub symbols: usize,
    /// Symbols with at least one example
    pub with_examples: usize,
    /// Examples summed over those symbols
    pub total_examples: usize,
    pub max_examples: usize,
}

impl NamespaceStats {
    fn record(&mut self, example_count: usize) {
        self.symbols += 1;
        if example_count > 0 {
            self.with_examples += 1;
            self.total_examples += example_count;
            self.max_examples = self.max_examples.max(example_count);
        }
    }

    /// Share of symbols with examples. `None` when no symbol has any.
    pub fn percent_with_examples(&self) -> Option<f64> {
        if self.with_examples == 0 || self.symbols == 0 {
            None
        } else {
            Some(self.with_examples as f64 * 100.0 / self.symbols as f64)
        }
    }

    /// Mean example count among symbols that have any.
    pub fn average_examples(&self) -> Option<f64> {
        if self.with_examples == 0 {
            None
        } else {
            Some(self.total_examples as f64 / self.with_examples as f64)
        }
    }

    pub fn max(&self) -> Option<usize> {
        (self.with_examples > 0).then_some(self.max_examples)
    }
}

/// Group every record by namespace, sorted by namespace name.
pub fn collect(docs: &DocsIndex) -> Vec<NamespaceStats> {
    let mut groups: BTreeMap<&str, NamespaceStats> = BTreeMap::new();

    for (_, record) in docs.all_records() {
        groups
            .entry(record.ns.as_str())
            .or_insert_with(|| NamespaceStats {
                ns: record.ns.clone(),
                ..NamespaceStats::default()
            })
            .record(record.examples.len());
    }

    groups.into_values().collect()
}

pub fn totals(groups: &[NamespaceStats]) -> NamespaceStats {
    groups.iter().fold(
        NamespaceStats {
            ns: "TOTAL".to_string(),
            ..NamespaceStats::default()
        },
        |mut acc, group| {
            acc.symbols += group.symbols;
            acc.with_examples += group.with_examples;
            acc.total_examples += group.total_examples;
            acc.max_examples = acc.max_examples.max(group.max_examples);
            acc
        },
    )
}

fn or_na<T>(value: Option<T>, fmt: impl Fn(T) -> String) -> String {
    value.map(fmt).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn row(stats: &NamespaceStats, ns_width: usize) -> String {
    format!(
        "{:<ns_width$}  {:>7}  {:>8}  {:>6}  {:>6}  {:>5}",
        stats.ns,
        stats.symbols,
        stats.with_examples,
        or_na(stats.percent_with_examples(), |p| format!("{:.1}%", p)),
        or_na(stats.average_examples(), |a| format!("{:.2}", a)),
        or_na(stats.max(), |m| m.to_string()),
    )
}

/// Table of namespaces, a totals row, then namespaces without examples.
pub fn render_stats(docs: &DocsIndex) -> String {
    let groups = collect(docs);
    let total = totals(&groups);

    let ns_width = groups
        .iter()
        .map(|g| g.ns.chars().count())
        .chain(["Namespace".len(), total.ns.len()])
        .max()
        .unwrap_or_default();

    let mut lines = vec![format!(
        "{:<ns_width$}  {:>7}  {:>8}  {:>6}  {:>6}  {:>5}",
        "Namespace", "Symbols", "Examples", "%", "Avg", "Max"
    )];
    lines.push("-".repeat(ns_width + 2 + 7 + 2 + 8 + 2 + 6 + 2 + 6 + 2 + 5));
    lines.extend(groups.iter().map(|g| row(g, ns_width)));
    lines.push(row(&total, ns_width));

    let empty: Vec<&str> = groups
        .iter()
        .filter(|g| g.with_examples == 0)
        .map(|g| g.ns.as_str())
        .collect();

    lines.push(String::new());
    if empty.is_empty() {
        lines.push("Namespaces with no examples: none".to_string());
    } else {
        lines.push("Namespaces with no examples:".to_string());
        lines.extend(empty.iter().map(|ns| format!("  {}", ns)));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docs::{Example, NameRecord, Snapshot};

    fn record(ns: &str, name: &str, examples: usize) -> NameRecord {
        NameRecord {
            name: name.into(),
            ns: ns.into(),
            href: String::new(),
            id: 0,
            see_alsos: vec![],
            examples: (0..examples)
                .map(|i| Example {
                    function: name.into(),
                    ns: ns.into(),
                    library: String::new(),
                    library_version: String::new(),
                    created_at: i as i64,
                    updated_at: i as i64,
                    body: String::new(),
                })
                .collect(),
            comments: vec![],
        }
    }

    fn docs() -> DocsIndex {
        let mut snapshot = Snapshot::new("test", "now");
        snapshot.insert(record("clojure.core", "map", 3));
        snapshot.insert(record("clojure.core", "pmap", 1));
        snapshot.insert(record("clojure.core", "mapv", 0));
        snapshot.insert(record("clojure.zip", "up", 0));
        snapshot.insert(record("clojure.string", "join", 2));
        DocsIndex::build(snapshot)
    }

    #[test]
    fn test_collect_groups_sorted() {
        let groups = collect(&docs());
        let names: Vec<_> = groups.iter().map(|g| g.ns.as_str()).collect();
        assert_eq!(names, ["clojure.core", "clojure.string", "clojure.zip"]);

        let core = &groups[0];
        assert_eq!(core.symbols, 3);
        assert_eq!(core.with_examples, 2);
        assert_eq!(core.max(), Some(3));
        assert_eq!(core.average_examples(), Some(2.0));
    }

    #[test]
    fn test_zero_example_group_is_not_available() {
        let groups = collect(&docs());
        let zip = &groups[2];
        assert_eq!(zip.percent_with_examples(), None);
        assert_eq!(zip.average_examples(), None);
        assert_eq!(zip.max(), None);
    }

    #[test]
    fn test_render_stats() {
        let out = render_stats(&docs());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines[0],
            "Namespace       Symbols  Examples       %     Avg    Max"
        );
        assert_eq!(
            lines[2],
            "clojure.core          3         2   66.7%    2.00      3"
        );
        assert_eq!(
            lines[4],
            "clojure.zip           1         0     N/A     N/A    N/A"
        );
        assert_eq!(
            lines[5],
            "TOTAL                 5         3   60.0%    2.00      3"
        );
        assert_eq!(&lines[7..], ["Namespaces with no examples:", "  clojure.zip"]);
    }

    #[test]
    fn test_render_stats_empty_index() {
        let out = render_stats(&DocsIndex::default());
        assert!(out.contains("TOTAL"));
        assert!(out.contains("N/A"));
        assert!(out.ends_with("Namespaces with no examples: none\n"));
    }
}
