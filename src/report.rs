//! Plain-text reports over the active snapshot.
//!
//! Every report ends with a count line. A symbol missing from the snapshot
//! renders a zero count rather than an error.

use crate::docs::{DocsIndex, SymbolKey, canonical_key};
use crate::markup::{normalize, trim_blank_lines};
use crate::syntax::highlight_clojure_code;
use crate::wrap::wrap_text;
use chrono::{DateTime, SecondsFormat};

/// Printed between consecutive examples or comments.
pub const SEPARATOR: &str = "----------------------------------------";

pub const DEFAULT_WRAP_WIDTH: usize = 80;

#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    /// Append timestamps, authors and the symbol URL
    pub verbose: bool,
    /// Wrap width for comment bodies
    pub width: usize,
    /// Syntax highlight example bodies with terminal escapes
    pub highlight: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            verbose: false,
            width: DEFAULT_WRAP_WIDTH,
            highlight: false,
        }
    }
}

/// `1 example`, `2 examples`, `0 examples`.
fn count_noun(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// Milliseconds since the epoch as RFC 3339 UTC.
pub fn format_timestamp(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(|ts| ts.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_else(|| millis.to_string())
}

fn finish(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

pub fn render_examples(docs: &DocsIndex, ns: &str, name: &str, opts: &ReportOptions) -> String {
    let view = docs.examples(ns, name);
    let mut lines = Vec::new();

    for (idx, example) in view.examples.iter().enumerate() {
        if idx > 0 {
            lines.push(SEPARATOR.to_string());
        }
        let body = trim_blank_lines(&normalize(&example.body));
        if opts.highlight {
            lines.push(highlight_clojure_code(&body));
        } else {
            lines.push(body);
        }
        if opts.verbose {
            lines.push(format!("  updated {}", format_timestamp(example.updated_at)));
        }
    }

    lines.push(format!(
        "{} found for {}",
        count_noun(view.examples.len(), "example", "examples"),
        canonical_key(ns, name)
    ));
    if opts.verbose
        && let Some(url) = view.url
    {
        lines.push(format!("URL: {}", url));
    }

    finish(lines)
}

pub fn render_comments(docs: &DocsIndex, ns: &str, name: &str, opts: &ReportOptions) -> String {
    let comments = docs.comments(ns, name);
    let mut lines = Vec::new();

    for (idx, comment) in comments.iter().enumerate() {
        if idx > 0 {
            lines.push(SEPARATOR.to_string());
        }
        let body = trim_blank_lines(&normalize(&comment.body));
        lines.push(wrap_text(&body, opts.width));
        if opts.verbose {
            lines.push(format!(
                "  by {}, updated {}",
                comment.author,
                format_timestamp(comment.updated_at)
            ));
        }
    }

    lines.push(format!(
        "{} found for {}",
        count_noun(comments.len(), "comment", "comments"),
        canonical_key(ns, name)
    ));

    finish(lines)
}

pub fn render_see_also(docs: &DocsIndex, ns: &str, name: &str) -> String {
    let see_alsos = docs.see_also(ns, name);
    let mut lines: Vec<String> = see_alsos.iter().map(|s| s.display_name()).collect();

    lines.push(format!(
        "{} found for {}",
        count_noun(see_alsos.len(), "see-also", "see-alsos"),
        canonical_key(ns, name)
    ));

    finish(lines)
}

/// Search results sorted by canonical key, then a match count.
pub fn render_search(found: &[SymbolKey]) -> String {
    let mut keys: Vec<String> = found.iter().map(SymbolKey::canonical).collect();
    keys.sort();

    let count = keys.len();
    let mut lines = keys;
    lines.push(format!("{} found", count_noun(count, "match", "matches")));

    finish(lines)
}
