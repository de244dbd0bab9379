//! Search over the active snapshot by bare symbol name

use crate::docs::{DocsIndex, SymbolKey};
use crate::error::Result;
use regex::Regex;

/// A name query: either a literal substring or a compiled pattern.
#[derive(Debug, Clone)]
pub enum Query {
    Literal(String),
    Pattern(Regex),
}

impl Query {
    pub fn literal(text: impl Into<String>) -> Self {
        Query::Literal(text.into())
    }

    pub fn pattern(source: &str) -> Result<Self> {
        Ok(Query::Pattern(Regex::new(source)?))
    }

    /// Build a literal or pattern query from command-line style input.
    pub fn from_input(text: &str, is_pattern: bool) -> Result<Self> {
        if is_pattern {
            Query::pattern(text)
        } else {
            Ok(Query::literal(text))
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            Query::Literal(literal) => name.contains(literal.as_str()),
            Query::Pattern(regex) => regex.is_match(name),
        }
    }
}

/// Keys of every record whose bare name matches `query`, optionally
/// restricted to one namespace. The order is the index's key order;
/// callers that present results sort them themselves.
pub fn search(docs: &DocsIndex, ns_filter: Option<&str>, query: &Query) -> Vec<SymbolKey> {
    docs.all_records()
        .map(|(_, record)| record)
        .filter(|record| ns_filter.is_none_or(|ns| record.ns == ns))
        .filter(|record| query.matches(&record.name))
        .map(|record| record.key())
        .collect()
}

/// Calculate simple edit distance between two strings (Levenshtein distance)
fn edit_distance(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();
    let mut prev: Vec<usize> = (0..=s2_chars.len()).collect();
    let mut row = vec![0; s2_chars.len() + 1];

    for (i, c1) in s1_chars.iter().enumerate() {
        row[0] = i + 1;
        for (j, c2) in s2_chars.iter().enumerate() {
            let cost = usize::from(c1 != c2);
            row[j + 1] = (prev[j + 1] + 1).min(row[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut row);
    }

    prev[s2_chars.len()]
}

/// Suggest up to five names in `ns` close to `name`, for lookups that
/// missed. Case-insensitive equal names come first; otherwise names
/// within edit distance 2, closest first.
pub fn suggest(docs: &DocsIndex, ns: &str, name: &str) -> Vec<String> {
    let name_lower = name.to_lowercase();
    let candidates: Vec<&str> = docs
        .all_records()
        .map(|(_, record)| record)
        .filter(|record| record.ns == ns && record.name != name)
        .map(|record| record.name.as_str())
        .collect();

    let same_case: Vec<String> = candidates
        .iter()
        .filter(|c| c.to_lowercase() == name_lower)
        .map(|c| c.to_string())
        .collect();
    if !same_case.is_empty() {
        return same_case;
    }

    let mut scored: Vec<(usize, &str)> = candidates
        .into_iter()
        .map(|c| (edit_distance(&name_lower, &c.to_lowercase()), c))
        .filter(|(dist, _)| *dist <= 2)
        .collect();
    scored.sort();

    scored
        .into_iter()
        .take(5)
        .map(|(_, c)| c.to_string())
        .collect()
}
