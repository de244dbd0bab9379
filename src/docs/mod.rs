//! Snapshot data model, codec and in-memory index
//!
//! A snapshot is loaded from disk once and indexed for lookups by
//! canonical `namespace/name` key.
//!
//! # Usage
//!
//! ```no_run
//! use cdocs::docs::DocsIndex;
//! use std::path::Path;
//!
//! let mut docs = DocsIndex::default();
//! let (count, captured_at) = docs.load_snapshot(Path::new("clojuredocs-snapshot.json"))?;
//! println!("{} symbols captured {}", count, captured_at);
//!
//! if let Some(record) = docs.lookup("clojure.core", "map") {
//!     println!("{} examples", record.examples.len());
//! }
//! # Ok::<(), cdocs::Error>(())
//! ```

pub mod codec;
mod index;
mod types;

pub use index::{ActiveMeta, DocsIndex, ExamplesView};
pub use types::{
    Comment, DEFAULT_NS, Example, NameRecord, SeeAlso, Snapshot, SymbolKey, canonical_key,
};
