//! cdocs - offline ClojureDocs
//!
//! Search and render examples, comments and see-alsos from a captured
//! documentation snapshot, without network access.

pub mod build;
pub mod docs;
mod error;
pub mod markup;
pub mod report;
pub mod search;
pub mod stats;
pub mod syntax;
pub mod wrap;

// Re-export commonly used types
pub use docs::{DocsIndex, NameRecord, Snapshot, SymbolKey};
pub use error::{Error, Result};
pub use search::Query;
