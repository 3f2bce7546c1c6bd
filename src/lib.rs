//! mf2query: query parsed microformats2 documents and convert items to JF2
//!
//! The input is the JSON an mf2 parser produces: top-level `items`, each with
//! a `type` list, `properties` and optional `children`, plus `rels`. This crate
//! lets you walk that tree with a small fluent API and flatten any item into
//! JF2 for templates and feeds.
//!
//! # Quick Start
//!
//! ```rust
//! use mf2query::{ParsedDocument, Query, Result};
//! use serde_json::json;
//!
//! fn main() -> Result<()> {
//!     let doc = ParsedDocument::from_value(json!({
//!         "items": [{
//!             "type": ["h-entry"],
//!             "properties": {
//!                 "name": ["hello"],
//!                 "category": ["a", "b"],
//!                 "content": [{"value": "hi", "html": "<p>hi</p>"}]
//!             }
//!         }],
//!         "rels": {"me": ["https://example.com/"]}
//!     }))?;
//!
//!     let query = Query::new(&doc);
//!     let entries = query.items().by_type("h-entry");
//!
//!     assert_eq!(entries.prop("name")?.value()?, "hello");
//!     assert_eq!(entries.prop("content")?.html()?, "<p>hi</p>");
//!     assert_eq!(
//!         entries.to_jf2()?.into_value(),
//!         json!({
//!             "type": "h-entry",
//!             "name": "hello",
//!             "category": ["a", "b"],
//!             "content": {"value": "hi", "html": "<p>hi</p>"}
//!         })
//!     );
//!     assert_eq!(query.rel("me"), Some(&json!(["https://example.com/"])));
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`core`]: the document model, `Node`/`NodeList` views, `Query` and JF2
//!   conversion. Pure and synchronous; no I/O.
//! - [`io`]: reading parsed documents from files, resolving input paths and
//!   writing rendered output.
//! - [`error`]: the library error type.
//!
//! Every accessor that needs a particular value shape returns a `Result`.
//! Asking a plain string for its HTML, or an empty result list for its value,
//! is an error rather than a panic. Unknown property, child or relation names
//! are never errors; they read as empty.

pub use crate::error::{Mf2Error, Result, Shape};

pub use crate::core::{
    EmptyPropertyPolicy, Jf2, Jf2Converter, Jf2Options, JsonPathQuery, Microformat, Node,
    NodeList, ParsedDocument, PropertyValue, Query, RichText,
};

pub use crate::io::{
    DocumentReader, FileResolver, OutputFormat, OutputTarget, OutputWriter, ReaderConfig,
    ResolverConfig, WriterConfig,
};

pub mod core;
pub mod error;
pub mod io;

/// Convenience functions for common operations
pub mod convenience {
    //! Shortcuts with default settings for scripts and one-off conversions.

    use crate::{DocumentReader, Jf2, Query, Result};
    use std::path::Path;

    /// Load a parsed mf2 document and convert every top-level item to JF2
    pub fn read_jf2<P: AsRef<Path>>(path: P) -> Result<Vec<Jf2>> {
        let document = DocumentReader::new().read_file(path)?;
        let items = Query::new(&document).items();
        items.to_jf2_all()
    }

    /// Convert every top-level item of a parsed mf2 JSON string to JF2
    pub fn jf2_from_str(content: &str) -> Result<Vec<Jf2>> {
        let document = DocumentReader::new().parse_content(content)?;
        let items = Query::new(&document).items();
        items.to_jf2_all()
    }
}
