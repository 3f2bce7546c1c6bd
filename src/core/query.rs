//! Entry point for querying a parsed mf2 document
//!
//! ```rust
//! use mf2query::{ParsedDocument, Query};
//!
//! let doc = ParsedDocument::from_json_str(
//!     r#"{"items": [{"type": ["h-entry"], "properties": {"name": ["hello"]}}], "rels": {}}"#,
//! )?;
//! let query = Query::new(&doc);
//! assert_eq!(query.items().by_type("h-entry").prop("name")?.value()?, "hello");
//! # Ok::<(), mf2query::Mf2Error>(())
//! ```

use crate::core::document::ParsedDocument;
use crate::core::list::NodeList;
use crate::core::node::Node;
use serde_json::Value as JsonValue;

/// A query root over one parsed document
#[derive(Debug, Clone, Copy)]
pub struct Query<'a> {
    document: &'a ParsedDocument,
}

impl<'a> Query<'a> {
    pub fn new(document: &'a ParsedDocument) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &'a ParsedDocument {
        self.document
    }

    /// Every top-level item, in document order
    pub fn items(&self) -> NodeList<'a> {
        self.document.items().iter().map(Node::from).collect()
    }

    /// Whatever the parser stored under relation `name`
    pub fn rel(&self, name: &str) -> Option<&'a JsonValue> {
        self.document.rels().get(name)
    }

    /// Relation names present in the document
    pub fn rel_names(&self) -> impl Iterator<Item = &'a str> {
        self.document.rels().keys().map(String::as_str)
    }

    /// Per-URL relation metadata (`rel-urls`), passed through untouched
    pub fn rel_url(&self, url: &str) -> Option<&'a JsonValue> {
        self.document.rel_urls().get(url)
    }
}

impl<'a> From<&'a ParsedDocument> for Query<'a> {
    fn from(document: &'a ParsedDocument) -> Self {
        Self::new(document)
    }
}
