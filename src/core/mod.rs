//! Core query types over parsed microformats
//!
//! - ParsedDocument / Microformat: the parser's JSON, deserialized
//! - PropertyValue: the three property value shapes
//! - Node / NodeList: borrowed views returned by queries
//! - Query: the entry point over one document
//! - Jf2Converter: mf2 to JF2 simplification

pub mod document;
pub mod jf2;
pub mod jsonpath;
pub mod list;
pub mod node;
pub mod query;
pub mod value;

pub use document::{Microformat, ParsedDocument};
pub use jf2::{EmptyPropertyPolicy, Jf2, Jf2Converter, Jf2Options};
pub use jsonpath::JsonPathQuery;
pub use list::NodeList;
pub use node::Node;
pub use query::Query;
pub use value::{PropertyValue, RichText};
