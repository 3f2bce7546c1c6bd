//! Parsed mf2 document model
//!
//! These types mirror the JSON emitted by an mf2 parser. They are read-only
//! inputs to the query layer; the builder methods exist so callers and tests
//! can assemble items without going through JSON.

use crate::core::value::PropertyValue;
use crate::error::{Mf2Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;
use std::io::Read;

/// One typed item in a parsed mf2 tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Microformat {
    #[serde(rename = "type")]
    types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    html: Option<String>,
    #[serde(default)]
    properties: BTreeMap<String, Vec<PropertyValue>>,
    /// `None` means "not a container", `Some(vec![])` an empty container
    #[serde(default, skip_serializing_if = "Option::is_none")]
    children: Option<Vec<Microformat>>,
}

impl Microformat {
    /// Create an item with the given types and no properties
    pub fn new<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            types: types.into_iter().map(Into::into).collect(),
            id: None,
            value: None,
            html: None,
            properties: BTreeMap::new(),
            children: None,
        }
    }

    /// Set the item's `value` field
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the item's `html` field
    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    /// Replace a property's value list
    pub fn with_property<I, V>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<PropertyValue>,
    {
        self.properties
            .insert(name.into(), values.into_iter().map(Into::into).collect());
        self
    }

    /// Append a child item, turning this item into a container
    pub fn with_child(mut self, child: Microformat) -> Self {
        self.children.get_or_insert_with(Vec::new).push(child);
        self
    }

    /// Mark this item as a container with no children
    pub fn with_empty_children(mut self) -> Self {
        self.children.get_or_insert_with(Vec::new);
        self
    }

    /// The type list; the first entry is the primary type
    pub fn types(&self) -> &[String] {
        &self.types
    }

    /// Whether `type_name` is one of this item's types
    pub fn has_type(&self, type_name: &str) -> bool {
        self.types.iter().any(|t| t == type_name)
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn html(&self) -> Option<&str> {
        self.html.as_deref()
    }

    /// All properties, keyed by name
    pub fn properties(&self) -> &BTreeMap<String, Vec<PropertyValue>> {
        &self.properties
    }

    /// A property's values; an unknown name yields an empty slice
    pub fn property(&self, name: &str) -> &[PropertyValue] {
        self.properties
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Children as stored, keeping absent distinct from empty
    pub fn children(&self) -> Option<&[Microformat]> {
        self.children.as_deref()
    }

    /// Render back to mf2 JSON
    pub fn to_json(&self) -> JsonValue {
        let mut map = Map::new();
        map.insert(
            "type".to_string(),
            JsonValue::Array(self.types.iter().cloned().map(JsonValue::String).collect()),
        );
        if let Some(id) = &self.id {
            map.insert("id".to_string(), JsonValue::String(id.clone()));
        }
        if let Some(value) = &self.value {
            map.insert("value".to_string(), JsonValue::String(value.clone()));
        }
        if let Some(html) = &self.html {
            map.insert("html".to_string(), JsonValue::String(html.clone()));
        }
        let properties = self
            .properties
            .iter()
            .map(|(name, values)| {
                let values = values.iter().map(PropertyValue::to_json).collect();
                (name.clone(), JsonValue::Array(values))
            })
            .collect();
        map.insert("properties".to_string(), JsonValue::Object(properties));
        if let Some(children) = &self.children {
            map.insert(
                "children".to_string(),
                JsonValue::Array(children.iter().map(Microformat::to_json).collect()),
            );
        }
        JsonValue::Object(map)
    }

    /// Check the item and everything nested below it
    fn validate_at(&self, location: &str) -> Result<()> {
        if self.types.is_empty() {
            return Err(Mf2Error::invalid_document(location, "empty type list"));
        }
        if let Some(bad) = self.types.iter().find(|t| t.is_empty()) {
            return Err(Mf2Error::invalid_document(
                location,
                format!("blank type name {:?}", bad),
            ));
        }

        for (name, values) in &self.properties {
            for (i, value) in values.iter().enumerate() {
                if let PropertyValue::Node(nested) = value {
                    nested.validate_at(&format!("{}.properties.{}[{}]", location, name, i))?;
                }
            }
        }

        for (i, child) in self.children.iter().flatten().enumerate() {
            child.validate_at(&format!("{}.children[{}]", location, i))?;
        }

        Ok(())
    }
}

/// The top-level output of an mf2 parser
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParsedDocument {
    items: Vec<Microformat>,
    #[serde(default)]
    rels: Map<String, JsonValue>,
    #[serde(default, rename = "rel-urls", skip_serializing_if = "Map::is_empty")]
    rel_urls: Map<String, JsonValue>,
}

impl ParsedDocument {
    /// Create a document from top-level items with no relations
    pub fn new(items: Vec<Microformat>) -> Self {
        Self {
            items,
            rels: Map::new(),
            rel_urls: Map::new(),
        }
    }

    /// Attach relation data under `name`
    pub fn with_rel(mut self, name: impl Into<String>, data: JsonValue) -> Self {
        self.rels.insert(name.into(), data);
        self
    }

    /// Parse from a JSON string
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parse from an already-decoded JSON value
    pub fn from_value(value: JsonValue) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Parse from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn items(&self) -> &[Microformat] {
        &self.items
    }

    pub fn rels(&self) -> &Map<String, JsonValue> {
        &self.rels
    }

    pub fn rel_urls(&self) -> &Map<String, JsonValue> {
        &self.rel_urls
    }

    /// Check the whole tree for structural invariants
    pub fn validate(&self) -> Result<()> {
        for (i, item) in self.items.iter().enumerate() {
            item.validate_at(&format!("items[{}]", i))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_from_json() {
        let doc = ParsedDocument::from_json_str(
            r#"{
                "items": [{"type": ["h-entry"], "properties": {"name": ["hello"]}}],
                "rels": {"me": ["https://example.com/"]},
                "rel-urls": {"https://example.com/": {"rels": ["me"]}}
            }"#,
        )
        .unwrap();

        assert_eq!(doc.items().len(), 1);
        assert_eq!(doc.items()[0].types(), ["h-entry"]);
        assert_eq!(doc.rels()["me"], json!(["https://example.com/"]));
        assert!(doc.rel_urls().contains_key("https://example.com/"));
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn test_missing_rels_default_to_empty() {
        let doc = ParsedDocument::from_value(json!({"items": []})).unwrap();
        assert!(doc.rels().is_empty());
        assert!(doc.items().is_empty());
    }

    #[test]
    fn test_children_absent_vs_empty_round_trip() {
        let absent = Microformat::new(["h-entry"]);
        let empty = Microformat::new(["h-feed"]).with_empty_children();

        assert!(absent.to_json().get("children").is_none());
        assert_eq!(empty.to_json()["children"], json!([]));

        let back: Microformat = serde_json::from_value(empty.to_json()).unwrap();
        assert_eq!(back.children(), Some(&[][..]));
        let back: Microformat = serde_json::from_value(absent.to_json()).unwrap();
        assert_eq!(back.children(), None);
    }

    #[test]
    fn test_serialize_matches_to_json() {
        let mf = Microformat::new(["h-card"])
            .with_value("Emma")
            .with_property("name", ["Emma"]);
        assert_eq!(serde_json::to_value(&mf).unwrap(), mf.to_json());
    }

    #[test]
    fn test_validate_reports_nested_location() {
        let doc = ParsedDocument::from_value(json!({
            "items": [{
                "type": ["h-entry"],
                "properties": {
                    "author": [{"type": [], "properties": {}}]
                }
            }],
            "rels": {}
        }))
        .unwrap();

        match doc.validate() {
            Err(Mf2Error::InvalidDocument { location, .. }) => {
                assert_eq!(location, "items[0].properties.author[0]");
            }
            other => panic!("expected invalid document, got {:?}", other),
        }
    }

    #[test]
    fn test_id_and_photo_alt_survive_ingestion() {
        let doc = ParsedDocument::from_value(json!({
            "items": [{
                "type": ["h-card"],
                "id": "me",
                "properties": {
                    "name": ["Emma"],
                    "photo": [{"value": "https://example.com/emma.jpg", "alt": "Emma"}]
                }
            }],
            "rels": {}
        }))
        .unwrap();

        let card = &doc.items()[0];
        assert_eq!(card.id(), Some("me"));
        assert_eq!(
            card.property("photo"),
            [PropertyValue::Other(
                json!({"value": "https://example.com/emma.jpg", "alt": "Emma"})
            )]
        );
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn test_unknown_property_is_empty() {
        let mf = Microformat::new(["h-entry"]);
        assert!(mf.property("nope").is_empty());
    }
}
