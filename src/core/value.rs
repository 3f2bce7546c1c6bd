//! Property value types for parsed microformats
//!
//! mf2 JSON stores every property as a list whose entries are plain strings,
//! rich text or nested items. Anything else a parser emits (a `u-photo` with
//! alt text, say) is kept verbatim. The shape is decided once, when the JSON is deserialized, so the
//! rest of the crate dispatches with a single `match`.

use crate::core::document::Microformat;
use crate::error::{Mf2Error, Result, Shape};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A plain-text rendering paired with its HTML source (an `e-*` property)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichText {
    pub value: String,
    pub html: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

impl RichText {
    /// Create a rich-text value without a language tag
    pub fn new(value: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            html: html.into(),
            lang: None,
        }
    }

    /// Render as a `{value, html}` JSON object
    pub fn to_json(&self) -> JsonValue {
        let mut map = serde_json::Map::new();
        map.insert("value".to_string(), JsonValue::String(self.value.clone()));
        map.insert("html".to_string(), JsonValue::String(self.html.clone()));
        if let Some(lang) = &self.lang {
            map.insert("lang".to_string(), JsonValue::String(lang.clone()));
        }
        JsonValue::Object(map)
    }
}

/// One entry of a microformat property list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// A bare string
    Plain(String),
    /// A `{value, html}` pair
    RichText(RichText),
    /// A nested microformat item
    Node(Microformat),
    /// Any other shape, passed through untouched
    Other(JsonValue),
}

impl PropertyValue {
    /// Create a plain string value
    pub fn plain(s: impl Into<String>) -> Self {
        Self::Plain(s.into())
    }

    /// Create a rich-text value
    pub fn rich_text(value: impl Into<String>, html: impl Into<String>) -> Self {
        Self::RichText(RichText::new(value, html))
    }

    /// The structural shape of this value
    pub fn shape(&self) -> Shape {
        match self {
            Self::Plain(_) => Shape::Plain,
            Self::RichText(_) => Shape::RichText,
            Self::Node(_) => Shape::Microformat,
            Self::Other(_) => Shape::Other,
        }
    }

    /// Borrow the nested microformat, if this is one
    pub fn as_microformat(&self) -> Option<&Microformat> {
        match self {
            Self::Node(mf) => Some(mf),
            _ => None,
        }
    }

    /// Render back to mf2 JSON
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Plain(s) => JsonValue::String(s.clone()),
            Self::RichText(rt) => rt.to_json(),
            Self::Node(mf) => mf.to_json(),
            Self::Other(raw) => raw.clone(),
        }
    }
}

impl TryFrom<JsonValue> for PropertyValue {
    type Error = Mf2Error;

    /// Classify a raw JSON entry.
    ///
    /// `type` is checked before `html`: a nested item may carry both `value`
    /// and `html` next to its `type` list and is still a microformat.
    fn try_from(raw: JsonValue) -> Result<Self> {
        match raw {
            JsonValue::String(s) => Ok(Self::Plain(s)),
            JsonValue::Object(map) if map.contains_key("type") => {
                Ok(Self::Node(serde_json::from_value(JsonValue::Object(map))?))
            }
            JsonValue::Object(map) if map.contains_key("html") => {
                Ok(Self::RichText(serde_json::from_value(JsonValue::Object(map))?))
            }
            other => Ok(Self::Other(other)),
        }
    }
}

impl<'de> Deserialize<'de> for PropertyValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = JsonValue::deserialize(deserializer)?;
        PropertyValue::try_from(raw).map_err(de::Error::custom)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        Self::plain(s)
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        Self::Plain(s)
    }
}

impl From<RichText> for PropertyValue {
    fn from(rt: RichText) -> Self {
        Self::RichText(rt)
    }
}

impl From<Microformat> for PropertyValue {
    fn from(mf: Microformat) -> Self {
        Self::Node(mf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_string_ingestion() {
        let value: PropertyValue = serde_json::from_value(json!("hello")).unwrap();
        assert_eq!(value, PropertyValue::plain("hello"));
        assert_eq!(value.shape(), Shape::Plain);
    }

    #[test]
    fn test_rich_text_ingestion() {
        let value: PropertyValue =
            serde_json::from_value(json!({"value": "hi", "html": "<b>hi</b>", "lang": "en"}))
                .unwrap();
        match value {
            PropertyValue::RichText(rt) => {
                assert_eq!(rt.value, "hi");
                assert_eq!(rt.html, "<b>hi</b>");
                assert_eq!(rt.lang.as_deref(), Some("en"));
            }
            other => panic!("expected rich text, got {:?}", other),
        }
    }

    #[test]
    fn test_type_wins_over_html() {
        let value: PropertyValue = serde_json::from_value(json!({
            "type": ["h-card"],
            "value": "Emma",
            "html": "<a>Emma</a>",
            "properties": {"name": ["Emma"]}
        }))
        .unwrap();
        assert_eq!(value.shape(), Shape::Microformat);
        let mf = value.as_microformat().unwrap();
        assert_eq!(mf.value(), Some("Emma"));
        assert_eq!(mf.html(), Some("<a>Emma</a>"));
    }

    #[test]
    fn test_rich_text_requires_value() {
        let result: std::result::Result<PropertyValue, _> =
            serde_json::from_value(json!({"html": "<p>x</p>"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_photo_with_alt_kept_verbatim() {
        let raw = json!({"value": "https://example.com/emma.jpg", "alt": "Emma"});
        let value: PropertyValue = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(value.shape(), Shape::Other);
        assert_eq!(value.to_json(), raw);
        assert_eq!(serde_json::to_value(&value).unwrap(), raw);
    }

    #[test]
    fn test_other_scalars_kept_verbatim() {
        for raw in [json!(42), json!(null), json!(["a"]), json!({"value": "x"})] {
            let value: PropertyValue = serde_json::from_value(raw.clone()).unwrap();
            assert_eq!(value, PropertyValue::Other(raw));
        }
    }

    #[test]
    fn test_to_json_passthrough() {
        let rt = PropertyValue::rich_text("hi", "<i>hi</i>");
        assert_eq!(rt.to_json(), json!({"value": "hi", "html": "<i>hi</i>"}));
        assert_eq!(PropertyValue::plain("x").to_json(), json!("x"));
    }
}
