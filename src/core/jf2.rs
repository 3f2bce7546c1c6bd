//! JF2 conversion
//!
//! JF2 flattens an mf2 item for direct use in templates and feeds:
//!
//! - a property with exactly one value becomes that value, otherwise a list
//! - nested microformats are converted recursively
//! - rich text stays a `{value, html}` object
//! - any other value (a photo with alt text, say) is copied as is
//! - `children` is always a list when present, whatever its length
//! - `type` collapses like a property
//!
//! Cardinality comes from the parsed data, never from a vocabulary schema.

use crate::core::document::Microformat;
use crate::core::value::PropertyValue;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// What to emit for a property whose value list is present but empty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyPropertyPolicy {
    /// Keep the key with an empty list
    #[default]
    EmitEmptyList,
    /// Leave the key out of the output
    Drop,
}

/// Options controlling JF2 conversion
#[derive(Debug, Clone, Default)]
pub struct Jf2Options {
    pub empty_properties: EmptyPropertyPolicy,
}

impl Jf2Options {
    /// Options that drop empty property lists from the output
    pub fn dropping_empty() -> Self {
        Self {
            empty_properties: EmptyPropertyPolicy::Drop,
        }
    }
}

/// A converted JF2 object
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Jf2 {
    inner: Map<String, JsonValue>,
}

impl Jf2 {
    /// Look up an output field
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.inner.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// The converted children, if the source item was a container
    pub fn children(&self) -> Option<&Vec<JsonValue>> {
        self.inner.get("children").and_then(JsonValue::as_array)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Convert into a plain JSON object
    pub fn into_value(self) -> JsonValue {
        JsonValue::Object(self.inner)
    }
}

impl From<Jf2> for JsonValue {
    fn from(jf2: Jf2) -> Self {
        jf2.into_value()
    }
}

/// Converts microformat items to JF2
#[derive(Debug, Clone, Default)]
pub struct Jf2Converter {
    options: Jf2Options,
}

impl Jf2Converter {
    /// Create a converter with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a converter with custom options
    pub fn with_options(options: Jf2Options) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &Jf2Options {
        &self.options
    }

    /// Convert one item and everything nested below it
    pub fn convert(&self, mf: &Microformat) -> Jf2 {
        let mut out = Map::new();

        for (name, values) in mf.properties() {
            if values.is_empty() && self.options.empty_properties == EmptyPropertyPolicy::Drop {
                continue;
            }
            let converted = values.iter().map(|v| self.convert_value(v)).collect();
            out.insert(name.clone(), collapse(converted));
        }

        // Children never collapse, even a single child stays a list.
        if let Some(children) = mf.children() {
            let children = children
                .iter()
                .map(|child| self.convert(child).into_value())
                .collect();
            out.insert("children".to_string(), JsonValue::Array(children));
        }

        let types = mf
            .types()
            .iter()
            .cloned()
            .map(JsonValue::String)
            .collect();
        out.insert("type".to_string(), collapse(types));

        Jf2 { inner: out }
    }

    fn convert_value(&self, value: &PropertyValue) -> JsonValue {
        match value {
            PropertyValue::Node(nested) => self.convert(nested).into_value(),
            other => other.to_json(),
        }
    }
}

/// A single entry stands for itself; anything else stays a list
fn collapse(mut values: Vec<JsonValue>) -> JsonValue {
    if values.len() == 1 {
        values.remove(0)
    } else {
        JsonValue::Array(values)
    }
}
