//! Borrowed views over single property values
//!
//! A [`Node`] gives every property value the same accessors, whatever its
//! shape. Accessors that only make sense for one shape return
//! [`Mf2Error::TypeMismatch`] on the others.

use crate::core::document::Microformat;
use crate::core::jf2::{Jf2, Jf2Converter, Jf2Options};
use crate::core::list::NodeList;
use crate::core::value::{PropertyValue, RichText};
use crate::error::{Mf2Error, Result, Shape};
use serde_json::Value as JsonValue;

/// A read-only view over one property value or top-level item
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node<'a> {
    Plain(&'a str),
    RichText(&'a RichText),
    Microformat(&'a Microformat),
    /// A value of no recognized shape, e.g. `{value, alt}` for a photo
    Other(&'a JsonValue),
}

impl<'a> Node<'a> {
    /// The structural shape of the wrapped value
    pub fn shape(&self) -> Shape {
        match self {
            Self::Plain(_) => Shape::Plain,
            Self::RichText(_) => Shape::RichText,
            Self::Microformat(_) => Shape::Microformat,
            Self::Other(_) => Shape::Other,
        }
    }

    pub fn is_microformat(&self) -> bool {
        matches!(self, Self::Microformat(_))
    }

    /// Borrow the wrapped microformat, or fail with a type mismatch
    pub fn as_microformat(&self) -> Result<&'a Microformat> {
        match *self {
            Self::Microformat(mf) => Ok(mf),
            other => Err(Mf2Error::type_mismatch(Shape::Microformat, other.shape())),
        }
    }

    /// The plain-text value
    ///
    /// A microformat answers with its own `value` field and fails with
    /// [`Mf2Error::MissingValue`] when it has none. Other values answer with
    /// a `value` string if they carry one.
    pub fn value(&self) -> Result<&'a str> {
        match *self {
            Self::Plain(s) => Ok(s),
            Self::RichText(rt) => Ok(&rt.value),
            Self::Microformat(mf) => mf.value().ok_or_else(|| Mf2Error::missing_value(mf.types())),
            Self::Other(raw) => raw
                .get("value")
                .and_then(JsonValue::as_str)
                .ok_or_else(|| Mf2Error::type_mismatch(Shape::Plain, Shape::Other)),
        }
    }

    /// The HTML rendering of a rich-text value
    pub fn html(&self) -> Result<&'a str> {
        match *self {
            Self::RichText(rt) => Ok(&rt.html),
            Self::Microformat(mf) => mf
                .html()
                .ok_or_else(|| Mf2Error::type_mismatch(Shape::RichText, Shape::Microformat)),
            other => Err(Mf2Error::type_mismatch(Shape::RichText, other.shape())),
        }
    }

    /// The type list of a microformat
    pub fn types(&self) -> Result<&'a [String]> {
        Ok(self.as_microformat()?.types())
    }

    /// Whether this is a microformat carrying `type_name`
    pub fn has_type(&self, type_name: &str) -> bool {
        match self {
            Self::Microformat(mf) => mf.has_type(type_name),
            _ => false,
        }
    }

    /// Wrap every value of property `name`; an unknown name gives an empty list
    pub fn prop(&self, name: &str) -> Result<NodeList<'a>> {
        let mf = self.as_microformat()?;
        Ok(mf.property(name).iter().map(Node::from).collect())
    }

    /// Wrap every child item; a non-container gives an empty list
    pub fn children(&self) -> Result<NodeList<'a>> {
        let mf = self.as_microformat()?;
        Ok(mf.children().unwrap_or_default().iter().map(Node::from).collect())
    }

    /// Convert a microformat to JF2 with default options
    pub fn to_jf2(&self) -> Result<Jf2> {
        self.to_jf2_with(&Jf2Options::default())
    }

    /// Convert a microformat to JF2
    pub fn to_jf2_with(&self, options: &Jf2Options) -> Result<Jf2> {
        let mf = self.as_microformat()?;
        Ok(Jf2Converter::with_options(options.clone()).convert(mf))
    }

    /// The wrapped value as raw mf2 JSON
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Plain(s) => JsonValue::String((*s).to_string()),
            Self::RichText(rt) => rt.to_json(),
            Self::Microformat(mf) => mf.to_json(),
            Self::Other(raw) => (*raw).clone(),
        }
    }
}

impl<'a> From<&'a PropertyValue> for Node<'a> {
    fn from(value: &'a PropertyValue) -> Self {
        match value {
            PropertyValue::Plain(s) => Self::Plain(s),
            PropertyValue::RichText(rt) => Self::RichText(rt),
            PropertyValue::Node(mf) => Self::Microformat(mf),
            PropertyValue::Other(raw) => Self::Other(raw),
        }
    }
}

impl<'a> From<&'a Microformat> for Node<'a> {
    fn from(mf: &'a Microformat) -> Self {
        Self::Microformat(mf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry() -> Microformat {
        Microformat::new(["h-entry"])
            .with_property("name", ["hello"])
            .with_property("content", [RichText::new("hi", "<p>hi</p>")])
            .with_child(Microformat::new(["h-cite"]).with_property("name", ["a reply"]))
    }

    #[test]
    fn test_plain_value_round_trips_exactly() {
        let raw = PropertyValue::plain("  héllo\n<b>");
        let node = Node::from(&raw);
        assert_eq!(node.value().unwrap(), "  héllo\n<b>");
    }

    #[test]
    fn test_rich_text_split() {
        let raw = PropertyValue::rich_text("hi", "<p>hi</p>");
        let node = Node::from(&raw);
        assert_eq!(node.value().unwrap(), "hi");
        assert_eq!(node.html().unwrap(), "<p>hi</p>");
    }

    #[test]
    fn test_html_on_plain_is_type_mismatch() {
        let raw = PropertyValue::plain("hi");
        let err = Node::from(&raw).html().unwrap_err();
        assert!(matches!(
            err,
            Mf2Error::TypeMismatch {
                expected: Shape::RichText,
                found: Shape::Plain
            }
        ));
    }

    #[test]
    fn test_microformat_only_accessors_fail_on_scalars() {
        let raw = PropertyValue::plain("hi");
        let node = Node::from(&raw);
        assert!(node.types().is_err());
        assert!(node.prop("name").is_err());
        assert!(node.children().is_err());
        assert!(node.to_jf2().is_err());
        assert!(!node.has_type("h-entry"));
        assert!(!node.is_microformat());
    }

    #[test]
    fn test_other_value_reads_value_field() {
        let photo = PropertyValue::Other(json!({"value": "emma.jpg", "alt": "Emma"}));
        let node = Node::from(&photo);
        assert_eq!(node.shape(), Shape::Other);
        assert_eq!(node.value().unwrap(), "emma.jpg");
        assert_eq!(node.to_json(), json!({"value": "emma.jpg", "alt": "Emma"}));
        assert!(matches!(
            node.html(),
            Err(Mf2Error::TypeMismatch {
                expected: Shape::RichText,
                found: Shape::Other
            })
        ));
        assert!(node.types().is_err());

        let number = PropertyValue::Other(json!(42));
        assert!(matches!(
            Node::from(&number).value(),
            Err(Mf2Error::TypeMismatch {
                expected: Shape::Plain,
                found: Shape::Other
            })
        ));
    }

    #[test]
    fn test_microformat_value_field() {
        let with_value = Microformat::new(["h-card"]).with_value("Emma");
        assert_eq!(Node::from(&with_value).value().unwrap(), "Emma");

        let without = Microformat::new(["h-card"]);
        assert!(matches!(
            Node::from(&without).value(),
            Err(Mf2Error::MissingValue { .. })
        ));
    }

    #[test]
    fn test_microformat_html_field() {
        let with_html = Microformat::new(["h-card"]).with_html("<a>Emma</a>");
        assert_eq!(Node::from(&with_html).html().unwrap(), "<a>Emma</a>");
        assert!(Node::from(&Microformat::new(["h-card"])).html().is_err());
    }

    #[test]
    fn test_prop_and_children() {
        let mf = entry();
        let node = Node::from(&mf);

        assert!(node.is_microformat());
        assert_eq!(node.types().unwrap(), ["h-entry"]);
        assert_eq!(node.prop("name").unwrap().value().unwrap(), "hello");
        assert!(node.prop("missing").unwrap().is_empty());

        let children = node.children().unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children.prop("name").unwrap().value().unwrap(), "a reply");
    }

    #[test]
    fn test_children_absent_is_empty_list() {
        let mf = Microformat::new(["h-card"]);
        assert!(Node::from(&mf).children().unwrap().is_empty());
    }

    #[test]
    fn test_to_jf2() {
        let mf = entry();
        let jf2 = Node::from(&mf).to_jf2().unwrap();
        assert_eq!(
            jf2.into_value(),
            json!({
                "type": "h-entry",
                "name": "hello",
                "content": {"value": "hi", "html": "<p>hi</p>"},
                "children": [{"type": "h-cite", "name": "a reply"}]
            })
        );
    }
}
