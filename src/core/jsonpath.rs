//! JSONPath selection over JF2 output
//!
//! JF2 is plain JSON, so callers can pick fields out of it with RFC 9535
//! JSONPath via `serde_json_path`. Queries may omit the leading `$`.

use crate::error::{Mf2Error, Result};
use serde_json::Value as JsonValue;
use serde_json_path::JsonPath;

/// JSONPath query wrapper with auto-prepending logic
#[derive(Debug, Clone)]
pub struct JsonPathQuery {
    path: JsonPath,
    original: String,
    auto_prepended: bool,
}

impl JsonPathQuery {
    /// Create a new JSONPath query, prepending the root when needed
    ///
    /// Tried in order: the query as written, `$` + query when it starts with
    /// `[`, then `$.` + query.
    pub fn new(query: &str) -> Result<Self> {
        Self::new_with_options(query, true)
    }

    /// Create a new JSONPath query with optional auto-prepending
    pub fn new_with_options(query: &str, auto_prepend: bool) -> Result<Self> {
        if let Ok(path) = JsonPath::parse(query) {
            return Ok(Self {
                path,
                original: query.to_string(),
                auto_prepended: false,
            });
        }

        if !auto_prepend {
            return Err(Mf2Error::invalid_query(format!(
                "Invalid JSONPath syntax: {}",
                query
            )));
        }

        if query.starts_with('[') {
            if let Ok(path) = JsonPath::parse(&format!("${}", query)) {
                return Ok(Self {
                    path,
                    original: query.to_string(),
                    auto_prepended: true,
                });
            }
        }

        let path = JsonPath::parse(&format!("$.{}", query)).map_err(|e| {
            Mf2Error::invalid_query(format!(
                "Invalid JSONPath syntax (tried '{}', '${0}', and '$.{0}'): {}",
                query, e
            ))
        })?;

        Ok(Self {
            path,
            original: query.to_string(),
            auto_prepended: true,
        })
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn was_auto_prepended(&self) -> bool {
        self.auto_prepended
    }

    /// Every matching node
    pub fn query<'a>(&self, value: &'a JsonValue) -> Vec<&'a JsonValue> {
        self.path.query(value).into_iter().collect()
    }

    /// Every matching node with its normalized location
    pub fn query_located(&self, value: &JsonValue) -> Vec<(String, JsonValue)> {
        self.path
            .query_located(value)
            .into_iter()
            .map(|node| (node.location().to_string(), node.node().clone()))
            .collect()
    }

    /// Matches folded into one value for output
    ///
    /// No match gives `null`, a single match its value, and several matches
    /// an object keyed by normalized path.
    pub fn select(&self, value: &JsonValue) -> JsonValue {
        let mut matches = self.query_located(value);
        match matches.len() {
            0 => JsonValue::Null,
            1 => matches.remove(0).1,
            _ => JsonValue::Object(matches.into_iter().collect()),
        }
    }
}
