//! Source-annotated document tree consumed by the analysis engine.
//!
//! Parsing JSON or YAML text is a host concern; the engine operates on an
//! already-parsed [`DocNode`] tree in which every node and every property key
//! carries the [`Span`] it occupied in the original document. Diagnostics and
//! completions produced by the engine point back into the source through
//! these spans.
//!
//! Property keys additionally record whether an explicit key/value separator
//! was present ([`PropertyKey::has_separator`]). A YAML document that is
//! mid-edit routinely contains a key with no `:` yet; hosts decide via
//! [`NameListOptions`](crate::traversal::NameListOptions) whether such keys
//! participate in state-name enumeration.
//!
//! # Examples
//!
//! ```
//! use statelens::document::DocNode;
//!
//! let node = DocNode::from_json(&serde_json::json!({
//!     "StartAt": "Greet",
//!     "States": { "Greet": { "Type": "Pass", "End": true } }
//! }));
//!
//! assert!(node.get("States").is_some());
//! assert_eq!(node.get("StartAt").and_then(DocNode::as_str), Some("Greet"));
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Half-open byte range `[start, end)` into the source document.
///
/// A defaulted (empty, zero) span marks synthesized nodes, e.g. trees built
/// with [`DocNode::from_json`] in tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length of the span in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether `offset` falls inside this span.
    #[must_use]
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }
}

/// A property key together with its source position and separator flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyKey {
    pub name: String,
    pub span: Span,
    /// `false` while a YAML key is mid-edit and the `:` is not typed yet.
    pub has_separator: bool,
}

impl PropertyKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            span: Span::default(),
            has_separator: true,
        }
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    #[must_use]
    pub fn without_separator(mut self) -> Self {
        self.has_separator = false;
        self
    }
}

/// One `key: value` pair of an object node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub key: PropertyKey,
    pub value: DocNode,
}

impl Property {
    pub fn new(name: impl Into<String>, value: DocNode) -> Self {
        Self {
            key: PropertyKey::new(name),
            value,
        }
    }
}

/// The value carried by a [`DocNode`].
///
/// Object properties keep document order; the engine never reorders them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DocValue {
    Object(Vec<Property>),
    Array(Vec<DocNode>),
    String(String),
    Number(f64),
    Bool(bool),
    Null,
}

/// A node of the annotated document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocNode {
    pub value: DocValue,
    pub span: Span,
}

impl DocNode {
    pub fn object(properties: Vec<Property>) -> Self {
        Self {
            value: DocValue::Object(properties),
            span: Span::default(),
        }
    }

    pub fn array(items: Vec<DocNode>) -> Self {
        Self {
            value: DocValue::Array(items),
            span: Span::default(),
        }
    }

    pub fn string(s: impl Into<String>) -> Self {
        Self {
            value: DocValue::String(s.into()),
            span: Span::default(),
        }
    }

    pub fn number(n: f64) -> Self {
        Self {
            value: DocValue::Number(n),
            span: Span::default(),
        }
    }

    pub fn bool(b: bool) -> Self {
        Self {
            value: DocValue::Bool(b),
            span: Span::default(),
        }
    }

    pub fn null() -> Self {
        Self {
            value: DocValue::Null,
            span: Span::default(),
        }
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Properties of an object node, or `None` for any other value.
    #[must_use]
    pub fn as_object(&self) -> Option<&[Property]> {
        match &self.value {
            DocValue::Object(props) => Some(props),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[DocNode]> {
        match &self.value {
            DocValue::Array(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            DocValue::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match &self.value {
            DocValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self.value, DocValue::Object(_))
    }

    /// Looks up a property of an object node by name.
    ///
    /// Returns `None` for non-object nodes. If the same key is declared twice
    /// (legal mid-edit), the first occurrence wins.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.as_object()?.iter().find(|p| p.key.name == name)
    }

    /// Value of a property of an object node by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&DocNode> {
        self.property(name).map(|p| &p.value)
    }

    /// Builds an annotated tree from a plain [`serde_json::Value`].
    ///
    /// All spans are empty and every key counts as separated; intended for
    /// tests and tooling that do not care about source positions.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Object(map) => DocNode::object(
                map.iter()
                    .map(|(k, v)| Property::new(k.clone(), DocNode::from_json(v)))
                    .collect(),
            ),
            Value::Array(items) => DocNode::array(items.iter().map(DocNode::from_json).collect()),
            Value::String(s) => DocNode::string(s.clone()),
            Value::Number(n) => DocNode::number(n.as_f64().unwrap_or(0.0)),
            Value::Bool(b) => DocNode::bool(*b),
            Value::Null => DocNode::null(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn span_contains_is_half_open() {
        let span = Span::new(4, 9);
        assert!(span.contains(4));
        assert!(span.contains(8));
        assert!(!span.contains(9));
        assert_eq!(span.len(), 5);
    }

    #[test]
    fn from_json_preserves_property_order() {
        let node = DocNode::from_json(&json!({"B": 1, "A": 2, "C": 3}));
        let names: Vec<_> = node
            .as_object()
            .unwrap()
            .iter()
            .map(|p| p.key.name.as_str())
            .collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn duplicate_keys_first_occurrence_wins() {
        let node = DocNode::object(vec![
            Property::new("Type", DocNode::string("Pass")),
            Property::new("Type", DocNode::string("Task")),
        ]);
        assert_eq!(node.get("Type").and_then(DocNode::as_str), Some("Pass"));
    }

    #[test]
    fn lookups_on_non_objects_return_none() {
        let node = DocNode::string("not an object");
        assert!(node.get("anything").is_none());
        assert!(node.as_object().is_none());
        assert!(!node.is_object());
    }
}
