//! HTML syntax tree (hast) model.
//!
//! Nodes serialize to the same JSON shape as the JavaScript `hast` format
//! (`type`, `tagName`, `properties`, `children`), so trees produced by a JS
//! pipeline can be handed to the plugins in this crate and back.
//!
//! Fields a node omits deserialize to their defaults: an element without
//! `tagName` has an empty tag and one without `properties` has none. Fields
//! the model does not interpret (`position`, `data`) and whole nodes it does
//! not know are carried through, so a tree serializes back to the JSON it
//! was read from apart from the changes a plugin makes.

mod html;
mod properties;
mod visit;

pub use html::to_html;
pub use properties::{Properties, PropertyValue};
pub use visit::{VisitAction, visit_mut};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Fields a node carries that the model does not interpret, such as
/// `position` and `data`. They are written back unchanged.
pub type Extra = Map<String, Value>;

/// A node in the HTML syntax tree.
///
/// Any JSON value deserializes to some node: unknown `type`s, and known
/// types whose fields have the wrong shape, become [`Node::Unknown`] and
/// serialize back exactly as they came in.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Document or fragment root.
    Root(Root),
    /// An element with a tag name, properties and children.
    Element(Element),
    /// Text content.
    Text(Text),
    /// An HTML comment.
    Comment(Comment),
    /// `<!doctype html>`.
    Doctype(Doctype),
    /// Pre-rendered HTML passed through verbatim.
    Raw(Raw),
    /// A node this model does not know, such as `mdxJsxFlowElement`.
    Unknown(UnknownNode),
}

/// Root node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Root {
    /// Top-level nodes.
    #[serde(default)]
    pub children: Vec<Node>,
    /// Uninterpreted fields.
    #[serde(flatten)]
    pub extra: Extra,
}

/// Element node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Lowercase tag name, or a component name for embeds.
    #[serde(default)]
    pub tag_name: String,
    /// Attributes in hast property naming (`className`, `dataLanguage`, ...).
    #[serde(default)]
    pub properties: Properties,
    /// Child nodes.
    #[serde(default)]
    pub children: Vec<Node>,
    /// Uninterpreted fields.
    #[serde(flatten)]
    pub extra: Extra,
}

/// Text node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Text {
    /// Unescaped text.
    #[serde(default)]
    pub value: String,
    /// Uninterpreted fields.
    #[serde(flatten)]
    pub extra: Extra,
}

/// Comment node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Comment {
    /// Comment body.
    #[serde(default)]
    pub value: String,
    /// Uninterpreted fields.
    #[serde(flatten)]
    pub extra: Extra,
}

/// Doctype node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Doctype {
    /// Uninterpreted fields.
    #[serde(flatten)]
    pub extra: Extra,
}

/// Raw HTML node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Raw {
    /// HTML emitted as-is.
    #[serde(default)]
    pub value: String,
    /// Uninterpreted fields.
    #[serde(flatten)]
    pub extra: Extra,
}

/// A node kept as given. A `children` array is still parsed into nodes so
/// tree walks reach known nodes nested inside.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownNode {
    /// The node without its `children`; usually an object with a `type`.
    pub fields: Value,
    /// Parsed `children`, when the node had a `children` array.
    pub children: Option<Vec<Node>>,
}

impl UnknownNode {
    fn from_value(value: Value) -> Self {
        match value {
            Value::Object(mut map) => {
                let children = match map.remove("children") {
                    Some(Value::Array(items)) => {
                        Some(items.into_iter().map(Node::from_value).collect())
                    }
                    Some(other) => {
                        map.insert("children".to_string(), other);
                        None
                    }
                    None => None,
                };
                Self {
                    fields: Value::Object(map),
                    children,
                }
            }
            other => Self {
                fields: other,
                children: None,
            },
        }
    }

    /// The node's `type`, if it has a string one.
    pub fn node_type(&self) -> Option<&str> {
        self.fields.get("type").and_then(Value::as_str)
    }
}

impl Serialize for UnknownNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match (&self.fields, &self.children) {
            (Value::Object(map), Some(children)) => {
                let mut map = map.clone();
                let children = serde_json::to_value(children).map_err(serde::ser::Error::custom)?;
                map.insert("children".to_string(), children);
                map.serialize(serializer)
            }
            (fields, _) => fields.serialize(serializer),
        }
    }
}

#[derive(Serialize)]
struct Tagged<'a, T> {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(flatten)]
    node: &'a T,
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Root(node) => Tagged { kind: "root", node }.serialize(serializer),
            Node::Element(node) => Tagged { kind: "element", node }.serialize(serializer),
            Node::Text(node) => Tagged { kind: "text", node }.serialize(serializer),
            Node::Comment(node) => Tagged { kind: "comment", node }.serialize(serializer),
            Node::Doctype(node) => Tagged { kind: "doctype", node }.serialize(serializer),
            Node::Raw(node) => Tagged { kind: "raw", node }.serialize(serializer),
            Node::Unknown(node) => node.serialize(serializer),
        }
    }
}

fn parse_known(kind: &str, fields: &Value) -> Option<Result<Node, serde_json::Error>> {
    Some(match kind {
        "root" => Root::deserialize(fields).map(Node::Root),
        "element" => Element::deserialize(fields).map(Node::Element),
        "text" => Text::deserialize(fields).map(Node::Text),
        "comment" => Comment::deserialize(fields).map(Node::Comment),
        "doctype" => Doctype::deserialize(fields).map(Node::Doctype),
        "raw" => Raw::deserialize(fields).map(Node::Raw),
        _ => return None,
    })
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Node::from_value)
    }
}

impl Node {
    /// Builds a node from hast JSON. Never fails; see [`Node`].
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut map) = value else {
            return Node::Unknown(UnknownNode::from_value(value));
        };
        let kind = match map.remove("type") {
            Some(Value::String(kind)) => kind,
            other => {
                if let Some(other) = other {
                    map.insert("type".to_string(), other);
                }
                return Node::Unknown(UnknownNode::from_value(Value::Object(map)));
            }
        };

        let mut rest = Value::Object(map);
        match parse_known(&kind, &rest) {
            Some(Ok(node)) => node,
            failed => {
                if let Some(Err(err)) = failed {
                    log::debug!("Keeping malformed `{}` node as-is: {}", kind, err);
                }
                if let Value::Object(map) = &mut rest {
                    map.insert("type".to_string(), Value::String(kind));
                }
                Node::Unknown(UnknownNode::from_value(rest))
            }
        }
    }

    /// Creates a root holding `children`.
    pub fn root(children: Vec<Node>) -> Self {
        Node::Root(Root {
            children,
            ..Default::default()
        })
    }

    /// Creates a text node.
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(Text {
            value: value.into(),
            ..Default::default()
        })
    }

    /// Creates a raw HTML node.
    pub fn raw(value: impl Into<String>) -> Self {
        Node::Raw(Raw {
            value: value.into(),
            ..Default::default()
        })
    }

    /// Creates a doctype node.
    pub fn doctype() -> Self {
        Node::Doctype(Doctype::default())
    }

    /// Returns the element if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Returns the element mutably if this node is one.
    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Child list for parent nodes: root, element, and unknown nodes with a
    /// `children` array.
    pub fn children(&self) -> Option<&Vec<Node>> {
        match self {
            Node::Root(root) => Some(&root.children),
            Node::Element(el) => Some(&el.children),
            Node::Unknown(node) => node.children.as_ref(),
            _ => None,
        }
    }

    /// Mutable child list for parent nodes.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Root(root) => Some(&mut root.children),
            Node::Element(el) => Some(&mut el.children),
            Node::Unknown(node) => node.children.as_mut(),
            _ => None,
        }
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }
}

fn collect_text(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(&text.value),
        other => {
            if let Some(children) = other.children() {
                for child in children {
                    collect_text(child, out);
                }
            }
        }
    }
}

impl Element {
    /// Creates an element with no properties or children.
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            ..Default::default()
        }
    }

    /// Builder-style property setter.
    pub fn with_property(mut self, name: &str, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(name, value);
        self
    }

    /// Builder-style children setter.
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Class tokens from `className`, whether stored as a list or a string.
    pub fn class_list(&self) -> Vec<&str> {
        match self.properties.get("className") {
            Some(PropertyValue::List(items)) => items.iter().map(String::as_str).collect(),
            Some(PropertyValue::String(s)) => s.split_whitespace().collect(),
            _ => Vec::new(),
        }
    }

    /// Adds `class` unless already present, normalizing `className` to a list.
    pub fn add_class(&mut self, class: &str) {
        let mut classes: Vec<String> = self.class_list().into_iter().map(String::from).collect();
        if classes.iter().any(|c| c == class) {
            return;
        }
        classes.push(class.to_string());
        self.properties.insert("className", classes);
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}
