//! HTML serialization of a hast tree.

use super::{Element, Node, PropertyValue};
use html_escape::{encode_double_quoted_attribute, encode_text};
use serde_json::Value;
use std::borrow::Cow;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

const COMMA_SEPARATED: &[&str] = &["accept", "coords"];

/// Serializes `node` to an HTML string.
///
/// Property names are mapped back to attribute names (`className` → `class`,
/// `dataLanguage` → `data-language`). When two properties map to the same
/// attribute only the first is written. Unknown nodes write only their
/// children.
pub fn to_html(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Root(root) => {
            for child in &root.children {
                write_node(child, out);
            }
        }
        Node::Element(el) => write_element(el, out),
        Node::Text(text) => out.push_str(&encode_text(&text.value)),
        Node::Comment(comment) => {
            out.push_str("<!--");
            out.push_str(&comment.value);
            out.push_str("-->");
        }
        Node::Doctype(_) => out.push_str("<!doctype html>"),
        Node::Raw(raw) => out.push_str(&raw.value),
        Node::Unknown(unknown) => {
            for child in unknown.children.iter().flatten() {
                write_node(child, out);
            }
        }
    }
}

fn write_element(el: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&el.tag_name);

    let mut written: Vec<Cow<'_, str>> = Vec::new();
    for (name, value) in el.properties.iter() {
        let attr = attribute_name(name);
        if written.contains(&attr) {
            continue;
        }
        match value {
            PropertyValue::Bool(false) => continue,
            PropertyValue::Bool(true) => {
                out.push(' ');
                out.push_str(&attr);
            }
            PropertyValue::Number(n) => push_attribute(out, &attr, &n.to_string()),
            PropertyValue::String(s) => push_attribute(out, &attr, s),
            PropertyValue::List(items) => push_attribute(out, &attr, &items.join(" ")),
            PropertyValue::Other(Value::Array(items)) => {
                let separator = if COMMA_SEPARATED.contains(&name) { ", " } else { " " };
                let tokens: Vec<String> = items.iter().filter_map(scalar_text).collect();
                push_attribute(out, &attr, &tokens.join(separator));
            }
            PropertyValue::Other(_) => continue,
        }
        written.push(attr);
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&el.tag_name.as_str()) {
        return;
    }

    for child in &el.children {
        write_node(child, out);
    }
    out.push_str("</");
    out.push_str(&el.tag_name);
    out.push('>');
}

fn push_attribute(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&encode_double_quoted_attribute(value));
    out.push('"');
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Maps a hast property name to its HTML attribute name.
pub(crate) fn attribute_name(property: &str) -> Cow<'_, str> {
    match property {
        "className" => return Cow::Borrowed("class"),
        "htmlFor" => return Cow::Borrowed("for"),
        "httpEquiv" => return Cow::Borrowed("http-equiv"),
        "acceptCharset" => return Cow::Borrowed("accept-charset"),
        _ => {}
    }

    for prefix in ["data", "aria"] {
        if let Some(rest) = property.strip_prefix(prefix)
            && rest.starts_with(|c: char| c.is_ascii_uppercase())
        {
            let mut name = String::from(prefix);
            for c in rest.chars() {
                if c.is_ascii_uppercase() {
                    name.push('-');
                    name.push(c.to_ascii_lowercase());
                } else {
                    name.push(c);
                }
            }
            return Cow::Owned(name);
        }
    }

    if property.chars().any(|c| c.is_ascii_uppercase()) {
        Cow::Owned(property.to_ascii_lowercase())
    } else {
        Cow::Borrowed(property)
    }
}
