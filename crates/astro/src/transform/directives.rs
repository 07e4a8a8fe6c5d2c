//! Leaf directive parsing: `::name[label]{key="value"}` on a line of its own.

use blogmark_core::{FenceMeta, MetaToken};

/// A parsed leaf directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafDirective {
    /// Directive name after `::`.
    pub name: String,
    /// Text between `[` and `]`, if given.
    pub label: Option<String>,
    /// `key=value` pairs between `{` and `}`, in source order.
    pub attributes: Vec<(String, String)>,
}

impl LeafDirective {
    /// Value of the first attribute named `key`.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Parses `input` as a single leaf directive.
///
/// Returns `None` unless the whole (trimmed) input is one directive. Names
/// start with an ASCII letter and continue with letters, digits, `-` or `_`.
/// Container (`:::`) and text (`:`) directives are not recognized.
pub fn parse_leaf_directive(input: &str) -> Option<LeafDirective> {
    let rest = input.trim().strip_prefix("::")?;
    if !rest.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }

    let name_len = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(rest.len());
    let name = &rest[..name_len];
    let mut rest = &rest[name_len..];

    let mut label = None;
    if let Some(after) = rest.strip_prefix('[') {
        let end = after.find(']')?;
        label = Some(after[..end].trim().to_string());
        rest = &after[end + 1..];
    }

    let mut attributes = Vec::new();
    if let Some(after) = rest.strip_prefix('{') {
        let end = after.rfind('}')?;
        for token in FenceMeta::parse(&after[..end]).tokens {
            if let MetaToken::Pair { key, value } = token {
                attributes.push((key, value));
            }
        }
        rest = &after[end + 1..];
    }

    if !rest.trim().is_empty() {
        return None;
    }

    Some(LeafDirective {
        name: name.to_string(),
        label,
        attributes,
    })
}
