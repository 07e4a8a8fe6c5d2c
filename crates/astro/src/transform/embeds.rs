//! Turns a paragraph that is only a URL, or an embed directive, into an embed
//! component element.

use super::directives::{LeafDirective, parse_leaf_directive};
use crate::hast::Element;
use crate::registry::{EmbedDescriptor, EmbedRegistry};
use markdown::mdast;

/// `<Component url_argument="url">` for a matched embed.
pub fn embed_element(embed: &EmbedDescriptor, url: &str) -> Element {
    Element::new(embed.component_name).with_property(embed.url_argument, url)
}

/// Embed for a standalone URL: the first registered matcher that accepts it.
pub fn embed_for_url(url: &str, registry: &EmbedRegistry) -> Option<Element> {
    registry
        .match_url(url)
        .map(|(embed, value)| embed_element(embed, value))
}

/// Embed for a leaf directive.
///
/// The URL is the label, or else the attribute named after the embed's URL
/// argument. Unknown directive names and URLs the embed's matcher rejects
/// produce nothing.
pub fn embed_for_directive(directive: &LeafDirective, registry: &EmbedRegistry) -> Option<Element> {
    let Some(embed) = registry.by_directive(&directive.name) else {
        log::debug!("Unknown embed directive `::{}`", directive.name);
        return None;
    };

    let url = directive
        .label
        .as_deref()
        .filter(|label| !label.is_empty())
        .or_else(|| directive.attribute(embed.url_argument))?;

    match embed.matches(url) {
        Some(value) => Some(embed_element(embed, value)),
        None => {
            log::debug!(
                "`::{}` rejected {}, leaving the paragraph as is",
                directive.name,
                url
            );
            None
        }
    }
}

/// Embed for a paragraph, if the paragraph is nothing but an embed.
///
/// `source` is the paragraph's original markdown, used to recognize
/// directives the markdown parser reads as plain text.
pub fn embed_for_paragraph(
    paragraph: &mdast::Paragraph,
    source: Option<&str>,
    registry: &EmbedRegistry,
) -> Option<Element> {
    if registry.is_empty() {
        return None;
    }

    if let Some(embed) =
        standalone_url(&paragraph.children).and_then(|url| embed_for_url(url, registry))
    {
        return Some(embed);
    }

    let directive = source
        .filter(|src| src.trim_start().starts_with("::"))
        .and_then(parse_leaf_directive)?;
    embed_for_directive(&directive, registry)
}

/// The URL of a paragraph holding a single bare URL or a single link whose
/// text is its own target.
fn standalone_url(children: &[mdast::Node]) -> Option<&str> {
    match children {
        [mdast::Node::Text(text)] => {
            let value = text.value.trim();
            (!value.is_empty() && !value.contains(char::is_whitespace)).then_some(value)
        }
        [mdast::Node::Link(link)] => match link.children.as_slice() {
            [mdast::Node::Text(text)] if text.value == link.url => Some(link.url.as_str()),
            _ => None,
        },
        _ => None,
    }
}
