//! Code block transformers.
//!
//! Each fenced code block is rendered as
//! `pre > code > span.line` (one span per source line, joined by newlines).
//! Transformers registered on the pipeline see every line span while the
//! block is built, then the finished `pre`.

use crate::hast::{Element, Node};
use blogmark_core::{FenceMeta, ranges_contain};
use std::ops::RangeInclusive;
use once_cell::sync::Lazy;
use regex::Regex;

/// Class set on highlighted line spans.
pub const HIGHLIGHTED_CLASS: &str = "highlighted";

/// Class set on `pre` when a notation comment highlighted a line.
pub const HAS_HIGHLIGHTED_CLASS: &str = "has-highlighted";

static TITLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"title="([^"]+)""#).unwrap());

static NOTATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\s*(?://|#|--|<!--|\{/\*|/\*)\s*\[!code (?:highlight|hl)(?::(\d+))?\]\s*(?:-->|\*/\}|\*/)?\s*$",
    )
    .unwrap()
});

/// What a transformer knows about the block it is working on.
#[derive(Debug, Clone)]
pub struct CodeBlockContext<'a> {
    /// Raw meta string after the language on the opening fence.
    pub meta: Option<&'a str>,
    /// Fence language, `plaintext` when the fence had none.
    pub lang: Option<&'a str>,
    fence: FenceMeta,
    highlighted: Vec<RangeInclusive<usize>>,
}

impl<'a> CodeBlockContext<'a> {
    /// Builds the context, tokenizing `meta` once.
    pub fn new(meta: Option<&'a str>, lang: Option<&'a str>) -> Self {
        let fence = meta.map(FenceMeta::parse).unwrap_or_default();
        let highlighted = fence.line_ranges();
        Self {
            meta,
            lang,
            fence,
            highlighted,
        }
    }

    /// Tokenized meta string.
    pub fn fence(&self) -> &FenceMeta {
        &self.fence
    }

    /// Whether the meta string's `{...}` ranges name 1-based line `number`.
    pub fn is_meta_highlighted(&self, number: usize) -> bool {
        ranges_contain(&self.highlighted, number)
    }
}

/// A hook into code block construction.
pub trait CodeTransformer: Send + Sync {
    /// Name used in log output.
    fn name(&self) -> &'static str;

    /// Called for each `span.line`, with its 1-based line number.
    fn line(&self, _line: &mut Element, _number: usize, _ctx: &CodeBlockContext<'_>) {}

    /// Called once with the finished `pre`.
    fn pre(&self, _pre: &mut Element, _ctx: &CodeBlockContext<'_>) {}
}

/// Sets `data-title` from the first `title="..."` in the meta string and
/// `data-language` from the fence language.
///
/// The two are independent: a block may get either, both or neither. The
/// language `plaintext` is never recorded and an empty title never matches.
pub fn apply_code_meta(pre: &mut Element, ctx: &CodeBlockContext<'_>) {
    if let Some(raw) = ctx.meta.filter(|raw| !raw.is_empty())
        && let Some(title) = TITLE_RE.captures(raw).and_then(|caps| caps.get(1))
    {
        pre.properties.insert("data-title", title.as_str());
    }

    if let Some(lang) = ctx.lang.filter(|lang| !lang.is_empty() && *lang != "plaintext") {
        pre.properties.insert("data-language", lang);
    }
}

/// [`apply_code_meta`] as a transformer.
#[derive(Debug, Default, Clone, Copy)]
pub struct CodeMetaTransformer;

impl CodeTransformer for CodeMetaTransformer {
    fn name(&self) -> &'static str {
        "transformer-code-meta"
    }

    fn pre(&self, pre: &mut Element, ctx: &CodeBlockContext<'_>) {
        apply_code_meta(pre, ctx);
    }
}

/// Highlights lines named by `{1,3-5}` in the meta string.
#[derive(Debug, Default, Clone, Copy)]
pub struct MetaHighlightTransformer;

impl CodeTransformer for MetaHighlightTransformer {
    fn name(&self) -> &'static str {
        "transformer-meta-highlight"
    }

    fn line(&self, line: &mut Element, number: usize, ctx: &CodeBlockContext<'_>) {
        if ctx.is_meta_highlighted(number) {
            line.add_class(HIGHLIGHTED_CLASS);
        }
    }
}

/// Highlights lines marked with a `[!code highlight]` (or `[!code hl]`)
/// comment and strips the comment.
///
/// `[!code highlight:3]` covers the marked line and the two after it. A
/// marker alone on its line removes that line and applies to the lines that
/// follow instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct NotationHighlightTransformer;

impl CodeTransformer for NotationHighlightTransformer {
    fn name(&self) -> &'static str {
        "transformer-notation-highlight"
    }

    fn pre(&self, pre: &mut Element, _ctx: &CodeBlockContext<'_>) {
        let Some(code) = pre
            .children
            .iter_mut()
            .filter_map(Node::as_element_mut)
            .find(|el| el.tag_name == "code")
        else {
            return;
        };
        if !is_line_structured(code) {
            return;
        }

        let mut lines = Vec::new();
        let mut pending = 0usize;
        let mut matched = false;

        for node in code.children.drain(..) {
            let Node::Element(mut line) = node else {
                continue;
            };
            if let Some(count) = strip_notation(&mut line) {
                matched = true;
                if line.children.iter().all(|c| c.text_content().trim().is_empty()) {
                    pending = pending.saturating_add(count);
                    continue;
                }
                line.add_class(HIGHLIGHTED_CLASS);
                pending = pending.saturating_add(count - 1);
            } else if pending > 0 {
                line.add_class(HIGHLIGHTED_CLASS);
                pending -= 1;
            }
            lines.push(line);
        }

        code.children = join_lines(lines);
        if matched {
            pre.add_class(HAS_HIGHLIGHTED_CLASS);
        }
    }
}

/// Line spans separated by `"\n"` text nodes.
pub(crate) fn join_lines(lines: Vec<Element>) -> Vec<Node> {
    let mut children = Vec::with_capacity(lines.len() * 2);
    for (i, line) in lines.into_iter().enumerate() {
        if i > 0 {
            children.push(Node::text("\n"));
        }
        children.push(Node::Element(line));
    }
    children
}

fn is_line_structured(code: &Element) -> bool {
    code.children.iter().all(|node| match node {
        Node::Element(el) => el.class_list().contains(&"line"),
        Node::Text(text) => text.value == "\n",
        _ => false,
    })
}

/// Removes a trailing highlight marker from the line's last text node and
/// returns how many lines it covers.
fn strip_notation(line: &mut Element) -> Option<usize> {
    let Some(Node::Text(text)) = line.children.last_mut() else {
        return None;
    };
    let caps = NOTATION_RE.captures(&text.value)?;
    let count = caps
        .get(1)
        .and_then(|m| m.as_str().parse::<usize>().ok())
        .unwrap_or(1)
        .max(1);
    let start = caps.get(0).map_or(text.value.len(), |m| m.start());
    text.value.truncate(start);
    Some(count)
}
