//! Code block construction.

use super::types::PipelineOptions;
use crate::hast::{Element, Node};
use crate::transform::code_meta::{CodeBlockContext, CodeTransformer, join_lines};

/// Language recorded for fences that name none.
pub const PLAINTEXT: &str = "plaintext";

const WRAP_STYLE: &str = "overflow-x: auto; white-space: pre-wrap; word-wrap: break-word;";
const SCROLL_STYLE: &str = "overflow-x: auto;";

/// Builds `pre > code > span.line` for one fenced block and runs the code
/// transformers over it.
///
/// The `pre` carries `dataLanguage` (the fence language, or `plaintext`),
/// which is what the Mermaid tagger keys on.
pub fn render_code_block(
    code: &str,
    lang: Option<&str>,
    meta: Option<&str>,
    options: &PipelineOptions,
    transformers: &[Box<dyn CodeTransformer>],
) -> Element {
    let lang = lang.filter(|l| !l.is_empty()).unwrap_or(PLAINTEXT);
    let ctx = CodeBlockContext::new(meta.filter(|m| !m.is_empty()), Some(lang));

    let mut lines = Vec::new();
    for (index, text) in code.split('\n').enumerate() {
        let children = if text.is_empty() {
            Vec::new()
        } else {
            vec![Node::text(text)]
        };
        let mut line = Element::new("span")
            .with_property("className", vec!["line".to_string()])
            .with_children(children);
        for transformer in transformers {
            transformer.line(&mut line, index + 1, &ctx);
        }
        lines.push(line);
    }

    let mut classes = vec!["astro-code".to_string()];
    if options.themes.is_some() {
        classes.push("astro-code-themes".to_string());
    }

    let mut pre = Element::new("pre")
        .with_property("className", classes)
        .with_property(
            "style",
            if options.wrap { WRAP_STYLE } else { SCROLL_STYLE },
        )
        .with_property("tabIndex", 0u32)
        .with_property("dataLanguage", lang);
    if let Some(themes) = &options.themes {
        pre.properties
            .insert("dataTheme", format!("{} {}", themes.light, themes.dark));
    }
    pre.children = vec![Element::new("code").with_children(join_lines(lines)).into()];

    for transformer in transformers {
        log::trace!("code transformer {}", transformer.name());
        transformer.pre(&mut pre, &ctx);
    }
    pre
}
