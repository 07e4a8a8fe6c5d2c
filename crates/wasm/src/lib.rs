use blogmark_astro::hast::Node;
use blogmark_astro::{
    CodeBlockContext, PipelineOptions, apply_code_meta, default_embed_registry, render_markdown,
    tag_mermaid_classes,
};
use blogmark_core::{BlogPost, published_posts};
use serde::Serialize;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

fn from_js<T: serde::de::DeserializeOwned>(value: JsValue, what: &str) -> Result<T, JsError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| JsError::new(&format!("Invalid {what}: {e}")))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
}

fn parse_options(options: JsValue) -> Result<PipelineOptions, JsError> {
    if options.is_undefined() || options.is_null() {
        return Ok(PipelineOptions::default());
    }
    from_js(options, "options")
}

// ============================================================================
// Tree plugins
// ============================================================================

/// Appends the `mermaid` class to every `pre` whose `dataLanguage` is
/// `mermaid`, returning the updated tree.
#[wasm_bindgen(js_name = tagMermaidClasses)]
pub fn tag_mermaid_classes_js(tree: JsValue) -> Result<JsValue, JsError> {
    let mut tree: Node = from_js(tree, "tree")?;
    tag_mermaid_classes(&mut tree);
    to_js(&tree)
}

/// Sets `data-title` and `data-language` on a `pre` element node from the
/// fence meta string and language. Other node types come back unchanged.
#[wasm_bindgen(js_name = applyCodeMeta)]
pub fn apply_code_meta_js(
    pre: JsValue,
    meta: Option<String>,
    lang: Option<String>,
) -> Result<JsValue, JsError> {
    let mut pre: Node = from_js(pre, "node")?;
    if let Some(el) = pre.as_element_mut() {
        let ctx = CodeBlockContext::new(meta.as_deref(), lang.as_deref());
        apply_code_meta(el, &ctx);
    }
    to_js(&pre)
}

// ============================================================================
// Embeds
// ============================================================================

/// Result of matching a URL against one embed kind.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedMatch {
    /// Component that renders the embed.
    pub component_name: String,
    /// Prop the matched value is passed as.
    pub url_argument: String,
    /// Accepted value.
    pub value: String,
}

/// Runs the matcher of the embed named `kind` (directive or component name)
/// against `url`. Returns `null` when the kind is unknown or the URL is
/// rejected.
#[wasm_bindgen(js_name = matchEmbedUrl)]
pub fn match_embed_url(kind: &str, url: &str) -> Result<JsValue, JsError> {
    let registry = default_embed_registry();
    let found = registry.find(kind).and_then(|embed| {
        embed.matches(url).map(|value| EmbedMatch {
            component_name: embed.component_name.to_string(),
            url_argument: embed.url_argument.to_string(),
            value: value.to_string(),
        })
    });
    match found {
        Some(found) => to_js(&found),
        None => Ok(JsValue::NULL),
    }
}

// ============================================================================
// Rendering and listing
// ============================================================================

/// Renders markdown to `{ html, headings }` with the blog's pipeline.
#[wasm_bindgen(js_name = renderMarkdown)]
pub fn render_markdown_js(source: &str, options: JsValue) -> Result<JsValue, JsError> {
    let options = parse_options(options)?;
    let doc = render_markdown(source, &options).map_err(|e| JsError::new(&e.to_string()))?;
    to_js(&doc)
}

/// Filters posts to the published ones, newest first.
#[wasm_bindgen(js_name = listPublishedPosts)]
pub fn list_published_posts(posts: JsValue) -> Result<JsValue, JsError> {
    let posts: Vec<BlogPost> = from_js(posts, "posts")?;
    let listed = published_posts(&posts);
    to_js(&listed)
}
