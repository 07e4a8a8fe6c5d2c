//! Transforms applied while and after building the HTML tree.
//!
//! - `mermaid`: tags Mermaid `pre` blocks with the `mermaid` class.
//! - `code_meta`: per-code-block transformers (meta title, line highlights).
//! - `directives`: leaf directive (`::name[...]{...}`) parsing.
//! - `embeds`: turns standalone URLs and embed directives into components.
//! - `components`: lol_html rewriting of embed components into plain HTML.

use crate::hast::Node;

/// Code block transformers run during tree construction.
pub mod code_meta;
/// Embed component rewrite handlers.
pub mod components;
/// Leaf directive parsing.
pub mod directives;
/// Paragraph to embed component conversion.
pub mod embeds;
/// Mermaid diagram class tagging.
pub mod mermaid;

/// A whole-tree transform, run in registration order after the tree is built.
///
/// Transforms mutate the tree in place and cannot fail.
pub trait HastTransform: Send + Sync {
    /// Name used in log output.
    fn name(&self) -> &'static str;

    /// Applies the transform to `tree`.
    fn transform(&self, tree: &mut Node);
}
