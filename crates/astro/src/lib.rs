#![deny(missing_docs)]
//! blogmark Astro engine: markdown to hast rendering, rehype-style plugins,
//! the embed registry, and HTML output.

/// Parallel rendering of post collections.
pub mod batch;
/// HTML syntax tree model, visitor and serializer.
pub mod hast;
/// The markdown → HTML pipeline.
pub mod pipeline;
/// Embed descriptors, matchers and the default registry.
pub mod registry;
/// Rendering layer (mdast → hast conversion, code blocks).
pub mod renderer;
/// Tree transforms, code transformers and embed rewriting.
pub mod transform;

pub use batch::{BatchOptions, BatchProcessingResult, BatchResult, BatchStats, render_collection};
pub use pipeline::{Pipeline, render_markdown};
pub use registry::{EmbedDescriptor, EmbedRegistry, default_embed_registry};
pub use renderer::{HeadingEntry, PipelineOptions, RenderedDocument, ThemePair};
pub use transform::HastTransform;
pub use transform::code_meta::{CodeBlockContext, CodeTransformer, apply_code_meta};
pub use transform::mermaid::{MermaidClassTagger, append_class, is_mermaid_pre, tag_mermaid_classes};
