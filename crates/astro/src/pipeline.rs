//! The markdown → HTML pipeline.

use crate::hast::{Node, to_html};
use crate::registry::{EmbedRegistry, default_embed_registry};
use crate::renderer::{Converter, HeadingEntry, PipelineOptions, RenderedDocument};
use crate::transform::HastTransform;
use crate::transform::code_meta::{
    CodeMetaTransformer, CodeTransformer, MetaHighlightTransformer, NotationHighlightTransformer,
};
use crate::transform::components::rewrite_embeds;
use crate::transform::mermaid::MermaidClassTagger;
use blogmark_core::{BlogmarkError, parse_mdast};

/// Ordered code transformers and tree transforms around one set of options.
///
/// A pipeline holds no per-document state and can render many documents,
/// including from several threads at once.
pub struct Pipeline {
    options: PipelineOptions,
    registry: EmbedRegistry,
    code_transformers: Vec<Box<dyn CodeTransformer>>,
    transforms: Vec<Box<dyn HastTransform>>,
}

impl Pipeline {
    /// A pipeline with no transformers and no embeds.
    pub fn new(options: PipelineOptions) -> Self {
        Self {
            options,
            registry: EmbedRegistry::new(),
            code_transformers: Vec::new(),
            transforms: Vec::new(),
        }
    }

    /// The blog's pipeline: code meta, meta highlight and notation highlight
    /// transformers, the Mermaid class tagger, and the default embeds.
    pub fn blog(options: PipelineOptions) -> Self {
        Self::new(options)
            .with_registry(default_embed_registry())
            .with_code_transformer(CodeMetaTransformer)
            .with_code_transformer(MetaHighlightTransformer)
            .with_code_transformer(NotationHighlightTransformer)
            .with_transform(MermaidClassTagger)
    }

    /// Appends a code transformer.
    pub fn with_code_transformer(mut self, transformer: impl CodeTransformer + 'static) -> Self {
        self.code_transformers.push(Box::new(transformer));
        self
    }

    /// Appends a tree transform; transforms run in the order they are added.
    pub fn with_transform(mut self, transform: impl HastTransform + 'static) -> Self {
        self.transforms.push(Box::new(transform));
        self
    }

    /// Replaces the embed registry.
    pub fn with_registry(mut self, registry: EmbedRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Options this pipeline renders with.
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Names of the tree transforms, in run order.
    pub fn transform_names(&self) -> Vec<&'static str> {
        self.transforms.iter().map(|t| t.name()).collect()
    }

    /// Parses `source` and builds the transformed HTML tree.
    pub fn to_hast(&self, source: &str) -> Result<(Node, Vec<HeadingEntry>), BlogmarkError> {
        let mdast = parse_mdast(source, self.options.parse_options())?;
        let converter = Converter::new(
            source,
            &self.options,
            &self.code_transformers,
            &self.registry,
        );
        let (mut tree, headings) = converter.convert(&mdast);

        for transform in &self.transforms {
            log::debug!("Running transform {}", transform.name());
            transform.transform(&mut tree);
        }
        Ok((tree, headings))
    }

    /// Renders `source` to HTML.
    pub fn render(&self, source: &str) -> Result<RenderedDocument, BlogmarkError> {
        let (tree, headings) = self.to_hast(source)?;
        let mut html = to_html(&tree);
        if !self.registry.is_empty() {
            html = rewrite_embeds(&html)?;
        }
        Ok(RenderedDocument { html, headings })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::blog(PipelineOptions::default())
    }
}

/// Renders markdown with the blog's pipeline.
///
/// # Example
///
/// ```
/// use blogmark_astro::{PipelineOptions, render_markdown};
///
/// let doc = render_markdown("```mermaid\ngraph TD\n```", &PipelineOptions::default()).unwrap();
/// assert!(doc.html.contains(r#"class="astro-code astro-code-themes mermaid""#));
/// ```
pub fn render_markdown(
    input: &str,
    options: &PipelineOptions,
) -> Result<RenderedDocument, BlogmarkError> {
    Pipeline::blog(options.clone()).render(input)
}
