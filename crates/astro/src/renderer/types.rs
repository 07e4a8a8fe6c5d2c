//! Options and results of markdown rendering.

use serde::{Deserialize, Serialize};

/// Light and dark syntax theme names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemePair {
    /// Theme used by the light color scheme.
    pub light: String,
    /// Theme used by the dark color scheme.
    pub dark: String,
}

impl Default for ThemePair {
    fn default() -> Self {
        Self {
            light: "github-light".to_string(),
            dark: "github-dark".to_string(),
        }
    }
}

/// Rendering options, shaped like the blog's markdown configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PipelineOptions {
    /// Parse MDX instead of plain markdown.
    pub mdx: bool,
    /// Recognize `$inline$` and `$$block$$` math.
    pub math: bool,
    /// Pass raw HTML through.
    pub raw_html: bool,
    /// Soft-wrap long lines in code blocks.
    pub wrap: bool,
    /// Syntax themes recorded on code blocks.
    pub themes: Option<ThemePair>,
    /// Turn standalone URLs and embed directives into embeds.
    pub embeds: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            mdx: false,
            math: true,
            raw_html: true,
            wrap: true,
            themes: Some(ThemePair::default()),
            embeds: true,
        }
    }
}

impl PipelineOptions {
    /// Markdown parser settings for these options.
    pub fn parse_options(&self) -> blogmark_core::ParseOptions {
        let mut parse = if self.mdx {
            blogmark_core::ParseOptions::mdx()
        } else {
            blogmark_core::ParseOptions::markdown()
        };
        parse.math = self.math;
        parse.raw_html = self.raw_html && !self.mdx;
        parse
    }
}

/// Heading metadata extracted during rendering.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct HeadingEntry {
    /// Heading depth (1-6).
    pub depth: u8,
    /// Slugified identifier, also set as the heading's `id`.
    pub slug: String,
    /// Visible heading text.
    pub text: String,
}

/// A rendered document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedDocument {
    /// Final HTML, embeds already rewritten.
    pub html: String,
    /// Headings in document order.
    pub headings: Vec<HeadingEntry>,
}
