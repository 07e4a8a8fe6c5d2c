//! Markdown parsing through markdown-rs.

use crate::{BlogmarkError, SourceLocation};
use markdown::mdast::Node;
use markdown::message::{Message, Place};

/// Which markdown constructs the blog enables.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Enable MDX constructs (JSX, ESM, expressions) for `.mdx` posts.
    pub mdx: bool,
    /// Enable GitHub Flavored Markdown constructs.
    pub gfm: bool,
    /// Enable math constructs (`$inline$` and `$$block$$`).
    pub math: bool,
    /// Allow raw HTML nodes in the AST.
    pub raw_html: bool,
}

impl ParseOptions {
    /// Defaults for `.md` posts: GFM, math and raw HTML on.
    pub const fn markdown() -> Self {
        Self {
            mdx: false,
            gfm: true,
            math: true,
            raw_html: true,
        }
    }

    /// Defaults for `.mdx` posts: raw HTML is replaced by JSX.
    pub const fn mdx() -> Self {
        Self {
            mdx: true,
            gfm: true,
            math: true,
            raw_html: false,
        }
    }

    /// Picks defaults from a file extension.
    pub fn for_extension(ext: &str) -> Self {
        if ext.eq_ignore_ascii_case("mdx") {
            Self::mdx()
        } else {
            Self::markdown()
        }
    }

    /// Convert to markdown-rs `ParseOptions`.
    pub fn to_markdown(self) -> markdown::ParseOptions {
        let mut constructs = markdown::Constructs {
            frontmatter: true,
            code_indented: !self.mdx,
            html_flow: self.raw_html,
            html_text: self.raw_html,
            ..Default::default()
        };

        if self.gfm {
            constructs.gfm_autolink_literal = true;
            constructs.gfm_footnote_definition = true;
            constructs.gfm_label_start_footnote = true;
            constructs.gfm_strikethrough = true;
            constructs.gfm_table = true;
            constructs.gfm_task_list_item = true;
        }

        if self.mdx {
            constructs.mdx_esm = true;
            constructs.mdx_expression_flow = true;
            constructs.mdx_expression_text = true;
            constructs.mdx_jsx_flow = true;
            constructs.mdx_jsx_text = true;
        }

        if self.math {
            constructs.math_flow = true;
            constructs.math_text = true;
        }

        markdown::ParseOptions {
            constructs,
            math_text_single_dollar: self.math,
            ..markdown::ParseOptions::default()
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::markdown()
    }
}

/// Parse markdown into an MDAST tree.
pub fn parse_mdast(input: &str, options: ParseOptions) -> Result<Node, BlogmarkError> {
    markdown::to_mdast(input, &options.to_markdown()).map_err(|err| {
        BlogmarkError::MarkdownAdapter {
            message: err.to_string(),
            location: message_location(&err),
        }
    })
}

fn message_location(message: &Message) -> SourceLocation {
    match &message.place {
        Some(place) => match place.as_ref() {
            Place::Point(point) => SourceLocation::new(point.line, point.column),
            Place::Position(position) => {
                SourceLocation::new(position.start.line, position.start.column)
            }
        },
        None => SourceLocation::new(1, 1),
    }
}
