//! Rendering layer: markdown tree to HTML tree.

mod code;
mod convert;
mod types;

pub use code::{PLAINTEXT, render_code_block};
pub use convert::Converter;
pub use types::{HeadingEntry, PipelineOptions, RenderedDocument, ThemePair};
