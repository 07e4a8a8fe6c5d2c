//! Embed registry: which URLs and directives become which components.

/// Built-in embed descriptors.
pub mod defaults;
/// URL matchers for the built-in embeds.
pub mod matchers;
/// Descriptor and registry types.
pub mod types;

pub use defaults::{EXCALIDRAW, LINK_CARD, YOUTUBE, default_embed_registry};
pub use types::{EmbedDescriptor, EmbedRegistry};
