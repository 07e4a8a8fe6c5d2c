#![deny(missing_docs)]
//! blogmark core: site config, frontmatter, the post schema and collections.

/// Blog collection loading.
pub mod collection;
/// Site configuration and theme palettes.
pub mod config;
/// Core error types.
pub mod error;
/// Feed projection of the post listing.
pub mod feed;
/// Code-fence meta string tokenizer.
pub mod fence_meta;
/// YAML frontmatter splitting.
pub mod frontmatter;
/// Markdown parsing through markdown-rs.
pub mod parse;
/// Published post listing.
pub mod posts;
/// Blog post frontmatter schema.
pub mod schema;
/// Slug generation utilities.
pub mod slug;

pub use collection::{load_collection, parse_post};
pub use config::{AccentColor, BaseColor, ConfigError, SiteConfig};
pub use error::{BlogmarkError, SourceLocation};
pub use feed::{Feed, FeedItem};
pub use fence_meta::{FenceMeta, MetaToken, parse_line_ranges, ranges_contain};
pub use frontmatter::{FrontmatterError, FrontmatterSplit, split_frontmatter};
pub use parse::{ParseOptions, parse_mdast};
pub use posts::{all_tags, posts_tagged, published_posts};
pub use schema::{BlogPost, PostData, SchemaError, coerce_date};
pub use slug::{Slugger, entry_id, slug};
