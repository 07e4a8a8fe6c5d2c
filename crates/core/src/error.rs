use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::frontmatter::FrontmatterError;
use crate::schema::SchemaError;

/// Source location information for error reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Optional file path
    pub file: Option<String>,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize, column: usize) -> Self {
        Self {
            file: None,
            line,
            column,
        }
    }

    /// Create a source location with file information
    pub fn with_file(file: String, line: usize, column: usize) -> Self {
        Self {
            file: Some(file),
            line,
            column,
        }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{}:{}:{}", file, self.line, self.column)
        } else {
            write!(f, "{}:{}", self.line, self.column)
        }
    }
}

/// Errors raised while loading content or rendering a post.
///
/// The tree plugins never produce these; they are total over their input.
#[derive(Debug, Error)]
pub enum BlogmarkError {
    /// IO error while reading content or configuration.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    /// markdown-rs parser error surfaced through the adapter.
    #[error("Parse error at {location}: {message}")]
    MarkdownAdapter {
        /// Error message
        message: String,
        /// Source location
        location: SourceLocation,
    },
    /// HTML rewriting failed while expanding embed components.
    #[error("Render error: {0}")]
    RenderError(String),
    /// Frontmatter block could not be split or parsed.
    #[error("{path}: {source}")]
    Frontmatter {
        /// File the frontmatter belongs to.
        path: PathBuf,
        /// Underlying frontmatter error.
        #[source]
        source: FrontmatterError,
    },
    /// Frontmatter parsed but violates the post schema.
    #[error("{path}: {source}")]
    Schema {
        /// File the post was loaded from.
        path: PathBuf,
        /// Underlying schema violation.
        #[source]
        source: SchemaError,
    },
    /// Site configuration is missing or malformed.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Walking the content directory failed.
    #[error("Content directory error: {0}")]
    Walk(#[from] walkdir::Error),
}

impl BlogmarkError {
    /// Create a parse error with location
    pub fn parse_error(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self::MarkdownAdapter {
            message: message.into(),
            location: SourceLocation::new(line, column),
        }
    }

    /// Create a render error
    pub fn render_error(message: impl Into<String>) -> Self {
        Self::RenderError(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_display_includes_file_when_present() {
        let loc = SourceLocation::with_file("post.md".into(), 3, 7);
        assert_eq!(loc.to_string(), "post.md:3:7");
        assert_eq!(SourceLocation::new(1, 1).to_string(), "1:1");
    }

    #[test]
    fn schema_error_names_the_file() {
        let err = BlogmarkError::Schema {
            path: PathBuf::from("blog/first.md"),
            source: SchemaError::MissingField("title"),
        };
        assert_eq!(
            err.to_string(),
            "blog/first.md: missing required field `title`"
        );
    }
}
