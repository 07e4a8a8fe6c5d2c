//! Blog collection loading from a content directory.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::BlogmarkError;
use crate::frontmatter::split_frontmatter;
use crate::schema::{BlogPost, PostData};
use crate::slug::entry_id;

/// Extensions picked up by the collection loader.
pub const CONTENT_EXTENSIONS: [&str; 2] = ["md", "mdx"];

/// Whether a file belongs to the collection: a `.md`/`.mdx` file whose name
/// does not start with `_`.
pub fn is_content_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if name.starts_with('_') {
        return false;
    }
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| CONTENT_EXTENSIONS.contains(&ext))
}

/// Parses and validates a single post from its source text.
pub fn parse_post(id: String, path: &Path, source: &str) -> Result<BlogPost, BlogmarkError> {
    let split = split_frontmatter(source).map_err(|source| BlogmarkError::Frontmatter {
        path: path.to_path_buf(),
        source,
    })?;
    let mapping = split.parse().map_err(|source| BlogmarkError::Frontmatter {
        path: path.to_path_buf(),
        source,
    })?;
    let data = PostData::from_frontmatter(mapping).map_err(|source| BlogmarkError::Schema {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(BlogPost {
        id,
        data,
        body: split.body.to_string(),
        file_path: Some(path.to_path_buf()),
    })
}

/// Loads every post under `root`, in path order.
///
/// The first invalid post aborts the load. When two files map to the same
/// id the later one is skipped with a warning.
pub fn load_collection(root: &Path) -> Result<Vec<BlogPost>, BlogmarkError> {
    let mut posts = Vec::new();
    let mut ids = HashSet::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() || !is_content_file(entry.path()) {
            continue;
        }

        let path: PathBuf = entry.path().to_path_buf();
        let relative = path.strip_prefix(root).unwrap_or(path.as_path());
        let id = entry_id(relative);
        if !ids.insert(id.clone()) {
            log::warn!("Duplicate post id `{}` from {}, skipping", id, path.display());
            continue;
        }

        let source = std::fs::read_to_string(&path)?;
        posts.push(parse_post(id, &path, &source)?);
    }

    log::info!("Loaded {} posts from {}", posts.len(), root.display());
    Ok(posts)
}
