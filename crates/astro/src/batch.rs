//! Parallel rendering of a whole collection.

use crate::pipeline::Pipeline;
use crate::renderer::{PipelineOptions, RenderedDocument};
use blogmark_core::BlogPost;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// Options for batch rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BatchOptions {
    /// Maximum number of threads to use. Defaults to rayon's global pool.
    pub max_threads: Option<usize>,
    /// Whether to keep going after a post fails. Defaults to true.
    pub continue_on_error: Option<bool>,
    /// Pipeline options; `mdx` is switched on per post for `.mdx` files.
    pub pipeline: PipelineOptions,
}

/// Result for a single post in a batch.
#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    /// Post id.
    pub id: String,
    /// Rendered document (present on success).
    pub result: Option<RenderedDocument>,
    /// Error message (present on failure).
    pub error: Option<String>,
}

/// Statistics for batch rendering.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchStats {
    /// Number of posts submitted.
    pub total: usize,
    /// Number of posts rendered.
    pub succeeded: usize,
    /// Number of posts that failed.
    pub failed: usize,
    /// Wall time in milliseconds.
    pub processing_time_ms: f64,
}

/// All results plus statistics.
#[derive(Debug, Clone, Serialize)]
pub struct BatchProcessingResult {
    /// One entry per rendered post, in input order.
    pub results: Vec<BatchResult>,
    /// Processing statistics.
    pub stats: BatchStats,
}

/// Renders every post body with the blog pipeline.
///
/// With `continue_on_error` (the default) posts render in parallel and every
/// post gets a result. Otherwise posts render in order and the batch stops at
/// the first failure.
pub fn render_collection(posts: &[BlogPost], options: &BatchOptions) -> BatchProcessingResult {
    let start = Instant::now();
    let continue_on_error = options.continue_on_error.unwrap_or(true);

    let markdown = Pipeline::blog(PipelineOptions {
        mdx: false,
        ..options.pipeline.clone()
    });
    let mdx = Pipeline::blog(PipelineOptions {
        mdx: true,
        ..options.pipeline.clone()
    });

    let pool = options.max_threads.and_then(|threads| {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .ok()
    });

    let succeeded = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);

    let process = |post: &BlogPost| -> BatchResult {
        let pipeline = if is_mdx(post) { &mdx } else { &markdown };
        match pipeline.render(&post.body) {
            Ok(doc) => {
                succeeded.fetch_add(1, Ordering::Relaxed);
                BatchResult {
                    id: post.id.clone(),
                    result: Some(doc),
                    error: None,
                }
            }
            Err(err) => {
                failed.fetch_add(1, Ordering::Relaxed);
                log::warn!("Failed to render {}: {}", post.id, err);
                BatchResult {
                    id: post.id.clone(),
                    result: None,
                    error: Some(err.to_string()),
                }
            }
        }
    };

    let results: Vec<BatchResult> = if continue_on_error {
        match &pool {
            Some(pool) => pool.install(|| posts.par_iter().map(&process).collect()),
            None => posts.par_iter().map(&process).collect(),
        }
    } else {
        let mut results = Vec::with_capacity(posts.len());
        for post in posts {
            let result = process(post);
            let stop = result.error.is_some();
            results.push(result);
            if stop {
                break;
            }
        }
        results
    };

    BatchProcessingResult {
        results,
        stats: BatchStats {
            total: posts.len(),
            succeeded: succeeded.load(Ordering::Relaxed),
            failed: failed.load(Ordering::Relaxed),
            processing_time_ms: start.elapsed().as_secs_f64() * 1000.0,
        },
    }
}

fn is_mdx(post: &BlogPost) -> bool {
    post.file_path
        .as_deref()
        .and_then(|path| path.extension())
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("mdx"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use blogmark_core::PostData;
    use std::path::PathBuf;

    fn post(id: &str, file: &str, body: &str) -> BlogPost {
        let data = PostData::from_frontmatter(
            serde_yaml::from_str("title: T\ndescription: D\npubDate: 2024-01-01\npublished: true")
                .unwrap(),
        )
        .unwrap();
        BlogPost {
            id: id.to_string(),
            data,
            body: body.to_string(),
            file_path: Some(PathBuf::from(file)),
        }
    }

    #[test]
    fn renders_all_posts_in_input_order() {
        let posts = vec![
            post("a", "a.md", "# A"),
            post("b", "b.mdx", "# B\n\n<Excalidraw src=\"/src/assets/b.svg\" />"),
            post("c", "c.md", "text"),
        ];
        let batch = render_collection(&posts, &BatchOptions::default());

        let ids: Vec<&str> = batch.results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(batch.stats.total, 3);
        assert_eq!(batch.stats.succeeded, 3);
        assert_eq!(batch.stats.failed, 0);

        let b = batch.results[1].result.as_ref().unwrap();
        assert!(b.html.contains("embed--excalidraw"), "{}", b.html);
    }

    #[test]
    fn stops_at_first_error_when_asked() {
        let posts = vec![
            post("bad", "bad.mdx", "<div\n"),
            post("good", "good.md", "fine"),
        ];
        let options = BatchOptions {
            continue_on_error: Some(false),
            max_threads: Some(1),
            ..BatchOptions::default()
        };
        let batch = render_collection(&posts, &options);
        assert_eq!(batch.results.len(), 1);
        assert!(batch.results[0].error.is_some());
        assert_eq!(batch.stats.failed, 1);
        assert_eq!(batch.stats.succeeded, 0);
    }
}
