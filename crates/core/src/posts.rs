//! Post listing used by the index pages and the feed.

use crate::schema::BlogPost;

/// Published posts, most recent `pubDate` first.
///
/// The input slice is left untouched; the result borrows from it. Posts with
/// the same date keep their collection order.
pub fn published_posts(posts: &[BlogPost]) -> Vec<&BlogPost> {
    let mut listed: Vec<&BlogPost> = posts.iter().filter(|post| post.data.published).collect();
    listed.sort_by(|a, b| b.data.pub_date.cmp(&a.data.pub_date));
    listed
}

/// Published posts carrying `tag`, in listing order.
pub fn posts_tagged<'a>(posts: &'a [BlogPost], tag: &str) -> Vec<&'a BlogPost> {
    published_posts(posts)
        .into_iter()
        .filter(|post| post.data.tags().iter().any(|t| t == tag))
        .collect()
}

/// Every tag used by a published post, sorted and deduplicated.
pub fn all_tags(posts: &[BlogPost]) -> Vec<&str> {
    let mut tags: Vec<&str> = posts
        .iter()
        .filter(|post| post.data.published)
        .flat_map(|post| post.data.tags().iter().map(String::as_str))
        .collect();
    tags.sort_unstable();
    tags.dedup();
    tags
}
