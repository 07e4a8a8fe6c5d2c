//! Feed projection: the data an RSS route needs, without the XML.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::SiteConfig;
use crate::posts::published_posts;
use crate::schema::BlogPost;

/// One feed entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    /// Post title.
    pub title: String,
    /// Post description.
    pub description: String,
    /// Publication date.
    pub pub_date: DateTime<Utc>,
    /// Root-relative permalink, `{BASE}/blog/{id}/`.
    pub link: String,
}

/// Channel metadata plus items, ready for an external RSS serializer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feed {
    /// Channel title, the site title.
    pub title: String,
    /// Channel description, the site description.
    pub description: String,
    /// Origin plus base path.
    pub site: String,
    /// Entries, newest first.
    pub items: Vec<FeedItem>,
}

impl Feed {
    /// Builds the feed from a whole collection; unpublished posts are dropped
    /// and items are ordered newest first.
    pub fn from_posts(config: &SiteConfig, posts: &[BlogPost]) -> Self {
        let items = published_posts(posts)
            .into_iter()
            .map(|post| FeedItem {
                title: post.data.title.clone(),
                description: post.data.description.clone(),
                pub_date: post.data.pub_date,
                link: config.post_permalink(&post.id),
            })
            .collect();

        Feed {
            title: config.site_title.clone(),
            description: config.site_description.clone(),
            site: config.site_root(),
            items,
        }
    }
}
