//! Blog post frontmatter schema.
//!
//! Frontmatter is parsed into a YAML mapping first and only becomes a
//! [`PostData`] after it passes [`PostData::from_frontmatter`]. Nothing past
//! the load boundary ever sees untyped frontmatter.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value as YamlValue};
use std::path::PathBuf;
use thiserror::Error;

/// Folder hero images are expected in; paths elsewhere are accepted with a warning.
pub const HERO_IMAGE_PREFIX: &str = "/src/assets/";

const REQUIRED_FIELDS: [&str; 4] = ["title", "description", "pubDate", "published"];

/// Ways a post's frontmatter can violate the schema.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// A required key is absent or null.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    /// A key holds a value of the wrong type, or a date that cannot be coerced.
    #[error("invalid frontmatter: {0}")]
    Invalid(String),
}

/// Validated frontmatter of a blog post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostData {
    /// Title of the post; not repeated in the markdown body.
    pub title: String,
    /// Shown in the post list and the feed.
    pub description: String,
    /// Hides the comment section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_comments: Option<bool>,
    /// Hides the like button.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_likes: Option<bool>,
    /// Publication date; listing order is derived from it.
    #[serde(with = "coerced_date")]
    pub pub_date: DateTime<Utc>,
    /// Unpublished posts are excluded from every listing and feed.
    pub published: bool,
    /// Used for the OG image, falling back to `description`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    /// Date of the last meaningful update.
    #[serde(
        default,
        with = "coerced_date::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_date: Option<DateTime<Utc>>,
    /// Asset path of the hero image, usually under [`HERO_IMAGE_PREFIX`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<String>,
    /// Free-form tags, in the order written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Hides the hero image on the post page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide_hero: Option<bool>,
    /// Renders the post without any image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_image: Option<bool>,
    /// Uses the hero image as OG image instead of the default background.
    #[serde(
        default,
        rename = "useHeroAsOGImage",
        skip_serializing_if = "Option::is_none"
    )]
    pub use_hero_as_og_image: Option<bool>,
    /// Omits title and short description from the OG image.
    #[serde(
        default,
        rename = "noTextInOGImage",
        skip_serializing_if = "Option::is_none"
    )]
    pub no_text_in_og_image: Option<bool>,
}

impl PostData {
    /// Validates a parsed frontmatter mapping against the post schema.
    ///
    /// Unknown keys are ignored.
    pub fn from_frontmatter(mapping: Mapping) -> Result<Self, SchemaError> {
        for field in REQUIRED_FIELDS {
            if matches!(mapping.get(field), None | Some(YamlValue::Null)) {
                return Err(SchemaError::MissingField(field));
            }
        }

        let data: PostData = serde_yaml::from_value(YamlValue::Mapping(mapping))
            .map_err(|err| SchemaError::Invalid(err.to_string()))?;

        if let Some(hero) = &data.hero_image
            && !hero.starts_with(HERO_IMAGE_PREFIX)
        {
            log::warn!("heroImage `{}` is outside {}", hero, HERO_IMAGE_PREFIX);
        }

        Ok(data)
    }

    /// Text for the OG image: the short description, else the description.
    pub fn og_description(&self) -> &str {
        self.short_description
            .as_deref()
            .unwrap_or(&self.description)
    }

    /// Tags, empty when the post declares none.
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or_default()
    }
}

/// A loaded blog post: collection id, validated frontmatter and markdown body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    /// Collection id, also the permalink slug.
    pub id: String,
    /// Validated frontmatter.
    pub data: PostData,
    /// Markdown body after the frontmatter block.
    #[serde(default)]
    pub body: String,
    /// Source file the post was loaded from, when it came from disk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<PathBuf>,
}

/// Converts a date written in frontmatter into a UTC timestamp.
///
/// Accepts RFC 3339, RFC 2822, `YYYY-MM-DD`, `YYYY-MM-DD HH:MM[:SS]`,
/// `YYYY-MM-DDTHH:MM[:SS]` (read as UTC), `Mon DD YYYY`, and integer
/// milliseconds since the epoch.
pub fn coerce_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    for format in ["%Y-%m-%d", "%Y/%m/%d", "%b %d %Y", "%B %d %Y", "%b %d, %Y", "%B %d, %Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return date
                .and_hms_opt(0, 0, 0)
                .map(|naive| Utc.from_utc_datetime(&naive));
        }
    }
    raw.parse::<i64>().ok().and_then(from_millis)
}

fn from_millis(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
}

mod coerced_date {
    use super::{coerce_date, from_millis};
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawDate {
        Millis(i64),
        Text(String),
    }

    fn coerce<E: Error>(raw: RawDate) -> Result<DateTime<Utc>, E> {
        match raw {
            RawDate::Millis(millis) => {
                from_millis(millis).ok_or_else(|| E::custom(format!("invalid date `{millis}`")))
            }
            RawDate::Text(text) => {
                coerce_date(&text).ok_or_else(|| E::custom(format!("invalid date `{text}`")))
            }
        }
    }

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        coerce(RawDate::deserialize(deserializer)?)
    }

    pub mod option {
        use super::*;

        pub fn serialize<S: Serializer>(
            date: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(date) => super::serialize(date, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            Option::<RawDate>::deserialize(deserializer)?
                .map(coerce::<D::Error>)
                .transpose()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn mapping(yaml: &str) -> Mapping {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn accepts_minimal_post() {
        let data = PostData::from_frontmatter(mapping(
            "title: Hello\ndescription: First post\npubDate: 2024-03-01\npublished: true",
        ))
        .unwrap();
        assert_eq!(data.title, "Hello");
        assert!(data.published);
        assert_eq!(data.pub_date.year(), 2024);
        assert_eq!(data.pub_date.month(), 3);
        assert_eq!(data.updated_date, None);
        assert!(data.tags().is_empty());
        assert_eq!(data.og_description(), "First post");
    }

    #[test]
    fn accepts_every_optional_field() {
        let data = PostData::from_frontmatter(mapping(
            r#"
title: Full
description: Long
shortDescription: Short
pubDate: "2023-11-05T10:30:00Z"
updatedDate: Nov 20 2023
published: false
disableComments: true
disableLikes: false
heroImage: /src/assets/hero.png
tags: [rust, astro]
hideHero: true
noImage: false
useHeroAsOGImage: true
noTextInOGImage: true
extraKey: ignored
"#,
        ))
        .unwrap();
        assert_eq!(data.og_description(), "Short");
        assert_eq!(data.tags(), ["rust".to_string(), "astro".to_string()]);
        assert_eq!(data.use_hero_as_og_image, Some(true));
        assert_eq!(data.no_text_in_og_image, Some(true));
        assert_eq!(data.updated_date.map(|d| d.day()), Some(20));
    }

    #[test]
    fn reports_missing_required_field() {
        let err = PostData::from_frontmatter(mapping(
            "title: Hello\npubDate: 2024-01-01\npublished: true",
        ))
        .unwrap_err();
        assert_eq!(err, SchemaError::MissingField("description"));
    }

    #[test]
    fn null_counts_as_missing() {
        let err = PostData::from_frontmatter(mapping(
            "title:\ndescription: d\npubDate: 2024-01-01\npublished: true",
        ))
        .unwrap_err();
        assert_eq!(err, SchemaError::MissingField("title"));
    }

    #[test]
    fn rejects_wrong_types() {
        let err = PostData::from_frontmatter(mapping(
            "title: t\ndescription: d\npubDate: 2024-01-01\npublished: \"yes\"",
        ))
        .unwrap_err();
        assert!(matches!(err, SchemaError::Invalid(_)), "{err:?}");
    }

    #[test]
    fn rejects_unparsable_date() {
        let err = PostData::from_frontmatter(mapping(
            "title: t\ndescription: d\npubDate: someday\npublished: true",
        ))
        .unwrap_err();
        match err {
            SchemaError::Invalid(message) => assert!(message.contains("someday"), "{message}"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn accepts_hero_outside_assets() {
        let data = PostData::from_frontmatter(mapping(
            "title: t\ndescription: d\npubDate: 2024-01-01\npublished: true\nheroImage: /public/hero.png",
        ))
        .unwrap();
        assert_eq!(data.hero_image.as_deref(), Some("/public/hero.png"));
    }

    #[test]
    fn coerces_date_formats() {
        let midnight = coerce_date("2024-06-01").unwrap();
        assert_eq!(midnight.to_rfc3339(), "2024-06-01T00:00:00+00:00");
        assert_eq!(coerce_date("2024-06-01 08:15"), coerce_date("2024-06-01T08:15:00Z"));
        assert_eq!(coerce_date("0").unwrap().year(), 1970);
        assert!(coerce_date("not a date").is_none());
    }

    #[test]
    fn numeric_dates_are_epoch_millis() {
        let data = PostData::from_frontmatter(mapping(
            "title: t\ndescription: d\npubDate: 86400000\npublished: true",
        ))
        .unwrap();
        assert_eq!(data.pub_date.day(), 2);
    }

    #[test]
    fn serializes_with_original_key_names() {
        let data = PostData::from_frontmatter(mapping(
            "title: t\ndescription: d\npubDate: 2024-01-01\npublished: true\nuseHeroAsOGImage: true",
        ))
        .unwrap();
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["pubDate"], "2024-01-01T00:00:00.000Z");
        assert_eq!(json["useHeroAsOGImage"], true);
        assert!(json.get("heroImage").is_none());

        let back: PostData = serde_json::from_value(json).unwrap();
        assert_eq!(back, data);
    }
}
