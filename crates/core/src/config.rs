//! Site configuration (`config.json`) and the theme palettes it may name.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Neutral palettes usable as the site's base colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BaseColor {
    /// `gray`
    Gray,
    /// `neutral`
    Neutral,
    /// `stone`
    Stone,
    /// `zinc`
    #[default]
    Zinc,
    /// `slate`
    Slate,
}

/// Palettes usable as the site's accent colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccentColor {
    /// `red`
    Red,
    /// `orange`
    Orange,
    /// `amber`
    Amber,
    /// `yellow`
    Yellow,
    /// `lime`
    Lime,
    /// `green`
    Green,
    /// `emerald`
    Emerald,
    /// `teal`
    Teal,
    /// `cyan`
    Cyan,
    /// `sky`
    #[default]
    Sky,
    /// `blue`
    Blue,
    /// `indigo`
    Indigo,
    /// `violet`
    Violet,
    /// `purple`
    Purple,
    /// `fuchsia`
    Fuchsia,
    /// `pink`
    Pink,
    /// `rose`
    Rose,
}

impl BaseColor {
    /// Every base palette, in declaration order.
    pub const ALL: [BaseColor; 5] = [
        BaseColor::Gray,
        BaseColor::Neutral,
        BaseColor::Stone,
        BaseColor::Zinc,
        BaseColor::Slate,
    ];

    /// Palette name as used in theme class names.
    pub fn as_str(self) -> &'static str {
        match self {
            BaseColor::Gray => "gray",
            BaseColor::Neutral => "neutral",
            BaseColor::Stone => "stone",
            BaseColor::Zinc => "zinc",
            BaseColor::Slate => "slate",
        }
    }
}

impl AccentColor {
    /// Palette name as used in theme class names.
    pub fn as_str(self) -> &'static str {
        match self {
            AccentColor::Red => "red",
            AccentColor::Orange => "orange",
            AccentColor::Amber => "amber",
            AccentColor::Yellow => "yellow",
            AccentColor::Lime => "lime",
            AccentColor::Green => "green",
            AccentColor::Emerald => "emerald",
            AccentColor::Teal => "teal",
            AccentColor::Cyan => "cyan",
            AccentColor::Sky => "sky",
            AccentColor::Blue => "blue",
            AccentColor::Indigo => "indigo",
            AccentColor::Violet => "violet",
            AccentColor::Purple => "purple",
            AccentColor::Fuchsia => "fuchsia",
            AccentColor::Pink => "pink",
            AccentColor::Rose => "rose",
        }
    }
}

/// Errors emitted while loading the site configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// The configuration JSON is malformed or has the wrong shape.
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    /// `SITE` must be an absolute http(s) origin.
    #[error("SITE must be an absolute http(s) URL, got `{0}`")]
    InvalidSite(String),
}

/// Site-wide settings shared by page routes, the feed and the theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct SiteConfig {
    /// Site origin, e.g. `https://example.com`.
    pub site: String,
    /// Path prefix the site is served under; empty for the origin root.
    #[serde(default)]
    pub base: String,
    /// Site title used by the feed and page heads.
    pub site_title: String,
    /// Site description used by the feed and page heads.
    pub site_description: String,
    /// Handle whose Bluesky posts are pulled in by the external loader.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bluesky_identifier: Option<String>,
    /// Neutral palette for backgrounds and text.
    #[serde(default)]
    pub base_color: BaseColor,
    /// Palette for links and highlights.
    #[serde(default)]
    pub accent_color: AccentColor,
    /// `true` shows a manual light/dark toggle instead of following the system.
    #[serde(default)]
    pub manual_dark_mode: bool,
}

impl SiteConfig {
    /// Parses configuration from a JSON string.
    pub fn from_json(input: &str) -> Result<Self, ConfigError> {
        let mut config: SiteConfig = serde_json::from_str(input)?;
        config.normalize()?;
        Ok(config)
    }

    /// Reads and parses a `config.json` file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    fn normalize(&mut self) -> Result<(), ConfigError> {
        if !(self.site.starts_with("http://") || self.site.starts_with("https://")) {
            return Err(ConfigError::InvalidSite(self.site.clone()));
        }
        self.site = self.site.trim_end_matches('/').to_string();

        let trimmed = self.base.trim_matches('/');
        self.base = if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        };
        Ok(())
    }

    /// Root-relative permalink of a blog post: `{BASE}/blog/{id}/`.
    pub fn post_permalink(&self, id: &str) -> String {
        format!("{}/blog/{}/", self.base, id)
    }

    /// Origin plus base, the value feeds advertise as their site.
    pub fn site_root(&self) -> String {
        format!("{}{}", self.site, self.base)
    }

    /// Absolute URL for a root-relative path already carrying the base.
    pub fn absolute_url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.site, path)
        } else {
            format!("{}/{}", self.site, path)
        }
    }
}
