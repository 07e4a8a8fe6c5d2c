//! Built-in embeds: Excalidraw drawings, YouTube videos and link cards.

use super::matchers::{excalidraw_url, link_card_url, youtube_url};
use super::types::{EmbedDescriptor, EmbedRegistry};

/// Excalidraw drawing exported as SVG under `/src/`.
pub const EXCALIDRAW: EmbedDescriptor = EmbedDescriptor {
    component_name: "Excalidraw",
    url_argument: "src",
    url_matcher: excalidraw_url,
    directive_name: "excalidraw",
    import_path: "src/embeds",
};

/// YouTube video player.
pub const YOUTUBE: EmbedDescriptor = EmbedDescriptor {
    component_name: "YouTube",
    url_argument: "id",
    url_matcher: youtube_url,
    directive_name: "youtube",
    import_path: "src/embeds",
};

/// Card linking to an external page.
pub const LINK_CARD: EmbedDescriptor = EmbedDescriptor {
    component_name: "LinkCard",
    url_argument: "href",
    url_matcher: link_card_url,
    directive_name: "linkcard",
    import_path: "src/embeds",
};

/// Creates the registry the blog uses.
///
/// Order matters for bare URLs: a YouTube link also satisfies the link card
/// matcher, so it must be offered to YouTube first.
///
/// # Example
///
/// ```
/// use blogmark_astro::registry::defaults::default_embed_registry;
///
/// let registry = default_embed_registry();
/// let (embed, _) = registry.match_url("https://youtu.be/dQw4w9WgXcQ").unwrap();
/// assert_eq!(embed.component_name, "YouTube");
/// ```
pub fn default_embed_registry() -> EmbedRegistry {
    EmbedRegistry::new()
        .with(EXCALIDRAW)
        .with(YOUTUBE)
        .with(LINK_CARD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_order() {
        let registry = default_embed_registry();
        let names: Vec<&str> = registry
            .descriptors()
            .iter()
            .map(|e| e.component_name)
            .collect();
        assert_eq!(names, ["Excalidraw", "YouTube", "LinkCard"]);
    }

    #[test]
    fn first_accepting_matcher_wins() {
        let registry = default_embed_registry();
        let pick = |url: &str| registry.match_url(url).map(|(e, _)| e.component_name);

        assert_eq!(pick("/src/assets/diagram.svg"), Some("Excalidraw"));
        assert_eq!(pick("https://www.youtube.com/watch?v=dQw4w9WgXcQ"), Some("YouTube"));
        assert_eq!(pick("https://example.com/diagram.svg"), Some("LinkCard"));
        assert_eq!(pick("/src/assets/diagram.png"), None);
    }

    #[test]
    fn lookup_by_directive_component_or_kind() {
        let registry = default_embed_registry();
        assert_eq!(registry.by_directive("excalidraw").map(|e| e.url_argument), Some("src"));
        assert_eq!(registry.by_component("LinkCard").map(|e| e.directive_name), Some("linkcard"));
        assert_eq!(registry.find("YOUTUBE").map(|e| e.component_name), Some("YouTube"));
        assert!(registry.by_directive("vimeo").is_none());
        assert!(EmbedRegistry::new().is_empty());
    }
}
