//! Rewrites embed components (Excalidraw, YouTube, LinkCard) into plain HTML.

use crate::registry::matchers::{http_host, youtube_video_id};
use blogmark_core::BlogmarkError;
use html_escape::{decode_html_entities, encode_text};
use lol_html::html_content::ContentType;
use lol_html::{ElementContentHandlers, RewriteStrSettings, Selector, element, rewrite_str};
use std::borrow::Cow;

/// Returns lol_html handlers for the built-in embed components.
pub fn embed_handlers() -> Vec<(Cow<'static, Selector>, ElementContentHandlers<'static>)> {
    vec![excalidraw_handler(), youtube_handler(), link_card_handler()]
}

/// Rewrites every embed component in `html`.
pub fn rewrite_embeds(html: &str) -> Result<String, BlogmarkError> {
    rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: embed_handlers(),
            ..RewriteStrSettings::new()
        },
    )
    .map_err(|err| BlogmarkError::render_error(format!("embed rewrite failed: {err}")))
}

fn excalidraw_handler() -> (Cow<'static, Selector>, ElementContentHandlers<'static>) {
    element!("Excalidraw", |el| {
        let src = el.get_attribute("src").unwrap_or_default();
        let alt = src
            .rsplit('/')
            .next()
            .and_then(|name| name.strip_suffix(".svg"))
            .unwrap_or_default();
        let figure = format!(
            "<figure class=\"embed embed--excalidraw\"><img src=\"{src}\" alt=\"{alt}\" loading=\"lazy\"></figure>"
        );
        el.replace(&figure, ContentType::Html);
        Ok(())
    })
}

fn youtube_handler() -> (Cow<'static, Selector>, ElementContentHandlers<'static>) {
    element!("YouTube", |el| {
        let raw = el.get_attribute("id").unwrap_or_default();
        let url = decode_html_entities(&raw);
        let html = match youtube_video_id(&url) {
            Some(id) => format!(
                "<div class=\"embed embed--youtube\"><iframe src=\"https://www.youtube-nocookie.com/embed/{id}\" \
                 title=\"YouTube video player\" loading=\"lazy\" \
                 allow=\"accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture\" \
                 allowfullscreen></iframe></div>"
            ),
            None => {
                log::debug!("YouTube embed without a video id: {}", url);
                format!("<a href=\"{raw}\">{raw}</a>")
            }
        };
        el.replace(&html, ContentType::Html);
        Ok(())
    })
}

fn link_card_handler() -> (Cow<'static, Selector>, ElementContentHandlers<'static>) {
    element!("LinkCard", |el| {
        let href = el.get_attribute("href").unwrap_or_default();
        let url = decode_html_entities(&href);
        let host = http_host(&url).unwrap_or_default();
        let card = format!(
            "<a class=\"embed embed--link-card\" href=\"{href}\" rel=\"noopener noreferrer\" target=\"_blank\">\
             <span class=\"embed--link-card__host\">{}</span>\
             <span class=\"embed--link-card__url\">{href}</span></a>",
            encode_text(host)
        );
        el.replace(&card, ContentType::Html);
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    #[test]
    fn excalidraw_becomes_figure() {
        let html = rewrite_embeds(r#"<p>x</p><Excalidraw src="/src/assets/flow.svg"></Excalidraw>"#).unwrap();
        assert_snapshot!(html, @r#"<p>x</p><figure class="embed embed--excalidraw"><img src="/src/assets/flow.svg" alt="flow" loading="lazy"></figure>"#);
    }

    #[test]
    fn youtube_becomes_nocookie_iframe() {
        let html = rewrite_embeds(
            r#"<YouTube id="https://www.youtube.com/watch?v=dQw4w9WgXcQ&amp;t=1"></YouTube>"#,
        )
        .unwrap();
        assert!(html.starts_with(r#"<div class="embed embed--youtube"><iframe src="https://www.youtube-nocookie.com/embed/dQw4w9WgXcQ""#));
        assert!(html.ends_with("allowfullscreen></iframe></div>"));
    }

    #[test]
    fn youtube_without_id_falls_back_to_link() {
        let html = rewrite_embeds(r#"<YouTube id="https://youtu.be/bad"></YouTube>"#).unwrap();
        assert_snapshot!(html, @r#"<a href="https://youtu.be/bad">https://youtu.be/bad</a>"#);
    }

    #[test]
    fn link_card_shows_host_and_url() {
        let html = rewrite_embeds(r#"<LinkCard href="https://example.com/a?b=1"></LinkCard>"#).unwrap();
        assert_snapshot!(html, @r#"<a class="embed embed--link-card" href="https://example.com/a?b=1" rel="noopener noreferrer" target="_blank"><span class="embed--link-card__host">example.com</span><span class="embed--link-card__url">https://example.com/a?b=1</span></a>"#);
    }

    #[test]
    fn other_html_is_untouched() {
        let input = r#"<pre class="astro-code" data-language="ts"><code>let a = 1;</code></pre>"#;
        assert_eq!(rewrite_embeds(input).unwrap(), input);
    }
}
