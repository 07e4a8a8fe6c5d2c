use blogmark_astro::{HeadingEntry, Pipeline, PipelineOptions, render_markdown};
use insta::assert_snapshot;

fn render(source: &str) -> String {
    render_markdown(source, &PipelineOptions::default())
        .expect("render should succeed")
        .html
}

fn render_plain(source: &str) -> String {
    let options = PipelineOptions {
        wrap: false,
        themes: None,
        ..PipelineOptions::default()
    };
    render_markdown(source, &options)
        .expect("render should succeed")
        .html
}

#[test]
fn headings_paragraphs_and_titled_code() {
    let doc = render_markdown(
        "# Hello World\n\nSome *text*.\n\n```ts title=\"Example.ts\"\nconst a = 1;\n```\n",
        &PipelineOptions::default(),
    )
    .unwrap();

    assert_eq!(
        doc.html,
        "<h1 id=\"hello-world\">Hello World</h1>\n\
         <p>Some <em>text</em>.</p>\n\
         <pre class=\"astro-code astro-code-themes\" \
         style=\"overflow-x: auto; white-space: pre-wrap; word-wrap: break-word;\" \
         tabindex=\"0\" data-language=\"ts\" data-theme=\"github-light github-dark\" \
         data-title=\"Example.ts\"><code><span class=\"line\">const a = 1;</span></code></pre>"
    );
    assert_eq!(
        doc.headings,
        vec![HeadingEntry {
            depth: 1,
            slug: "hello-world".into(),
            text: "Hello World".into(),
        }]
    );
}

#[test]
fn mermaid_blocks_get_the_marker_class() {
    let html = render_plain("```mermaid\ngraph TD\n  A-->B\n```");
    assert_snapshot!(html, @r#"<pre class="astro-code mermaid" style="overflow-x: auto;" tabindex="0" data-language="mermaid"><code><span class="line">graph TD</span>
<span class="line">  A--&gt;B</span></code></pre>"#);
}

#[test]
fn fence_without_language_is_plaintext() {
    let html = render_plain("```\nplain\n```");
    assert_snapshot!(html, @r#"<pre class="astro-code" style="overflow-x: auto;" tabindex="0" data-language="plaintext"><code><span class="line">plain</span></code></pre>"#);
}

#[test]
fn notation_and_meta_highlights() {
    let html = render_plain("```js {2}\nconst a = 1; // [!code highlight]\nconst b = 2;\n```");
    assert!(html.starts_with(r#"<pre class="astro-code has-highlighted""#), "{html}");
    assert!(html.contains(r#"<span class="line highlighted">const a = 1;</span>"#), "{html}");
    assert!(html.contains(r#"<span class="line highlighted">const b = 2;</span>"#), "{html}");
}

#[test]
fn huge_meta_range_renders() {
    let html = render_plain("```ts {1-18446744073709551615}\nlet a = 1;\n```\n");
    assert!(
        html.contains(r#"<span class="line highlighted">let a = 1;</span>"#),
        "{html}"
    );
}

#[test]
fn standalone_urls_and_directives_become_embeds() {
    let html = render(
        "Intro\n\nhttps://youtu.be/dQw4w9WgXcQ\n\n/src/assets/flow.svg\n\n::linkcard[https://example.com]\n\nSee https://example.com inline.\n",
    );

    assert!(html.starts_with("<p>Intro</p>\n"), "{html}");
    assert!(html.contains(r#"<iframe src="https://www.youtube-nocookie.com/embed/dQw4w9WgXcQ""#));
    assert!(html.contains(r#"<figure class="embed embed--excalidraw"><img src="/src/assets/flow.svg" alt="flow" loading="lazy"></figure>"#));
    assert!(html.contains(r#"<a class="embed embed--link-card" href="https://example.com""#));
    assert!(html.ends_with(r#"<p>See <a href="https://example.com">https://example.com</a> inline.</p>"#), "{html}");
}

#[test]
fn embeds_can_be_switched_off() {
    let options = PipelineOptions {
        embeds: false,
        ..PipelineOptions::default()
    };
    let doc = render_markdown("/src/assets/flow.svg", &options).unwrap();
    assert_eq!(doc.html, "<p>/src/assets/flow.svg</p>");
}

#[test]
fn unknown_directive_stays_a_paragraph() {
    assert_eq!(render("::vimeo{id=\"1\"}"), "<p>::vimeo{id=\"1\"}</p>");
}

#[test]
fn task_lists() {
    assert_eq!(
        render("- [x] done\n- [ ] todo\n"),
        "<ul class=\"contains-task-list\">\n\
         <li class=\"task-list-item\"><input type=\"checkbox\" checked disabled> done</li>\n\
         <li class=\"task-list-item\"><input type=\"checkbox\" disabled> todo</li>\n\
         </ul>"
    );
}

#[test]
fn ordered_list_start_and_loose_items() {
    assert_eq!(
        render("3. one\n\n4. two\n"),
        "<ol start=\"3\">\n<li>\n<p>one</p>\n</li>\n<li>\n<p>two</p>\n</li>\n</ol>"
    );
}

#[test]
fn tables_keep_alignment() {
    let html = render("| a | b |\n|:-|-:|\n| 1 | 2 |");
    assert_eq!(
        html,
        "<table>\n<thead>\n<tr>\n<th align=\"left\">a</th>\n<th align=\"right\">b</th>\n</tr>\n</thead>\n\
         <tbody>\n<tr>\n<td align=\"left\">1</td>\n<td align=\"right\">2</td>\n</tr>\n</tbody>\n</table>"
    );
}

#[test]
fn math_is_left_for_the_math_renderer() {
    assert_snapshot!(render("$$\nx^2\n$$"), @r#"<pre><code class="language-math math-display">x^2</code></pre>"#);
    assert_snapshot!(render("Area $a^2$."), @r#"<p>Area <code class="language-math math-inline">a^2</code>.</p>"#);
}

#[test]
fn raw_html_passes_through() {
    assert_eq!(render("<div>hi</div>"), "<div>hi</div>");
}

#[test]
fn frontmatter_is_not_rendered() {
    assert_eq!(render("---\ntitle: x\n---\n# Hi"), "<h1 id=\"hi\">Hi</h1>");
}

#[test]
fn duplicate_headings_get_unique_slugs() {
    let doc = render_markdown("# Intro\n\n## Intro\n\n## Intro!", &PipelineOptions::default()).unwrap();
    let slugs: Vec<&str> = doc.headings.iter().map(|h| h.slug.as_str()).collect();
    assert_eq!(slugs, ["intro", "intro-1", "intro-2"]);
    assert!(doc.html.contains(r#"<h2 id="intro-1">Intro</h2>"#));
}

#[test]
fn footnotes_are_collected_into_a_section() {
    let html = render("Claim.[^a]\n\n[^a]: Source.\n");
    assert!(html.starts_with(
        r##"<p>Claim.<sup><a href="#user-content-fn-a" id="user-content-fnref-a" data-footnote-ref aria-describedby="footnote-label">1</a></sup></p>"##
    ), "{html}");
    assert!(html.contains(r#"<section data-footnotes class="footnotes">"#));
    assert!(html.contains(r##"<li id="user-content-fn-a">"##));
    assert!(html.contains("Source. <a href=\"#user-content-fnref-a\""));
}

#[test]
fn reference_links_resolve() {
    assert_eq!(
        render("[docs][d]\n\n[d]: https://example.com \"Docs\""),
        "<p><a href=\"https://example.com\" title=\"Docs\">docs</a></p>"
    );
}

#[test]
fn pipeline_exposes_the_transformed_tree() {
    let pipeline = Pipeline::default();
    let (tree, _) = pipeline.to_hast("```mermaid\nA\n```").unwrap();
    let pre = tree.children().unwrap()[0].as_element().unwrap();
    assert_eq!(pre.tag_name, "pre");
    assert!(pre.class_list().contains(&"mermaid"));
}
