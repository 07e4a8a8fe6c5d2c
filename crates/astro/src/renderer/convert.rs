//! mdast → hast conversion.
//!
//! Output follows the element shapes remark-rehype produces (newline text
//! nodes between block children, `task-list-item` classes, the GFM footnote
//! section), with two additions: fenced code is built through the code
//! transformers, and root-level paragraphs that are only an embed become an
//! embed component.

use super::code::render_code_block;
use super::types::{HeadingEntry, PipelineOptions};
use crate::hast::{Element, Node};
use crate::registry::EmbedRegistry;
use crate::transform::code_meta::CodeTransformer;
use crate::transform::embeds::embed_for_paragraph;
use blogmark_core::Slugger;
use markdown::mdast;
use std::collections::HashMap;

/// Converts one markdown tree. Not reusable: heading slugs and footnote
/// numbering are per document.
pub struct Converter<'a> {
    source: &'a str,
    options: &'a PipelineOptions,
    code_transformers: &'a [Box<dyn CodeTransformer>],
    registry: &'a EmbedRegistry,
    slugger: Slugger,
    headings: Vec<HeadingEntry>,
    definitions: HashMap<String, &'a mdast::Definition>,
    footnote_definitions: HashMap<String, &'a mdast::FootnoteDefinition>,
    footnote_order: Vec<String>,
    footnote_calls: HashMap<String, usize>,
}

impl<'a> Converter<'a> {
    /// Creates a converter for a document whose markdown is `source`.
    pub fn new(
        source: &'a str,
        options: &'a PipelineOptions,
        code_transformers: &'a [Box<dyn CodeTransformer>],
        registry: &'a EmbedRegistry,
    ) -> Self {
        Self {
            source,
            options,
            code_transformers,
            registry,
            slugger: Slugger::new(),
            headings: Vec::new(),
            definitions: HashMap::new(),
            footnote_definitions: HashMap::new(),
            footnote_order: Vec::new(),
            footnote_calls: HashMap::new(),
        }
    }

    /// Converts `tree` into a hast root and the headings found on the way.
    pub fn convert(mut self, tree: &'a mdast::Node) -> (Node, Vec<HeadingEntry>) {
        self.collect_definitions(tree);

        let mut children = Vec::new();
        for child in tree.children().map(Vec::as_slice).unwrap_or_default() {
            if let mdast::Node::Paragraph(paragraph) = child
                && self.options.embeds
                && let Some(embed) =
                    embed_for_paragraph(paragraph, self.slice(child), self.registry)
            {
                children.push(embed.into());
                continue;
            }
            children.extend(self.node(child));
        }

        if let Some(section) = self.footnote_section() {
            children.push(section.into());
        }

        (Node::root(wrap(children, false)), self.headings)
    }

    fn collect_definitions(&mut self, node: &'a mdast::Node) {
        match node {
            mdast::Node::Definition(def) => {
                self.definitions
                    .entry(def.identifier.clone())
                    .or_insert(def);
            }
            mdast::Node::FootnoteDefinition(def) => {
                self.footnote_definitions
                    .entry(def.identifier.clone())
                    .or_insert(def);
            }
            _ => {}
        }
        if let Some(children) = node.children() {
            for child in children {
                self.collect_definitions(child);
            }
        }
    }

    fn slice(&self, node: &mdast::Node) -> Option<&'a str> {
        let position = node.position()?;
        self.source.get(position.start.offset..position.end.offset)
    }

    fn all(&mut self, nodes: &'a [mdast::Node]) -> Vec<Node> {
        let mut out = Vec::new();
        for node in nodes {
            out.extend(self.node(node));
        }
        out
    }

    fn node(&mut self, node: &'a mdast::Node) -> Vec<Node> {
        match node {
            mdast::Node::Root(root) => self.all(&root.children),
            mdast::Node::Paragraph(p) => vec![element("p", self.all(&p.children))],
            mdast::Node::Heading(heading) => {
                let text = node.to_string();
                let slug = self.slugger.next_slug(&text);
                self.headings.push(HeadingEntry {
                    depth: heading.depth,
                    slug: slug.clone(),
                    text,
                });
                let el = Element::new(format!("h{}", heading.depth))
                    .with_property("id", slug)
                    .with_children(self.all(&heading.children));
                vec![el.into()]
            }
            mdast::Node::Blockquote(quote) => {
                let children = self.all(&quote.children);
                vec![element("blockquote", wrap(children, true))]
            }
            mdast::Node::List(list) => vec![self.list(list).into()],
            mdast::Node::Code(code) => vec![
                render_code_block(
                    &code.value,
                    code.lang.as_deref(),
                    code.meta.as_deref(),
                    self.options,
                    self.code_transformers,
                )
                .into(),
            ],
            mdast::Node::Math(math) => {
                let code = Element::new("code")
                    .with_property(
                        "className",
                        vec!["language-math".to_string(), "math-display".to_string()],
                    )
                    .with_children(vec![Node::text(&math.value)]);
                vec![element("pre", vec![code.into()])]
            }
            mdast::Node::InlineMath(math) => {
                let code = Element::new("code")
                    .with_property(
                        "className",
                        vec!["language-math".to_string(), "math-inline".to_string()],
                    )
                    .with_children(vec![Node::text(&math.value)]);
                vec![code.into()]
            }
            mdast::Node::Table(table) => vec![self.table(table).into()],
            mdast::Node::ThematicBreak(_) => vec![element("hr", Vec::new())],
            mdast::Node::Break(_) => vec![element("br", Vec::new()), Node::text("\n")],
            mdast::Node::Text(text) => vec![Node::text(&text.value)],
            mdast::Node::InlineCode(code) => vec![element("code", vec![Node::text(&code.value)])],
            mdast::Node::Emphasis(em) => vec![element("em", self.all(&em.children))],
            mdast::Node::Strong(strong) => vec![element("strong", self.all(&strong.children))],
            mdast::Node::Delete(del) => vec![element("del", self.all(&del.children))],
            mdast::Node::Link(link) => {
                vec![anchor(&link.url, link.title.as_deref(), self.all(&link.children)).into()]
            }
            mdast::Node::Image(image) => {
                vec![img(&image.url, &image.alt, image.title.as_deref()).into()]
            }
            mdast::Node::LinkReference(reference) => {
                let children = self.all(&reference.children);
                match self.definitions.get(&reference.identifier) {
                    Some(def) => vec![anchor(&def.url, def.title.as_deref(), children).into()],
                    None => {
                        let mut out = vec![Node::text("[")];
                        out.extend(children);
                        out.push(Node::text("]"));
                        out
                    }
                }
            }
            mdast::Node::ImageReference(reference) => {
                match self.definitions.get(&reference.identifier) {
                    Some(def) => vec![img(&def.url, &reference.alt, def.title.as_deref()).into()],
                    None => vec![Node::text(format!("![{}]", reference.alt))],
                }
            }
            mdast::Node::Html(html) => {
                if self.options.raw_html {
                    vec![Node::raw(&html.value)]
                } else {
                    log::debug!("Escaping raw HTML: {}", html.value);
                    vec![Node::text(&html.value)]
                }
            }
            mdast::Node::FootnoteReference(reference) => {
                vec![self.footnote_reference(&reference.identifier).into()]
            }
            mdast::Node::MdxJsxFlowElement(jsx) => {
                self.jsx(jsx.name.as_deref(), &jsx.attributes, &jsx.children)
            }
            mdast::Node::MdxJsxTextElement(jsx) => {
                self.jsx(jsx.name.as_deref(), &jsx.attributes, &jsx.children)
            }
            mdast::Node::MdxFlowExpression(_) | mdast::Node::MdxTextExpression(_) => {
                log::warn!("MDX expressions are not evaluated; dropping one");
                Vec::new()
            }
            mdast::Node::Definition(_)
            | mdast::Node::FootnoteDefinition(_)
            | mdast::Node::Yaml(_)
            | mdast::Node::Toml(_)
            | mdast::Node::MdxjsEsm(_) => Vec::new(),
            _ => {
                log::warn!("Unhandled markdown node type: {:?}", node);
                Vec::new()
            }
        }
    }

    fn list(&mut self, list: &'a mdast::List) -> Element {
        let mut el = Element::new(if list.ordered { "ol" } else { "ul" });
        if list.ordered
            && let Some(start) = list.start
            && start != 1
        {
            el.properties.insert("start", start);
        }

        let has_tasks = list
            .children
            .iter()
            .any(|c| matches!(c, mdast::Node::ListItem(item) if item.checked.is_some()));
        if has_tasks {
            el.add_class("contains-task-list");
        }

        let mut items = Vec::new();
        for child in &list.children {
            match child {
                mdast::Node::ListItem(item) => items.push(self.list_item(item, list.spread).into()),
                other => items.extend(self.node(other)),
            }
        }
        el.children = wrap(items, true);
        el
    }

    fn list_item(&mut self, item: &'a mdast::ListItem, list_spread: bool) -> Element {
        let loose = list_spread || item.spread;
        let mut results = self.all(&item.children);

        let mut li = Element::new("li");
        if let Some(checked) = item.checked {
            li.add_class("task-list-item");
            let checkbox: Node = Element::new("input")
                .with_property("type", "checkbox")
                .with_property("checked", checked)
                .with_property("disabled", true)
                .into();
            match results.first_mut().and_then(Node::as_element_mut) {
                Some(p) if p.tag_name == "p" => {
                    p.children.insert(0, Node::text(" "));
                    p.children.insert(0, checkbox);
                }
                _ => results.insert(0, element("p", vec![checkbox])),
            }
        }

        let mut children = Vec::new();
        let count = results.len();
        for (index, child) in results.into_iter().enumerate() {
            let paragraph = is_tag(&child, "p");
            if loose || index != 0 || !paragraph {
                children.push(Node::text("\n"));
            }
            match child {
                Node::Element(p) if paragraph && !loose => children.extend(p.children),
                other => children.push(other),
            }
            if index + 1 == count && (loose || !paragraph) {
                children.push(Node::text("\n"));
            }
        }
        li.children = children;
        li
    }

    fn table(&mut self, table: &'a mdast::Table) -> Element {
        let mut rows = Vec::new();
        for (index, row) in table.children.iter().enumerate() {
            let mdast::Node::TableRow(row) = row else {
                continue;
            };
            let tag = if index == 0 { "th" } else { "td" };
            let mut cells = Vec::new();
            for (column, cell) in row.children.iter().enumerate() {
                let mdast::Node::TableCell(cell) = cell else {
                    continue;
                };
                let mut el = Element::new(tag).with_children(self.all(&cell.children));
                if let Some(align) = table.align.get(column).and_then(|a| align_value(*a)) {
                    el.properties.insert("align", align);
                }
                cells.push(el.into());
            }
            rows.push(element("tr", wrap(cells, true)));
        }

        let mut sections = Vec::new();
        let mut rows = rows.into_iter();
        if let Some(head) = rows.next() {
            sections.push(element("thead", wrap(vec![head], true)));
        }
        let body: Vec<Node> = rows.collect();
        if !body.is_empty() {
            sections.push(element("tbody", wrap(body, true)));
        }
        Element::new("table").with_children(wrap(sections, true))
    }

    fn jsx(
        &mut self,
        name: Option<&str>,
        attributes: &'a [mdast::AttributeContent],
        children: &'a [mdast::Node],
    ) -> Vec<Node> {
        let children = self.all(children);
        let Some(name) = name else {
            return children;
        };

        let mut el = Element::new(name);
        for attribute in attributes {
            match attribute {
                mdast::AttributeContent::Property(prop) => match &prop.value {
                    None => el.properties.insert(&prop.name, true),
                    Some(mdast::AttributeValue::Literal(value)) => {
                        el.properties.insert(&prop.name, value.as_str())
                    }
                    Some(mdast::AttributeValue::Expression(_)) => {
                        log::warn!("Dropping expression attribute `{}` on <{}>", prop.name, name);
                    }
                },
                mdast::AttributeContent::Expression(_) => {
                    log::warn!("Dropping spread attributes on <{}>", name);
                }
            }
        }
        el.children = children;
        vec![el.into()]
    }

    fn footnote_reference(&mut self, identifier: &str) -> Element {
        let id = footnote_id(identifier);
        if !self.footnote_order.iter().any(|known| known == identifier) {
            self.footnote_order.push(identifier.to_string());
        }
        let ordinal = self
            .footnote_order
            .iter()
            .position(|known| known == identifier)
            .map_or(1, |i| i + 1);
        let calls = self.footnote_calls.entry(identifier.to_string()).or_insert(0);
        *calls += 1;
        let ref_id = if *calls == 1 {
            format!("user-content-fnref-{id}")
        } else {
            format!("user-content-fnref-{id}-{calls}")
        };

        let link = Element::new("a")
            .with_property("href", format!("#user-content-fn-{id}"))
            .with_property("id", ref_id)
            .with_property("dataFootnoteRef", true)
            .with_property("aria-describedby", "footnote-label")
            .with_children(vec![Node::text(ordinal.to_string())]);
        Element::new("sup").with_children(vec![link.into()])
    }

    fn footnote_section(&mut self) -> Option<Element> {
        if self.footnote_order.is_empty() {
            return None;
        }

        let mut items = Vec::new();
        for identifier in std::mem::take(&mut self.footnote_order) {
            let Some(def) = self.footnote_definitions.get(&identifier).copied() else {
                continue;
            };
            let id = footnote_id(&identifier);
            let mut content = self.all(&def.children);
            let backref: Node = Element::new("a")
                .with_property("href", format!("#user-content-fnref-{id}"))
                .with_property("dataFootnoteBackref", true)
                .with_property("aria-label", "Back to reference")
                .with_property("className", vec!["data-footnote-backref".to_string()])
                .with_children(vec![Node::text("↩")])
                .into();
            match content.last_mut().and_then(Node::as_element_mut) {
                Some(p) if p.tag_name == "p" => {
                    p.children.push(Node::text(" "));
                    p.children.push(backref);
                }
                _ => content.push(backref),
            }
            let li = Element::new("li")
                .with_property("id", format!("user-content-fn-{id}"))
                .with_children(wrap(content, true));
            items.push(li.into());
        }
        if items.is_empty() {
            return None;
        }

        let heading = Element::new("h2")
            .with_property("className", vec!["sr-only".to_string()])
            .with_property("id", "footnote-label")
            .with_children(vec![Node::text("Footnotes")]);
        let section = Element::new("section")
            .with_property("dataFootnotes", true)
            .with_property("className", vec!["footnotes".to_string()])
            .with_children(wrap(
                vec![heading.into(), element("ol", wrap(items, true))],
                true,
            ));
        Some(section)
    }
}

/// Interleaves `nodes` with newline text nodes, optionally also before the
/// first and after the last.
fn wrap(nodes: Vec<Node>, loose: bool) -> Vec<Node> {
    let mut out = Vec::with_capacity(nodes.len() * 2 + 1);
    if loose {
        out.push(Node::text("\n"));
    }
    let had_nodes = !nodes.is_empty();
    for (index, node) in nodes.into_iter().enumerate() {
        if index > 0 {
            out.push(Node::text("\n"));
        }
        out.push(node);
    }
    if loose && had_nodes {
        out.push(Node::text("\n"));
    }
    out
}

fn element(tag: &str, children: Vec<Node>) -> Node {
    Element::new(tag).with_children(children).into()
}

fn is_tag(node: &Node, tag: &str) -> bool {
    node.as_element().is_some_and(|el| el.tag_name == tag)
}

fn anchor(url: &str, title: Option<&str>, children: Vec<Node>) -> Element {
    let mut a = Element::new("a").with_property("href", url);
    if let Some(title) = title {
        a.properties.insert("title", title);
    }
    a.with_children(children)
}

fn img(url: &str, alt: &str, title: Option<&str>) -> Element {
    let mut el = Element::new("img")
        .with_property("src", url)
        .with_property("alt", alt);
    if let Some(title) = title {
        el.properties.insert("title", title);
    }
    el
}

fn align_value(align: mdast::AlignKind) -> Option<&'static str> {
    match align {
        mdast::AlignKind::Left => Some("left"),
        mdast::AlignKind::Right => Some("right"),
        mdast::AlignKind::Center => Some("center"),
        mdast::AlignKind::None => None,
    }
}

fn footnote_id(identifier: &str) -> String {
    identifier
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
        .collect()
}
