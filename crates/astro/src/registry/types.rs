//! Embed descriptor and registry types.

/// Describes one kind of embed widget.
#[derive(Debug, Clone, Copy)]
pub struct EmbedDescriptor {
    /// Component the embed renders as (e.g., "Excalidraw").
    pub component_name: &'static str,
    /// Component property that receives the matched URL.
    pub url_argument: &'static str,
    /// Accepts or rejects a candidate URL.
    pub url_matcher: fn(&str) -> Option<&str>,
    /// Name used by the `::name[url]` directive form.
    pub directive_name: &'static str,
    /// Module the component is imported from by the site.
    pub import_path: &'static str,
}

impl EmbedDescriptor {
    /// Runs the matcher.
    pub fn matches<'u>(&self, url: &'u str) -> Option<&'u str> {
        (self.url_matcher)(url)
    }
}

/// Ordered set of embed descriptors.
///
/// Bare URLs are offered to the descriptors in registration order and the
/// first matcher that accepts wins.
#[derive(Debug, Clone, Default)]
pub struct EmbedRegistry {
    embeds: Vec<EmbedDescriptor>,
}

impl EmbedRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a descriptor.
    pub fn register(&mut self, embed: EmbedDescriptor) {
        self.embeds.push(embed);
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, embed: EmbedDescriptor) -> Self {
        self.register(embed);
        self
    }

    /// Registered descriptors, in order.
    pub fn descriptors(&self) -> &[EmbedDescriptor] {
        &self.embeds
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.embeds.is_empty()
    }

    /// Descriptor for a directive name.
    pub fn by_directive(&self, name: &str) -> Option<&EmbedDescriptor> {
        self.embeds.iter().find(|e| e.directive_name == name)
    }

    /// Descriptor for a component name.
    pub fn by_component(&self, name: &str) -> Option<&EmbedDescriptor> {
        self.embeds.iter().find(|e| e.component_name == name)
    }

    /// Descriptor by directive or component name, ignoring ASCII case.
    pub fn find(&self, kind: &str) -> Option<&EmbedDescriptor> {
        self.embeds.iter().find(|e| {
            e.directive_name.eq_ignore_ascii_case(kind) || e.component_name.eq_ignore_ascii_case(kind)
        })
    }

    /// First descriptor whose matcher accepts `url`, with the accepted value.
    pub fn match_url<'u>(&self, url: &'u str) -> Option<(&EmbedDescriptor, &'u str)> {
        self.embeds
            .iter()
            .find_map(|embed| embed.matches(url).map(|value| (embed, value)))
    }
}
