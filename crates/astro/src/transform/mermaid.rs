//! Adds the `mermaid` class to `pre` blocks fenced as `mermaid`, so the
//! diagram renderer that runs next can find them.

use super::HastTransform;
use crate::hast::{Element, Node, PropertyValue, VisitAction, visit_mut};

/// Language value and class name the tagger works with.
pub const MERMAID: &str = "mermaid";

/// Whether `node` is a `pre` element whose `dataLanguage` is `mermaid`.
///
/// Non-elements, other tags, a missing `dataLanguage` and non-string values
/// all classify as non-matching.
pub fn is_mermaid_pre(node: &Node) -> bool {
    let Node::Element(el) = node else {
        return false;
    };
    el.tag_name == "pre"
        && el
            .properties
            .get("dataLanguage")
            .and_then(PropertyValue::as_str)
            == Some(MERMAID)
}

/// Appends `class` to the element's `className`.
///
/// A string class becomes a one-element list, and an absent or non-list
/// value starts a new list. Existing entries are kept in order and the new
/// class is appended even if already present.
pub fn append_class(el: &mut Element, class: &str) {
    let mut classes = match el.properties.get_mut("className") {
        Some(PropertyValue::List(items)) => std::mem::take(items),
        Some(PropertyValue::String(s)) => vec![std::mem::take(s)],
        _ => Vec::new(),
    };
    classes.push(class.to_string());
    el.properties.insert("className", classes);
}

/// Walks `tree` once and tags every Mermaid `pre`.
pub fn tag_mermaid_classes(tree: &mut Node) {
    visit_mut(tree, &mut |node| {
        if is_mermaid_pre(node)
            && let Some(el) = node.as_element_mut()
        {
            append_class(el, MERMAID);
        }
        VisitAction::Continue
    });
}

/// [`tag_mermaid_classes`] as a pipeline transform.
#[derive(Debug, Default, Clone, Copy)]
pub struct MermaidClassTagger;

impl HastTransform for MermaidClassTagger {
    fn name(&self) -> &'static str {
        "add-mermaid-classname"
    }

    fn transform(&self, tree: &mut Node) {
        tag_mermaid_classes(tree);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pre(lang: &str) -> Element {
        Element::new("pre").with_property("dataLanguage", lang)
    }

    fn classes(node: &Node) -> Option<&PropertyValue> {
        node.as_element().and_then(|el| el.properties.get("className"))
    }

    #[test]
    fn no_matching_node_leaves_tree_identical() {
        let mut tree = Node::root(vec![
            pre("rust").into(),
            Element::new("div")
                .with_property("dataLanguage", MERMAID)
                .into(),
            Node::text("mermaid"),
        ]);
        let before = tree.clone();
        tag_mermaid_classes(&mut tree);
        assert_eq!(tree, before);
    }

    #[test]
    fn string_class_becomes_list() {
        let mut tree = Node::root(vec![pre(MERMAID).with_property("className", "foo").into()]);
        tag_mermaid_classes(&mut tree);
        assert_eq!(
            classes(&tree.children().unwrap()[0]),
            Some(&PropertyValue::List(vec!["foo".into(), "mermaid".into()]))
        );
    }

    #[test]
    fn missing_class_starts_new_list() {
        let mut tree = Node::root(vec![pre(MERMAID).into()]);
        tag_mermaid_classes(&mut tree);
        assert_eq!(
            classes(&tree.children().unwrap()[0]),
            Some(&PropertyValue::List(vec!["mermaid".into()]))
        );
    }

    #[test]
    fn non_list_class_is_replaced() {
        let mut el = pre(MERMAID).with_property("className", true);
        append_class(&mut el, MERMAID);
        assert_eq!(el.class_list(), ["mermaid"]);
    }

    #[test]
    fn existing_list_is_appended_without_dedupe() {
        let mut el = pre(MERMAID).with_property(
            "className",
            vec!["astro-code".to_string(), "mermaid".to_string()],
        );
        append_class(&mut el, MERMAID);
        assert_eq!(el.class_list(), ["astro-code", "mermaid", "mermaid"]);
    }

    #[test]
    fn nested_blocks_are_all_tagged() {
        let mut tree: Node = serde_json::from_value(json!({
            "type": "root",
            "children": [{
                "type": "element",
                "tagName": "section",
                "children": [
                    { "type": "element", "tagName": "pre", "properties": { "dataLanguage": "mermaid" } },
                    { "type": "element", "tagName": "pre", "properties": { "dataLanguage": "mermaid", "className": ["x"] } }
                ]
            }, {
                "type": "element",
                "tagName": "pre",
                "properties": { "dataLanguage": 1 }
            }]
        }))
        .unwrap();

        tag_mermaid_classes(&mut tree);

        let section = tree.children().unwrap()[0].as_element().unwrap();
        assert_eq!(section.children[0].as_element().unwrap().class_list(), ["mermaid"]);
        assert_eq!(section.children[1].as_element().unwrap().class_list(), ["x", "mermaid"]);
        assert!(tree.children().unwrap()[1].as_element().unwrap().class_list().is_empty());
    }

    #[test]
    fn malformed_nodes_do_not_match() {
        let node: Node = serde_json::from_value(json!({ "type": "element", "tagName": "pre" })).unwrap();
        assert!(!is_mermaid_pre(&node));
        let node: Node = serde_json::from_value(json!({ "type": "element" })).unwrap();
        assert!(!is_mermaid_pre(&node));
        assert!(!is_mermaid_pre(&Node::text("pre")));
    }

    #[test]
    fn json_tree_without_match_round_trips_unchanged() {
        let input = json!({
            "type": "root",
            "children": [
                {
                    "type": "element",
                    "tagName": "pre",
                    "properties": { "className": ["astro-code"], "dataLanguage": "ts", "tabIndex": 0 },
                    "children": [{ "type": "text", "value": "let a = 1;" }],
                    "position": { "start": { "line": 1, "column": 1, "offset": 0 } }
                },
                {
                    "type": "element",
                    "tagName": "area",
                    "properties": { "coords": [0, 0, 10, 10], "alt": null },
                    "children": []
                },
                { "type": "mdxjsEsm", "value": "import A from './a'", "data": { "estree": null } }
            ]
        });
        let mut tree: Node = serde_json::from_value(input.clone()).unwrap();
        tag_mermaid_classes(&mut tree);
        assert_eq!(serde_json::to_value(&tree).unwrap(), input);
    }

    #[test]
    fn blocks_inside_jsx_wrappers_are_tagged() {
        let mut tree: Node = serde_json::from_value(json!({
            "type": "root",
            "children": [{
                "type": "mdxJsxFlowElement",
                "name": "Aside",
                "attributes": [],
                "children": [{
                    "type": "element",
                    "tagName": "pre",
                    "properties": { "dataLanguage": "mermaid" },
                    "children": []
                }]
            }]
        }))
        .unwrap();

        tag_mermaid_classes(&mut tree);

        assert_eq!(
            serde_json::to_value(&tree).unwrap(),
            json!({
                "type": "root",
                "children": [{
                    "type": "mdxJsxFlowElement",
                    "name": "Aside",
                    "attributes": [],
                    "children": [{
                        "type": "element",
                        "tagName": "pre",
                        "properties": { "dataLanguage": "mermaid", "className": ["mermaid"] },
                        "children": []
                    }]
                }]
            })
        );
    }
}
