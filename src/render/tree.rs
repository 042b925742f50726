//! In-memory rendering runtime that records the composed structure.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Renderer;
use crate::descriptor::{ElementKey, Props};

/// A recorded node of the composed tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// An instantiated component.
    Element {
        component: String,
        #[serde(default, skip_serializing_if = "Props::is_empty")]
        props: Props,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        key: Option<ElementKey>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        child: Option<Box<Node>>,
    },
    /// Transparent grouping.
    Fragment { children: Vec<Node> },
    /// Plain text content.
    Text { text: String },
}

impl Node {
    /// Childless element with empty props, typically used as content.
    pub fn leaf(component: impl Into<String>) -> Self {
        Node::Element {
            component: component.into(),
            props: Props::new(),
            key: None,
            child: None,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::Text { text: text.into() }
    }

    pub fn fragment(children: Vec<Node>) -> Self {
        Node::Fragment { children }
    }

    pub fn is_fragment(&self) -> bool {
        matches!(self, Node::Fragment { .. })
    }

    /// Component name for element nodes.
    pub fn component(&self) -> Option<&str> {
        match self {
            Node::Element { component, .. } => Some(component),
            _ => None,
        }
    }

    pub fn props(&self) -> Option<&Props> {
        match self {
            Node::Element { props, .. } => Some(props),
            _ => None,
        }
    }

    pub fn key(&self) -> Option<&ElementKey> {
        match self {
            Node::Element { key, .. } => key.as_ref(),
            _ => None,
        }
    }

    /// The single content slot of an element.
    pub fn child(&self) -> Option<&Node> {
        match self {
            Node::Element { child, .. } => child.as_deref(),
            _ => None,
        }
    }

    /// Children of a fragment; empty for every other node.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Fragment { children } => children,
            _ => &[],
        }
    }

    /// Component names of every element in document order.
    pub fn element_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_names(&mut names);
        names
    }

    fn collect_names<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Node::Element {
                component, child, ..
            } => {
                out.push(component);
                if let Some(child) = child {
                    child.collect_names(out);
                }
            }
            Node::Fragment { children } => {
                for c in children {
                    c.collect_names(out);
                }
            }
            Node::Text { .. } => {}
        }
    }

    /// The nodes a host would render at this level once fragments dissolve.
    ///
    /// Elements and text are returned as-is; nested fragments are flattened
    /// in order.
    pub fn rendered_siblings(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        self.collect_siblings(&mut out);
        out
    }

    fn collect_siblings<'a>(&'a self, out: &mut Vec<&'a Node>) {
        match self {
            Node::Fragment { children } => {
                for c in children {
                    c.collect_siblings(out);
                }
            }
            other => out.push(other),
        }
    }

    /// Indented, one-node-per-line rendering of the tree.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.write_outline(&mut out, 0);
        out
    }

    fn write_outline(&self, out: &mut String, depth: usize) {
        for _ in 0..depth {
            out.push_str("  ");
        }
        match self {
            Node::Element {
                component,
                props,
                key,
                child,
            } => {
                out.push_str(component);
                if let Some(key) = key {
                    out.push_str(&format!(" #{}", key));
                }
                if !props.is_empty() {
                    out.push(' ');
                    out.push_str(&serde_json::Value::Object(props.clone()).to_string());
                }
                out.push('\n');
                if let Some(child) = child {
                    child.write_outline(out, depth + 1);
                }
            }
            Node::Fragment { children } => {
                out.push_str("<>\n");
                for c in children {
                    c.write_outline(out, depth + 1);
                }
            }
            Node::Text { text } => {
                out.push_str(&format!("{:?}\n", text));
            }
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.outline())
    }
}

/// Runtime that builds [`Node`] trees from components named by strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeRenderer;

impl TreeRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl<C> Renderer<C> for TreeRenderer
where
    C: AsRef<str>,
{
    type Node = Node;

    fn element(
        &self,
        component: &C,
        props: &Props,
        key: Option<&ElementKey>,
        child: Option<Node>,
    ) -> Node {
        Node::Element {
            component: component.as_ref().to_string(),
            props: props.clone(),
            key: key.cloned(),
            child: child.map(Box::new),
        }
    }

    fn fragment(&self, children: Vec<Node>) -> Node {
        Node::Fragment { children }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Node {
        Node::Element {
            component: "Theme".into(),
            props: json!({"mode": "dark"}).as_object().cloned().unwrap_or_default(),
            key: None,
            child: Some(Box::new(Node::fragment(vec![
                Node::Element {
                    component: "Banner".into(),
                    props: Props::new(),
                    key: Some(ElementKey::Index(1)),
                    child: None,
                },
                Node::leaf("App"),
            ]))),
        }
    }

    #[test]
    fn test_outline_format() {
        let expected = "Theme {\"mode\":\"dark\"}\n  <>\n    Banner #1\n    App\n";
        assert_eq!(sample().outline(), expected);
    }

    #[test]
    fn test_element_names_in_document_order() {
        assert_eq!(sample().element_names(), vec!["Theme", "Banner", "App"]);
    }

    #[test]
    fn test_rendered_siblings_dissolve_nested_fragments() {
        let tree = Node::fragment(vec![
            Node::leaf("A"),
            Node::fragment(vec![Node::leaf("B"), Node::text("hi")]),
        ]);
        let siblings: Vec<_> = tree.rendered_siblings();
        assert_eq!(siblings.len(), 3);
        assert_eq!(siblings[0].component(), Some("A"));
        assert_eq!(siblings[1].component(), Some("B"));
        assert_eq!(siblings[2], &Node::text("hi"));
    }

    #[test]
    fn test_serializes_with_type_tag() {
        let value = serde_json::to_value(Node::leaf("App")).unwrap();
        assert_eq!(value, json!({"type": "element", "component": "App"}));
    }
}
