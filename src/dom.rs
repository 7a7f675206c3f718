//! A small in-memory document tree.
//!
//! The page components never touch a real browser. They read and mutate this
//! tree the same way the site scripts mutate the server-rendered markup:
//! classes, attributes, inline `display`, inner content and removal.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Inline `style.display` of an element. `Unset` defers to the stylesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    #[default]
    Unset,
    Block,
    None,
}

#[derive(Debug, Clone, Default)]
pub struct Element {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    display: Display,
    disabled: bool,
    content: String,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Accepts a space separated class list, like the `class` attribute.
    pub fn with_class(mut self, classes: &str) -> Self {
        for class in classes.split_whitespace() {
            if !self.classes.iter().any(|c| c == class) {
                self.classes.push(class.to_string());
            }
        }
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn with_display(mut self, display: Display) -> Self {
        self.display = display;
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }
}

#[derive(Debug, Clone)]
struct Node {
    element: Element,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attached: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Click,
    Submit,
}

/// A dispatched DOM event. Listeners may cancel the default action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub target: NodeId,
    default_prevented: bool,
}

impl Event {
    pub fn click(target: NodeId) -> Self {
        Self {
            kind: EventKind::Click,
            target,
            default_prevented: false,
        }
    }

    pub fn submit(target: NodeId) -> Self {
        Self {
            kind: EventKind::Submit,
            target,
            default_prevented: false,
        }
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Something attached to the page that reacts to dispatched events.
pub trait Listener {
    fn handle(&mut self, doc: &mut Document, event: &mut Event);
}

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    submissions: Vec<NodeId>,
    alerts: Vec<String>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                element: Element::new("body"),
                parent: None,
                children: Vec::new(),
                attached: true,
            }],
            submissions: Vec::new(),
            alerts: Vec::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn append(&mut self, parent: NodeId, element: Element) -> NodeId {
        let id = NodeId(self.nodes.len());
        let attached = self.node(parent).attached;
        self.nodes.push(Node {
            element,
            parent: Some(parent),
            children: Vec::new(),
            attached,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn element_mut(&mut self, id: NodeId) -> &mut Element {
        &mut self.nodes[id.0].element
    }

    pub fn tag(&self, id: NodeId) -> &str {
        &self.node(id).element.tag
    }

    pub fn id_of(&self, id: NodeId) -> Option<&str> {
        self.node(id).element.id.as_deref()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// `id` and everything below it, in document order.
    pub fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.node(next).children.iter().rev().copied());
        }
        out
    }

    fn attached_nodes(&self) -> Vec<NodeId> {
        self.subtree(self.root())
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.attached_nodes()
            .into_iter()
            .find(|&node| self.id_of(node) == Some(id))
    }

    pub fn query_class(&self, class: &str) -> Vec<NodeId> {
        self.attached_nodes()
            .into_iter()
            .filter(|&node| self.has_class(node, class))
            .collect()
    }

    pub fn query_attr(&self, name: &str) -> Vec<NodeId> {
        self.attached_nodes()
            .into_iter()
            .filter(|&node| self.attr(node, name).is_some())
            .collect()
    }

    pub fn query_tag(&self, tag: &str) -> Vec<NodeId> {
        self.descendants_by(self.root(), |el| el.tag == tag)
    }

    /// Strict descendants of `scope` matching `pred`, in document order.
    fn descendants_by(&self, scope: NodeId, pred: impl Fn(&Element) -> bool) -> Vec<NodeId> {
        self.subtree(scope)
            .into_iter()
            .skip(1)
            .filter(|&node| pred(&self.node(node).element))
            .collect()
    }

    pub fn descendants_with_class(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants_by(scope, |el| el.classes.iter().any(|c| c == class))
    }

    pub fn descendants_with_tag(&self, scope: NodeId, tag: &str) -> Vec<NodeId> {
        self.descendants_by(scope, |el| el.tag == tag)
    }

    /// Nearest inclusive ancestor of `id` matching `pred`.
    fn closest(&self, id: NodeId, pred: impl Fn(&Element) -> bool) -> Option<NodeId> {
        let mut current = Some(id);
        while let Some(node) = current {
            if pred(&self.node(node).element) {
                return Some(node);
            }
            current = self.parent(node);
        }
        None
    }

    pub fn closest_class(&self, id: NodeId, class: &str) -> Option<NodeId> {
        self.closest(id, |el| el.classes.iter().any(|c| c == class))
    }

    pub fn closest_attr(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.closest(id, |el| el.attrs.contains_key(name))
    }

    /// True when `node` is `ancestor` or lies below it.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(next) = current {
            if next == ancestor {
                return true;
            }
            current = self.parent(next);
        }
        false
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.node(id).element.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if !self.has_class(id, class) {
            self.element_mut(id).classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        self.element_mut(id).classes.retain(|c| c != class);
    }

    pub fn set_class(&mut self, id: NodeId, class: &str, on: bool) {
        if on {
            self.add_class(id, class);
        } else {
            self.remove_class(id, class);
        }
    }

    /// Returns whether the class is present afterwards.
    pub fn toggle_class(&mut self, id: NodeId, class: &str) -> bool {
        let on = !self.has_class(id, class);
        self.set_class(id, class, on);
        on
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id).element.attrs.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        self.element_mut(id)
            .attrs
            .insert(name.to_string(), value.into());
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) {
        self.element_mut(id).attrs.remove(name);
    }

    pub fn display(&self, id: NodeId) -> Display {
        self.node(id).element.display
    }

    pub fn set_display(&mut self, id: NodeId, display: Display) {
        self.element_mut(id).display = display;
    }

    /// Attached, and neither the node nor any ancestor is `display: none`.
    pub fn is_shown(&self, id: NodeId) -> bool {
        self.node(id).attached
            && self
                .closest(id, |el| el.display == Display::None)
                .is_none()
    }

    pub fn is_disabled(&self, id: NodeId) -> bool {
        self.node(id).element.disabled
    }

    pub fn set_disabled(&mut self, id: NodeId, disabled: bool) {
        self.element_mut(id).disabled = disabled;
    }

    pub fn content(&self, id: NodeId) -> &str {
        &self.node(id).element.content
    }

    /// Replaces inner content, dropping any child elements.
    pub fn set_content(&mut self, id: NodeId, content: impl Into<String>) {
        for child in self.node(id).children.clone() {
            self.detach(child);
        }
        self.nodes[id.0].children.clear();
        self.element_mut(id).content = content.into();
    }

    pub fn remove(&mut self, id: NodeId) {
        if let Some(parent) = self.parent(id) {
            self.nodes[parent.0].children.retain(|&child| child != id);
        }
        self.detach(id);
    }

    fn detach(&mut self, id: NodeId) {
        for node in self.subtree(id) {
            self.nodes[node.0].attached = false;
        }
    }

    pub fn is_attached(&self, id: NodeId) -> bool {
        self.node(id).attached
    }

    /// Records a navigation-causing form submission.
    pub fn submit_form(&mut self, form: NodeId) {
        self.submissions.push(form);
    }

    pub fn submissions(&self) -> &[NodeId] {
        &self.submissions
    }

    pub fn alert(&mut self, message: impl Into<String>) {
        self.alerts.push(message.into());
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queries_follow_document_order() {
        let mut doc = Document::new();
        let root = doc.root();
        let first = doc.append(root, Element::new("div").with_class("panel"));
        let nested = doc.append(first, Element::new("div").with_class("panel inner"));
        let second = doc.append(root, Element::new("div").with_class("panel"));

        assert_eq!(doc.query_class("panel"), vec![first, nested, second]);
        assert_eq!(doc.closest_class(nested, "panel"), Some(nested));
        assert!(doc.contains(first, nested));
        assert!(!doc.contains(second, nested));
    }

    #[test]
    fn removed_nodes_leave_queries() {
        let mut doc = Document::new();
        let root = doc.root();
        let container = doc.append(root, Element::new("div").with_id("box"));
        let child = doc.append(container, Element::new("span").with_class("toast"));

        doc.remove(container);
        assert!(doc.get_element_by_id("box").is_none());
        assert!(doc.query_class("toast").is_empty());
        assert!(!doc.is_attached(child));
    }

    #[test]
    fn hidden_ancestor_hides_descendants() {
        let mut doc = Document::new();
        let root = doc.root();
        let panel = doc.append(root, Element::new("div"));
        let row = doc.append(panel, Element::new("div"));
        assert!(doc.is_shown(row));

        doc.set_display(panel, Display::None);
        assert!(!doc.is_shown(row));
    }

    #[test]
    fn set_content_drops_children() {
        let mut doc = Document::new();
        let root = doc.root();
        let body = doc.append(root, Element::new("div"));
        let old = doc.append(body, Element::new("p").with_id("old"));

        doc.set_content(body, "<p>new</p>");
        assert_eq!(doc.content(body), "<p>new</p>");
        assert!(!doc.is_attached(old));
        assert!(doc.children(body).is_empty());
    }
}
