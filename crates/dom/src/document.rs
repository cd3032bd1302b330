//! Arena-backed document tree.

use std::collections::BTreeMap;

use crate::error::{DomError, DomResult};
use crate::selector::{Complex, Selector};
use crate::spec::ElementSpec;

/// Handle to a node in a [`Document`].
///
/// Ids stay valid after a node is detached; detached nodes simply stop being
/// reachable from the document root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl core::fmt::Display for NodeId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
enum NodeKind {
    Document,
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Element {
    pub(crate) tag: String,
    pub(crate) classes: Vec<String>,
    pub(crate) attrs: BTreeMap<String, String>,
    pub(crate) value: String,
    pub(crate) style: BTreeMap<String, String>,
}

impl Element {
    pub(crate) fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }
}

/// The page's node tree: a document node holding `<html><body>`.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    body: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Document,
            }],
            root: NodeId(0),
            body: NodeId(0),
        };
        let html = doc.create_element("html");
        let body = doc.create_element("body");
        doc.link(doc.root, html);
        doc.link(html, body);
        doc.body = body;
        doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeKind::Element(Element {
            tag: tag.to_ascii_lowercase(),
            ..Element::default()
        }))
    }

    /// Build `spec` (and its children) and append it under `parent`.
    pub fn append(&mut self, parent: NodeId, spec: ElementSpec) -> DomResult<NodeId> {
        self.element(parent)?;
        let node = self.build(spec);
        self.link(parent, node);
        Ok(node)
    }

    fn build(&mut self, spec: ElementSpec) -> NodeId {
        let node = self.create_element(&spec.tag);
        if let NodeKind::Element(el) = &mut self.nodes[node.0].kind {
            el.classes = spec.classes;
            el.attrs = spec.attrs;
            el.value = spec.value.unwrap_or_default();
        }
        if let Some(text) = spec.text {
            let text = self.push(NodeKind::Text(text));
            self.link(node, text);
        }
        for child in spec.children {
            let child = self.build(child);
            self.link(node, child);
        }
        node
    }

    /// Move `child` (and its subtree) to the end of `parent`'s children.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.node(parent)?;
        self.node(child)?;
        if child == self.root {
            return Err(DomError::HierarchyRequest("cannot re-parent the document".into()));
        }
        if self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest(format!(
                "{child} is an ancestor of {parent}"
            )));
        }
        self.unlink(child);
        self.link(parent, child);
        Ok(())
    }

    /// Detach `node` from its parent. Returns `false` if it had no parent.
    pub fn remove(&mut self, node: NodeId) -> DomResult<bool> {
        self.node(node)?;
        if node == self.root {
            return Err(DomError::HierarchyRequest("cannot remove the document".into()));
        }
        Ok(self.unlink(node))
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0).and_then(|n| n.parent)
    }

    /// Parent, if it is an element.
    pub fn parent_element(&self, node: NodeId) -> Option<NodeId> {
        self.parent(node).filter(|p| self.element(*p).is_ok())
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node.0)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Whether `node` is reachable from the document root.
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.is_inclusive_ancestor(self.root, node)
    }

    pub fn tag(&self, node: NodeId) -> DomResult<&str> {
        Ok(&self.element(node)?.tag)
    }

    pub fn attr(&self, node: NodeId, name: &str) -> DomResult<Option<&str>> {
        Ok(self.element(node)?.attr(name))
    }

    pub fn has_attr(&self, node: NodeId, name: &str) -> DomResult<bool> {
        Ok(self.element(node)?.attrs.contains_key(name))
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) -> DomResult<()> {
        self.element_mut(node)?
            .attrs
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    pub fn remove_attr(&mut self, node: NodeId, name: &str) -> DomResult<()> {
        self.element_mut(node)?.attrs.remove(name);
        Ok(())
    }

    pub fn id(&self, node: NodeId) -> DomResult<Option<&str>> {
        self.attr(node, "id")
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> DomResult<bool> {
        Ok(self.element(node)?.classes.iter().any(|c| c == class))
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) -> DomResult<()> {
        let el = self.element_mut(node)?;
        if !el.classes.iter().any(|c| c == class) {
            el.classes.push(class.to_string());
        }
        Ok(())
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) -> DomResult<()> {
        self.element_mut(node)?.classes.retain(|c| c != class);
        Ok(())
    }

    /// Space-separated class list, as `className` reads.
    pub fn class_name(&self, node: NodeId) -> DomResult<String> {
        Ok(self.element(node)?.classes.join(" "))
    }

    /// Current value of a form control.
    pub fn value(&self, node: NodeId) -> DomResult<&str> {
        Ok(&self.element(node)?.value)
    }

    pub fn set_value(&mut self, node: NodeId, value: &str) -> DomResult<()> {
        self.element_mut(node)?.value = value.to_string();
        Ok(())
    }

    pub fn style(&self, node: NodeId, property: &str) -> DomResult<Option<&str>> {
        Ok(self.element(node)?.style.get(property).map(String::as_str))
    }

    pub fn set_style(&mut self, node: NodeId, property: &str, value: &str) -> DomResult<()> {
        self.element_mut(node)?
            .style
            .insert(property.to_string(), value.to_string());
        Ok(())
    }

    /// Serialized inline style (`prop: value; ...`), properties sorted.
    pub fn css_text(&self, node: NodeId) -> DomResult<String> {
        Ok(self
            .element(node)?
            .style
            .iter()
            .map(|(k, v)| format!("{k}: {v};"))
            .collect::<Vec<_>>()
            .join(" "))
    }

    /// `false` only when the inline style says `display: none`.
    pub fn is_displayed(&self, node: NodeId) -> DomResult<bool> {
        Ok(self.style(node, "display")? != Some("none"))
    }

    /// Concatenated text of every descendant text node.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        let Some(n) = self.nodes.get(node.0) else {
            return;
        };
        if let NodeKind::Text(text) = &n.kind {
            out.push_str(text);
        }
        for child in &n.children {
            self.collect_text(*child, out);
        }
    }

    /// Replace all children of `node` with a single text node.
    pub fn set_text_content(&mut self, node: NodeId, text: &str) -> DomResult<()> {
        self.element(node)?;
        for child in self.nodes[node.0].children.clone() {
            self.unlink(child);
        }
        if !text.is_empty() {
            let text = self.push(NodeKind::Text(text.to_string()));
            self.link(node, text);
        }
        Ok(())
    }

    /// First connected element with `id`, in document order.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|n| matches!(self.element(*n), Ok(el) if el.attr("id") == Some(id)))
    }

    /// First descendant of `scope` matching `selector`.
    pub fn query_selector(&self, scope: NodeId, selector: &str) -> DomResult<Option<NodeId>> {
        Ok(self.query_selector_all(scope, selector)?.into_iter().next())
    }

    /// Every descendant of `scope` matching `selector`, in document order.
    pub fn query_selector_all(&self, scope: NodeId, selector: &str) -> DomResult<Vec<NodeId>> {
        self.node(scope)?;
        let selector = Selector::parse(selector)?;
        Ok(self
            .descendants(scope)
            .into_iter()
            .filter(|n| self.matches_parsed(*n, &selector))
            .collect())
    }

    pub fn matches(&self, node: NodeId, selector: &str) -> DomResult<bool> {
        self.element(node)?;
        let selector = Selector::parse(selector)?;
        Ok(self.matches_parsed(node, &selector))
    }

    /// Nearest inclusive ancestor of `node` matching `selector`.
    pub fn closest(&self, node: NodeId, selector: &str) -> DomResult<Option<NodeId>> {
        self.node(node)?;
        let selector = Selector::parse(selector)?;
        let mut cursor = Some(node);
        while let Some(n) = cursor {
            if self.matches_parsed(n, &selector) {
                return Ok(Some(n));
            }
            cursor = self.parent(n);
        }
        Ok(None)
    }

    fn matches_parsed(&self, node: NodeId, selector: &Selector) -> bool {
        selector
            .alternatives()
            .iter()
            .any(|complex| self.matches_complex(node, complex))
    }

    fn matches_complex(&self, node: NodeId, complex: &Complex) -> bool {
        let Some((last, ancestors)) = complex.compounds.split_last() else {
            return false;
        };
        let Ok(el) = self.element(node) else {
            return false;
        };
        if !last.matches(el) {
            return false;
        }

        // Descendant combinators: match remaining compounds right-to-left
        // against successively higher ancestors.
        let mut cursor = self.parent(node);
        for compound in ancestors.iter().rev() {
            loop {
                let Some(anc) = cursor else {
                    return false;
                };
                cursor = self.parent(anc);
                if let Ok(el) = self.element(anc) {
                    if compound.matches(el) {
                        break;
                    }
                }
            }
        }
        true
    }

    /// Descendants of `scope` (exclusive) in pre-order.
    pub(crate) fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.children(n).iter().rev().copied());
        }
        out
    }

    pub(crate) fn element(&self, node: NodeId) -> DomResult<&Element> {
        match &self.node(node)?.kind {
            NodeKind::Element(el) => Ok(el),
            _ => Err(DomError::NotAnElement(node)),
        }
    }

    fn element_mut(&mut self, node: NodeId) -> DomResult<&mut Element> {
        match &mut self
            .nodes
            .get_mut(node.0)
            .ok_or(DomError::UnknownNode(node))?
            .kind
        {
            NodeKind::Element(el) => Ok(el),
            _ => Err(DomError::NotAnElement(node)),
        }
    }

    fn node(&self, node: NodeId) -> DomResult<&Node> {
        self.nodes.get(node.0).ok_or(DomError::UnknownNode(node))
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            children: Vec::new(),
            kind,
        });
        id
    }

    fn link(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    fn unlink(&mut self, child: NodeId) -> bool {
        let Some(parent) = self.nodes[child.0].parent.take() else {
            return false;
        };
        self.nodes[parent.0].children.retain(|c| *c != child);
        true
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(n) = cursor {
            if n == ancestor {
                return true;
            }
            cursor = self.parent(n);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> (Document, Vec<NodeId>) {
        let mut doc = Document::new();
        let body = doc.body();
        let grid = doc
            .append(body, ElementSpec::new("div").class("row"))
            .unwrap();
        let cards: Vec<NodeId> = [("Canvas Sneaker", "$45.00"), ("Leather Boot", "$180.00")]
            .into_iter()
            .map(|(name, price)| {
                doc.append(
                    grid,
                    ElementSpec::new("div")
                        .class("card product-card")
                        .child(ElementSpec::new("h5").class("product-name").text(name))
                        .child(ElementSpec::new("span").class("product-price").text(price)),
                )
                .unwrap()
            })
            .collect();
        (doc, cards)
    }

    #[test]
    fn query_selector_all_returns_document_order() {
        let (doc, cards) = catalog();
        let found = doc.query_selector_all(doc.root(), ".product-card").unwrap();
        assert_eq!(found, cards);
    }

    #[test]
    fn descendant_selector_scopes_to_ancestors() {
        let (doc, cards) = catalog();
        let names = doc
            .query_selector_all(doc.root(), ".product-card .product-name")
            .unwrap();
        assert_eq!(names.len(), 2);
        assert_eq!(doc.parent(names[1]), Some(cards[1]));
        assert!(doc.query_selector_all(doc.root(), ".row .missing").unwrap().is_empty());
    }

    #[test]
    fn query_is_scoped_and_exclusive() {
        let (doc, cards) = catalog();
        let price = doc.query_selector(cards[0], ".product-price").unwrap().unwrap();
        assert_eq!(doc.text_content(price), "$45.00");
        assert_eq!(doc.query_selector(cards[0], ".product-card").unwrap(), None);
    }

    #[test]
    fn text_content_concatenates_descendants() {
        let (doc, cards) = catalog();
        assert_eq!(doc.text_content(cards[1]), "Leather Boot$180.00");
    }

    #[test]
    fn set_text_content_replaces_children() {
        let mut doc = Document::new();
        let badge = doc
            .append(doc.body(), ElementSpec::new("span").class("cart-count").text("2"))
            .unwrap();
        doc.set_text_content(badge, "7").unwrap();
        assert_eq!(doc.text_content(badge), "7");
        assert_eq!(doc.children(badge).len(), 1);
    }

    #[test]
    fn removed_nodes_are_disconnected_but_addressable() {
        let (mut doc, cards) = catalog();
        assert!(doc.is_connected(cards[0]));
        assert!(doc.remove(cards[0]).unwrap());
        assert!(!doc.is_connected(cards[0]));
        assert!(!doc.remove(cards[0]).unwrap());
        assert_eq!(doc.query_selector_all(doc.root(), ".product-card").unwrap().len(), 1);
        assert_eq!(doc.text_content(cards[0]), "Canvas Sneaker$45.00");
    }

    #[test]
    fn append_child_rejects_cycles() {
        let (mut doc, cards) = catalog();
        let name = doc.children(cards[0])[0];
        assert!(matches!(
            doc.append_child(name, cards[0]),
            Err(DomError::HierarchyRequest(_))
        ));
    }

    #[test]
    fn get_element_by_id_ignores_detached_nodes() {
        let mut doc = Document::new();
        let select = doc
            .append(doc.body(), ElementSpec::new("select").id("price-filter"))
            .unwrap();
        assert_eq!(doc.get_element_by_id("price-filter"), Some(select));
        doc.remove(select).unwrap();
        assert_eq!(doc.get_element_by_id("price-filter"), None);
    }

    #[test]
    fn closest_walks_inclusive_ancestors() {
        let (doc, cards) = catalog();
        let name = doc.children(cards[1])[0];
        assert_eq!(doc.closest(name, ".product-card").unwrap(), Some(cards[1]));
        assert_eq!(doc.closest(cards[1], ".product-card").unwrap(), Some(cards[1]));
        assert_eq!(doc.closest(name, "form").unwrap(), None);
    }

    #[test]
    fn attribute_selectors_match_values() {
        let mut doc = Document::new();
        let close = doc
            .append(
                doc.body(),
                ElementSpec::new("button")
                    .class("btn-close")
                    .attr("data-bs-dismiss", "alert"),
            )
            .unwrap();
        assert!(doc.matches(close, "[data-bs-dismiss=\"alert\"]").unwrap());
        assert!(doc.matches(close, "button[data-bs-dismiss]").unwrap());
        assert!(!doc.matches(close, "[data-bs-dismiss=modal]").unwrap());
    }

    #[test]
    fn display_is_driven_by_inline_style() {
        let (mut doc, cards) = catalog();
        assert!(doc.is_displayed(cards[0]).unwrap());
        doc.set_style(cards[0], "display", "none").unwrap();
        assert!(!doc.is_displayed(cards[0]).unwrap());
        doc.set_style(cards[0], "display", "block").unwrap();
        assert!(doc.is_displayed(cards[0]).unwrap());
    }

    #[test]
    fn element_accessors_reject_text_nodes() {
        let (doc, cards) = catalog();
        let name = doc.children(cards[0])[0];
        let text = doc.children(name)[0];
        assert_eq!(doc.value(text), Err(DomError::NotAnElement(text)));
    }
}
