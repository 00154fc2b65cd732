// SPDX-License-Identifier: PMPL-1.0-or-later
//! Mutable view over a parsed `scraper::Html` document.
//!
//! Windows are addressed by [`NodeId`], the position of a node in the
//! document's tree arena. Nodes are never added or removed after parsing,
//! so a handle stays valid across attribute edits and the tree can be
//! re-queried with `scraper` selectors after every fix.

use crate::error::ResolveError;
use scraper::node::{Element, Node};
use scraper::{ElementRef, Html, Selector};

/// Handle to a node in a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

/// A parsed, mutable HTML document
#[derive(Debug)]
pub struct Document {
    html: Html,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Empty document holding only the document node
    pub fn new() -> Self {
        Self {
            html: Html::new_document(),
        }
    }

    /// Parse a full HTML document
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    /// The document node
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn node_id(&self, element: ElementRef<'_>) -> Option<NodeId> {
        self.html
            .tree
            .nodes()
            .position(|node| node.id() == element.id())
            .map(NodeId)
    }

    /// The element behind a handle, for `scraper` traversal
    pub fn element_ref(&self, id: NodeId) -> Option<ElementRef<'_>> {
        self.html.tree.nodes().nth(id.0).and_then(ElementRef::wrap)
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.element_ref(id).map(|el| el.value())
    }

    /// The root element (`<html>` for parsed documents)
    pub fn document_element(&self) -> Option<NodeId> {
        self.html
            .tree
            .root()
            .children()
            .find_map(ElementRef::wrap)
            .and_then(|el| self.node_id(el))
    }

    /// First element in document order matching a CSS selector
    pub fn select_first(&self, selector: &str) -> Result<Option<NodeId>, ResolveError> {
        let parsed = Selector::parse(selector).map_err(|e| ResolveError::InvalidSelector {
            selector: selector.to_string(),
            reason: e.to_string(),
        })?;
        Ok(self.html.select(&parsed).next().and_then(|el| self.node_id(el)))
    }

    /// Tag name if the node is an element
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(Element::name)
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.attr(name)
    }

    fn update_element(&mut self, id: NodeId, update: impl FnOnce(&mut Element)) -> bool {
        let Some(node_id) = self.html.tree.nodes().nth(id.0).map(|node| node.id()) else {
            return false;
        };
        let Some(mut node) = self.html.tree.get_mut(node_id) else {
            return false;
        };
        match node.value() {
            Node::Element(el) => {
                update(el);
                true
            }
            _ => false,
        }
    }

    /// Set an attribute; returns false when the node is not an element.
    ///
    /// `id` and `class` are cached by `scraper` for selector matching and
    /// must not be edited through here.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) -> bool {
        self.update_element(id, |el| set_attribute(el, name, value))
    }

    /// Append one CSS declaration to the inline style, creating the attribute if needed.
    ///
    /// Existing declarations are kept; a later declaration for the same
    /// property wins under CSS cascade rules.
    pub fn append_style(&mut self, id: NodeId, declaration: &str) -> bool {
        self.update_element(id, |el| {
            let style = match el.attr("style").map(str::trim_end) {
                None | Some("") => declaration.to_string(),
                Some(existing) if existing.ends_with(';') => format!("{} {}", existing, declaration),
                Some(existing) => format!("{}; {}", existing, declaration),
            };
            set_attribute(el, "style", &style);
        })
    }

    /// Concatenated text of every text node below an element
    pub fn text_content(&self, id: NodeId) -> String {
        self.element_ref(id)
            .map(|el| el.text().collect())
            .unwrap_or_default()
    }

    /// First descendant element with the given tag name
    pub fn find_element(&self, id: NodeId, tag: &str) -> Option<NodeId> {
        self.element_ref(id)?
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name().eq_ignore_ascii_case(tag))
            .and_then(|el| self.node_id(el))
    }

    /// Serialize the whole document back to HTML
    pub fn to_html(&self) -> String {
        self.html.html()
    }

    /// Serialize one element and its subtree
    pub fn outer_html(&self, id: NodeId) -> String {
        self.element_ref(id).map(|el| el.html()).unwrap_or_default()
    }

    /// Opening tag of an element, for logs and reports
    pub fn describe(&self, id: NodeId) -> String {
        let Some(el) = self.element(id) else {
            return "#node".to_string();
        };
        let mut tag = format!("<{}", el.name());
        for (name, value) in el.attrs() {
            tag.push_str(&format!(" {}=\"{}\"", name, value.replace('&', "&amp;").replace('"', "&quot;")));
        }
        tag.push('>');
        tag
    }
}

/// Overwrite an attribute in place, or append it in the null namespace
fn set_attribute(el: &mut Element, name: &str, value: &str) {
    if let Some((_, existing)) = el.attrs.iter_mut().find(|(key, _)| &*key.local == name) {
        *existing = value.into();
        return;
    }
    let mut key = el.name.clone();
    key.prefix = None;
    key.ns = "".into();
    key.local = name.into();
    el.attrs.insert(key, value.into());
}
