//! In-memory DOM tree
//!
//! An arena of nodes that behaves like the subset of the browser DOM the
//! widget relies on. Markup is read with `quick-xml`, so fragments must be
//! well-formed (`<input ... />`, no bare `<br>`).

use std::collections::BTreeMap;

use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::config::LineMarkup;
use crate::dom::{DeckPage, EditorDom, NodeKind};
use crate::error::{DeckEditorError, Result};

/// Handle to a node inside one [`VirtualDom`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
enum NodeData {
    Text(String),
    Comment(String),
    Element {
        tag: String,
        attrs: BTreeMap<String, String>,
    },
}

#[derive(Debug, Clone)]
struct VNode {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena-backed document with a single `body` root
#[derive(Debug, Clone)]
pub struct VirtualDom {
    nodes: Vec<VNode>,
    body: NodeId,
    markup: LineMarkup,
}

impl VirtualDom {
    pub fn new() -> Self {
        Self::with_markup(LineMarkup::default())
    }

    pub fn with_markup(markup: LineMarkup) -> Self {
        let mut dom = Self {
            nodes: Vec::new(),
            body: NodeId(0),
            markup,
        };
        dom.body = dom.create_element("body");
        dom
    }

    /// Build a document whose body holds the parsed fragment
    pub fn from_html(html: &str) -> Result<Self> {
        Self::from_html_with_markup(html, LineMarkup::default())
    }

    pub fn from_html_with_markup(html: &str, markup: LineMarkup) -> Result<Self> {
        let mut dom = Self::with_markup(markup);
        let body = dom.body;
        dom.parse_fragment(body, html)?;
        Ok(dom)
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn markup(&self) -> &LineMarkup {
        &self.markup
    }

    fn node(&self, id: NodeId) -> &VNode {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut VNode {
        &mut self.nodes[id.0]
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(VNode {
            data,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeData::Element {
            tag: tag.to_ascii_lowercase(),
            attrs: BTreeMap::new(),
        })
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Text(text.to_string()))
    }

    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Comment(text.to_string()))
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.node(node).children
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).parent
    }

    /// Lowercase tag name, `None` for text and comments
    pub fn tag(&self, node: NodeId) -> Option<&str> {
        match &self.node(node).data {
            NodeData::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn is_text(&self, node: NodeId) -> bool {
        matches!(self.node(node).data, NodeData::Text(_))
    }

    pub fn get_attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        match &self.node(node).data {
            NodeData::Element { attrs, .. } => attrs.get(name).map(|v| v.as_str()),
            _ => None,
        }
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let NodeData::Element { attrs, .. } = &mut self.node_mut(node).data {
            attrs.insert(name.to_string(), value.to_string());
        }
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.get_attribute(node, "class")
            .map_or(false, |classes| classes.split_whitespace().any(|c| c == class))
    }

    /// Descendants in pre-order, excluding `node` itself
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.body)
            .into_iter()
            .find(|n| self.get_attribute(*n, "id") == Some(id))
    }

    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Remove a node from its parent (no-op when detached)
    pub fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.node(node).parent {
            self.node_mut(parent).children.retain(|c| *c != node);
            self.node_mut(node).parent = None;
        }
    }

    /// Append `child` to `parent`, moving it if it is already attached
    pub fn append(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if self.is_ancestor(child, parent) {
            return Err(DeckEditorError::InvalidTree(
                "cannot append a node inside itself".to_string(),
            ));
        }
        if matches!(self.node(parent).data, NodeData::Text(_) | NodeData::Comment(_)) {
            return Err(DeckEditorError::InvalidTree(
                "text nodes cannot have children".to_string(),
            ));
        }
        self.detach(child);
        self.node_mut(parent).children.push(child);
        self.node_mut(child).parent = Some(parent);
        Ok(())
    }

    /// Append a new text node under `parent`
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> Result<NodeId> {
        let node = self.create_text(text);
        self.append(parent, node)?;
        Ok(node)
    }

    /// Append a new element under `parent`
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> Result<NodeId> {
        let node = self.create_element(tag);
        self.append(parent, node)?;
        Ok(node)
    }

    /// Replace a text node's data, or an element's children with one text node
    pub fn set_text(&mut self, node: NodeId, text: &str) {
        if let NodeData::Text(data) | NodeData::Comment(data) = &mut self.node_mut(node).data {
            *data = text.to_string();
            return;
        }
        self.remove_children(node);
        if !text.is_empty() {
            let child = self.create_text(text);
            self.node_mut(node).children.push(child);
            self.node_mut(child).parent = Some(node);
        }
    }

    fn remove_children(&mut self, node: NodeId) {
        let children = std::mem::take(&mut self.node_mut(node).children);
        for child in children {
            self.node_mut(child).parent = None;
        }
    }

    /// Text of the node and every descendant text node
    pub fn text(&self, node: NodeId) -> String {
        match &self.node(node).data {
            NodeData::Text(data) => data.clone(),
            NodeData::Comment(_) => String::new(),
            NodeData::Element { .. } => self
                .descendants(node)
                .into_iter()
                .filter_map(|n| match &self.node(n).data {
                    NodeData::Text(data) => Some(data.as_str()),
                    _ => None,
                })
                .collect(),
        }
    }

    /// Serialize the children of `node`
    pub fn inner_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(node) {
            self.write_html(*child, &mut out);
        }
        out
    }

    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_html(node, &mut out);
        out
    }

    fn write_html(&self, node: NodeId, out: &mut String) {
        match &self.node(node).data {
            NodeData::Text(data) => out.push_str(&escape(data.as_str())),
            NodeData::Comment(data) => {
                out.push_str("<!--");
                out.push_str(data);
                out.push_str("-->");
            }
            NodeData::Element { tag, attrs } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&escape(value.as_str()));
                    out.push('"');
                }
                out.push('>');
                for child in self.children(node) {
                    self.write_html(*child, out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }

    fn element_from_start(&mut self, start: &BytesStart) -> Result<NodeId> {
        let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let node = self.create_element(&tag);
        for attr in start.attributes() {
            let attr = attr.map_err(|e| DeckEditorError::Markup(e.to_string()))?;
            let name = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            self.set_attribute(node, &name, &value);
        }
        Ok(node)
    }

    /// Parse `html` and append the resulting nodes under `parent`
    pub fn parse_fragment(&mut self, parent: NodeId, html: &str) -> Result<()> {
        let mut reader = Reader::from_str(html);
        let mut stack = vec![parent];

        loop {
            let top = *stack.last().unwrap_or(&parent);
            match reader.read_event()? {
                Event::Start(start) => {
                    let node = self.element_from_start(&start)?;
                    self.append(top, node)?;
                    stack.push(node);
                }
                Event::Empty(start) => {
                    let node = self.element_from_start(&start)?;
                    self.append(top, node)?;
                }
                Event::End(_) => {
                    if stack.len() <= 1 {
                        return Err(DeckEditorError::Markup(
                            "unbalanced closing tag".to_string(),
                        ));
                    }
                    stack.pop();
                }
                Event::Text(text) => {
                    let text = text.unescape()?.into_owned();
                    self.append_text(top, &text)?;
                }
                Event::CData(data) => {
                    let text = String::from_utf8_lossy(&data.into_inner()).into_owned();
                    self.append_text(top, &text)?;
                }
                Event::Comment(comment) => {
                    let text = String::from_utf8_lossy(&comment).into_owned();
                    let node = self.create_comment(&text);
                    self.append(top, node)?;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if stack.len() > 1 {
            return Err(DeckEditorError::Markup("unclosed element".to_string()));
        }
        Ok(())
    }
}

impl Default for VirtualDom {
    fn default() -> Self {
        Self::new()
    }
}

fn style_property(style: &str, name: &str) -> Option<String> {
    style
        .split(';')
        .filter_map(|decl| decl.split_once(':'))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case(name))
        .map(|(_, value)| value.trim().to_string())
}

fn with_style_property(style: &str, name: &str, value: &str) -> String {
    let mut decls: Vec<String> = style
        .split(';')
        .map(str::trim)
        .filter(|decl| !decl.is_empty())
        .filter(|decl| {
            decl.split_once(':')
                .map_or(true, |(key, _)| !key.trim().eq_ignore_ascii_case(name))
        })
        .map(String::from)
        .collect();
    decls.push(format!("{}: {}", name, value));
    decls.join("; ")
}

impl EditorDom for VirtualDom {
    type Node = NodeId;

    fn child_nodes(&self, parent: &NodeId) -> Vec<NodeId> {
        self.children(*parent).to_vec()
    }

    fn node_kind(&self, node: &NodeId) -> NodeKind {
        match &self.node(*node).data {
            NodeData::Text(_) => NodeKind::Text,
            NodeData::Comment(_) => NodeKind::Other,
            NodeData::Element { tag, .. } if self.markup.is_container(tag) => NodeKind::LineContainer,
            NodeData::Element { .. } => NodeKind::Element,
        }
    }

    fn text_content(&self, node: &NodeId) -> String {
        self.text(*node)
    }

    fn text_holder(&self, container: &NodeId) -> Option<NodeId> {
        self.descendants(*container)
            .into_iter()
            .find(|n| self.tag(*n).map_or(false, |tag| self.markup.is_holder(tag)))
    }

    fn create_line(&mut self, text: &str) -> Result<NodeId> {
        let container_tag = self.markup.container_tag.clone();
        let container = self.create_element(&container_tag);
        let holder = self.create_text_holder(text)?;
        self.append(container, holder)?;
        Ok(container)
    }

    fn create_text_holder(&mut self, text: &str) -> Result<NodeId> {
        let holder_tag = self.markup.holder_tag.clone();
        let holder = self.create_element(&holder_tag);
        self.set_text(holder, text);
        Ok(holder)
    }

    fn replace_child(&mut self, parent: &NodeId, new_child: &NodeId, old_child: &NodeId) -> Result<()> {
        if self.parent(*old_child) != Some(*parent) {
            return Err(DeckEditorError::InvalidTree(
                "replaced node is not a child of the parent".to_string(),
            ));
        }
        if self.is_ancestor(*new_child, *parent) {
            return Err(DeckEditorError::InvalidTree(
                "cannot insert a node inside itself".to_string(),
            ));
        }
        if new_child == old_child {
            return Ok(());
        }
        self.detach(*new_child);
        let index = self
            .children(*parent)
            .iter()
            .position(|c| c == old_child)
            .ok_or_else(|| DeckEditorError::InvalidTree("child index lost".to_string()))?;
        self.node_mut(*parent).children[index] = *new_child;
        self.node_mut(*new_child).parent = Some(*parent);
        self.node_mut(*old_child).parent = None;
        Ok(())
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<()> {
        self.append(*parent, *child)
    }

    fn clear_children(&mut self, parent: &NodeId) -> Result<()> {
        self.remove_children(*parent);
        Ok(())
    }
}

impl DeckPage for VirtualDom {
    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.get_element_by_id(id)
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.get_attribute(*node, name).map(String::from)
    }

    fn first_attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        std::iter::once(*node)
            .chain(self.descendants(*node))
            .find_map(|n| self.get_attribute(n, name).map(String::from))
    }

    fn field_value(&self, id: &str) -> Option<String> {
        let node = self.get_element_by_id(id)?;
        Some(self.get_attribute(node, "value").unwrap_or_default().to_string())
    }

    fn set_field_value(&mut self, id: &str, value: &str) -> Result<()> {
        let node = self
            .get_element_by_id(id)
            .ok_or_else(|| DeckEditorError::MissingElement(format!("#{}", id)))?;
        self.set_attribute(node, "value", value);
        Ok(())
    }

    fn display(&self, id: &str) -> Option<String> {
        let node = self.get_element_by_id(id)?;
        let style = self.get_attribute(node, "style").unwrap_or_default();
        Some(style_property(style, "display").unwrap_or_default())
    }

    fn set_display(&mut self, id: &str, display: &str) -> Result<()> {
        let node = self
            .get_element_by_id(id)
            .ok_or_else(|| DeckEditorError::MissingElement(format!("#{}", id)))?;
        let style = self.get_attribute(node, "style").unwrap_or_default();
        let updated = with_style_property(style, "display", display);
        self.set_attribute(node, "style", &updated);
        Ok(())
    }

    fn set_text_content(&mut self, node: &NodeId, text: &str) -> Result<()> {
        self.set_text(*node, text);
        Ok(())
    }

    fn set_inner_html(&mut self, node: &NodeId, html: &str) -> Result<()> {
        self.remove_children(*node);
        self.parse_fragment(*node, html)
    }

    fn table_rows(&self, table_id: &str) -> Vec<NodeId> {
        match self.get_element_by_id(table_id) {
            Some(table) => self
                .descendants(table)
                .into_iter()
                .filter(|n| self.tag(*n) == Some("tr"))
                .collect(),
            None => Vec::new(),
        }
    }

    fn find_by_class(&self, node: &NodeId, class: &str) -> Option<NodeId> {
        self.descendants(*node)
            .into_iter()
            .find(|n| self.has_class(*n, class))
    }
}
