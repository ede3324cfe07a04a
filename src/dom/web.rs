//! Live page backend over `web-sys`
//!
//! Every handle is a cheap reference-counted JS object, so a `WebDom` is
//! created per call instead of being stored.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlTextAreaElement, Node};

use crate::config::LineMarkup;
use crate::dom::{DeckPage, EditorDom, NodeKind};
use crate::error::{DeckEditorError, Result};

/// Convert a raised JS value into a typed error
pub fn js_error(value: JsValue) -> DeckEditorError {
    DeckEditorError::Js(
        value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value)),
    )
}

/// The browser document seen through the deck editor traits
#[derive(Debug, Clone)]
pub struct WebDom {
    document: Document,
    markup: LineMarkup,
}

impl WebDom {
    pub fn new(document: Document, markup: LineMarkup) -> Self {
        Self { document, markup }
    }

    /// Use the current window's document
    pub fn from_window(markup: LineMarkup) -> Result<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| DeckEditorError::MissingElement("window.document".to_string()))?;
        Ok(Self::new(document, markup))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn element(&self, id: &str) -> Result<Element> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| DeckEditorError::MissingElement(format!("#{}", id)))
    }
}

impl EditorDom for WebDom {
    type Node = Node;

    fn child_nodes(&self, parent: &Node) -> Vec<Node> {
        let list = parent.child_nodes();
        (0..list.length()).filter_map(|i| list.get(i)).collect()
    }

    fn node_kind(&self, node: &Node) -> NodeKind {
        match node.node_type() {
            Node::TEXT_NODE => NodeKind::Text,
            Node::ELEMENT_NODE => match node.dyn_ref::<Element>() {
                Some(el) if self.markup.is_container(&el.tag_name()) => NodeKind::LineContainer,
                _ => NodeKind::Element,
            },
            _ => NodeKind::Other,
        }
    }

    fn text_content(&self, node: &Node) -> String {
        node.text_content().unwrap_or_default()
    }

    fn text_holder(&self, container: &Node) -> Option<Node> {
        container
            .dyn_ref::<Element>()?
            .query_selector(&self.markup.holder_tag)
            .ok()
            .flatten()
            .map(Node::from)
    }

    fn create_line(&mut self, text: &str) -> Result<Node> {
        let container = self
            .document
            .create_element(&self.markup.container_tag)
            .map_err(js_error)?;
        let holder = self.create_text_holder(text)?;
        container.append_child(&holder).map_err(js_error)?;
        Ok(container.into())
    }

    fn create_text_holder(&mut self, text: &str) -> Result<Node> {
        let holder = self
            .document
            .create_element(&self.markup.holder_tag)
            .map_err(js_error)?;
        holder.set_text_content(Some(text));
        Ok(holder.into())
    }

    fn replace_child(&mut self, parent: &Node, new_child: &Node, old_child: &Node) -> Result<()> {
        parent.replace_child(new_child, old_child).map_err(js_error)?;
        Ok(())
    }

    fn append_child(&mut self, parent: &Node, child: &Node) -> Result<()> {
        parent.append_child(child).map_err(js_error)?;
        Ok(())
    }

    fn clear_children(&mut self, parent: &Node) -> Result<()> {
        parent.set_text_content(None);
        Ok(())
    }
}

impl DeckPage for WebDom {
    fn element_by_id(&self, id: &str) -> Option<Node> {
        self.document.get_element_by_id(id).map(Node::from)
    }

    fn attribute(&self, node: &Node, name: &str) -> Option<String> {
        node.dyn_ref::<Element>()?.get_attribute(name)
    }

    fn first_attribute(&self, node: &Node, name: &str) -> Option<String> {
        let el = node.dyn_ref::<Element>()?;
        if let Some(value) = el.get_attribute(name) {
            return Some(value);
        }
        el.query_selector(&format!("[{}]", name))
            .ok()
            .flatten()
            .and_then(|found| found.get_attribute(name))
    }

    fn field_value(&self, id: &str) -> Option<String> {
        let el = self.document.get_element_by_id(id)?;
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            Some(input.value())
        } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
            Some(area.value())
        } else {
            el.get_attribute("value")
        }
    }

    fn set_field_value(&mut self, id: &str, value: &str) -> Result<()> {
        let el = self.element(id)?;
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
        } else {
            el.set_attribute("value", value).map_err(js_error)?;
        }
        Ok(())
    }

    fn display(&self, id: &str) -> Option<String> {
        let el = self.document.get_element_by_id(id)?;
        el.dyn_ref::<HtmlElement>()?
            .style()
            .get_property_value("display")
            .ok()
    }

    fn set_display(&mut self, id: &str, display: &str) -> Result<()> {
        let el = self.element(id)?;
        let el = el
            .dyn_ref::<HtmlElement>()
            .ok_or_else(|| DeckEditorError::MissingElement(format!("#{} (not an HTML element)", id)))?;
        el.style()
            .set_property("display", display)
            .map_err(js_error)
    }

    fn set_text_content(&mut self, node: &Node, text: &str) -> Result<()> {
        node.set_text_content(Some(text));
        Ok(())
    }

    fn set_inner_html(&mut self, node: &Node, html: &str) -> Result<()> {
        let el = node
            .dyn_ref::<Element>()
            .ok_or_else(|| DeckEditorError::InvalidTree("markup target is not an element".to_string()))?;
        el.set_inner_html(html);
        Ok(())
    }

    fn table_rows(&self, table_id: &str) -> Vec<Node> {
        let Ok(list) = self.document.query_selector_all(&format!("#{} tr", table_id)) else {
            return Vec::new();
        };
        (0..list.length()).filter_map(|i| list.get(i)).collect()
    }

    fn find_by_class(&self, node: &Node, class: &str) -> Option<Node> {
        node.dyn_ref::<Element>()?
            .query_selector(&format!(".{}", class))
            .ok()
            .flatten()
            .map(Node::from)
    }
}
