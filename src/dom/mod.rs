//! DOM access layer
//!
//! The line editor and the modal controller are written once against the
//! traits in this module. Two backends implement them:
//!
//! - `virtual_tree`: arena-backed in-memory tree (native tests, headless use)
//! - `web`: live page nodes through `web-sys`

pub mod virtual_tree;
pub mod web;

pub use virtual_tree::{NodeId, VirtualDom};
pub use web::WebDom;

use crate::error::Result;

/// How a direct child of the editor root is treated by normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Bare text node
    Text,
    /// Element matching the configured line-container tag
    LineContainer,
    /// Any other element
    Element,
    /// Comments and other non-content nodes, left alone
    Other,
}

/// Tree operations needed by the line editor
pub trait EditorDom {
    type Node: Clone;

    /// Direct children in document order
    fn child_nodes(&self, parent: &Self::Node) -> Vec<Self::Node>;

    fn node_kind(&self, node: &Self::Node) -> NodeKind;

    /// Concatenated text of the node and all descendants
    fn text_content(&self, node: &Self::Node) -> String;

    /// First descendant matching the text-holder tag
    fn text_holder(&self, container: &Self::Node) -> Option<Self::Node>;

    /// Create a detached, well-formed line: container wrapping one holder
    fn create_line(&mut self, text: &str) -> Result<Self::Node>;

    /// Create a detached text-holder carrying `text`
    fn create_text_holder(&mut self, text: &str) -> Result<Self::Node>;

    /// Put `new_child` where `old_child` is
    fn replace_child(
        &mut self,
        parent: &Self::Node,
        new_child: &Self::Node,
        old_child: &Self::Node,
    ) -> Result<()>;

    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<()>;

    fn clear_children(&mut self, parent: &Self::Node) -> Result<()>;

    /// Make `child` the only child of `parent`
    fn replace_children(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<()> {
        self.clear_children(parent)?;
        self.append_child(parent, child)
    }
}

/// Page-level operations needed by the modal controller
pub trait DeckPage: EditorDom {
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    /// First value of `name` on the node or any descendant
    fn first_attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    /// Value of an input/textarea; `None` when the element is absent
    fn field_value(&self, id: &str) -> Option<String>;

    fn set_field_value(&mut self, id: &str, value: &str) -> Result<()>;

    /// Inline `display` style of an element
    fn display(&self, id: &str) -> Option<String>;

    fn set_display(&mut self, id: &str, display: &str) -> Result<()>;

    fn set_text_content(&mut self, node: &Self::Node, text: &str) -> Result<()>;

    fn set_inner_html(&mut self, node: &Self::Node, html: &str) -> Result<()>;

    /// Every `tr` inside the table, in document order
    fn table_rows(&self, table_id: &str) -> Vec<Self::Node>;

    /// First descendant carrying `class`
    fn find_by_class(&self, node: &Self::Node, class: &str) -> Option<Self::Node>;
}
