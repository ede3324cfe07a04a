//! Contenteditable line editor
//!
//! The editor root holds one line-container per line, each wrapping a single
//! text-holder. Browsers break that shape while the user types (Enter inserts
//! bare containers or `<br>`s, some edits leave stray text nodes), so
//! [`LineEditor::normalize`] repairs it in place.

use crate::dom::{EditorDom, NodeKind};
use crate::error::Result;
use crate::text::DeckList;

/// Line operations on one editor root
pub struct LineEditor<'a, D: EditorDom> {
    dom: &'a mut D,
    root: D::Node,
}

impl<'a, D: EditorDom> LineEditor<'a, D> {
    pub fn new(dom: &'a mut D, root: D::Node) -> Self {
        Self { dom, root }
    }

    pub fn root(&self) -> &D::Node {
        &self.root
    }

    /// Restore the container/holder shape for every direct child
    ///
    /// Idempotent. Bare text and foreign elements are wrapped into a new line
    /// carrying their text; containers without a holder get one built from
    /// their combined text; containers that already have a holder are left
    /// alone. An empty root gets one blank line.
    pub fn normalize(&mut self) -> Result<()> {
        for child in self.dom.child_nodes(&self.root) {
            match self.dom.node_kind(&child) {
                NodeKind::Text | NodeKind::Element => {
                    let text = self.dom.text_content(&child);
                    let line = self.dom.create_line(&text)?;
                    self.dom.replace_child(&self.root, &line, &child)?;
                }
                NodeKind::LineContainer => {
                    if self.dom.text_holder(&child).is_none() {
                        let text = self.dom.text_content(&child);
                        let holder = self.dom.create_text_holder(&text)?;
                        self.dom.replace_children(&child, &holder)?;
                    }
                }
                NodeKind::Other => {}
            }
        }

        if self.dom.child_nodes(&self.root).is_empty() {
            let line = self.dom.create_line("")?;
            self.dom.append_child(&self.root, &line)?;
        }

        log::debug!("normalize: {} lines", self.dom.child_nodes(&self.root).len());
        Ok(())
    }

    /// Replace everything with one line per `\n`-separated segment
    ///
    /// Carriage returns are not stripped here; see [`LineEditor::paste`].
    pub fn set_content(&mut self, text: &str) -> Result<()> {
        self.replace_lines(&DeckList::from_text(text))
    }

    /// Replace everything with the given lines, then normalize
    pub fn replace_lines(&mut self, lines: &DeckList) -> Result<()> {
        self.dom.clear_children(&self.root)?;
        for line in lines.lines() {
            let node = self.dom.create_line(line)?;
            self.dom.append_child(&self.root, &node)?;
        }
        self.normalize()
    }

    /// Lines as stored text
    ///
    /// Only line-containers count; a container without a holder yields an
    /// empty line.
    pub fn content(&self) -> String {
        self.lines().to_string()
    }

    pub fn lines(&self) -> DeckList {
        self.dom
            .child_nodes(&self.root)
            .iter()
            .filter(|child| self.dom.node_kind(child) == NodeKind::LineContainer)
            .map(|child| {
                self.dom
                    .text_holder(child)
                    .map(|holder| self.dom.text_content(&holder))
                    .unwrap_or_default()
            })
            .collect()
    }

    /// Value for the hidden field while the user is typing
    ///
    /// Reads every content child as a line, falling back to its whole text
    /// when it has no holder. Does not normalize, so the caret stays put.
    pub fn live_value(&self) -> String {
        self.dom
            .child_nodes(&self.root)
            .iter()
            .filter(|child| self.dom.node_kind(child) != NodeKind::Other)
            .map(|child| match self.dom.text_holder(child) {
                Some(holder) => self.dom.text_content(&holder),
                None => self.dom.text_content(child),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Replace the content with clipboard text and return the new field value
    pub fn paste(&mut self, clipboard: &str) -> Result<String> {
        let lines = DeckList::from_clipboard(clipboard);
        log::debug!("paste: {} lines", lines.line_count());
        self.replace_lines(&lines)?;
        Ok(self.live_value())
    }
}
