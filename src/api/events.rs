//! Browser event wiring for the line editor
//!
//! Input keeps the hidden list field in step without normalizing (so the
//! caret stays where it is), Enter schedules a repair for the next tick after
//! the browser has inserted its own line break, and paste replaces the whole
//! content with plain text.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{ClipboardEvent, Element, Event, KeyboardEvent, Node};

use crate::config::{DeckEditorConfig, LineMarkup};
use crate::dom::{DeckPage, WebDom};
use crate::dom::web::js_error;
use crate::editor::LineEditor;
use crate::error::{DeckEditorError, Result};
use crate::{wasm_info, wasm_log, wasm_warn};

/// An editor root bound to its hidden list field
#[derive(Debug, Clone)]
pub struct LineEditorBinding {
    root: Node,
    list_field_id: String,
    markup: LineMarkup,
}

impl LineEditorBinding {
    pub fn new(root: Node, config: &DeckEditorConfig) -> Self {
        Self {
            root,
            list_field_id: config.list_field_id.clone(),
            markup: config.line.clone(),
        }
    }

    fn dom(&self) -> Result<WebDom> {
        WebDom::from_window(self.markup.clone())
    }

    fn write_field(&self, dom: &mut WebDom, value: &str) -> Result<()> {
        if dom.element_by_id(&self.list_field_id).is_none() {
            wasm_log!("no #{} on page, skipping sync", self.list_field_id);
            return Ok(());
        }
        dom.set_field_value(&self.list_field_id, value)
    }

    /// Copy the editor's live value into the hidden field
    pub fn sync_field(&self) -> Result<()> {
        let mut dom = self.dom()?;
        let value = LineEditor::new(&mut dom, self.root.clone()).live_value();
        self.write_field(&mut dom, &value)
    }

    pub fn normalize(&self) -> Result<()> {
        let mut dom = self.dom()?;
        LineEditor::new(&mut dom, self.root.clone()).normalize()
    }

    /// Run [`normalize`](Self::normalize) on the next turn of the event loop
    pub fn schedule_normalize(&self) -> Result<()> {
        let binding = self.clone();
        let callback = Closure::once_into_js(move || {
            if let Err(e) = binding.normalize() {
                wasm_warn!("deferred normalize failed: {}", e);
            }
        });

        web_sys::window()
            .ok_or_else(|| DeckEditorError::MissingElement("window".to_string()))?
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), 0)
            .map_err(js_error)?;
        Ok(())
    }

    /// Replace the content with clipboard text and sync the hidden field
    pub fn paste(&self, text: &str) -> Result<()> {
        let mut dom = self.dom()?;
        let value = LineEditor::new(&mut dom, self.root.clone()).paste(text)?;
        self.write_field(&mut dom, &value)
    }
}

/// Marks an editor root whose listeners are already attached
const ATTACHED_MARKER: &str = "data-line-editor";

/// Attach input, Enter and paste handlers to the configured editor root
///
/// Listeners live for the lifetime of the page. A root that already carries
/// them is left alone.
pub fn attach_line_editor(config: &DeckEditorConfig) -> Result<LineEditorBinding> {
    let dom = WebDom::from_window(config.line.clone())?;
    let root = dom
        .element_by_id(&config.editor_id)
        .ok_or_else(|| DeckEditorError::MissingElement(format!("#{}", config.editor_id)))?;
    let binding = LineEditorBinding::new(root, config);
    binding.attach()?;
    Ok(binding)
}

impl LineEditorBinding {
    /// Add the listeners to the root; `false` when it already had them
    pub fn attach(&self) -> Result<bool> {
        let element = self
            .root
            .dyn_ref::<Element>()
            .ok_or_else(|| DeckEditorError::InvalidTree("editor root is not an element".to_string()))?;
        if element.has_attribute(ATTACHED_MARKER) {
            wasm_log!("line editor already attached");
            return Ok(false);
        }

        let on_input = {
            let binding = self.clone();
            Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
                if let Err(e) = binding.sync_field() {
                    wasm_warn!("input sync failed: {}", e);
                }
            })
        };

        let on_keydown = {
            let binding = self.clone();
            Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
                if event.key() != "Enter" {
                    return;
                }
                if let Err(e) = binding.schedule_normalize() {
                    wasm_warn!("could not schedule normalize: {}", e);
                }
            })
        };

        let on_paste = {
            let binding = self.clone();
            Closure::<dyn FnMut(ClipboardEvent)>::new(move |event: ClipboardEvent| {
                event.prevent_default();
                let text = event
                    .clipboard_data()
                    .and_then(|data| data.get_data("text/plain").ok())
                    .unwrap_or_default();
                if let Err(e) = binding.paste(&text) {
                    wasm_warn!("paste failed: {}", e);
                }
            })
        };

        element
            .add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())
            .map_err(js_error)?;
        element
            .add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref())
            .map_err(js_error)?;
        element
            .add_event_listener_with_callback("paste", on_paste.as_ref().unchecked_ref())
            .map_err(js_error)?;
        element.set_attribute(ATTACHED_MARKER, "attached").map_err(js_error)?;

        on_input.forget();
        on_keydown.forget();
        on_paste.forget();

        wasm_info!("line editor attached to #{}", self.root_id());
        Ok(true)
    }

    fn root_id(&self) -> String {
        self.root
            .dyn_ref::<Element>()
            .map(|element| element.id())
            .unwrap_or_default()
    }
}
