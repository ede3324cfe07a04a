//! Deck Editor WASM Module
//!
//! Attaches a free-form deck (name plus one card per line) to a row of a
//! standings table through a modal dialog, and keeps a contenteditable line
//! editor in step with the hidden field the page submits.

pub mod api;
pub mod config;
pub mod dom;
pub mod editor;
pub mod error;
pub mod modal;
pub mod models;
pub mod renderers;
pub mod text;

// Re-export commonly used types
pub use config::{DeckEditorConfig, LineMarkup};
pub use editor::LineEditor;
pub use error::DeckEditorError;
pub use modal::{DeckModal, ModalSession};
pub use models::{DeckRecord, DeckStore, Rank};
pub use text::DeckList;

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    console_log::init_with_level(log::Level::Debug)
        .map_err(|e| JsValue::from_str(&format!("failed to initialize logger: {}", e)))?;

    api::install_globals()?;
    if let Err(e) = api::attach_page_line_editor() {
        log::warn!("line editor not attached: {:?}", e);
    }
    log::info!("Deck editor WASM module initialized");
    Ok(())
}
