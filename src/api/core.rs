//! Deck dialog WASM API
//!
//! JavaScript-facing entry points. The controller state (configuration,
//! stored records and the open session) is owned here, on the WASM side.

use std::sync::{Mutex, MutexGuard};

use lazy_static::lazy_static;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Node};

use crate::api::events::attach_line_editor;
use crate::api::helpers::{deserialize, serialize, to_js_error};
use crate::config::DeckEditorConfig;
use crate::dom::{DeckPage, WebDom};
use crate::models::Rank;
use crate::modal::DeckModal;
use crate::{wasm_error, wasm_info, wasm_log};

// WASM-owned dialog state (single dialog per page)
lazy_static! {
    static ref DECK_MODAL: Mutex<DeckModal> = Mutex::new(DeckModal::default());
}

/// Lock the dialog state
pub fn lock_modal() -> Result<MutexGuard<'static, DeckModal>, JsValue> {
    DECK_MODAL.lock().map_err(|e| {
        wasm_error!("Failed to lock deck modal: {}", e);
        JsValue::from_str(&format!("Failed to lock deck modal: {}", e))
    })
}

fn web_page(config: &DeckEditorConfig) -> Result<WebDom, JsValue> {
    WebDom::from_window(config.line.clone()).map_err(to_js_error)
}

/// Replace the page contract; missing keys keep their defaults
#[wasm_bindgen(js_name = configureDeckEditor)]
pub fn configure_deck_editor(config: JsValue) -> Result<(), JsValue> {
    let config: DeckEditorConfig = if config.is_undefined() || config.is_null() {
        DeckEditorConfig::default()
    } else {
        deserialize(config, "Invalid deck editor config")?
    };
    wasm_info!("configureDeckEditor: editor #{}, table #{}", config.editor_id, config.table_id);

    lock_modal()?.set_config(config);
    Ok(())
}

/// Wire input/Enter/paste handling onto the editor region
#[wasm_bindgen(js_name = attachLineEditor)]
pub fn attach_line_editor_js() -> Result<(), JsValue> {
    let config = lock_modal()?.config().clone();
    attach_line_editor(&config).map_err(to_js_error)?;
    Ok(())
}

/// Attach the line editor when the page has an editor region
///
/// Returns `false` without error when it does not.
pub fn attach_page_line_editor() -> Result<bool, JsValue> {
    let config = lock_modal()?.config().clone();
    let page = web_page(&config)?;
    if page.element_by_id(&config.editor_id).is_none() {
        wasm_log!("no #{} on page, line editor not attached", config.editor_id);
        return Ok(false);
    }
    attach_line_editor(&config).map_err(to_js_error)?;
    Ok(true)
}

/// Open the dialog for the row of the clicked button
#[wasm_bindgen(js_name = openDeckModal)]
pub fn open_deck_modal(trigger: &Element) -> Result<u32, JsValue> {
    let mut modal = lock_modal()?;
    let mut page = web_page(modal.config())?;
    let trigger: Node = trigger.clone().into();

    let rank = modal.open(&mut page, &trigger).map_err(to_js_error)?;
    wasm_info!("openDeckModal: rank {}", rank);
    Ok(rank.0)
}

#[wasm_bindgen(js_name = closeDeckModal)]
pub fn close_deck_modal() -> Result<(), JsValue> {
    let mut modal = lock_modal()?;
    let mut page = web_page(modal.config())?;
    modal.close(&mut page).map_err(to_js_error)
}

/// Save the open dialog; returns the saved rank, or nothing when no dialog
/// was open
#[wasm_bindgen(js_name = saveDeck)]
pub fn save_deck() -> Result<Option<u32>, JsValue> {
    let mut modal = lock_modal()?;
    let mut page = web_page(modal.config())?;
    let saved = modal.save(&mut page).map_err(to_js_error)?;
    Ok(saved.map(|rank| rank.0))
}

#[wasm_bindgen(js_name = deleteDeck)]
pub fn delete_deck(rank: u32) -> Result<(), JsValue> {
    let mut modal = lock_modal()?;
    let mut page = web_page(modal.config())?;
    modal.remove(&mut page, Rank(rank)).map_err(to_js_error)
}

/// Stored decks as `[{ rank, name, list }]`, ordered by rank
#[wasm_bindgen(js_name = getDeckRecords)]
pub fn get_deck_records() -> Result<JsValue, JsValue> {
    let modal = lock_modal()?;
    serialize(&modal.store().entries(), "Failed to serialize deck records")
}

/// Stored decks as a JSON object keyed by rank
#[wasm_bindgen(js_name = exportDecksJson)]
pub fn export_decks_json() -> Result<String, JsValue> {
    lock_modal()?.store().to_json().map_err(to_js_error)
}

/// Expose the entry points as `window` globals for inline `onclick` handlers
pub fn install_globals() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;

    let open = Closure::<dyn Fn(Element) -> Result<u32, JsValue>>::new(|trigger: Element| {
        open_deck_modal(&trigger)
    });
    let close = Closure::<dyn Fn() -> Result<(), JsValue>>::new(close_deck_modal);
    let save = Closure::<dyn Fn() -> Result<Option<u32>, JsValue>>::new(save_deck);
    let delete = Closure::<dyn Fn(u32) -> Result<(), JsValue>>::new(delete_deck);

    js_sys::Reflect::set(&window, &JsValue::from_str("openDeckModal"), &open.into_js_value())?;
    js_sys::Reflect::set(&window, &JsValue::from_str("closeDeckModal"), &close.into_js_value())?;
    js_sys::Reflect::set(&window, &JsValue::from_str("saveDeck"), &save.into_js_value())?;
    js_sys::Reflect::set(&window, &JsValue::from_str("deleteDeck"), &delete.into_js_value())?;

    wasm_info!("deck editor globals installed");
    Ok(())
}
