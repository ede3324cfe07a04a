//! Browser tests
//!
//! Exercise the `web-sys` backend and the exported entry points on a real
//! document. Run with `wasm-pack test --headless --chrome`.

#![cfg(target_arch = "wasm32")]

use deck_editor_wasm::api::{
    attach_line_editor, attach_page_line_editor, configure_deck_editor, delete_deck,
    open_deck_modal, save_deck,
};
use deck_editor_wasm::dom::WebDom;
use deck_editor_wasm::{DeckEditorConfig, LineEditor, LineMarkup};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::{Element, Event, HtmlInputElement, Node};

wasm_bindgen_test_configure!(run_in_browser);

const PAGE: &str = r#"
<div id="deckModal" style="display: none">
  <h2 id="deckModalTitle"></h2>
  <input type="text" id="deckName">
  <div id="deckEditor" contenteditable="true"></div>
  <input type="hidden" id="deckList">
</div>
<table id="standingsTable">
  <tr><th>Rank</th><th>Deck</th></tr>
  <tr><td>1</td><td class="deck-buttons"><button class="btn-deck" data-rank="1"> Add Deck</button></td></tr>
  <tr><td>2</td><td class="deck-buttons"><button class="btn-deck" data-rank="2"> Edit</button></td></tr>
</table>
<input type="hidden" id="deckName_1" value="">
<input type="hidden" id="deckList_1" value="">
<input type="hidden" id="deckName_2" value="Mono Red">
<input type="hidden" id="deckList_2" value="">
"#;

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

fn load_page(html: &str) {
    document().body().unwrap().set_inner_html(html);
    configure_deck_editor(JsValue::UNDEFINED).unwrap();
}

fn by_id(id: &str) -> Element {
    document().get_element_by_id(id).unwrap()
}

fn input_value(id: &str) -> String {
    by_id(id).dyn_into::<HtmlInputElement>().unwrap().value()
}

fn set_input_value(id: &str, value: &str) {
    by_id(id).dyn_into::<HtmlInputElement>().unwrap().set_value(value);
}

fn editor_root() -> Node {
    by_id("deckEditor").into()
}

#[wasm_bindgen_test]
fn test_normalize_on_live_dom() {
    load_page(r#"<div id="deckEditor">bare<div>plain</div><b>bold</b><div><span>ok</span></div></div>"#);
    let mut dom = WebDom::from_window(LineMarkup::default()).unwrap();

    LineEditor::new(&mut dom, editor_root()).normalize().unwrap();
    assert_eq!(
        by_id("deckEditor").inner_html(),
        "<div><span>bare</span></div><div><span>plain</span></div>\
         <div><span>bold</span></div><div><span>ok</span></div>"
    );
}

#[wasm_bindgen_test]
fn test_round_trip_on_live_dom() {
    load_page(r#"<div id="deckEditor"></div>"#);
    let mut dom = WebDom::from_window(LineMarkup::default()).unwrap();
    let mut editor = LineEditor::new(&mut dom, editor_root());

    for text in ["", "\n", "Card A\nCard B", "trailing\n\n"] {
        editor.set_content(text).unwrap();
        assert_eq!(editor.content(), text);
    }
}

#[wasm_bindgen_test]
fn test_open_save_delete_through_entry_points() {
    load_page(PAGE);
    set_input_value("deckList_2", "Card A\nCard B");

    let edit = document()
        .query_selector("button[data-rank=\"2\"]")
        .unwrap()
        .unwrap();
    assert_eq!(open_deck_modal(&edit).unwrap(), 2);
    assert_eq!(by_id("deckModalTitle").text_content().unwrap(), "Edit Deck for Rank 2");
    assert_eq!(input_value("deckName"), "Mono Red");
    assert_eq!(
        by_id("deckEditor").inner_html(),
        "<div><span>Card A</span></div><div><span>Card B</span></div>"
    );

    set_input_value("deckName", "Mono Red v2");
    assert_eq!(save_deck().unwrap(), Some(2));
    assert_eq!(input_value("deckName_2"), "Mono Red v2");
    assert_eq!(input_value("deckList_2"), "Card A\nCard B");
    assert_eq!(save_deck().unwrap(), None);

    let buttons = document()
        .query_selector_all("#standingsTable tr:nth-child(3) .deck-buttons button")
        .unwrap();
    assert_eq!(buttons.length(), 2);

    delete_deck(2).unwrap();
    assert_eq!(input_value("deckName_2"), "");
    assert_eq!(input_value("deckList_2"), "");
    let buttons = document()
        .query_selector_all("#standingsTable tr:nth-child(3) .deck-buttons button")
        .unwrap();
    assert_eq!(buttons.length(), 1);
}

#[wasm_bindgen_test]
fn test_input_event_syncs_hidden_field() {
    load_page(PAGE);
    attach_line_editor(&DeckEditorConfig::default()).unwrap();

    by_id("deckEditor").set_inner_html("<div><span>typed</span></div><div>raw</div>");
    let event = Event::new("input").unwrap();
    by_id("deckEditor").dispatch_event(&event).unwrap();

    assert_eq!(input_value("deckList"), "typed\nraw");
}

#[wasm_bindgen_test]
fn test_paste_binding_replaces_content() {
    load_page(PAGE);
    let binding = attach_line_editor(&DeckEditorConfig::default()).unwrap();
    by_id("deckEditor").set_inner_html("<div><span>old</span></div>");

    binding.paste("X\r\nY\r\n\r\nZ").unwrap();
    assert_eq!(input_value("deckList"), "X\nY\n\nZ");
    assert_eq!(by_id("deckEditor").child_element_count(), 4);
}

#[wasm_bindgen_test]
fn test_startup_attach_skips_page_without_editor() {
    load_page(r#"<input type="hidden" id="deckList">"#);
    assert!(!attach_page_line_editor().unwrap());
}

#[wasm_bindgen_test]
fn test_startup_attach_wires_existing_editor() {
    load_page(PAGE);
    assert!(attach_page_line_editor().unwrap());

    by_id("deckEditor").set_inner_html("<div><span>from startup</span></div>");
    let event = Event::new("input").unwrap();
    by_id("deckEditor").dispatch_event(&event).unwrap();
    assert_eq!(input_value("deckList"), "from startup");
}

#[wasm_bindgen_test]
fn test_second_attach_adds_no_listeners() {
    load_page(PAGE);
    let binding = attach_line_editor(&DeckEditorConfig::default()).unwrap();

    assert!(by_id("deckEditor").has_attribute("data-line-editor"));
    assert!(!binding.attach().unwrap());

    // The startup path finds the editor but leaves its listeners alone
    assert!(attach_page_line_editor().unwrap());
    assert!(!binding.attach().unwrap());
}
