// Line editor behavior on the in-memory DOM: normalization shape,
// content round-trips and paste handling

use deck_editor_wasm::dom::{EditorDom, NodeId, VirtualDom};
use deck_editor_wasm::LineEditor;

fn editor_page(inner: &str) -> (VirtualDom, NodeId) {
    let dom = VirtualDom::from_html(&format!(
        r#"<div id="deckEditor">{}</div><input type="hidden" id="deckList" value="" />"#,
        inner
    ))
    .expect("fixture should parse");
    let root = dom.get_element_by_id("deckEditor").expect("editor root");
    (dom, root)
}

/// Every direct child is a `div` with a `span` somewhere inside it
fn assert_well_formed(dom: &VirtualDom, root: NodeId) {
    let children = dom.children(root);
    assert!(!children.is_empty(), "editor root must never be empty");
    for child in children {
        assert_eq!(dom.tag(*child), Some("div"), "child is not a line: {}", dom.outer_html(*child));
        assert!(
            dom.text_holder(child).is_some(),
            "line has no holder: {}",
            dom.outer_html(*child)
        );
    }
}

const MIXED_STARTS: &[&str] = &[
    "",
    "bare text",
    "<b>bold</b>",
    "<span>loose holder</span>",
    "<div></div>",
    "<div><br/></div>",
    "<div>text only</div>",
    "<div><span>ok</span></div>",
    "<div><span>a</span><span>b</span></div>",
    "one<div><span>two</span></div><p>three</p><div>four</div>five",
    "<div><div>nested</div></div>",
];

#[test]
fn test_normalize_is_idempotent() {
    for start in MIXED_STARTS {
        let (mut dom, root) = editor_page(start);

        LineEditor::new(&mut dom, root).normalize().unwrap();
        let once = dom.inner_html(root);

        LineEditor::new(&mut dom, root).normalize().unwrap();
        let twice = dom.inner_html(root);

        assert_eq!(once, twice, "normalize not idempotent for {:?}", start);
    }
}

#[test]
fn test_normalize_restores_line_shape() {
    for start in MIXED_STARTS {
        let (mut dom, root) = editor_page(start);
        LineEditor::new(&mut dom, root).normalize().unwrap();
        assert_well_formed(&dom, root);
    }
}

#[test]
fn test_normalize_keeps_line_order_and_text() {
    let (mut dom, root) = editor_page("one<div><span>two</span></div><p>three</p><div>four</div>five");
    let mut editor = LineEditor::new(&mut dom, root);
    editor.normalize().unwrap();
    assert_eq!(editor.content(), "one\ntwo\nthree\nfour\nfive");
}

#[test]
fn test_nested_container_keeps_inner_holder() {
    // An outer container whose only holder lives in a nested line is left as is
    let (mut dom, root) = editor_page("<div><div><span>deep</span></div></div>");
    let mut editor = LineEditor::new(&mut dom, root);
    editor.normalize().unwrap();
    assert_eq!(editor.content(), "deep");
    assert_eq!(dom.inner_html(root), "<div><div><span>deep</span></div></div>");
}

#[test]
fn test_content_round_trip() {
    let samples = [
        "",
        "\n",
        "\n\n\n",
        "Card A",
        "Card A\nCard B",
        "4 Lightning Bolt\n\n20 Mountain",
        "trailing\n",
        "trailing\n\n",
        "  padded  \n\ttabbed",
        "ünïcödé ✓\n日本語",
    ];

    for text in samples {
        let (mut dom, root) = editor_page("<p>previous</p>");
        let mut editor = LineEditor::new(&mut dom, root);
        editor.set_content(text).unwrap();
        assert_eq!(editor.content(), text, "round trip failed for {:?}", text);
        assert_eq!(editor.live_value(), text);
    }
}

#[test]
fn test_set_content_creates_line_per_segment() {
    let (mut dom, root) = editor_page("");
    LineEditor::new(&mut dom, root).set_content("a\n\nb\n").unwrap();
    assert_eq!(dom.children(root).len(), 4);
    assert_well_formed(&dom, root);
}

#[test]
fn test_set_content_does_not_strip_carriage_returns() {
    let (mut dom, root) = editor_page("");
    let mut editor = LineEditor::new(&mut dom, root);
    editor.set_content("a\r\nb").unwrap();
    assert_eq!(editor.content(), "a\r\nb");
}

#[test]
fn test_empty_content_is_one_blank_line() {
    let (mut dom, root) = editor_page("<div><span>x</span></div>");
    LineEditor::new(&mut dom, root).set_content("").unwrap();
    assert_eq!(dom.inner_html(root), "<div><span></span></div>");
}

#[test]
fn test_paste_replaces_everything() {
    let (mut dom, root) = editor_page("<div><span>old 1</span></div><div>old 2</div>stray");
    let mut editor = LineEditor::new(&mut dom, root);

    let value = editor.paste("X\r\nY\r\n\r\nZ").unwrap();
    assert_eq!(value, "X\nY\n\nZ");
    assert_eq!(editor.content(), "X\nY\n\nZ");

    let lines = editor.lines();
    assert_eq!(lines.lines(), &["X", "Y", "", "Z"]);
    assert_well_formed(&dom, root);
}

#[test]
fn test_paste_lone_carriage_returns_are_dropped() {
    let (mut dom, root) = editor_page("");
    let value = LineEditor::new(&mut dom, root).paste("a\rb\r").unwrap();
    assert_eq!(value, "ab");
}

#[test]
fn test_paste_empty_clipboard_leaves_blank_line() {
    let (mut dom, root) = editor_page("<div><span>keep?</span></div>");
    let value = LineEditor::new(&mut dom, root).paste("").unwrap();
    assert_eq!(value, "");
    assert_eq!(dom.inner_html(root), "<div><span></span></div>");
}

#[test]
fn test_typing_new_lines_after_enter() {
    let (mut dom, root) = editor_page("");
    LineEditor::new(&mut dom, root).set_content("Card A\nCard B").unwrap();

    // Enter at the end of "Card B": the browser inserts an empty line
    let third = dom.append_element(root, "div").unwrap();
    dom.append_element(third, "br").unwrap();
    LineEditor::new(&mut dom, root).normalize().unwrap();

    let holder = dom.text_holder(&third).expect("repaired line has a holder");
    dom.set_text(holder, "Card C");

    // Enter again, then typing lands directly in the new container
    let fourth = dom.append_element(root, "div").unwrap();
    dom.append_text(fourth, "Card D").unwrap();

    // Live sync reads the unrepaired line through its text
    assert_eq!(
        LineEditor::new(&mut dom, root).live_value(),
        "Card A\nCard B\nCard C\nCard D"
    );

    // Deferred repair after the second Enter
    let mut editor = LineEditor::new(&mut dom, root);
    editor.normalize().unwrap();
    assert_eq!(editor.content(), "Card A\nCard B\nCard C\nCard D");
    assert_well_formed(&dom, root);
}

#[test]
fn test_content_skips_lines_without_holder_until_normalized() {
    let (mut dom, root) = editor_page("<div><span>a</span></div><div>b</div>");
    let mut editor = LineEditor::new(&mut dom, root);

    assert_eq!(editor.content(), "a\n");
    assert_eq!(editor.live_value(), "a\nb");

    editor.normalize().unwrap();
    assert_eq!(editor.content(), "a\nb");
}

#[test]
fn test_custom_markup() {
    use deck_editor_wasm::LineMarkup;

    let markup = LineMarkup {
        container_tag: "p".to_string(),
        holder_tag: "em".to_string(),
    };
    let mut dom = VirtualDom::from_html_with_markup(r#"<section id="ed">x<div>y</div></section>"#, markup)
        .unwrap();
    let root = dom.get_element_by_id("ed").unwrap();

    let mut editor = LineEditor::new(&mut dom, root);
    editor.normalize().unwrap();
    assert_eq!(editor.content(), "x\ny");
    assert_eq!(dom.inner_html(root), "<p><em>x</em></p><p><em>y</em></p>");
}
