//! Row action buttons
//!
//! The button group of a standings row is regenerated from a Mustache
//! template after every save or delete. Buttons call back into the global
//! entry points through inline `onclick` handlers and carry their rank in
//! `data-rank`.

use serde::Serialize;

use crate::error::Result;
use crate::models::Rank;

const BUTTONS_TEMPLATE: &str = include_str!("templates/deck_buttons.html.mustache");

/// What a row button does when clicked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckAction {
    Add,
    Edit,
    Delete,
}

impl DeckAction {
    pub fn name(self) -> &'static str {
        match self {
            DeckAction::Add => "add",
            DeckAction::Edit => "edit",
            DeckAction::Delete => "delete",
        }
    }

    /// Visible label; opening the dialog from a label containing "Edit"
    /// titles it as an edit
    pub fn label(self) -> &'static str {
        match self {
            DeckAction::Add => "Add Deck",
            DeckAction::Edit => "Edit",
            DeckAction::Delete => "Delete",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            DeckAction::Add => "bi-plus-circle",
            DeckAction::Edit => "bi-pencil",
            DeckAction::Delete => "bi-trash",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckButton {
    pub action: DeckAction,
    pub rank: Rank,
}

impl DeckButton {
    pub fn new(action: DeckAction, rank: Rank) -> Self {
        Self { action, rank }
    }

    /// Buttons for a row that has a saved deck
    pub fn saved(rank: Rank) -> Vec<DeckButton> {
        vec![
            DeckButton::new(DeckAction::Edit, rank),
            DeckButton::new(DeckAction::Delete, rank),
        ]
    }

    /// Buttons for a row without a deck
    pub fn empty(rank: Rank) -> Vec<DeckButton> {
        vec![DeckButton::new(DeckAction::Add, rank)]
    }

    pub fn onclick(&self) -> String {
        match self.action {
            DeckAction::Add | DeckAction::Edit => "openDeckModal(this)".to_string(),
            DeckAction::Delete => format!("deleteDeck({})", self.rank),
        }
    }
}

#[derive(Debug, Serialize)]
struct ButtonView {
    action: &'static str,
    label: &'static str,
    icon: &'static str,
    onclick: String,
    rank: String,
}

#[derive(Debug, Serialize)]
struct ButtonGroupView {
    buttons: Vec<ButtonView>,
}

/// Render a button group's inner markup
pub fn render_buttons(buttons: &[DeckButton]) -> Result<String> {
    let view = ButtonGroupView {
        buttons: buttons
            .iter()
            .map(|b| ButtonView {
                action: b.action.name(),
                label: b.action.label(),
                icon: b.action.icon(),
                onclick: b.onclick(),
                rank: b.rank.to_string(),
            })
            .collect(),
    };

    let template = mustache::compile_str(BUTTONS_TEMPLATE)?;
    let html = template.render_to_string(&view)?;
    Ok(html.trim().to_string())
}
