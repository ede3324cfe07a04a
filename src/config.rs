//! Page contract configuration
//!
//! Element ids, class names and line markup the widget expects to find on the
//! host page. Every field has a default, so pages only override what differs.

use serde::{Deserialize, Serialize};

use crate::error::{DeckEditorError, Result};
use crate::models::Rank;

/// Tags used for the two-level line shape of the editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LineMarkup {
    /// Element wrapping one line
    pub container_tag: String,

    /// Element inside a container that carries the line text
    pub holder_tag: String,
}

impl Default for LineMarkup {
    fn default() -> Self {
        Self {
            container_tag: "div".to_string(),
            holder_tag: "span".to_string(),
        }
    }
}

impl LineMarkup {
    pub fn is_container(&self, tag: &str) -> bool {
        tag.eq_ignore_ascii_case(&self.container_tag)
    }

    pub fn is_holder(&self, tag: &str) -> bool {
        tag.eq_ignore_ascii_case(&self.holder_tag)
    }
}

/// Full widget configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeckEditorConfig {
    /// Dialog overlay toggled through its `display` style
    pub modal_id: String,
    pub title_id: String,
    /// Visible deck name input
    pub name_input_id: String,
    /// Contenteditable region; when absent the list field is edited directly
    pub editor_id: String,
    /// Field carrying the serialized list while the dialog is open
    pub list_field_id: String,
    pub table_id: String,
    pub button_group_class: String,
    pub name_field_prefix: String,
    pub list_field_prefix: String,
    /// Rows above the first ranked row
    pub header_rows: usize,
    pub line: LineMarkup,
}

impl Default for DeckEditorConfig {
    fn default() -> Self {
        Self {
            modal_id: "deckModal".to_string(),
            title_id: "deckModalTitle".to_string(),
            name_input_id: "deckName".to_string(),
            editor_id: "deckEditor".to_string(),
            list_field_id: "deckList".to_string(),
            table_id: "standingsTable".to_string(),
            button_group_class: "deck-buttons".to_string(),
            name_field_prefix: "deckName_".to_string(),
            list_field_prefix: "deckList_".to_string(),
            header_rows: 1,
            line: LineMarkup::default(),
        }
    }
}

impl DeckEditorConfig {
    /// Parse a (possibly partial) JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| DeckEditorError::Config(e.to_string()))
    }

    /// Hidden field holding the stored deck name for `rank`
    pub fn name_field_for(&self, rank: Rank) -> String {
        format!("{}{}", self.name_field_prefix, rank)
    }

    /// Hidden field holding the stored deck list for `rank`
    pub fn list_field_for(&self, rank: Rank) -> String {
        format!("{}{}", self.list_field_prefix, rank)
    }
}
