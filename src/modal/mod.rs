//! Deck dialog controller
//!
//! Opens the dialog for a standings row, loads the row's stored deck into the
//! name input and the line editor, and writes it back on save. Stored decks
//! live in per-rank hidden fields (what the page submits) mirrored by an
//! in-memory [`DeckStore`].

pub mod rows;

pub use rows::RowIndex;

use crate::config::DeckEditorConfig;
use crate::dom::DeckPage;
use crate::editor::LineEditor;
use crate::error::{DeckEditorError, Result};
use crate::models::{DeckRecord, DeckStore, Rank};
use crate::renderers::{render_buttons, DeckButton};

/// The rank an open dialog is editing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalSession {
    pub rank: Rank,
}

/// Dialog state: configuration, stored records and the current session
#[derive(Debug, Clone, Default)]
pub struct DeckModal {
    config: DeckEditorConfig,
    store: DeckStore,
    session: Option<ModalSession>,
}

impl DeckModal {
    pub fn new(config: DeckEditorConfig) -> Self {
        Self {
            config,
            store: DeckStore::new(),
            session: None,
        }
    }

    pub fn config(&self) -> &DeckEditorConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: DeckEditorConfig) {
        self.config = config;
    }

    pub fn store(&self) -> &DeckStore {
        &self.store
    }

    pub fn session(&self) -> Option<ModalSession> {
        self.session
    }

    /// Open the dialog for the rank named by `trigger`'s `data-rank`
    ///
    /// A second open replaces the current session. Every element the dialog
    /// writes to is resolved first; on error the page and the session are
    /// left as they were.
    pub fn open<P: DeckPage>(&mut self, page: &mut P, trigger: &P::Node) -> Result<Rank> {
        let rank: Rank = page
            .attribute(trigger, "data-rank")
            .ok_or_else(|| DeckEditorError::InvalidRank("missing data-rank".to_string()))?
            .parse()?;
        let label = page.text_content(trigger);

        require(&*page, &self.config.modal_id)?;
        let title = require(&*page, &self.config.title_id)?;
        require(&*page, &self.config.name_input_id)?;
        if self.editor_root(&*page).is_none() {
            require(&*page, &self.config.list_field_id)?;
        }

        let record = DeckRecord {
            name: page
                .field_value(&self.config.name_field_for(rank))
                .unwrap_or_default(),
            list: page
                .field_value(&self.config.list_field_for(rank))
                .unwrap_or_default(),
        };

        let verb = if label.contains("Edit") { "Edit" } else { "Add" };
        page.set_text_content(&title, &format!("{} Deck for Rank {}", verb, rank))?;
        page.set_field_value(&self.config.name_input_id, &record.name)?;
        self.load_list(page, &record.list)?;
        page.set_display(&self.config.modal_id, "block")?;

        if let Some(previous) = self.session.replace(ModalSession { rank }) {
            log::debug!("open: replacing session for rank {}", previous.rank);
        }

        log::info!(
            "open: rank {} ({} lines)",
            rank,
            record.lines().line_count()
        );
        self.store.insert(rank, record);
        Ok(rank)
    }

    /// Hide the dialog; inputs keep whatever was typed
    pub fn close<P: DeckPage>(&mut self, page: &mut P) -> Result<()> {
        page.set_display(&self.config.modal_id, "none")
    }

    /// Write the dialog back into the session's rank
    ///
    /// Returns `Ok(None)` without touching the page when nothing is open.
    /// A missing hidden field or row fails before anything is written and
    /// keeps the session.
    pub fn save<P: DeckPage>(&mut self, page: &mut P) -> Result<Option<Rank>> {
        let Some(ModalSession { rank }) = self.session else {
            log::debug!("save: no open session");
            return Ok(None);
        };

        let name = page
            .field_value(&self.config.name_input_id)
            .ok_or_else(|| DeckEditorError::MissingElement(format!("#{}", self.config.name_input_id)))?;
        let group = self.row_targets(&*page, rank)?;
        let html = render_buttons(&DeckButton::saved(rank))?;
        let list = self.read_list(page)?;

        page.set_field_value(&self.config.name_field_for(rank), &name)?;
        page.set_field_value(&self.config.list_field_for(rank), &list)?;
        page.set_inner_html(&group, &html)?;

        log::info!("save: rank {} name {:?}", rank, name);
        self.store.insert(rank, DeckRecord { name, list });
        self.session = None;
        self.close(page)?;
        Ok(Some(rank))
    }

    /// Reset a row to "Add Deck" and clear its stored deck
    ///
    /// Leaves the dialog and the session as they are.
    pub fn remove<P: DeckPage>(&mut self, page: &mut P, rank: Rank) -> Result<()> {
        let group = self.row_targets(&*page, rank)?;
        let html = render_buttons(&DeckButton::empty(rank))?;

        page.set_inner_html(&group, &html)?;
        page.set_field_value(&self.config.name_field_for(rank), "")?;
        page.set_field_value(&self.config.list_field_for(rank), "")?;
        self.store.remove(rank);

        log::info!("remove: rank {}", rank);
        Ok(())
    }

    fn editor_root<P: DeckPage>(&self, page: &P) -> Option<P::Node> {
        page.element_by_id(&self.config.editor_id)
    }

    /// Fill the line editor, or the plain list field when the page has none
    fn load_list<P: DeckPage>(&self, page: &mut P, list: &str) -> Result<()> {
        match self.editor_root(&*page) {
            Some(root) => {
                let value = {
                    let mut editor = LineEditor::new(page, root);
                    editor.set_content(list)?;
                    editor.live_value()
                };
                if page.element_by_id(&self.config.list_field_id).is_some() {
                    page.set_field_value(&self.config.list_field_id, &value)?;
                }
                Ok(())
            }
            None => page.set_field_value(&self.config.list_field_id, list),
        }
    }

    fn read_list<P: DeckPage>(&self, page: &mut P) -> Result<String> {
        match self.editor_root(&*page) {
            Some(root) => {
                let mut editor = LineEditor::new(page, root);
                editor.normalize()?;
                Ok(editor.content())
            }
            None => page
                .field_value(&self.config.list_field_id)
                .ok_or_else(|| DeckEditorError::MissingElement(format!("#{}", self.config.list_field_id))),
        }
    }

    /// Button group of `rank`'s row, once both hidden fields are known to exist
    fn row_targets<P: DeckPage>(&self, page: &P, rank: Rank) -> Result<P::Node> {
        require(page, &self.config.name_field_for(rank))?;
        require(page, &self.config.list_field_for(rank))?;
        RowIndex::build(page, &self.config)
            .get(rank)
            .cloned()
            .ok_or(DeckEditorError::RowNotFound(rank))
    }
}

fn require<P: DeckPage>(page: &P, id: &str) -> Result<P::Node> {
    page.element_by_id(id)
        .ok_or_else(|| DeckEditorError::MissingElement(format!("#{}", id)))
}
