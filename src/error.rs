//! Error types for deck editing
//!
//! Every operation that touches the page returns [`DeckEditorError`] instead of
//! silently doing nothing, so callers can tell a missing element from a
//! successful no-op.

use thiserror::Error;

use crate::models::Rank;

/// Top-level error type for the deck editor
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckEditorError {
    /// A required element (by id or selector) is not on the page
    #[error("Missing element: {0}")]
    MissingElement(String),

    /// No standings row (or no button group inside it) for the rank
    #[error("No standings row for rank {0}")]
    RowNotFound(Rank),

    /// A rank attribute was absent or not a positive integer
    #[error("Invalid rank: {0:?}")]
    InvalidRank(String),

    /// Markup could not be parsed into nodes
    #[error("Invalid markup: {0}")]
    Markup(String),

    /// A tree operation referenced a node in the wrong place
    #[error("Invalid tree operation: {0}")]
    InvalidTree(String),

    /// Button template failed to compile or render
    #[error("Template error: {0}")]
    Template(String),

    /// Configuration could not be read
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A browser API call raised
    #[error("JavaScript error: {0}")]
    Js(String),
}

impl From<mustache::Error> for DeckEditorError {
    fn from(err: mustache::Error) -> Self {
        DeckEditorError::Template(err.to_string())
    }
}

impl From<quick_xml::Error> for DeckEditorError {
    fn from(err: quick_xml::Error) -> Self {
        DeckEditorError::Markup(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DeckEditorError>;
