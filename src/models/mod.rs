//! Models module for the deck editor
//!
//! Ranks, deck records and the in-memory record store.

pub mod deck;

// Re-export commonly used types
pub use deck::{DeckEntry, DeckRecord, DeckStore, Rank};
