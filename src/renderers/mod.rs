//! Renderers module for the deck editor
//!
//! Markup generated for the host page.

pub mod buttons;

// Re-export commonly used types
pub use buttons::{render_buttons, DeckAction, DeckButton};
