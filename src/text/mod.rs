//! Plain text layer
//!
//! Line splitting and joining shared by the line editor, paste handling and
//! stored deck records. Nothing here touches the DOM.

pub mod buffer;

pub use buffer::DeckList;
