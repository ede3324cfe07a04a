//! Deck Editor WASM API
//!
//! # Module Structure
//!
//! - `helpers`: logging macros, serde conversions and error conversion
//! - `core`: dialog entry points and the WASM-owned dialog state
//! - `events`: input/Enter/paste listeners for the line editor

pub mod helpers;
pub mod core;
pub mod events;

pub use self::core::*;
pub use self::events::{attach_line_editor, LineEditorBinding};
