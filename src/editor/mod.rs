//! Line editor over any [`EditorDom`](crate::dom::EditorDom) backend

pub mod line_editor;

pub use line_editor::LineEditor;
