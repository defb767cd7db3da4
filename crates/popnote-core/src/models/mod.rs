//! Data models for popnote

mod note;

pub use note::{sort_newest_first, Note, NoteId};
