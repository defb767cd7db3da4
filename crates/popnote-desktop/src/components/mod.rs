//! UI Components
//!
//! Components for the notes popup.

mod note_row;
mod notes_panel;

pub use note_row::NoteRow;
pub use notes_panel::NotesPanel;
