//! popnote-core - Core library for popnote
//!
//! This crate contains the note model, the key-value storage providers, the
//! write-behind note store, and the `NotesWidget` state machine used by the
//! popnote desktop popup.

pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;
pub mod util;
pub mod widget;

pub use error::{Error, Result};
pub use models::{Note, NoteId};
pub use widget::{EditSession, NotesWidget};
