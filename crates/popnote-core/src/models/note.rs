//! Note model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// A unique identifier for a note, derived from its creation time in Unix ms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(i64);

impl NoteId {
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Get the raw integer value stored in the persisted record
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// A short text note
///
/// Serialized as `{ "id": <int>, "text": <string>, "created": <int> }`, which
/// is the exact shape persisted under the `notes` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier, immutable once assigned
    pub id: NoteId,
    /// Plain text content
    pub text: String,
    /// Creation timestamp (Unix ms), used for ordering
    pub created: i64,
}

impl Note {
    #[must_use]
    pub fn new(id: NoteId, text: impl Into<String>, created: i64) -> Self {
        Self {
            id,
            text: text.into(),
            created,
        }
    }
}

/// Sort notes newest first by creation time.
///
/// The sort is stable, so notes sharing a timestamp keep their relative order.
pub fn sort_newest_first(notes: &mut [Note]) {
    notes.sort_by(|a, b| b.created.cmp(&a.created));
}
