use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned identifier. The endpoint hands these out as numbers, but
/// some deployments return them as strings, so both shapes are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NoteId {
	Number(i64),
	Text(String),
}

impl fmt::Display for NoteId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			NoteId::Number(n) => write!(f, "{}", n),
			NoteId::Text(s) => f.write_str(s),
		}
	}
}

impl From<i64> for NoteId {
	fn from(value: i64) -> Self { NoteId::Number(value) }
}

impl From<&str> for NoteId {
	fn from(value: &str) -> Self {
		// Ids typed by a user or pulled out of markup arrive as text
		match value.trim().parse::<i64>() {
			Ok(n) => NoteId::Number(n),
			Err(_) => NoteId::Text(value.to_string()),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
	pub id:      NoteId,
	pub title:   String,
	pub content: String,
	pub color:   String,

	// Selection state lives only in this process and is never sent back
	#[serde(skip)]
	pub active: bool,
}

/// The editable fields of a note. Doubles as the POST body for a note that
/// has no id yet and as the snapshot an edit session works on.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDraft {
	pub title:   String,
	pub content: String,
	pub color:   String,
}

/// Single-field record handed to the navigation renderer for each swatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorEntry {
	pub color: String,
}
