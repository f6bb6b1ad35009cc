//! Grid filtering. These are plain predicates over the store's notes; the
//! renderer only ever receives the notes that pass.

use crate::types::note::{Note, NoteId};

/// Swatch value the navigation uses for "no color filter".
pub const TRANSPARENT: &str = "transparent";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum NoteFilter {
	#[default]
	All,
	Color(String),
	Note(NoteId),
}

impl NoteFilter {
	/// Filter for a navigation swatch click. The transparent swatch means
	/// show everything.
	pub fn from_swatch(color: &str) -> Self {
		if color.trim().eq_ignore_ascii_case(TRANSPARENT) {
			NoteFilter::All
		} else {
			NoteFilter::Color(color.to_string())
		}
	}

	pub fn matches(&self, note: &Note) -> bool {
		match self {
			NoteFilter::All => true,
			NoteFilter::Color(color) => same_color(color, &note.color),
			NoteFilter::Note(id) => &note.id == id,
		}
	}
}

/// CSS hex colors are case-insensitive, so `#f7eb96` and `#F7EB96` match.
pub fn same_color(a: &str, b: &str) -> bool { a.trim().eq_ignore_ascii_case(b.trim()) }

pub fn filter_notes<'a, P>(notes: &'a [Note], predicate: P) -> Vec<&'a Note>
where
	P: Fn(&Note) -> bool,
{
	notes.iter().filter(|note| predicate(note)).collect()
}

pub fn visible_notes<'a>(notes: &'a [Note], filter: &NoteFilter) -> Vec<&'a Note> {
	filter_notes(notes, |note| filter.matches(note))
}
