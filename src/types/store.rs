use serde::Deserialize;

use crate::types::note::Note;

pub mod methods;

/// When a mutation touches the local list relative to the server round trip.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncPolicy {
	/// Mutate locally, then send. A rejected request leaves the local change
	/// in place, so memory and server may disagree afterwards.
	Optimistic,

	/// Send first and commit locally only once the server accepted.
	#[default]
	Confirmed,
}

/// Local copy of the remote notes collection plus the single active note.
///
/// Notes are kept newest-first, the reverse of the order the server lists
/// them in. The active note is whichever note carries `active == true`; the
/// store keeps that to at most one.
pub struct NoteStore<B> {
	backend: B,
	notes:   Vec<Note>,
	policy:  SyncPolicy,
}
