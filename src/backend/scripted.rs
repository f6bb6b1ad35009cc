use std::{collections::HashSet, sync::Mutex};

use async_trait::async_trait;

use crate::{backend::NoteBackend, error::BackendError, types::note::{Note, NoteDraft, NoteId}};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Op {
	List,
	Create,
	Update,
	Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Request {
	List,
	Create(NoteDraft),
	Update(Note),
	Delete(NoteId),
}

#[derive(Default)]
struct State {
	notes:    Vec<Note>,
	next_id:  i64,
	failing:  HashSet<Op>,
	requests: Vec<Request>,
}

/// In-memory server stand-in. Keeps notes in server order, hands out
/// increasing numeric ids and records every request it sees.
#[derive(Default)]
pub(crate) struct ScriptedBackend {
	state: Mutex<State>,
}

pub(crate) fn note(id: i64, title: &str, color: &str) -> Note {
	Note {
		id:      NoteId::Number(id),
		title:   title.to_string(),
		content: String::new(),
		color:   color.to_string(),
		active:  false,
	}
}

impl ScriptedBackend {
	pub(crate) fn with_notes(notes: Vec<Note>) -> Self {
		let next_id = notes
			.iter()
			.filter_map(|n| match n.id {
				NoteId::Number(id) => Some(id),
				NoteId::Text(_) => None,
			})
			.max()
			.unwrap_or(0)
			+ 1;

		Self { state: Mutex::new(State { notes, next_id, ..State::default() }) }
	}

	pub(crate) fn fail(&self, op: Op) { self.state.lock().unwrap().failing.insert(op); }

	pub(crate) fn recover(&self, op: Op) { self.state.lock().unwrap().failing.remove(&op); }

	pub(crate) fn requests(&self) -> Vec<Request> { self.state.lock().unwrap().requests.clone() }

	pub(crate) fn server_notes(&self) -> Vec<Note> { self.state.lock().unwrap().notes.clone() }

	fn record(&self, op: Op, request: Request) -> Result<(), BackendError> {
		let mut state = self.state.lock().unwrap();
		state.requests.push(request);
		if state.failing.contains(&op) {
			return Err(BackendError::Rejected(format!("{:?} refused", op)));
		}
		Ok(())
	}
}

#[async_trait]
impl NoteBackend for ScriptedBackend {
	async fn list(&self) -> Result<Vec<Note>, BackendError> {
		self.record(Op::List, Request::List)?;
		Ok(self.server_notes())
	}

	async fn create(&self, draft: &NoteDraft) -> Result<Note, BackendError> {
		self.record(Op::Create, Request::Create(draft.clone()))?;

		let mut state = self.state.lock().unwrap();
		let created = Note {
			id:      NoteId::Number(state.next_id),
			title:   draft.title.clone(),
			content: draft.content.clone(),
			color:   draft.color.clone(),
			active:  false,
		};
		state.next_id += 1;
		state.notes.push(created.clone());
		Ok(created)
	}

	async fn update(&self, note: &Note) -> Result<Option<Note>, BackendError> {
		self.record(Op::Update, Request::Update(note.clone()))?;

		let mut state = self.state.lock().unwrap();
		match state.notes.iter_mut().find(|n| n.id == note.id) {
			Some(stored) => {
				*stored = Note { active: false, ..note.clone() };
				Ok(Some(stored.clone()))
			}
			None => Err(BackendError::Status { url: format!("/notes/{}", note.id), status: 404 }),
		}
	}

	async fn delete(&self, id: &NoteId) -> Result<(), BackendError> {
		self.record(Op::Delete, Request::Delete(id.clone()))?;
		self.state.lock().unwrap().notes.retain(|n| &n.id != id);
		Ok(())
	}
}
