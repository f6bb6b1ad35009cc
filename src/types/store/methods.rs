use tracing::{debug, error, info, instrument, warn};

use crate::{backend::NoteBackend, error::NoteError, types::{note::{ColorEntry, Note, NoteDraft, NoteId}, store::{NoteStore, SyncPolicy}}};

impl<B: NoteBackend> NoteStore<B> {
	pub fn new(backend: B, policy: SyncPolicy) -> Self {
		info!("Creating note store ({:?})", policy);
		Self { backend, notes: Vec::new(), policy }
	}

	pub fn backend(&self) -> &B { &self.backend }

	pub fn policy(&self) -> SyncPolicy { self.policy }

	/// Replace the local collection with the server's, newest first.
	#[instrument(skip(self))]
	pub async fn load_all(&mut self) -> Result<(), NoteError> {
		let mut notes = self.backend.list().await.map_err(|e| {
			error!("Loading notes failed: {}", e);
			NoteError::LoadFailed(e)
		})?;

		notes.reverse();
		for note in &mut notes {
			note.active = false;
		}

		info!("Loaded {} notes", notes.len());
		self.notes = notes;
		Ok(())
	}

	/// Mark the first note with `id` active and every other note inactive.
	/// Returns whether a note matched; with no match nothing is active.
	#[instrument(skip(self))]
	pub fn set_active_by_id(&mut self, id: &NoteId) -> bool {
		let mut found = false;
		for note in &mut self.notes {
			note.active = !found && &note.id == id;
			found |= note.active;
		}

		if !found {
			debug!("No note with id {} to activate", id);
		}
		found
	}

	pub fn active(&self) -> Option<&Note> { self.notes.iter().find(|note| note.active) }

	pub fn clear_active(&mut self) {
		for note in &mut self.notes {
			note.active = false;
		}
	}

	pub fn get(&self, id: &NoteId) -> Option<&Note> { self.notes.iter().find(|note| &note.id == id) }

	pub fn all(&self) -> &[Note] { &self.notes }

	/// Distinct colors in first-seen order.
	pub fn colors(&self) -> Vec<ColorEntry> {
		let mut colors: Vec<ColorEntry> = Vec::new();
		for note in &self.notes {
			if !colors.iter().any(|entry| entry.color == note.color) {
				colors.push(ColorEntry { color: note.color.clone() });
			}
		}
		colors
	}

	fn active_index(&self) -> Option<usize> { self.notes.iter().position(|note| note.active) }

	/// Delete the active note locally and on the server. Fails with
	/// `NotFound` before any request when nothing is active.
	#[instrument(skip(self))]
	pub async fn remove_active(&mut self) -> Result<Note, NoteError> {
		let Some(index) = self.active_index() else {
			warn!("Delete requested without an active note");
			return Err(NoteError::NotFound);
		};
		let id = self.notes[index].id.clone();

		match self.policy {
			SyncPolicy::Optimistic => {
				let mut removed = self.notes.remove(index);
				removed.active = false;

				self.backend.delete(&id).await.map_err(|e| {
					// The note is already gone locally and stays gone
					error!("Deleting note {} failed after local removal: {}", id, e);
					NoteError::DeleteFailed(id.clone(), e)
				})?;

				info!("Deleted note {}", id);
				Ok(removed)
			}
			SyncPolicy::Confirmed => {
				self.backend.delete(&id).await.map_err(|e| {
					error!("Deleting note {} failed, keeping it: {}", id, e);
					NoteError::DeleteFailed(id.clone(), e)
				})?;

				let mut removed = self.notes.remove(index);
				removed.active = false;
				info!("Deleted note {}", id);
				Ok(removed)
			}
		}
	}

	/// Send a draft to the server and append the created note as the active
	/// one.
	#[instrument(skip(self, draft), fields(title = %draft.title))]
	pub async fn create(&mut self, draft: NoteDraft) -> Result<&Note, NoteError> {
		let mut created = self.backend.create(&draft).await.map_err(|e| {
			error!("Creating note failed: {}", e);
			NoteError::CreateFailed(e)
		})?;

		info!("Created note {}", created.id);
		self.clear_active();
		created.active = true;
		self.notes.push(created);

		Ok(&self.notes[self.notes.len() - 1])
	}

	#[instrument(skip_all)]
	pub async fn update_active(
		&mut self,
		title: impl Into<String>,
		content: impl Into<String>,
		color: impl Into<String>,
	) -> Result<(), NoteError> {
		let Some(index) = self.active_index() else {
			warn!("Update requested without an active note");
			return Err(NoteError::NotFound);
		};
		let draft = NoteDraft::new(title, content, color);

		let sent = match self.policy {
			SyncPolicy::Optimistic => {
				self.notes[index].apply(draft);
				self.notes[index].clone()
			}
			SyncPolicy::Confirmed => self.notes[index].with_fields(draft),
		};

		let stored = self.backend.update(&sent).await.map_err(|e| {
			error!("Updating note {} failed: {}", sent.id, e);
			NoteError::UpdateFailed(sent.id.clone(), e)
		})?;

		// Whatever the server echoes back wins over what was sent
		let confirmed = match stored {
			Some(stored) if stored.id == sent.id => stored.draft(),
			_ => sent.draft(),
		};
		self.notes[index].apply(confirmed);

		debug!("Updated note {}", sent.id);
		Ok(())
	}

	pub async fn update_by_id(
		&mut self,
		id: &NoteId,
		title: impl Into<String>,
		content: impl Into<String>,
		color: impl Into<String>,
	) -> Result<(), NoteError> {
		self.set_active_by_id(id);
		self.update_active(title, content, color).await
	}
}
