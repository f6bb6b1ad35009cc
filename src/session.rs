//! The edit modal as an explicit value. A session is either closed or open
//! on exactly one note, and holds the field values being edited until they
//! are saved or thrown away.

use tracing::{debug, info, instrument, warn};

use crate::{backend::NoteBackend, error::NoteError, filter::NoteFilter, renderer::{self, Renderer}, types::{note::{NoteDraft, NoteId}, store::NoteStore}};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
	Opened,
	/// The session was already editing this note; nothing changed.
	AlreadyOpen,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EditSession {
	editing: Option<NoteId>,
	pending: NoteDraft,
}

impl EditSession {
	pub fn new() -> Self { Self::default() }

	pub fn is_open(&self) -> bool { self.editing.is_some() }

	pub fn editing_id(&self) -> Option<&NoteId> { self.editing.as_ref() }

	pub fn pending(&self) -> &NoteDraft { &self.pending }

	fn reset(&mut self) {
		self.editing = None;
		self.pending = NoteDraft::default();
	}

	/// Start editing `id` with a snapshot of its stored fields.
	///
	/// Reopening the note already being edited is ignored so rapid repeat
	/// clicks cannot overwrite edits in progress. Switching to another note
	/// drops the old snapshot first.
	#[instrument(skip(self, store))]
	pub fn open<B: NoteBackend>(&mut self, id: &NoteId, store: &NoteStore<B>) -> Result<OpenOutcome, NoteError> {
		if self.editing.as_ref() == Some(id) {
			debug!("Note {} is already open", id);
			return Ok(OpenOutcome::AlreadyOpen);
		}

		let snapshot = store.get(id).map(|note| note.draft()).ok_or_else(|| {
			warn!("Cannot edit note {}, it is not loaded", id);
			NoteError::NotFound
		})?;

		if let Some(previous) = &self.editing {
			debug!("Leaving note {} to edit {}", previous, id);
		}
		self.reset();

		self.editing = Some(id.clone());
		self.pending = snapshot;
		info!("Editing note {}", id);
		Ok(OpenOutcome::Opened)
	}

	fn pending_mut(&mut self) -> Result<&mut NoteDraft, NoteError> {
		if self.editing.is_none() {
			return Err(NoteError::SessionClosed);
		}
		Ok(&mut self.pending)
	}

	pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), NoteError> {
		self.pending_mut()?.title = title.into();
		Ok(())
	}

	pub fn set_content(&mut self, content: impl Into<String>) -> Result<(), NoteError> {
		self.pending_mut()?.content = content.into();
		Ok(())
	}

	/// Color swatch picked inside the modal.
	pub fn set_color(&mut self, color: impl Into<String>) -> Result<(), NoteError> {
		self.pending_mut()?.color = color.into();
		Ok(())
	}

	/// Throw the pending edits away and repaint everything.
	#[instrument(skip_all)]
	pub fn cancel<B, R>(&mut self, store: &mut NoteStore<B>, renderer: &mut R)
	where
		B: NoteBackend,
		R: Renderer + ?Sized,
	{
		if let Some(id) = &self.editing {
			debug!("Discarding edits to note {}", id);
		}
		store.clear_active();
		self.reset();
		renderer::redraw(renderer, store, &NoteFilter::All, self);
	}

	/// Send the pending fields to the store. On failure the session stays
	/// open with the user's edits intact.
	#[instrument(skip_all)]
	pub async fn save<B, R>(&mut self, store: &mut NoteStore<B>, renderer: &mut R) -> Result<(), NoteError>
	where
		B: NoteBackend,
		R: Renderer + ?Sized,
	{
		let id = self.editing.clone().ok_or(NoteError::SessionClosed)?;
		let NoteDraft { title, content, color } = self.pending.clone();

		store.update_by_id(&id, title, content, color).await?;

		info!("Saved note {}", id);
		store.clear_active();
		self.reset();
		renderer::redraw(renderer, store, &NoteFilter::All, self);
		Ok(())
	}
}
