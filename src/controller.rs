use tracing::{debug, error, instrument, warn};

use crate::{backend::NoteBackend, error::NoteError, filter::NoteFilter, renderer::{self, Renderer}, session::EditSession, types::{note::{NoteDraft, NoteId}, store::NoteStore}};

/// A user gesture, already lifted out of whatever produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
	Reload,
	NewNote,
	/// Click on a tile in the grid.
	TileClicked(NoteId),
	/// Click on an entry in the sidebar list.
	NavigationNoteClicked(NoteId),
	/// Delete icon on a tile.
	DeleteClicked(NoteId),
	/// Delete entry in the sidebar menu, applies to the current selection.
	DeleteActive,
	TitleEdited(String),
	ContentEdited(String),
	/// Swatch inside the edit modal.
	SwatchPicked(String),
	Save,
	Cancel,
	Escape,
	/// Swatch in the sidebar.
	ColorFilterPicked(String),
	ShowAll,
}

/// Owns the store, the edit session and the grid filter, and turns gestures
/// into operations followed by a repaint.
pub struct Controller<B, R> {
	store:    NoteStore<B>,
	session:  EditSession,
	filter:   NoteFilter,
	renderer: R,
	new_note: NoteDraft,
}

impl<B: NoteBackend, R: Renderer> Controller<B, R> {
	pub fn new(store: NoteStore<B>, renderer: R, new_note: NoteDraft) -> Self {
		Self { store, session: EditSession::new(), filter: NoteFilter::All, renderer, new_note }
	}

	pub fn store(&self) -> &NoteStore<B> { &self.store }

	pub fn session(&self) -> &EditSession { &self.session }

	pub fn filter(&self) -> &NoteFilter { &self.filter }

	pub fn renderer(&self) -> &R { &self.renderer }

	pub fn render(&mut self) {
		renderer::redraw(&mut self.renderer, &self.store, &self.filter, &self.session);
	}

	fn alert(&mut self, message: &str, cause: &NoteError) {
		error!("{}: {}", message, cause);
		self.renderer.alert(message);
	}

	#[instrument(skip(self))]
	pub async fn handle(&mut self, event: UiEvent) {
		match event {
			UiEvent::Reload => match self.store.load_all().await {
				Ok(()) => {
					self.session = EditSession::new();
					self.render();
				}
				Err(e) => self.alert("Could not load notes", &e),
			},

			UiEvent::NewNote => match self.store.create(self.new_note.clone()).await {
				Ok(_) => self.render(),
				Err(e) => self.alert("Could not create note", &e),
			},

			UiEvent::TileClicked(id) => self.open(&id),

			UiEvent::NavigationNoteClicked(id) => {
				self.filter = NoteFilter::Note(id.clone());
				self.render();
				self.open(&id);
			}

			UiEvent::DeleteClicked(id) => {
				self.store.set_active_by_id(&id);
				self.delete_active().await;
			}

			UiEvent::DeleteActive => self.delete_active().await,

			UiEvent::TitleEdited(title) => self.edit(|session| session.set_title(title)),
			UiEvent::ContentEdited(content) => self.edit(|session| session.set_content(content)),
			UiEvent::SwatchPicked(color) => self.edit(|session| session.set_color(color)),

			UiEvent::Save => {
				match self.session.save(&mut self.store, &mut self.renderer).await {
					Ok(()) => self.filter = NoteFilter::All,
					Err(NoteError::SessionClosed) => debug!("Save with no open note"),
					Err(e) => self.alert("Could not update note", &e),
				}
			}

			UiEvent::Cancel | UiEvent::Escape => {
				self.filter = NoteFilter::All;
				self.session.cancel(&mut self.store, &mut self.renderer);
			}

			UiEvent::ColorFilterPicked(color) => {
				self.filter = NoteFilter::from_swatch(&color);
				self.render();
			}

			UiEvent::ShowAll => {
				self.store.clear_active();
				self.filter = NoteFilter::All;
				self.render();
			}
		}
	}

	fn open(&mut self, id: &NoteId) {
		match self.session.open(id, &self.store) {
			Ok(_) => self.renderer.render_editor(&self.session),
			Err(e) => warn!("Could not open note {}: {}", id, e),
		}
	}

	fn edit<F>(&mut self, change: F)
	where
		F: FnOnce(&mut EditSession) -> Result<(), NoteError>,
	{
		match change(&mut self.session) {
			Ok(()) => self.renderer.render_editor(&self.session),
			Err(e) => debug!("Ignoring edit: {}", e),
		}
	}

	async fn delete_active(&mut self) {
		let target = self.store.active().map(|note| note.id.clone());
		let result = self.store.remove_active().await;

		// Drop the editor only once its note is gone from the list; a kept
		// note keeps its unsaved edits
		if let Some(id) = &target {
			if self.session.editing_id() == Some(id) && self.store.get(id).is_none() {
				self.session = EditSession::new();
			}
		}

		match result {
			Ok(_) => self.render(),
			Err(e) => {
				self.alert("Could not delete note, not found", &e);
				// Whatever the store kept is what the user should see
				self.render();
			}
		}
	}
}
