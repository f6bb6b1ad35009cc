use crate::{backend::NoteBackend, filter::{NoteFilter, visible_notes}, session::EditSession, types::{note::{ColorEntry, Note}, store::NoteStore}};

/// Presentation side of the widget. Implementations draw whatever they are
/// given and report user gestures back through the controller.
pub trait Renderer {
	/// Sidebar: the color swatches and the full note list.
	fn render_navigation(&mut self, colors: &[ColorEntry], notes: &[Note]);

	/// Grid: only the notes that pass the current filter.
	fn render_content(&mut self, notes: &[&Note]);

	/// Edit modal, shown when the session is open and hidden otherwise.
	fn render_editor(&mut self, session: &EditSession);

	/// Blocking, user-visible failure notice.
	fn alert(&mut self, message: &str);
}

/// Full repaint of navigation, grid and editor.
pub fn redraw<B, R>(renderer: &mut R, store: &NoteStore<B>, filter: &NoteFilter, session: &EditSession)
where
	B: NoteBackend,
	R: Renderer + ?Sized,
{
	renderer.render_navigation(&store.colors(), store.all());
	renderer.render_content(&visible_notes(store.all(), filter));
	renderer.render_editor(session);
}
