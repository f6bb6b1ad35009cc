use crate::types::note::{Note, NoteDraft};

impl Note {
	/// Current editable fields, as an edit session would snapshot them.
	pub fn draft(&self) -> NoteDraft {
		NoteDraft { title: self.title.clone(), content: self.content.clone(), color: self.color.clone() }
	}

	/// Overwrite the editable fields, leaving id and selection alone.
	pub fn apply(&mut self, draft: NoteDraft) {
		self.title = draft.title;
		self.content = draft.content;
		self.color = draft.color;
	}

	/// Copy of this note with the given fields, used to build a PUT body
	/// without touching the stored note.
	pub fn with_fields(&self, draft: NoteDraft) -> Note {
		let mut updated = self.clone();
		updated.apply(draft);
		updated
	}
}

impl NoteDraft {
	pub fn new(
		title: impl Into<String>,
		content: impl Into<String>,
		color: impl Into<String>,
	) -> Self {
		Self { title: title.into(), content: content.into(), color: color.into() }
	}
}
