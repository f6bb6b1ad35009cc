use std::io::{self, Write};

use tracing::warn;

use crate::{controller::UiEvent, renderer::Renderer, session::EditSession, types::note::{ColorEntry, Note, NoteId}};

/// Plain-text renderer for the command line front end.
pub struct TerminalRenderer<W> {
	out: W,
}

impl<W: Write> TerminalRenderer<W> {
	pub fn new(out: W) -> Self { Self { out } }

	pub fn into_inner(self) -> W { self.out }

	fn emit(&mut self, lines: &[String]) {
		let result: io::Result<()> = lines.iter().try_for_each(|line| writeln!(self.out, "{}", line));
		if let Err(e) = result.and_then(|_| self.out.flush()) {
			warn!("Could not write to terminal: {}", e);
		}
	}
}

/// First line of the content, without markup, for a one-line preview.
fn preview(content: &str) -> String {
	let mut text = String::with_capacity(content.len());
	let mut in_tag = false;
	let mut chars = content.chars().peekable();
	while let Some(c) = chars.next() {
		match c {
			// Only `<tag`, `</tag` and `<!--` open markup; a bare `<` is text
			'<' if !in_tag && chars.peek().is_some_and(|n| n.is_ascii_alphabetic() || *n == '/' || *n == '!') => {
				in_tag = true
			}
			'>' if in_tag => in_tag = false,
			_ if !in_tag => text.push(c),
			_ => {}
		}
	}
	text.lines().find(|line| !line.trim().is_empty()).unwrap_or("").trim().to_string()
}

fn tile(note: &Note) -> String {
	let marker = if note.active { '*' } else { ' ' };
	format!("{} [{}] {} ({}) {}", marker, note.id, note.title, note.color, preview(&note.content))
		.trim_end()
		.to_string()
}

impl<W: Write> Renderer for TerminalRenderer<W> {
	fn render_navigation(&mut self, colors: &[ColorEntry], notes: &[Note]) {
		let swatches = colors.iter().map(|c| c.color.as_str()).collect::<Vec<_>>().join(" ");
		let mut lines = vec![format!("colors: {}", swatches)];
		lines.extend(notes.iter().map(|note| format!("  - [{}] {}", note.id, note.title)));
		self.emit(&lines);
	}

	fn render_content(&mut self, notes: &[&Note]) {
		let mut lines = vec![format!("notes ({}):", notes.len())];
		lines.extend(notes.iter().map(|note| tile(note)));
		self.emit(&lines);
	}

	fn render_editor(&mut self, session: &EditSession) {
		let Some(id) = session.editing_id() else {
			return;
		};
		let pending = session.pending();
		self.emit(&[
			format!("editing [{}] ({})", id, pending.color),
			format!("  title:   {}", pending.title),
			format!("  content: {}", pending.content),
		]);
	}

	fn alert(&mut self, message: &str) { self.emit(&[format!("!! {}", message)]) }
}

pub const HELP: &str = "\
commands:
  reload              fetch all notes again
  new                 create a note
  open <id>           edit a note
  find <id>           show only that note and edit it
  title <text>        change the title being edited
  content <text>      change the content being edited
  color <css color>   change the color being edited
  save | cancel       finish editing
  delete [<id>]       delete a note, or the selected one
  filter <color>      show notes of one color (transparent = all)
  all                 show every note
  help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
	Event(UiEvent),
	Help,
	Quit,
}

/// Parse one input line. Unknown input yields `None`.
pub fn parse_command(line: &str) -> Option<Command> {
	let line = line.trim();
	let (word, rest) = match line.split_once(char::is_whitespace) {
		Some((word, rest)) => (word, rest.trim()),
		None => (line, ""),
	};
	let id = || (!rest.is_empty()).then(|| NoteId::from(rest));

	let event = match word {
		"" => return None,
		"help" | "?" => return Some(Command::Help),
		"quit" | "exit" => return Some(Command::Quit),
		"reload" => UiEvent::Reload,
		"new" => UiEvent::NewNote,
		"open" => UiEvent::TileClicked(id()?),
		"find" => UiEvent::NavigationNoteClicked(id()?),
		"title" => UiEvent::TitleEdited(rest.to_string()),
		"content" => UiEvent::ContentEdited(rest.to_string()),
		"color" if !rest.is_empty() => UiEvent::SwatchPicked(rest.to_string()),
		"save" => UiEvent::Save,
		"cancel" => UiEvent::Cancel,
		"esc" => UiEvent::Escape,
		"delete" => match id() {
			Some(id) => UiEvent::DeleteClicked(id),
			None => UiEvent::DeleteActive,
		},
		"filter" if !rest.is_empty() => UiEvent::ColorFilterPicked(rest.to_string()),
		"all" => UiEvent::ShowAll,
		_ => return None,
	};
	Some(Command::Event(event))
}
