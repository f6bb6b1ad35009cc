use std::{io::{self, BufRead}, path::PathBuf};

use eyre::WrapErr;
use quicknotes::{backend::HttpBackend, config::Config, controller::{Controller, UiEvent}, logging, terminal::{Command, HELP, TerminalRenderer, parse_command}, types::{note::NoteDraft, store::NoteStore}};
use tracing::{info, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	logging::init("info");

	let config_path =
		std::env::args_os().nth(1).map(PathBuf::from).unwrap_or_else(|| PathBuf::from("quicknotes.toml"));
	let config = Config::load(&config_path)
		.wrap_err_with(|| format!("Failed to load config from {}", config_path.display()))?;

	let backend = HttpBackend::new(&config.base_url, config.request_timeout(), &config.headers);
	let store = NoteStore::new(backend, config.sync_policy);
	let new_note = NoteDraft::new(config.new_note_title.clone(), "", config.default_color.clone());
	let mut controller = Controller::new(store, TerminalRenderer::new(io::stdout()), new_note);

	controller.handle(UiEvent::Reload).await;

	for line in io::stdin().lock().lines() {
		let line = line.wrap_err("Failed to read from stdin")?;
		match parse_command(&line) {
			Some(Command::Event(event)) => controller.handle(event).await,
			Some(Command::Help) => println!("{}", HELP),
			Some(Command::Quit) => break,
			None if line.trim().is_empty() => {}
			None => {
				warn!("Unknown command: {}", line.trim());
				println!("{}", HELP);
			}
		}
	}

	info!("Bye");
	Ok(())
}
