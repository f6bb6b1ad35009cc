use std::path::PathBuf;

use thiserror::Error;

use crate::types::note::NoteId;

#[derive(Debug, Error)]
pub enum NoteError {
	#[error("Could not load notes")]
	LoadFailed(#[source] BackendError),

	#[error("Could not create note")]
	CreateFailed(#[source] BackendError),

	#[error("Could not update note {0}")]
	UpdateFailed(NoteId, #[source] BackendError),

	#[error("Could not delete note {0}")]
	DeleteFailed(NoteId, #[source] BackendError),

	#[error("Note not found")]
	NotFound,

	#[error("No note is open for editing")]
	SessionClosed,
}

/// Failures of the transport underneath the store, independent of which
/// operation was running.
#[derive(Debug, Error)]
pub enum BackendError {
	#[error("Request to '{url}' failed: {source}")]
	Http {
		url:    String,
		#[source]
		source: Box<ureq::Error>,
	},

	#[error("Server answered '{url}' with status {status}")]
	Status { url: String, status: u16 },

	#[error("Malformed response body: {0}")]
	Decode(#[from] serde_json::Error),

	#[error("Request worker stopped: {0}")]
	Join(#[from] tokio::task::JoinError),

	#[error("Server rejected the request: {0}")]
	Rejected(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("Config file '{0}' not found")]
	NotFound(PathBuf),

	#[error("Could not read config: {0}")]
	Io(#[from] std::io::Error),

	#[error("Invalid config: {0}")]
	Parse(#[from] toml::de::Error),

	#[error("Config is missing a base_url")]
	MissingBaseUrl,
}
