use std::{collections::BTreeMap, path::Path, time::Duration};

use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::{error::ConfigError, types::store::SyncPolicy};

pub const DEFAULT_NOTE_TITLE: &str = "New note";
pub const DEFAULT_NOTE_COLOR: &str = "#F7EB96";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
	/// Collection endpoint, e.g. `https://cloud.example.org/index.php/apps/quicknotes/notes`
	pub base_url: String,

	#[serde(default = "default_title")]
	pub new_note_title: String,
	#[serde(default = "default_color")]
	pub default_color:  String,

	// No timeout unless asked for; a hung request then blocks its operation
	pub request_timeout_secs: Option<u64>,

	#[serde(default)]
	pub sync_policy: SyncPolicy,

	/// Sent with every request, e.g. `requesttoken` for the CSRF check.
	#[serde(default)]
	pub headers: BTreeMap<String, String>,
}

fn default_title() -> String { DEFAULT_NOTE_TITLE.to_string() }

fn default_color() -> String { DEFAULT_NOTE_COLOR.to_string() }

impl Config {
	#[instrument]
	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		if !path.exists() {
			return Err(ConfigError::NotFound(path.to_path_buf()));
		}

		debug!("Reading config from {:?}", path);
		let content = fs_err::read_to_string(path)?;
		let config = Self::parse(&content)?;

		info!("Loaded config for {}", config.base_url);
		Ok(config)
	}

	pub fn parse(content: &str) -> Result<Self, ConfigError> {
		let config: Config = toml::from_str(content)?;
		if config.base_url.trim().is_empty() {
			return Err(ConfigError::MissingBaseUrl);
		}
		Ok(config)
	}

	pub fn request_timeout(&self) -> Option<Duration> { self.request_timeout_secs.map(Duration::from_secs) }
}
