use anyhow::{anyhow, Result};
use ds_core::{api::RequestConfig, tree::ResourceKey, Docshelf};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
	Human,
	Json,
}

pub struct Context {
	pub shelf: Docshelf,
	pub format: OutputFormat,
	pub data_dir: PathBuf,
}

impl Context {
	pub fn new(shelf: Docshelf, format: OutputFormat, data_dir: PathBuf) -> Self {
		Self {
			shelf,
			format,
			data_dir,
		}
	}

	pub fn request_config(&self) -> RequestConfig {
		self.shelf.config().request_config()
	}

	/// The logged in user, required by every call that writes.
	pub fn user_id(&self) -> Result<&str> {
		self.shelf
			.config()
			.user_id
			.as_deref()
			.ok_or_else(|| anyhow!("Not logged in, run `docshelf auth login <user>` first"))
	}

	pub fn key(&self, repo_id: &str, path: &str) -> ResourceKey {
		ResourceKey::new(repo_id, path)
	}
}
