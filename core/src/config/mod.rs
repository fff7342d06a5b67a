//! Client configuration management

use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod app_config;

pub use app_config::{ClientConfig, API_URL_ENV, CONFIG_FILE_NAME};

#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("failed to access config file <path='{}'>: {source}", .path.display())]
	Io {
		path: PathBuf,
		source: std::io::Error,
	},
	#[error(transparent)]
	SerdeJson(#[from] serde_json::Error),
	#[error("unknown config version: {0}")]
	UnknownVersion(u32),
}

impl ConfigError {
	pub(crate) fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
		Self::Io {
			path: path.as_ref().to_path_buf(),
			source,
		}
	}
}
