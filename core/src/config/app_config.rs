//! Client configuration

use ds_api::{auth::AuthToken, RequestConfig, ResourceRequest, DEFAULT_RETURN_LIMIT};

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{info, warn};

use super::ConfigError;

/// Name of the file holding the [`ClientConfig`] inside the data directory.
pub const CONFIG_FILE_NAME: &str = "docshelf.json";

/// Overrides [`ClientConfig::api_url`] without touching the file on disk.
pub const API_URL_ENV: &str = "DOCSHELF_API_URL";

const CURRENT_VERSION: u32 = 1;

fn default_api_url() -> String {
	"http://localhost:8080".to_string()
}

fn default_return_limit() -> u64 {
	DEFAULT_RETURN_LIMIT
}

fn default_with_data() -> bool {
	true
}

fn default_log_level() -> String {
	"info".to_string()
}

/// Settings shared by every session against one backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
	/// Config schema version
	#[serde(default)]
	pub version: u32,

	/// Base URL of the backend, without the `/api` suffix
	#[serde(default = "default_api_url")]
	pub api_url: String,

	/// User the client acts as, used for edit markers and permission scoped searches
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub user_id: Option<String>,

	/// Token obtained from `/api/auth/login`
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub auth_token: Option<AuthToken>,

	/// Upper bound on resources returned by a search or tree load
	#[serde(default = "default_return_limit")]
	pub return_limit: u64,

	/// Whether loads include document contents
	#[serde(default = "default_with_data")]
	pub with_data: bool,

	/// Logging level
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			version: CURRENT_VERSION,
			api_url: default_api_url(),
			user_id: None,
			auth_token: None,
			return_limit: default_return_limit(),
			with_data: default_with_data(),
			log_level: default_log_level(),
		}
	}
}

impl ClientConfig {
	pub fn path(data_dir: impl AsRef<Path>) -> PathBuf {
		data_dir.as_ref().join(CONFIG_FILE_NAME)
	}

	/// Loads the config from `data_dir` and applies the environment overrides.
	pub async fn load(data_dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let mut config = Self::load_stored(data_dir).await?;
		config.apply_overrides(std::env::var(API_URL_ENV).ok());

		Ok(config)
	}

	/// The config exactly as stored, writing the defaults when no file exists yet.
	pub async fn load_stored(data_dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let config_path = Self::path(&data_dir);

		let config = match fs::read(&config_path).await {
			Ok(bytes) => {
				info!(path = %config_path.display(), "Loading config;");
				let mut config = serde_json::from_slice::<Self>(&bytes)?;

				if config.version < CURRENT_VERSION {
					info!(
						from = config.version,
						to = CURRENT_VERSION,
						"Migrating config;"
					);
					config.migrate()?;
					config.save(&data_dir).await?;
				}

				config
			}
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
				warn!(path = %config_path.display(), "No config found, creating default;");
				let config = Self::default();
				config.save(&data_dir).await?;
				config
			}
			Err(e) => return Err(ConfigError::io(config_path, e)),
		};

		Ok(config)
	}

	pub async fn save(&self, data_dir: impl AsRef<Path>) -> Result<(), ConfigError> {
		let data_dir = data_dir.as_ref();
		fs::create_dir_all(data_dir)
			.await
			.map_err(|e| ConfigError::io(data_dir, e))?;

		let config_path = Self::path(data_dir);
		fs::write(&config_path, serde_json::to_vec_pretty(self)?)
			.await
			.map_err(|e| ConfigError::io(&config_path, e))?;

		info!(path = %config_path.display(), "Saved config;");
		Ok(())
	}

	fn migrate(&mut self) -> Result<(), ConfigError> {
		match self.version {
			// v0 files predate the version field; every other field has a default.
			0 => {
				self.version = 1;
				Ok(())
			}
			CURRENT_VERSION => Ok(()),
			v => Err(ConfigError::UnknownVersion(v)),
		}
	}

	pub fn apply_overrides(&mut self, api_url: Option<String>) {
		if let Some(api_url) = api_url.filter(|url| !url.trim().is_empty()) {
			info!(%api_url, "Using API url from environment;");
			self.api_url = api_url;
		}
	}

	pub fn request_config(&self) -> RequestConfig {
		let config = RequestConfig::new(&self.api_url);
		match &self.auth_token {
			Some(token) => config.with_token(token.clone()),
			None => config,
		}
	}

	/// Filter every load starts from: nothing excluded, limits taken from the config.
	pub fn base_request(&self) -> ResourceRequest {
		ResourceRequest {
			user_id: self.user_id.clone(),
			with_data: self.with_data,
			return_limit: self.return_limit,
			..Default::default()
		}
	}
}
