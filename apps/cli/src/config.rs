//! Data directory resolution for the CLI

use anyhow::{anyhow, Result};
use std::path::PathBuf;

/// Overrides the platform data directory.
pub const DATA_DIR_ENV: &str = "DOCSHELF_DATA_DIR";

/// `$DOCSHELF_DATA_DIR`, or `docshelf` under the platform data directory.
pub fn default_data_dir() -> Result<PathBuf> {
	resolve_data_dir(std::env::var_os(DATA_DIR_ENV).map(PathBuf::from), dirs::data_dir())
}

fn resolve_data_dir(from_env: Option<PathBuf>, platform: Option<PathBuf>) -> Result<PathBuf> {
	from_env
		.filter(|dir| !dir.as_os_str().is_empty())
		.or_else(|| platform.map(|dir| dir.join("docshelf")))
		.ok_or_else(|| anyhow!("Could not determine a data directory, pass --data-dir"))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn env_wins_over_platform_dir() {
		let dir = resolve_data_dir(Some("/tmp/shelf".into()), Some("/home/a/.local/share".into()))
			.unwrap();
		assert_eq!(dir, PathBuf::from("/tmp/shelf"));
	}

	#[test]
	fn falls_back_to_platform_dir() {
		let dir = resolve_data_dir(Some(PathBuf::new()), Some("/home/a/.local/share".into()))
			.unwrap();
		assert_eq!(dir, PathBuf::from("/home/a/.local/share/docshelf"));

		assert!(resolve_data_dir(None, None).is_err());
	}
}
