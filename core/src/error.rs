use crate::{config::ConfigError, tree::ResourceKey};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
	#[error("'{key}' is currently being edited by '{holder}'")]
	Conflict { key: ResourceKey, holder: String },
	#[error("resource not found: {0}")]
	NotFound(ResourceKey),
	#[error("no resource is open for editing")]
	NoOpenResource,
	#[error("resource '{0}' is read only")]
	ReadOnly(ResourceKey),
	#[error("no user id configured; log in or set `user_id` first")]
	NoUser,
	#[error("'{0}' has unsaved changes")]
	UnsavedChanges(ResourceKey),

	#[error(transparent)]
	Api(#[from] ds_api::Error),
	#[error(transparent)]
	Config(#[from] ConfigError),
}

impl Error {
	/// Whether the failure blocks the action (as opposed to a transient notification).
	pub fn is_conflict(&self) -> bool {
		match self {
			Self::Conflict { .. } => true,
			Self::Api(e) => e.is_conflict(),
			_ => false,
		}
	}

	pub fn is_not_found(&self) -> bool {
		match self {
			Self::NotFound(_) => true,
			Self::Api(e) => e.is_not_found(),
			_ => false,
		}
	}
}
