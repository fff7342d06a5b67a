#![warn(clippy::all, clippy::unwrap_used, clippy::expect_used)]

use crate::{
	backend::{HttpBackend, ResourceBackend},
	config::ClientConfig,
	editor::EditSession,
	search::SearchSession,
	tree::{ResourceKey, TreeSnapshot, TreeStore},
};

use ds_api::{auth::AuthToken, MoveRequest, NewResource};

use std::sync::Arc;

use tracing::{info, warn};

pub mod backend;
pub mod config;
pub mod editor;
pub mod error;
pub mod logging;
pub mod search;
pub mod tag;
pub mod tree;

pub use ds_api as api;
pub use error::Error;
pub use logging::init_logger;

/// Entry point of the client: one configured backend plus the loaded tree.
pub struct Docshelf {
	config: ClientConfig,
	backend: Arc<dyn ResourceBackend>,
	tree: TreeStore,
}

impl Docshelf {
	pub fn new(config: ClientConfig) -> Self {
		let backend = Arc::new(HttpBackend::new(config.request_config()));
		Self::with_backend(config, backend)
	}

	pub fn with_backend(config: ClientConfig, backend: Arc<dyn ResourceBackend>) -> Self {
		Self {
			tree: TreeStore::new(Arc::clone(&backend)),
			config,
			backend,
		}
	}

	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	pub fn tree(&self) -> &TreeStore {
		&self.tree
	}

	pub fn backend(&self) -> Arc<dyn ResourceBackend> {
		Arc::clone(&self.backend)
	}

	fn user_id(&self) -> Result<&str, Error> {
		self.config.user_id.as_deref().ok_or(Error::NoUser)
	}

	/// Reloads the whole tree with the configured user and limits.
	pub async fn reload(&self) -> Result<Arc<TreeSnapshot>, Error> {
		self.tree.reload(&self.config.base_request()).await
	}

	pub fn search_session(&self) -> SearchSession {
		SearchSession::new(Arc::clone(&self.backend), self.config.base_request())
	}

	pub fn edit_session(&self) -> Result<EditSession, Error> {
		Ok(EditSession::new(Arc::clone(&self.backend), self.user_id()?))
	}

	/// Exchanges credentials for a token and switches the backend to it.
	///
	/// The caller decides whether to persist the updated config.
	pub async fn login(&mut self, user_id: &str, password: &str) -> Result<AuthToken, Error> {
		let token = self.backend.login(user_id, password).await?;
		self.backend.set_token(Some(token.clone())).await;
		info!(%user_id, "Logged in;");

		self.config.user_id = Some(user_id.to_string());
		self.config.auth_token = Some(token.clone());

		Ok(token)
	}

	/// Forgets the credentials and publishes an empty tree.
	pub async fn logout(&mut self) {
		self.backend.set_token(None).await;
		self.config.user_id = None;
		self.config.auth_token = None;
		self.tree.clear();
		info!("Logged out;");
	}

	pub async fn add_resource(
		&self,
		key: &ResourceKey,
		content: impl Into<String>,
		category: Option<String>,
		tag_ids: Vec<String>,
	) -> Result<(), Error> {
		ds_api::resource::validate_document_path(&key.path)?;

		let resource = NewResource {
			repo_id: key.repo_id.clone(),
			path: key.path.clone(),
			created_by: self.user_id()?.to_string(),
			category,
			tag_ids,
			content: content.into(),
		};

		self.backend.add(&resource).await?;
		info!(%key, "Added resource;");
		self.reload_after_change().await;

		Ok(())
	}

	pub async fn remove_resource(&self, key: &ResourceKey) -> Result<(), Error> {
		self.backend.remove(key).await?;
		info!(%key, "Removed resource;");
		self.reload_after_change().await;

		Ok(())
	}

	pub async fn move_resource(&self, from: &ResourceKey, to: &ResourceKey) -> Result<(), Error> {
		let request = MoveRequest {
			user_id: self.user_id()?.to_string(),
			repo_from: from.repo_id.clone(),
			from: from.path.clone(),
			repo_to: to.repo_id.clone(),
			to: to.path.clone(),
		};

		self.backend.move_resource(&request).await?;
		info!(%from, %to, "Moved resource;");
		self.reload_after_change().await;

		Ok(())
	}

	/// The change itself went through, so a failed reload only leaves the old tree visible.
	async fn reload_after_change(&self) {
		if let Err(e) = self.reload().await {
			warn!(?e, "Tree reload after change failed;");
		}
	}
}
