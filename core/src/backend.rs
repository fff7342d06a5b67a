use crate::tree::ResourceKey;

use ds_api::{
	auth::AuthToken, ContentGroup, MoveRequest, NewResource, RequestConfig, Resource, ResourceRequest,
	ResourceUpdateRequest,
};

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

/// Everything the core needs from the document backend.
///
/// [`HttpBackend`] talks to the real REST API; tests plug in an in-memory
/// implementation.
#[async_trait]
pub trait ResourceBackend: Send + Sync {
	async fn search(
		&self,
		request: &ResourceRequest,
	) -> Result<BTreeMap<String, Vec<Resource>>, ds_api::Error>;

	async fn file_tree(
		&self,
		request: &ResourceRequest,
	) -> Result<BTreeMap<String, ContentGroup>, ds_api::Error>;

	async fn update(&self, request: &ResourceUpdateRequest) -> Result<(), ds_api::Error>;

	async fn add(&self, resource: &NewResource) -> Result<(), ds_api::Error>;

	async fn remove(&self, key: &ResourceKey) -> Result<(), ds_api::Error>;

	async fn move_resource(&self, request: &MoveRequest) -> Result<(), ds_api::Error>;

	/// The user currently holding the edit marker on `key`, if any.
	async fn editing_user(&self, key: &ResourceKey) -> Result<Option<String>, ds_api::Error>;

	async fn set_editing(&self, key: &ResourceKey, user_id: &str) -> Result<(), ds_api::Error>;

	async fn remove_editing(&self, key: &ResourceKey, user_id: &str)
		-> Result<(), ds_api::Error>;

	/// Exchanges credentials for a bearer token. Does not install it.
	async fn login(&self, user_id: &str, password: &str) -> Result<AuthToken, ds_api::Error>;

	/// Token sent with every following call, `None` to drop it.
	async fn set_token(&self, token: Option<AuthToken>);
}

#[derive(Debug)]
pub struct HttpBackend {
	config: RwLock<RequestConfig>,
}

impl HttpBackend {
	pub fn new(config: RequestConfig) -> Self {
		Self {
			config: RwLock::new(config),
		}
	}

	async fn config(&self) -> RequestConfig {
		self.config.read().await.clone()
	}
}

#[async_trait]
impl ResourceBackend for HttpBackend {
	async fn search(
		&self,
		request: &ResourceRequest,
	) -> Result<BTreeMap<String, Vec<Resource>>, ds_api::Error> {
		ds_api::resource::get(&self.config().await, request).await
	}

	async fn file_tree(
		&self,
		request: &ResourceRequest,
	) -> Result<BTreeMap<String, ContentGroup>, ds_api::Error> {
		ds_api::resource::filetree(&self.config().await, request).await
	}

	async fn update(&self, request: &ResourceUpdateRequest) -> Result<(), ds_api::Error> {
		ds_api::resource::update(&self.config().await, request).await
	}

	async fn add(&self, resource: &NewResource) -> Result<(), ds_api::Error> {
		ds_api::resource::add(&self.config().await, resource).await
	}

	async fn remove(&self, key: &ResourceKey) -> Result<(), ds_api::Error> {
		ds_api::resource::remove(&self.config().await, &key.repo_id, &key.path).await
	}

	async fn move_resource(&self, request: &MoveRequest) -> Result<(), ds_api::Error> {
		ds_api::resource::move_resource(&self.config().await, request).await
	}

	async fn editing_user(&self, key: &ResourceKey) -> Result<Option<String>, ds_api::Error> {
		ds_api::editing::get(&self.config().await, &key.repo_id, &key.path).await
	}

	async fn set_editing(&self, key: &ResourceKey, user_id: &str) -> Result<(), ds_api::Error> {
		ds_api::editing::set(&self.config().await, &key.repo_id, &key.path, user_id).await
	}

	async fn remove_editing(
		&self,
		key: &ResourceKey,
		user_id: &str,
	) -> Result<(), ds_api::Error> {
		ds_api::editing::remove(&self.config().await, &key.repo_id, &key.path, user_id).await
	}

	async fn login(&self, user_id: &str, password: &str) -> Result<AuthToken, ds_api::Error> {
		ds_api::auth::login(&self.config().await, user_id, password).await
	}

	async fn set_token(&self, token: Option<AuthToken>) {
		self.config.write().await.auth_token = token;
	}
}
