//! Editing a single document: edit markers, dirty tracking and saving.

use crate::{backend::ResourceBackend, tree::ResourceKey, Error};

use ds_api::{Resource, ResourceRequest, ResourceUpdateRequest};

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

mod tracker;

pub use tracker::{DirtyState, DirtyTracker};

/// Answer to "save your changes?" before leaving a dirty document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
	Save,
	Discard,
	Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Navigation {
	Proceed,
	Stay,
}

/// Tag and category changes applied through `/api/resource/update`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataChange {
	pub tags_to_add: Vec<String>,
	pub tags_to_remove: Vec<String>,
	pub tags_to_set: Vec<String>,
	pub category: Option<String>,
}

struct OpenResource {
	key: ResourceKey,
	resource: Resource,
	tracker: DirtyTracker,
}

/// Holds at most one open document on behalf of `user_id`.
///
/// Opening takes the backend's edit marker and closing releases it. The
/// marker is advisory: nothing stops another client that skips the check.
pub struct EditSession {
	backend: Arc<dyn ResourceBackend>,
	user_id: String,
	open: Option<OpenResource>,
}

impl EditSession {
	pub fn new(backend: Arc<dyn ResourceBackend>, user_id: impl Into<String>) -> Self {
		Self {
			backend,
			user_id: user_id.into(),
			open: None,
		}
	}

	pub fn user_id(&self) -> &str {
		&self.user_id
	}

	/// Enters edit mode on `key`, closing the currently open document first.
	///
	/// Fails with [`Error::Conflict`] when another user holds the edit marker
	/// and with [`Error::UnsavedChanges`] when the open document is dirty.
	pub async fn open(&mut self, key: ResourceKey) -> Result<&Resource, Error> {
		if self.key() != Some(&key) {
			self.close().await?;

			if let Some(holder) = self.backend.editing_user(&key).await? {
				if holder != self.user_id {
					info!(%key, %holder, "Resource is being edited by someone else;");
					return Err(Error::Conflict { key, holder });
				}
			}

			let resource = self.fetch(&key).await?;
			if !resource.is_editable {
				return Err(Error::ReadOnly(key));
			}

			self.backend.set_editing(&key, &self.user_id).await?;
			debug!(%key, user_id = %self.user_id, "Entered edit mode;");

			let tracker = DirtyTracker::new(resource.data.clone().unwrap_or_default());
			self.open = Some(OpenResource {
				key,
				resource,
				tracker,
			});
		}

		self.current().ok_or(Error::NoOpenResource)
	}

	async fn fetch(&self, key: &ResourceKey) -> Result<Resource, Error> {
		let request = ResourceRequest {
			repo_id: Some(key.repo_id.clone()),
			path: Some(key.path.clone()),
			user_id: Some(self.user_id.clone()),
			with_data: true,
			..Default::default()
		};

		self.backend
			.search(&request)
			.await?
			.into_values()
			.flatten()
			.find(|resource| key.matches(resource))
			.ok_or_else(|| Error::NotFound(key.clone()))
	}

	pub fn key(&self) -> Option<&ResourceKey> {
		self.open.as_ref().map(|open| &open.key)
	}

	pub fn current(&self) -> Option<&Resource> {
		self.open.as_ref().map(|open| &open.resource)
	}

	pub fn content(&self) -> Option<&str> {
		self.open.as_ref().map(|open| open.tracker.content())
	}

	pub fn state(&self) -> DirtyState {
		self.open
			.as_ref()
			.map_or(DirtyState::Clean, |open| open.tracker.state())
	}

	pub fn is_dirty(&self) -> bool {
		self.state() == DirtyState::Dirty
	}

	pub fn edit(&mut self, content: impl Into<String>) -> Result<DirtyState, Error> {
		let open = self.open.as_mut().ok_or(Error::NoOpenResource)?;
		open.tracker.edit(content);
		Ok(open.tracker.state())
	}

	pub fn discard(&mut self) -> Result<(), Error> {
		let open = self.open.as_mut().ok_or(Error::NoOpenResource)?;
		open.tracker.discard();
		Ok(())
	}

	/// Stores the edited content. The document stays dirty when the backend rejects it.
	pub async fn save(&mut self) -> Result<(), Error> {
		let open = self.open.as_mut().ok_or(Error::NoOpenResource)?;
		if !open.tracker.is_dirty() {
			debug!(key = %open.key, "Nothing to save;");
			return Ok(());
		}

		let content = open.tracker.content().to_string();
		let request = ResourceUpdateRequest {
			repo_id: open.key.repo_id.clone(),
			path: open.key.path.clone(),
			user_id: Some(self.user_id.clone()),
			data: Some(content.clone()),
			..Default::default()
		};

		if let Err(e) = self.backend.update(&request).await {
			warn!(key = %open.key, ?e, "Failed to save resource;");
			return Err(e.into());
		}

		info!(key = %open.key, bytes = content.len(), "Saved resource;");
		open.resource.data = Some(content.clone());
		open.resource.last_modified_by.clone_from(&self.user_id);
		open.tracker.mark_saved(content);

		Ok(())
	}

	pub async fn update_metadata(&mut self, change: MetadataChange) -> Result<(), Error> {
		let open = self.open.as_mut().ok_or(Error::NoOpenResource)?;

		let request = ResourceUpdateRequest {
			repo_id: open.key.repo_id.clone(),
			path: open.key.path.clone(),
			user_id: Some(self.user_id.clone()),
			tags_to_add: change.tags_to_add,
			tags_to_remove: change.tags_to_remove,
			tags_to_set: change.tags_to_set,
			category: change.category,
			..Default::default()
		};
		self.backend.update(&request).await?;
		debug!(key = %open.key, "Updated resource metadata;");

		apply_metadata(&mut open.resource, request);

		Ok(())
	}

	/// Resolves a pending navigation away from the open document.
	pub async fn confirm_discard_or_save(
		&mut self,
		decision: Decision,
	) -> Result<Navigation, Error> {
		if !self.is_dirty() {
			return Ok(Navigation::Proceed);
		}

		match decision {
			Decision::Save => {
				self.save().await?;
				Ok(Navigation::Proceed)
			}
			Decision::Discard => {
				self.discard()?;
				Ok(Navigation::Proceed)
			}
			Decision::Cancel => Ok(Navigation::Stay),
		}
	}

	/// [`confirm_discard_or_save`](Self::confirm_discard_or_save) followed by
	/// [`close`](Self::close) when navigation may proceed.
	pub async fn leave(&mut self, decision: Decision) -> Result<Navigation, Error> {
		let navigation = self.confirm_discard_or_save(decision).await?;
		if navigation == Navigation::Proceed {
			self.close().await?;
		}

		Ok(navigation)
	}

	/// Leaves edit mode and releases the edit marker.
	///
	/// Refuses while there are unsaved changes; the document is closed locally
	/// even when releasing the marker fails.
	pub async fn close(&mut self) -> Result<(), Error> {
		match &self.open {
			None => return Ok(()),
			Some(open) if open.tracker.is_dirty() => {
				return Err(Error::UnsavedChanges(open.key.clone()));
			}
			Some(_) => {}
		}

		let Some(open) = self.open.take() else {
			return Ok(());
		};

		self.backend
			.remove_editing(&open.key, &self.user_id)
			.await
			.map_err(|e| {
				warn!(key = %open.key, ?e, "Failed to release edit marker;");
				e
			})?;
		debug!(key = %open.key, "Left edit mode;");

		Ok(())
	}
}

/// Mirrors a confirmed metadata update onto the local copy: set, then add, then remove.
fn apply_metadata(resource: &mut Resource, request: ResourceUpdateRequest) {
	if !request.tags_to_set.is_empty() {
		resource.tags.clear();
	}
	for tag in request.tags_to_set.into_iter().chain(request.tags_to_add) {
		resource.tags.entry(tag.clone()).or_insert(tag);
	}
	for tag in &request.tags_to_remove {
		resource.tags.remove(tag);
	}

	if request.category.is_some() {
		resource.category = request.category;
	}
}
