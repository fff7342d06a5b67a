//! Local mirror of the backend's resource tree.

use crate::{backend::ResourceBackend, Error};

use ds_api::{Resource, ResourceRequest};

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

mod snapshot;

pub use snapshot::{normalize_path, ResourceKey, Resources, TreeSnapshot};

/// Owns the last loaded [`TreeSnapshot`].
///
/// Snapshots are never patched: a reload publishes a brand new one, or leaves
/// the current one alone when the backend call fails. Subscribers are woken
/// on every replacement.
pub struct TreeStore {
	backend: Arc<dyn ResourceBackend>,
	snapshot_tx: watch::Sender<Arc<TreeSnapshot>>,
}

impl TreeStore {
	pub fn new(backend: Arc<dyn ResourceBackend>) -> Self {
		let (snapshot_tx, _snapshot_rx) = watch::channel(Arc::new(TreeSnapshot::default()));

		Self {
			backend,
			snapshot_tx,
		}
	}

	pub async fn reload(&self, request: &ResourceRequest) -> Result<Arc<TreeSnapshot>, Error> {
		let repos = self.backend.file_tree(request).await.map_err(|e| {
			warn!(?e, "Failed to reload file tree, keeping previous snapshot;");
			e
		})?;

		let snapshot = Arc::new(TreeSnapshot::new(repos));
		debug!(
			repositories = snapshot.repositories().count(),
			resources = snapshot.len(),
			"Publishing new file tree snapshot;"
		);
		self.snapshot_tx.send_replace(Arc::clone(&snapshot));

		Ok(snapshot)
	}

	pub fn snapshot(&self) -> Arc<TreeSnapshot> {
		Arc::clone(&self.snapshot_tx.borrow())
	}

	pub fn find(&self, key: &ResourceKey) -> Option<Resource> {
		self.snapshot_tx.borrow().find(key).cloned()
	}

	pub fn subscribe(&self) -> watch::Receiver<Arc<TreeSnapshot>> {
		self.snapshot_tx.subscribe()
	}

	/// Drops the loaded tree, e.g. on logout.
	pub fn clear(&self) {
		self.snapshot_tx
			.send_replace(Arc::new(TreeSnapshot::default()));
	}
}
