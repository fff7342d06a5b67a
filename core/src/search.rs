use crate::{
	backend::ResourceBackend,
	tag::{TagSelection, TagState},
	tree::TreeSnapshot,
	Error,
};

use ds_api::{Resource, ResourceRequest};

use std::{
	collections::BTreeMap,
	sync::{
		atomic::{AtomicU64, Ordering},
		Arc,
	},
};

use tokio::sync::watch;
use tracing::{debug, warn};

/// One published result set, tagged with the dispatch that produced it.
#[derive(Debug, Clone, Default)]
pub struct SearchResults {
	pub generation: u64,
	pub resources: Arc<BTreeMap<String, Vec<Resource>>>,
}

impl SearchResults {
	pub fn len(&self) -> usize {
		self.resources.values().map(Vec::len).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.resources.values().all(Vec::is_empty)
	}

	pub fn iter(&self) -> impl Iterator<Item = &Resource> {
		self.resources.values().flatten()
	}

	/// Results arranged the same way as a file tree load.
	pub fn tree(&self) -> TreeSnapshot {
		TreeSnapshot::from_resources(self.iter().cloned())
	}
}

/// Filtered search over all repositories.
///
/// Results are replaced wholesale. Every dispatch takes a generation number
/// and a response is only published when nothing newer has been published
/// yet, so an early slow response never overwrites fresher results.
pub struct SearchSession {
	backend: Arc<dyn ResourceBackend>,
	base: ResourceRequest,
	tags: TagSelection,
	search_term: Option<String>,
	repo_id: Option<String>,
	path: Option<String>,
	next_generation: AtomicU64,
	results_tx: watch::Sender<SearchResults>,
}

impl SearchSession {
	/// `base` carries the user, `withData` and `returnLimit`; its tag lists are ignored.
	pub fn new(backend: Arc<dyn ResourceBackend>, base: ResourceRequest) -> Self {
		let (results_tx, _results_rx) = watch::channel(SearchResults::default());

		Self {
			backend,
			base,
			tags: TagSelection::default(),
			search_term: None,
			repo_id: None,
			path: None,
			next_generation: AtomicU64::new(1),
			results_tx,
		}
	}

	pub fn tags(&self) -> &TagSelection {
		&self.tags
	}

	pub fn toggle_tag(&mut self, tag: impl Into<String>) -> TagState {
		self.tags.toggle(tag)
	}

	pub fn set_tag(&mut self, tag: impl Into<String>, state: TagState) {
		self.tags.set(tag, state);
	}

	pub fn set_search_term(&mut self, term: Option<String>) {
		self.search_term = term.filter(|term| !term.trim().is_empty());
	}

	pub fn set_repo(&mut self, repo_id: Option<String>) {
		self.repo_id = repo_id;
	}

	pub fn set_path(&mut self, path: Option<String>) {
		self.path = path;
	}

	/// The payload the next [`search`](Self::search) would post.
	pub fn request(&self) -> ResourceRequest {
		let mut request = ResourceRequest {
			search_term: self.search_term.clone(),
			repo_id: self.repo_id.clone(),
			path: self.path.clone(),
			..self.base.clone()
		};
		self.tags.apply_to(&mut request);

		request
	}

	pub async fn search(&self) -> Result<SearchResults, Error> {
		self.search_with(self.request()).await
	}

	/// Dispatches `request` and returns whatever is published once it completes.
	///
	/// That is the response of this call unless a later dispatch already
	/// published its own results.
	pub async fn search_with(&self, request: ResourceRequest) -> Result<SearchResults, Error> {
		let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
		debug!(
			generation,
			whitelist = ?request.white_list_tags,
			blacklist = ?request.blacklist_list_tags,
			term = ?request.search_term,
			"Dispatching search;"
		);

		let resources = self.backend.search(&request).await.map_err(|e| {
			warn!(generation, ?e, "Search failed, keeping previous results;");
			e
		})?;

		let resources = Arc::new(resources);
		let published = self.results_tx.send_if_modified(|current| {
			if generation > current.generation {
				*current = SearchResults {
					generation,
					resources,
				};
				true
			} else {
				false
			}
		});

		if !published {
			debug!(generation, "Discarding stale search response;");
		}

		Ok(self.results())
	}

	pub fn results(&self) -> SearchResults {
		self.results_tx.borrow().clone()
	}

	pub fn subscribe(&self) -> watch::Receiver<SearchResults> {
		self.results_tx.subscribe()
	}

	/// Leaves search mode: filters are reset and results emptied.
	///
	/// Responses still in flight are older than the empty set and get dropped.
	pub fn end(&mut self) {
		self.tags.reset();
		self.search_term = None;
		self.repo_id = None;
		self.path = None;

		let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
		self.results_tx.send_replace(SearchResults {
			generation,
			resources: Arc::default(),
		});
	}
}
