#![allow(dead_code)]

use ds_core::{
	api::{
		self, auth::AuthToken, ContentGroup, MoveRequest, NewResource, Resource, ResourceRequest,
		ResourceUpdateRequest,
	},
	backend::ResourceBackend,
	config::ClientConfig,
	tree::{ResourceKey, TreeSnapshot},
	Docshelf,
};

use std::{
	collections::{BTreeMap, BTreeSet},
	sync::{Arc, Mutex, MutexGuard},
	time::Duration,
};

use async_trait::async_trait;

pub const USER: &str = "alice";
pub const PASSWORD: &str = "secret";

pub fn resource(repo_id: &str, path: &str, data: &str, tags: &[&str]) -> Resource {
	Resource {
		repo_id: repo_id.to_string(),
		path: path.to_string(),
		created_by: USER.to_string(),
		tags: tags
			.iter()
			.map(|tag| (tag.to_string(), tag.to_string()))
			.collect(),
		is_editable: true,
		data: Some(data.to_string()),
		..Default::default()
	}
}

pub fn key(repo_id: &str, path: &str) -> ResourceKey {
	ResourceKey::new(repo_id, path)
}

fn injected(op: &str) -> api::Error {
	api::Error::Api {
		status: 500,
		message: format!("injected {op} failure"),
	}
}

#[derive(Default)]
pub struct State {
	pub resources: BTreeMap<ResourceKey, Resource>,
	pub editing: BTreeMap<ResourceKey, String>,
	/// Operation names that fail until removed again.
	pub failing: BTreeSet<&'static str>,
	/// Search terms whose responses are held back.
	pub delays: BTreeMap<String, Duration>,
	pub searches: Vec<ResourceRequest>,
	pub updates: Vec<ResourceUpdateRequest>,
	pub added: Vec<NewResource>,
	/// Token installed by the last `set_token`.
	pub token: Option<AuthToken>,
}

/// In-memory stand-in for the REST backend.
#[derive(Default)]
pub struct MockBackend {
	state: Mutex<State>,
}

impl MockBackend {
	pub fn new(resources: impl IntoIterator<Item = Resource>) -> Arc<Self> {
		let backend = Self::default();
		{
			let mut state = backend.state();
			for resource in resources {
				state.resources.insert(ResourceKey::of(&resource), resource);
			}
		}

		Arc::new(backend)
	}

	pub fn state(&self) -> MutexGuard<'_, State> {
		self.state.lock().unwrap()
	}

	pub fn fail(&self, op: &'static str) {
		self.state().failing.insert(op);
	}

	pub fn recover(&self, op: &'static str) {
		self.state().failing.remove(op);
	}

	pub fn delay(&self, term: &str, delay: Duration) {
		self.state().delays.insert(term.to_string(), delay);
	}

	pub fn data(&self, key: &ResourceKey) -> Option<String> {
		self.state()
			.resources
			.get(key)
			.and_then(|resource| resource.data.clone())
	}

	pub fn token(&self) -> Option<String> {
		self.state().token.as_ref().map(|token| token.as_str().to_string())
	}

	pub fn editor_of(&self, key: &ResourceKey) -> Option<String> {
		self.state().editing.get(key).cloned()
	}

	fn check(&self, op: &'static str) -> Result<(), api::Error> {
		if self.state().failing.contains(op) {
			Err(injected(op))
		} else {
			Ok(())
		}
	}
}

fn has_tag(resource: &Resource, tag: &str) -> bool {
	resource.tags.contains_key(tag) || resource.tags.values().any(|name| name == tag)
}

fn matches(request: &ResourceRequest, resource: &Resource) -> bool {
	request
		.repo_id
		.as_ref()
		.map_or(true, |repo_id| &resource.repo_id == repo_id)
		&& request
			.path
			.as_ref()
			.map_or(true, |path| resource.path == *path)
		&& request.search_term.as_ref().map_or(true, |term| {
			resource.path.contains(term.as_str())
				|| resource
					.data
					.as_ref()
					.is_some_and(|data| data.contains(term.as_str()))
		})
		&& request
			.white_list_tags
			.iter()
			.all(|tag| has_tag(resource, tag))
		&& !request
			.blacklist_list_tags
			.iter()
			.any(|tag| has_tag(resource, tag))
}

#[async_trait]
impl ResourceBackend for MockBackend {
	async fn search(
		&self,
		request: &ResourceRequest,
	) -> Result<BTreeMap<String, Vec<Resource>>, api::Error> {
		self.check("search")?;

		let delay = {
			let mut state = self.state();
			state.searches.push(request.clone());
			request
				.search_term
				.as_ref()
				.and_then(|term| state.delays.get(term).copied())
		};
		if let Some(delay) = delay {
			tokio::time::sleep(delay).await;
		}

		let mut found = BTreeMap::<String, Vec<Resource>>::new();
		for resource in self.state().resources.values() {
			if matches(request, resource) {
				let mut resource = resource.clone();
				if !request.with_data {
					resource.data = None;
				}
				found
					.entry(resource.repo_id.clone())
					.or_default()
					.push(resource);
			}
		}

		Ok(found)
	}

	async fn file_tree(
		&self,
		request: &ResourceRequest,
	) -> Result<BTreeMap<String, ContentGroup>, api::Error> {
		self.check("file_tree")?;

		let resources = self
			.state()
			.resources
			.values()
			.filter(|resource| matches(request, resource))
			.cloned()
			.collect::<Vec<_>>();

		Ok(TreeSnapshot::from_resources(resources).into_inner())
	}

	async fn update(&self, request: &ResourceUpdateRequest) -> Result<(), api::Error> {
		self.check("update")?;

		let mut state = self.state();
		state.updates.push(request.clone());

		let key = ResourceKey::new(request.repo_id.clone(), &request.path);
		let resource = state
			.resources
			.get_mut(&key)
			.ok_or_else(|| api::Error::NotFound(format!("Resource {key} does not exist")))?;

		if let Some(data) = &request.data {
			resource.data = Some(data.clone());
		}
		if let Some(category) = &request.category {
			resource.category = Some(category.clone());
		}
		if !request.tags_to_set.is_empty() {
			resource.tags.clear();
		}
		for tag in request.tags_to_set.iter().chain(&request.tags_to_add) {
			resource.tags.insert(tag.clone(), tag.clone());
		}
		for tag in &request.tags_to_remove {
			resource.tags.remove(tag);
		}
		if let Some(user_id) = &request.user_id {
			resource.last_modified_by = user_id.clone();
		}

		Ok(())
	}

	async fn add(&self, new: &NewResource) -> Result<(), api::Error> {
		self.check("add")?;

		let mut state = self.state();
		state.added.push(new.clone());

		let key = ResourceKey::new(new.repo_id.clone(), &new.path);
		if state.resources.contains_key(&key) {
			return Err(api::Error::Conflict(format!("Resource {key} already exists")));
		}

		let mut resource = resource(&new.repo_id, &key.path, &new.content, &[]);
		resource.created_by = new.created_by.clone();
		resource.category = new.category.clone();
		for tag in &new.tag_ids {
			resource.tags.insert(tag.clone(), tag.clone());
		}
		state.resources.insert(key, resource);

		Ok(())
	}

	async fn remove(&self, key: &ResourceKey) -> Result<(), api::Error> {
		self.check("remove")?;

		self.state()
			.resources
			.remove(key)
			.map(|_| ())
			.ok_or_else(|| api::Error::NotFound(format!("Resource {key} does not exist")))
	}

	async fn move_resource(&self, request: &MoveRequest) -> Result<(), api::Error> {
		self.check("move")?;

		let from = ResourceKey::new(request.repo_from.clone(), &request.from);
		let to = ResourceKey::new(request.repo_to.clone(), &request.to);

		let mut state = self.state();
		if state.resources.contains_key(&to) {
			return Err(api::Error::Conflict(format!("Resource {to} already exists")));
		}
		let mut resource = state
			.resources
			.remove(&from)
			.ok_or_else(|| api::Error::NotFound(format!("Resource {from} does not exist")))?;

		resource.repo_id = to.repo_id.clone();
		resource.path = to.path.clone();
		state.resources.insert(to, resource);

		Ok(())
	}

	async fn editing_user(&self, key: &ResourceKey) -> Result<Option<String>, api::Error> {
		self.check("editing_get")?;
		Ok(self.editor_of(key))
	}

	async fn set_editing(&self, key: &ResourceKey, user_id: &str) -> Result<(), api::Error> {
		self.check("editing_set")?;

		let mut state = self.state();
		match state.editing.get(key) {
			Some(holder) if holder != user_id => Err(api::Error::Conflict(format!(
				"Resource {key} is being edited by {holder}"
			))),
			_ => {
				state.editing.insert(key.clone(), user_id.to_string());
				Ok(())
			}
		}
	}

	async fn remove_editing(&self, key: &ResourceKey, user_id: &str) -> Result<(), api::Error> {
		self.check("editing_remove")?;

		let mut state = self.state();
		if state.editing.get(key).is_some_and(|holder| holder == user_id) {
			state.editing.remove(key);
		}

		Ok(())
	}

	async fn login(&self, user_id: &str, password: &str) -> Result<AuthToken, api::Error> {
		self.check("login")?;

		if password == PASSWORD {
			Ok(AuthToken::new(format!("token-{user_id}")))
		} else {
			Err(api::Error::Validation("Wrong password".to_string()))
		}
	}

	async fn set_token(&self, token: Option<AuthToken>) {
		self.state().token = token;
	}
}

pub fn config() -> ClientConfig {
	ClientConfig {
		user_id: Some(USER.to_string()),
		..Default::default()
	}
}

pub fn docshelf(backend: &Arc<MockBackend>) -> Docshelf {
	Docshelf::with_backend(config(), Arc::clone(backend) as Arc<dyn ResourceBackend>)
}

pub fn library() -> Vec<Resource> {
	vec![
		resource("repo1", "readme.md", "# Readme", &[]),
		resource("repo1", "school/math.md", "algebra", &["school"]),
		resource("repo1", "school/draft.md", "todo", &["school", "draft"]),
		resource("repo2", "work/plan.md", "q3 plan", &["work"]),
	]
}
