use super::*;

use std::collections::BTreeMap;

const BASE: &str = "/api/resource";

pub use get::exec as get;
pub mod get {
	use super::*;

	/// Resources matching the request, grouped by repository id.
	pub type Response = BTreeMap<String, Vec<Resource>>;

	pub async fn exec(config: &RequestConfig, request: &ResourceRequest) -> Result<Response, Error> {
		send(config.post(&format!("{BASE}/get")).json(request))
			.await
			.map(Option::unwrap_or_default)
	}
}

pub use filetree::exec as filetree;
pub mod filetree {
	use super::*;

	/// Root content group of every matching repository.
	pub type Response = BTreeMap<String, ContentGroup>;

	pub async fn exec(config: &RequestConfig, request: &ResourceRequest) -> Result<Response, Error> {
		send(config.post(&format!("{BASE}/get/filetree")).json(request))
			.await
			.map(Option::unwrap_or_default)
	}
}

pub use update::exec as update;
pub mod update {
	use super::*;

	pub async fn exec(config: &RequestConfig, request: &ResourceUpdateRequest) -> Result<(), Error> {
		send_unit(config.put(&format!("{BASE}/update")).json(request)).await
	}
}

/// Only markdown documents can be created.
pub fn validate_document_path(path: &str) -> Result<(), Error> {
	let file_name = path.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or_default();
	if file_name.len() <= ".md".len() || !file_name.ends_with(".md") {
		return Err(Error::Validation(format!(
			"Resource must be a markdown file ending in .md, got '{path}'"
		)));
	}

	Ok(())
}

pub use add::exec as add;
pub mod add {
	use super::*;

	pub async fn exec(config: &RequestConfig, resource: &NewResource) -> Result<(), Error> {
		validate_document_path(&resource.path)?;

		let mut query = vec![
			("repoId", resource.repo_id.as_str()),
			("path", resource.path.as_str()),
			("createdBy", resource.created_by.as_str()),
		];
		if let Some(category) = &resource.category {
			query.push(("category", category.as_str()));
		}
		for tag_id in &resource.tag_ids {
			query.push(("tagIds", tag_id.as_str()));
		}

		send_unit(
			config
				.put(&format!("{BASE}/add"))
				.query(&query)
				.body(resource.content.clone()),
		)
		.await
	}
}

pub use remove::exec as remove;
pub mod remove {
	use super::*;

	pub async fn exec(config: &RequestConfig, repo_id: &str, path: &str) -> Result<(), Error> {
		send_unit(
			config
				.post(&format!("{BASE}/remove"))
				.query(&[("repo", repo_id), ("path", path)]),
		)
		.await
	}
}

pub use move_resource::exec as move_resource;
pub mod move_resource {
	use super::*;

	pub async fn exec(config: &RequestConfig, request: &MoveRequest) -> Result<(), Error> {
		send_unit(
			config
				.post(&format!("{BASE}/move"))
				.query(&[
					("userId", request.user_id.as_str()),
					("repoFrom", request.repo_from.as_str()),
					("from", request.from.as_str()),
					("repoTo", request.repo_to.as_str()),
					("to", request.to.as_str()),
				]),
		)
		.await
	}
}
