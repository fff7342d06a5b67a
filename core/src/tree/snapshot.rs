use ds_api::{ContentGroup, Resource};

use std::{collections::BTreeMap, fmt, slice};

use serde::Serialize;

/// Identifies a resource: repository id plus a `/` separated path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceKey {
	pub repo_id: String,
	pub path: String,
}

impl ResourceKey {
	pub fn new(repo_id: impl Into<String>, path: impl AsRef<str>) -> Self {
		Self {
			repo_id: repo_id.into(),
			path: normalize_path(path.as_ref()),
		}
	}

	pub fn of(resource: &Resource) -> Self {
		Self::new(resource.repo_id.clone(), &resource.path)
	}

	pub fn segments(&self) -> impl Iterator<Item = &str> {
		self.path.split('/')
	}

	/// Whether `resource` lives at this key, regardless of how the backend spelled its path.
	pub fn matches(&self, resource: &Resource) -> bool {
		resource.repo_id == self.repo_id && normalize_path(&resource.path) == self.path
	}
}

impl fmt::Display for ResourceKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.repo_id, self.path)
	}
}

/// Backslashes become slashes, empty segments are dropped.
pub fn normalize_path(path: &str) -> String {
	path.replace('\\', "/")
		.split('/')
		.filter(|segment| !segment.is_empty())
		.collect::<Vec<_>>()
		.join("/")
}

/// Immutable view of every repository's file tree, as loaded by one reload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TreeSnapshot {
	repos: BTreeMap<String, ContentGroup>,
}

impl TreeSnapshot {
	pub fn new(repos: BTreeMap<String, ContentGroup>) -> Self {
		Self { repos }
	}

	/// Builds the tree out of a flat list of resources.
	///
	/// The last path segment is treated as a file when it contains a `.`,
	/// anything else is a directory. A later resource replaces an earlier one
	/// with the same key.
	pub fn from_resources(resources: impl IntoIterator<Item = Resource>) -> Self {
		let mut repos = BTreeMap::<String, ContentGroup>::new();

		for resource in resources {
			let key = ResourceKey::of(&resource);
			if key.path.is_empty() {
				continue;
			}

			let segments = key.segments().collect::<Vec<_>>();
			let Some((last, directories)) = segments.split_last() else {
				continue;
			};

			let mut group = repos.entry(key.repo_id.clone()).or_default();
			for directory in directories {
				group = group.children.entry((*directory).to_string()).or_default();
			}

			if last.contains('.') {
				match group.resources.iter_mut().find(|r| key.matches(r)) {
					Some(existing) => *existing = resource,
					None => group.resources.push(resource),
				}
			} else {
				// Mirrors the backend: a dot-less leaf is a directory, not a document.
				group.children.entry((*last).to_string()).or_default();
			}
		}

		Self { repos }
	}

	pub fn repositories(&self) -> impl Iterator<Item = &str> {
		self.repos.keys().map(String::as_str)
	}

	pub fn root(&self, repo_id: &str) -> Option<&ContentGroup> {
		self.repos.get(repo_id)
	}

	pub fn into_inner(self) -> BTreeMap<String, ContentGroup> {
		self.repos
	}

	/// Walks the directory segments of `key` and looks the document up in the
	/// final group. A missing repository or segment means not found.
	pub fn find(&self, key: &ResourceKey) -> Option<&Resource> {
		let segments = key.segments().collect::<Vec<_>>();
		let (_, directories) = segments.split_last()?;

		let mut group = self.repos.get(&key.repo_id)?;
		for directory in directories {
			group = group.children.get(*directory)?;
		}

		group.resources.iter().find(|resource| key.matches(resource))
	}

	pub fn contains(&self, key: &ResourceKey) -> bool {
		self.find(key).is_some()
	}

	/// Every resource of every repository, depth first.
	pub fn resources(&self) -> Resources<'_> {
		Resources {
			stack: self.repos.values().rev().collect(),
			current: (&[] as &[Resource]).iter(),
		}
	}

	pub fn len(&self) -> usize {
		self.resources().count()
	}

	pub fn is_empty(&self) -> bool {
		self.resources().next().is_none()
	}
}

pub struct Resources<'a> {
	stack: Vec<&'a ContentGroup>,
	current: slice::Iter<'a, Resource>,
}

impl<'a> Iterator for Resources<'a> {
	type Item = &'a Resource;

	fn next(&mut self) -> Option<Self::Item> {
		loop {
			if let Some(resource) = self.current.next() {
				return Some(resource);
			}

			let group = self.stack.pop()?;
			self.current = group.resources.iter();
			self.stack.extend(group.children.values().rev());
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn resource(repo_id: &str, path: &str) -> Resource {
		Resource {
			repo_id: repo_id.to_string(),
			path: path.to_string(),
			..Default::default()
		}
	}

	#[test]
	fn paths_are_normalized() {
		assert_eq!(normalize_path("\\school\\\\math.md"), "school/math.md");
		assert_eq!(normalize_path("/a//b/c.md/"), "a/b/c.md");
		assert_eq!(ResourceKey::new("repo1", "x\\y.md").to_string(), "repo1:x/y.md");
	}

	#[test]
	fn builds_nested_groups() {
		let snapshot = TreeSnapshot::from_resources([
			resource("repo1", "readme.md"),
			resource("repo1", "school/math.md"),
			resource("repo1", "school/2025/physics.md"),
			resource("repo2", "notes.md"),
		]);

		let root = snapshot.root("repo1").unwrap();
		assert_eq!(root.resources.len(), 1);
		assert_eq!(root.children["school"].resources.len(), 1);
		assert_eq!(root.children["school"].children["2025"].resources.len(), 1);
		assert_eq!(snapshot.repositories().collect::<Vec<_>>(), ["repo1", "repo2"]);
		assert_eq!(snapshot.len(), 4);
	}

	#[test]
	fn duplicate_keys_keep_the_last_resource() {
		let mut newer = resource("repo1", "a.md");
		newer.created_by = "second".to_string();

		let snapshot = TreeSnapshot::from_resources([resource("repo1", "a.md"), newer]);

		assert_eq!(snapshot.len(), 1);
		assert_eq!(
			snapshot.find(&ResourceKey::new("repo1", "a.md")).unwrap().created_by,
			"second"
		);
	}

	#[test]
	fn find_walks_segments() {
		let snapshot = TreeSnapshot::from_resources([
			resource("repo1", "school/math.md"),
			resource("repo1", "math.md"),
		]);

		let found = snapshot
			.find(&ResourceKey::new("repo1", "school/math.md"))
			.unwrap();
		assert_eq!(found.path, "school/math.md");

		assert!(snapshot.find(&ResourceKey::new("repo2", "school/math.md")).is_none());
		assert!(snapshot.find(&ResourceKey::new("repo1", "work/math.md")).is_none());
		assert!(snapshot.find(&ResourceKey::new("repo1", "school/art.md")).is_none());
		assert!(snapshot.find(&ResourceKey::new("repo1", "")).is_none());
	}

	#[test]
	fn iterates_depth_first() {
		let snapshot = TreeSnapshot::from_resources([
			resource("a", "z.md"),
			resource("a", "dir/y.md"),
			resource("b", "x.md"),
		]);

		let paths = snapshot
			.resources()
			.map(|r| format!("{}:{}", r.repo_id, r.path))
			.collect::<Vec<_>>();
		assert_eq!(paths, ["a:z.md", "a:dir/y.md", "b:x.md"]);
		assert!(TreeSnapshot::default().is_empty());
	}
}
