//! Whitelist/blacklist selection of tags for searches.

use ds_api::ResourceRequest;

use std::collections::BTreeSet;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TagState {
	Unselected,
	/// Matching resources must carry the tag.
	Whitelisted,
	/// Matching resources must not carry the tag.
	Blacklisted,
}

impl TagState {
	/// unselected -> whitelisted -> blacklisted -> unselected
	pub fn next(self) -> Self {
		match self {
			Self::Unselected => Self::Whitelisted,
			Self::Whitelisted => Self::Blacklisted,
			Self::Blacklisted => Self::Unselected,
		}
	}
}

/// Two disjoint tag sets. A tag is in at most one of them at any time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSelection {
	whitelist: BTreeSet<String>,
	blacklist: BTreeSet<String>,
}

impl TagSelection {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn classify(&self, tag: &str) -> TagState {
		if self.whitelist.contains(tag) {
			TagState::Whitelisted
		} else if self.blacklist.contains(tag) {
			TagState::Blacklisted
		} else {
			TagState::Unselected
		}
	}

	/// Moves `tag` to its next state and returns it.
	///
	/// A blacklisted tag goes back to unselected, never straight to the whitelist.
	pub fn toggle(&mut self, tag: impl Into<String>) -> TagState {
		let tag = tag.into();
		let next = self.classify(&tag).next();
		self.set(tag, next);
		next
	}

	pub fn set(&mut self, tag: impl Into<String>, state: TagState) {
		let tag = tag.into();
		self.whitelist.remove(&tag);
		self.blacklist.remove(&tag);

		match state {
			TagState::Unselected => {}
			TagState::Whitelisted => {
				self.whitelist.insert(tag);
			}
			TagState::Blacklisted => {
				self.blacklist.insert(tag);
			}
		}
	}

	pub fn whitelist(&self) -> Vec<String> {
		self.whitelist.iter().cloned().collect()
	}

	pub fn blacklist(&self) -> Vec<String> {
		self.blacklist.iter().cloned().collect()
	}

	pub fn is_empty(&self) -> bool {
		self.whitelist.is_empty() && self.blacklist.is_empty()
	}

	pub fn reset(&mut self) {
		self.whitelist.clear();
		self.blacklist.clear();
	}

	/// Writes the selection into the tag fields of a search request.
	pub fn apply_to(&self, request: &mut ResourceRequest) {
		request.white_list_tags = self.whitelist();
		request.blacklist_list_tags = self.blacklist();
	}
}
