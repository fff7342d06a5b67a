use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A tagged document entry, keyed by repository and path.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
	pub path: String,
	pub repo_id: String,
	#[serde(default)]
	pub created_by: String,
	#[serde(default)]
	pub created_at: String,
	#[serde(default)]
	pub category: Option<String>,
	/// tag id -> tag name
	#[serde(default)]
	pub tags: BTreeMap<String, String>,
	#[serde(default)]
	pub last_modified_by: String,
	#[serde(default)]
	pub last_modified_at: String,
	#[serde(default)]
	pub is_editable: bool,
	/// Only filled when the request asked for `withData`.
	#[serde(default)]
	pub data: Option<String>,
}

/// A directory-like node of a repository's file tree.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ContentGroup {
	#[serde(default)]
	pub resources: Vec<Resource>,
	#[serde(default)]
	pub children: BTreeMap<String, ContentGroup>,
}

/// Filter payload shared by `/api/resource/get` and `/api/resource/get/filetree`.
///
/// A resource carrying both a whitelisted and a blacklisted tag is excluded
/// by the backend.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRequest {
	pub search_term: Option<String>,
	pub path: Option<String>,
	pub repo_id: Option<String>,
	pub user_id: Option<String>,
	pub white_list_tags: Vec<String>,
	pub blacklist_list_tags: Vec<String>,
	pub with_data: bool,
	pub return_limit: u64,
}

impl Default for ResourceRequest {
	fn default() -> Self {
		Self {
			search_term: None,
			path: None,
			repo_id: None,
			user_id: None,
			white_list_tags: Vec::new(),
			blacklist_list_tags: Vec::new(),
			with_data: false,
			return_limit: DEFAULT_RETURN_LIMIT,
		}
	}
}

pub const DEFAULT_RETURN_LIMIT: u64 = 1_073_741_824;

/// Payload of `PUT /api/resource/update`. `None` fields are left untouched.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ResourceUpdateRequest {
	pub repo_id: String,
	pub path: String,
	pub user_id: Option<String>,
	pub tags_to_add: Vec<String>,
	pub tags_to_remove: Vec<String>,
	pub tags_to_set: Vec<String>,
	pub category: Option<String>,
	pub data: Option<String>,
	pub treat_nulls_as_values: bool,
}

/// Arguments of `PUT /api/resource/add`; `content` travels as the request body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewResource {
	pub repo_id: String,
	pub path: String,
	pub created_by: String,
	pub category: Option<String>,
	pub tag_ids: Vec<String>,
	pub content: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
	pub user_id: String,
	pub repo_from: String,
	pub from: String,
	pub repo_to: String,
	pub to: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
	pub id: String,
	#[serde(default)]
	pub is_group: bool,
	#[serde(default)]
	pub is_user: bool,
	pub path: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
	pub user_id: String,
	#[serde(default)]
	pub roles: Vec<String>,
	#[serde(default)]
	pub permissions: Vec<Permission>,
	#[serde(default)]
	pub groups: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Group {
	pub group_id: String,
	pub name: String,
	#[serde(default)]
	pub permissions: Vec<Permission>,
	#[serde(default)]
	pub users: Vec<String>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn resource_decodes_backend_shape() {
		let resource: Resource = serde_json::from_str(
			r##"{
				"path": "school/math.md",
				"repoId": "repo1",
				"createdBy": "niklas",
				"createdAt": "2025-01-01 10:00:00",
				"category": null,
				"tags": {"1": "school"},
				"lastModifiedBy": "niklas",
				"lastModifiedAt": "2025-01-02 10:00:00",
				"isEditable": true,
				"data": "# Math"
			}"##,
		)
		.unwrap();

		assert_eq!(resource.repo_id, "repo1");
		assert_eq!(resource.tags.get("1").map(String::as_str), Some("school"));
		assert!(resource.is_editable);
		assert_eq!(resource.data.as_deref(), Some("# Math"));
	}

	#[test]
	fn search_payload_uses_backend_field_names() {
		let request = ResourceRequest {
			white_list_tags: vec!["school".into()],
			blacklist_list_tags: vec!["draft".into()],
			..Default::default()
		};

		let json = serde_json::to_value(&request).unwrap();
		assert_eq!(json["whiteListTags"], serde_json::json!(["school"]));
		assert_eq!(json["blacklistListTags"], serde_json::json!(["draft"]));
		assert_eq!(json["returnLimit"], serde_json::json!(DEFAULT_RETURN_LIMIT));
		assert!(json["searchTerm"].is_null());
	}

	#[test]
	fn update_payload_uses_backend_field_names() {
		let request = ResourceUpdateRequest {
			repo_id: "repo1".into(),
			path: "a.md".into(),
			tags_to_set: vec!["school".into()],
			treat_nulls_as_values: true,
			..Default::default()
		};

		let json = serde_json::to_value(&request).unwrap();
		assert_eq!(json["treatNullsAsValues"], serde_json::json!(true));
		assert_eq!(json["tagsToSet"], serde_json::json!(["school"]));
		assert!(json.get("treatNullAsValue").is_none());
	}
}
