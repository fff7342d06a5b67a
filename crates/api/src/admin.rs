//! Thin wrappers over the user, group, permission and role administration endpoints.

use super::*;

pub mod user {
	use super::*;

	pub async fn get(
		config: &RequestConfig,
		repo_id: &str,
		user_id: Option<&str>,
	) -> Result<Vec<User>, Error> {
		let mut query = vec![("repoId", repo_id)];
		if let Some(user_id) = user_id {
			query.push(("userId", user_id));
		}

		send(config.get("/api/user/get").query(&query))
			.await
			.map(Option::unwrap_or_default)
	}

	/// Creates a user after checking the password was typed the same way twice.
	pub async fn add(
		config: &RequestConfig,
		repo_id: &str,
		user_id: &str,
		password: &str,
		password_confirmation: &str,
	) -> Result<(), Error> {
		if password != password_confirmation {
			return Err(Error::Validation("Passwords do not match".to_string()));
		}
		if password.is_empty() {
			return Err(Error::Validation("Password must not be empty".to_string()));
		}

		send_unit(config.put("/api/user/add").query(&[
			("repoId", repo_id),
			("userId", user_id),
			("password", password),
		]))
		.await
	}

	pub async fn remove(config: &RequestConfig, repo_id: &str, user_id: &str) -> Result<(), Error> {
		send_unit(
			config
				.put("/api/user/remove")
				.query(&[("repoId", repo_id), ("userId", user_id)]),
		)
		.await
	}
}

pub mod group {
	use super::*;

	pub async fn get(
		config: &RequestConfig,
		repo_id: &str,
		group_id: Option<&str>,
	) -> Result<Vec<Group>, Error> {
		let mut query = vec![("repoId", repo_id)];
		if let Some(group_id) = group_id {
			query.push(("groupId", group_id));
		}

		send(config.get("/api/group/get").query(&query))
			.await
			.map(Option::unwrap_or_default)
	}

	pub async fn add(
		config: &RequestConfig,
		repo_id: &str,
		group_id: &str,
		group_name: &str,
	) -> Result<(), Error> {
		send_unit(config.post("/api/group/add").query(&[
			("repoId", repo_id),
			("groupId", group_id),
			("groupName", group_name),
		]))
		.await
	}

	pub async fn remove(config: &RequestConfig, repo_id: &str, group_id: &str) -> Result<(), Error> {
		send_unit(
			config
				.post("/api/group/remove")
				.query(&[("repoId", repo_id), ("groupId", group_id)]),
		)
		.await
	}

	pub async fn rename(
		config: &RequestConfig,
		repo_id: &str,
		group_id: &str,
		new_name: &str,
	) -> Result<(), Error> {
		send_unit(config.post("/api/group/rename").query(&[
			("repoId", repo_id),
			("groupId", group_id),
			("newName", new_name),
		]))
		.await
	}

	pub async fn add_user(
		config: &RequestConfig,
		repo_id: &str,
		group_id: &str,
		user_id: &str,
	) -> Result<(), Error> {
		send_unit(config.post("/api/group/user/add").query(&[
			("repoId", repo_id),
			("groupId", group_id),
			("userId", user_id),
		]))
		.await
	}

	pub async fn remove_user(
		config: &RequestConfig,
		repo_id: &str,
		group_id: &str,
		user_id: &str,
	) -> Result<(), Error> {
		send_unit(config.post("/api/group/user/remove").query(&[
			("repoId", repo_id),
			("groupId", group_id),
			("userId", user_id),
		]))
		.await
	}
}

pub mod permission {
	use super::*;

	/// Whose permissions a call addresses.
	#[derive(Debug, Clone, Copy)]
	pub enum Holder<'a> {
		User(&'a str),
		Group(&'a str),
	}

	impl<'a> Holder<'a> {
		pub(crate) fn segment(&self) -> &'static str {
			match self {
				Self::User(_) => "user",
				Self::Group(_) => "group",
			}
		}

		pub(crate) fn param(&self) -> (&'static str, &'a str) {
			match self {
				Self::User(id) => ("userId", *id),
				Self::Group(id) => ("groupId", *id),
			}
		}
	}

	pub async fn get(
		config: &RequestConfig,
		repo_id: &str,
		holder: Holder<'_>,
	) -> Result<Vec<Permission>, Error> {
		send(
			config
				.get(&format!("/api/permission/{}/get", holder.segment()))
				.query(&[("repoId", repo_id), holder.param()]),
		)
		.await
		.map(Option::unwrap_or_default)
	}

	pub async fn add(
		config: &RequestConfig,
		repo_id: &str,
		holder: Holder<'_>,
		permission_type: &str,
		path: &str,
	) -> Result<(), Error> {
		send_unit(
			config
				.get(&format!("/api/permission/{}/add", holder.segment()))
				.query(&[
					("repoId", repo_id),
					holder.param(),
					("permissionType", permission_type),
					("path", path),
				]),
		)
		.await
	}

	pub async fn remove(
		config: &RequestConfig,
		repo_id: &str,
		holder: Holder<'_>,
		permission_type: &str,
		path: &str,
	) -> Result<(), Error> {
		send_unit(
			config
				.get(&format!("/api/permission/{}/remove", holder.segment()))
				.query(&[
					("repoId", repo_id),
					holder.param(),
					("permissionType", permission_type),
					("path", path),
				]),
		)
		.await
	}
}

pub mod role {
	use super::*;

	pub async fn get(config: &RequestConfig, repo_id: &str, user_id: &str) -> Result<Vec<String>, Error> {
		send(
			config
				.get("/api/role/get")
				.query(&[("repoId", repo_id), ("userId", user_id)]),
		)
		.await
		.map(Option::unwrap_or_default)
	}
}
