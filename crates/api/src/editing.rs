//! Advisory "currently being edited" markers.
//!
//! The backend does not enforce these: a marker only tells other clients that
//! somebody has the resource open. Nothing expires them either, so a client
//! that dies while editing leaves its marker behind until it is removed.

use super::*;

const BASE: &str = "/api/resource/editing";

pub use set::exec as set;
pub mod set {
	use super::*;

	pub async fn exec(
		config: &RequestConfig,
		repo_id: &str,
		path: &str,
		user_id: &str,
	) -> Result<(), Error> {
		send_unit(config.put(&format!("{BASE}/set")).query(&[
			("repoId", repo_id),
			("path", path),
			("userId", user_id),
		]))
		.await
	}
}

pub use get::exec as get;
pub mod get {
	use super::*;

	/// Returns the id of the user editing the resource, if any.
	pub async fn exec(
		config: &RequestConfig,
		repo_id: &str,
		path: &str,
	) -> Result<Option<String>, Error> {
		send::<String>(
			config
				.get(&format!("{BASE}/get"))
				.query(&[("repoId", repo_id), ("path", path)]),
		)
		.await
		.map(|holder| holder.filter(|user| !user.is_empty()))
	}
}

pub use remove::exec as remove;
pub mod remove {
	use super::*;

	pub async fn exec(
		config: &RequestConfig,
		repo_id: &str,
		path: &str,
		user_id: &str,
	) -> Result<(), Error> {
		send_unit(config.put(&format!("{BASE}/remove")).query(&[
			("repoId", repo_id),
			("path", path),
			("userId", user_id),
		]))
		.await
	}
}
