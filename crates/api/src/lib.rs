//! Typed client for the docshelf REST backend.
//!
//! Every endpoint lives in its own module with an `exec` function, re-exported
//! under the endpoint's short name (`resource::get`, `editing::set`, ...). All
//! calls take a [`RequestConfig`] carrying the shared `reqwest::Client`, the
//! base URL and the optional bearer token.

pub mod admin;
pub mod auth;
pub mod editing;
pub mod models;
pub mod resource;

pub use models::*;

use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Deserialize};
use tracing::{debug, warn};

#[derive(Clone, Debug)]
pub struct RequestConfig {
	pub client: reqwest::Client,
	pub api_url: String,
	pub auth_token: Option<auth::AuthToken>,
}

impl RequestConfig {
	pub fn new(api_url: impl Into<String>) -> Self {
		Self {
			client: reqwest::Client::new(),
			api_url: api_url.into().trim_end_matches('/').to_string(),
			auth_token: None,
		}
	}

	pub fn with_token(mut self, token: auth::AuthToken) -> Self {
		self.auth_token = Some(token);
		self
	}

	pub(crate) fn url(&self, path: &str) -> String {
		format!("{}{path}", self.api_url)
	}

	pub(crate) fn get(&self, path: &str) -> reqwest::RequestBuilder {
		self.authorize(self.client.get(self.url(path)))
	}

	pub(crate) fn post(&self, path: &str) -> reqwest::RequestBuilder {
		self.authorize(self.client.post(self.url(path)))
	}

	pub(crate) fn put(&self, path: &str) -> reqwest::RequestBuilder {
		self.authorize(self.client.put(self.url(path)))
	}

	fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
		match &self.auth_token {
			Some(token) => req.with_auth(token),
			None => req,
		}
	}
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
	#[error("transport error: {0}")]
	Transport(#[from] reqwest::Error),
	#[error("failed to decode response: {0}")]
	Decode(#[from] serde_json::Error),
	#[error("not found: {0}")]
	NotFound(String),
	#[error("conflict: {0}")]
	Conflict(String),
	#[error("invalid request: {0}")]
	Validation(String),
	#[error("authentication required")]
	AuthRequired,
	#[error("backend error <status={status}>: {message}")]
	Api { status: u16, message: String },
}

impl Error {
	/// Classifies an error message reported by the backend.
	///
	/// The backend reports most failures inside the JSON envelope with a 200
	/// status, so the message text is checked when the status says nothing.
	pub fn from_api(status: StatusCode, message: String) -> Self {
		match status {
			StatusCode::NOT_FOUND => return Self::NotFound(message),
			StatusCode::CONFLICT => return Self::Conflict(message),
			StatusCode::BAD_REQUEST => return Self::Validation(message),
			StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Self::AuthRequired,
			_ => {}
		}

		let lowered = message.to_lowercase();
		if lowered.contains("does not exist") || lowered.contains("not found") {
			Self::NotFound(message)
		} else if lowered.contains("already exists") || lowered.contains("being edited") {
			Self::Conflict(message)
		} else {
			Self::Api {
				status: status.as_u16(),
				message,
			}
		}
	}

	pub fn is_not_found(&self) -> bool {
		matches!(self, Self::NotFound(_))
	}

	pub fn is_conflict(&self) -> bool {
		matches!(self, Self::Conflict(_))
	}
}

/// The `{message, error, content}` envelope wrapping every backend reply.
#[derive(Debug, Deserialize)]
pub struct RestResponse<T> {
	pub message: Option<String>,
	pub error: Option<String>,
	pub content: Option<T>,
}

impl<T> RestResponse<T> {
	pub fn into_result(self, status: StatusCode) -> Result<Option<T>, Error> {
		if let Some(message) = self.error {
			return Err(Error::from_api(status, message));
		}

		if !status.is_success() {
			return Err(Error::from_api(
				status,
				self.message.unwrap_or_else(|| status.to_string()),
			));
		}

		Ok(self.content)
	}
}

pub(crate) trait WithAuth {
	fn with_auth(self, token: &auth::AuthToken) -> Self;
}

impl WithAuth for reqwest::RequestBuilder {
	fn with_auth(self, token: &auth::AuthToken) -> Self {
		self.header("authorization", format!("Bearer {}", token.as_str()))
	}
}

/// Sends the request and unwraps the response envelope.
pub(crate) async fn send<T: DeserializeOwned>(
	req: reqwest::RequestBuilder,
) -> Result<Option<T>, Error> {
	let response = req.send().await?;
	let status = response.status();
	let url = response.url().path().to_string();
	let body = response.bytes().await?;

	debug!(%url, %status, bytes = body.len(), "Backend replied;");

	decode_envelope(status, &url, &body)
}

/// Decodes `body` as an envelope, treating an undecodable error body as its message.
pub(crate) fn decode_envelope<T: DeserializeOwned>(
	status: StatusCode,
	url: &str,
	body: &[u8],
) -> Result<Option<T>, Error> {
	match serde_json::from_slice::<RestResponse<T>>(body) {
		Ok(envelope) => envelope.into_result(status),
		Err(e) if status.is_success() => {
			warn!(%url, ?e, "Response envelope could not be decoded;");
			Err(Error::Decode(e))
		}
		Err(_) => Err(Error::from_api(
			status,
			String::from_utf8_lossy(body).into_owned(),
		)),
	}
}

/// Like [`send`] for endpoints that carry no content on success.
pub(crate) async fn send_unit(req: reqwest::RequestBuilder) -> Result<(), Error> {
	send::<serde_json::Value>(req).await.map(|_| ())
}
