use super::*;

use serde::Serialize;

/// Bearer token handed out by `/api/auth/login`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
	pub fn new(token: impl Into<String>) -> Self {
		Self(token.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

// Never print the token itself.
impl std::fmt::Debug for AuthToken {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str("AuthToken(..)")
	}
}

pub use login::exec as login;
pub mod login {
	use super::*;

	#[derive(Serialize)]
	#[serde(rename_all = "camelCase")]
	struct LoginRequest<'a> {
		user_id: &'a str,
		password: &'a str,
	}

	/// The login endpoint answers with `{token, error}` instead of the usual envelope.
	#[derive(Deserialize)]
	struct LoginResponse {
		token: Option<String>,
		error: Option<String>,
	}

	pub async fn exec(config: &RequestConfig, user_id: &str, password: &str) -> Result<AuthToken, Error> {
		let response = config
			.client
			.post(config.url("/api/auth/login"))
			.json(&LoginRequest { user_id, password })
			.send()
			.await?;

		let status = response.status();
		let body = response.bytes().await?;

		into_token(status, &body)
	}

	pub(crate) fn into_token(status: StatusCode, body: &[u8]) -> Result<AuthToken, Error> {
		let LoginResponse { token, error } = match serde_json::from_slice(body) {
			Ok(response) => response,
			Err(e) if status.is_success() => return Err(Error::Decode(e)),
			Err(_) => {
				return Err(Error::from_api(
					status,
					String::from_utf8_lossy(body).into_owned(),
				))
			}
		};

		match (token, error) {
			(Some(token), None) if status.is_success() => Ok(AuthToken::new(token)),
			(_, Some(message)) if status == StatusCode::UNAUTHORIZED => {
				Err(Error::Validation(message))
			}
			(_, error) => Err(Error::from_api(
				status,
				error.unwrap_or_else(|| "login failed".to_string()),
			)),
		}
	}
}
