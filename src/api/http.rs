/* Copyright © 2024-2025 Adam Train <adam@trainrelay.net>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */
use crate::core::error::{CoreError, Result};
use reqwest::blocking::Response;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Thin blocking HTTP wrapper around the rental backend. Every request
/// carries the caller's bearer token; every non-2xx response is mapped
/// into the core error taxonomy so callers never see raw status codes.
pub struct Client {
	client: reqwest::blocking::Client,
	base_url: String,
	token: String,
}

impl Client {
	pub fn new(base_url: &str, token: String) -> Self {
		Client {
			client: reqwest::blocking::Client::new(),
			base_url: base_url.trim_end_matches('/').to_string(),
			token,
		}
	}

	pub fn get<R>(&self, endpoint: &str) -> Result<R>
	where
		R: DeserializeOwned,
	{
		let response = self.request(Method::GET, endpoint).send()?;
		Self::handle(response)
	}

	pub fn post<B, R>(&self, endpoint: &str, body: &B) -> Result<R>
	where
		B: Serialize,
		R: DeserializeOwned,
	{
		let response =
			self.request(Method::POST, endpoint).json(body).send()?;
		Self::handle(response)
	}

	pub fn put<B, R>(&self, endpoint: &str, body: &B) -> Result<R>
	where
		B: Serialize,
		R: DeserializeOwned,
	{
		let response =
			self.request(Method::PUT, endpoint).json(body).send()?;
		Self::handle(response)
	}

	/// PUT with no request body, for toggle-style endpoints.
	pub fn put_empty<R>(&self, endpoint: &str) -> Result<R>
	where
		R: DeserializeOwned,
	{
		let response = self.request(Method::PUT, endpoint).send()?;
		Self::handle(response)
	}

	pub fn delete(&self, endpoint: &str) -> Result<()> {
		let response = self.request(Method::DELETE, endpoint).send()?;
		Self::handle::<serde_json::Value>(response)?;
		Ok(())
	}

	fn request(
		&self,
		method: Method,
		endpoint: &str,
	) -> reqwest::blocking::RequestBuilder {
		let url = format!("{}/{}", self.base_url, endpoint);
		self.client
			.request(method, &url)
			.header("Authorization", format!("Bearer {}", self.token))
	}

	fn handle<R>(response: Response) -> Result<R>
	where
		R: DeserializeOwned,
	{
		let status = response.status();

		if status.is_success() {
			return Ok(response.json()?);
		}

		let detail = response
			.json::<serde_json::Value>()
			.ok()
			.and_then(|v| {
				v.get("detail")
					.and_then(|d| d.as_str())
					.map(|s| s.to_string())
			});

		Err(error_for_status(status, detail))
	}
}

/// Maps a non-2xx status to the error taxonomy. The backend sends its
/// human-readable explanation in a "detail" field; when present it is
/// surfaced verbatim, else a generic message stands in.
fn error_for_status(status: StatusCode, detail: Option<String>) -> CoreError {
	match status {
		StatusCode::UNAUTHORIZED => CoreError::Unauthorized,
		StatusCode::NOT_FOUND => CoreError::NotFound("resource"),
		StatusCode::FORBIDDEN => CoreError::Forbidden(
			detail.unwrap_or_else(|| "forbidden".to_string()),
		),
		_ => CoreError::NetworkOrServer(detail.unwrap_or_else(|| {
			format!("request failed with status {}", status)
		})),
	}
}
