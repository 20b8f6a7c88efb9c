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
use thiserror::Error;

/// Every failure the core and the backend client can produce. Validation
/// errors are raised before any network call is made; the rest are mapped
/// from backend responses or raised by the in-memory core itself.
#[derive(Debug, Error)]
pub enum CoreError {
	#[error("invalid input: {0}")]
	Validation(String),

	#[error("unauthorized; please log in again")]
	Unauthorized,

	#[error("{0} not found")]
	NotFound(&'static str),

	#[error("{0}")]
	Forbidden(String),

	#[error("user {user_id} already has a resolution on obligation {obligation_id}")]
	DuplicateConfirmer { obligation_id: u64, user_id: u64 },

	#[error("backend error: {0}")]
	NetworkOrServer(String),
}

impl From<reqwest::Error> for CoreError {
	fn from(e: reqwest::Error) -> Self {
		CoreError::NetworkOrServer(e.to_string())
	}
}

pub type Result<T> = std::result::Result<T, CoreError>;
