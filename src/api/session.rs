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
use crate::config::config_file::Api;
use crate::core::obligation::Role;
use anyhow::{bail, Error};

/// The caller's identity for one invocation. Built once from config,
/// passed explicitly to everything that talks to the backend, and never
/// mutated; there is deliberately no global auth state anywhere.
#[derive(Clone, Debug)]
pub struct Session {
	pub token: String,
	pub user_id: u64,
	pub user_name: String,
	pub role: Role,
}

impl Session {
	pub fn from_config(api: &Api) -> Result<Self, Error> {
		let token = match &api.token {
			Some(t) if !t.is_empty() => t.clone(),
			_ => bail!("no api token in config; set api.token or api.token_cmd"),
		};

		let user_id = match api.user_id {
			Some(id) => id,
			None => bail!("no api.user_id in config"),
		};

		let role = match &api.role {
			Some(r) => Role::from_str(r)?,
			None => bail!("no api.role in config"),
		};

		Ok(Session {
			token,
			user_id,
			user_name: api.user_name.clone().unwrap_or_default(),
			role,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn api() -> Api {
		Api {
			url: Some("http://localhost:8000".to_string()),
			token: Some("abc".to_string()),
			token_cmd: None,
			user_id: Some(10),
			user_name: Some("Ada".to_string()),
			role: Some("landlord".to_string()),
			property: Some(3),
		}
	}

	#[test]
	fn test_from_config() {
		let session = Session::from_config(&api()).unwrap();
		assert_eq!(session.user_id, 10);
		assert_eq!(session.role, Role::Landlord);
		assert_eq!(session.token, "abc");
	}

	#[test]
	fn test_missing_fields_rejected() {
		let mut a = api();
		a.token = None;
		assert!(Session::from_config(&a).is_err());

		let mut a = api();
		a.user_id = None;
		assert!(Session::from_config(&a).is_err());

		let mut a = api();
		a.role = Some("manager".to_string());
		assert!(Session::from_config(&a).is_err());
	}
}
