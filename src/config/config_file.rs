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
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
	pub api: Option<Api>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Api {
	pub url: Option<String>,
	pub token: Option<String>,
	pub token_cmd: Option<String>,

	/// The caller's identity as the backend knows it. The id and role
	/// must match what the token authenticates as; the backend is the
	/// authority either way.
	pub user_id: Option<u64>,
	pub user_name: Option<String>,
	pub role: Option<String>,

	/// Default property to operate on when no --property flag is given.
	pub property: Option<u64>,
}
