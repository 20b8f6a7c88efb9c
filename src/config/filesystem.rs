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
use crate::config::config_file::Config;
use anyhow::{anyhow, bail, Error};
use dirs::home_dir;
use std::fs;
use std::fs::File;
use std::path::PathBuf;
use std::process::Command;

/// Fetches the config from the given path, or the default path if none.
/// The boolean argument indicates whether the api token should be
/// resolved, i.e. whether the caller is about to talk to the backend.
pub fn get_config(
	custom_config_path: Option<&String>,
	expand_auth: bool,
) -> Result<Config, Error> {
	let config_path = match &custom_config_path {
		None => {
			let home_dir = home_dir()
				.ok_or_else(|| anyhow!("Unable to determine home directory"))?;
			home_dir.join(".config/rentr/config.toml")
		},
		Some(p) => PathBuf::from(p),
	};

	// create empty config file if it doesn't exist
	if !config_path.exists() && custom_config_path.is_none() {
		if let Some(parent) = config_path.parent() {
			fs::create_dir_all(parent)?;
		}
		File::create(config_path.clone())?;
	}

	let content = fs::read_to_string(config_path)?;
	let mut config: Config = toml::from_str(&content)
		.map_err(|e| anyhow!("failed to parse config: {}", e))?;

	// Execute token_cmd if applicable, and put result in token
	if !expand_auth {
		return Ok(config);
	}

	if let Some(api) = &mut config.api {
		if api.token_cmd.is_some() && api.token.is_some() {
			bail!("Only one of api.token and api.token_cmd may be specified")
		}

		if let Some(token_cmd) = &api.token_cmd {
			let output = Command::new("sh")
				.arg("-c")
				.arg(token_cmd)
				.output()
				.map_err(|e| anyhow!("failed to execute token_cmd: {}", e))?;

			if output.status.success() {
				api.token = Some(
					String::from_utf8(output.stdout)
						.map_err(|e| {
							anyhow!("failed to parse command output: {}", e)
						})?
						.trim()
						.to_string(),
				);
			} else {
				bail!(
					"api token_cmd failed with status {}: {}",
					output.status,
					String::from_utf8_lossy(&output.stderr)
				);
			}
		}
	}

	Ok(config)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	fn write_temp_config(name: &str, content: &str) -> String {
		let path = std::env::temp_dir().join(name);
		let mut file = File::create(&path).unwrap();
		file.write_all(content.as_bytes()).unwrap();
		path.to_string_lossy().to_string()
	}

	#[test]
	fn test_parse_config() {
		let path = write_temp_config(
			"rentr_test_config.toml",
			r#"
[api]
url = "http://localhost:8000"
token = "abc"
user_id = 10
role = "landlord"
property = 3
"#,
		);

		let config = get_config(Some(&path), true).unwrap();
		let api = config.api.unwrap();
		assert_eq!(api.url.as_deref(), Some("http://localhost:8000"));
		assert_eq!(api.token.as_deref(), Some("abc"));
		assert_eq!(api.user_id, Some(10));
		assert_eq!(api.property, Some(3));
	}

	#[test]
	fn test_token_and_token_cmd_conflict() {
		let path = write_temp_config(
			"rentr_test_config_conflict.toml",
			r#"
[api]
token = "abc"
token_cmd = "echo def"
"#,
		);

		assert!(get_config(Some(&path), true).is_err());
	}

	#[test]
	fn test_token_cmd_not_expanded_when_not_needed() {
		let path = write_temp_config(
			"rentr_test_config_noexpand.toml",
			r#"
[api]
token_cmd = "exit 1"
"#,
		);

		// must not run the command at all
		let config = get_config(Some(&path), false).unwrap();
		assert!(config.api.unwrap().token.is_none());
	}
}
