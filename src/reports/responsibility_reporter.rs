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
use crate::api::models::ResponsibilityDto;
use crate::reports::table::Table;

/// Prints the standing duties attached to a property. Optional fields
/// render as blank cells rather than placeholders.
pub struct ResponsibilityReporter {
	responsibilities: Vec<ResponsibilityDto>,
}

impl ResponsibilityReporter {
	pub fn new(responsibilities: Vec<ResponsibilityDto>) -> Self {
		Self { responsibilities }
	}

	pub fn print(&self) {
		if self.responsibilities.is_empty() {
			println!("No responsibilities to display.");
			return;
		}

		let mut table = Table::new(4);
		table.add_header(vec!["Id", "Title", "Description", "Due"]);
		table.add_separator();
		table.right_align(vec![0]);

		for r in &self.responsibilities {
			table.add_row(vec![
				r.id.to_string(),
				r.title.clone(),
				r.description.clone().unwrap_or_default(),
				r.due_date.clone().unwrap_or_default(),
			]);
		}

		table.print();
	}
}
