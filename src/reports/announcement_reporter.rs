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
use crate::api::models::AnnouncementDto;
use crate::reports::table::Table;

pub struct AnnouncementReporter {
	announcements: Vec<AnnouncementDto>,
}

impl AnnouncementReporter {
	pub fn new(announcements: Vec<AnnouncementDto>) -> Self {
		Self { announcements }
	}

	pub fn print(&self) {
		if self.announcements.is_empty() {
			println!("No announcements to display.");
			return;
		}

		let mut table = Table::new(3);
		table.add_header(vec!["Id", "Title", "Message"]);
		table.add_separator();
		table.right_align(vec![0]);

		for a in &self.announcements {
			table.add_row(vec![
				a.id.to_string(),
				a.title.clone(),
				a.message.clone(),
			]);
		}

		table.print();
	}
}
