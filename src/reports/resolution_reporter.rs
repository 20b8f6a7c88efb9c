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
use crate::core::ledger::ResolutionLedger;
use crate::reports::table::Table;

/// Prints the confirmer checklist for one obligation, in the order the
/// confirmers were designated, with the derived settled status last.
pub struct ResolutionReporter<'a> {
	ledger: &'a ResolutionLedger,
}

impl<'a> ResolutionReporter<'a> {
	pub fn new(ledger: &'a ResolutionLedger) -> Self {
		Self { ledger }
	}

	pub fn print(&self, obligation_id: u64) {
		let resolutions = self.ledger.resolutions(obligation_id);

		if resolutions.is_empty() {
			println!("No confirmers designated for obligation {}.", obligation_id);
			return;
		}

		let mut table = Table::new(3);
		table.add_header(vec!["User", "Role", "Status"]);
		table.add_separator();

		for r in &resolutions {
			table.add_row(vec![
				r.user_name.clone(),
				r.user_role.to_string(),
				r.status.to_string(),
			]);
		}

		table.print();

		println!();
		if self.ledger.is_fully_resolved(obligation_id) {
			println!("Fully resolved.");
		} else {
			println!("Not fully resolved.");
		}
	}
}
