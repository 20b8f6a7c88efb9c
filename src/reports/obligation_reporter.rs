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
use crate::core::obligation::{Obligation, ObligationKind};
use crate::reports::table::Table;

/// Prints obligation listings. Transactions and requests share a table
/// shape; request rows leave the amount column blank since requests
/// carry no money.
pub struct ObligationReporter {
	obligations: Vec<Obligation>,
}

impl ObligationReporter {
	pub fn new(obligations: Vec<Obligation>) -> Self {
		Self { obligations }
	}

	pub fn print(&self) {
		if self.obligations.is_empty() {
			println!("Nothing to display.");
			return;
		}

		let mut table = Table::new(6);
		table.add_header(vec![
			"Id", "Kind", "Name", "Amount", "Due", "Payee",
		]);
		table.add_separator();
		table.right_align(vec![0, 3]);

		for o in &self.obligations {
			let (kind, name) = match o.kind {
				ObligationKind::Transaction => {
					("txn", o.type_name.clone())
				},
				ObligationKind::Request => ("req", o.title.clone()),
			};

			table.add_row(vec![
				o.id.to_string(),
				kind.to_string(),
				name,
				o.amount.map(|a| a.to_string()).unwrap_or_default(),
				o.due_date.to_string(),
				o.payee_role.to_string(),
			]);
		}

		table.print();
	}
}
