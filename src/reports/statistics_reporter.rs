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
use crate::reports::table::Table;
use crate::stats::aggregator::{MonthlyStatistics, Slice};
use crate::util::amount::Amount;

/// Prints the monthly statement: period totals and balance, then one
/// table per money direction with each type's share of that direction's
/// total and its assigned color.
pub struct StatisticsReporter {
	stats: MonthlyStatistics,
	income_colors: Vec<String>,
	expense_colors: Vec<String>,
}

impl StatisticsReporter {
	pub fn new(
		stats: MonthlyStatistics,
		income_colors: Vec<String>,
		expense_colors: Vec<String>,
	) -> Self {
		Self {
			stats,
			income_colors,
			expense_colors,
		}
	}

	pub fn print(&self) {
		println!("Statistics for {}", self.stats.period);
		println!();
		println!("Monthly income:   {}", self.stats.total_income);
		println!("Monthly expense:  {}", self.stats.total_expense);
		println!("Monthly balance:  {}", self.stats.balance);

		Self::print_direction(
			"Incomes",
			&self.stats.incomes,
			&self.stats.total_income,
			&self.income_colors,
		);
		Self::print_direction(
			"Expenses",
			&self.stats.expenses,
			&self.stats.total_expense,
			&self.expense_colors,
		);
	}

	fn print_direction(
		label: &str,
		slices: &[Slice],
		total: &Amount,
		colors: &[String],
	) {
		println!();
		if slices.is_empty() {
			println!("No {} to display.", label.to_lowercase());
			return;
		}

		println!("{}", label);

		let mut table = Table::new(4);
		table.add_header(vec!["Type", "Amount", "Share", "Color"]);
		table.add_separator();
		table.right_align(vec![1, 2]);

		for (i, slice) in slices.iter().enumerate() {
			table.add_row(vec![
				slice.name.clone(),
				slice.value.to_string(),
				format!("{:.1}%", share_percent(&slice.value, total)),
				colors.get(i).cloned().unwrap_or_default(),
			]);
		}

		table.print();
	}
}

fn share_percent(value: &Amount, total: &Amount) -> f64 {
	if total.is_zero() {
		return 0.0;
	}
	value.to_f64() / total.to_f64() * 100.0
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_share_percent() {
		let value = Amount::from_str("250").unwrap();
		let total = Amount::from_str("1000").unwrap();
		assert_eq!(share_percent(&value, &total), 25.0);
	}

	#[test]
	fn test_share_percent_zero_total() {
		let value = Amount::zero();
		assert_eq!(share_percent(&value, &Amount::zero()), 0.0);
	}
}
