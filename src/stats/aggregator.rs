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
use crate::core::obligation::{Obligation, ObligationKind, Role};
use crate::util::amount::Amount;
use crate::util::date::Period;
use std::collections::BTreeSet;

/// Money direction relative to whoever is looking. The payee role names
/// the party that owes the money, so an obligation the other party owes
/// is income to the viewer, and one the viewer owes is an expense.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Polarity {
	Income,
	Expense,
}

pub fn classify(obligation: &Obligation, viewer: Role) -> Polarity {
	if obligation.payee_role == viewer {
		Polarity::Expense
	} else {
		Polarity::Income
	}
}

/// One named, summed bucket in a report. Ephemeral; recomputed from the
/// obligation set on every view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slice {
	pub name: String,
	pub value: Amount,
}

/// Everything a monthly statement needs: per-type slices in both
/// directions, plus period totals.
#[derive(Debug)]
pub struct MonthlyStatistics {
	pub period: Period,
	pub incomes: Vec<Slice>,
	pub expenses: Vec<Slice>,
	pub total_income: Amount,
	pub total_expense: Amount,
	pub balance: Amount,
}

/// Builds the monthly statement for one viewer. Only transactions carry
/// amounts, so requests never contribute to the sums.
pub fn aggregate(
	obligations: &[&Obligation],
	viewer: Role,
	period: &Period,
) -> MonthlyStatistics {
	let in_period: Vec<&Obligation> = obligations
		.iter()
		.copied()
		.filter(|o| {
			o.kind == ObligationKind::Transaction
				&& period.contains(&o.due_date)
		})
		.collect();

	let incomes: Vec<&Obligation> = in_period
		.iter()
		.copied()
		.filter(|o| classify(o, viewer) == Polarity::Income)
		.collect();
	let expenses: Vec<&Obligation> = in_period
		.iter()
		.copied()
		.filter(|o| classify(o, viewer) == Polarity::Expense)
		.collect();

	let total_income = incomes.iter().filter_map(|o| o.amount).sum();
	let total_expense = expenses.iter().filter_map(|o| o.amount).sum();

	MonthlyStatistics {
		period: *period,
		incomes: aggregate_by_type(&incomes),
		expenses: aggregate_by_type(&expenses),
		total_income,
		total_expense,
		balance: total_income - total_expense,
	}
}

/// Groups by exact type string, case-sensitive, summing amounts. Output
/// is descending by summed value; ties keep first-encountered order,
/// which the stable sort guarantees.
fn aggregate_by_type(obligations: &[&Obligation]) -> Vec<Slice> {
	let mut slices: Vec<Slice> = Vec::new();

	for o in obligations {
		let amount = match o.amount {
			Some(a) => a,
			None => continue,
		};

		match slices.iter_mut().find(|s| s.name == o.type_name) {
			Some(slice) => slice.value += amount,
			None => slices.push(Slice {
				name: o.type_name.clone(),
				value: amount,
			}),
		}
	}

	slices.sort_by(|a, b| b.value.cmp(&a.value));
	slices
}

/// The set of months worth offering in a period selector: every distinct
/// due-date month present in the data, plus the current month, sorted
/// latest first.
pub fn month_options(obligations: &[&Obligation]) -> Vec<Period> {
	let mut months: BTreeSet<Period> = obligations
		.iter()
		.filter(|o| o.kind == ObligationKind::Transaction)
		.map(|o| Period::of(&o.due_date))
		.collect();
	months.insert(Period::current());

	months.into_iter().rev().collect()
}

/// Keeps only obligations every designated confirmer has resolved.
/// Obligations with no confirmers at all are excluded, consistent with
/// the ledger's definition of fully resolved.
pub fn settled_only<'a>(
	obligations: &[&'a Obligation],
	ledger: &ResolutionLedger,
) -> Vec<&'a Obligation> {
	obligations
		.iter()
		.filter(|o| ledger.is_fully_resolved(o.id))
		.copied()
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::core::ledger::Confirmer;
	use crate::util::date::Date;

	fn transaction(
		id: u64,
		type_name: &str,
		amount: &str,
		due: &str,
		payee: Role,
	) -> Obligation {
		Obligation {
			id,
			kind: ObligationKind::Transaction,
			type_name: type_name.to_string(),
			title: String::new(),
			description: String::new(),
			amount: Some(Amount::from_str(amount).unwrap()),
			due_date: Date::from_str(due).unwrap(),
			payee_role: payee,
			is_visible_to_tenants: true,
		}
	}

	fn march() -> Period {
		Period::from_str("2024-03").unwrap()
	}

	#[test]
	fn test_classify_is_viewer_relative() {
		let o = transaction(1, "Rent", "1000", "2024-03-01", Role::Tenant);
		assert_eq!(classify(&o, Role::Landlord), Polarity::Income);
		assert_eq!(classify(&o, Role::Tenant), Polarity::Expense);
	}

	#[test]
	fn test_aggregate_reference_case() {
		// two rent payments and a repair bill, viewed as the landlord
		let a = transaction(1, "Rent", "1000", "2024-03-01", Role::Tenant);
		let b = transaction(2, "Rent", "500", "2024-03-15", Role::Tenant);
		let c = transaction(3, "Repairs", "200", "2024-03-10", Role::Landlord);

		let stats = aggregate(&[&a, &b, &c], Role::Landlord, &march());

		assert_eq!(
			stats.incomes,
			vec![Slice {
				name: "Rent".to_string(),
				value: Amount::from_str("1500").unwrap(),
			}]
		);
		assert_eq!(
			stats.expenses,
			vec![Slice {
				name: "Repairs".to_string(),
				value: Amount::from_str("200").unwrap(),
			}]
		);
		assert_eq!(stats.total_income, Amount::from_str("1500").unwrap());
		assert_eq!(stats.total_expense, Amount::from_str("200").unwrap());
		assert_eq!(stats.balance, Amount::from_str("1300").unwrap());
	}

	#[test]
	fn test_aggregate_empty_input() {
		let stats = aggregate(&[], Role::Landlord, &march());
		assert!(stats.incomes.is_empty());
		assert!(stats.expenses.is_empty());
		assert_eq!(stats.total_income, Amount::zero());
		assert_eq!(stats.total_expense, Amount::zero());
		assert_eq!(stats.balance, Amount::zero());
	}

	#[test]
	fn test_aggregate_single_type_equals_total() {
		let a = transaction(1, "Rent", "700", "2024-03-01", Role::Tenant);
		let b = transaction(2, "Rent", "300", "2024-03-20", Role::Tenant);

		let stats = aggregate(&[&a, &b], Role::Landlord, &march());
		assert_eq!(stats.incomes.len(), 1);
		assert_eq!(stats.incomes[0].value, stats.total_income);
	}

	#[test]
	fn test_month_filter_is_calendar_equality() {
		// late February and early April must both fall outside March
		let feb = transaction(1, "Rent", "100", "2024-02-29", Role::Tenant);
		let mar = transaction(2, "Rent", "200", "2024-03-31", Role::Tenant);
		let apr = transaction(3, "Rent", "300", "2024-04-01", Role::Tenant);

		let stats = aggregate(&[&feb, &mar, &apr], Role::Landlord, &march());
		assert_eq!(stats.total_income, Amount::from_str("200").unwrap());
	}

	#[test]
	fn test_sort_descending_ties_keep_encounter_order() {
		let a = transaction(1, "Water", "100", "2024-03-01", Role::Tenant);
		let b = transaction(2, "Gas", "100", "2024-03-02", Role::Tenant);
		let c = transaction(3, "Rent", "900", "2024-03-03", Role::Tenant);

		let stats = aggregate(&[&a, &b, &c], Role::Landlord, &march());
		let names: Vec<&str> =
			stats.incomes.iter().map(|s| s.name.as_str()).collect();
		assert_eq!(names, vec!["Rent", "Water", "Gas"]);
	}

	#[test]
	fn test_type_grouping_is_case_sensitive() {
		let a = transaction(1, "Rent", "100", "2024-03-01", Role::Tenant);
		let b = transaction(2, "rent", "50", "2024-03-02", Role::Tenant);

		let stats = aggregate(&[&a, &b], Role::Landlord, &march());
		assert_eq!(stats.incomes.len(), 2);
	}

	#[test]
	fn test_month_options_distinct_and_descending() {
		let a = transaction(1, "Rent", "100", "2024-03-01", Role::Tenant);
		let b = transaction(2, "Rent", "100", "2024-03-15", Role::Tenant);
		let c = transaction(3, "Rent", "100", "2023-12-01", Role::Tenant);

		let options = month_options(&[&a, &b, &c]);

		// distinct, newest first, current month always present
		assert!(options.contains(&Period::from_str("2024-03").unwrap()));
		assert!(options.contains(&Period::from_str("2023-12").unwrap()));
		assert!(options.contains(&Period::current()));
		let mut sorted = options.clone();
		sorted.sort_by(|a, b| b.cmp(a));
		assert_eq!(options, sorted);
		assert_eq!(
			options.iter().collect::<std::collections::BTreeSet<_>>().len(),
			options.len()
		);
	}

	#[test]
	fn test_settled_only() {
		let mut ledger = ResolutionLedger::new();
		let a = transaction(1, "Rent", "100", "2024-03-01", Role::Tenant);
		let b = transaction(2, "Rent", "100", "2024-03-02", Role::Tenant);
		let c = transaction(3, "Rent", "100", "2024-03-03", Role::Tenant);

		// a: resolved; b: still pending; c: no confirmers at all
		for (obligation_id, resolve) in [(1, true), (2, false)] {
			ledger
				.add_confirmer(
					obligation_id,
					Confirmer {
						user_id: 10,
						user_name: "Ada".to_string(),
						user_role: Role::Tenant,
					},
				)
				.unwrap();
			if resolve {
				ledger.toggle_own(obligation_id, 10).unwrap();
			}
		}

		let settled = settled_only(&[&a, &b, &c], &ledger);
		let ids: Vec<u64> = settled.iter().map(|o| o.id).collect();
		assert_eq!(ids, vec![1]);
	}
}
