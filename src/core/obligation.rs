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
use crate::core::error::{CoreError, Result};
use crate::util::amount::Amount;
use crate::util::date::Date;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two parties to any rental arrangement. Everything in the system is
/// viewed through the lens of one of these roles, and income/expense
/// polarity is relative to the viewer's role, never absolute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
	Tenant,
	Landlord,
}

impl Role {
	pub fn from_str(s: &str) -> Result<Self> {
		match s {
			"tenant" => Ok(Role::Tenant),
			"landlord" => Ok(Role::Landlord),
			_ => Err(CoreError::Validation(format!(
				"role must be tenant or landlord, got {}",
				s
			))),
		}
	}
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Role::Tenant => write!(f, "tenant"),
			Role::Landlord => write!(f, "landlord"),
		}
	}
}

/// Obligations come in two flavors: transactions, created by landlords,
/// which carry money amounts; and tenant requests, which do not.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObligationKind {
	Transaction,
	Request,
}

/// A shared obligation before the store has assigned it an identity.
#[derive(Clone, Debug)]
pub struct ObligationDraft {
	pub kind: ObligationKind,
	/// Classification bucket, e.g. "Rent" or "Repairs". Exact string,
	/// case-sensitive; the aggregator groups on it verbatim.
	pub type_name: String,
	pub title: String,
	pub description: String,
	pub amount: Option<Amount>,
	pub due_date: Date,
	pub payee_role: Role,
	pub is_visible_to_tenants: bool,
}

impl ObligationDraft {
	/// Field validation before the draft goes anywhere near the store or
	/// the network. Catches everything that would otherwise surface as a
	/// nonsense record downstream.
	pub fn validate(&self) -> Result<()> {
		match self.kind {
			ObligationKind::Transaction => {
				if self.type_name.is_empty() {
					return Err(CoreError::Validation(
						"transaction type is required".to_string(),
					));
				}
				match &self.amount {
					None => {
						return Err(CoreError::Validation(
							"transaction amount is required".to_string(),
						))
					},
					Some(a) if !a.is_positive() => {
						return Err(CoreError::Validation(format!(
							"transaction amount must be positive, got {}",
							a
						)))
					},
					Some(_) => {},
				}
			},
			ObligationKind::Request => {
				if self.title.is_empty() {
					return Err(CoreError::Validation(
						"request title is required".to_string(),
					));
				}
				if self.amount.is_some() {
					return Err(CoreError::Validation(
						"requests do not carry amounts".to_string(),
					));
				}
			},
		}

		Ok(())
	}
}

/// A stored obligation. The id is assigned once by the store and is
/// immutable for the record's lifetime; updates replace every other field.
#[derive(Clone, Debug)]
pub struct Obligation {
	pub id: u64,
	pub kind: ObligationKind,
	pub type_name: String,
	pub title: String,
	pub description: String,
	pub amount: Option<Amount>,
	pub due_date: Date,
	pub payee_role: Role,
	pub is_visible_to_tenants: bool,
}

impl Obligation {
	pub fn from_draft(id: u64, draft: ObligationDraft) -> Self {
		Self {
			id,
			kind: draft.kind,
			type_name: draft.type_name,
			title: draft.title,
			description: draft.description,
			amount: draft.amount,
			due_date: draft.due_date,
			payee_role: draft.payee_role,
			is_visible_to_tenants: draft.is_visible_to_tenants,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	pub fn transaction_draft(type_name: &str, amount: &str) -> ObligationDraft {
		ObligationDraft {
			kind: ObligationKind::Transaction,
			type_name: type_name.to_string(),
			title: String::new(),
			description: String::new(),
			amount: Some(Amount::from_str(amount).unwrap()),
			due_date: Date::from_str("2024-03-01").unwrap(),
			payee_role: Role::Tenant,
			is_visible_to_tenants: true,
		}
	}

	#[test]
	fn test_role_round_trip() {
		assert_eq!(Role::from_str("tenant").unwrap(), Role::Tenant);
		assert_eq!(Role::from_str("landlord").unwrap(), Role::Landlord);
		assert!(Role::from_str("manager").is_err());
		assert_eq!(Role::Tenant.to_string(), "tenant");
	}

	#[test]
	fn test_valid_transaction_draft() {
		assert!(transaction_draft("Rent", "1000").validate().is_ok());
	}

	#[test]
	fn test_transaction_requires_positive_amount() {
		let mut draft = transaction_draft("Rent", "1000");
		draft.amount = Some(Amount::zero());
		assert!(draft.validate().is_err());

		draft.amount = Some(Amount::from_str("-5").unwrap());
		assert!(draft.validate().is_err());

		draft.amount = None;
		assert!(draft.validate().is_err());
	}

	#[test]
	fn test_transaction_requires_type() {
		let draft = transaction_draft("", "1000");
		assert!(draft.validate().is_err());
	}

	#[test]
	fn test_request_rules() {
		let mut draft = ObligationDraft {
			kind: ObligationKind::Request,
			type_name: String::new(),
			title: "Leaky faucet".to_string(),
			description: "The kitchen faucet drips".to_string(),
			amount: None,
			due_date: Date::from_str("2024-03-05").unwrap(),
			payee_role: Role::Landlord,
			is_visible_to_tenants: true,
		};
		assert!(draft.validate().is_ok());

		draft.amount = Some(Amount::from_str("10").unwrap());
		assert!(draft.validate().is_err());

		draft.amount = None;
		draft.title = String::new();
		assert!(draft.validate().is_err());
	}
}
