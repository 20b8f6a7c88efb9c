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
use crate::core::ledger::ResolutionLedger;
use crate::core::obligation::{
	Obligation, ObligationDraft, ObligationKind, Role,
};
use std::collections::BTreeMap;

/// The obligation collection itself. Owns every Obligation; resolutions
/// live in the ResolutionLedger and reference obligations by id only.
///
/// Identity is assigned here, once, and never reused within a store's
/// lifetime even after deletions.
#[derive(Debug, Default)]
pub struct ObligationStore {
	obligations: BTreeMap<u64, Obligation>,
	next_id: u64,
}

impl ObligationStore {
	pub fn new() -> Self {
		Self {
			obligations: BTreeMap::new(),
			next_id: 1,
		}
	}

	/// Validates and stores a draft, assigning its identity. Returns the
	/// stored record.
	pub fn create(&mut self, draft: ObligationDraft) -> Result<&Obligation> {
		draft.validate()?;

		let id = self.next_id;
		self.next_id += 1;

		self.obligations.insert(id, Obligation::from_draft(id, draft));
		Ok(&self.obligations[&id])
	}

	/// Mirrors a record fetched from the backend, which already has an
	/// identity. Keeps the local id counter ahead of anything inserted.
	pub fn insert_fetched(&mut self, obligation: Obligation) {
		self.next_id = self.next_id.max(obligation.id + 1);
		self.obligations.insert(obligation.id, obligation);
	}

	/// Full-replace update: every field except the id is taken from the
	/// draft. Last write wins; there is no version check.
	pub fn update(
		&mut self,
		id: u64,
		draft: ObligationDraft,
	) -> Result<&Obligation> {
		draft.validate()?;

		if !self.obligations.contains_key(&id) {
			return Err(CoreError::NotFound("obligation"));
		}

		self.obligations.insert(id, Obligation::from_draft(id, draft));
		Ok(&self.obligations[&id])
	}

	/// Removes an obligation and all of its resolutions. The two removals
	/// are a single operation; callers never observe an obligation gone
	/// while its resolutions linger, or vice versa.
	pub fn delete(
		&mut self,
		id: u64,
		ledger: &mut ResolutionLedger,
	) -> Result<()> {
		if self.obligations.remove(&id).is_none() {
			return Err(CoreError::NotFound("obligation"));
		}

		ledger.remove_all(id);
		Ok(())
	}

	pub fn get(&self, id: u64) -> Result<&Obligation> {
		self.obligations
			.get(&id)
			.ok_or(CoreError::NotFound("obligation"))
	}

	/// Everything the given role may see. Landlords see all; tenants do
	/// not see transactions flagged invisible to them. Requests are
	/// always visible to both parties.
	pub fn visible_to(&self, role: Role) -> Vec<&Obligation> {
		self.obligations
			.values()
			.filter(|o| match role {
				Role::Landlord => true,
				Role::Tenant => {
					o.kind != ObligationKind::Transaction
						|| o.is_visible_to_tenants
				},
			})
			.collect()
	}

	pub fn all(&self) -> Vec<&Obligation> {
		self.obligations.values().collect()
	}

	pub fn len(&self) -> usize {
		self.obligations.len()
	}

	pub fn is_empty(&self) -> bool {
		self.obligations.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::core::ledger::Confirmer;
	use crate::util::amount::Amount;
	use crate::util::date::Date;

	fn transaction(type_name: &str, amount: &str) -> ObligationDraft {
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
	fn test_create_assigns_identity() {
		let mut store = ObligationStore::new();
		let a = store.create(transaction("Rent", "1000")).unwrap().id;
		let b = store.create(transaction("Repairs", "200")).unwrap().id;
		assert_ne!(a, b);
		assert_eq!(store.len(), 2);
	}

	#[test]
	fn test_create_rejects_invalid_draft() {
		let mut store = ObligationStore::new();
		let mut draft = transaction("Rent", "1000");
		draft.amount = None;

		let err = store.create(draft).unwrap_err();
		assert!(matches!(err, CoreError::Validation(_)));
		assert!(store.is_empty());
	}

	#[test]
	fn test_update_replaces_fields_but_not_id() {
		let mut store = ObligationStore::new();
		let id = store.create(transaction("Rent", "1000")).unwrap().id;

		let updated = store.update(id, transaction("Rent", "1200")).unwrap();
		assert_eq!(updated.id, id);
		assert_eq!(updated.amount, Some(Amount::from_str("1200").unwrap()));
		assert_eq!(store.len(), 1);
	}

	#[test]
	fn test_update_missing_is_not_found() {
		let mut store = ObligationStore::new();
		let err = store.update(42, transaction("Rent", "1000")).unwrap_err();
		assert!(matches!(err, CoreError::NotFound(_)));
	}

	#[test]
	fn test_delete_cascades_to_resolutions() {
		let mut store = ObligationStore::new();
		let mut ledger = ResolutionLedger::new();

		let id = store.create(transaction("Rent", "1000")).unwrap().id;
		ledger
			.add_confirmer(
				id,
				Confirmer {
					user_id: 10,
					user_name: "Ada".to_string(),
					user_role: Role::Tenant,
				},
			)
			.unwrap();
		ledger
			.add_confirmer(
				id,
				Confirmer {
					user_id: 20,
					user_name: "Lin".to_string(),
					user_role: Role::Landlord,
				},
			)
			.unwrap();

		store.delete(id, &mut ledger).unwrap();

		// both sides gone, nothing stale
		assert!(store.get(id).is_err());
		assert!(ledger.resolutions(id).is_empty());
		assert!(!ledger.is_fully_resolved(id));
	}

	#[test]
	fn test_delete_missing_is_not_found() {
		let mut store = ObligationStore::new();
		let mut ledger = ResolutionLedger::new();
		let err = store.delete(42, &mut ledger).unwrap_err();
		assert!(matches!(err, CoreError::NotFound(_)));
	}

	#[test]
	fn test_settlement_workflow_round_trip() {
		use crate::core::ledger::ResolutionStatus;
		use crate::stats::aggregator::{aggregate, settled_only};
		use crate::util::date::Period;

		let mut store = ObligationStore::new();
		let mut ledger = ResolutionLedger::new();

		let ada = Confirmer {
			user_id: 10,
			user_name: "Ada".to_string(),
			user_role: Role::Tenant,
		};
		let lin = Confirmer {
			user_id: 20,
			user_name: "Lin".to_string(),
			user_role: Role::Tenant,
		};

		let id = store.create(transaction("Rent", "1000")).unwrap().id;
		ledger.add_confirmer(id, ada).unwrap();
		ledger.add_confirmer(id, lin.clone()).unwrap();
		assert_eq!(ledger.resolutions(id).len(), 2);

		// one confirmer resolves, then is withdrawn and re-designated;
		// the re-added resolution starts over as pending
		ledger.toggle_own(id, 20).unwrap();
		ledger.remove_confirmer(id, 20).unwrap();
		assert_eq!(ledger.resolutions(id).len(), 1);

		ledger.add_confirmer(id, lin).unwrap();
		let re_added = ledger.resolutions(id)[1];
		assert_eq!(re_added.status, ResolutionStatus::Pending);

		// not settled until everyone has resolved
		let period = Period::from_str("2024-03").unwrap();
		let visible = store.visible_to(Role::Landlord);
		assert!(settled_only(&visible, &ledger).is_empty());

		ledger.toggle_own(id, 10).unwrap();
		ledger.toggle_own(id, 20).unwrap();
		assert!(ledger.is_fully_resolved(id));

		let settled = settled_only(&visible, &ledger);
		let stats = aggregate(&settled, Role::Landlord, &period);
		assert_eq!(
			stats.total_income,
			Amount::from_str("1000").unwrap()
		);
	}

	#[test]
	fn test_visibility_filtering() {
		let mut store = ObligationStore::new();
		store.create(transaction("Rent", "1000")).unwrap();

		let mut hidden = transaction("Deposit", "500");
		hidden.is_visible_to_tenants = false;
		store.create(hidden).unwrap();

		let request = ObligationDraft {
			kind: ObligationKind::Request,
			type_name: String::new(),
			title: "Leaky faucet".to_string(),
			description: "drips".to_string(),
			amount: None,
			due_date: Date::from_str("2024-03-05").unwrap(),
			payee_role: Role::Landlord,
			is_visible_to_tenants: true,
		};
		store.create(request).unwrap();

		assert_eq!(store.visible_to(Role::Landlord).len(), 3);

		let tenant_view = store.visible_to(Role::Tenant);
		assert_eq!(tenant_view.len(), 2);
		assert!(tenant_view.iter().all(|o| o.type_name != "Deposit"));
	}
}
