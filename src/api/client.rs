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
use crate::api::http::Client;
use crate::api::models::{
	AnnouncementDto, AnnouncementParams, PropertyDto, RequestParams,
	ResolutionDto, ResolutionParams, ResponsibilityDto, ResponsibilityParams,
	TenantRequestDto, TransactionDto, TransactionParams, UserDto,
};
use crate::api::session::Session;
use crate::core::error::{CoreError, Result};
use crate::core::ledger::{Confirmer, Resolution};
use crate::core::obligation::{Obligation, ObligationDraft, ObligationKind};
use serde_json::Value;

/// All backend operations the tool performs, expressed in domain terms.
/// Owns the HTTP client and the caller's session; nothing else in the
/// program touches the network.
pub struct RentalApi {
	http: Client,
	session: Session,
}

/// Outcome of creating an obligation together with its confirmer set.
/// The obligation itself exists even when some confirmer designations
/// failed; those failures are carried here, per confirmer, so the caller
/// can surface every one of them.
pub struct FanOutReport {
	pub obligation_id: u64,
	pub failures: Vec<(Confirmer, CoreError)>,
}

impl FanOutReport {
	pub fn all_succeeded(&self) -> bool {
		self.failures.is_empty()
	}
}

impl RentalApi {
	pub fn new(base_url: &str, session: Session) -> Self {
		Self {
			http: Client::new(base_url, session.token.clone()),
			session,
		}
	}

	pub fn session(&self) -> &Session {
		&self.session
	}

	// -------------
	// -- READING --
	// -------------

	/// Transactions for a property. The backend already filters what the
	/// caller's role may see. A 404 means no transactions, not a failure.
	pub fn transactions(&self, property_id: u64) -> Result<Vec<Obligation>> {
		let dtos: Vec<TransactionDto> = match self
			.http
			.get(&format!("transactions/{}", property_id))
		{
			Err(CoreError::NotFound(_)) => vec![],
			other => other?,
		};

		dtos.into_iter().map(|d| d.into_obligation()).collect()
	}

	/// Transactions across all of a landlord's properties where every
	/// confirmer has resolved. Feeds the statistics view.
	pub fn settled_transactions(&self) -> Result<Vec<Obligation>> {
		let dtos: Vec<TransactionDto> =
			match self.http.get("all-resolved-transactions") {
				Err(CoreError::NotFound(_)) => vec![],
				other => other?,
			};

		dtos.into_iter().map(|d| d.into_obligation()).collect()
	}

	pub fn tenant_requests(&self, property_id: u64) -> Result<Vec<Obligation>> {
		let dtos: Vec<TenantRequestDto> = match self
			.http
			.get(&format!("tenant-request/{}", property_id))
		{
			Err(CoreError::NotFound(_)) => vec![],
			other => other?,
		};

		dtos.into_iter().map(|d| d.into_obligation()).collect()
	}

	/// All resolutions for one obligation, in the backend's listing
	/// order. Empty when the obligation has no confirmers.
	pub fn resolutions(
		&self,
		kind: ObligationKind,
		obligation_id: u64,
	) -> Result<Vec<Resolution>> {
		let endpoint = match kind {
			ObligationKind::Transaction => {
				format!("transaction-resolutions/{}", obligation_id)
			},
			ObligationKind::Request => {
				format!("request-resolutions/{}", obligation_id)
			},
		};

		let dtos: Vec<ResolutionDto> = match self.http.get(&endpoint) {
			Err(CoreError::NotFound(_)) => vec![],
			other => other?,
		};

		dtos.into_iter().map(|d| d.into_resolution()).collect()
	}

	pub fn tenants(&self, property_id: u64) -> Result<Vec<UserDto>> {
		match self
			.http
			.get(&format!("get-tenants-for-property/{}", property_id))
		{
			Err(CoreError::NotFound(_)) => Ok(vec![]),
			other => other,
		}
	}

	pub fn profile(&self) -> Result<UserDto> {
		self.http.get("users/me")
	}

	/// Every property the caller is attached to: owned ones for a
	/// landlord, tenanted ones for a tenant.
	pub fn properties(&self) -> Result<Vec<PropertyDto>> {
		match self.http.get("rental-properties") {
			Err(CoreError::NotFound(_)) => Ok(vec![]),
			other => other,
		}
	}

	pub fn announcements(
		&self,
		property_id: u64,
	) -> Result<Vec<AnnouncementDto>> {
		match self.http.get(&format!("announcements/{}", property_id)) {
			Err(CoreError::NotFound(_)) => Ok(vec![]),
			other => other,
		}
	}

	pub fn responsibilities(
		&self,
		property_id: u64,
	) -> Result<Vec<ResponsibilityDto>> {
		match self.http.get(&format!("responsibilities/{}", property_id)) {
			Err(CoreError::NotFound(_)) => Ok(vec![]),
			other => other,
		}
	}

	// -------------
	// -- WRITING --
	// -------------

	/// Creates an obligation, then designates each confirmer with its
	/// own call. The obligation is the anchor; confirmer designations
	/// that fail are collected and reported rather than aborting or
	/// disappearing.
	pub fn create_with_confirmers(
		&self,
		property_id: u64,
		draft: &ObligationDraft,
		confirmers: Vec<Confirmer>,
	) -> Result<FanOutReport> {
		// validation errors must surface before any network traffic
		draft.validate()?;

		let obligation_id = match draft.kind {
			ObligationKind::Transaction => {
				let created: TransactionDto = self.http.post(
					&format!("add-transaction/{}", property_id),
					&transaction_params(draft),
				)?;
				created.id
			},
			ObligationKind::Request => {
				let created: TenantRequestDto = self.http.post(
					&format!("add-tenant-request/{}", property_id),
					&request_params(draft),
				)?;
				created.id
			},
		};

		Ok(designate_confirmers(
			obligation_id,
			confirmers,
			|id, confirmer| self.add_confirmer(draft.kind, id, confirmer.user_id),
		))
	}

	pub fn update(
		&self,
		obligation_id: u64,
		draft: &ObligationDraft,
	) -> Result<()> {
		draft.validate()?;

		match draft.kind {
			ObligationKind::Transaction => {
				let _: TransactionDto = self.http.put(
					&format!("update-transaction/{}", obligation_id),
					&transaction_params(draft),
				)?;
			},
			ObligationKind::Request => {
				let _: TenantRequestDto = self.http.put(
					&format!("update-tenant-request/{}", obligation_id),
					&request_params(draft),
				)?;
			},
		}

		Ok(())
	}

	/// The backend removes the obligation's resolutions along with the
	/// obligation in the same operation.
	pub fn delete(
		&self,
		kind: ObligationKind,
		obligation_id: u64,
	) -> Result<()> {
		let endpoint = match kind {
			ObligationKind::Transaction => {
				format!("delete-transaction/{}", obligation_id)
			},
			ObligationKind::Request => {
				format!("delete-tenant-request/{}", obligation_id)
			},
		};
		self.http.delete(&endpoint)
	}

	pub fn add_confirmer(
		&self,
		kind: ObligationKind,
		obligation_id: u64,
		user_id: u64,
	) -> Result<()> {
		let (endpoint, params) = match kind {
			ObligationKind::Transaction => (
				"add-transaction-resolution",
				ResolutionParams {
					transaction_id: Some(obligation_id),
					request_id: None,
					user_id,
					status: "pending".to_string(),
				},
			),
			ObligationKind::Request => (
				"add-request-resolution",
				ResolutionParams {
					transaction_id: None,
					request_id: Some(obligation_id),
					user_id,
					status: "pending".to_string(),
				},
			),
		};

		let _: Value = self.http.post(endpoint, &params)?;
		Ok(())
	}

	pub fn remove_confirmer(
		&self,
		kind: ObligationKind,
		obligation_id: u64,
		user_id: u64,
	) -> Result<()> {
		let endpoint = match kind {
			ObligationKind::Transaction => format!(
				"remove-transaction-resolution/{}/{}",
				obligation_id, user_id
			),
			ObligationKind::Request => format!(
				"remove-request-resolution/{}/{}",
				obligation_id, user_id
			),
		};
		self.http.delete(&endpoint)
	}

	// Announcements and responsibilities are landlord-managed notices
	// with no resolution workflow; the backend rejects mutations from
	// tenants with a 403.

	pub fn create_announcement(
		&self,
		property_id: u64,
		params: &AnnouncementParams,
	) -> Result<AnnouncementDto> {
		self.http
			.post(&format!("add-announcement/{}", property_id), params)
	}

	pub fn update_announcement(
		&self,
		announcement_id: u64,
		params: &AnnouncementParams,
	) -> Result<AnnouncementDto> {
		self.http.put(
			&format!("update-announcement/{}", announcement_id),
			params,
		)
	}

	pub fn delete_announcement(&self, announcement_id: u64) -> Result<()> {
		self.http
			.delete(&format!("delete-announcement/{}", announcement_id))
	}

	pub fn create_responsibility(
		&self,
		property_id: u64,
		params: &ResponsibilityParams,
	) -> Result<ResponsibilityDto> {
		self.http
			.post(&format!("add-responsibility/{}", property_id), params)
	}

	pub fn update_responsibility(
		&self,
		responsibility_id: u64,
		params: &ResponsibilityParams,
	) -> Result<ResponsibilityDto> {
		self.http.put(
			&format!("update-responsibility/{}", responsibility_id),
			params,
		)
	}

	pub fn delete_responsibility(&self, responsibility_id: u64) -> Result<()> {
		self.http
			.delete(&format!("delete-responsibility/{}", responsibility_id))
	}

	/// Flips the caller's own resolution on the obligation. The backend
	/// identifies the resolution from the bearer token; there is no way
	/// to flip anyone else's.
	pub fn toggle_own_resolution(
		&self,
		kind: ObligationKind,
		obligation_id: u64,
	) -> Result<()> {
		let endpoint = match kind {
			ObligationKind::Transaction => {
				format!("resolve-transaction/{}", obligation_id)
			},
			ObligationKind::Request => {
				format!("resolve-tenant-request/{}", obligation_id)
			},
		};
		let _: Value = self.http.put_empty(&endpoint)?;
		Ok(())
	}
}

fn transaction_params(draft: &ObligationDraft) -> TransactionParams {
	TransactionParams {
		typ: draft.type_name.clone(),
		amount: draft
			.amount
			.map(|a| a.to_string())
			.unwrap_or_default(),
		due_date: draft.due_date.to_string(),
		payee_role: draft.payee_role.to_string(),
		is_visible_to_tenants: draft.is_visible_to_tenants,
	}
}

fn request_params(draft: &ObligationDraft) -> RequestParams {
	RequestParams {
		title: draft.title.clone(),
		description: draft.description.clone(),
		request_date: draft.due_date.to_string(),
	}
}

/// Runs one designation call per confirmer, collecting failures instead
/// of stopping at the first. Factored out of the client so the partial
/// failure behavior is testable without a backend.
fn designate_confirmers<F>(
	obligation_id: u64,
	confirmers: Vec<Confirmer>,
	mut add: F,
) -> FanOutReport
where
	F: FnMut(u64, &Confirmer) -> Result<()>,
{
	let mut failures = vec![];

	for confirmer in confirmers {
		if let Err(e) = add(obligation_id, &confirmer) {
			failures.push((confirmer, e));
		}
	}

	FanOutReport {
		obligation_id,
		failures,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::core::obligation::Role;

	fn confirmer(user_id: u64, name: &str) -> Confirmer {
		Confirmer {
			user_id,
			user_name: name.to_string(),
			user_role: Role::Tenant,
		}
	}

	#[test]
	fn test_fan_out_all_succeed() {
		let confirmers =
			vec![confirmer(1, "Ada"), confirmer(2, "Lin"), confirmer(3, "Sam")];
		let mut calls = 0;

		let report = designate_confirmers(7, confirmers, |id, _| {
			assert_eq!(id, 7);
			calls += 1;
			Ok(())
		});

		assert_eq!(calls, 3);
		assert!(report.all_succeeded());
		assert_eq!(report.obligation_id, 7);
	}

	#[test]
	fn test_fan_out_reports_each_failure_and_keeps_going() {
		let confirmers =
			vec![confirmer(1, "Ada"), confirmer(2, "Lin"), confirmer(3, "Sam")];

		let report = designate_confirmers(7, confirmers, |_, c| {
			if c.user_id == 2 {
				Err(CoreError::NetworkOrServer("timeout".to_string()))
			} else {
				Ok(())
			}
		});

		// the later confirmer was still attempted
		assert_eq!(report.failures.len(), 1);
		assert_eq!(report.failures[0].0.user_name, "Lin");
		assert!(!report.all_succeeded());
	}

	#[test]
	fn test_fan_out_with_no_confirmers() {
		let report = designate_confirmers(7, vec![], |_, _| {
			panic!("must not be called")
		});
		assert!(report.all_succeeded());
	}
}
