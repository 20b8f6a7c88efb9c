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
use crate::core::obligation::Role;
use std::fmt;

/// A user designated to confirm an obligation. Carried denormalized so
/// that listings can show names and roles without a directory lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Confirmer {
	pub user_id: u64,
	pub user_name: String,
	pub user_role: Role,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolutionStatus {
	Pending,
	Resolved,
}

impl fmt::Display for ResolutionStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ResolutionStatus::Pending => write!(f, "pending"),
			ResolutionStatus::Resolved => write!(f, "resolved"),
		}
	}
}

/// One confirmer's standing on one obligation. Exactly one of these may
/// exist per (obligation, user) pair; that uniqueness is enforced by the
/// ledger on insert, not assumed.
#[derive(Clone, Debug)]
pub struct Resolution {
	pub id: u64,
	pub obligation_id: u64,
	pub user_id: u64,
	pub user_name: String,
	pub user_role: Role,
	pub status: ResolutionStatus,
}

/// Tracks the confirmer set and per-confirmer status for every obligation.
/// Resolutions are kept in insertion order, which is the order listings
/// present them in.
///
/// "Fully resolved" is always derived from the current set on read; it is
/// never cached, so there is no invalidation to get wrong.
#[derive(Debug, Default)]
pub struct ResolutionLedger {
	resolutions: Vec<Resolution>,
	next_id: u64,
}

impl ResolutionLedger {
	pub fn new() -> Self {
		Self {
			resolutions: vec![],
			next_id: 1,
		}
	}

	// -----------
	// -- INPUT --
	// -----------

	/// Designates a confirmer for an obligation, with status pending. A
	/// second designation of the same user on the same obligation is an
	/// error, mirroring the backend's rejection of duplicate resolutions.
	pub fn add_confirmer(
		&mut self,
		obligation_id: u64,
		confirmer: Confirmer,
	) -> Result<&Resolution> {
		if self.find(obligation_id, confirmer.user_id).is_some() {
			return Err(CoreError::DuplicateConfirmer {
				obligation_id,
				user_id: confirmer.user_id,
			});
		}

		let resolution = Resolution {
			id: self.next_id,
			obligation_id,
			user_id: confirmer.user_id,
			user_name: confirmer.user_name,
			user_role: confirmer.user_role,
			status: ResolutionStatus::Pending,
		};
		self.next_id += 1;

		let idx = self.resolutions.len();
		self.resolutions.push(resolution);
		Ok(&self.resolutions[idx])
	}

	/// Withdraws a confirmer. Their resolution record is removed outright;
	/// if the same user is designated again later, they start over at
	/// pending rather than retaining any prior resolved status.
	pub fn remove_confirmer(
		&mut self,
		obligation_id: u64,
		user_id: u64,
	) -> Result<()> {
		let before = self.resolutions.len();
		self.resolutions
			.retain(|r| !(r.obligation_id == obligation_id && r.user_id == user_id));

		if self.resolutions.len() == before {
			return Err(CoreError::NotFound("resolution"));
		}

		Ok(())
	}

	/// Flips the caller's own resolution between pending and resolved.
	/// This is the enforcement point for "only designated confirmers may
	/// confirm": a caller with no resolution on the obligation is turned
	/// away and the ledger is left untouched.
	pub fn toggle_own(
		&mut self,
		obligation_id: u64,
		caller_user_id: u64,
	) -> Result<ResolutionStatus> {
		let resolution = self
			.resolutions
			.iter_mut()
			.find(|r| {
				r.obligation_id == obligation_id && r.user_id == caller_user_id
			})
			.ok_or_else(|| {
				CoreError::Forbidden(format!(
					"user {} is not a designated confirmer on obligation {}",
					caller_user_id, obligation_id
				))
			})?;

		resolution.status = match resolution.status {
			ResolutionStatus::Pending => ResolutionStatus::Resolved,
			ResolutionStatus::Resolved => ResolutionStatus::Pending,
		};

		Ok(resolution.status)
	}

	/// Mirrors a resolution fetched from the backend, which already has
	/// an identity and a status. Skips anything that would break the
	/// (obligation, user) uniqueness invariant; the backend enforces it
	/// on its side too.
	pub fn insert_fetched(&mut self, resolution: Resolution) {
		if self.find(resolution.obligation_id, resolution.user_id).is_some() {
			return;
		}
		self.next_id = self.next_id.max(resolution.id + 1);
		self.resolutions.push(resolution);
	}

	/// Drops every resolution for an obligation. Used by the store's
	/// cascading delete; not part of the public confirmation workflow.
	pub fn remove_all(&mut self, obligation_id: u64) {
		self.resolutions.retain(|r| r.obligation_id != obligation_id);
	}

	// -------------
	// -- QUERIES --
	// -------------

	/// True iff the confirmer set is non-empty and every resolution is
	/// resolved. An obligation nobody has been asked to confirm is not
	/// considered settled; vacuous truth would mark orphaned obligations
	/// as done.
	pub fn is_fully_resolved(&self, obligation_id: u64) -> bool {
		let mut any = false;
		for r in &self.resolutions {
			if r.obligation_id != obligation_id {
				continue;
			}
			if r.status != ResolutionStatus::Resolved {
				return false;
			}
			any = true;
		}
		any
	}

	/// All resolutions for an obligation, in insertion order.
	pub fn resolutions(&self, obligation_id: u64) -> Vec<&Resolution> {
		self.resolutions
			.iter()
			.filter(|r| r.obligation_id == obligation_id)
			.collect()
	}

	fn find(&self, obligation_id: u64, user_id: u64) -> Option<&Resolution> {
		self.resolutions
			.iter()
			.find(|r| r.obligation_id == obligation_id && r.user_id == user_id)
	}
}
