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
use crate::core::error::Result;
use crate::core::ledger::{Resolution, ResolutionStatus};
use crate::core::obligation::{Obligation, ObligationKind, Role};
use crate::util::amount::Amount;
use crate::util::date::Date;
use serde::{Deserialize, Serialize};

// -------------
// -- SENDING --
// -------------

#[derive(Debug, Serialize)]
pub struct TransactionParams {
	#[serde(rename = "type")]
	pub typ: String,
	pub amount: String,
	pub due_date: String,
	pub payee_role: String,
	pub is_visible_to_tenants: bool,
}

#[derive(Debug, Serialize)]
pub struct RequestParams {
	pub title: String,
	pub description: String,
	pub request_date: String,
}

#[derive(Debug, Serialize)]
pub struct AnnouncementParams {
	pub title: String,
	pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ResponsibilityParams {
	pub title: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub due_date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResolutionParams {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub transaction_id: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub request_id: Option<u64>,
	pub user_id: u64,
	pub status: String,
}

// ---------------
// -- RECEIVING --
// ---------------

#[derive(Debug, Deserialize)]
pub struct TransactionDto {
	pub id: u64,
	pub property_id: u64,

	#[serde(rename = "type")]
	pub typ: String,

	#[serde(deserialize_with = "deserialize_decimal_as_string")]
	pub amount: String,

	pub due_date: String,
	pub payee_role: String,
	pub is_visible_to_tenants: bool,
}

impl TransactionDto {
	pub fn into_obligation(self) -> Result<Obligation> {
		Ok(Obligation {
			id: self.id,
			kind: ObligationKind::Transaction,
			type_name: self.typ,
			title: String::new(),
			description: String::new(),
			amount: Some(Amount::from_str(&self.amount)?),
			due_date: Date::from_str(&self.due_date)?,
			payee_role: Role::from_str(&self.payee_role)?,
			is_visible_to_tenants: self.is_visible_to_tenants,
		})
	}
}

#[derive(Debug, Deserialize)]
pub struct TenantRequestDto {
	pub id: u64,
	pub tenant_id: u64,
	pub property_id: u64,
	pub title: String,
	pub description: String,
	pub request_date: String,
}

impl TenantRequestDto {
	/// Requests carry no amount and are always directed at the landlord,
	/// who is the party expected to act on them.
	pub fn into_obligation(self) -> Result<Obligation> {
		Ok(Obligation {
			id: self.id,
			kind: ObligationKind::Request,
			type_name: String::new(),
			title: self.title,
			description: self.description,
			amount: None,
			due_date: Date::from_str(&self.request_date)?,
			payee_role: Role::Landlord,
			is_visible_to_tenants: true,
		})
	}
}

/// The resolution listing endpoints denormalize user name and role into
/// each row; the obligation key arrives as transaction_id or request_id
/// depending on which endpoint served it.
#[derive(Debug, Deserialize)]
pub struct ResolutionDto {
	pub resolution_id: u64,

	#[serde(alias = "transaction_id", alias = "request_id")]
	pub obligation_id: u64,

	pub user_id: u64,
	pub status: String,
	pub user_name: String,
	pub user_role: String,
}

impl ResolutionDto {
	pub fn into_resolution(self) -> Result<Resolution> {
		Ok(Resolution {
			id: self.resolution_id,
			obligation_id: self.obligation_id,
			user_id: self.user_id,
			user_name: self.user_name,
			user_role: Role::from_str(&self.user_role)?,
			status: if self.status == "resolved" {
				ResolutionStatus::Resolved
			} else {
				ResolutionStatus::Pending
			},
		})
	}
}

#[derive(Debug, Deserialize)]
pub struct UserDto {
	pub id: u64,
	pub name: String,
	pub email: String,
	pub role: String,
}

/// Property-wide notices posted by the landlord. Read-only for tenants.
#[derive(Debug, Deserialize)]
pub struct AnnouncementDto {
	pub id: u64,
	pub property_id: u64,
	pub title: String,
	pub message: String,
}

/// Standing duties attached to a property, e.g. lawn care. Description
/// and due date are both optional on the backend.
#[derive(Debug, Deserialize)]
pub struct ResponsibilityDto {
	pub id: u64,
	pub property_id: u64,
	pub title: String,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default)]
	pub due_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PropertyDto {
	pub id: u64,
	pub name: String,
	pub location: String,
	pub landlord_id: u64,
	#[serde(default)]
	pub description: Option<String>,
}

// Decimal fields may arrive as a JSON number or a quoted string
// depending on the backend's serializer; accept both.
fn deserialize_decimal_as_string<'de, D>(
	deserializer: D,
) -> std::result::Result<String, D::Error>
where
	D: serde::Deserializer<'de>,
{
	let value = serde_json::Value::deserialize(deserializer)?;
	match value {
		serde_json::Value::Number(num) => Ok(num.to_string()),
		serde_json::Value::String(s) => Ok(s),
		_ => Err(serde::de::Error::custom("expected a decimal")),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_transaction_dto_round_trip() {
		let json = r#"{
			"id": 7,
			"property_id": 3,
			"type": "Rent",
			"amount": 1500.00,
			"due_date": "2024-03-01",
			"payee_role": "tenant",
			"is_visible_to_tenants": true
		}"#;

		let dto: TransactionDto = serde_json::from_str(json).unwrap();
		let obligation = dto.into_obligation().unwrap();

		assert_eq!(obligation.id, 7);
		assert_eq!(obligation.kind, ObligationKind::Transaction);
		assert_eq!(obligation.type_name, "Rent");
		assert_eq!(obligation.amount, Some(Amount::from_str("1500").unwrap()));
		assert_eq!(obligation.payee_role, Role::Tenant);
	}

	#[test]
	fn test_transaction_dto_accepts_string_amount() {
		let json = r#"{
			"id": 7,
			"property_id": 3,
			"type": "Rent",
			"amount": "99.50",
			"due_date": "2024-03-01",
			"payee_role": "tenant",
			"is_visible_to_tenants": false
		}"#;

		let dto: TransactionDto = serde_json::from_str(json).unwrap();
		assert_eq!(dto.amount, "99.50");
	}

	#[test]
	fn test_resolution_dto_accepts_both_obligation_keys() {
		let from_transaction = r#"{
			"resolution_id": 1,
			"transaction_id": 7,
			"user_id": 10,
			"status": "resolved",
			"user_name": "Ada",
			"user_role": "tenant"
		}"#;
		let from_request = r#"{
			"resolution_id": 2,
			"request_id": 9,
			"user_id": 20,
			"status": "pending",
			"user_name": "Lin",
			"user_role": "landlord"
		}"#;

		let a: ResolutionDto =
			serde_json::from_str(from_transaction).unwrap();
		assert_eq!(a.obligation_id, 7);
		let a = a.into_resolution().unwrap();
		assert_eq!(a.status, ResolutionStatus::Resolved);

		let b: ResolutionDto = serde_json::from_str(from_request).unwrap();
		assert_eq!(b.obligation_id, 9);
		let b = b.into_resolution().unwrap();
		assert_eq!(b.status, ResolutionStatus::Pending);
	}

	#[test]
	fn test_responsibility_dto_optional_fields() {
		let bare = r#"{
			"id": 2,
			"property_id": 3,
			"title": "Lawn care",
			"created_at": "2024-03-01T09:00:00"
		}"#;

		let dto: ResponsibilityDto = serde_json::from_str(bare).unwrap();
		assert_eq!(dto.title, "Lawn care");
		assert_eq!(dto.description, None);
		assert_eq!(dto.due_date, None);

		let full = r#"{
			"id": 2,
			"property_id": 3,
			"title": "Lawn care",
			"description": "Mow every other week",
			"due_date": "2024-06-01"
		}"#;

		let dto: ResponsibilityDto = serde_json::from_str(full).unwrap();
		assert_eq!(dto.due_date.as_deref(), Some("2024-06-01"));
	}

	#[test]
	fn test_announcement_dto() {
		let json = r#"{
			"id": 5,
			"property_id": 3,
			"title": "Water shutoff",
			"message": "Maintenance on Tuesday morning",
			"created_at": "2024-03-01T09:00:00"
		}"#;

		let dto: AnnouncementDto = serde_json::from_str(json).unwrap();
		assert_eq!(dto.property_id, 3);
		assert_eq!(dto.message, "Maintenance on Tuesday morning");
	}

	#[test]
	fn test_request_dto_maps_to_request_obligation() {
		let json = r#"{
			"id": 4,
			"tenant_id": 10,
			"property_id": 3,
			"title": "Leaky faucet",
			"description": "The kitchen faucet drips",
			"request_date": "2024-03-05"
		}"#;

		let dto: TenantRequestDto = serde_json::from_str(json).unwrap();
		let obligation = dto.into_obligation().unwrap();
		assert_eq!(obligation.kind, ObligationKind::Request);
		assert_eq!(obligation.amount, None);
		assert_eq!(obligation.payee_role, Role::Landlord);
	}
}
