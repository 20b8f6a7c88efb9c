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
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// An exact decimal money value, held as a signed count of hundredths.
/// Rent checks do not need sub-cent precision, so two decimal places is
/// the fixed scale; inputs with more are rejected rather than rounded.
///
/// All arithmetic is integer arithmetic; no float is involved anywhere
/// except when a ratio is explicitly requested for display purposes.
#[derive(
	Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord,
)]
pub struct Amount {
	cents: i128,
}

impl Amount {
	pub fn zero() -> Self {
		Self { cents: 0 }
	}

	pub fn from_cents(cents: i128) -> Self {
		Self { cents }
	}

	/// Parses a plain decimal string like "1500", "-42.5" or "99.99".
	/// At most two decimal places are accepted.
	pub fn from_str(input: &str) -> Result<Self> {
		let is_negative = input.starts_with('-');
		let sanitized = input.trim_start_matches('-');

		let parts: Vec<&str> = sanitized.split('.').collect();

		let cents = match parts.len() {
			1 => parse_digits(parts[0], input)?
				.checked_mul(100)
				.ok_or_else(|| out_of_range(input))?,
			2 => {
				let whole = parse_digits(parts[0], input)?;
				let decimal = parts[1];
				if decimal.is_empty() || decimal.len() > 2 {
					return Err(CoreError::Validation(format!(
						"amount {} must have 1 or 2 decimal places",
						input
					)));
				}

				let mut fractional = parse_digits(decimal, input)?;
				if decimal.len() == 1 {
					fractional *= 10;
				}

				whole
					.checked_mul(100)
					.and_then(|c| c.checked_add(fractional))
					.ok_or_else(|| out_of_range(input))?
			},
			_ => {
				return Err(CoreError::Validation(format!(
					"amount {} is not a decimal number",
					input
				)))
			},
		};

		Ok(Self {
			cents: if is_negative { -cents } else { cents },
		})
	}

	pub fn is_positive(&self) -> bool {
		self.cents > 0
	}

	pub fn is_negative(&self) -> bool {
		self.cents < 0
	}

	pub fn is_zero(&self) -> bool {
		self.cents == 0
	}

	/// Lossy conversion for ratio and share computations only. Never
	/// feeds back into stored amounts.
	pub fn to_f64(&self) -> f64 {
		self.cents as f64 / 100.0
	}
}

fn out_of_range(original: &str) -> CoreError {
	CoreError::Validation(format!("amount {} is out of range", original))
}

fn parse_digits(part: &str, original: &str) -> Result<i128> {
	part.parse::<i128>().map_err(|_| {
		CoreError::Validation(format!(
			"amount {} is not a decimal number",
			original
		))
	})
}

impl Add for Amount {
	type Output = Amount;
	fn add(self, rhs: Self) -> Self::Output {
		Self {
			cents: self.cents + rhs.cents,
		}
	}
}

impl AddAssign for Amount {
	fn add_assign(&mut self, rhs: Self) {
		self.cents += rhs.cents;
	}
}

impl Sub for Amount {
	type Output = Amount;
	fn sub(self, rhs: Self) -> Self::Output {
		Self {
			cents: self.cents - rhs.cents,
		}
	}
}

impl SubAssign for Amount {
	fn sub_assign(&mut self, rhs: Self) {
		self.cents -= rhs.cents;
	}
}

impl Neg for Amount {
	type Output = Amount;
	fn neg(self) -> Self::Output {
		Self { cents: -self.cents }
	}
}

impl Sum for Amount {
	fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
		iter.fold(Amount::zero(), |acc, a| acc + a)
	}
}

impl fmt::Display for Amount {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let sign = if self.cents < 0 { "-" } else { "" };
		let abs = self.cents.unsigned_abs();
		write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_from_str_whole() {
		assert_eq!(
			Amount::from_str("1500").unwrap(),
			Amount::from_cents(150000)
		);
	}

	#[test]
	fn test_from_str_decimals() {
		assert_eq!(Amount::from_str("99.99").unwrap(), Amount::from_cents(9999));
		assert_eq!(Amount::from_str("42.5").unwrap(), Amount::from_cents(4250));
		assert_eq!(
			Amount::from_str("-3.07").unwrap(),
			Amount::from_cents(-307)
		);
	}

	#[test]
	fn test_from_str_rejects_garbage() {
		assert!(Amount::from_str("abc").is_err());
		assert!(Amount::from_str("1.2.3").is_err());
		assert!(Amount::from_str("1.").is_err());
		assert!(Amount::from_str("1.234").is_err());
		assert!(Amount::from_str("").is_err());
	}

	#[test]
	fn test_from_str_rejects_out_of_range() {
		// would overflow i128 when scaled to cents
		assert!(Amount::from_str(&i128::MAX.to_string()).is_err());
		assert!(Amount::from_str(&format!("{}.99", i128::MAX)).is_err());
		assert!(Amount::from_str(&i128::MIN.to_string()).is_err());
	}

	#[test]
	fn test_arithmetic() {
		let a = Amount::from_str("1000").unwrap();
		let b = Amount::from_str("250.25").unwrap();
		assert_eq!(a + b, Amount::from_cents(125025));
		assert_eq!(a - b, Amount::from_cents(74975));
		assert_eq!(-b, Amount::from_cents(-25025));
	}

	#[test]
	fn test_sum_and_ordering() {
		let total: Amount = vec![
			Amount::from_str("1").unwrap(),
			Amount::from_str("2").unwrap(),
			Amount::from_str("3.50").unwrap(),
		]
		.into_iter()
		.sum();
		assert_eq!(total, Amount::from_cents(650));
		assert!(
			Amount::from_str("2").unwrap() > Amount::from_str("1").unwrap()
		);
	}

	#[test]
	fn test_display() {
		assert_eq!(Amount::from_cents(150000).to_string(), "1500.00");
		assert_eq!(Amount::from_cents(-307).to_string(), "-3.07");
		assert_eq!(Amount::zero().to_string(), "0.00");
	}
}
