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
use chrono::{Datelike, Local};
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;

#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct Date {
	year: u32,
	month: u8,
	day: u8,
}

impl Date {
	/// Constructor to parse a string in the "YYYY-mm-dd" format
	pub fn from_str(date_str: &str) -> Result<Date> {
		let parts: Vec<&str> = date_str.split('-').collect();
		if parts.len() != 3 {
			return Err(CoreError::Validation(
				"date format must be YYYY-MM-DD".to_string(),
			));
		}

		let (year, month, day) = (
			parse_part(parts[0])?,
			parse_part(parts[1])? as u8,
			parse_part(parts[2])? as u8,
		);

		if !Date::is_valid_date(year, month, day) {
			return Err(CoreError::Validation(format!(
				"invalid date: {}",
				date_str
			)));
		}

		Ok(Date { year, month, day })
	}

	pub fn today() -> Date {
		let now = Local::now().date_naive();
		Date {
			year: now.year() as u32,
			month: now.month() as u8,
			day: now.day() as u8,
		}
	}

	fn is_leap_year(year: u32) -> bool {
		(year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
	}

	fn days_in_month(year: u32, month: u8) -> u8 {
		match month {
			1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
			4 | 6 | 9 | 11 => 30,
			2 => {
				if Date::is_leap_year(year) {
					29
				} else {
					28
				}
			},
			_ => 0, // Invalid month
		}
	}

	fn is_valid_date(year: u32, month: u8, day: u8) -> bool {
		if !(1..=12).contains(&month) {
			return false;
		}
		if day < 1 || day > Date::days_in_month(year, month) {
			return false;
		}
		true
	}
}

fn parse_part(part: &str) -> Result<u32> {
	part.parse::<u32>().map_err(|_| {
		CoreError::Validation("date format must be YYYY-MM-DD".to_string())
	})
}

impl PartialOrd for Date {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for Date {
	fn cmp(&self, other: &Self) -> Ordering {
		(self.year, self.month, self.day).cmp(&(
			other.year,
			other.month,
			other.day,
		))
	}
}

impl fmt::Display for Date {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
	}
}

/// A calendar month, i.e. a reporting period. Statistics bucket
/// obligations by year+month equality of the due date, never by any
/// rolling window.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Period {
	year: u32,
	month: u8,
}

impl Period {
	/// Parses the "YYYY-MM" form used on the command line.
	pub fn from_str(period_str: &str) -> Result<Period> {
		let re = Regex::new(r"^(\d{4})-(\d{2})$").unwrap();
		let caps = re.captures(period_str).ok_or_else(|| {
			CoreError::Validation(format!(
				"period {} must be in YYYY-MM format",
				period_str
			))
		})?;

		let year = parse_part(&caps[1])?;
		let month = parse_part(&caps[2])? as u8;
		if !(1..=12).contains(&month) {
			return Err(CoreError::Validation(format!(
				"invalid month in period: {}",
				period_str
			)));
		}

		Ok(Period { year, month })
	}

	pub fn of(date: &Date) -> Period {
		Period {
			year: date.year,
			month: date.month,
		}
	}

	pub fn current() -> Period {
		Period::of(&Date::today())
	}

	pub fn contains(&self, date: &Date) -> bool {
		self.year == date.year && self.month == date.month
	}
}

impl PartialOrd for Period {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for Period {
	fn cmp(&self, other: &Self) -> Ordering {
		(self.year, self.month).cmp(&(other.year, other.month))
	}
}

impl fmt::Display for Period {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:04}-{:02}", self.year, self.month)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_and_display() {
		let date = Date::from_str("2024-03-01").unwrap();
		assert_eq!(date.to_string(), "2024-03-01");
	}

	#[test]
	fn test_invalid_dates() {
		assert!(Date::from_str("2024-13-01").is_err());
		assert!(Date::from_str("2024-02-30").is_err());
		assert!(Date::from_str("2024-03").is_err());
		assert!(Date::from_str("yesterday").is_err());
	}

	#[test]
	fn test_leap_year() {
		assert!(Date::from_str("2024-02-29").is_ok());
		assert!(Date::from_str("2023-02-29").is_err());
	}

	#[test]
	fn test_ordering() {
		let a = Date::from_str("2024-03-01").unwrap();
		let b = Date::from_str("2024-03-15").unwrap();
		let c = Date::from_str("2025-01-01").unwrap();
		assert!(a < b);
		assert!(b < c);
	}

	#[test]
	fn test_period_contains() {
		let period = Period::from_str("2024-03").unwrap();
		assert!(period.contains(&Date::from_str("2024-03-01").unwrap()));
		assert!(period.contains(&Date::from_str("2024-03-31").unwrap()));
		assert!(!period.contains(&Date::from_str("2024-04-01").unwrap()));
		assert!(!period.contains(&Date::from_str("2023-03-15").unwrap()));
	}

	#[test]
	fn test_period_parse_rejects_bad_shapes() {
		assert!(Period::from_str("2024-3").is_err());
		assert!(Period::from_str("2024-13").is_err());
		assert!(Period::from_str("2024-03-01").is_err());
		assert!(Period::from_str("march").is_err());
	}

	#[test]
	fn test_period_of_date() {
		let date = Date::from_str("2024-03-10").unwrap();
		assert_eq!(Period::of(&date), Period::from_str("2024-03").unwrap());
	}

	#[test]
	fn test_period_ordering() {
		let a = Period::from_str("2024-03").unwrap();
		let b = Period::from_str("2024-04").unwrap();
		let c = Period::from_str("2025-01").unwrap();
		assert!(a < b);
		assert!(b < c);
	}
}
