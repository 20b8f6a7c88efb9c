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
use crate::stats::aggregator::Slice;
use rand::Rng;

/// Hue endpoints for one direction of money. A slice's hue slides from
/// the gradient hue toward the base hue as its share of the total grows,
/// so the dominant bucket reads most strongly as "income" or "expense".
pub struct Palette {
	pub base_hue: f64,
	pub gradient_hue: f64,
}

/// Green shading toward blue.
pub const INCOMES: Palette = Palette {
	base_hue: 120.0,
	gradient_hue: 240.0,
};

/// Red shading toward yellow.
pub const EXPENSES: Palette = Palette {
	base_hue: 0.0,
	gradient_hue: 60.0,
};

/// One HSL color string per slice, in slice order. Saturation rises and
/// lightness falls with a slice's share of the total, so bigger slices
/// come out darker and more vivid. A small random jitter keeps slices of
/// equal share visually distinct.
///
/// When the total is zero every ratio is defined as zero, a deliberate
/// fallback so an all-zero report still renders rather than dividing by
/// zero.
pub fn color_ramp<R: Rng>(
	slices: &[Slice],
	palette: &Palette,
	rng: &mut R,
) -> Vec<String> {
	let total: f64 = slices.iter().map(|s| s.value.to_f64()).sum();

	slices
		.iter()
		.map(|slice| {
			let ratio = if total == 0.0 {
				0.0
			} else {
				slice.value.to_f64() / total
			};

			let saturation =
				30.0 + ratio * 70.0 + rng.gen_range(0.0..15.0);
			let lightness = 70.0 - ratio * 55.0 - rng.gen_range(0.0..5.0);
			let hue = palette.base_hue
				+ (palette.gradient_hue - palette.base_hue) * (1.0 - ratio);

			format!(
				"hsl({:.0}, {:.0}%, {:.0}%)",
				hue, saturation, lightness
			)
		})
		.collect()
}
