//! Brightness and contrast filter expression.
//!
//! Follows the CSS `brightness()` and `contrast()` filter functions, applied in
//! that order, with each step clamped to `[0, 1]`:
//!
//! ```text
//! brightness(p): c' = c * p / 100
//! contrast(p):   c' = (c - 0.5) * p / 100 + 0.5
//! ```
//!
//! Alpha is never touched. A term whose offset is 0 is left out of the
//! expression entirely, so the identity filter costs nothing to apply.

use std::fmt;

use crate::state::MAX_OFFSET;

/// Filter multipliers in percent, `None` when the term is omitted.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FilterExpr {
    pub brightness: Option<f32>,
    pub contrast: Option<f32>,
}

impl FilterExpr {
    /// Build from editor offsets, clamped to `[-100, 100]`.
    pub fn from_offsets(brightness: i32, contrast: i32) -> Self {
        let term = |offset: i32| {
            let offset = offset.clamp(-MAX_OFFSET, MAX_OFFSET);
            (offset != 0).then(|| (100 + offset) as f32)
        };
        Self {
            brightness: term(brightness),
            contrast: term(contrast),
        }
    }

    pub fn is_identity(&self) -> bool {
        self.brightness.is_none() && self.contrast.is_none()
    }

    /// Map a single channel value.
    pub fn apply_channel(&self, value: u8) -> u8 {
        let mut v = value as f32 / 255.0;
        if let Some(b) = self.brightness {
            v = (v * b / 100.0).clamp(0.0, 1.0);
        }
        if let Some(c) = self.contrast {
            v = ((v - 0.5) * c / 100.0 + 0.5).clamp(0.0, 1.0);
        }
        (v * 255.0).round() as u8
    }

    /// Precompute the channel mapping, `None` for the identity filter.
    pub fn lut(&self) -> Option<FilterLut> {
        if self.is_identity() {
            return None;
        }
        let mut table = [0u8; 256];
        for (i, slot) in table.iter_mut().enumerate() {
            *slot = self.apply_channel(i as u8);
        }
        Some(FilterLut { table })
    }
}

/// CSS text of the expression, e.g. `brightness(120%) contrast(80%)`.
impl fmt::Display for FilterExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.brightness, self.contrast) {
            (None, None) => f.write_str("none"),
            (Some(b), None) => write!(f, "brightness({b}%)"),
            (None, Some(c)) => write!(f, "contrast({c}%)"),
            (Some(b), Some(c)) => write!(f, "brightness({b}%) contrast({c}%)"),
        }
    }
}

/// 256-entry lookup table for the RGB channels.
#[derive(Debug, Clone)]
pub struct FilterLut {
    table: [u8; 256],
}

impl FilterLut {
    #[inline]
    pub fn apply(&self, rgba: [u8; 4]) -> [u8; 4] {
        [
            self.table[rgba[0] as usize],
            self.table[rgba[1] as usize],
            self.table[rgba[2] as usize],
            rgba[3],
        ]
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: the lookup table agrees with the direct formula.
        #[test]
        fn prop_lut_matches_formula(
            brightness in -100i32..=100,
            contrast in -100i32..=100,
            value in any::<u8>(),
        ) {
            let expr = FilterExpr::from_offsets(brightness, contrast);
            let mapped = expr.lut().map_or(value, |lut| lut.apply([value; 4])[0]);
            prop_assert_eq!(mapped, expr.apply_channel(value));
        }

        /// Property: brightness never reorders channel values.
        #[test]
        fn prop_brightness_is_monotonic(brightness in -100i32..=100, a in any::<u8>(), b in any::<u8>()) {
            let expr = FilterExpr::from_offsets(brightness, 0);
            let (lo, hi) = (a.min(b), a.max(b));
            prop_assert!(expr.apply_channel(lo) <= expr.apply_channel(hi));
        }
    }
}
