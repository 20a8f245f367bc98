// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A signed 26.6 fixed-point pixel value.
///
/// Font metrics providers report advances, bearings and paddings with 1/64 pixel
/// precision. Keeping them in integer form makes accumulation exact, so two passes over
/// the same runs always agree on whether content fits a given width.
///
/// Conversions to whole pixels round up (see [`Fixed::ceil_px`]).
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixed(i32);

impl Fixed {
    /// Number of fractional bits.
    pub const FRACTION_BITS: u32 = 6;
    /// The raw value of one whole pixel.
    pub const ONE_PX: i32 = 1 << Self::FRACTION_BITS;

    /// Zero pixels.
    pub const ZERO: Self = Self(0);
    /// The largest representable value.
    pub const MAX: Self = Self(i32::MAX);

    /// Creates a value from its raw 1/64 pixel representation.
    #[inline]
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// Returns the raw 1/64 pixel representation.
    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Creates a value from whole pixels.
    #[inline]
    pub const fn from_px(px: i32) -> Self {
        Self(px.saturating_mul(Self::ONE_PX))
    }

    /// Creates a value from fractional pixels, rounding to the nearest 1/64.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Metric values are far below the i32 range of 26.6 values."
    )]
    #[inline]
    pub fn from_f32(px: f32) -> Self {
        let scaled = px * Self::ONE_PX as f32;
        let rounded = if scaled < 0. {
            scaled - 0.5
        } else {
            scaled + 0.5
        };
        Self(rounded as i32)
    }

    /// Converts to fractional pixels.
    #[inline]
    pub fn to_f32(self) -> f32 {
        self.0 as f32 / Self::ONE_PX as f32
    }

    /// Rounds up to whole pixels.
    #[inline]
    pub const fn ceil_px(self) -> i32 {
        // Arithmetic shift floors, so bias by one pixel minus one unit first.
        (self.0.saturating_add(Self::ONE_PX - 1)) >> Self::FRACTION_BITS
    }

    /// Rounds down to whole pixels.
    #[inline]
    pub const fn floor_px(self) -> i32 {
        self.0 >> Self::FRACTION_BITS
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Returns `true` if the value is below zero.
    #[inline]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl Add for Fixed {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Fixed {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Fixed {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Fixed {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Fixed {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl Sum for Fixed {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<i32> for Fixed {
    #[inline]
    fn from(px: i32) -> Self {
        Self::from_px(px)
    }
}

impl fmt::Debug for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fixed({})", self.to_f32())
    }
}
