// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Add;

/// Whole-pixel paddings around a paragraph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Margins {
    /// Left padding.
    pub left: i32,
    /// Top padding.
    pub top: i32,
    /// Right padding.
    pub right: i32,
    /// Bottom padding.
    pub bottom: i32,
}

impl Margins {
    /// No padding at all.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Creates paddings from the four sides, in CSS-like `left, top, right, bottom` order.
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Sum of the left and right paddings.
    pub const fn horizontal(self) -> i32 {
        self.left + self.right
    }

    /// Sum of the top and bottom paddings.
    pub const fn vertical(self) -> i32 {
        self.top + self.bottom
    }
}

impl Add for Margins {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.left + rhs.left,
            self.top + rhs.top,
            self.right + rhs.right,
            self.bottom + rhs.bottom,
        )
    }
}
