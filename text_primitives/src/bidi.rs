// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// The base direction of a paragraph.
///
/// Only paragraph-level direction is tracked. Runs inside a paragraph are never
/// reordered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum BaseDirection {
    /// No strong character was found (or direction was not requested).
    #[default]
    Auto,
    /// Left-to-right.
    Ltr,
    /// Right-to-left.
    Rtl,
}

impl BaseDirection {
    /// Returns `true` for [`BaseDirection::Ltr`].
    pub const fn is_ltr(self) -> bool {
        matches!(self, Self::Ltr)
    }

    /// Returns `true` for [`BaseDirection::Rtl`].
    pub const fn is_rtl(self) -> bool {
        matches!(self, Self::Rtl)
    }

    /// Returns `self` unless it is `Auto`, in which case `detect` is evaluated.
    pub fn or_else(self, detect: impl FnOnce() -> Self) -> Self {
        match self {
            Self::Auto => detect(),
            forced => forced,
        }
    }
}
