// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

bitflags::bitflags! {
    /// Style flags carried by a run.
    ///
    /// The flags describe formatting that was applied by the source markup. They are
    /// exported back as formatting entities when a selection is converted to text.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct StyleFlags: u16 {
        /// Bold weight.
        const BOLD = 1 << 0;
        /// Italic style.
        const ITALIC = 1 << 1;
        /// Underline decoration.
        const UNDERLINE = 1 << 2;
        /// Strike-out decoration.
        const STRIKE_OUT = 1 << 3;
        /// Semibold weight.
        const SEMIBOLD = 1 << 4;
        /// Inline code span.
        const CODE = 1 << 5;
        /// Pre-formatted block.
        const PRE = 1 << 6;
        /// Block quote.
        const BLOCKQUOTE = 1 << 7;
        /// Content hidden until revealed.
        const SPOILER = 1 << 8;
        /// Any monospace content.
        const MONO = Self::CODE.bits() | Self::PRE.bits();
    }
}

impl StyleFlags {
    /// Returns `true` if the flags denote monospace content (code or pre).
    #[inline]
    pub const fn is_mono(self) -> bool {
        self.intersects(Self::MONO)
    }
}
