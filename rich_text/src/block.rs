// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The run sequence backing a [`RichString`](crate::RichString).

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt::Debug;

use smallvec::SmallVec;
use text_primitives::{BaseDirection, Fixed, StyleFlags};

use crate::style::TextStyle;

/// Measured extent of a single wrap unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WordMetrics {
    /// Byte offset of the unit in the backing text.
    pub position: usize,
    /// Advance of the unit, excluding trailing whitespace.
    pub width: Fixed,
    /// Overlap correction with whatever follows on the same line. May be negative.
    pub rbearing: Fixed,
    /// Advance of the trailing whitespace.
    pub rpadding: Fixed,
}

/// An indivisible wrap unit of a text run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Word {
    /// A unit that ends a word: a line may break after it.
    Whole(WordMetrics),
    /// A piece of a word too long to fit a line, continued by the next unit.
    ///
    /// Line breaking only breaks after forced chunks when the whole word cannot be kept
    /// together or when breaking everywhere was requested.
    ForcedChunk(WordMetrics),
}

impl Word {
    /// The measured extent of the unit.
    #[inline]
    pub fn metrics(&self) -> &WordMetrics {
        match self {
            Self::Whole(metrics) | Self::ForcedChunk(metrics) => metrics,
        }
    }

    /// Returns `true` if a word ends after this unit.
    #[inline]
    pub fn ends_word(&self) -> bool {
        matches!(self, Self::Whole(_))
    }
}

/// Opaque identifier of a built-in emoji image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EmojiId(pub u32);

/// An application-provided inline glyph.
pub trait CustomEmoji: Debug {
    /// Identifier exported with the glyph when its text is copied.
    fn entity_data(&self) -> String;

    /// Advance of the glyph in pixels.
    fn width(&self) -> i32;

    /// Releases animation resources held by the glyph.
    fn unload(&self) {}
}

/// The variant of a [`Block`].
#[derive(Debug)]
pub enum BlockKind {
    /// Styled text, split into wrap units.
    ///
    /// A run made only of whitespace has no words; its whitespace is carried by the
    /// block's right padding.
    Text {
        /// Wrap units in text order.
        words: SmallVec<[Word; 2]>,
    },
    /// A hard paragraph break.
    Newline {
        /// Paragraph started by this break, `0` for unframed text.
        paragraph_index: u16,
        /// Direction of the paragraph started by this break.
        direction: BaseDirection,
    },
    /// Trailing space reserved for an affordance drawn by the caller.
    Skip,
    /// A built-in emoji.
    Emoji(EmojiId),
    /// An application-provided glyph.
    CustomEmoji(Box<dyn CustomEmoji>),
}

/// A typed run of the backing text.
///
/// A block spans from its position up to the position of the next block, or up to the
/// end of the text for the last one.
#[derive(Debug)]
pub struct Block {
    pub(crate) position: usize,
    pub(crate) flags: StyleFlags,
    pub(crate) link_index: u16,
    pub(crate) width: Fixed,
    pub(crate) rbearing: Fixed,
    pub(crate) rpadding: Fixed,
    pub(crate) height: i32,
    pub(crate) kind: BlockKind,
}

impl Block {
    pub(crate) fn text(
        position: usize,
        flags: StyleFlags,
        link_index: u16,
        height: i32,
        words: SmallVec<[Word; 2]>,
        spaces: Fixed,
    ) -> Self {
        // Inner whitespace is part of the block advance, the last word's is padding.
        let (width, rbearing, rpadding) = match words.split_last() {
            Some((last, init)) => {
                let inner: Fixed = init
                    .iter()
                    .map(|word| word.metrics().width + word.metrics().rpadding)
                    .sum();
                let last = last.metrics();
                (inner + last.width, last.rbearing, last.rpadding)
            }
            None => (Fixed::ZERO, Fixed::ZERO, spaces),
        };
        Self {
            position,
            flags,
            link_index,
            width,
            rbearing,
            rpadding,
            height,
            kind: BlockKind::Text { words },
        }
    }

    pub(crate) fn newline(position: usize, flags: StyleFlags, height: i32, paragraph_index: u16) -> Self {
        Self {
            position,
            flags,
            link_index: 0,
            width: Fixed::ZERO,
            rbearing: Fixed::ZERO,
            rpadding: Fixed::ZERO,
            height,
            kind: BlockKind::Newline {
                paragraph_index,
                direction: BaseDirection::Auto,
            },
        }
    }

    pub(crate) fn skip(position: usize, width: i32, height: i32) -> Self {
        Self {
            position,
            flags: StyleFlags::empty(),
            link_index: 0,
            width: Fixed::from_px(width),
            rbearing: Fixed::ZERO,
            rpadding: Fixed::ZERO,
            height,
            kind: BlockKind::Skip,
        }
    }

    pub(crate) fn inline(
        position: usize,
        flags: StyleFlags,
        link_index: u16,
        width: Fixed,
        height: i32,
        kind: BlockKind,
    ) -> Self {
        Self {
            position,
            flags,
            link_index,
            width,
            rbearing: Fixed::ZERO,
            rpadding: Fixed::ZERO,
            height,
            kind,
        }
    }

    /// Byte offset of the block in the backing text.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Style flags of the block.
    pub fn flags(&self) -> StyleFlags {
        self.flags
    }

    /// One-based link slot of the block, `0` when not a link.
    pub fn link_index(&self) -> u16 {
        self.link_index
    }

    /// Advance of the block, excluding its trailing whitespace.
    pub fn width(&self) -> Fixed {
        self.width
    }

    /// Overlap correction with the following block.
    pub fn rbearing(&self) -> Fixed {
        self.rbearing
    }

    /// Advance of the trailing whitespace.
    pub fn rpadding(&self) -> Fixed {
        self.rpadding
    }

    /// The variant of the block.
    pub fn kind(&self) -> &BlockKind {
        &self.kind
    }

    /// Wrap units of a text block, empty for other kinds.
    pub fn words(&self) -> &[Word] {
        match &self.kind {
            BlockKind::Text { words } => words.as_slice(),
            _ => &[],
        }
    }

    /// Returns `true` for a hard break.
    pub fn is_newline(&self) -> bool {
        matches!(self.kind, BlockKind::Newline { .. })
    }

    /// Returns `true` for the trailing spacer.
    pub fn is_skip(&self) -> bool {
        matches!(self.kind, BlockKind::Skip)
    }

    /// Paragraph started by a hard break, `None` for other kinds.
    pub fn paragraph_index(&self) -> Option<u16> {
        match self.kind {
            BlockKind::Newline {
                paragraph_index, ..
            } => Some(paragraph_index),
            _ => None,
        }
    }

    /// Height of the line box the block needs under `style`.
    pub fn line_height(&self, style: &TextStyle) -> i32 {
        match self.kind {
            BlockKind::Skip => self.height,
            _ => self.height.max(style.line_height),
        }
    }
}
