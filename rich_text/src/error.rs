// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Error returned when a [`RichStringBuilder`](crate::RichStringBuilder) produced an
/// inconsistent run sequence.
///
/// Carries a non-exhaustive [`ErrorKind`] plus the offending block and the value that
/// failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    /// The non-exhaustive category describing this error.
    kind: ErrorKind,

    /// Index of the offending block.
    block: usize,

    /// The offending value (link or paragraph index), when relevant.
    value: usize,

    /// The number of entries the value had to fit in, when relevant.
    limit: usize,
}

impl Error {
    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Index of the block that failed validation.
    pub fn block(&self) -> usize {
        self.block
    }

    /// The offending link or paragraph index.
    pub fn value(&self) -> usize {
        self.value
    }

    /// The number of registered links or paragraphs at the time of failure.
    pub fn limit(&self) -> usize {
        self.limit
    }

    pub(crate) fn link_out_of_range(block: usize, value: u16, limit: usize) -> Self {
        Self {
            kind: ErrorKind::LinkOutOfRange,
            block,
            value: value.into(),
            limit,
        }
    }

    pub(crate) fn paragraph_out_of_range(block: usize, value: u16, limit: usize) -> Self {
        Self {
            kind: ErrorKind::ParagraphOutOfRange,
            block,
            value: value.into(),
            limit,
        }
    }

    pub(crate) fn skip_not_last(block: usize, len: usize) -> Self {
        Self {
            kind: ErrorKind::SkipNotLast,
            block,
            value: 0,
            limit: len,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.kind {
            ErrorKind::LinkOutOfRange => write!(
                f,
                "block {}: link index {} out of range for {} links",
                self.block, self.value, self.limit
            ),
            ErrorKind::ParagraphOutOfRange => write!(
                f,
                "block {}: paragraph index {} out of range for {} paragraphs",
                self.block, self.value, self.limit
            ),
            ErrorKind::SkipNotLast => write!(
                f,
                "block {}: skip block is not the last of {} blocks",
                self.block, self.limit
            ),
        }
    }
}

impl core::error::Error for Error {}

/// The non-exhaustive category of an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A block referenced a link slot that was never registered.
    LinkOutOfRange,

    /// A hard break referenced a paragraph that was never registered.
    ParagraphOutOfRange,

    /// A skip block was followed by other blocks.
    SkipNotLast,
}
