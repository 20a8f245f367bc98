// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rich text layout over pre-measured runs.
//!
//! A [`RichString`] owns a flat UTF-8 buffer and an ordered sequence of [`Block`]s
//! describing it: text runs split into wrap units ([`Word`]s), hard breaks, inline emoji
//! and a trailing size-reservation spacer. Blocks are produced by a parser through
//! [`RichStringBuilder`], which measures text with a caller-provided [`Measure`].
//!
//! Once built, the string answers geometry questions without touching fonts again:
//!
//! - natural size ([`RichString::max_width`], [`RichString::min_height`]),
//! - width constrained size ([`RichString::count_width`], [`RichString::count_height`]),
//! - per-line layout under a [`GeometryPolicy`] ([`RichString::lines`]),
//! - hit-testing ([`RichString::state_at`]).
//!
//! It also snaps selections to word or paragraph boundaries and exports selected
//! ranges as plain text or as text with formatting entities.
//!
//! ## Example
//!
//! ```
//! use rich_text::{MonospaceMeasure, ParseOptions, RichStringBuilder, TextStyle};
//! use text_primitives::Fixed;
//!
//! let measure = MonospaceMeasure::new(Fixed::from_px(10), 20);
//! let mut builder = RichStringBuilder::new(&measure, ParseOptions::default());
//! builder.push_text("Hello world");
//! let text = builder.build(TextStyle::default()).unwrap();
//!
//! assert_eq!(text.max_width(), 110);
//! assert_eq!(text.count_height(60), 40);
//! ```
//!
//! ## Features
//!
//! - `std` (enabled by default): Provides the process-wide spoiler mask cache.
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

extern crate alloc;

mod block;
mod builder;
mod chars;
mod entity;
mod error;
mod extended;
mod extract;
mod link;
mod selection;
mod spoiler;
mod spoiler_cache;
mod string;
mod style;

pub mod layout;

#[cfg(test)]
mod tests;

pub use block::{Block, BlockKind, CustomEmoji, EmojiId, Word, WordMetrics};
pub use builder::{Measure, MonospaceMeasure, ParseOptions, RichStringBuilder};
pub use chars::{
    is_almost_link_end, is_bad, is_diacritic, is_link_end, is_newline, is_paragraph_separator,
    is_replaced_by_space, is_space, is_trimmed, is_word_separator,
};
pub use entity::{EntityInText, EntityType, TextForMimeData, TextWithEntities};
pub use error::{Error, ErrorKind};
pub use extended::{Modification, ParagraphDetails};
pub use layout::{
    GeometryPolicy, LineDescriptor, LineGeometry, LineWidthsOptions, SimpleGeometry, StateResult,
};
pub use link::{ClickContext, ClickHandler, EntityLink, EntityLinkData, MouseButton, encode_for_opening};
pub use selection::{SelectType, TextSelection};
pub use spoiler::{AnimType, SPOILER_REVEAL_DURATION};
pub use spoiler_cache::{
    ColorMaskCache, DEFAULT_SPOILER_CACHE_CAPACITY, NoopMaskCache, SpoilerMess, SpoilerMessCache,
};
#[cfg(feature = "std")]
pub use spoiler_cache::{default_spoiler_cache, palette_changed};
pub use string::{
    ISOLATED_EMOJI_LIMIT, IsolatedEmoji, IsolatedEmojiItem, OnlyCustomEmoji, RichString,
};
pub use style::{Brush, Color, ParagraphStyle, TextStyle};
