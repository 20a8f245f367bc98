// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction of a [`RichString`] from parsed runs.

use alloc::boxed::Box;
use alloc::rc::Rc;

use smallvec::SmallVec;
use text_primitives::{BaseDirection, Fixed, StyleFlags};

use crate::block::{Block, BlockKind, CustomEmoji, EmojiId, Word, WordMetrics};
use crate::chars::is_space;
use crate::error::Error;
use crate::extended::{Modification, ParagraphDetails};
use crate::link::ClickHandler;
use crate::string::{ISOLATED_EMOJI_LIMIT, RichString};
use crate::style::TextStyle;

/// Font metrics provider.
pub trait Measure {
    /// Advance of `text` set with `flags`.
    fn advance(&self, text: &str, flags: StyleFlags) -> Fixed;

    /// Right bearing of the last glyph of `text`.
    fn right_bearing(&self, text: &str, flags: StyleFlags) -> Fixed {
        let _ = (text, flags);
        Fixed::ZERO
    }

    /// Line height of text set with `flags`.
    fn height(&self, flags: StyleFlags) -> i32;

    /// Advance of a built-in emoji.
    fn emoji_advance(&self, flags: StyleFlags) -> Fixed {
        Fixed::from_px(self.height(flags))
    }
}

/// Fixed advance per character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonospaceMeasure {
    /// Advance of every character.
    pub advance: Fixed,
    /// Right bearing of every non-whitespace run.
    pub right_bearing: Fixed,
    /// Line height.
    pub height: i32,
}

impl MonospaceMeasure {
    /// Creates a measure with `advance` per character and no bearing.
    pub fn new(advance: Fixed, height: i32) -> Self {
        Self {
            advance,
            right_bearing: Fixed::ZERO,
            height,
        }
    }

    /// Sets the right bearing reported for non-whitespace runs.
    pub fn with_right_bearing(mut self, right_bearing: Fixed) -> Self {
        self.right_bearing = right_bearing;
        self
    }
}

impl Measure for MonospaceMeasure {
    fn advance(&self, text: &str, _flags: StyleFlags) -> Fixed {
        let count = i32::try_from(text.chars().count()).unwrap_or(i32::MAX);
        Fixed::from_raw(self.advance.raw().saturating_mul(count))
    }

    fn right_bearing(&self, text: &str, _flags: StyleFlags) -> Fixed {
        if text.chars().any(|ch| !is_space(ch)) {
            self.right_bearing
        } else {
            Fixed::ZERO
        }
    }

    fn height(&self, _flags: StyleFlags) -> i32 {
        self.height
    }
}

/// Options applied while building.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Direction of every paragraph, [`BaseDirection::Auto`] to detect it.
    pub direction: BaseDirection,
    /// Width below which the text is never wrapped.
    ///
    /// When positive, words wider than it are split into per-character chunks so they
    /// can be broken across lines.
    pub min_resize_width: i32,
}

/// Collects parsed runs into a [`RichString`].
///
/// Runs are appended in text order. Text and inline objects take the style flags and
/// link set by [`set_flags`](Self::set_flags) and [`set_link`](Self::set_link).
#[derive(Debug)]
pub struct RichStringBuilder<'a, M: Measure + ?Sized> {
    measure: &'a M,
    options: ParseOptions,
    string: RichString,
    flags: StyleFlags,
    link: u16,
    paragraph: u16,
}

impl<'a, M: Measure + ?Sized> RichStringBuilder<'a, M> {
    /// Creates an empty builder measuring text with `measure`.
    pub fn new(measure: &'a M, options: ParseOptions) -> Self {
        let string = RichString {
            min_resize_width: options.min_resize_width,
            ..RichString::default()
        };
        Self {
            measure,
            options,
            string,
            flags: StyleFlags::empty(),
            link: 0,
            paragraph: 0,
        }
    }

    /// Style flags of the runs pushed next.
    pub fn set_flags(&mut self, flags: StyleFlags) {
        self.flags = flags;
    }

    /// Current style flags.
    pub fn flags(&self) -> StyleFlags {
        self.flags
    }

    /// Registers a link slot, returning its one-based index.
    ///
    /// The handler may be filled in later with [`RichString::set_link`].
    pub fn add_link(&mut self, handler: Option<Rc<dyn ClickHandler>>) -> u16 {
        let links = &mut self.string.ensure_extended().links;
        links.push(handler);
        u16::try_from(links.len()).unwrap_or(u16::MAX)
    }

    /// Link slot of the runs pushed next, `0` for none.
    pub fn set_link(&mut self, index: u16) {
        self.link = index;
    }

    /// Registers framing details, returning the one-based paragraph index.
    pub fn add_paragraph(&mut self, details: ParagraphDetails) -> u16 {
        let paragraphs = &mut self.string.ensure_extended().paragraphs;
        paragraphs.push(details);
        u16::try_from(paragraphs.len()).unwrap_or(u16::MAX)
    }

    /// Starts a paragraph, framed when `details` are given.
    ///
    /// Before any run this sets the paragraph of the start of the text, afterwards it
    /// pushes a hard break. Returns the paragraph index.
    pub fn push_paragraph(&mut self, details: Option<ParagraphDetails>) -> u16 {
        let index = details.map_or(0, |details| self.add_paragraph(details));
        if self.string.blocks.is_empty() {
            self.string.start_paragraph_index = index;
            self.paragraph = index;
        } else {
            self.push_paragraph_break(index);
        }
        index
    }

    /// Pushes a hard break starting paragraph `index`.
    pub fn push_paragraph_break(&mut self, index: u16) {
        let position = self.string.text.len();
        self.string.text.push('\n');
        let height = self.measure.height(self.flags);
        self.string
            .blocks
            .push(Block::newline(position, self.flags, height, index));
        self.paragraph = index;
    }

    /// Pushes a hard break within the current paragraph.
    pub fn push_newline(&mut self) {
        self.push_paragraph_break(self.paragraph);
    }

    /// Pushes text, splitting it into words at whitespace and into runs at line feeds.
    pub fn push_text(&mut self, text: &str) {
        for (index, line) in text.split('\n').enumerate() {
            if index > 0 {
                self.push_newline();
            }
            self.push_run(line);
        }
    }

    fn push_run(&mut self, run: &str) {
        if run.is_empty() {
            return;
        }
        // Leading whitespace pads whatever precedes the run.
        let leading = run.find(|ch| !is_space(ch)).unwrap_or(run.len());
        if leading > 0 && leading < run.len() {
            self.push_run(&run[..leading]);
            self.push_run(&run[leading..]);
            return;
        }
        let position = self.string.text.len();
        self.string.text.push_str(run);
        let mut words = SmallVec::new();
        let mut spaces = Fixed::ZERO;
        if run.chars().any(|ch| !is_space(ch)) {
            let mut start = 0;
            while start < run.len() {
                let word_end = run[start..].find(is_space).map_or(run.len(), |i| start + i);
                let space_end = run[word_end..]
                    .find(|ch| !is_space(ch))
                    .map_or(run.len(), |i| word_end + i);
                self.push_word(
                    &mut words,
                    &run[start..word_end],
                    &run[word_end..space_end],
                    position + start,
                );
                start = space_end;
            }
        } else {
            spaces = self.measure.advance(run, self.flags);
        }
        let height = self.measure.height(self.flags);
        self.string.blocks.push(Block::text(
            position, self.flags, self.link, height, words, spaces,
        ));
    }

    fn push_word(&self, words: &mut SmallVec<[Word; 2]>, word: &str, spaces: &str, position: usize) {
        let flags = self.flags;
        let width = self.measure.advance(word, flags);
        let rpadding = self.measure.advance(spaces, flags);
        let limit = self.options.min_resize_width;
        if limit > 0 && width > Fixed::from_px(limit) && word.chars().nth(1).is_some() {
            let mut chunks = word.char_indices().peekable();
            while let Some((offset, ch)) = chunks.next() {
                let chunk = &word[offset..offset + ch.len_utf8()];
                let metrics = WordMetrics {
                    position: position + offset,
                    width: self.measure.advance(chunk, flags),
                    rbearing: self.measure.right_bearing(chunk, flags),
                    rpadding: Fixed::ZERO,
                };
                if chunks.peek().is_some() {
                    words.push(Word::ForcedChunk(metrics));
                } else {
                    words.push(Word::Whole(WordMetrics {
                        rpadding,
                        ..metrics
                    }));
                }
            }
            return;
        }
        words.push(Word::Whole(WordMetrics {
            position,
            width,
            rbearing: self.measure.right_bearing(word, flags),
            rpadding,
        }));
    }

    /// Pushes a built-in emoji spelled `text` in the backing text.
    pub fn push_emoji(&mut self, text: &str, emoji: EmojiId) {
        let width = self.measure.emoji_advance(self.flags);
        self.push_inline(text, width, BlockKind::Emoji(emoji));
    }

    /// Pushes a custom glyph spelled `text` in the backing text.
    pub fn push_custom_emoji(&mut self, text: &str, custom: Box<dyn CustomEmoji>) {
        let width = Fixed::from_px(custom.width());
        self.push_inline(text, width, BlockKind::CustomEmoji(custom));
    }

    fn push_inline(&mut self, text: &str, width: Fixed, kind: BlockKind) {
        let position = self.string.text.len();
        self.string.text.push_str(text);
        let height = self.measure.height(self.flags);
        self.string.blocks.push(Block::inline(
            position, self.flags, self.link, width, height, kind,
        ));
    }

    /// Reserves `width` by `height` pixels after the text. Must come last.
    pub fn push_skip(&mut self, width: i32, height: i32) {
        let position = self.string.text.len();
        self.string.text.push('_');
        self.string.blocks.push(Block::skip(position, width, height));
    }

    /// Records an edit applied to the source text.
    pub fn push_modification(&mut self, modification: Modification) {
        self.string.ensure_extended().modifications.push(modification);
    }

    /// Validates the runs and computes the natural size.
    pub fn build(self, style: TextStyle) -> Result<RichString, Error> {
        self.validate()?;
        let mut string = self.string;
        string.style = style;

        if string.blocks.iter().any(|block| block.flags.contains(StyleFlags::SPOILER)) {
            string.ensure_extended().create_spoiler();
        }
        if string.extended.as_deref().is_some_and(|extended| extended.is_empty()) {
            string.extended = None;
        }
        classify_content(&mut string);
        string.recount_natural_size(true, self.options.direction);
        log::trace!(
            "built {} blocks over {} bytes, natural size {}x{}",
            string.blocks.len(),
            string.text.len(),
            string.max_width,
            string.min_height
        );
        Ok(string)
    }

    fn validate(&self) -> Result<(), Error> {
        let links = self
            .string
            .extended
            .as_deref()
            .map_or(0, |extended| extended.links.len());
        let paragraphs = self.string.paragraphs().len();
        if usize::from(self.string.start_paragraph_index) > paragraphs {
            return Err(Error::paragraph_out_of_range(
                0,
                self.string.start_paragraph_index,
                paragraphs,
            ));
        }
        let count = self.string.blocks.len();
        for (index, block) in self.string.blocks.iter().enumerate() {
            if usize::from(block.link_index) > links {
                return Err(Error::link_out_of_range(index, block.link_index, links));
            }
            match block.kind {
                BlockKind::Newline {
                    paragraph_index, ..
                } if usize::from(paragraph_index) > paragraphs => {
                    return Err(Error::paragraph_out_of_range(
                        index,
                        paragraph_index,
                        paragraphs,
                    ));
                }
                BlockKind::Skip if index + 1 != count => {
                    return Err(Error::skip_not_last(index, count));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// Computes the emoji-related summary flags of a freshly built string.
fn classify_content(string: &mut RichString) {
    let mut has_custom_emoji = false;
    let mut has_emoji = false;
    let mut has_text = false;
    let mut has_text_run = false;
    let mut has_newline = false;
    let mut has_link = false;
    let mut content = 0;
    for (index, block) in string.blocks.iter().enumerate() {
        has_link |= block.link_index != 0;
        match &block.kind {
            BlockKind::Text { .. } => {
                let end = string.block_end(index);
                has_text |= string.text[block.position..end]
                    .chars()
                    .any(|ch| !is_space(ch));
                has_text_run = true;
            }
            BlockKind::Newline { .. } => has_newline = true,
            BlockKind::Skip => {}
            BlockKind::Emoji(_) => {
                has_emoji = true;
                content += 1;
            }
            BlockKind::CustomEmoji(_) => {
                has_custom_emoji = true;
                content += 1;
            }
        }
    }
    let spoilers = string.has_spoilers();
    string.has_custom_emoji = has_custom_emoji;
    string.has_not_emoji_and_spaces = has_text;
    string.is_isolated_emoji = content > 0
        && content <= ISOLATED_EMOJI_LIMIT
        && !has_text_run
        && !has_newline
        && !has_link
        && !spoilers;
    string.is_only_custom_emoji = has_custom_emoji && !has_emoji && !has_text && !has_link;
}
