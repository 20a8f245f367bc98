// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Greedy line breaking.

use core::ops::{ControlFlow, Range};

use text_primitives::{BaseDirection, Fixed, Margins};

use crate::block::{Block, BlockKind, Word};
use crate::string::RichString;

/// A line produced by the breaker.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct BrokenLine {
    /// Width used by the line, paragraph paddings included.
    pub(crate) width: Fixed,
    /// Height of the line, paragraph paddings included.
    pub(crate) height: i32,
    /// Sum of the heights of the previous lines.
    pub(crate) top: i32,
    /// Paragraph the line belongs to.
    pub(crate) paragraph_index: u16,
    /// Direction of that paragraph.
    pub(crate) direction: BaseDirection,
    /// Bytes of the backing text laid out on the line.
    pub(crate) text_range: Range<usize>,
}

/// Consumer of broken lines.
pub(crate) trait LineSink {
    /// Available width in pixels of the line starting at `top`.
    fn line_width(&mut self, top: i32) -> i32;

    /// Receives a finished line. Breaking stops on [`ControlFlow::Break`].
    fn line(&mut self, line: BrokenLine) -> ControlFlow<()>;
}

/// Breaks `string` into lines as wide as `sink` allows.
pub(crate) fn break_lines<S: LineSink>(string: &RichString, break_everywhere: bool, sink: &mut S) {
    let mut breaker = BreakLines::new(string, break_everywhere, sink);
    // A break only means the sink has seen enough lines.
    let _ = breaker.run();
}

#[derive(Clone, Debug)]
struct LineState {
    /// Available width, paragraph paddings included.
    width: Fixed,
    /// Width not used yet.
    width_left: Fixed,
    height: i32,
    last_rbearing: Fixed,
    last_rpadding: Fixed,
    /// The line started inside a word that did not fit a line of its own.
    long_word_line: bool,
    has_content: bool,
    start: usize,
}

impl LineState {
    fn new(width: Fixed, padding: Margins, start: usize) -> Self {
        Self {
            width,
            width_left: width - Fixed::from_px(padding.horizontal()),
            height: 0,
            last_rbearing: Fixed::ZERO,
            last_rpadding: Fixed::ZERO,
            long_word_line: true,
            has_content: false,
            start,
        }
    }

    /// Width left after appending a unit. Negative when it does not fit.
    fn width_left_after(&self, width: Fixed, rbearing: Fixed) -> Fixed {
        self.width_left - self.last_rbearing - (self.last_rpadding + width - rbearing)
    }

    fn append(&mut self, width_left: Fixed, rbearing: Fixed, rpadding: Fixed, height: i32) {
        self.width_left = width_left;
        self.last_rbearing = rbearing;
        self.last_rpadding = rpadding;
        self.height = self.height.max(height);
        self.has_content = true;
    }
}

struct BreakLines<'a, S> {
    string: &'a RichString,
    sink: &'a mut S,
    break_everywhere: bool,
    paragraph: u16,
    direction: BaseDirection,
    /// Paddings of the current paragraph. The top one is cleared once charged.
    padding: Margins,
    top: i32,
    line: LineState,
}

impl<'a, S: LineSink> BreakLines<'a, S> {
    fn new(string: &'a RichString, break_everywhere: bool, sink: &'a mut S) -> Self {
        let paragraph = string.start_paragraph_index;
        let padding = string.paragraph_padding(paragraph);
        let width = Self::available_width(string, sink, 0);
        Self {
            string,
            sink,
            break_everywhere,
            paragraph,
            direction: string.start_direction,
            padding,
            top: 0,
            line: LineState::new(width, padding, 0),
        }
    }

    fn available_width(string: &RichString, sink: &mut S, top: i32) -> Fixed {
        Fixed::from_px(sink.line_width(top).max(string.min_resize_width))
    }

    fn emit(&mut self, height: i32, end: usize) -> ControlFlow<()> {
        let line = BrokenLine {
            width: self.line.width - self.line.width_left,
            height,
            top: self.top,
            paragraph_index: self.paragraph,
            direction: self.direction,
            text_range: self.line.start..end,
        };
        self.top += height;
        self.sink.line(line)
    }

    /// Ends the current line before `position` and charges the pending top padding.
    fn wrap(&mut self, position: usize) -> ControlFlow<()> {
        self.emit(self.line.height + self.padding.top, position)?;
        self.padding.top = 0;
        self.start_line(position);
        ControlFlow::Continue(())
    }

    fn start_line(&mut self, start: usize) {
        let width = Self::available_width(self.string, self.sink, self.top);
        self.line = LineState::new(width, self.padding, start);
    }

    fn run(&mut self) -> ControlFlow<()> {
        let string = self.string;
        for (index, block) in string.blocks.iter().enumerate() {
            let block_height = block.line_height(&string.style);
            if let BlockKind::Newline {
                paragraph_index,
                direction,
            } = block.kind
            {
                self.hard_break(block, block_height, paragraph_index)?;
                self.direction = direction;
                self.start_line(string.block_end(index));
                continue;
            }

            let width_left = self.line.width_left_after(block.width, block.rbearing);
            if width_left >= Fixed::ZERO {
                self.line
                    .append(width_left, block.rbearing, block.rpadding, block_height);
                self.line.long_word_line = false;
                continue;
            }

            if let BlockKind::Text { words } = &block.kind {
                if words.is_empty() {
                    // Whitespace only: keep it on this line.
                    self.line.last_rpadding += block.rpadding;
                    self.line.height = self.line.height.max(block_height);
                    self.line.has_content = true;
                    self.line.long_word_line = false;
                    continue;
                }
                self.place_words(words, block_height)?;
                continue;
            }

            if self.line.has_content {
                self.wrap(block.position)?;
            }
            let width_left = self.line.width_left_after(block.width, block.rbearing);
            self.line
                .append(width_left, block.rbearing, block.rpadding, block_height);
            self.line.long_word_line = true;
        }
        if self.line.width_left < self.line.width {
            let mut height = self.line.height;
            if height == 0 {
                height = string
                    .blocks
                    .last()
                    .map_or(0, |block| block.line_height(&string.style));
            }
            let height = height + self.padding.top + self.padding.bottom;
            self.emit(height, string.text.len())?;
        }
        ControlFlow::Continue(())
    }

    fn hard_break(&mut self, block: &Block, block_height: i32, index: u16) -> ControlFlow<()> {
        let mut height = if self.line.height == 0 {
            block_height
        } else {
            self.line.height
        };
        height += self.padding.top;
        let previous = self.paragraph;
        if index != previous {
            height += self.padding.bottom;
        }
        self.emit(height, block.position)?;
        if index != previous {
            self.paragraph = index;
            self.padding = self.string.paragraph_padding(index);
        } else {
            self.padding.top = 0;
        }
        ControlFlow::Continue(())
    }

    fn place_words(&mut self, words: &[Word], block_height: i32) -> ControlFlow<()> {
        // Rollback point: the end of the last unit the line may break after.
        let mut anchor = 0;
        let mut anchor_width_left = self.line.width_left;
        let mut anchor_height = self.line.height;

        let mut j = 0;
        while j < words.len() {
            let word = &words[j];
            let metrics = word.metrics();
            let width_left = self.line.width_left_after(metrics.width, metrics.rbearing);
            if width_left >= Fixed::ZERO || !self.line.has_content {
                self.line
                    .append(width_left, metrics.rbearing, metrics.rpadding, block_height);
                if word.ends_word() {
                    self.line.long_word_line = false;
                }
                if word.ends_word() || self.line.long_word_line {
                    anchor = j + 1;
                    anchor_width_left = self.line.width_left;
                    anchor_height = self.line.height;
                }
                j += 1;
                continue;
            }

            if anchor != j && !self.break_everywhere {
                j = anchor;
                self.line.width_left = anchor_width_left;
                self.line.height = anchor_height;
            }

            let word = &words[j];
            let metrics = word.metrics();
            self.wrap(metrics.position)?;
            let width_left = self.line.width_left_after(metrics.width, metrics.rbearing);
            self.line
                .append(width_left, metrics.rbearing, metrics.rpadding, block_height);
            self.line.long_word_line = !word.ends_word();

            j += 1;
            anchor = j;
            anchor_width_left = self.line.width_left;
            anchor_height = self.line.height;
        }
        ControlFlow::Continue(())
    }
}
