// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Natural size of the text.

use text_primitives::{BaseDirection, Fixed};
use unicode_bidi::{Direction, get_base_direction};

use crate::block::BlockKind;
use crate::string::RichString;

/// Direction of the first strong character of `text`.
fn detect_direction(text: &str) -> BaseDirection {
    match get_base_direction(text) {
        Direction::Ltr => BaseDirection::Ltr,
        Direction::Rtl => BaseDirection::Rtl,
        Direction::Mixed => BaseDirection::Auto,
    }
}

impl RichString {
    /// Recomputes the natural width and height.
    ///
    /// The accumulation matches the line breaker exactly, so text laid out at its
    /// natural width never wraps and adds up to the natural height. An `initial` pass
    /// also assigns paragraph directions, `forced` unless it is `Auto`.
    pub(crate) fn recount_natural_size(&mut self, initial: bool, forced: BaseDirection) {
        if initial {
            self.assign_directions(forced);
        }

        let mut paragraph = self.start_paragraph_index;
        let mut padding = self.paragraph_padding(paragraph);

        let mut min_height = 0;
        let mut line_height = 0;
        let mut max_width = Fixed::ZERO;
        let mut width = Fixed::from_px(padding.horizontal());
        let mut last_rbearing = Fixed::ZERO;
        let mut last_rpadding = Fixed::ZERO;
        for block in &self.blocks {
            let block_height = block.line_height(&self.style);
            if let Some(index) = block.paragraph_index() {
                if line_height == 0 {
                    line_height = block_height;
                }
                line_height += padding.top;
                if index != paragraph {
                    line_height += padding.bottom;
                    paragraph = index;
                    padding = self.paragraph_padding(paragraph);
                } else {
                    padding.top = 0;
                }
                min_height += line_height;
                line_height = 0;
                last_rbearing = Fixed::ZERO;
                last_rpadding = Fixed::ZERO;

                max_width = max_width.max(width);
                width = Fixed::from_px(padding.horizontal());
                continue;
            }

            // A negative bearing can shrink the line, so the peak may be mid-line.
            max_width = max_width.max(width);

            width += last_rbearing + (last_rpadding + block.width - block.rbearing);
            line_height = line_height.max(block_height);

            last_rbearing = block.rbearing;
            last_rpadding = block.rpadding;
        }
        if width > Fixed::ZERO {
            if line_height == 0 {
                line_height = self
                    .blocks
                    .last()
                    .map_or(0, |block| block.line_height(&self.style));
            }
            min_height += padding.top + line_height + padding.bottom;
            max_width = max_width.max(width);
        }
        self.max_width = max_width.ceil_px();
        self.min_height = min_height;
        self.ends_with_paragraph_details = paragraph != 0;
        log::trace!(
            "natural size {}x{} over {} blocks",
            self.max_width,
            self.min_height,
            self.blocks.len()
        );
    }

    fn assign_directions(&mut self, forced: BaseDirection) {
        let mut owner = None;
        let mut start = 0;
        for index in 0..self.blocks.len() {
            if !self.blocks[index].is_newline() {
                continue;
            }
            let end = self.blocks[index].position;
            let direction = forced.or_else(|| detect_direction(&self.text[start..end]));
            self.set_paragraph_direction(owner, direction);
            owner = Some(index);
            start = self.block_end(index);
        }
        let direction = forced.or_else(|| detect_direction(&self.text[start..]));
        self.set_paragraph_direction(owner, direction);
    }

    fn set_paragraph_direction(&mut self, newline: Option<usize>, value: BaseDirection) {
        let Some(index) = newline else {
            self.start_direction = value;
            return;
        };
        if let BlockKind::Newline { direction, .. } = &mut self.blocks[index].kind {
            *direction = value;
        }
    }

    /// Widest paragraph made only of monospace runs, in pixels.
    ///
    /// A paragraph counts only if every run in it is code, pre-formatted or the skip
    /// block.
    pub fn count_max_monospace_width(&self) -> i32 {
        let mut result = Fixed::ZERO;
        let mut paragraph_width = Fixed::ZERO;
        let mut full_monospace = true;
        let mut width = Fixed::ZERO;
        let mut last_rbearing = Fixed::ZERO;
        let mut last_rpadding = Fixed::ZERO;
        for block in &self.blocks {
            if block.is_newline() {
                last_rbearing = block.rbearing;
                last_rpadding = block.rpadding;
                if full_monospace {
                    paragraph_width = paragraph_width.max(width);
                    result = result.max(paragraph_width);
                } else {
                    full_monospace = true;
                }
                paragraph_width = Fixed::ZERO;
                width = block.width - last_rbearing;
                continue;
            }
            if !block.flags.is_mono() && !block.is_skip() {
                full_monospace = false;
            }
            if full_monospace {
                paragraph_width = paragraph_width.max(width);
            }
            width += last_rbearing + (last_rpadding + block.width - block.rbearing);

            last_rbearing = block.rbearing;
            last_rpadding = block.rpadding;
        }
        if width > Fixed::ZERO && full_monospace {
            paragraph_width = paragraph_width.max(width);
            result = result.max(paragraph_width);
        }
        result.ceil_px()
    }
}
