// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Size queries, line breaking and hit-testing.

mod hit;
mod line;
mod natural;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
use core::ops::ControlFlow;

use text_primitives::Fixed;

use crate::string::RichString;

pub use hit::StateResult;
pub use line::{GeometryPolicy, LineDescriptor, LineGeometry, SimpleGeometry};

use line::greedy::{BrokenLine, LineSink, break_lines};

/// Options of the width constrained size queries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LineWidthsOptions {
    /// Break between any two units, not only at word ends.
    pub break_everywhere: bool,
    /// Expected number of lines, to preallocate.
    pub reserve: usize,
}

/// Lays every line out at the same width.
struct UniformWidth<F> {
    width: i32,
    line: F,
}

impl<F: FnMut(BrokenLine)> LineSink for UniformWidth<F> {
    fn line_width(&mut self, _top: i32) -> i32 {
        self.width
    }

    fn line(&mut self, line: BrokenLine) -> ControlFlow<()> {
        (self.line)(line);
        ControlFlow::Continue(())
    }
}

impl RichString {
    fn enumerate_lines(&self, width: i32, break_everywhere: bool, line: impl FnMut(BrokenLine)) {
        break_lines(self, break_everywhere, &mut UniformWidth { width, line });
    }

    /// Width of the text wrapped at `width`.
    pub fn count_width(&self, width: i32) -> i32 {
        self.count_width_with(width, LineWidthsOptions::default())
    }

    /// Width of the text wrapped at `width` with `options`.
    ///
    /// Equals [`max_width`](Self::max_width) whenever `width` is at least as wide.
    pub fn count_width_with(&self, width: i32, options: LineWidthsOptions) -> i32 {
        if width >= self.max_width {
            return self.max_width;
        }
        let mut max = Fixed::ZERO;
        self.enumerate_lines(width, options.break_everywhere, |line| {
            max = max.max(line.width);
        });
        max.ceil_px()
    }

    /// Height of the text wrapped at `width`.
    pub fn count_height(&self, width: i32) -> i32 {
        self.count_height_with(width, LineWidthsOptions::default())
    }

    /// Height of the text wrapped at `width` with `options`.
    ///
    /// Equals [`min_height`](Self::min_height) whenever `width` is at least the
    /// natural width.
    pub fn count_height_with(&self, width: i32, options: LineWidthsOptions) -> i32 {
        if width >= self.max_width {
            return self.min_height;
        }
        let mut height = 0;
        self.enumerate_lines(width, options.break_everywhere, |line| {
            height += line.height;
        });
        height
    }

    /// Width in pixels of each line of the text wrapped at `width`.
    pub fn count_line_widths(&self, width: i32) -> Vec<i32> {
        self.count_line_widths_with(width, LineWidthsOptions::default())
    }

    /// Width in pixels of each line of the text wrapped at `width` with `options`.
    pub fn count_line_widths_with(&self, width: i32, options: LineWidthsOptions) -> Vec<i32> {
        let mut widths = Vec::with_capacity(options.reserve);
        self.enumerate_lines(width, options.break_everywhere, |line| {
            widths.push(line.width.ceil_px());
        });
        widths
    }
}
