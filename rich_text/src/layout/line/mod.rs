// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

pub(crate) mod greedy;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
use core::ops::{ControlFlow, Range};

use text_primitives::BaseDirection;

use crate::string::RichString;

use greedy::{BrokenLine, LineSink, break_lines};

/// Placement of a line, as decided by a [`GeometryPolicy`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LineGeometry {
    /// Horizontal offset of the line.
    pub left: i32,
    /// Vertical offset of the line.
    pub top: i32,
    /// Available width of the line.
    pub width: i32,
    /// The line is the last one shown and must be elided if text remains.
    pub elided: bool,
}

/// Decides the placement of each line.
pub trait GeometryPolicy {
    /// Completes the geometry of the line starting at `line.top`.
    fn layout(&self, line: LineGeometry) -> LineGeometry;

    /// Break between any two units, not only at word ends.
    fn break_everywhere(&self) -> bool {
        false
    }
}

impl<F: Fn(LineGeometry) -> LineGeometry> GeometryPolicy for F {
    fn layout(&self, line: LineGeometry) -> LineGeometry {
        self(line)
    }
}

/// The common policies: full width lines, optionally elided after a number of lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimpleGeometry {
    /// Width of every line.
    pub available_width: i32,
    /// Height of one line, used to find the last line that fits.
    pub font_height: i32,
    /// Height the lines must fit in, `0` for no limit.
    pub elision_height: i32,
    /// Width reserved at the end of an elided line.
    pub elision_remove_from_end: i32,
    /// Elide the first line.
    pub elision_one_line: bool,
    /// Break a one line elided text anywhere.
    pub elision_break_everywhere: bool,
}

impl SimpleGeometry {
    /// Full width lines without elision.
    pub fn new(available_width: i32, font_height: i32) -> Self {
        Self {
            available_width,
            font_height,
            ..Self::default()
        }
    }

    /// Lines elided after `lines` lines, reserving `remove_from_end` pixels at the end of
    /// the last one.
    pub fn elided(
        available_width: i32,
        font_height: i32,
        lines: i32,
        remove_from_end: i32,
        break_everywhere: bool,
    ) -> Self {
        Self {
            available_width,
            font_height,
            elision_height: if lines > 1 { lines * font_height } else { 0 },
            elision_remove_from_end: remove_from_end,
            elision_one_line: lines == 1,
            elision_break_everywhere: break_everywhere,
        }
    }
}

impl GeometryPolicy for SimpleGeometry {
    fn layout(&self, mut line: LineGeometry) -> LineGeometry {
        if self.elision_one_line {
            line.elided = true;
            line.width = self.available_width - self.elision_remove_from_end;
        } else if self.elision_height == 0 {
            line.width = self.available_width;
        } else if line.top + self.font_height * 2 > self.elision_height {
            line.elided = true;
            line.width = self.available_width - self.elision_remove_from_end;
        } else {
            line.width = self.available_width;
        }
        line
    }

    fn break_everywhere(&self) -> bool {
        self.elision_one_line && self.elision_break_everywhere
    }
}

/// A laid out line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineDescriptor {
    /// Horizontal offset of the line.
    pub left: i32,
    /// Vertical offset of the line.
    pub top: i32,
    /// Width used by the line, rounded up.
    pub width: i32,
    /// Width the line was laid out in.
    pub available_width: i32,
    /// Height of the line, paragraph paddings included.
    pub height: i32,
    /// The line is the last one shown and must be elided if text remains.
    pub elided: bool,
    /// Paragraph the line belongs to.
    pub paragraph_index: u16,
    /// Direction of that paragraph.
    pub direction: BaseDirection,
    /// Bytes of the backing text laid out on the line.
    pub text_range: Range<usize>,
}

struct PolicyLines<'p, P: ?Sized> {
    policy: &'p P,
    current: LineGeometry,
    lines: Vec<LineDescriptor>,
}

impl<P: GeometryPolicy + ?Sized> LineSink for PolicyLines<'_, P> {
    fn line_width(&mut self, top: i32) -> i32 {
        self.current = self.policy.layout(LineGeometry {
            top,
            ..LineGeometry::default()
        });
        self.current.width
    }

    fn line(&mut self, line: BrokenLine) -> ControlFlow<()> {
        let elided = self.current.elided;
        self.lines.push(LineDescriptor {
            left: self.current.left,
            top: line.top,
            width: line.width.ceil_px(),
            available_width: self.current.width,
            height: line.height,
            elided,
            paragraph_index: line.paragraph_index,
            direction: line.direction,
            text_range: line.text_range,
        });
        if elided {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}

impl RichString {
    /// Lays the text out line by line under `policy`.
    ///
    /// Stops after the first elided line.
    pub fn lines<P: GeometryPolicy + ?Sized>(&self, policy: &P) -> Vec<LineDescriptor> {
        let mut sink = PolicyLines {
            policy,
            current: LineGeometry::default(),
            lines: Vec::new(),
        };
        break_lines(self, policy.break_everywhere(), &mut sink);
        sink.lines
    }
}
