// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit-testing.

use alloc::rc::Rc;

use text_primitives::{Fixed, StyleFlags};

use crate::block::{Block, BlockKind};
use crate::link::ClickHandler;
use crate::string::RichString;

use super::line::{GeometryPolicy, LineDescriptor};

/// What lies under a point.
#[derive(Clone, Debug, Default)]
pub struct StateResult {
    /// Handler of the link under the point.
    pub link: Option<Rc<dyn ClickHandler>>,
    /// The point is over a unit of text.
    pub upon_symbol: bool,
    /// The point is past the middle of the unit, or after it.
    pub after_symbol: bool,
    /// Byte offset of the unit in the backing text.
    pub symbol: usize,
}

/// A unit a line is made of, in pixels relative to the line start.
#[derive(Clone, Copy, Debug)]
struct Unit {
    position: usize,
    width: Fixed,
    rbearing: Fixed,
    rpadding: Fixed,
}

impl RichString {
    /// Finds what lies at `(x, y)` when the text is laid out under `policy`.
    ///
    /// Points above the text resolve on the first line, points below it on the last.
    pub fn state_at<P: GeometryPolicy + ?Sized>(&self, x: i32, y: i32, policy: &P) -> StateResult {
        if self.is_empty() {
            return StateResult::default();
        }
        let lines = self.lines(policy);
        let Some(line) = lines
            .iter()
            .find(|line| y < line.top + line.height)
            .or_else(|| lines.last())
        else {
            return StateResult::default();
        };
        self.state_in_line(line, Fixed::from_px(x))
    }

    fn state_in_line(&self, line: &LineDescriptor, x: Fixed) -> StateResult {
        let padding = self.paragraph_padding(line.paragraph_index);
        let mut cursor = Fixed::from_px(line.left + padding.left);
        let mut last_rbearing = Fixed::ZERO;
        let mut last_rpadding = Fixed::ZERO;
        let mut result = StateResult {
            symbol: line.text_range.start,
            ..StateResult::default()
        };
        for block in &self.blocks {
            if block.position >= line.text_range.end {
                break;
            }
            for unit in units(block) {
                if unit.position >= line.text_range.end {
                    return result;
                }
                if unit.position < line.text_range.start {
                    continue;
                }
                let begin = cursor + last_rbearing + last_rpadding;
                if x < begin {
                    return result;
                }
                if x < begin + unit.width {
                    return self.state_upon(block, unit, x >= begin + half(unit.width));
                }
                result = StateResult {
                    link: None,
                    upon_symbol: false,
                    after_symbol: true,
                    symbol: unit.position,
                };
                cursor = begin + unit.width - unit.rbearing;
                last_rbearing = unit.rbearing;
                last_rpadding = unit.rpadding;
            }
            // Whitespace only runs widen the gap after the previous unit.
            if matches!(block.kind, BlockKind::Text { .. })
                && block.words().is_empty()
                && block.position >= line.text_range.start
            {
                last_rpadding += block.rpadding;
            }
        }
        result
    }

    fn state_upon(&self, block: &Block, unit: Unit, after: bool) -> StateResult {
        if block.is_skip() {
            return StateResult {
                link: None,
                upon_symbol: false,
                after_symbol: true,
                symbol: unit.position,
            };
        }
        let hidden = block.flags.contains(StyleFlags::SPOILER) && !self.spoiler_revealed();
        let link = if hidden {
            self.spoiler_link()
        } else {
            self.link(block.link_index)
        };
        StateResult {
            link,
            upon_symbol: true,
            after_symbol: after,
            symbol: unit.position,
        }
    }
}

fn half(width: Fixed) -> Fixed {
    Fixed::from_raw(width.raw() / 2)
}

/// The units of `block` in text order.
fn units(block: &Block) -> impl Iterator<Item = Unit> + '_ {
    let inline = match block.kind {
        BlockKind::Emoji(_) | BlockKind::CustomEmoji(_) | BlockKind::Skip => Some(Unit {
            position: block.position,
            width: block.width,
            rbearing: block.rbearing,
            rpadding: block.rpadding,
        }),
        BlockKind::Text { .. } | BlockKind::Newline { .. } => None,
    };
    let words = block.words().iter().map(|word| {
        let metrics = word.metrics();
        Unit {
            position: metrics.position,
            width: metrics.width,
            rbearing: metrics.rbearing,
            rpadding: metrics.rpadding,
        }
    });
    inline.into_iter().chain(words)
}
