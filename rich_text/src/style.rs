// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style metrics consumed by layout.

use core::fmt::Debug;

use text_primitives::Margins;

/// Trait for types that represent the color of painted content.
pub trait Brush: Clone + PartialEq + Default + Debug {}

impl<T: Clone + PartialEq + Default + Debug> Brush for T {}

/// Straight-alpha RGBA color.
pub type Color = [u8; 4];

/// Framing of a pre-formatted or quoted paragraph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParagraphStyle {
    /// Padding between the frame and the text.
    pub padding: Margins,
    /// Height of the header strip (language label of code blocks).
    pub header: i32,
    /// Extra vertical space added above and below the frame.
    pub vertical_skip: i32,
    /// Width of the leading outline bar.
    pub outline: i32,
    /// Corner radius of the background.
    pub radius: i32,
    /// Background fill.
    pub background: Color,
    /// Outline bar fill.
    pub outline_color: Color,
    /// Header strip fill.
    pub header_color: Color,
}

impl ParagraphStyle {
    /// Total space reserved around the text of a framed paragraph.
    ///
    /// The header and the vertical skip are added to the configured padding.
    pub fn frame_padding(&self) -> Margins {
        let skip = self.vertical_skip;
        self.padding + Margins::new(0, self.header + skip, 0, skip)
    }
}

/// Metrics shared by every string laid out with the same style.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextStyle {
    /// Height of the base font in pixels.
    pub font_height: i32,
    /// Minimal line height in pixels, `0` to use run heights only.
    pub line_height: i32,
    /// Framing of pre-formatted paragraphs.
    pub pre: ParagraphStyle,
    /// Framing of quoted paragraphs.
    pub blockquote: ParagraphStyle,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_height: 16,
            line_height: 0,
            pre: ParagraphStyle::default(),
            blockquote: ParagraphStyle::default(),
        }
    }
}
