// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use text_primitives::{BaseDirection, Fixed, Margins, StyleFlags};

use crate::{BlockKind, ParagraphDetails, ParseOptions, testenv};

use super::utils::{CHAR_WIDTH, LINE_HEIGHT, framed_style};

#[test]
fn single_line_natural_size() {
    let env = testenv!();
    let string = env.plain("Hello world");
    assert_eq!(string.max_width(), 110, "two words and a space");
    assert_eq!(string.min_height(), LINE_HEIGHT, "one line");
    assert_eq!(string.blocks().len(), 1, "one text run");
    assert_eq!(string.blocks()[0].words().len(), 2, "two words");
}

#[test]
fn trailing_spaces_are_padding() {
    let env = testenv!();
    let string = env.plain("Hi  ");
    assert_eq!(string.max_width(), 20, "trailing spaces do not count");
    let block = &string.blocks()[0];
    assert_eq!(block.rpadding().ceil_px(), 20, "charged as right padding");
}

#[test]
fn leading_spaces_pad_the_previous_unit() {
    let env = testenv!();
    let string = env.plain("  hi");
    assert_eq!(string.blocks().len(), 2, "spaces split off");
    assert!(string.blocks()[0].words().is_empty(), "whitespace only run");
    assert_eq!(
        string.blocks()[0].rpadding().ceil_px(),
        2 * CHAR_WIDTH,
        "two spaces of padding"
    );
    let words = string.blocks()[1].words();
    assert_eq!(words.len(), 1, "no empty word");
    assert_eq!(words[0].metrics().position, 2, "word after the spaces");
    assert_eq!(string.max_width(), 4 * CHAR_WIDTH, "spaces still take room");
}

#[test]
fn trailing_bearing_is_not_charged() {
    let env = testenv!().with_right_bearing(Fixed::from_px(3));
    let string = env.plain("Hello world");
    assert_eq!(string.max_width(), 107, "bearing of world dropped");
    env.check_line_widths(&string, 60, &[47, 47]);

    let mut builder = env.builder();
    builder.push_text("ab");
    builder.push_text("cd");
    let string = env.build(builder);
    assert_eq!(
        string.max_width(),
        4 * CHAR_WIDTH - 3,
        "inner bearing restored by the next run"
    );
}

#[test]
fn negative_bearing_peaks_mid_line() {
    let env = testenv!().with_right_bearing(Fixed::from_px(-3));
    let mut builder = env.builder();
    builder.push_text("ab");
    builder.push_text("  ");
    let string = env.build(builder);
    assert_eq!(
        string.max_width(),
        2 * CHAR_WIDTH + 3,
        "overhang of ab before the spaces"
    );
    assert_eq!(string.min_height(), LINE_HEIGHT, "one line");
    env.check_line_widths(&string, 100, &[2 * CHAR_WIDTH]);
}

#[test]
fn hard_breaks_add_lines() {
    let env = testenv!();
    let string = env.plain("ab\ncdef");
    assert_eq!(string.max_width(), 40, "widest line");
    assert_eq!(string.min_height(), 2 * LINE_HEIGHT, "two lines");

    let string = env.plain("ab\n\ncd");
    assert_eq!(string.min_height(), 3 * LINE_HEIGHT, "empty line in between");
}

#[test]
fn empty_string_has_no_size() {
    let env = testenv!();
    let string = env.plain("");
    assert!(string.is_empty(), "nothing was pushed");
    assert_eq!(string.max_width(), 0, "no width");
    assert_eq!(string.min_height(), 0, "no height");
}

#[test]
fn framed_paragraph_padding_counts_once_per_paragraph() {
    let padding = Margins::new(5, 3, 5, 4);
    let env = testenv!().with_style(framed_style(padding));
    let mut builder = env.builder();
    builder.push_paragraph(Some(ParagraphDetails::pre("rust")));
    builder.push_text("ab");
    builder.push_paragraph(Some(ParagraphDetails::pre("rust")));
    builder.push_text("cd");
    let string = env.build(builder);

    assert_eq!(string.start_paragraph_index(), 1, "framed from the start");
    assert!(string.ends_with_paragraph_details(), "framed at the end");
    assert_eq!(
        string.min_height(),
        2 * padding.top + 2 * padding.bottom + 2 * LINE_HEIGHT,
        "paddings of two paragraphs"
    );
    assert_eq!(
        string.max_width(),
        20 + padding.horizontal(),
        "horizontal padding widens lines"
    );
}

#[test]
fn lines_within_a_framed_paragraph_share_its_padding() {
    let padding = Margins::new(0, 6, 0, 2);
    let env = testenv!().with_style(framed_style(padding));
    let mut builder = env.builder();
    builder.push_text("intro");
    builder.push_paragraph(Some(ParagraphDetails::blockquote()));
    builder.push_text("one\ntwo\nthree");
    builder.push_paragraph(None);
    builder.push_text("outro");
    let string = env.build(builder);

    assert!(!string.ends_with_paragraph_details(), "plain at the end");
    assert_eq!(
        string.min_height(),
        5 * LINE_HEIGHT + padding.top + padding.bottom,
        "quote framed once"
    );
}

#[test]
fn monospace_width_resets_per_paragraph() {
    let env = testenv!();
    let mut builder = env.builder();
    builder.set_flags(StyleFlags::CODE);
    builder.push_text("abc");
    builder.set_flags(StyleFlags::empty());
    builder.push_newline();
    builder.push_text("abcdefg");
    builder.push_newline();
    builder.set_flags(StyleFlags::PRE);
    builder.push_text("abcde");
    let string = env.build(builder);

    assert_eq!(
        string.count_max_monospace_width(),
        50,
        "widest all-monospace paragraph"
    );
}

#[test]
fn mixed_paragraph_is_not_monospace() {
    let env = testenv!();
    let mut builder = env.builder();
    builder.set_flags(StyleFlags::CODE);
    builder.push_text("abc");
    builder.set_flags(StyleFlags::empty());
    builder.push_text("defgh");
    let string = env.build(builder);

    assert_eq!(string.count_max_monospace_width(), 0, "plain run interrupts");
}

#[test]
fn paragraph_directions_are_detected() {
    let env = testenv!();
    let string = env.plain("abc\nשלום\n123");
    assert_eq!(string.start_direction(), BaseDirection::Ltr, "latin first");
    let directions: Vec<_> = string
        .blocks()
        .iter()
        .filter_map(|block| match block.kind() {
            BlockKind::Newline { direction, .. } => Some(*direction),
            _ => None,
        })
        .collect();
    assert_eq!(
        directions,
        [BaseDirection::Rtl, BaseDirection::Auto],
        "hebrew, then digits only"
    );
}

#[test]
fn forced_direction_wins() {
    let env = testenv!().with_options(ParseOptions {
        direction: BaseDirection::Ltr,
        ..ParseOptions::default()
    });
    let string = env.plain("שלום");
    assert_eq!(string.start_direction(), BaseDirection::Ltr, "forced");
}

#[test]
fn clear_drops_everything() {
    let env = testenv!();
    let mut string = env.plain("Hello world");
    string.clear();
    assert!(string.is_empty(), "no blocks");
    assert_eq!(string.text(), "", "no text");
    assert_eq!(string.max_width(), 0, "no width");
    assert_eq!(string.min_height(), 0, "no height");
}
