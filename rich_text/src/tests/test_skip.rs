// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use text_primitives::Margins;

use crate::{ErrorKind, ParagraphDetails, TextSelection, TextStyle, testenv};

use super::utils::{LINE_HEIGHT, framed_style};

#[test]
fn skip_block_reserves_trailing_space() {
    let env = testenv!();
    let mut string = env.plain("Hello");
    assert!(string.update_skip_block(30, 10), "added");
    assert!(string.has_skip_block(), "present");
    assert_eq!(string.text(), "Hello_", "sentinel appended");
    assert_eq!(string.max_width(), 80, "space reserved on the line");
    assert_eq!(string.min_height(), LINE_HEIGHT, "same line");
    assert_eq!(
        string.to_plain_text(TextSelection::ALL),
        "Hello",
        "sentinel is not exported"
    );

    assert!(!string.update_skip_block(30, 10), "same size");
    assert!(string.update_skip_block(40, 10), "resized");
    assert_eq!(string.max_width(), 90, "new size");
    assert_eq!(string.text(), "Hello_", "one sentinel");
}

#[test]
fn removing_the_skip_block_restores_the_text() {
    let env = testenv!();
    let mut string = env.plain("Hello");
    assert!(!string.remove_skip_block(), "nothing to remove");
    string.update_skip_block(30, 10);
    assert!(string.remove_skip_block(), "removed");
    assert_eq!(string.text(), "Hello", "sentinel dropped");
    assert_eq!(string.max_width(), 50, "natural width restored");
}

#[test]
fn skip_after_framed_paragraph_goes_on_its_own_line() {
    let padding = Margins::new(0, 3, 0, 4);
    let env = testenv!().with_style(framed_style(padding));
    let mut builder = env.builder();
    builder.push_paragraph(Some(ParagraphDetails::pre("")));
    builder.push_text("ab");
    let mut string = env.build(builder);
    let framed = LINE_HEIGHT + padding.top + padding.bottom;
    assert_eq!(string.min_height(), framed, "one framed line");

    string.update_skip_block(30, 10);
    assert_eq!(string.text(), "ab\n_", "break before the sentinel");
    assert_eq!(string.min_height(), framed + 10, "spacer line");
    assert!(!string.ends_with_paragraph_details(), "spacer is unframed");

    string.remove_skip_block();
    assert_eq!(string.text(), "ab", "break dropped too");
    assert_eq!(string.min_height(), framed, "back to one line");
}

#[test]
fn skip_must_be_last() {
    let env = testenv!();
    let mut builder = env.builder();
    builder.push_skip(10, 10);
    builder.push_text("late");
    let error = builder.build(TextStyle::default()).expect_err("skip before text");
    assert_eq!(error.kind(), ErrorKind::SkipNotLast, "kind");
    assert_eq!(error.block(), 0, "offending block");
}

#[test]
fn links_must_be_registered() {
    let env = testenv!();
    let mut builder = env.builder();
    builder.set_link(2);
    builder.push_text("dangling");
    let error = builder.build(TextStyle::default()).expect_err("unregistered link");
    assert_eq!(error.kind(), ErrorKind::LinkOutOfRange, "kind");
    assert_eq!(error.value(), 2, "offending index");
    assert_eq!(error.limit(), 0, "no links");
}
