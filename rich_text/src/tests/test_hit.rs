// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::rc::Rc;

use crate::{ClickHandler, EntityLink, EntityType, SimpleGeometry, testenv};

use super::utils::LINE_HEIGHT;

#[test]
fn hit_inside_a_word() {
    let env = testenv!();
    let string = env.plain("Hello world");
    let policy = SimpleGeometry::new(200, LINE_HEIGHT);

    let state = string.state_at(12, 5, &policy);
    assert!(state.upon_symbol, "over Hello");
    assert!(!state.after_symbol, "first half");
    assert_eq!(state.symbol, 0, "Hello starts the text");

    let state = string.state_at(25, 5, &policy);
    assert!(state.after_symbol, "second half");

    let state = string.state_at(65, 5, &policy);
    assert!(state.upon_symbol, "over world");
    assert_eq!(state.symbol, 6, "world follows the space");
}

#[test]
fn hit_between_and_after_words() {
    let env = testenv!();
    let string = env.plain("Hello world");
    let policy = SimpleGeometry::new(200, LINE_HEIGHT);

    let state = string.state_at(55, 5, &policy);
    assert!(!state.upon_symbol, "over the space");
    assert!(state.after_symbol, "after Hello");
    assert_eq!(state.symbol, 0, "Hello");

    let state = string.state_at(500, 5, &policy);
    assert!(!state.upon_symbol, "past the end");
    assert!(state.after_symbol, "after world");
    assert_eq!(state.symbol, 6, "world");
}

#[test]
fn hit_in_leading_spaces() {
    let env = testenv!();
    let string = env.plain("  hi");
    let policy = SimpleGeometry::new(200, LINE_HEIGHT);

    let state = string.state_at(5, 5, &policy);
    assert!(!state.upon_symbol, "spaces are not a word");
    assert!(!state.after_symbol, "nothing before them");
    assert_eq!(state.symbol, 0, "start of the line");

    let state = string.state_at(25, 5, &policy);
    assert!(state.upon_symbol, "over hi");
    assert_eq!(state.symbol, 2, "hi follows the spaces");
}

#[test]
fn hit_on_a_wrapped_line() {
    let env = testenv!();
    let string = env.plain("Hello world");
    let policy = SimpleGeometry::new(60, LINE_HEIGHT);

    let state = string.state_at(10, LINE_HEIGHT + 5, &policy);
    assert!(state.upon_symbol, "over world");
    assert_eq!(state.symbol, 6, "second line");

    let state = string.state_at(10, 10 * LINE_HEIGHT, &policy);
    assert_eq!(state.symbol, 6, "below the text resolves on the last line");
}

#[test]
fn hit_resolves_links() {
    let env = testenv!();
    let mut builder = env.builder();
    builder.push_text("see ");
    let handler: Rc<dyn ClickHandler> = Rc::new(EntityLink::new(EntityType::Url, "https://a.b"));
    let link = builder.add_link(Some(handler));
    builder.set_link(link);
    builder.push_text("a.b");
    builder.set_link(0);
    let string = env.build(builder);
    let policy = SimpleGeometry::new(200, LINE_HEIGHT);

    let state = string.state_at(45, 5, &policy);
    let found = state.link.map(|link| link.text_entity().kind);
    assert_eq!(found, Some(EntityType::Url), "over the link");

    let state = string.state_at(5, 5, &policy);
    assert!(state.link.is_none(), "plain text");
}

#[test]
fn hit_on_empty_string() {
    let env = testenv!();
    let string = env.plain("");
    let state = string.state_at(5, 5, &SimpleGeometry::new(100, LINE_HEIGHT));
    assert!(!state.upon_symbol, "nothing to hit");
    assert!(state.link.is_none(), "no link");
}
