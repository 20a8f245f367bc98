// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::Cell;
use std::rc::Rc;

use text_primitives::StyleFlags;

use crate::{
    AnimType, ClickContext, EntityInText, EntityType, MouseButton, RichString,
    SPOILER_REVEAL_DURATION, SimpleGeometry, TextSelection, testenv,
};

use super::utils::{LINE_HEIGHT, TestEnv};

fn spoiler_string(env: &TestEnv) -> RichString {
    let mut builder = env.builder();
    builder.push_text("see ");
    builder.set_flags(StyleFlags::SPOILER);
    builder.push_text("secret");
    builder.set_flags(StyleFlags::empty());
    env.build(builder)
}

#[test]
fn spoiler_link_survives_moving_the_string() {
    let env = testenv!();
    let mut string = spoiler_string(&env);
    assert!(string.has_spoilers(), "spoiler run pushed");
    assert!(string.has_persistent_animation(), "spoilers animate");
    string.set_spoiler_link_filter(|context| context.button == MouseButton::Left);
    let link = string.spoiler_link().expect("link installed");

    let moved = vec![string];
    link.on_click(&ClickContext {
        button: MouseButton::Right,
    });
    assert!(!moved[0].spoiler_revealed(), "filtered out");

    link.on_click(&ClickContext::default());
    assert!(moved[0].spoiler_revealed(), "revealed through the moved string");
    assert!(
        moved[0].advance_spoiler_animation(SPOILER_REVEAL_DURATION / 2),
        "still fading"
    );
    assert!(
        !moved[0].advance_spoiler_animation(SPOILER_REVEAL_DURATION),
        "fade done"
    );
    assert_eq!(moved[0].spoiler_reveal_progress(), 1., "fully shown");
}

#[test]
fn spoiler_link_outliving_the_string_does_nothing() {
    let env = testenv!();
    let mut string = spoiler_string(&env);
    string.set_spoiler_link_filter(|_| true);
    let link = string.spoiler_link().expect("link installed");
    drop(string);
    link.on_click(&ClickContext::default());
}

#[test]
fn repaint_fires_on_visible_changes() {
    let env = testenv!();
    let string = spoiler_string(&env);
    let repaints = Rc::new(Cell::new(0));
    let counter = Rc::clone(&repaints);
    string.set_spoiler_repaint_callback(Rc::new(move || counter.set(counter.get() + 1)));

    string.set_spoiler_revealed(true, AnimType::Instant);
    assert_eq!(repaints.get(), 1, "instant change repaints");
    string.set_spoiler_revealed(true, AnimType::Instant);
    assert_eq!(repaints.get(), 1, "no change");

    string.set_spoiler_revealed(false, AnimType::Normal);
    assert_eq!(repaints.get(), 1, "fade repaints when stepped");
    string.advance_spoiler_animation(SPOILER_REVEAL_DURATION);
    assert_eq!(repaints.get(), 2, "stepped once");
    assert!(!string.spoiler_revealed(), "hidden again");
    assert_eq!(string.spoiler_reveal_progress(), 0., "fully hidden");
}

#[test]
fn hidden_spoiler_resolves_to_its_link() {
    let env = testenv!();
    let mut string = spoiler_string(&env);
    string.set_spoiler_link_filter(|_| true);
    let policy = SimpleGeometry::new(200, LINE_HEIGHT);

    let state = string.state_at(45, 5, &policy);
    assert!(state.upon_symbol, "over the spoiler");
    assert!(state.link.is_some(), "reveals on click");

    string.set_spoiler_revealed(true, AnimType::Instant);
    let state = string.state_at(45, 5, &policy);
    assert!(state.link.is_none(), "plain text once revealed");
}

#[test]
fn spoiler_span_is_exported() {
    let env = testenv!();
    let string = spoiler_string(&env);
    let exported = string.to_text_with_entities(TextSelection::ALL);
    assert_eq!(
        exported.entities,
        [EntityInText::new(EntityType::Spoiler, 4, 6)],
        "spoiler entity"
    );
}

#[test]
fn strings_without_spoilers_ignore_reveal() {
    let env = testenv!();
    let string = env.plain("nothing hidden");
    assert!(!string.has_spoilers(), "no spoiler run");
    string.set_spoiler_revealed(true, AnimType::Instant);
    assert!(!string.spoiler_revealed(), "nothing to reveal");
    assert!(
        !string.advance_spoiler_animation(SPOILER_REVEAL_DURATION),
        "nothing to animate"
    );
}

#[test]
#[should_panic(expected = "spoiler link installed on a string without spoilers")]
fn spoiler_link_needs_spoilers() {
    let env = testenv!();
    let mut string = env.plain("nothing hidden");
    string.set_spoiler_link_filter(|_| true);
}
