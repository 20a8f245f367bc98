// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use rich_text::{
    MonospaceMeasure, ParagraphStyle, ParseOptions, RichString, RichStringBuilder, TextStyle,
};
use text_primitives::{Fixed, Margins};

/// Advance of every character.
pub(crate) const CHAR_WIDTH: i32 = 10;
/// Height of every run.
pub(crate) const LINE_HEIGHT: i32 = 20;

/// Name of the calling test function.
#[macro_export]
macro_rules! test_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            core::any::type_name::<T>()
        }
        let name = type_name_of(f);
        let name = &name[..name.len() - 3];
        let name = &name[name.rfind(':').map(|x| x + 1).unwrap_or(0)..];

        name
    }};
}

pub(crate) fn measure() -> MonospaceMeasure {
    MonospaceMeasure::new(Fixed::from_px(CHAR_WIDTH), LINE_HEIGHT)
}

pub(crate) fn style(padding: Margins) -> TextStyle {
    let framed = ParagraphStyle {
        padding,
        ..ParagraphStyle::default()
    };
    TextStyle {
        font_height: LINE_HEIGHT,
        pre: framed.clone(),
        blockquote: framed,
        ..TextStyle::default()
    }
}

/// Builds a string with `fill`, failing the test `name` on invalid content.
pub(crate) fn build(
    name: &str,
    padding: Margins,
    fill: impl FnOnce(&mut RichStringBuilder<'_, MonospaceMeasure>),
) -> RichString {
    let measure = measure();
    let mut builder = RichStringBuilder::new(&measure, ParseOptions::default());
    fill(&mut builder);
    match builder.build(style(padding)) {
        Ok(string) => string,
        Err(error) => panic!("{name}: {error}"),
    }
}

pub(crate) fn plain(name: &str, text: &str) -> RichString {
    build(name, Margins::ZERO, |builder| builder.push_text(text))
}
