// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::Cell;
use std::rc::Rc;

use text_primitives::{Fixed, Margins};

use crate::{
    CustomEmoji, MonospaceMeasure, ParagraphStyle, ParseOptions, RichString, RichStringBuilder,
    TextStyle,
};

/// Advance of every character.
pub(crate) const CHAR_WIDTH: i32 = 10;
/// Height of every run.
pub(crate) const LINE_HEIGHT: i32 = 20;

// Creates a new instance of TestEnv and put current function name in constructor
#[macro_export]
macro_rules! testenv {
    () => {{
        // Get name of the current function
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        let name = &name[..name.len() - 3];
        let name = &name[name.rfind(':').map(|x| x + 1).unwrap_or(0)..];

        // Create test env
        $crate::tests::utils::TestEnv::new(name)
    }};
}

/// A style where both framed paragraph kinds have the given padding.
pub(crate) fn framed_style(padding: Margins) -> TextStyle {
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

/// A custom glyph of fixed width that counts its unloads.
#[derive(Debug)]
pub(crate) struct TestEmoji {
    pub(crate) data: &'static str,
    pub(crate) width: i32,
    pub(crate) unloads: Rc<Cell<u32>>,
}

impl TestEmoji {
    pub(crate) fn new(data: &'static str) -> Self {
        Self {
            data,
            width: LINE_HEIGHT,
            unloads: Rc::default(),
        }
    }
}

impl CustomEmoji for TestEmoji {
    fn entity_data(&self) -> String {
        self.data.to_owned()
    }

    fn width(&self) -> i32 {
        self.width
    }

    fn unload(&self) {
        self.unloads.set(self.unloads.get() + 1);
    }
}

pub(crate) struct TestEnv {
    test_name: String,
    measure: MonospaceMeasure,
    options: ParseOptions,
    style: TextStyle,
}

impl TestEnv {
    pub(crate) fn new(test_name: &str) -> Self {
        Self {
            test_name: test_name.to_owned(),
            measure: MonospaceMeasure::new(Fixed::from_px(CHAR_WIDTH), LINE_HEIGHT),
            options: ParseOptions::default(),
            style: TextStyle {
                font_height: LINE_HEIGHT,
                ..TextStyle::default()
            },
        }
    }

    pub(crate) fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    pub(crate) fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    pub(crate) fn with_right_bearing(mut self, right_bearing: Fixed) -> Self {
        self.measure = self.measure.with_right_bearing(right_bearing);
        self
    }

    pub(crate) fn builder(&self) -> RichStringBuilder<'_, MonospaceMeasure> {
        RichStringBuilder::new(&self.measure, self.options)
    }

    pub(crate) fn build(&self, builder: RichStringBuilder<'_, MonospaceMeasure>) -> RichString {
        match builder.build(self.style.clone()) {
            Ok(string) => string,
            Err(error) => panic!("{}: build failed: {error}", self.test_name),
        }
    }

    pub(crate) fn plain(&self, text: &str) -> RichString {
        let mut builder = self.builder();
        builder.push_text(text);
        self.build(builder)
    }

    pub(crate) fn check_line_widths(&self, string: &RichString, width: i32, expected: &[i32]) {
        let widths = string.count_line_widths(width);
        assert_eq!(
            widths, expected,
            "{}: line widths of {:?} at {width}",
            self.test_name,
            string.text()
        );
    }
}
