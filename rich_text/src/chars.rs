// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed character classification shared with parsers.
//!
//! Word boundaries are found with a fixed separator set rather than locale-aware
//! segmentation, so the same text always snaps the same way.

use unicode_bidi::{BidiClass, bidi_class};

const ZERO_WIDTH_SPACE: char = '\u{200B}';
const LINE_SEPARATOR: char = '\u{2028}';
const PARAGRAPH_SEPARATOR: char = '\u{2029}';
const OBJECT_REPLACEMENT: char = '\u{FFFC}';
const STRING_TERMINATOR: char = '\u{9C}';

/// Returns `true` for characters a parser drops from the text.
pub fn is_bad(ch: char) -> bool {
    let code = u32::from(ch);
    code == 0
        || (8232..8237).contains(&code)
        || ((65024..65040).contains(&code) && code != 65039)
        || ((127..160).contains(&code) && code != 156)
}

/// Returns `true` for characters that end a word when snapping a selection.
pub fn is_word_separator(ch: char) -> bool {
    matches!(
        ch,
        ' ' | '\n'
            | '.'
            | ','
            | '?'
            | '!'
            | '@'
            | '#'
            | '$'
            | ':'
            | ';'
            | '-'
            | '<'
            | '>'
            | '['
            | ']'
            | '('
            | ')'
            | '{'
            | '}'
            | '='
            | '/'
            | '+'
            | '%'
            | '&'
            | '^'
            | '*'
            | '\''
            | '"'
            | '`'
            | '~'
            | '|'
    )
}

/// Returns `true` for punctuation that ends a link only when followed by a link end.
pub fn is_almost_link_end(ch: char) -> bool {
    matches!(ch, '?' | ',' | '.' | '"' | ':' | '!' | '\'')
}

/// Returns `true` for characters that always end a link.
pub fn is_link_end(ch: char) -> bool {
    is_bad(ch) || is_space(ch) || is_newline(ch)
}

/// Returns `true` for hard line breaks.
pub fn is_newline(ch: char) -> bool {
    ch == '\n' || ch == STRING_TERMINATOR
}

/// Returns `true` for the character separating paragraphs in the backing text.
pub fn is_paragraph_separator(ch: char) -> bool {
    ch == '\n'
}

/// Returns `true` for whitespace and control characters.
pub fn is_space(ch: char) -> bool {
    ch.is_whitespace()
        || u32::from(ch) < 32
        || matches!(
            ch,
            PARAGRAPH_SEPARATOR | LINE_SEPARATOR | OBJECT_REPLACEMENT | ZERO_WIDTH_SPACE
        )
}

/// Returns `true` for combining marks and variation selectors.
pub fn is_diacritic(ch: char) -> bool {
    let code = u32::from(ch);
    bidi_class(ch) == BidiClass::NSM || code == 1652 || (64606..=64611).contains(&code)
}

/// Returns `true` for characters a parser replaces with a plain space.
pub fn is_replaced_by_space(ch: char) -> bool {
    let code = u32::from(ch);
    code <= 0x02
        || (0x07..=0x09).contains(&code)
        || (0x0b..=0x1f).contains(&code)
        || code == 819
        || code == 831
        || code == 778
        || (8232..=8237).contains(&code)
}

/// Returns `true` for characters trimmed from both ends of parsed text.
pub fn is_trimmed(ch: char) -> bool {
    is_space(ch) || is_bad(ch)
}
