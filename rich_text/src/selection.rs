// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection ranges and their snapping to words and paragraphs.

use crate::chars::{is_paragraph_separator, is_space, is_word_separator};
use crate::entity::EntityType;
use crate::string::RichString;

/// A range of the backing text, in bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextSelection {
    /// Start of the range.
    pub from: usize,
    /// End of the range, exclusive.
    pub to: usize,
}

impl TextSelection {
    /// Selects the whole text, whatever its length.
    pub const ALL: Self = Self {
        from: 0,
        to: usize::MAX,
    };

    /// Creates the selection `from..to`.
    pub const fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    /// Returns `true` if nothing is selected.
    pub const fn is_empty(&self) -> bool {
        self.from >= self.to
    }
}

impl Default for TextSelection {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

/// Granularity of a selection gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SelectType {
    /// Characters: no snapping.
    #[default]
    Letters,
    /// Whole words.
    Words,
    /// Whole paragraphs, or a whole code span.
    Paragraphs,
}

impl RichString {
    /// Snaps `selection` to the boundaries `kind` selects by.
    ///
    /// The end is clamped to the text. A selection starting at or past the end of the
    /// text, or ending before it starts, is returned unchanged. Snapping an already
    /// snapped selection returns it as is.
    pub fn adjust_selection(&self, selection: TextSelection, kind: SelectType) -> TextSelection {
        let text = self.text.as_str();
        if selection.from >= text.len() || selection.from > selection.to {
            return selection;
        }
        let from = floor_char_boundary(text, selection.from);
        let to = ceil_char_boundary(text, selection.to.min(text.len()));
        let collapsed = from == to;
        let adjusted = match kind {
            SelectType::Letters => TextSelection::new(from, to),
            SelectType::Paragraphs => self
                .monospace_entity_at(from, to)
                .unwrap_or_else(|| expand(text, from, to, collapsed, is_paragraph_separator)),
            SelectType::Words => expand(text, from, to, collapsed, is_word_separator),
        };
        log::trace!("{kind:?} selection {selection:?} adjusted to {adjusted:?}");
        adjusted
    }

    /// The code span around `from..to`, trailing whitespace excluded.
    fn monospace_entity_at(&self, from: usize, to: usize) -> Option<TextSelection> {
        let block = self
            .blocks
            .iter()
            .enumerate()
            .find(|&(index, block)| block.position <= from && from < self.block_end(index))
            .map(|(_, block)| block)?;
        if !block.flags.is_mono() {
            return None;
        }
        let entities = self.to_text_with_entities(TextSelection::ALL).entities;
        let entity = entities.iter().find(|entity| {
            matches!(entity.kind, EntityType::Pre | EntityType::Code)
                && from >= entity.offset
                && entity.end() >= to
        })?;
        let end = entity.end().min(self.text.len());
        let trimmed = self.text[entity.offset..end].trim_end_matches(is_space).len();
        Some(TextSelection::new(entity.offset, entity.offset + trimmed))
    }
}

/// Expands `from..to` outwards to the nearest `separator`s.
///
/// The end only grows past a separator it sits on when the selection is collapsed,
/// and only runs to the next separator when it sits inside a word.
fn expand(
    text: &str,
    from: usize,
    to: usize,
    collapsed: bool,
    separator: fn(char) -> bool,
) -> TextSelection {
    let from = match char_at(text, from) {
        Some(ch) if !separator(ch) => text[..from]
            .char_indices()
            .rev()
            .find(|&(_, ch)| separator(ch))
            .map_or(0, |(index, ch)| index + ch.len_utf8()),
        _ => from,
    };
    let to = match char_at(text, to) {
        None => to,
        Some(ch) if separator(ch) => {
            if collapsed {
                to + ch.len_utf8()
            } else {
                to
            }
        }
        Some(_) => {
            let inside_word = text[..to].chars().next_back().is_some_and(|ch| !separator(ch));
            if collapsed || inside_word {
                text[to..].find(separator).map_or(text.len(), |index| to + index)
            } else {
                to
            }
        }
    };
    TextSelection::new(from, to)
}

fn char_at(text: &str, index: usize) -> Option<char> {
    text.get(index..)?.chars().next()
}

pub(crate) fn floor_char_boundary(text: &str, mut index: usize) -> usize {
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

pub(crate) fn ceil_char_boundary(text: &str, mut index: usize) -> usize {
    while !text.is_char_boundary(index) {
        index += 1;
    }
    index
}
