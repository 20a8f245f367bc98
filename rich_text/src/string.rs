// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::time::Duration;

use smallvec::SmallVec;
use text_primitives::{BaseDirection, Fixed, Margins, StyleFlags};

use crate::block::{Block, BlockKind, EmojiId};
use crate::extended::{ExtendedData, Modification, ParagraphDetails};
use crate::link::{ClickContext, ClickHandler};
use crate::spoiler::{AnimType, SpoilerData, fire};
use crate::style::TextStyle;

/// Maximum number of emoji shown enlarged when they are alone in a message.
pub const ISOLATED_EMOJI_LIMIT: usize = 3;

/// An emoji of a string made only of emoji.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IsolatedEmojiItem {
    /// A built-in emoji.
    Emoji(EmojiId),
    /// A custom glyph, by entity data.
    Custom(String),
}

/// The emoji of a string made only of a few emoji.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IsolatedEmoji {
    /// Emoji in text order.
    pub items: SmallVec<[IsolatedEmojiItem; ISOLATED_EMOJI_LIMIT]>,
}

impl IsolatedEmoji {
    /// Returns `true` if the string was not made only of emoji.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The custom glyphs of a string made only of custom glyphs, by line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OnlyCustomEmoji {
    /// Entity data of the glyphs of each line.
    pub lines: Vec<Vec<String>>,
}

/// Laid out rich text.
///
/// Built once by [`RichStringBuilder`](crate::RichStringBuilder) and replaced wholesale
/// when the text changes. The only incremental edit is the trailing skip block.
#[derive(Debug, Default)]
pub struct RichString {
    pub(crate) style: TextStyle,
    pub(crate) text: String,
    pub(crate) blocks: Vec<Block>,
    pub(crate) extended: Option<Box<ExtendedData>>,
    pub(crate) min_resize_width: i32,
    pub(crate) max_width: i32,
    pub(crate) min_height: i32,
    pub(crate) start_paragraph_index: u16,
    pub(crate) start_direction: BaseDirection,
    pub(crate) ends_with_paragraph_details: bool,
    pub(crate) skip_block_added_newline: bool,
    pub(crate) has_custom_emoji: bool,
    pub(crate) is_isolated_emoji: bool,
    pub(crate) is_only_custom_emoji: bool,
    pub(crate) has_not_emoji_and_spaces: bool,
}

impl RichString {
    /// The backing text, including the sentinel of a skip block.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the backing text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns `true` if there is no content besides a skip block.
    pub fn is_empty(&self) -> bool {
        self.blocks.first().is_none_or(Block::is_skip)
    }

    /// The run sequence.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// The style the string was laid out with.
    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    /// Natural width: the width needed to lay the text out without wrapping.
    pub fn max_width(&self) -> i32 {
        self.max_width
    }

    /// Natural height: the height of the text laid out at its natural width.
    pub fn min_height(&self) -> i32 {
        self.min_height
    }

    /// Width below which the text is never wrapped.
    pub fn min_resize_width(&self) -> i32 {
        self.min_resize_width
    }

    /// Paragraph of the text before the first hard break.
    pub fn start_paragraph_index(&self) -> u16 {
        self.start_paragraph_index
    }

    /// Direction of the paragraph before the first hard break.
    pub fn start_direction(&self) -> BaseDirection {
        self.start_direction
    }

    /// Returns `true` if the last paragraph is framed.
    pub fn ends_with_paragraph_details(&self) -> bool {
        self.ends_with_paragraph_details
    }

    /// End of block `index` in the backing text.
    pub(crate) fn block_end(&self, index: usize) -> usize {
        self.blocks
            .get(index + 1)
            .map_or(self.text.len(), |next| next.position)
    }

    /// Length of block `index` in bytes.
    pub fn block_length(&self, index: usize) -> usize {
        self.block_end(index) - self.blocks[index].position
    }

    pub(crate) fn ensure_extended(&mut self) -> &mut ExtendedData {
        self.extended.get_or_insert_with(Box::default)
    }

    /// Framing details of all paragraphs, in index order.
    pub fn paragraphs(&self) -> &[ParagraphDetails] {
        self.extended
            .as_deref()
            .map_or(&[], |extended| extended.paragraphs.as_slice())
    }

    /// Framing details of paragraph `index`, `None` for the unframed paragraph `0`.
    ///
    /// # Panics
    ///
    /// If `index` does not name a registered paragraph.
    pub fn paragraph_details(&self, index: u16) -> Option<&ParagraphDetails> {
        let slot = usize::from(index).checked_sub(1)?;
        let paragraphs = self.paragraphs();
        assert!(
            slot < paragraphs.len(),
            "paragraph {index} out of range for {} paragraphs",
            paragraphs.len()
        );
        Some(&paragraphs[slot])
    }

    /// Space reserved around the lines of paragraph `index`.
    pub fn paragraph_padding(&self, index: u16) -> Margins {
        self.paragraph_details(index)
            .map_or(Margins::ZERO, |details| details.style(&self.style).frame_padding())
    }

    /// Returns `true` if any link slot was registered.
    pub fn has_links(&self) -> bool {
        self.extended
            .as_deref()
            .is_some_and(|extended| !extended.links.is_empty())
    }

    /// Handler of a one-based link slot.
    pub fn link(&self, index: u16) -> Option<Rc<dyn ClickHandler>> {
        self.extended.as_deref()?.link(index).cloned()
    }

    /// Replaces the handler of a one-based link slot.
    ///
    /// Does nothing when the slot was never registered.
    pub fn set_link(&mut self, index: u16, handler: Option<Rc<dyn ClickHandler>>) {
        let Some(extended) = self.extended.as_deref_mut() else {
            return;
        };
        if let Some(slot) = usize::from(index)
            .checked_sub(1)
            .and_then(|slot| extended.links.get_mut(slot))
        {
            *slot = handler;
        }
    }

    /// Edits the parser applied to the source text.
    pub fn modifications(&self) -> &[Modification] {
        self.extended
            .as_deref()
            .map_or(&[], |extended| extended.modifications.as_slice())
    }

    pub(crate) fn spoiler(&self) -> Option<&SpoilerData> {
        self.extended.as_deref()?.spoiler.as_ref()
    }

    /// Returns `true` if some runs are hidden as spoilers.
    pub fn has_spoilers(&self) -> bool {
        self.spoiler().is_some()
    }

    /// Shows or hides the spoilers.
    ///
    /// Requesting the current state does nothing, except that an instant request stops a
    /// running fade.
    pub fn set_spoiler_revealed(&self, revealed: bool, anim: AnimType) {
        let Some(spoiler) = self.spoiler() else {
            return;
        };
        let repaint = spoiler.state.borrow_mut().set_revealed(revealed, anim);
        fire(repaint);
    }

    /// Returns `true` if the spoilers are shown or being shown.
    pub fn spoiler_revealed(&self) -> bool {
        self.spoiler()
            .is_some_and(|spoiler| spoiler.state.borrow().revealed())
    }

    /// Reveal progress from `0` (hidden) to `1` (revealed).
    pub fn spoiler_reveal_progress(&self) -> f64 {
        self.spoiler()
            .map_or(0., |spoiler| spoiler.state.borrow().progress())
    }

    /// Steps the reveal fade by `dt`, repainting while it runs.
    ///
    /// Returns `true` while the fade is still running.
    pub fn advance_spoiler_animation(&self, dt: Duration) -> bool {
        let Some(spoiler) = self.spoiler() else {
            return false;
        };
        let repaint = spoiler.state.borrow_mut().advance(dt);
        fire(repaint);
        spoiler.state.borrow().animating()
    }

    /// Sets the callback fired when the spoiler presentation changes.
    pub fn set_spoiler_repaint_callback(&self, repaint: Rc<dyn Fn()>) {
        if let Some(spoiler) = self.spoiler() {
            spoiler.state.borrow_mut().set_repaint(repaint);
        }
    }

    /// Installs the click handler that reveals spoilers, for clicks accepted by `filter`.
    ///
    /// # Panics
    ///
    /// If the string has no spoilers.
    pub fn set_spoiler_link_filter(&mut self, filter: impl Fn(&ClickContext) -> bool + 'static) {
        let spoiler = self
            .extended
            .as_deref_mut()
            .and_then(|extended| extended.spoiler.as_mut());
        let Some(spoiler) = spoiler else {
            panic!("spoiler link installed on a string without spoilers");
        };
        spoiler.install_link(Box::new(filter));
        log::debug!("spoiler link installed");
    }

    /// The click handler revealing spoilers, if installed.
    pub fn spoiler_link(&self) -> Option<Rc<dyn ClickHandler>> {
        let link: Rc<dyn ClickHandler> = self.spoiler()?.link.clone()?;
        Some(link)
    }

    /// Returns `true` if the last block reserves trailing space.
    pub fn has_skip_block(&self) -> bool {
        self.blocks.last().is_some_and(Block::is_skip)
    }

    /// Reserves `width` by `height` pixels after the text, for an affordance drawn by
    /// the caller.
    ///
    /// Returns `false` if the same space is already reserved. When the text ends with a
    /// framed paragraph, the space goes on a line of its own.
    pub fn update_skip_block(&mut self, width: i32, height: i32) -> bool {
        let existing = self
            .blocks
            .last()
            .filter(|block| block.is_skip())
            .map(|block| (block.position, block.width, block.height));
        if let Some((position, old_width, old_height)) = existing {
            if old_width == Fixed::from_px(width) && old_height == height {
                return false;
            }
            self.text.truncate(position);
            self.blocks.pop();
        } else if self.ends_with_paragraph_details {
            self.text.push('\n');
            let position = self.text.len() - 1;
            let block = Block::newline(position, StyleFlags::empty(), self.style.font_height, 0);
            self.blocks.push(block);
            self.skip_block_added_newline = true;
        }
        let position = self.text.len();
        self.text.push('_');
        self.blocks.push(Block::skip(position, width, height));
        log::debug!("skip block set to {width}x{height}");
        self.recount_natural_size(false, BaseDirection::Auto);
        true
    }

    /// Drops the trailing reserved space.
    ///
    /// Returns `false` if no space was reserved.
    pub fn remove_skip_block(&mut self) -> bool {
        let Some(position) = self
            .blocks
            .last()
            .filter(|block| block.is_skip())
            .map(|block| block.position)
        else {
            return false;
        };
        if self.skip_block_added_newline {
            self.text.truncate(position - 1);
            self.blocks.truncate(self.blocks.len() - 2);
            self.skip_block_added_newline = false;
        } else {
            self.text.truncate(position);
            self.blocks.pop();
        }
        log::debug!("skip block removed");
        self.recount_natural_size(false, BaseDirection::Auto);
        true
    }

    /// Returns `true` if some runs animate while shown.
    pub fn has_persistent_animation(&self) -> bool {
        self.has_custom_emoji || self.has_spoilers()
    }

    /// Releases animation resources of the custom glyphs.
    pub fn unload_persistent_animation(&self) {
        if !self.has_custom_emoji {
            return;
        }
        for block in &self.blocks {
            if let BlockKind::CustomEmoji(custom) = &block.kind {
                custom.unload();
            }
        }
    }

    /// Returns `true` if the text has content besides emoji and whitespace.
    pub fn has_not_emoji_and_spaces(&self) -> bool {
        self.has_not_emoji_and_spaces
    }

    /// Returns `true` if the text is made only of a few emoji.
    pub fn is_isolated_emoji(&self) -> bool {
        self.is_isolated_emoji
    }

    /// The emoji of a text made only of a few emoji, empty otherwise.
    pub fn to_isolated_emoji(&self) -> IsolatedEmoji {
        if !self.is_isolated_emoji {
            return IsolatedEmoji::default();
        }
        let skip = usize::from(self.has_skip_block());
        if self.blocks.len() > ISOLATED_EMOJI_LIMIT + skip || self.has_spoilers() {
            return IsolatedEmoji::default();
        }
        let mut result = IsolatedEmoji::default();
        for block in &self.blocks {
            if block.link_index != 0 {
                return IsolatedEmoji::default();
            }
            match &block.kind {
                BlockKind::Emoji(emoji) => result.items.push(IsolatedEmojiItem::Emoji(*emoji)),
                BlockKind::CustomEmoji(custom) => {
                    result
                        .items
                        .push(IsolatedEmojiItem::Custom(custom.entity_data()));
                }
                BlockKind::Skip => {}
                _ => return IsolatedEmoji::default(),
            }
        }
        result
    }

    /// Returns `true` if the text is made only of custom glyphs and whitespace.
    pub fn is_only_custom_emoji(&self) -> bool {
        self.is_only_custom_emoji
    }

    /// The custom glyphs of a text made only of them, by line.
    pub fn to_only_custom_emoji(&self) -> OnlyCustomEmoji {
        if !self.is_only_custom_emoji {
            return OnlyCustomEmoji::default();
        }
        let mut lines = alloc::vec![Vec::new()];
        for block in &self.blocks {
            match &block.kind {
                BlockKind::CustomEmoji(custom) => {
                    if let Some(line) = lines.last_mut() {
                        line.push(custom.entity_data());
                    }
                }
                BlockKind::Newline { .. } => lines.push(Vec::new()),
                _ => {}
            }
        }
        OnlyCustomEmoji { lines }
    }

    /// Drops all content.
    pub fn clear(&mut self) {
        self.text.clear();
        self.blocks.clear();
        self.extended = None;
        self.max_width = 0;
        self.min_height = 0;
        self.start_paragraph_index = 0;
        self.start_direction = BaseDirection::Auto;
        self.ends_with_paragraph_details = false;
        self.skip_block_added_newline = false;
        self.has_custom_emoji = false;
        self.is_isolated_emoji = false;
        self.is_only_custom_emoji = false;
        self.has_not_emoji_and_spaces = false;
    }
}
