// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Export of selected text as plain text or text with entities.

use alloc::rc::Rc;
use alloc::string::String;

use text_primitives::StyleFlags;

use crate::block::BlockKind;
use crate::entity::{EntityInText, EntityType, TextForMimeData, TextWithEntities};
use crate::link::{ClickHandler, encode_for_opening};
use crate::selection::{TextSelection, ceil_char_boundary, floor_char_boundary};
use crate::string::RichString;

/// Style flags exported as entities, in the order spans are closed.
const STYLE_ENTITIES: [(StyleFlags, EntityType); 9] = [
    (StyleFlags::ITALIC, EntityType::Italic),
    (StyleFlags::BOLD, EntityType::Bold),
    (StyleFlags::SEMIBOLD, EntityType::Semibold),
    (StyleFlags::UNDERLINE, EntityType::Underline),
    (StyleFlags::SPOILER, EntityType::Spoiler),
    (StyleFlags::STRIKE_OUT, EntityType::StrikeOut),
    (StyleFlags::CODE, EntityType::Code),
    (StyleFlags::PRE, EntityType::Pre),
    (StyleFlags::BLOCKQUOTE, EntityType::Blockquote),
];

const INTERNAL_LINK_PREFIX: &str = "internal:";

/// Accumulates exported text.
#[derive(Debug, Default)]
struct TextExport {
    compose_expanded: bool,
    compose_entities: bool,
    style_starts: [usize; STYLE_ENTITIES.len()],
    link_start: usize,
    result: TextForMimeData,
}

impl TextExport {
    fn new(compose_expanded: bool, compose_entities: bool) -> Self {
        Self {
            compose_expanded,
            compose_entities,
            ..Self::default()
        }
    }

    fn offset(&self) -> usize {
        self.result.rich.text.len()
    }

    /// Inserts after every entity starting at or before it.
    fn insert_entity(&mut self, entity: EntityInText) {
        let entities = &mut self.result.rich.entities;
        let index = entities.partition_point(|other| other.offset <= entity.offset);
        entities.insert(index, entity);
    }

    fn part(&mut self, text: &str, custom_emoji: Option<String>) {
        self.result.rich.text.push_str(text);
        if self.compose_expanded {
            self.result.expanded.push_str(text);
        }
        if let Some(data) = custom_emoji.filter(|data| self.compose_entities && !data.is_empty()) {
            let offset = self.offset() - text.len();
            self.insert_entity(EntityInText::with_data(
                EntityType::CustomEmoji,
                offset,
                text.len(),
                data,
            ));
        }
    }

    fn link_start(&mut self) {
        self.link_start = self.offset();
    }

    /// Closes a link span. `handler` is `None` for links only partially selected.
    fn link_finish(&mut self, text: &str, handler: Option<&Rc<dyn ClickHandler>>) {
        let Some(handler) = handler else {
            return;
        };
        if !self.compose_expanded && !self.compose_entities {
            return;
        }
        let entity = handler.text_entity();
        let plain_url = matches!(entity.kind, EntityType::Url | EntityType::Email);
        let custom_url = entity.kind == EntityType::CustomUrl;
        let internal = custom_url && entity.data.starts_with(INTERNAL_LINK_PREFIX);
        if self.compose_expanded && custom_url && !internal {
            if entity.data != encode_for_opening(text) {
                let expanded = &mut self.result.expanded;
                expanded.push_str(" (");
                expanded.push_str(&entity.data);
                expanded.push(')');
            }
        }
        if self.compose_entities && !internal && entity.kind != EntityType::Invalid {
            let data = if plain_url { String::new() } else { entity.data };
            let length = self.offset() - self.link_start;
            self.insert_entity(EntityInText::with_data(
                entity.kind,
                self.link_start,
                length,
                data,
            ));
        }
    }

    fn flags_changed(&mut self, old: StyleFlags, new: StyleFlags) {
        if !self.compose_entities {
            return;
        }
        let offset = self.offset();
        for (slot, &(flag, kind)) in STYLE_ENTITIES.iter().enumerate() {
            let start = self.style_starts[slot];
            if old.contains(flag) && !new.contains(flag) {
                if offset > start {
                    self.insert_entity(EntityInText::new(kind, start, offset - start));
                }
            } else if new.contains(flag) && !old.contains(flag) {
                self.style_starts[slot] = offset;
            }
        }
    }

    fn finish(mut self) -> TextForMimeData {
        if self.compose_entities {
            self.result
                .rich
                .entities
                .sort_by_key(|entity| (entity.offset, if entity.kind.is_url_like() { 0 } else { 1 }));
        }
        self.result
    }
}

impl RichString {
    /// Live handler of a one-based link slot.
    fn live_link(&self, index: u16) -> Option<&Rc<dyn ClickHandler>> {
        self.extended.as_deref()?.link(index)
    }

    fn enumerate_text(&self, selection: TextSelection, export: &mut TextExport) {
        if self.is_empty() || selection.is_empty() {
            return;
        }
        let text = self.text.as_str();
        let from = floor_char_boundary(text, selection.from.min(text.len()));
        let to = ceil_char_boundary(text, selection.to.min(text.len()));

        let mut link_index = 0;
        let mut link_position = 0;
        let mut flags = StyleFlags::empty();
        for index in 0..=self.blocks.len() {
            let block = self.blocks.get(index);
            let position = block.map_or(text.len(), |block| block.position);
            let block_flags = block.map_or(StyleFlags::empty(), |block| block.flags);
            let block_link = block
                .filter(|block| !block.flags.is_mono())
                .map_or(0, |block| block.link_index);
            let block_link = if self.live_link(block_link).is_some() {
                block_link
            } else {
                0
            };

            if block_link != link_index {
                if link_index != 0 {
                    let range_from = from.max(link_position);
                    let range_to = to.min(position);
                    if range_to > range_from {
                        let whole = link_position == range_from && position == range_to;
                        let handler = whole.then(|| self.live_link(link_index)).flatten();
                        export.link_finish(&text[range_from..range_to], handler);
                    }
                }
                link_index = block_link;
                if link_index != 0 {
                    link_position = position;
                    export.link_start();
                }
            }

            let overlaps = position <= to && block.is_none_or(|_| self.block_end(index) > from);
            if overlaps && block_flags != flags {
                export.flags_changed(flags, block_flags);
                flags = block_flags;
            }

            let Some(block) = block else {
                break;
            };
            let start = if link_index != 0 {
                link_position
            } else {
                position
            };
            if start >= to {
                break;
            }
            if block.is_skip() {
                continue;
            }
            let range_from = from.max(position);
            let range_to = to.min(self.block_end(index));
            if range_to > range_from {
                let custom_emoji = match &block.kind {
                    BlockKind::CustomEmoji(custom) => Some(custom.entity_data()),
                    _ => None,
                };
                export.part(&text[range_from..range_to], custom_emoji);
            }
        }
        // Spans still open end with the selection.
        export.flags_changed(flags, StyleFlags::empty());
    }

    fn export_text(
        &self,
        selection: TextSelection,
        compose_expanded: bool,
        compose_entities: bool,
    ) -> TextForMimeData {
        let mut export = TextExport::new(compose_expanded, compose_entities);
        export.result.rich.text.reserve(self.text.len());
        if compose_expanded {
            export.result.expanded.reserve(self.text.len());
        }
        self.enumerate_text(selection, &mut export);
        export.finish()
    }

    /// The selected text, without formatting.
    pub fn to_plain_text(&self, selection: TextSelection) -> String {
        self.export_text(selection, false, false).rich.text
    }

    /// The selected text with its formatting and link entities.
    ///
    /// Links only partially selected export no entity.
    pub fn to_text_with_entities(&self, selection: TextSelection) -> TextWithEntities {
        self.export_text(selection, false, true).rich
    }

    /// The selected text prepared for a clipboard.
    pub fn to_text_for_mime_data(&self, selection: TextSelection) -> TextForMimeData {
        self.export_text(selection, true, true)
    }
}
