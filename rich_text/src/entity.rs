// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;

/// Kind of a formatting or semantic span.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EntityType {
    /// Not a valid entity.
    #[default]
    Invalid,
    /// A plain URL.
    Url,
    /// Text pointing at a URL carried in the entity data.
    CustomUrl,
    /// An e-mail address.
    Email,
    /// A `#hashtag`.
    Hashtag,
    /// A `$cashtag`.
    Cashtag,
    /// An `@mention`.
    Mention,
    /// A mention by name, carrying the target in the entity data.
    MentionName,
    /// A `/command`.
    BotCommand,
    /// A custom glyph, carrying its identifier in the entity data.
    CustomEmoji,
    /// Bold text.
    Bold,
    /// Semibold text.
    Semibold,
    /// Italic text.
    Italic,
    /// Underlined text.
    Underline,
    /// Struck out text.
    StrikeOut,
    /// Inline code.
    Code,
    /// Pre-formatted block.
    Pre,
    /// Quoted block.
    Blockquote,
    /// Hidden text.
    Spoiler,
}

impl EntityType {
    /// Returns `true` for link-like entities, which sort before styles at the same offset.
    pub fn is_url_like(self) -> bool {
        matches!(
            self,
            Self::Url
                | Self::CustomUrl
                | Self::BotCommand
                | Self::Mention
                | Self::MentionName
                | Self::Hashtag
                | Self::Cashtag
        )
    }
}

/// A span of exported text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntityInText {
    /// Kind of the span.
    pub kind: EntityType,
    /// Byte offset of the span in the exported text.
    pub offset: usize,
    /// Byte length of the span.
    pub length: usize,
    /// Auxiliary payload (link target, glyph identifier), empty when unused.
    pub data: String,
}

impl EntityInText {
    /// Creates an entity without payload.
    pub fn new(kind: EntityType, offset: usize, length: usize) -> Self {
        Self {
            kind,
            offset,
            length,
            data: String::new(),
        }
    }

    /// Creates an entity with payload.
    pub fn with_data(kind: EntityType, offset: usize, length: usize, data: String) -> Self {
        Self {
            kind,
            offset,
            length,
            data,
        }
    }

    /// End offset of the span.
    pub fn end(&self) -> usize {
        self.offset + self.length
    }
}

/// Exported text with its spans.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextWithEntities {
    /// Plain text.
    pub text: String,
    /// Spans sorted by offset, links before styles at equal offsets.
    pub entities: Vec<EntityInText>,
}

/// Exported text prepared for a clipboard.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextForMimeData {
    /// Plain text where custom links are followed by their target, ` (url)`.
    pub expanded: String,
    /// Text with spans.
    pub rich: TextWithEntities,
}

impl TextForMimeData {
    /// Returns `true` if no text was exported.
    pub fn is_empty(&self) -> bool {
        self.rich.text.is_empty()
    }
}
