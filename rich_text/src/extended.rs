// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Side table for features most strings never use.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;

use crate::link::ClickHandler;
use crate::spoiler::SpoilerData;
use crate::style::{ParagraphStyle, TextStyle};

/// Framing details of a pre-formatted or quoted paragraph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParagraphDetails {
    /// Pre-formatted (code block) rather than quoted.
    pub pre: bool,
    /// Language label shown in the header of a code block.
    pub language: String,
}

impl ParagraphDetails {
    /// A pre-formatted paragraph labeled with `language`.
    pub fn pre(language: impl Into<String>) -> Self {
        Self {
            pre: true,
            language: language.into(),
        }
    }

    /// A quoted paragraph.
    pub fn blockquote() -> Self {
        Self::default()
    }

    /// The framing style that applies to the paragraph.
    pub fn style<'a>(&self, style: &'a TextStyle) -> &'a ParagraphStyle {
        if self.pre {
            &style.pre
        } else {
            &style.blockquote
        }
    }
}

/// An edit the parser applied to the source text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modification {
    /// Byte offset in the backing text.
    pub position: usize,
    /// Number of source characters dropped at `position`.
    pub skipped: u16,
    /// Whether a character was inserted at `position`.
    pub added: bool,
}

#[derive(Debug, Default)]
pub(crate) struct ExtendedData {
    pub(crate) links: Vec<Option<Rc<dyn ClickHandler>>>,
    pub(crate) paragraphs: Vec<ParagraphDetails>,
    pub(crate) spoiler: Option<SpoilerData>,
    pub(crate) modifications: Vec<Modification>,
}

impl ExtendedData {
    pub(crate) fn is_empty(&self) -> bool {
        self.links.is_empty()
            && self.paragraphs.is_empty()
            && self.spoiler.is_none()
            && self.modifications.is_empty()
    }

    /// Live handler of a one-based link slot.
    pub(crate) fn link(&self, index: u16) -> Option<&Rc<dyn ClickHandler>> {
        let slot = usize::from(index).checked_sub(1)?;
        self.links.get(slot)?.as_ref()
    }

    /// Installs spoiler state.
    ///
    /// # Panics
    ///
    /// When spoiler state already exists.
    pub(crate) fn create_spoiler(&mut self) -> &mut SpoilerData {
        assert!(self.spoiler.is_none(), "spoiler state created twice");
        self.spoiler.insert(SpoilerData::new())
    }
}
