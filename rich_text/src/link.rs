// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Link handlers attached to runs.

use alloc::string::String;
use core::fmt::{Debug, Write};

use crate::entity::EntityType;

/// Mouse button that triggered a click.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MouseButton {
    /// Primary button.
    #[default]
    Left,
    /// Secondary button.
    Right,
    /// Middle button.
    Middle,
}

/// Context of a click dispatched to a [`ClickHandler`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClickContext {
    /// Button that triggered the click.
    pub button: MouseButton,
}

/// The entity a link exports when its text is copied.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntityLinkData {
    /// Kind of the exported entity.
    pub kind: EntityType,
    /// Payload of the exported entity (target URL, user id).
    pub data: String,
}

/// Application behavior behind a link span.
pub trait ClickHandler: Debug {
    /// Entity exported for the span.
    fn text_entity(&self) -> EntityLinkData;

    /// Runs the link action.
    fn on_click(&self, context: &ClickContext) {
        let _ = context;
    }
}

/// A link that only carries its exported entity.
///
/// Parsers use it for links whose action is resolved elsewhere from the entity data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityLink {
    entity: EntityLinkData,
}

impl EntityLink {
    /// Creates a link exporting `kind` with payload `data`.
    pub fn new(kind: EntityType, data: impl Into<String>) -> Self {
        Self {
            entity: EntityLinkData {
                kind,
                data: data.into(),
            },
        }
    }
}

impl ClickHandler for EntityLink {
    fn text_entity(&self) -> EntityLinkData {
        self.entity.clone()
    }
}

/// Turns user-visible link text into a URL suitable for opening.
///
/// A scheme-less address gets `http://` prepended, characters outside the URL-safe
/// ASCII set are percent-encoded and existing escapes are kept.
pub fn encode_for_opening(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + 7);
    if !text.contains("://") && !text.starts_with("mailto:") {
        result.push_str("http://");
    }
    for byte in text.bytes() {
        let keep = byte.is_ascii_alphanumeric()
            || matches!(
                byte,
                b'-' | b'.'
                    | b'_'
                    | b'~'
                    | b':'
                    | b'/'
                    | b'?'
                    | b'#'
                    | b'['
                    | b']'
                    | b'@'
                    | b'!'
                    | b'$'
                    | b'&'
                    | b'\''
                    | b'('
                    | b')'
                    | b'*'
                    | b'+'
                    | b','
                    | b';'
                    | b'='
                    | b'%'
            );
        if keep {
            result.push(char::from(byte));
        } else {
            // Writing into a `String` cannot fail.
            let _ = write!(result, "%{byte:02X}");
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::encode_for_opening;

    #[test]
    fn scheme_is_added_once() {
        assert_eq!(encode_for_opening("example.com"), "http://example.com");
        assert_eq!(
            encode_for_opening("https://example.com/a"),
            "https://example.com/a"
        );
    }

    #[test]
    fn unsafe_bytes_are_escaped() {
        assert_eq!(
            encode_for_opening("https://example.com/a b"),
            "https://example.com/a%20b"
        );
        assert_eq!(
            encode_for_opening("https://example.com/é"),
            "https://example.com/%C3%A9"
        );
        assert_eq!(
            encode_for_opening("https://example.com/%20"),
            "https://example.com/%20"
        );
    }
}
