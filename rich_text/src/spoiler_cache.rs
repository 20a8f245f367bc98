// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spoiler masks tinted per text color.
//!
//! Renderers draw hidden runs with a particle mask tinted with the run color. Tinting is
//! expensive, so tinted masks are shared through a small cache keyed by color that is
//! emptied whenever the palette changes.

use alloc::vec::Vec;
use core::fmt;

use crate::style::{Brush, Color};

/// Number of colors the default cache can hold.
pub const DEFAULT_SPOILER_CACHE_CAPACITY: usize = 24;

/// A spoiler mask tint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SpoilerMess {
    /// Straight-alpha tint.
    pub color: Color,
    /// Premultiplied tint, as blended into the mask.
    pub premultiplied: Color,
}

impl SpoilerMess {
    /// Prepares the tint for `color`.
    pub fn from_color(color: &Color) -> Self {
        let [r, g, b, a] = *color;
        let mul = |channel: u8| {
            let value = (u16::from(channel) * u16::from(a) + 127) / 255;
            u8::try_from(value).unwrap_or(u8::MAX)
        };
        Self {
            color: *color,
            premultiplied: [mul(r), mul(g), mul(b), a],
        }
    }
}

/// Storage for tinted spoiler masks.
pub trait SpoilerMessCache<B: Brush> {
    /// The tinted mask.
    type Mess: Clone;

    /// Returns the mask tinted with `color`, preparing it on first use.
    fn lookup(&mut self, color: &B) -> Self::Mess;

    /// Drops every prepared mask.
    fn reset(&mut self);
}

/// Bounded cache with a linear lookup by color.
pub struct ColorMaskCache<B, M> {
    capacity: usize,
    entries: Vec<(B, M)>,
    make: fn(&B) -> M,
}

impl<B, M> fmt::Debug for ColorMaskCache<B, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColorMaskCache")
            .field("capacity", &self.capacity)
            .field("len", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl<B: Brush, M: Clone> ColorMaskCache<B, M> {
    /// Creates a cache holding up to `capacity` colors.
    ///
    /// # Panics
    ///
    /// If `capacity` is zero.
    pub fn new(capacity: usize, make: fn(&B) -> M) -> Self {
        assert!(capacity > 0, "spoiler cache needs a positive capacity");
        Self {
            capacity,
            entries: Vec::with_capacity(capacity),
            make,
        }
    }

    /// Maximum number of colors.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of prepared colors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing was prepared yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<B: Brush, M: Clone> SpoilerMessCache<B> for ColorMaskCache<B, M> {
    type Mess = M;

    /// # Panics
    ///
    /// When a new color is requested from a full cache.
    fn lookup(&mut self, color: &B) -> M {
        if let Some((_, mess)) = self.entries.iter().find(|(key, _)| key == color) {
            return mess.clone();
        }
        assert!(
            self.entries.len() < self.capacity,
            "spoiler cache is full ({} colors)",
            self.capacity
        );
        let mess = (self.make)(color);
        self.entries.push((color.clone(), mess.clone()));
        mess
    }

    fn reset(&mut self) {
        self.entries.clear();
    }
}

/// A cache that prepares every mask anew.
pub struct NoopMaskCache<B, M> {
    make: fn(&B) -> M,
}

impl<B, M> fmt::Debug for NoopMaskCache<B, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoopMaskCache").finish_non_exhaustive()
    }
}

impl<B, M> NoopMaskCache<B, M> {
    /// Creates a cache calling `make` on every lookup.
    pub fn new(make: fn(&B) -> M) -> Self {
        Self { make }
    }
}

impl<B: Brush, M: Clone> SpoilerMessCache<B> for NoopMaskCache<B, M> {
    type Mess = M;

    fn lookup(&mut self, color: &B) -> M {
        (self.make)(color)
    }

    fn reset(&mut self) {}
}

#[cfg(feature = "std")]
mod global {
    use std::sync::{Mutex, OnceLock, PoisonError};

    use super::{ColorMaskCache, DEFAULT_SPOILER_CACHE_CAPACITY, SpoilerMess, SpoilerMessCache};
    use crate::style::Color;

    /// The process-wide spoiler mask cache.
    pub fn default_spoiler_cache() -> &'static Mutex<ColorMaskCache<Color, SpoilerMess>> {
        static CACHE: OnceLock<Mutex<ColorMaskCache<Color, SpoilerMess>>> = OnceLock::new();
        CACHE.get_or_init(|| {
            Mutex::new(ColorMaskCache::new(
                DEFAULT_SPOILER_CACHE_CAPACITY,
                SpoilerMess::from_color,
            ))
        })
    }

    /// Invalidates the process-wide cache. Call when the palette changes.
    pub fn palette_changed() {
        log::debug!("palette changed, dropping tinted spoiler masks");
        default_spoiler_cache()
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .reset();
    }
}

#[cfg(feature = "std")]
pub use global::{default_spoiler_cache, palette_changed};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_reuses_prepared_colors() {
        let mut cache = ColorMaskCache::new(2, SpoilerMess::from_color);
        let red = cache.lookup(&[255, 0, 0, 128]);
        assert_eq!(red.premultiplied, [128, 0, 0, 128]);
        assert_eq!(cache.lookup(&[255, 0, 0, 128]), red);
        assert_eq!(cache.len(), 1);
        cache.lookup(&[0, 0, 255, 255]);
        assert_eq!(cache.len(), 2);
        cache.reset();
        assert!(cache.is_empty());
    }

    #[test]
    #[should_panic(expected = "spoiler cache is full")]
    fn full_cache_is_fatal() {
        let mut cache = ColorMaskCache::new(1, SpoilerMess::from_color);
        cache.lookup(&[1, 2, 3, 255]);
        cache.lookup(&[3, 2, 1, 255]);
    }

    #[test]
    fn noop_cache_never_stores() {
        let mut cache = NoopMaskCache::new(SpoilerMess::from_color);
        let mess = cache.lookup(&[0, 0, 0, 0]);
        assert_eq!(mess.premultiplied, [0, 0, 0, 0]);
    }

    #[cfg(feature = "std")]
    #[test]
    fn palette_change_empties_the_default_cache() {
        default_spoiler_cache()
            .lock()
            .unwrap()
            .lookup(&[10, 20, 30, 255]);
        palette_changed();
        assert!(default_spoiler_cache().lock().unwrap().is_empty());
    }
}
