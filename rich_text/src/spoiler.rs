// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reveal state of spoiler-hidden runs.

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use core::cell::RefCell;
use core::fmt;
use core::time::Duration;

use crate::entity::EntityType;
use crate::link::{ClickContext, ClickHandler, EntityLinkData};

/// Duration of the reveal fade.
pub const SPOILER_REVEAL_DURATION: Duration = Duration::from_millis(200);

/// How a state change is presented.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AnimType {
    /// Jump to the new state, cancelling any running animation.
    Instant,
    /// Fade to the new state.
    #[default]
    Normal,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct RevealAnimation {
    from: f64,
    to: f64,
    elapsed: Duration,
}

impl RevealAnimation {
    fn value(&self) -> f64 {
        let t = self.elapsed.as_secs_f64() / SPOILER_REVEAL_DURATION.as_secs_f64();
        self.from + (self.to - self.from) * t.min(1.)
    }
}

pub(crate) type RepaintCallback = Rc<dyn Fn()>;

#[derive(Default)]
pub(crate) struct RevealState {
    revealed: bool,
    animation: Option<RevealAnimation>,
    repaint: Option<RepaintCallback>,
}

impl fmt::Debug for RevealState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RevealState")
            .field("revealed", &self.revealed)
            .field("animation", &self.animation)
            .finish_non_exhaustive()
    }
}

impl RevealState {
    pub(crate) fn revealed(&self) -> bool {
        self.revealed
    }

    pub(crate) fn animating(&self) -> bool {
        self.animation.is_some()
    }

    pub(crate) fn set_repaint(&mut self, repaint: RepaintCallback) {
        self.repaint = Some(repaint);
    }

    /// Applies a state change, returning the repaint callback to fire once the state is
    /// no longer borrowed.
    pub(crate) fn set_revealed(&mut self, revealed: bool, anim: AnimType) -> Option<RepaintCallback> {
        if self.revealed == revealed {
            if anim == AnimType::Instant && self.animation.take().is_some() {
                return self.repaint.clone();
            }
            return None;
        }
        self.revealed = revealed;
        match anim {
            AnimType::Instant => {
                self.animation = None;
                self.repaint.clone()
            }
            AnimType::Normal => {
                let (from, to) = if revealed { (0., 1.) } else { (1., 0.) };
                self.animation = Some(RevealAnimation {
                    from,
                    to,
                    elapsed: Duration::ZERO,
                });
                None
            }
        }
    }

    /// Steps the running animation by `dt`.
    pub(crate) fn advance(&mut self, dt: Duration) -> Option<RepaintCallback> {
        let animation = self.animation.as_mut()?;
        animation.elapsed = animation.elapsed.saturating_add(dt);
        if animation.elapsed >= SPOILER_REVEAL_DURATION {
            self.animation = None;
        }
        self.repaint.clone()
    }

    /// Reveal progress from `0` (hidden) to `1` (revealed).
    pub(crate) fn progress(&self) -> f64 {
        match &self.animation {
            Some(animation) => animation.value(),
            None if self.revealed => 1.,
            None => 0.,
        }
    }
}

pub(crate) fn fire(repaint: Option<RepaintCallback>) {
    if let Some(repaint) = repaint {
        repaint();
    }
}

/// Reveals the spoilers of a string when clicked.
///
/// The handler only holds a weak handle to the reveal state, so the owning string can
/// be moved freely and a handler outliving it does nothing.
pub(crate) struct SpoilerClickHandler {
    state: Weak<RefCell<RevealState>>,
    filter: Box<dyn Fn(&ClickContext) -> bool>,
}

impl fmt::Debug for SpoilerClickHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpoilerClickHandler")
            .field("alive", &(self.state.strong_count() > 0))
            .finish_non_exhaustive()
    }
}

impl ClickHandler for SpoilerClickHandler {
    fn text_entity(&self) -> EntityLinkData {
        EntityLinkData {
            kind: EntityType::Invalid,
            ..EntityLinkData::default()
        }
    }

    fn on_click(&self, context: &ClickContext) {
        if !(self.filter)(context) {
            return;
        }
        if let Some(state) = self.state.upgrade() {
            let repaint = state.borrow_mut().set_revealed(true, AnimType::Normal);
            fire(repaint);
        }
    }
}

#[derive(Debug)]
pub(crate) struct SpoilerData {
    pub(crate) state: Rc<RefCell<RevealState>>,
    pub(crate) link: Option<Rc<SpoilerClickHandler>>,
}

impl SpoilerData {
    pub(crate) fn new() -> Self {
        Self {
            state: Rc::default(),
            link: None,
        }
    }

    pub(crate) fn install_link(&mut self, filter: Box<dyn Fn(&ClickContext) -> bool>) {
        self.link = Some(Rc::new(SpoilerClickHandler {
            state: Rc::downgrade(&self.state),
            filter,
        }));
    }
}
