// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fundamental text property types.
//!
//! This crate is a lightweight, `no_std` vocabulary layer shared between the rich text
//! engine and the collaborators that feed it (parsers, font metrics providers, renderers).
//! It focuses on small, typed representations of the "leaf" concepts those parties
//! exchange: fixed-point pixel values, run style flags, paragraph direction and paddings.
//!
//! ## Features
//!
//! - `std` (enabled by default): This is currently unused and is provided for forward compatibility.
//!
//! ## Example
//!
//! ```
//! use text_primitives::{Fixed, StyleFlags};
//!
//! let advance = Fixed::from_px(12) + Fixed::from_f32(0.5);
//! assert_eq!(advance.ceil_px(), 13);
//!
//! let flags = StyleFlags::BOLD | StyleFlags::CODE;
//! assert!(flags.is_mono());
//! ```
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

mod bidi;
mod fixed;
mod flags;
mod margins;

pub use bidi::BaseDirection;
pub use fixed::Fixed;
pub use flags::StyleFlags;
pub use margins::Margins;
