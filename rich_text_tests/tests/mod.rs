// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate contains the integration test suite for `rich_text`.
//!
//! - The `util` module holds the fixed-advance measure and builders shared by the tests.
//! - We do not use the default Rust test harness, but instead use this `mod.rs` file as the
//!   entry point to run all other tests, so shared helpers are defined once.
//! - For test naming, put the "topic" of the test at the start of the name, e.g.
//!   `wrap_two_lines` rather than `two_lines_wrap`.

#![allow(missing_docs, reason = "we don't need docs for testing")]

#[macro_use]
mod util;
