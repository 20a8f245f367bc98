// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod env;

pub(crate) use env::{CHAR_WIDTH, LINE_HEIGHT, TestEmoji, TestEnv, framed_style};
