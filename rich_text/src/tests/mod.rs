// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod test_hit;
mod test_natural;
mod test_skip;
mod test_spoiler;
mod utils;
