// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

//! Black-box scenarios driven against the compiled `gt`/`gastownd` binaries.

mod support;

mod convoy;
mod queue;
mod sling;
