// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

use super::*;

#[test]
fn epoch_is_zero() {
    assert_eq!(Watermark::EPOCH.epoch_ms(), 0);
}

#[test]
fn advance_moves_forward() {
    let mut wm = Watermark::new(10);
    wm.advance(20);
    assert_eq!(wm.epoch_ms(), 20);
}

#[test]
fn advance_never_moves_backward() {
    let mut wm = Watermark::new(20);
    wm.advance(10);
    assert_eq!(wm.epoch_ms(), 20);
}
