// SPDX-FileCopyrightText: 2026 Tattle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Presentation context that only counts dismissals.

use std::sync::atomic::{AtomicUsize, Ordering};

use tattle_core::PresentationContext;

#[derive(Debug, Default)]
pub struct MockPresenter {
    dismissals: AtomicUsize,
}

impl MockPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dismissals(&self) -> usize {
        self.dismissals.load(Ordering::SeqCst)
    }
}

impl PresentationContext for MockPresenter {
    fn dismiss(&self) {
        self.dismissals.fetch_add(1, Ordering::SeqCst);
    }
}
