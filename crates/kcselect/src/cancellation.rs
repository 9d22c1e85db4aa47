//
// cancellation.rs
//
// Copyright (C) 2025 Posit Software, PBC. All rights reserved.
//
//

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use event_listener::Event;

/// A cooperative cancellation signal.
///
/// Clones share the same signal. Cancelling is advisory: the selector checks
/// the token before escalating to the next fallback, but collaborator calls
/// already in flight are not aborted.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    inner: Arc<CancelState>,
}

#[derive(Debug, Default)]
struct CancelState {
    cancelled: AtomicBool,
    event: Event,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal cancellation and wake everyone waiting on the token.
    pub fn cancel(&self) {
        if !self.inner.cancelled.swap(true, Ordering::SeqCst) {
            self.inner.event.notify(usize::MAX);
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Wait until the token is cancelled.
    pub async fn cancelled(&self) {
        loop {
            if self.is_cancelled() {
                return;
            }
            let listener = self.inner.event.listen();
            // Re-check after registering the listener so a cancel that raced
            // with `listen()` is not missed
            if self.is_cancelled() {
                return;
            }
            listener.await;
        }
    }
}

/// Whether an optional token has been cancelled.
pub fn is_cancelled(token: Option<&CancelToken>) -> bool {
    token.map(CancelToken::is_cancelled).unwrap_or(false)
}
