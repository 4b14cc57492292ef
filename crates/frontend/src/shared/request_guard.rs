//! Last-request-wins guard for superseding list fetches
//!
//! Paginated fetches are independent and the newest one must win: a stale
//! response that lands after a newer request started must not overwrite
//! state. Each fetch takes a ticket before awaiting and checks it is still
//! the latest before applying the response.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct RequestGuard {
    latest: Arc<AtomicU64>,
}

impl RequestGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding all earlier ones
    pub fn begin(&self) -> u64 {
        let ticket = self.latest.load(Ordering::Relaxed) + 1;
        self.latest.store(ticket, Ordering::Relaxed);
        ticket
    }

    /// Is this ticket still the newest request?
    pub fn is_current(&self, ticket: u64) -> bool {
        self.latest.load(Ordering::Relaxed) == ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_request_wins() {
        let guard = RequestGuard::new();
        let page2 = guard.begin();
        let page1 = guard.begin();

        // page2's response arrives after page1 was requested
        assert!(!guard.is_current(page2));
        assert!(guard.is_current(page1));
    }

    #[test]
    fn in_order_responses_all_apply() {
        let guard = RequestGuard::new();
        let a = guard.begin();
        assert!(guard.is_current(a));
        let b = guard.begin();
        assert!(guard.is_current(b));
    }
}
