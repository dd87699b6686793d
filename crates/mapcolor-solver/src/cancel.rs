//! Cooperative cancellation, polled at the top of every search frame.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::search::SearchStats;

pub trait Cancellation {
    /// Whether the search should stop now. `stats` are the counters so far.
    fn should_abort(&self, stats: &SearchStats) -> bool;
}

impl<F> Cancellation for F
where
    F: Fn(&SearchStats) -> bool,
{
    fn should_abort(&self, stats: &SearchStats) -> bool {
        self(stats)
    }
}

/// Never cancels.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl Cancellation for NeverCancel {
    fn should_abort(&self, _stats: &SearchStats) -> bool {
        false
    }
}

/// Shared flag a host can set from any thread to stop a running search.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

impl Cancellation for CancelToken {
    fn should_abort(&self, _stats: &SearchStats) -> bool {
        self.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_clones_share_state() {
        let token = CancelToken::new();
        let handle = token.clone();
        assert!(!token.should_abort(&SearchStats::default()));
        handle.cancel();
        assert!(token.is_cancelled());
        assert!(token.should_abort(&SearchStats::default()));
    }

    #[test]
    fn test_closure_budget() {
        let budget = |stats: &SearchStats| stats.nodes >= 10;
        let mut stats = SearchStats::default();
        assert!(!budget.should_abort(&stats));
        stats.nodes = 10;
        assert!(budget.should_abort(&stats));
    }
}
