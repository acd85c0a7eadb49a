use std::cell::Cell;

use gloo_timers::future::TimeoutFuture;

/// Suspend the current task for `ms` milliseconds.
pub async fn sleep(ms: u32) {
    TimeoutFuture::new(ms).await;
}

/// Suspend until `predicate` holds, re-checking every `interval_ms`.
/// Unbounded: the caller decides when waiting no longer matters (see
/// [`LocateToken`]).
pub async fn await_condition(predicate: impl Fn() -> bool, interval_ms: u32) {
    while !predicate() {
        TimeoutFuture::new(interval_ms).await;
    }
}

thread_local! {
    static LOCATE_GENERATION: Cell<u64> = const { Cell::new(0) };
}

/// Supersession token for locate tasks.
///
/// Issuing a new token makes every earlier one stale. A locate task checks
/// its token after each suspension point and bails out quietly once
/// superseded, so two pans never race against the shared map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocateToken {
    generation: u64,
}

impl LocateToken {
    /// Issue a fresh token, superseding all previously issued ones.
    pub fn issue() -> Self {
        LOCATE_GENERATION.with(|current| {
            let next = current.get() + 1;
            current.set(next);
            Self { generation: next }
        })
    }

    pub fn is_stale(&self) -> bool {
        LOCATE_GENERATION.with(|current| current.get() != self.generation)
    }
}
