//! Transient UI state and the single in-flight guard.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared "an operation is running" flag.
///
/// Acquisition is an atomic check-and-set, so two callers can never both
/// believe they own the flag. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    busy: Arc<AtomicBool>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the flag, or returns `None` if another operation holds it.
    pub fn try_acquire(&self) -> Option<InFlightPermit> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightPermit {
                busy: Arc::clone(&self.busy),
            })
    }

    pub fn is_set(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Ownership of the in-flight flag. Dropping it clears the flag.
#[derive(Debug)]
pub struct InFlightPermit {
    busy: Arc<AtomicBool>,
}

impl Drop for InFlightPermit {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

/// What the user sees besides the transcript.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    loading: InFlight,
    pub error: Option<String>,
    pub pending_input: String,
}

impl UiState {
    pub fn is_loading(&self) -> bool {
        self.loading.is_set()
    }

    pub const fn in_flight(&self) -> &InFlight {
        &self.loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_fails_until_release() {
        let flag = InFlight::new();

        let permit = flag.try_acquire();
        assert!(permit.is_some());
        assert!(flag.is_set());
        assert!(flag.try_acquire().is_none());

        drop(permit);
        assert!(!flag.is_set());
        assert!(flag.try_acquire().is_some());
    }

    #[test]
    fn test_clones_share_the_flag() {
        let flag = InFlight::new();
        let observer = flag.clone();

        let _permit = flag.try_acquire();
        assert!(observer.is_set());
        assert!(observer.try_acquire().is_none());
    }

    #[test]
    fn test_only_one_thread_wins() {
        let flag = InFlight::new();
        let barrier = Arc::new(std::sync::Barrier::new(8));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let flag = flag.clone();
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    barrier.wait();
                    // Keep the permit alive past the join so losers cannot reacquire.
                    flag.try_acquire().map(std::mem::forget).is_some()
                })
            })
            .collect();

        let winners = handles
            .into_iter()
            .filter_map(|h| h.join().ok())
            .filter(|won| *won)
            .count();
        assert_eq!(winners, 1);
    }
}
