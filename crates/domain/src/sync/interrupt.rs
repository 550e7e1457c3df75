//! Cooperative interrupt signal for blocked workers

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use thiserror::Error;

use super::latch::LatchShared;

/// Returned when a blocking wait observed a raised [`Interrupt`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("interrupted while blocked")]
pub struct Interrupted;

#[derive(Default)]
struct InterruptState {
    raised: AtomicBool,
    /// Latches with a waiter currently blocked on behalf of this interrupt
    parked: Mutex<Vec<Arc<LatchShared>>>,
}

/// Cancellation signal owned by a worker and raised by another thread
///
/// Raising is sticky: once raised, the interrupt stays raised until its
/// owner calls [`Interrupt::clear`], so a wait that observed it cannot hide
/// it from later checks.
#[derive(Clone, Default)]
pub struct Interrupt {
    state: Arc<InterruptState>,
}

impl Interrupt {
    /// Create a lowered interrupt
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the interrupt and wake any interruptible wait parked on it
    pub fn interrupt(&self) {
        self.state.raised.store(true, Ordering::SeqCst);
        let parked: Vec<Arc<LatchShared>> = self.state.parked.lock().clone();
        for latch in parked {
            latch.wake_all();
        }
    }

    /// Whether the interrupt has been raised
    pub fn is_interrupted(&self) -> bool {
        self.state.raised.load(Ordering::SeqCst)
    }

    /// Lower the interrupt, returning whether it was raised
    pub fn clear(&self) -> bool {
        self.state.raised.swap(false, Ordering::SeqCst)
    }

    /// Register a blocked wait on `latch` until the guard is dropped
    pub(super) fn park_on(&self, latch: &Arc<LatchShared>) -> ParkGuard<'_> {
        self.state.parked.lock().push(Arc::clone(latch));
        ParkGuard {
            state: &self.state,
            latch: Arc::clone(latch),
        }
    }
}

impl fmt::Debug for Interrupt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interrupt")
            .field("raised", &self.is_interrupted())
            .finish_non_exhaustive()
    }
}

pub(super) struct ParkGuard<'a> {
    state: &'a InterruptState,
    latch: Arc<LatchShared>,
}

impl Drop for ParkGuard<'_> {
    fn drop(&mut self) {
        let mut parked = self.state.parked.lock();
        if let Some(index) = parked.iter().position(|l| Arc::ptr_eq(l, &self.latch)) {
            parked.swap_remove(index);
        }
    }
}
