//! Countdown latch injection descriptor

use std::time::Duration;

use crate::sync::{CountDownLatch, Interrupt, Interrupted};
use crate::value_objects::InjectionSite;

/// A coordination latch exposed at one site
///
/// The injector never waits on or counts down the latch itself. Production
/// code and the test harness share it to order their actions.
#[derive(Debug, Clone)]
pub struct CountDownLatchInjection {
    site: InjectionSite,
    latch: CountDownLatch,
}

impl CountDownLatchInjection {
    /// Create a latch injection with the given initial count
    pub fn new(site: InjectionSite, count: u64) -> Self {
        Self {
            site,
            latch: CountDownLatch::new(count),
        }
    }

    /// Site this injection targets
    pub const fn site(&self) -> &InjectionSite {
        &self.site
    }

    /// The shared latch
    pub const fn latch(&self) -> &CountDownLatch {
        &self.latch
    }

    /// Current count
    pub fn count(&self) -> u64 {
        self.latch.count()
    }

    /// Decrement the count
    pub fn count_down(&self) {
        self.latch.count_down();
    }

    /// Wait until the count reaches zero, ignoring interrupts
    pub fn await_uninterruptibly(&self) {
        self.latch.await_uninterruptibly();
    }

    /// Wait until the count reaches zero or the timeout elapses
    pub fn await_timeout(&self, timeout: Duration) -> bool {
        self.latch.await_timeout(timeout)
    }

    /// Wait until the count reaches zero or `interrupt` is raised
    ///
    /// # Errors
    ///
    /// Returns [`Interrupted`] if the interrupt is raised.
    pub fn await_interruptibly(&self, interrupt: &Interrupt) -> Result<(), Interrupted> {
        self.latch.await_interruptibly(interrupt)
    }
}
