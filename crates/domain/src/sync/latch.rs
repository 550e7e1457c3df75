//! Countdown latch

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use super::{Interrupt, Interrupted};

/// State shared by all clones of a latch and by interrupts parked on it
pub(super) struct LatchShared {
    pub(super) count: Mutex<u64>,
    pub(super) released: Condvar,
}

impl LatchShared {
    /// Wake every waiter so it re-checks its exit conditions
    pub(super) fn wake_all(&self) {
        let _count = self.count.lock();
        self.released.notify_all();
    }
}

/// A synchronization aid that blocks waiters until a count reaches zero
///
/// The count only ever decreases. Once it reaches zero every current and
/// future wait returns immediately.
#[derive(Clone)]
pub struct CountDownLatch {
    shared: Arc<LatchShared>,
}

impl CountDownLatch {
    /// Create a latch with the given initial count
    pub fn new(count: u64) -> Self {
        Self {
            shared: Arc::new(LatchShared {
                count: Mutex::new(count),
                released: Condvar::new(),
            }),
        }
    }

    /// Current count
    pub fn count(&self) -> u64 {
        *self.shared.count.lock()
    }

    /// Decrement the count, releasing all waiters when it reaches zero
    ///
    /// Counting down an open latch has no effect.
    pub fn count_down(&self) {
        let mut count = self.shared.count.lock();
        if *count == 0 {
            return;
        }
        *count -= 1;
        if *count == 0 {
            self.shared.released.notify_all();
        }
    }

    /// Drop the count to zero, releasing all waiters
    pub fn release(&self) {
        let mut count = self.shared.count.lock();
        if *count != 0 {
            *count = 0;
            self.shared.released.notify_all();
        }
    }

    /// Block until the count reaches zero, ignoring interrupts
    pub fn await_uninterruptibly(&self) {
        let mut count = self.shared.count.lock();
        while *count != 0 {
            self.shared.released.wait(&mut count);
        }
    }

    /// Block until the count reaches zero or the timeout elapses
    ///
    /// Returns `true` if the latch opened.
    pub fn await_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut count = self.shared.count.lock();
        while *count != 0 {
            if self
                .shared
                .released
                .wait_until(&mut count, deadline)
                .timed_out()
            {
                return *count == 0;
            }
        }
        true
    }

    /// Block until the count reaches zero or `interrupt` is raised
    ///
    /// # Errors
    ///
    /// Returns [`Interrupted`] if the interrupt was raised before or during
    /// the wait. The interrupt stays raised.
    pub fn await_interruptibly(&self, interrupt: &Interrupt) -> Result<(), Interrupted> {
        self.await_interruptibly_until(interrupt, None).map(|_| ())
    }

    /// Block until the count reaches zero, `interrupt` is raised, or the
    /// optional deadline passes
    ///
    /// Returns `Ok(true)` if the latch opened and `Ok(false)` on deadline.
    ///
    /// # Errors
    ///
    /// Returns [`Interrupted`] if the interrupt was raised before or during
    /// the wait.
    pub fn await_interruptibly_until(
        &self,
        interrupt: &Interrupt,
        deadline: Option<Instant>,
    ) -> Result<bool, Interrupted> {
        if interrupt.is_interrupted() {
            return Err(Interrupted);
        }

        let _parked = interrupt.park_on(&self.shared);
        let mut count = self.shared.count.lock();
        loop {
            // Checked under the latch lock; `Interrupt::interrupt` takes the
            // same lock before notifying, so the wake-up cannot be lost.
            if interrupt.is_interrupted() {
                return Err(Interrupted);
            }
            if *count == 0 {
                return Ok(true);
            }
            match deadline {
                Some(deadline) => {
                    if self
                        .shared
                        .released
                        .wait_until(&mut count, deadline)
                        .timed_out()
                    {
                        if interrupt.is_interrupted() {
                            return Err(Interrupted);
                        }
                        return Ok(*count == 0);
                    }
                },
                None => self.shared.released.wait(&mut count),
            }
        }
    }
}

impl fmt::Debug for CountDownLatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountDownLatch")
            .field("count", &self.count())
            .finish()
    }
}
