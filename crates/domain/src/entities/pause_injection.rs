//! Pause injection descriptor

use std::time::{Duration, Instant};

use crate::sync::{CountDownLatch, Interrupt, Interrupted};
use crate::value_objects::InjectionSite;

/// A configured pause at one site
///
/// Paused threads wait on a shared gate until it is released with
/// [`PauseInjection::unpause`] or, when a duration is configured, until that
/// duration elapses. Clones share the gate, so releasing one releases every
/// thread paused on the same injection.
#[derive(Debug, Clone)]
pub struct PauseInjection {
    site: InjectionSite,
    gate: CountDownLatch,
    duration: Option<Duration>,
}

impl PauseInjection {
    /// Create a pause that lasts until released
    pub fn new(site: InjectionSite) -> Self {
        Self {
            site,
            gate: CountDownLatch::new(1),
            duration: None,
        }
    }

    /// Create a pause that ends on its own after `duration` unless released earlier
    pub fn timed(site: InjectionSite, duration: Duration) -> Self {
        Self {
            duration: Some(duration),
            ..Self::new(site)
        }
    }

    /// Site this injection targets
    pub const fn site(&self) -> &InjectionSite {
        &self.site
    }

    /// Configured maximum pause, `None` if the pause lasts until released
    pub const fn duration(&self) -> Option<Duration> {
        self.duration
    }

    /// Whether the gate has been released
    pub fn is_released(&self) -> bool {
        self.gate.count() == 0
    }

    /// Block the calling thread, ignoring interrupts
    pub fn pause(&self) {
        match self.duration {
            Some(duration) => {
                self.gate.await_timeout(duration);
            },
            None => self.gate.await_uninterruptibly(),
        }
    }

    /// Block the calling thread until released, timed out, or interrupted
    ///
    /// # Errors
    ///
    /// Returns [`Interrupted`] if `interrupt` is raised before or during the pause.
    pub fn interruptible_pause(&self, interrupt: &Interrupt) -> Result<(), Interrupted> {
        let deadline = self.duration.map(|duration| Instant::now() + duration);
        self.gate
            .await_interruptibly_until(interrupt, deadline)
            .map(|_| ())
    }

    /// Release every thread paused on this injection
    pub fn unpause(&self) {
        self.gate.release();
    }
}
