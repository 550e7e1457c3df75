//! Pause log port
//!
//! Sink for the events a live pause emits. Call sites usually pass a sink
//! that logs on behalf of their own module.

use domain::InjectionSite;
#[cfg(test)]
use mockall::automock;

/// Port receiving pause entry and exit events
#[cfg_attr(test, automock)]
pub trait PauseLogPort: Send + Sync {
    /// The calling thread is about to block at `site`
    fn pausing(&self, site: &InjectionSite, interruptible: bool);

    /// The calling thread stopped blocking at `site` without interruption
    fn resuming(&self, site: &InjectionSite, interruptible: bool);

    /// An interruptible pause at `site` was interrupted
    fn interrupted(&self, site: &InjectionSite);
}
