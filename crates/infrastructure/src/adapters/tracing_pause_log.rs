//! Pause log adapter backed by `tracing`

use application::ports::PauseLogPort;
use domain::InjectionSite;
use tracing::debug;

/// Emits pause events as `debug` events under this module's target
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingPauseLog;

impl TracingPauseLog {
    /// Create the sink
    pub const fn new() -> Self {
        Self
    }
}

impl PauseLogPort for TracingPauseLog {
    fn pausing(&self, site: &InjectionSite, interruptible: bool) {
        debug!(
            site_class = %site.site_class(),
            desc = site.desc(),
            interruptible,
            "Pausing at {site}"
        );
    }

    fn resuming(&self, site: &InjectionSite, interruptible: bool) {
        debug!(
            site_class = %site.site_class(),
            desc = site.desc(),
            interruptible,
            "Resuming at {site}"
        );
    }

    fn interrupted(&self, site: &InjectionSite) {
        debug!(
            site_class = %site.site_class(),
            desc = site.desc(),
            "Pause interrupted at {site}"
        );
    }
}
