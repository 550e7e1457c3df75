//! Controls registry port
//!
//! Defines how the injector resolves an injection site to the descriptor
//! configured for it in the current execution context.

use domain::{CountDownLatchInjection, ExceptionInjection, PauseInjection, SiteClass};
#[cfg(test)]
use mockall::automock;

/// Port for resolving injection sites to configured descriptors
///
/// One registry belongs to one execution context and is queried concurrently
/// from every worker of that context, so implementations must be thread-safe
/// without requiring the caller to lock. Lookups never fail: an unknown site
/// resolves to `None`.
///
/// Any trigger policy (skip the first calls, fire a limited number of times)
/// is applied by the registry; a returned descriptor is one that fires now.
#[cfg_attr(test, automock)]
pub trait ExecutionControlsPort: Send + Sync {
    /// Resolve an exception injection for `(site_class, desc)`
    fn lookup_exception_injection(
        &self,
        site_class: &SiteClass,
        desc: &str,
    ) -> Option<ExceptionInjection>;

    /// Resolve a pause injection for `(site_class, desc)`
    fn lookup_pause_injection(&self, site_class: &SiteClass, desc: &str) -> Option<PauseInjection>;

    /// Resolve a countdown latch injection for `(site_class, desc)`
    fn lookup_latch_injection(
        &self,
        site_class: &SiteClass,
        desc: &str,
    ) -> Option<CountDownLatchInjection>;
}
