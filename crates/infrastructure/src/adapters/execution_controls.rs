//! In-memory controls registry adapter
//!
//! Implements `ExecutionControlsPort` for one execution on one endpoint. The
//! registry is fixed at construction; the only state that changes afterwards
//! is the per-site call counters and the lookup statistics, both atomic.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use application::ports::{ControlsSource, ExecutionControlsPort};
use domain::{
    CountDownLatchInjection, DomainError, Endpoint, ExceptionInjection, InjectionSchedule,
    InjectionSite, PauseInjection, SiteClass,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::controls::{Armed, ControlsDocument, ControlsError, ResolvedInjection};

/// Descriptor paired with the schedule that decides when it resolves
#[derive(Debug)]
struct Scheduled<T> {
    descriptor: T,
    schedule: InjectionSchedule,
    calls: AtomicU64,
}

impl<T: Clone> Scheduled<T> {
    fn new(descriptor: T, schedule: InjectionSchedule) -> Self {
        Self {
            descriptor,
            schedule,
            calls: AtomicU64::new(0),
        }
    }

    /// Consume one call and return the descriptor if that call fires
    fn next(&self) -> Option<T> {
        let call_index = self.calls.fetch_add(1, Ordering::Relaxed);
        self.schedule
            .fires_at(call_index)
            .then(|| self.descriptor.clone())
    }
}

#[derive(Debug)]
enum Entry {
    Exception(Scheduled<ExceptionInjection>),
    Pause(Scheduled<PauseInjection>),
    Latch(CountDownLatchInjection),
}

impl Entry {
    fn from_resolved(resolved: ResolvedInjection) -> Self {
        match resolved.armed {
            Armed::Exception(injection) => {
                Self::Exception(Scheduled::new(injection, resolved.schedule))
            },
            Armed::Pause(injection) => Self::Pause(Scheduled::new(injection, resolved.schedule)),
            Armed::Latch(injection) => Self::Latch(injection),
        }
    }

    const fn kind(&self) -> &'static str {
        match self {
            Self::Exception(_) => "exception",
            Self::Pause(_) => "pause",
            Self::Latch(_) => "latch",
        }
    }
}

/// Lookup counters of a registry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ControlsStats {
    /// Lookups of any kind
    pub lookups: u64,
    /// Lookups that returned a descriptor
    pub resolved: u64,
}

/// Controls registry for one execution on one endpoint
#[derive(Debug, Default)]
pub struct ExecutionControls {
    endpoint: Endpoint,
    sites: HashMap<SiteClass, HashMap<String, Entry>>,
    lookups: AtomicU64,
    resolved: AtomicU64,
}

impl ExecutionControls {
    /// Registry with no injections
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the registry for `endpoint` from a validated document
    ///
    /// Injections whose endpoint filter does not match are dropped. When a
    /// site is configured more than once, the last injection wins.
    ///
    /// # Errors
    ///
    /// Returns an error if any injection in the document is invalid.
    pub fn from_document(
        document: &ControlsDocument,
        endpoint: &Endpoint,
    ) -> Result<Self, DomainError> {
        let mut sites: HashMap<SiteClass, HashMap<String, Entry>> = HashMap::new();
        for resolved in document.resolve()? {
            if !resolved.filter.matches(endpoint) {
                debug!(
                    site = %resolved.site,
                    endpoint = %endpoint,
                    "Injection not armed on this endpoint"
                );
                continue;
            }
            let site = resolved.site.clone();
            let entry = Entry::from_resolved(resolved);
            let previous = sites
                .entry(site.site_class().clone())
                .or_default()
                .insert(site.desc().to_string(), entry);
            if let Some(previous) = previous {
                debug!(site = %site, replaced = previous.kind(), "Injection replaced");
            }
        }

        let controls = Self {
            endpoint: endpoint.clone(),
            sites,
            lookups: AtomicU64::new(0),
            resolved: AtomicU64::new(0),
        };
        info!(
            endpoint = %endpoint,
            injections = controls.len(),
            "Execution controls armed"
        );
        Ok(controls)
    }

    /// Parse a JSON controls document and build the registry for `endpoint`
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or invalid.
    pub fn parse(json: &str, endpoint: &Endpoint) -> Result<Self, ControlsError> {
        let document = ControlsDocument::parse(json)?;
        Ok(Self::from_document(&document, endpoint)?)
    }

    /// Endpoint this registry was built for
    pub const fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Number of armed injections
    pub fn len(&self) -> usize {
        self.sites.values().map(HashMap::len).sum()
    }

    /// Whether no injections are armed
    pub fn is_empty(&self) -> bool {
        self.sites.values().all(HashMap::is_empty)
    }

    /// Every armed site, in no particular order
    pub fn sites(&self) -> impl Iterator<Item = InjectionSite> + '_ {
        self.sites.iter().flat_map(|(class, descs)| {
            descs
                .keys()
                .map(move |desc| InjectionSite::lookup_key(class.clone(), desc))
        })
    }

    /// Release every pause, including threads already blocked on one
    ///
    /// Released pauses stay released.
    pub fn unpause_all(&self) {
        let mut released = 0_usize;
        for pause in self.pauses() {
            pause.unpause();
            released += 1;
        }
        debug!(released, "Released all pauses");
    }

    /// Release the pause configured at `site`
    ///
    /// Returns `false` if no pause is configured there.
    pub fn unpause(&self, site: &InjectionSite) -> bool {
        match self.entry(site.site_class(), site.desc()) {
            Some(Entry::Pause(scheduled)) => {
                scheduled.descriptor.unpause();
                debug!(site = %site, "Released pause");
                true
            },
            _ => false,
        }
    }

    /// Snapshot of the lookup counters
    pub fn stats(&self) -> ControlsStats {
        ControlsStats {
            lookups: self.lookups.load(Ordering::Relaxed),
            resolved: self.resolved.load(Ordering::Relaxed),
        }
    }

    fn pauses(&self) -> impl Iterator<Item = &PauseInjection> {
        self.sites
            .values()
            .flat_map(HashMap::values)
            .filter_map(|entry| match entry {
                Entry::Pause(scheduled) => Some(&scheduled.descriptor),
                _ => None,
            })
    }

    fn entry(&self, site_class: &SiteClass, desc: &str) -> Option<&Entry> {
        self.sites.get(site_class)?.get(desc)
    }

    /// Count a lookup and its outcome
    fn record<T>(&self, found: Option<T>) -> Option<T> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        if found.is_some() {
            self.resolved.fetch_add(1, Ordering::Relaxed);
        }
        found
    }
}

impl ExecutionControlsPort for ExecutionControls {
    fn lookup_exception_injection(
        &self,
        site_class: &SiteClass,
        desc: &str,
    ) -> Option<ExceptionInjection> {
        let found = match self.entry(site_class, desc) {
            Some(Entry::Exception(scheduled)) => scheduled.next(),
            _ => None,
        };
        self.record(found)
    }

    fn lookup_pause_injection(&self, site_class: &SiteClass, desc: &str) -> Option<PauseInjection> {
        let found = match self.entry(site_class, desc) {
            Some(Entry::Pause(scheduled)) => scheduled.next(),
            _ => None,
        };
        self.record(found)
    }

    fn lookup_latch_injection(
        &self,
        site_class: &SiteClass,
        desc: &str,
    ) -> Option<CountDownLatchInjection> {
        let found = match self.entry(site_class, desc) {
            Some(Entry::Latch(latch)) => Some(latch.clone()),
            _ => None,
        };
        self.record(found)
    }
}

impl ControlsSource for ExecutionControls {
    fn controls(&self) -> Option<&dyn ExecutionControlsPort> {
        Some(self)
    }
}
