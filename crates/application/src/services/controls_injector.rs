//! Site injector used inline by production code
//!
//! Each module that wants to simulate faults owns one [`ControlsInjector`],
//! much like a per-module logger. At an injection site the module hands the
//! injector its current controls source and a site description; the injector
//! resolves the pair against the registry and applies whatever is configured.
//!
//! Whether the injector is live is decided once, at construction, from
//! [`TestingMode`]. A disabled injector holds a [`NoOpInjector`] whose every
//! operation returns immediately without touching the source.
//!
//! Unchecked faults unwind with [`InjectedFault`] as the panic payload;
//! checked faults are returned through the site's own error type.

use std::fmt;
use std::panic;

use domain::{
    CountDownLatchInjection, ExceptionInjection, ExpectedFault, FaultClass, InjectedFault,
    Interrupt, Interrupted, SiteClass,
};
use tracing::{debug, error};

use super::TestingMode;
use crate::error::ApplicationError;
use crate::ports::{ControlsSource, PauseLogPort};

/// Dispatch surface shared by the live and no-op injectors
pub trait SiteInjector: Send + Sync + fmt::Debug {
    /// The module owning this injector
    fn site_class(&self) -> &SiteClass;

    /// Whether this injector resolves and applies injections
    fn is_live(&self) -> bool;

    /// Unwind with the configured fault, if one fires now
    fn inject_unchecked(&self, source: &dyn ControlsSource, desc: &str);

    /// Return the configured fault if one fires now and is assignable to `expected`
    ///
    /// A fault that is not assignable is a configuration mismatch and unwinds
    /// with [`ApplicationError::ConfigurationMismatch`].
    fn inject_checked(
        &self,
        source: &dyn ControlsSource,
        desc: &str,
        expected: FaultClass,
    ) -> Result<(), InjectedFault>;

    /// Block uninterruptibly if a pause is configured
    fn inject_pause(&self, source: &dyn ControlsSource, desc: &str, log: &dyn PauseLogPort);

    /// Block interruptibly if a pause is configured
    fn inject_interruptible_pause(
        &self,
        source: &dyn ControlsSource,
        desc: &str,
        log: &dyn PauseLogPort,
        interrupt: &Interrupt,
    ) -> Result<(), Interrupted>;

    /// The latch configured for this site, if any
    fn latch(&self, source: &dyn ControlsSource, desc: &str) -> Option<CountDownLatchInjection>;
}

/// Injector that resolves sites against the current controls registry
#[derive(Debug, Clone)]
pub struct LiveInjector {
    site_class: SiteClass,
}

impl LiveInjector {
    /// Create a live injector for the given module
    pub const fn new(site_class: SiteClass) -> Self {
        Self { site_class }
    }

    fn lookup_exception(
        &self,
        source: &dyn ControlsSource,
        desc: &str,
    ) -> Option<ExceptionInjection> {
        source
            .controls()?
            .lookup_exception_injection(&self.site_class, desc)
    }
}

/// Report a checked site whose configured fault its declared type cannot carry
fn configuration_mismatch(injection: &ExceptionInjection, expected: FaultClass) -> ! {
    let err = ApplicationError::ConfigurationMismatch {
        site: injection.site().to_string(),
        configured: injection.class(),
        expected,
    };
    error!(
        site = %injection.site(),
        configured = %injection.class(),
        expected = %expected,
        "Injection configuration mismatch"
    );
    panic::panic_any(err)
}

impl SiteInjector for LiveInjector {
    fn site_class(&self) -> &SiteClass {
        &self.site_class
    }

    fn is_live(&self) -> bool {
        true
    }

    fn inject_unchecked(&self, source: &dyn ControlsSource, desc: &str) {
        if let Some(injection) = self.lookup_exception(source, desc) {
            let fault = injection.to_fault();
            debug!(site = %fault.site(), class = %fault.class(), "Injecting unchecked fault");
            panic::panic_any(fault);
        }
    }

    fn inject_checked(
        &self,
        source: &dyn ControlsSource,
        desc: &str,
        expected: FaultClass,
    ) -> Result<(), InjectedFault> {
        let Some(injection) = self.lookup_exception(source, desc) else {
            return Ok(());
        };
        if !injection.class().is_assignable_to(expected) {
            configuration_mismatch(&injection, expected);
        }
        let fault = injection.to_fault();
        debug!(
            site = %fault.site(),
            class = %fault.class(),
            expected = %expected,
            "Injecting checked fault"
        );
        Err(fault)
    }

    fn inject_pause(&self, source: &dyn ControlsSource, desc: &str, log: &dyn PauseLogPort) {
        let Some(controls) = source.controls() else {
            return;
        };
        if let Some(pause) = controls.lookup_pause_injection(&self.site_class, desc) {
            log.pausing(pause.site(), false);
            pause.pause();
            log.resuming(pause.site(), false);
        }
    }

    fn inject_interruptible_pause(
        &self,
        source: &dyn ControlsSource,
        desc: &str,
        log: &dyn PauseLogPort,
        interrupt: &Interrupt,
    ) -> Result<(), Interrupted> {
        let Some(controls) = source.controls() else {
            return Ok(());
        };
        let Some(pause) = controls.lookup_pause_injection(&self.site_class, desc) else {
            return Ok(());
        };

        log.pausing(pause.site(), true);
        if let Err(interrupted) = pause.interruptible_pause(interrupt) {
            log.interrupted(pause.site());
            return Err(interrupted);
        }
        log.resuming(pause.site(), true);
        Ok(())
    }

    fn latch(&self, source: &dyn ControlsSource, desc: &str) -> Option<CountDownLatchInjection> {
        source
            .controls()?
            .lookup_latch_injection(&self.site_class, desc)
    }
}

/// Injector whose every operation behaves as if the call was never made
#[derive(Debug, Clone)]
pub struct NoOpInjector {
    site_class: SiteClass,
}

impl NoOpInjector {
    /// Create a no-op injector for the given module
    pub const fn new(site_class: SiteClass) -> Self {
        Self { site_class }
    }
}

impl SiteInjector for NoOpInjector {
    fn site_class(&self) -> &SiteClass {
        &self.site_class
    }

    fn is_live(&self) -> bool {
        false
    }

    #[inline]
    fn inject_unchecked(&self, _source: &dyn ControlsSource, _desc: &str) {}

    #[inline]
    fn inject_checked(
        &self,
        _source: &dyn ControlsSource,
        _desc: &str,
        _expected: FaultClass,
    ) -> Result<(), InjectedFault> {
        Ok(())
    }

    #[inline]
    fn inject_pause(&self, _source: &dyn ControlsSource, _desc: &str, _log: &dyn PauseLogPort) {}

    #[inline]
    fn inject_interruptible_pause(
        &self,
        _source: &dyn ControlsSource,
        _desc: &str,
        _log: &dyn PauseLogPort,
        _interrupt: &Interrupt,
    ) -> Result<(), Interrupted> {
        Ok(())
    }

    #[inline]
    fn latch(&self, _source: &dyn ControlsSource, _desc: &str) -> Option<CountDownLatchInjection> {
        None
    }
}

/// Per-module injector handle
///
/// Immutable after construction; share it freely between threads.
pub struct ControlsInjector {
    inner: Box<dyn SiteInjector>,
}

impl fmt::Debug for ControlsInjector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlsInjector")
            .field("site_class", self.inner.site_class())
            .field("live", &self.inner.is_live())
            .finish()
    }
}

impl ControlsInjector {
    /// Create an injector for `site_class` according to the process-wide [`TestingMode`]
    pub fn new(site_class: SiteClass) -> Self {
        Self::with_mode(site_class, TestingMode::current())
    }

    /// Create an injector for a module path, usually via [`controls_injector!`](crate::controls_injector)
    pub fn for_module(module_path: &'static str) -> Self {
        Self::new(SiteClass::from_module_path(module_path))
    }

    /// Create an injector with an explicit mode
    pub fn with_mode(site_class: SiteClass, mode: TestingMode) -> Self {
        let inner: Box<dyn SiteInjector> = match mode {
            TestingMode::Enabled => Box::new(LiveInjector::new(site_class)),
            TestingMode::Disabled => Box::new(NoOpInjector::new(site_class)),
        };
        Self { inner }
    }

    /// The module owning this injector
    pub fn site_class(&self) -> &SiteClass {
        self.inner.site_class()
    }

    /// Whether this injector resolves and applies injections
    pub fn is_live(&self) -> bool {
        self.inner.is_live()
    }

    /// Raise the fault configured for `desc`, if one fires now, as an unchecked failure
    ///
    /// Unwinds with [`InjectedFault`] as the panic payload. Does nothing if the
    /// source has no controls or nothing is configured for the site.
    pub fn inject_unchecked(&self, source: &dyn ControlsSource, desc: &str) {
        self.inner.inject_unchecked(source, desc);
    }

    /// Return the fault configured for `desc`, if one fires now, as the site's error type
    ///
    /// # Errors
    ///
    /// Returns the injected fault converted into `E`.
    ///
    /// # Panics
    ///
    /// Unwinds with [`ApplicationError::ConfigurationMismatch`] if the
    /// configured fault class is not assignable to `E::CLASS`.
    pub fn inject_checked<E: ExpectedFault>(
        &self,
        source: &dyn ControlsSource,
        desc: &str,
    ) -> Result<(), E> {
        self.inner
            .inject_checked(source, desc, E::CLASS)
            .map_err(E::from_injected)
    }

    /// Pause the calling thread if a pause is configured for `desc`
    ///
    /// Entry and resumption are reported to `log`.
    pub fn inject_pause(&self, source: &dyn ControlsSource, desc: &str, log: &dyn PauseLogPort) {
        self.inner.inject_pause(source, desc, log);
    }

    /// Pause the calling thread interruptibly if a pause is configured for `desc`
    ///
    /// # Errors
    ///
    /// Returns [`Interrupted`] if `interrupt` was raised before or during the
    /// pause; the interruption is reported to `log` first.
    pub fn inject_interruptible_pause(
        &self,
        source: &dyn ControlsSource,
        desc: &str,
        log: &dyn PauseLogPort,
        interrupt: &Interrupt,
    ) -> Result<(), Interrupted> {
        self.inner
            .inject_interruptible_pause(source, desc, log, interrupt)
    }

    /// The latch configured for `desc`, if any; never blocks
    pub fn latch(&self, source: &dyn ControlsSource, desc: &str) -> Option<CountDownLatchInjection> {
        self.inner.latch(source, desc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{ExecutionControlsPort, MockExecutionControlsPort, MockPauseLogPort};
    use domain::{InjectionSite, PauseInjection};
    use mockall::predicate::eq;
    use std::io;
    use std::panic::{AssertUnwindSafe, catch_unwind};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    fn class() -> SiteClass {
        SiteClass::new("exec::work::fragment").unwrap()
    }

    fn site(desc: &str) -> InjectionSite {
        InjectionSite::new(class(), desc).unwrap()
    }

    fn live() -> ControlsInjector {
        ControlsInjector::with_mode(class(), TestingMode::Enabled)
    }

    fn noop() -> ControlsInjector {
        ControlsInjector::with_mode(class(), TestingMode::Disabled)
    }

    fn exception_port(desc: &'static str, fault: FaultClass) -> MockExecutionControlsPort {
        let mut port = MockExecutionControlsPort::new();
        port.expect_lookup_exception_injection()
            .returning(move |_, d| {
                (d == desc).then(|| ExceptionInjection::new(site(d), fault).with_message("boom"))
            });
        port
    }

    fn pause_port(pause: &PauseInjection) -> MockExecutionControlsPort {
        let pause = pause.clone();
        let mut port = MockExecutionControlsPort::new();
        port.expect_lookup_pause_injection()
            .returning(move |_, _| Some(pause.clone()));
        port
    }

    fn silent_log() -> MockPauseLogPort {
        let mut log = MockPauseLogPort::new();
        log.expect_pausing().times(0);
        log.expect_resuming().times(0);
        log.expect_interrupted().times(0);
        log
    }

    /// Source that counts how often the injector asks it for controls
    #[derive(Default)]
    struct CountingSource {
        asked: AtomicUsize,
    }

    impl ControlsSource for CountingSource {
        fn controls(&self) -> Option<&dyn ExecutionControlsPort> {
            self.asked.fetch_add(1, Ordering::SeqCst);
            None
        }
    }

    fn panic_payload(f: impl FnOnce()) -> Box<dyn std::any::Any + Send> {
        match catch_unwind(AssertUnwindSafe(f)) {
            Ok(()) => unreachable!("expected the injection site to unwind"),
            Err(payload) => payload,
        }
    }

    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    #[test]
    fn with_mode_selects_variant() {
        assert!(live().is_live());
        assert!(!noop().is_live());
        assert_eq!(live().site_class(), &class());
        assert_eq!(noop().site_class(), &class());
    }

    #[test]
    fn for_module_uses_module_path() {
        let injector = ControlsInjector::for_module(module_path!());
        assert_eq!(injector.site_class().as_str(), module_path!());
        assert_eq!(injector.is_live(), TestingMode::current().is_enabled());
    }

    #[test]
    fn macro_uses_caller_module() {
        let injector = crate::controls_injector!();
        assert_eq!(injector.site_class().as_str(), module_path!());
    }

    #[test]
    fn debug_shows_class_and_liveness() {
        let debug = format!("{:?}", live());
        assert!(debug.contains("exec::work::fragment"));
        assert!(debug.contains("live: true"));
    }

    // ------------------------------------------------------------------
    // Absent or unconfigured sites
    // ------------------------------------------------------------------

    #[test]
    fn absent_source_is_noop_for_every_operation() {
        let injector = live();
        let absent: Option<&dyn ExecutionControlsPort> = None;
        let log = silent_log();

        injector.inject_unchecked(&absent, "fail-1");
        assert!(injector.inject_checked::<io::Error>(&absent, "fail-1").is_ok());
        injector.inject_pause(&absent, "wait-1", &log);
        assert!(
            injector
                .inject_interruptible_pause(&absent, "wait-1", &log, &Interrupt::new())
                .is_ok()
        );
        assert!(injector.latch(&absent, "sync-1").is_none());
    }

    #[test]
    fn unconfigured_site_is_noop_for_every_operation() {
        let injector = live();
        let mut port = MockExecutionControlsPort::new();
        port.expect_lookup_exception_injection()
            .times(2)
            .returning(|_, _| None);
        port.expect_lookup_pause_injection()
            .times(2)
            .returning(|_, _| None);
        port.expect_lookup_latch_injection()
            .times(1)
            .returning(|_, _| None);
        let port: &dyn ExecutionControlsPort = &port;
        let log = silent_log();

        injector.inject_unchecked(&port, "fail-1");
        assert!(injector.inject_checked::<InjectedFault>(&port, "fail-1").is_ok());
        injector.inject_pause(&port, "wait-1", &log);
        assert!(
            injector
                .inject_interruptible_pause(&port, "wait-1", &log, &Interrupt::new())
                .is_ok()
        );
        assert!(injector.latch(&port, "sync-1").is_none());
    }

    #[test]
    fn lookup_uses_owning_class_and_desc() {
        let mut port = MockExecutionControlsPort::new();
        port.expect_lookup_latch_injection()
            .with(eq(class()), eq("sync-1"))
            .times(1)
            .returning(|_, _| Some(CountDownLatchInjection::new(site("sync-1"), 1)));
        let port: &dyn ExecutionControlsPort = &port;

        let latch = live().latch(&port, "sync-1").unwrap();
        assert_eq!(latch.site(), &site("sync-1"));
    }

    // ------------------------------------------------------------------
    // No-op injector
    // ------------------------------------------------------------------

    #[test]
    fn noop_never_asks_source_or_registry() {
        let injector = noop();
        let counting = CountingSource::default();
        let mut port = MockExecutionControlsPort::new();
        port.expect_lookup_exception_injection().times(0);
        port.expect_lookup_pause_injection().times(0);
        port.expect_lookup_latch_injection().times(0);
        let port: &dyn ExecutionControlsPort = &port;
        let log = silent_log();
        let interrupt = Interrupt::new();
        interrupt.interrupt();

        for _ in 0..1_000 {
            injector.inject_unchecked(&counting, "fail-1");
            injector.inject_unchecked(&port, "fail-1");
            assert!(injector.inject_checked::<io::Error>(&port, "fail-1").is_ok());
            injector.inject_pause(&port, "wait-1", &log);
            assert!(
                injector
                    .inject_interruptible_pause(&port, "wait-1", &log, &interrupt)
                    .is_ok()
            );
            assert!(injector.latch(&port, "sync-1").is_none());
        }
        assert_eq!(counting.asked.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn live_asks_source_once_per_call() {
        let counting = CountingSource::default();
        live().inject_unchecked(&counting, "fail-1");
        assert_eq!(counting.asked.load(Ordering::SeqCst), 1);
    }

    // ------------------------------------------------------------------
    // Exceptions
    // ------------------------------------------------------------------

    #[test]
    fn unchecked_unwinds_with_configured_fault() {
        let port = exception_port("fail-1", FaultClass::IllegalState);
        let port: &dyn ExecutionControlsPort = &port;

        let payload = panic_payload(|| live().inject_unchecked(&port, "fail-1"));
        let fault = InjectedFault::from_panic(payload.as_ref()).unwrap();
        assert_eq!(fault.class(), FaultClass::IllegalState);
        assert_eq!(fault.site(), &site("fail-1"));
        assert_eq!(fault.message(), "boom");
    }

    #[test]
    fn unchecked_raises_checked_classes_as_configured() {
        let port = exception_port("fail-1", FaultClass::Io);
        let port: &dyn ExecutionControlsPort = &port;

        let payload = panic_payload(|| live().inject_unchecked(&port, "fail-1"));
        let fault = InjectedFault::from_panic(payload.as_ref()).unwrap();
        assert_eq!(fault.class(), FaultClass::Io);
    }

    #[test]
    fn checked_returns_fault_as_expected_type() {
        let port = exception_port("fail-1", FaultClass::Timeout);
        let port: &dyn ExecutionControlsPort = &port;

        let err = live()
            .inject_checked::<io::Error>(&port, "fail-1")
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::TimedOut);
    }

    #[test]
    fn checked_propagates_through_question_mark() {
        fn open_reader(
            injector: &ControlsInjector,
            port: &dyn ExecutionControlsPort,
        ) -> io::Result<u32> {
            injector.inject_checked::<io::Error>(&port, "fail-1")?;
            Ok(7)
        }

        let port = exception_port("fail-1", FaultClass::Io);
        assert!(open_reader(&live(), &port).is_err());
        assert_eq!(open_reader(&noop(), &port).unwrap(), 7);
    }

    #[test]
    fn checked_mismatch_reports_configuration_error() {
        let port = exception_port("fail-1", FaultClass::Setup);
        let port: &dyn ExecutionControlsPort = &port;

        let payload = panic_payload(|| {
            let _ = live().inject_checked::<io::Error>(&port, "fail-1");
        });
        assert!(InjectedFault::from_panic(payload.as_ref()).is_none());
        let err = payload.downcast_ref::<ApplicationError>().unwrap();
        assert_eq!(
            err,
            &ApplicationError::ConfigurationMismatch {
                site: site("fail-1").to_string(),
                configured: FaultClass::Setup,
                expected: FaultClass::Io,
            }
        );
    }

    #[test]
    fn checked_unchecked_class_is_mismatch_for_narrow_type() {
        let port = exception_port("fail-1", FaultClass::Runtime);
        let port: &dyn ExecutionControlsPort = &port;

        let payload = panic_payload(|| {
            let _ = live().inject_checked::<io::Error>(&port, "fail-1");
        });
        assert!(payload.downcast_ref::<ApplicationError>().is_some());
    }

    #[test]
    fn concurrent_unchecked_calls_each_raise_their_own_fault() {
        let port = exception_port("fail-1", FaultClass::Runtime);
        let port: &dyn ExecutionControlsPort = &port;
        let injector = live();

        let faults: Vec<InjectedFault> = thread::scope(|scope| {
            let handles: Vec<_> = (0..2)
                .map(|_| {
                    scope.spawn(|| {
                        let payload = panic_payload(|| injector.inject_unchecked(&port, "fail-1"));
                        InjectedFault::from_panic(payload.as_ref()).cloned()
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap().unwrap())
                .collect()
        });
        assert_eq!(faults.len(), 2);
        assert!(faults.iter().all(|f| f.site() == &site("fail-1")));
    }

    // ------------------------------------------------------------------
    // Pauses
    // ------------------------------------------------------------------

    #[test]
    fn pause_logs_entry_and_resumption() {
        let pause = PauseInjection::new(site("wait-1"));
        let port = pause_port(&pause);
        let port: &dyn ExecutionControlsPort = &port;
        let mut log = MockPauseLogPort::new();
        log.expect_pausing()
            .with(eq(site("wait-1")), eq(false))
            .times(1)
            .return_const(());
        log.expect_resuming()
            .with(eq(site("wait-1")), eq(false))
            .times(1)
            .return_const(());
        log.expect_interrupted().times(0);
        let injector = live();

        thread::scope(|scope| {
            let paused = scope.spawn(|| injector.inject_pause(&port, "wait-1", &log));
            thread::sleep(Duration::from_millis(20));
            assert!(!paused.is_finished());
            pause.unpause();
            paused.join().unwrap();
        });
    }

    #[test]
    fn uninterruptible_pause_ignores_interrupt_signals() {
        let pause = PauseInjection::timed(site("wait-1"), Duration::from_millis(30));
        let port = pause_port(&pause);
        let port: &dyn ExecutionControlsPort = &port;
        let mut log = MockPauseLogPort::new();
        log.expect_pausing().times(1).return_const(());
        log.expect_resuming().times(1).return_const(());
        log.expect_interrupted().times(0);

        live().inject_pause(&port, "wait-1", &log);
    }

    #[test]
    fn interruptible_pause_resumes_when_released() {
        let pause = PauseInjection::new(site("wait-1"));
        let port = pause_port(&pause);
        let port: &dyn ExecutionControlsPort = &port;
        let mut log = MockPauseLogPort::new();
        log.expect_pausing()
            .with(eq(site("wait-1")), eq(true))
            .times(1)
            .return_const(());
        log.expect_resuming()
            .with(eq(site("wait-1")), eq(true))
            .times(1)
            .return_const(());
        log.expect_interrupted().times(0);
        let injector = live();
        let interrupt = Interrupt::new();

        thread::scope(|scope| {
            let paused = scope.spawn(|| {
                injector.inject_interruptible_pause(&port, "wait-1", &log, &interrupt)
            });
            thread::sleep(Duration::from_millis(20));
            pause.unpause();
            assert_eq!(paused.join().unwrap(), Ok(()));
        });
    }

    #[test]
    fn interrupt_during_pause_is_logged_once_and_propagated() {
        let pause = PauseInjection::new(site("wait-1"));
        let port = pause_port(&pause);
        let port: &dyn ExecutionControlsPort = &port;
        let mut log = MockPauseLogPort::new();
        log.expect_pausing().times(1).return_const(());
        log.expect_interrupted()
            .with(eq(site("wait-1")))
            .times(1)
            .return_const(());
        log.expect_resuming().times(0);
        let injector = live();
        let interrupt = Interrupt::new();

        thread::scope(|scope| {
            let paused = scope.spawn(|| {
                injector.inject_interruptible_pause(&port, "wait-1", &log, &interrupt)
            });
            thread::sleep(Duration::from_millis(20));
            interrupt.interrupt();
            assert_eq!(paused.join().unwrap(), Err(Interrupted));
        });
        assert!(interrupt.is_interrupted());
        assert!(!pause.is_released());
    }

    #[test]
    fn raised_interrupt_fails_pause_immediately() {
        let pause = PauseInjection::new(site("wait-1"));
        let port = pause_port(&pause);
        let port: &dyn ExecutionControlsPort = &port;
        let mut log = MockPauseLogPort::new();
        log.expect_pausing().times(1).return_const(());
        log.expect_interrupted().times(1).return_const(());
        log.expect_resuming().times(0);
        let interrupt = Interrupt::new();
        interrupt.interrupt();

        assert_eq!(
            live().inject_interruptible_pause(&port, "wait-1", &log, &interrupt),
            Err(Interrupted)
        );
    }

    // ------------------------------------------------------------------
    // Latches
    // ------------------------------------------------------------------

    #[test]
    fn latch_is_returned_without_blocking() {
        let latch = CountDownLatchInjection::new(site("sync-1"), 1);
        let shared = latch.clone();
        let mut port = MockExecutionControlsPort::new();
        port.expect_lookup_latch_injection()
            .returning(move |_, _| Some(shared.clone()));
        let port: &dyn ExecutionControlsPort = &port;

        let found = live().latch(&port, "sync-1").unwrap();
        assert_eq!(found.count(), 1);
        found.count_down();
        assert_eq!(latch.count(), 0);
    }
}
