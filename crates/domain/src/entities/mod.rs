//! Entities - injection descriptors and the faults they raise

mod exception_injection;
mod expected_fault;
mod injected_fault;
mod latch_injection;
mod pause_injection;

pub use exception_injection::ExceptionInjection;
pub use expected_fault::ExpectedFault;
pub use injected_fault::InjectedFault;
pub use latch_injection::CountDownLatchInjection;
pub use pause_injection::PauseInjection;
