//! Blocking primitives used by pause and latch injections
//!
//! - [`CountDownLatch`]: blocks waiters until its count reaches zero
//! - [`Interrupt`]: cooperative cancellation signal for a worker thread;
//!   wakes a waiter blocked in an interruptible latch wait
//!
//! Both are cheap to clone; clones share state.

mod interrupt;
mod latch;

pub use interrupt::{Interrupt, Interrupted};
pub use latch::CountDownLatch;
