//! Query and fragment execution contexts
//!
//! Both contexts share the registry of the query they belong to, so a site
//! can pass whichever context it holds as its controls source.

use std::sync::Arc;

use application::ports::{ControlsSource, ExecutionControlsPort};
use domain::{FragmentHandle, Interrupt, QueryId};

use super::ExecutionControls;

/// Context of one running query
#[derive(Debug, Clone)]
pub struct QueryContext {
    query_id: QueryId,
    controls: Arc<ExecutionControls>,
}

impl QueryContext {
    /// Create a context for `query_id` that owns `controls` for its lifetime
    pub fn new(query_id: QueryId, controls: Arc<ExecutionControls>) -> Self {
        Self { query_id, controls }
    }

    /// Create a context with a fresh query id and no injections
    #[must_use]
    pub fn without_controls() -> Self {
        Self::new(QueryId::new(), Arc::new(ExecutionControls::empty()))
    }

    pub const fn query_id(&self) -> QueryId {
        self.query_id
    }

    /// Registry active for this query
    pub fn execution_controls(&self) -> &ExecutionControls {
        &self.controls
    }

    /// Context for fragment `major:minor` of this query
    pub fn fragment(&self, major: u32, minor: u32) -> FragmentContext {
        FragmentContext::new(
            FragmentHandle::new(self.query_id, major, minor),
            Arc::clone(&self.controls),
        )
    }
}

impl ControlsSource for QueryContext {
    fn controls(&self) -> Option<&dyn ExecutionControlsPort> {
        Some(self.controls.as_ref())
    }
}

/// Context of one fragment of a query, run by one worker
///
/// Each fragment carries its own [`Interrupt`], which cancels the worker's
/// interruptible pauses.
#[derive(Debug, Clone)]
pub struct FragmentContext {
    handle: FragmentHandle,
    controls: Arc<ExecutionControls>,
    interrupt: Interrupt,
}

impl FragmentContext {
    pub fn new(handle: FragmentHandle, controls: Arc<ExecutionControls>) -> Self {
        Self {
            handle,
            controls,
            interrupt: Interrupt::new(),
        }
    }

    pub const fn handle(&self) -> &FragmentHandle {
        &self.handle
    }

    /// Registry active for the owning query
    pub fn execution_controls(&self) -> &ExecutionControls {
        &self.controls
    }

    /// Interrupt token of the fragment's worker
    pub const fn interrupt(&self) -> &Interrupt {
        &self.interrupt
    }

    /// Interrupt the fragment's worker
    pub fn cancel(&self) {
        tracing::debug!(fragment = %self.handle, "Cancelling fragment");
        self.interrupt.interrupt();
    }

    /// Whether the fragment was cancelled
    pub fn is_cancelled(&self) -> bool {
        self.interrupt.is_interrupted()
    }
}

impl ControlsSource for FragmentContext {
    fn controls(&self) -> Option<&dyn ExecutionControlsPort> {
        Some(self.controls.as_ref())
    }
}
