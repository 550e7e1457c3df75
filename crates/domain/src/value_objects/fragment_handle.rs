//! Fragment handle value object

use std::fmt;

use serde::{Deserialize, Serialize};

use super::QueryId;

/// Identifies one fragment of a query: major fragment (plan stage) and minor
/// fragment (parallel instance of that stage)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FragmentHandle {
    pub query_id: QueryId,
    pub major: u32,
    pub minor: u32,
}

impl FragmentHandle {
    /// Create a fragment handle
    pub const fn new(query_id: QueryId, major: u32, minor: u32) -> Self {
        Self {
            query_id,
            major,
            minor,
        }
    }
}

impl fmt::Display for FragmentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.query_id, self.major, self.minor)
    }
}
