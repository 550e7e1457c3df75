//! Endpoint of an execution node and the filter injections use to target one

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Network identity of the node executing fragments
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    address: String,
    port: u16,
}

impl Endpoint {
    /// Create an endpoint
    ///
    /// # Errors
    ///
    /// Returns an error if the address is empty.
    pub fn new(address: impl Into<String>, port: u16) -> Result<Self, DomainError> {
        let address = address.into();
        if address.trim().is_empty() {
            return Err(DomainError::InvalidEndpoint(
                "address must not be empty".to_string(),
            ));
        }
        Ok(Self { address, port })
    }

    /// Endpoint for a node running in the current process
    pub fn local() -> Self {
        Self {
            address: "localhost".to_string(),
            port: 0,
        }
    }

    /// Host address
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Port
    pub const fn port(&self) -> u16 {
        self.port
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::local()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.address, self.port)
    }
}

/// Restricts an injection to nodes matching an address and optionally a port
///
/// An empty filter matches every node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointFilter {
    address: Option<String>,
    port: Option<u16>,
}

impl EndpointFilter {
    /// A filter matching every node
    pub const fn any() -> Self {
        Self {
            address: None,
            port: None,
        }
    }

    /// Create a filter from optional parts
    ///
    /// # Errors
    ///
    /// Returns an error if a port is given without an address.
    pub fn new(address: Option<String>, port: Option<u16>) -> Result<Self, DomainError> {
        if address.is_none() && port.is_some() {
            return Err(DomainError::InvalidEndpoint(
                "port filter requires an address".to_string(),
            ));
        }
        Ok(Self { address, port })
    }

    /// Whether the filter matches every node
    pub const fn is_any(&self) -> bool {
        self.address.is_none()
    }

    /// Check whether the given endpoint is targeted
    pub fn matches(&self, endpoint: &Endpoint) -> bool {
        match &self.address {
            None => true,
            Some(address) => {
                address == endpoint.address()
                    && self.port.is_none_or(|port| port == endpoint.port())
            },
        }
    }
}
