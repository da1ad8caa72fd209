//! Error types for netlist construction and wiring

use crate::types::{ComponentId, PortDirection, PortRef};
use std::collections::TryReserveError;
use thiserror::Error;

/// Errors raised by components and the authority.
///
/// Every connection error is detected before any link table is touched.
#[derive(Debug, Error)]
pub enum NetlistError {
    #[error("Allocation failed: {0}")]
    Allocation(#[from] TryReserveError),

    #[error("Nonexistent component: {0}")]
    NonexistentComponent(ComponentId),

    #[error("Invalid connector index: {direction} {index} on {component} (arity {arity})")]
    InvalidConnectorIndex {
        component: ComponentId,
        direction: PortDirection,
        index: usize,
        arity: usize,
    },

    #[error("Connector occupied: {input} is already driven by {driver}")]
    ConnectorOccupied { input: PortRef, driver: PortRef },

    #[error("Already connected: {output} -> {input}")]
    AlreadyConnected { output: PortRef, input: PortRef },

    #[error("Port out of range: {direction} {index} (arity {arity})")]
    PortOutOfRange {
        direction: PortDirection,
        index: usize,
        arity: usize,
    },
}

/// Errors from loading or saving an `AuthorityConfig`
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}
