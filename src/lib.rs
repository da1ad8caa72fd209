//! # Gate Netlist
//!
//! A directed netlist of digital-logic gates (AND/OR/NOT) and the
//! point-to-point wiring between their ports.
//!
//! This library provides:
//! - Components with tri-state input/output ports and per-port link tables
//! - An owning registry (`Authority`) that hands out identifiers, never references
//! - A wiring protocol that rejects invalid, occupied or duplicate connections
//!   before touching either side of the link
//! - JSON configuration for the authority's write policy and capacity
//!
//! ```rust
//! use gate_netlist::{Authority, PortRef, Tag};
//!
//! let mut authority = Authority::new();
//! let and = authority.create_default(Tag::And).unwrap();
//! let or = authority.create_default(Tag::Or).unwrap();
//! authority.connect(and, 0, or, 0).unwrap();
//!
//! assert_eq!(authority.component(or).unwrap().source(0), Some(PortRef::new(and, 0)));
//! ```

pub mod authority;
pub mod component;
pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used items for easier importing
pub use authority::{Authority, TeardownReport};
pub use component::Component;
pub use config::{AuthorityConfig, WritePolicy};
pub use error::{ConfigError, NetlistError};
pub use types::{ComponentId, PortDirection, PortRef, State, Tag};
