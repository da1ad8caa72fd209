use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique, time-ordered 128-bit handle to a component owned by an `Authority`.
///
/// Backed by a UUID v7, so identifiers created later sort after earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(Uuid);

impl ComponentId {
    pub(crate) fn generate() -> Self {
        ComponentId(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        ComponentId(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ComponentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(ComponentId)
    }
}

/// Tri-valued signal level carried by every port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum State {
    #[default]
    Undefined,
    Low,
    High,
}

impl State {
    pub fn from_bool(value: bool) -> Self {
        if value {
            State::High
        } else {
            State::Low
        }
    }

    pub fn to_bool(&self) -> Option<bool> {
        match self {
            State::Low => Some(false),
            State::High => Some(true),
            State::Undefined => None,
        }
    }

    pub fn to_char(&self) -> char {
        match self {
            State::Low => '0',
            State::High => '1',
            State::Undefined => 'X',
        }
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            State::Undefined => "Undefined",
            State::Low => "Low",
            State::High => "High",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

/// Gate kind, fixed for the lifetime of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tag {
    And,
    Or,
    Not,
}

impl Tag {
    /// Input arity used by `Component::from_tag`.
    pub fn default_inputs(&self) -> usize {
        match self {
            Tag::And | Tag::Or => 2,
            Tag::Not => 1,
        }
    }

    /// Output arity used by `Component::from_tag`.
    pub fn default_outputs(&self) -> usize {
        1
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tag::And => "AND",
            Tag::Or => "OR",
            Tag::Not => "NOT",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Which side of a component a port index addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortDirection {
    Input,
    Output,
}

impl fmt::Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortDirection::Input => write!(f, "input"),
            PortDirection::Output => write!(f, "output"),
        }
    }
}

/// One port of one component.
///
/// Used as the upstream driver of an input and as an entry in an output's
/// fan-out list. Plain value, never an owning reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortRef {
    pub component: ComponentId,
    pub port: usize,
}

impl PortRef {
    pub fn new(component: ComponentId, port: usize) -> Self {
        PortRef { component, port }
    }
}

impl fmt::Display for PortRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.component, self.port)
    }
}
