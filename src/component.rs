use crate::config::WritePolicy;
use crate::error::NetlistError;
use crate::types::{ComponentId, PortDirection, PortRef, State, Tag};
use std::collections::TryReserveError;
use std::fmt;
use tracing::trace;

/// A single logic element: port state plus wiring references.
///
/// The component is a passive record. Port values are changed through the
/// accessors; the link tables (`source`, `target`) are only written by the
/// owning [`Authority`](crate::authority::Authority).
#[derive(Debug)]
pub struct Component {
    id: ComponentId,
    tag: Tag,
    write_policy: WritePolicy,
    inputs: Vec<State>,
    outputs: Vec<State>,
    source: Vec<Option<PortRef>>,
    // An empty list means the output drives nothing.
    target: Vec<Vec<PortRef>>,
}

fn filled<T: Clone>(len: usize, value: T) -> Result<Vec<T>, TryReserveError> {
    let mut values = Vec::new();
    values.try_reserve_exact(len)?;
    values.resize(len, value);
    Ok(values)
}

impl Component {
    /// Build a component with explicit arities.
    ///
    /// All ports start `Undefined`, no input has a driver and no output fans
    /// out. Fails only if the port arrays cannot be allocated.
    pub fn try_new(tag: Tag, inputs: usize, outputs: usize) -> Result<Self, NetlistError> {
        Ok(Component {
            id: ComponentId::generate(),
            tag,
            write_policy: WritePolicy::default(),
            inputs: filled(inputs, State::Undefined)?,
            outputs: filled(outputs, State::Undefined)?,
            source: filled(inputs, None)?,
            target: filled(outputs, Vec::new())?,
        })
    }

    /// Infallible variant of [`Component::try_new`]; aborts on allocation failure
    /// like any other `Vec` allocation.
    pub fn new(tag: Tag, inputs: usize, outputs: usize) -> Self {
        Component {
            id: ComponentId::generate(),
            tag,
            write_policy: WritePolicy::default(),
            inputs: vec![State::Undefined; inputs],
            outputs: vec![State::Undefined; outputs],
            source: vec![None; inputs],
            target: vec![Vec::new(); outputs],
        }
    }

    /// Build a component with the tag's default arity.
    pub fn from_tag(tag: Tag) -> Self {
        Self::new(tag, tag.default_inputs(), tag.default_outputs())
    }

    pub fn with_policy(mut self, policy: WritePolicy) -> Self {
        self.write_policy = policy;
        self
    }

    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn write_policy(&self) -> WritePolicy {
        self.write_policy
    }

    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    pub fn inputs(&self) -> &[State] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[State] {
        &self.outputs
    }

    pub fn get_input(&self, index: usize) -> Result<State, NetlistError> {
        self.inputs
            .get(index)
            .copied()
            .ok_or(NetlistError::PortOutOfRange {
                direction: PortDirection::Input,
                index,
                arity: self.inputs.len(),
            })
    }

    pub fn get_output(&self, index: usize) -> Result<State, NetlistError> {
        self.outputs
            .get(index)
            .copied()
            .ok_or(NetlistError::PortOutOfRange {
                direction: PortDirection::Output,
                index,
                arity: self.outputs.len(),
            })
    }

    /// Overwrite input `index`. Out-of-range writes follow the write policy.
    pub fn set_input(&mut self, index: usize, value: State) -> Result<(), NetlistError> {
        let policy = self.write_policy;
        Self::write(&mut self.inputs, PortDirection::Input, policy, index, value)
    }

    /// Overwrite output `index`. Out-of-range writes follow the write policy.
    pub fn set_output(&mut self, index: usize, value: State) -> Result<(), NetlistError> {
        let policy = self.write_policy;
        Self::write(&mut self.outputs, PortDirection::Output, policy, index, value)
    }

    fn write(
        ports: &mut [State],
        direction: PortDirection,
        policy: WritePolicy,
        index: usize,
        value: State,
    ) -> Result<(), NetlistError> {
        let arity = ports.len();
        match ports.get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => match policy {
                WritePolicy::Tolerant => {
                    trace!(%direction, index, arity, "dropping out-of-range write");
                    Ok(())
                }
                WritePolicy::Strict => Err(NetlistError::PortOutOfRange {
                    direction,
                    index,
                    arity,
                }),
            },
        }
    }

    /// Upstream driver of input `index`, if one is connected.
    pub fn source(&self, index: usize) -> Option<PortRef> {
        self.source.get(index).copied().flatten()
    }

    /// Downstream receivers of output `index`, in connection order.
    ///
    /// Empty when the output drives nothing or `index` is out of range.
    pub fn targets(&self, index: usize) -> &[PortRef] {
        self.target.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of fan-out entries across all outputs.
    pub fn fan_out_len(&self) -> usize {
        self.target.iter().map(Vec::len).sum()
    }

    pub(crate) fn set_source(&mut self, index: usize, driver: PortRef) {
        self.source[index] = Some(driver);
    }

    /// Make room for one more entry on output `index` without linking anything.
    pub(crate) fn reserve_target(&mut self, index: usize) -> Result<(), TryReserveError> {
        self.target[index].try_reserve(1)
    }

    pub(crate) fn push_target(&mut self, index: usize, receiver: PortRef) {
        self.target[index].push(receiver);
    }

    /// Consume the component and free its port arrays and fan-out lists.
    ///
    /// Returns the number of fan-out entries that were released.
    pub fn release(self) -> usize {
        let links = self.fan_out_len();
        trace!(id = %self.id, tag = %self.tag, links, "releasing component");
        links
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.tag, self.id)?;

        write!(f, " in=[")?;
        for state in &self.inputs {
            write!(f, "{}", state.to_char())?;
        }
        write!(f, "] out=[")?;
        for state in &self.outputs {
            write!(f, "{}", state.to_char())?;
        }
        write!(f, "]")?;

        for (index, driver) in self.source.iter().enumerate() {
            if let Some(driver) = driver {
                write!(f, "\n  in{} <- {}", index, driver)?;
            }
        }
        for (index, receivers) in self.target.iter().enumerate() {
            for receiver in receivers {
                write!(f, "\n  out{} -> {}", index, receiver)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_creation() {
        let gate = Component::new(Tag::And, 3, 2);
        assert_eq!(gate.tag(), Tag::And);
        assert_eq!(gate.input_count(), 3);
        assert_eq!(gate.output_count(), 2);
        assert!(gate.inputs().iter().all(|s| *s == State::Undefined));
        assert!(gate.outputs().iter().all(|s| *s == State::Undefined));
        assert!((0..3).all(|i| gate.source(i).is_none()));
        assert!((0..2).all(|j| gate.targets(j).is_empty()));
        assert_eq!(gate.write_policy(), WritePolicy::Tolerant);
    }

    #[test]
    fn test_try_new_matches_new() {
        let gate = Component::try_new(Tag::Or, 4, 1).unwrap();
        assert_eq!(gate.input_count(), 4);
        assert_eq!(gate.output_count(), 1);
        assert_eq!(gate.fan_out_len(), 0);
    }

    #[test]
    fn test_from_tag_uses_default_arity() {
        let not = Component::from_tag(Tag::Not);
        assert_eq!((not.input_count(), not.output_count()), (1, 1));
        let or = Component::from_tag(Tag::Or);
        assert_eq!((or.input_count(), or.output_count()), (2, 1));
    }

    #[test]
    fn test_zero_arity_component() {
        let gate = Component::new(Tag::Not, 0, 0);
        assert!(gate.get_input(0).is_err());
        assert!(gate.get_output(0).is_err());
        assert!(gate.targets(0).is_empty());
    }

    #[test]
    fn test_input_roundtrip() {
        let mut gate = Component::from_tag(Tag::And);
        gate.set_input(1, State::High).unwrap();
        assert_eq!(gate.get_input(1).unwrap(), State::High);
        assert_eq!(gate.get_input(0).unwrap(), State::Undefined);

        gate.set_input(1, State::Undefined).unwrap();
        assert_eq!(gate.get_input(1).unwrap(), State::Undefined);
    }

    #[test]
    fn test_output_roundtrip() {
        let mut gate = Component::from_tag(Tag::Not);
        gate.set_output(0, State::Low).unwrap();
        assert_eq!(gate.get_output(0).unwrap(), State::Low);
    }

    #[test]
    fn test_out_of_range_read() {
        let gate = Component::from_tag(Tag::And);
        match gate.get_input(2) {
            Err(NetlistError::PortOutOfRange {
                direction,
                index,
                arity,
            }) => {
                assert_eq!(direction, PortDirection::Input);
                assert_eq!(index, 2);
                assert_eq!(arity, 2);
            }
            other => panic!("expected PortOutOfRange, got {:?}", other),
        }
        assert!(gate.get_output(1).is_err());
    }

    #[test]
    fn test_tolerant_write_is_dropped() {
        let mut gate = Component::from_tag(Tag::And);
        assert!(gate.set_input(5, State::High).is_ok());
        assert!(gate.set_output(1, State::High).is_ok());
        assert!(gate.inputs().iter().all(|s| *s == State::Undefined));
        assert!(gate.outputs().iter().all(|s| *s == State::Undefined));
    }

    #[test]
    fn test_strict_write_is_rejected() {
        let mut gate = Component::from_tag(Tag::Or).with_policy(WritePolicy::Strict);
        assert!(matches!(
            gate.set_input(2, State::High),
            Err(NetlistError::PortOutOfRange { .. })
        ));
        assert!(matches!(
            gate.set_output(1, State::Low),
            Err(NetlistError::PortOutOfRange { .. })
        ));
        gate.set_input(0, State::High).unwrap();
        assert_eq!(gate.get_input(0).unwrap(), State::High);
    }

    #[test]
    fn test_release_counts_fan_out() {
        let mut gate = Component::new(Tag::Or, 2, 2);
        let other = ComponentId::generate();
        gate.reserve_target(0).unwrap();
        gate.push_target(0, PortRef::new(other, 0));
        gate.reserve_target(1).unwrap();
        gate.push_target(1, PortRef::new(other, 1));
        assert_eq!(gate.release(), 2);
    }

    #[test]
    fn test_display_lists_links() {
        let mut gate = Component::from_tag(Tag::Not);
        let driver = PortRef::new(ComponentId::generate(), 0);
        gate.set_source(0, driver);
        gate.set_output(0, State::High).unwrap();

        let text = gate.to_string();
        assert!(text.starts_with("NOT "));
        assert!(text.contains("in=[X] out=[1]"));
        assert!(text.contains(&format!("in0 <- {}", driver)));
    }
}
