use crate::component::Component;
use crate::config::AuthorityConfig;
use crate::error::NetlistError;
use crate::types::{ComponentId, PortDirection, PortRef, State, Tag};
use std::collections::HashMap;
use tracing::debug;

/// Totals reported by [`Authority::teardown`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TeardownReport {
    pub components: usize,
    pub links: usize,
}

/// Owns every component of a netlist and mediates wiring between them.
///
/// Callers only ever hold [`ComponentId`]s. A component lives exactly as long
/// as the authority that created it. Components are lent out read-only; port
/// state is written through [`Authority::set_input`] and
/// [`Authority::set_output`], so a registered component cannot be replaced or
/// swapped out from under its links:
///
/// ```compile_fail
/// use gate_netlist::{Authority, Component, Tag};
///
/// let mut authority = Authority::new();
/// let or = authority.create_default(Tag::Or).unwrap();
/// *authority.component(or).unwrap() = Component::from_tag(Tag::Or);
/// ```
#[derive(Debug, Default)]
pub struct Authority {
    config: AuthorityConfig,
    components: HashMap<ComponentId, Component>,
}

impl Authority {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an authority from `config`, reserving `initial_capacity` slots.
    ///
    /// Fails with `Allocation` when the reservation cannot be satisfied.
    pub fn with_config(config: AuthorityConfig) -> Result<Self, NetlistError> {
        let mut components = HashMap::new();
        components.try_reserve(config.initial_capacity)?;
        Ok(Authority { config, components })
    }

    pub fn config(&self) -> &AuthorityConfig {
        &self.config
    }

    /// Allocate and register a component, returning its identifier.
    pub fn create(
        &mut self,
        tag: Tag,
        inputs: usize,
        outputs: usize,
    ) -> Result<ComponentId, NetlistError> {
        let component = Component::try_new(tag, inputs, outputs)?
            .with_policy(self.config.write_policy);
        self.components.try_reserve(1)?;

        let id = component.id();
        let previous = self.components.insert(id, component);
        debug_assert!(previous.is_none(), "component id collision: {}", id);

        debug!(%id, %tag, inputs, outputs, "created component");
        Ok(id)
    }

    /// Create a component with the tag's default arity.
    pub fn create_default(&mut self, tag: Tag) -> Result<ComponentId, NetlistError> {
        self.create(tag, tag.default_inputs(), tag.default_outputs())
    }

    /// Wire output `source_port` of `source_id` to input `target_port` of `target_id`.
    ///
    /// All checks run before either link table is touched, so a failed call
    /// leaves both components exactly as they were.
    pub fn connect(
        &mut self,
        source_id: ComponentId,
        source_port: usize,
        target_id: ComponentId,
        target_port: usize,
    ) -> Result<(), NetlistError> {
        let result = self.try_connect(source_id, source_port, target_id, target_port);
        match &result {
            Ok(()) => debug!(
                source = %PortRef::new(source_id, source_port),
                target = %PortRef::new(target_id, target_port),
                "connected"
            ),
            Err(e) => debug!(error = %e, "connection rejected"),
        }
        result
    }

    fn try_connect(
        &mut self,
        source_id: ComponentId,
        source_port: usize,
        target_id: ComponentId,
        target_port: usize,
    ) -> Result<(), NetlistError> {
        let output = PortRef::new(source_id, source_port);
        let input = PortRef::new(target_id, target_port);

        self.validate(output, input)?;

        // Reserve before linking so an allocation failure cannot leave a
        // half-linked pair behind.
        self.components
            .get_mut(&source_id)
            .ok_or(NetlistError::NonexistentComponent(source_id))?
            .reserve_target(source_port)?;

        self.components
            .get_mut(&target_id)
            .ok_or(NetlistError::NonexistentComponent(target_id))?
            .set_source(target_port, output);
        self.components
            .get_mut(&source_id)
            .ok_or(NetlistError::NonexistentComponent(source_id))?
            .push_target(source_port, input);

        Ok(())
    }

    fn validate(&self, output: PortRef, input: PortRef) -> Result<(), NetlistError> {
        let source = self
            .components
            .get(&output.component)
            .ok_or(NetlistError::NonexistentComponent(output.component))?;
        let target = self
            .components
            .get(&input.component)
            .ok_or(NetlistError::NonexistentComponent(input.component))?;

        if input.port >= target.input_count() {
            return Err(NetlistError::InvalidConnectorIndex {
                component: input.component,
                direction: PortDirection::Input,
                index: input.port,
                arity: target.input_count(),
            });
        }
        if let Some(driver) = target.source(input.port) {
            if driver == output {
                return Err(NetlistError::AlreadyConnected { output, input });
            }
            return Err(NetlistError::ConnectorOccupied { input, driver });
        }
        if output.port >= source.output_count() {
            return Err(NetlistError::InvalidConnectorIndex {
                component: output.component,
                direction: PortDirection::Output,
                index: output.port,
                arity: source.output_count(),
            });
        }
        if source.targets(output.port).contains(&input) {
            return Err(NetlistError::AlreadyConnected { output, input });
        }

        Ok(())
    }

    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.components.get(&id)
    }

    /// Overwrite input `index` of `id`, following the component's write policy.
    pub fn set_input(
        &mut self,
        id: ComponentId,
        index: usize,
        value: State,
    ) -> Result<(), NetlistError> {
        self.components
            .get_mut(&id)
            .ok_or(NetlistError::NonexistentComponent(id))?
            .set_input(index, value)
    }

    /// Overwrite output `index` of `id`, following the component's write policy.
    pub fn set_output(
        &mut self,
        id: ComponentId,
        index: usize,
        value: State,
    ) -> Result<(), NetlistError> {
        self.components
            .get_mut(&id)
            .ok_or(NetlistError::NonexistentComponent(id))?
            .set_output(index, value)
    }

    pub fn contains(&self, id: ComponentId) -> bool {
        self.components.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Number of output-to-input links across the whole netlist.
    pub fn connection_count(&self) -> usize {
        self.components.values().map(Component::fan_out_len).sum()
    }

    /// Release every owned component, each exactly once.
    pub fn teardown(mut self) -> TeardownReport {
        let report = self
            .components
            .drain()
            .fold(TeardownReport::default(), |mut report, (_, component)| {
                report.components += 1;
                report.links += component.release();
                report
            });
        debug!(
            components = report.components,
            links = report.links,
            "authority torn down"
        );
        report
    }
}
