//! The evaluation context handed to [`Model::evaluate`](crate::Model::evaluate).

use porenet_core::{Array, ElementKind, ModelError, PropKey};
use porenet_store::LabeledStore;

use crate::params::Params;

/// Read-only view of a domain object: its name and its store.
#[derive(Clone, Copy, Debug)]
pub struct ObjectView<'a> {
    name: &'a str,
    store: &'a LabeledStore,
}

impl<'a> ObjectView<'a> {
    /// View `store` under object name `name`.
    pub fn new(name: &'a str, store: &'a LabeledStore) -> Self {
        Self { name, store }
    }

    /// Object name.
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Object store.
    pub fn store(&self) -> &'a LabeledStore {
        self.store
    }
}

/// Everything a model may read while computing a property.
///
/// `pores` and `throats` are phase-level element indices; which of the
/// two the output must cover is given by the target property's kind
/// (see [`elements`](Self::elements)).
#[derive(Clone, Copy, Debug)]
pub struct ModelContext<'a> {
    propname: &'a PropKey,
    network: ObjectView<'a>,
    phase: ObjectView<'a>,
    pores: &'a [usize],
    throats: &'a [usize],
    params: &'a Params,
}

impl<'a> ModelContext<'a> {
    /// Assemble a context.
    pub fn new(
        propname: &'a PropKey,
        network: ObjectView<'a>,
        phase: ObjectView<'a>,
        pores: &'a [usize],
        throats: &'a [usize],
        params: &'a Params,
    ) -> Self {
        Self {
            propname,
            network,
            phase,
            pores,
            throats,
            params,
        }
    }

    /// Property being computed.
    pub fn propname(&self) -> &'a PropKey {
        self.propname
    }

    /// The network the owning object is attached to.
    pub fn network(&self) -> ObjectView<'a> {
        self.network
    }

    /// The phase the owning object is attached to.
    pub fn phase(&self) -> ObjectView<'a> {
        self.phase
    }

    /// Pore subset bound to this evaluation.
    pub fn pores(&self) -> &'a [usize] {
        self.pores
    }

    /// Throat subset bound to this evaluation.
    pub fn throats(&self) -> &'a [usize] {
        self.throats
    }

    /// Bound parameters.
    pub fn params(&self) -> &'a Params {
        self.params
    }

    /// The subset matching the target property's element kind.
    pub fn elements(&self) -> &'a [usize] {
        match self.propname.kind() {
            ElementKind::Pore => self.pores,
            ElementKind::Throat => self.throats,
        }
    }

    /// Read `key` from the phase and restrict it to [`elements`](Self::elements).
    ///
    /// The key's kind must match the target property's kind.
    pub fn phase_values(&self, key: &str) -> Result<Array, ModelError> {
        let parsed = PropKey::parse(key)?;
        if parsed.kind() != self.propname.kind() {
            return Err(ModelError::ExecutionFailed {
                reason: format!(
                    "'{key}' cannot feed '{}': element kinds differ",
                    self.propname
                ),
            });
        }
        let array = self.phase.store().get(&parsed)?;
        array
            .take(self.elements())
            .ok_or_else(|| ModelError::ExecutionFailed {
                reason: format!("bound subset exceeds '{key}' on phase '{}'", self.phase.name()),
            })
    }
}
