//! Domain objects: [`Network`], [`Phase`], [`Physics`], [`Algorithm`].
//!
//! Every object embeds a name, a `tracing` span acting as its logger
//! handle, and a [`LabeledStore`]. Associations are IDs resolved by the
//! owning [`Session`](crate::Session).

use porenet_core::{
    AlgorithmId, ElementKind, LabelMode, NetworkId, ObjectKind, PhaseId, PhysicsId, StoreError,
};
use porenet_model::{ModelRegistry, ObjectView};
use porenet_store::LabeledStore;
use tracing::Span;

/// Identity, logger handle, and data shared by every domain object.
#[derive(Debug)]
struct Core {
    name: String,
    span: Span,
    store: LabeledStore,
}

impl Core {
    fn new(kind: ObjectKind, name: String, num_pores: usize, num_throats: usize) -> Self {
        let span = match kind {
            ObjectKind::Network => tracing::debug_span!("network", name = %name),
            ObjectKind::Phase => tracing::debug_span!("phase", name = %name),
            ObjectKind::Physics => tracing::debug_span!("physics", name = %name),
            ObjectKind::Algorithm => tracing::debug_span!("algorithm", name = %name),
        };
        Self {
            name,
            span,
            store: LabeledStore::new(num_pores, num_throats),
        }
    }
}

/// Behaviour common to all domain objects.
pub trait DomainObject {
    /// Object class.
    const KIND: ObjectKind;

    /// Unique name within the session.
    fn name(&self) -> &str;

    /// Per-object logging span; events emitted inside it carry the name.
    fn span(&self) -> &Span;

    /// The object's own store.
    fn store(&self) -> &LabeledStore;

    /// Mutable access to the object's own store.
    fn store_mut(&mut self) -> &mut LabeledStore;

    /// Number of pores this object tracks.
    fn num_pores(&self) -> usize {
        self.store().num_pores()
    }

    /// Number of throats this object tracks.
    fn num_throats(&self) -> usize {
        self.store().num_throats()
    }

    /// Pore indices selected by `labels` under `mode` in this object's store.
    fn pores_labeled<S: AsRef<str>>(&self, labels: &[S], mode: LabelMode) -> Result<Vec<usize>, StoreError> {
        self.store().select(ElementKind::Pore, labels, mode)
    }

    /// Throat indices selected by `labels` under `mode` in this object's store.
    fn throats_labeled<S: AsRef<str>>(&self, labels: &[S], mode: LabelMode) -> Result<Vec<usize>, StoreError> {
        self.store().select(ElementKind::Throat, labels, mode)
    }

    /// Borrowed name/store view handed to models.
    fn view(&self) -> ObjectView<'_> {
        ObjectView::new(self.name(), self.store())
    }
}

macro_rules! impl_domain_object {
    ($ty:ty, $kind:expr) => {
        impl DomainObject for $ty {
            const KIND: ObjectKind = $kind;

            fn name(&self) -> &str {
                &self.core.name
            }

            fn span(&self) -> &Span {
                &self.core.span
            }

            fn store(&self) -> &LabeledStore {
                &self.core.store
            }

            fn store_mut(&mut self) -> &mut LabeledStore {
                &mut self.core.store
            }
        }
    };
}

/// Pore network: owns the element counts every phase inherits.
#[derive(Debug)]
pub struct Network {
    core: Core,
    phases: Vec<PhaseId>,
    physics: Vec<PhysicsId>,
    algorithms: Vec<AlgorithmId>,
}

impl Network {
    pub(crate) fn new(name: String, num_pores: usize, num_throats: usize) -> Self {
        Self {
            core: Core::new(Self::KIND, name, num_pores, num_throats),
            phases: Vec::new(),
            physics: Vec::new(),
            algorithms: Vec::new(),
        }
    }

    /// Phases attached to this network, in creation order.
    pub fn phase_ids(&self) -> &[PhaseId] {
        &self.phases
    }

    /// Physics objects attached to this network, in creation order.
    pub fn physics_ids(&self) -> &[PhysicsId] {
        &self.physics
    }

    /// Algorithms attached to this network, in creation order.
    pub fn algorithm_ids(&self) -> &[AlgorithmId] {
        &self.algorithms
    }

    pub(crate) fn attach_phase(&mut self, id: PhaseId) {
        self.phases.push(id);
    }

    pub(crate) fn attach_physics(&mut self, id: PhysicsId) {
        self.physics.push(id);
    }

    pub(crate) fn attach_algorithm(&mut self, id: AlgorithmId) {
        self.algorithms.push(id);
    }
}

impl_domain_object!(Network, ObjectKind::Network);

/// A fluid or material spanning every element of its network.
///
/// Holds one membership label pair (`pore.<physics>`, `throat.<physics>`)
/// per attached physics object.
#[derive(Debug)]
pub struct Phase {
    core: Core,
    network: NetworkId,
    physics: Vec<PhysicsId>,
}

impl Phase {
    pub(crate) fn new(name: String, network: NetworkId, num_pores: usize, num_throats: usize) -> Self {
        Self {
            core: Core::new(Self::KIND, name, num_pores, num_throats),
            network,
            physics: Vec::new(),
        }
    }

    /// The network this phase lives on.
    pub fn network(&self) -> NetworkId {
        self.network
    }

    /// Physics objects attached to this phase, in creation order.
    pub fn physics_ids(&self) -> &[PhysicsId] {
        &self.physics
    }

    pub(crate) fn attach_physics(&mut self, id: PhysicsId) {
        self.physics.push(id);
    }
}

impl_domain_object!(Phase, ObjectKind::Phase);

/// Property models governing a subset of one phase's elements.
///
/// The network and phase links are fixed at construction. The object's
/// own store is sized to its subsets, so `pore.all` has one entry per
/// governed pore.
#[derive(Debug)]
pub struct Physics {
    core: Core,
    network: NetworkId,
    phase: PhaseId,
    models: ModelRegistry,
}

impl Physics {
    pub(crate) fn new(
        name: String,
        network: NetworkId,
        phase: PhaseId,
        num_pores: usize,
        num_throats: usize,
    ) -> Self {
        Self {
            core: Core::new(Self::KIND, name, num_pores, num_throats),
            network,
            phase,
            models: ModelRegistry::new(),
        }
    }

    /// Linked network.
    pub fn network(&self) -> NetworkId {
        self.network
    }

    /// Linked phase.
    pub fn phase(&self) -> PhaseId {
        self.phase
    }

    /// Registered models in registration order.
    pub fn models(&self) -> &ModelRegistry {
        &self.models
    }

    pub(crate) fn models_mut(&mut self) -> &mut ModelRegistry {
        &mut self.models
    }
}

impl_domain_object!(Physics, ObjectKind::Physics);

/// A network-bound computation object with its own store.
///
/// Solvers are out of scope; algorithms share the domain-object
/// substrate so their results can be labeled and queried like any
/// other object's data.
#[derive(Debug)]
pub struct Algorithm {
    core: Core,
    network: NetworkId,
}

impl Algorithm {
    pub(crate) fn new(name: String, network: NetworkId, num_pores: usize, num_throats: usize) -> Self {
        Self {
            core: Core::new(Self::KIND, name, num_pores, num_throats),
            network,
        }
    }

    /// The network this algorithm operates on.
    pub fn network(&self) -> NetworkId {
        self.network
    }
}

impl_domain_object!(Algorithm, ObjectKind::Algorithm);
