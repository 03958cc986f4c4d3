//! The [`Session`] arena and every cross-object operation.
//!
//! Objects live in per-kind arenas keyed by IDs allocated from one
//! counter. Physics objects hold the IDs of their network and phase;
//! networks and phases hold the IDs of their physics. The session is
//! also the naming registry: names are unique across all kinds because
//! physics names become phase label keys.

use std::sync::Arc;

use indexmap::IndexMap;
use porenet_core::{
    mask_indices, AlgorithmId, Array, ElementKind, IntoPropKey, NetworkId, ObjectKind, ObjectRef,
    PhaseId, PhysicsId, PropKey, StoreError,
};
use porenet_model::{BoundModel, Model, ModelEntry, ParamValue, Params, Props};

use crate::config::{SessionConfig, SubsetBinding};
use crate::error::SessionError;
use crate::health::{self, HealthReport};
use crate::naming::NameGenerator;
use crate::object::{Algorithm, DomainObject, Network, Phase, Physics};

/// Draws tried after a collision before giving up on a generated name.
const MAX_NAME_ATTEMPTS: usize = 4096;

// ── Option and report types ────────────────────────────────────────

/// Options for [`Session::add_model`].
///
/// By default the model is *dynamic*: it is evaluated immediately and
/// kept for regeneration. [`frozen`](Self::frozen) sets the `static`
/// flag: evaluate once, store the result, keep no recipe.
#[derive(Clone, Debug, Default)]
pub struct ModelOptions {
    frozen: bool,
    params: Params,
}

impl ModelOptions {
    /// Dynamic model with no parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the model static: one-shot evaluation, never regenerated.
    pub fn frozen(mut self) -> Self {
        self.frozen = true;
        self
    }

    /// Bind one extra parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(name, value);
        self
    }

    /// Replace all extra parameters.
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// Whether the static flag is set.
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Extra parameters to bind.
    pub fn params(&self) -> &Params {
        &self.params
    }
}

/// One row of [`Session::models`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelInfo {
    /// Target property.
    pub key: PropKey,
    /// Name of the model that computes it.
    pub model: String,
    /// Whether regeneration re-evaluates it.
    pub dynamic: bool,
}

/// Outcome of [`Session::regenerate`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegenerateReport {
    /// Properties recomputed, in evaluation order.
    pub regenerated: Vec<PropKey>,
    /// Requested names that were not dynamic models; one warning was
    /// logged for each.
    pub skipped: Vec<String>,
}

// ── Session ────────────────────────────────────────────────────────

/// Owner of all domain objects and their associations.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    names: NameGenerator,
    registry: IndexMap<String, ObjectRef>,
    networks: IndexMap<NetworkId, Network>,
    phases: IndexMap<PhaseId, Phase>,
    physics: IndexMap<PhysicsId, Physics>,
    algorithms: IndexMap<AlgorithmId, Algorithm>,
    next_id: u32,
}

impl Session {
    /// Create an empty session after validating `config`.
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        Ok(Self {
            names: NameGenerator::new(seed, config.name_suffix_len),
            config,
            registry: IndexMap::new(),
            networks: IndexMap::new(),
            phases: IndexMap::new(),
            physics: IndexMap::new(),
            algorithms: IndexMap::new(),
            next_id: 0,
        })
    }

    /// The configuration this session was built with.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Find any object by name.
    pub fn lookup(&self, name: &str) -> Option<ObjectRef> {
        self.registry.get(name).copied()
    }

    fn alloc_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn resolve_name(&mut self, name: Option<&str>, kind: ObjectKind) -> Result<String, SessionError> {
        match name {
            Some(name) => {
                if name.is_empty() {
                    return Err(SessionError::InvalidName {
                        name: name.to_string(),
                        reason: "names must be non-empty",
                    });
                }
                if name == PropKey::ALL_LABEL {
                    return Err(SessionError::InvalidName {
                        name: name.to_string(),
                        reason: "'all' is a reserved label",
                    });
                }
                if self.registry.contains_key(name) {
                    return Err(SessionError::DuplicateName {
                        name: name.to_string(),
                    });
                }
                Ok(name.to_string())
            }
            None => {
                let candidate = self.names.generate(kind);
                if !self.registry.contains_key(&candidate) {
                    return Ok(candidate);
                }
                if let Some(capacity) = self.names.capacity() {
                    let taken = self
                        .registry
                        .keys()
                        .filter(|name| self.names.could_generate(kind, name))
                        .count();
                    if taken >= capacity {
                        return Err(SessionError::NameSpaceExhausted { kind });
                    }
                }
                for _ in 0..MAX_NAME_ATTEMPTS {
                    let candidate = self.names.generate(kind);
                    if !self.registry.contains_key(&candidate) {
                        return Ok(candidate);
                    }
                }
                Err(SessionError::NameSpaceExhausted { kind })
            }
        }
    }

    // ── Construction ───────────────────────────────────────────────

    /// Register a network with the given element counts.
    pub fn add_network(
        &mut self,
        name: Option<&str>,
        num_pores: usize,
        num_throats: usize,
    ) -> Result<NetworkId, SessionError> {
        let name = self.resolve_name(name, ObjectKind::Network)?;
        let id = NetworkId(self.alloc_id());
        let network = Network::new(name.clone(), num_pores, num_throats);
        network.span().in_scope(|| {
            tracing::debug!(num_pores, num_throats, "construct network");
        });
        self.networks.insert(id, network);
        self.registry.insert(name, ObjectRef::Network(id));
        Ok(id)
    }

    /// Register a phase spanning every element of `network`.
    pub fn add_phase(&mut self, network: NetworkId, name: Option<&str>) -> Result<PhaseId, SessionError> {
        let (np, nt) = {
            let net = self.network(network)?;
            (net.num_pores(), net.num_throats())
        };
        let name = self.resolve_name(name, ObjectKind::Phase)?;
        let id = PhaseId(self.alloc_id());
        let phase = Phase::new(name.clone(), network, np, nt);
        phase.span().in_scope(|| {
            tracing::debug!(network = %network, "construct phase");
        });
        self.phases.insert(id, phase);
        self.network_mut(network)?.attach_phase(id);
        self.registry.insert(name, ObjectRef::Phase(id));
        Ok(id)
    }

    /// Register a physics object governing `pores`/`throats` of `phase`.
    ///
    /// Subsets are phase-level indices; duplicates are dropped. Writes
    /// the membership labels `pore.<name>` and `throat.<name>` into the
    /// phase and attaches the new object to both network and phase.
    /// Nothing is mutated if validation fails.
    pub fn add_physics(
        &mut self,
        network: NetworkId,
        phase: PhaseId,
        pores: &[usize],
        throats: &[usize],
        name: Option<&str>,
    ) -> Result<PhysicsId, SessionError> {
        let pores = sorted_unique(pores);
        let throats = sorted_unique(throats);
        {
            self.network(network)?;
            let ph = self.phase(phase)?;
            if ph.network() != network {
                return Err(SessionError::Association {
                    physics: name.unwrap_or("<unnamed>").to_string(),
                    reason: format!(
                        "phase '{}' belongs to network {}, not {network}",
                        ph.name(),
                        ph.network()
                    ),
                });
            }
            check_subset(ph, ElementKind::Pore, &pores)?;
            check_subset(ph, ElementKind::Throat, &throats)?;
        }

        let name = self.resolve_name(name, ObjectKind::Physics)?;
        let labels = ElementKind::ALL.map(|kind| PropKey::new(kind, name.as_str()));
        if labels.iter().any(|key| self.phases[&phase].store().contains(key)) {
            return Err(SessionError::DuplicateName { name });
        }

        let id = PhysicsId(self.alloc_id());
        let physics = Physics::new(name.clone(), network, phase, pores.len(), throats.len());
        let span = physics.span().clone();
        let _enter = span.enter();
        tracing::debug!(
            phase = %phase,
            pores = pores.len(),
            throats = throats.len(),
            "construct physics"
        );

        let [pore_label, throat_label] = labels;
        let ph = self.phase_mut(phase)?;
        ph.store_mut().set_label(pore_label, &pores)?;
        ph.store_mut().set_label(throat_label, &throats)?;
        ph.attach_physics(id);
        self.network_mut(network)?.attach_physics(id);
        self.physics.insert(id, physics);
        self.registry.insert(name, ObjectRef::Physics(id));
        Ok(id)
    }

    /// Register an algorithm on `network`.
    pub fn add_algorithm(&mut self, network: NetworkId, name: Option<&str>) -> Result<AlgorithmId, SessionError> {
        let (np, nt) = {
            let net = self.network(network)?;
            (net.num_pores(), net.num_throats())
        };
        let name = self.resolve_name(name, ObjectKind::Algorithm)?;
        let id = AlgorithmId(self.alloc_id());
        let algorithm = Algorithm::new(name.clone(), network, np, nt);
        algorithm.span().in_scope(|| {
            tracing::debug!(network = %network, "construct algorithm");
        });
        self.algorithms.insert(id, algorithm);
        self.network_mut(network)?.attach_algorithm(id);
        self.registry.insert(name, ObjectRef::Algorithm(id));
        Ok(id)
    }

    // ── Accessors ──────────────────────────────────────────────────

    /// Borrow a network.
    pub fn network(&self, id: NetworkId) -> Result<&Network, SessionError> {
        self.networks.get(&id).ok_or(SessionError::UnknownObject {
            kind: ObjectKind::Network,
            id: id.0,
        })
    }

    /// Mutably borrow a network.
    pub fn network_mut(&mut self, id: NetworkId) -> Result<&mut Network, SessionError> {
        self.networks.get_mut(&id).ok_or(SessionError::UnknownObject {
            kind: ObjectKind::Network,
            id: id.0,
        })
    }

    /// Borrow a phase.
    pub fn phase(&self, id: PhaseId) -> Result<&Phase, SessionError> {
        self.phases.get(&id).ok_or(SessionError::UnknownObject {
            kind: ObjectKind::Phase,
            id: id.0,
        })
    }

    /// Mutably borrow a phase, e.g. to edit physics membership labels.
    pub fn phase_mut(&mut self, id: PhaseId) -> Result<&mut Phase, SessionError> {
        self.phases.get_mut(&id).ok_or(SessionError::UnknownObject {
            kind: ObjectKind::Phase,
            id: id.0,
        })
    }

    /// Borrow a physics object.
    pub fn physics(&self, id: PhysicsId) -> Result<&Physics, SessionError> {
        self.physics.get(&id).ok_or(SessionError::UnknownObject {
            kind: ObjectKind::Physics,
            id: id.0,
        })
    }

    /// Mutably borrow a physics object.
    ///
    /// Only its store is writable from outside; links and the model
    /// registry change through session operations. Editing property
    /// values is fine, but resizing the store with
    /// [`LabeledStore::reset`](porenet_store::LabeledStore::reset)
    /// leaves bound models producing the old lengths. Use
    /// [`set_locations`](Self::set_locations) to move a physics object.
    pub fn physics_mut(&mut self, id: PhysicsId) -> Result<&mut Physics, SessionError> {
        self.physics.get_mut(&id).ok_or(SessionError::UnknownObject {
            kind: ObjectKind::Physics,
            id: id.0,
        })
    }

    /// Borrow an algorithm.
    pub fn algorithm(&self, id: AlgorithmId) -> Result<&Algorithm, SessionError> {
        self.algorithms.get(&id).ok_or(SessionError::UnknownObject {
            kind: ObjectKind::Algorithm,
            id: id.0,
        })
    }

    /// Mutably borrow an algorithm.
    pub fn algorithm_mut(&mut self, id: AlgorithmId) -> Result<&mut Algorithm, SessionError> {
        self.algorithms.get_mut(&id).ok_or(SessionError::UnknownObject {
            kind: ObjectKind::Algorithm,
            id: id.0,
        })
    }

    /// Names of the physics objects attached to a network, in creation order.
    pub fn network_physics(&self, id: NetworkId) -> Result<Vec<&str>, SessionError> {
        let net = self.network(id)?;
        Ok(self.physics_names(net.physics_ids()))
    }

    /// Names of the physics objects attached to a phase, in creation order.
    pub fn phase_physics(&self, id: PhaseId) -> Result<Vec<&str>, SessionError> {
        let phase = self.phase(id)?;
        Ok(self.physics_names(phase.physics_ids()))
    }

    fn physics_names(&self, ids: &[PhysicsId]) -> Vec<&str> {
        ids.iter()
            .filter_map(|id| self.physics.get(id))
            .map(|p| p.name())
            .collect()
    }

    /// Resolve a physics object's network and phase links.
    fn links(&self, physics: &Physics) -> Result<(&Network, &Phase), SessionError> {
        let association = |reason: String| SessionError::Association {
            physics: physics.name().to_string(),
            reason,
        };
        let network = self
            .networks
            .get(&physics.network())
            .ok_or_else(|| association(format!("network {} is not registered", physics.network())))?;
        let phase = self
            .phases
            .get(&physics.phase())
            .ok_or_else(|| association(format!("phase {} is not registered", physics.phase())))?;
        Ok((network, phase))
    }

    // ── Physics queries ────────────────────────────────────────────

    fn physics_members(&self, id: PhysicsId, kind: ElementKind) -> Result<Vec<usize>, SessionError> {
        let phys = self.physics(id)?;
        let (_, phase) = self.links(phys)?;
        let mask = phase.store().label_mask(kind, phys.name())?;
        Ok(mask_indices(mask))
    }

    /// Phase-level pore indices currently labeled with this physics.
    ///
    /// Reads the phase label on every call, so external edits to the
    /// label are reflected immediately.
    pub fn physics_pores(&self, id: PhysicsId) -> Result<Vec<usize>, SessionError> {
        self.physics_members(id, ElementKind::Pore)
    }

    /// Phase-level throat indices currently labeled with this physics.
    pub fn physics_throats(&self, id: PhysicsId) -> Result<Vec<usize>, SessionError> {
        self.physics_members(id, ElementKind::Throat)
    }

    /// Names of the phases this physics applies to (always exactly one).
    pub fn fluids(&self, id: PhysicsId) -> Result<Vec<String>, SessionError> {
        let phys = self.physics(id)?;
        let (_, phase) = self.links(phys)?;
        Ok(vec![phase.name().to_string()])
    }

    /// Registered models of a physics object, in registry order.
    pub fn models(&self, id: PhysicsId) -> Result<Vec<ModelInfo>, SessionError> {
        Ok(self
            .physics(id)?
            .models()
            .iter()
            .map(|(key, entry)| ModelInfo {
                key: key.clone(),
                model: entry.model_name().to_string(),
                dynamic: entry.is_dynamic(),
            })
            .collect())
    }

    /// Pores and throats of this physics's phase claimed by several
    /// physics objects or by none.
    ///
    /// Considers every physics attached to the physics's network. Pure
    /// query: overlaps and gaps are legal states, only reported here.
    pub fn physics_health(&self, id: PhysicsId) -> Result<HealthReport, SessionError> {
        let phys = self.physics(id)?;
        let (network, phase) = self.links(phys)?;
        Ok(health::check(network, phase, &self.physics))
    }

    /// The same coverage report addressed by phase.
    pub fn phase_health(&self, id: PhaseId) -> Result<HealthReport, SessionError> {
        let phase = self.phase(id)?;
        let network = self.network(phase.network())?;
        Ok(health::check(network, phase, &self.physics))
    }

    // ── Model registry ─────────────────────────────────────────────

    /// Bind `model` to this physics and compute `propname` immediately.
    ///
    /// The model sees the linked network and phase, the physics's
    /// current pore and throat subsets, and `options.params()`. The
    /// result is stored in the physics's own store. Unless the options
    /// are [`frozen`](ModelOptions::frozen), the bound model is kept
    /// for [`regenerate`](Self::regenerate); re-adding a property keeps
    /// its original position in the regeneration order.
    pub fn add_model<M: Model>(
        &mut self,
        id: PhysicsId,
        propname: impl IntoPropKey,
        model: M,
        options: ModelOptions,
    ) -> Result<(), SessionError> {
        let key = propname.into_prop_key()?;
        let pores = self.physics_pores(id)?;
        let throats = self.physics_throats(id)?;
        let ModelOptions { frozen, params } = options;
        let bound = BoundModel::new(Arc::new(model), params, pores, throats);

        let phys = self.physics(id)?;
        let span = phys.span().clone();
        let _enter = span.enter();
        tracing::debug!(prop = %key, model = bound.model_name(), frozen, "add model");
        let value = self.evaluate(phys, &key, &bound, None)?;

        let phys = self.physics_mut(id)?;
        phys.store_mut().set(&key, value)?;
        let entry = if frozen {
            ModelEntry::Frozen {
                model: bound.model_name().to_string(),
            }
        } else {
            ModelEntry::Deferred(bound)
        };
        phys.models_mut().insert(key, entry);
        Ok(())
    }

    /// Re-evaluate registered dynamic models and overwrite their results.
    ///
    /// `""` (or [`Props::All`]) runs every dynamic model in registry
    /// order; a name or list of names runs only those. Names that are
    /// unknown or static are skipped with one warning each. A failing
    /// model aborts the call; properties regenerated before it keep
    /// their new values.
    pub fn regenerate(
        &mut self,
        id: PhysicsId,
        props: impl Into<Props>,
    ) -> Result<RegenerateReport, SessionError> {
        let props = props.into();
        let phys = self.physics(id)?;
        let selection = phys.models().select(&props);
        let span = phys.span().clone();
        let _enter = span.enter();

        let live = match self.config.subset_binding {
            SubsetBinding::Captured => None,
            SubsetBinding::Live => Some((self.physics_pores(id)?, self.physics_throats(id)?)),
        };

        for name in &selection.skipped {
            tracing::warn!(prop = %name, "requested property is not a dynamic model");
        }

        for key in &selection.run {
            let phys = self.physics(id)?;
            let bound = phys
                .models()
                .deferred(key)
                .ok_or_else(|| StoreError::UnknownProperty {
                    key: key.to_string(),
                })?;
            let subsets = live.as_ref().map(|(p, t)| (p.as_slice(), t.as_slice()));
            let value = self.evaluate(phys, key, bound, subsets)?;
            self.physics_mut(id)?.store_mut().set(key, value)?;
        }

        Ok(RegenerateReport {
            regenerated: selection.run,
            skipped: selection.skipped,
        })
    }

    fn evaluate(
        &self,
        phys: &Physics,
        key: &PropKey,
        bound: &BoundModel,
        subsets: Option<(&[usize], &[usize])>,
    ) -> Result<Array, SessionError> {
        let (network, phase) = self.links(phys)?;
        let result = match subsets {
            Some((pores, throats)) => {
                bound.evaluate_with(key, network.view(), phase.view(), pores, throats)
            }
            None => bound.evaluate(key, network.view(), phase.view()),
        };
        result.map_err(|reason| SessionError::ModelFailed {
            propname: key.to_string(),
            model: bound.model_name().to_string(),
            reason,
        })
    }

    /// Move a physics object to new pore and throat subsets.
    ///
    /// Rewrites its membership labels on the phase, resizes its own
    /// store (dropping all stored properties and static entries),
    /// rebinds every dynamic model to the new subsets, and regenerates
    /// them. Nothing is mutated if the subsets are out of bounds.
    pub fn set_locations(
        &mut self,
        id: PhysicsId,
        pores: &[usize],
        throats: &[usize],
    ) -> Result<RegenerateReport, SessionError> {
        let pores = sorted_unique(pores);
        let throats = sorted_unique(throats);
        let phys = self.physics(id)?;
        let (_, phase) = self.links(phys)?;
        check_subset(phase, ElementKind::Pore, &pores)?;
        check_subset(phase, ElementKind::Throat, &throats)?;
        let phase_id = phys.phase();
        let labels = ElementKind::ALL.map(|kind| PropKey::new(kind, phys.name()));
        let span = phys.span().clone();
        let _enter = span.enter();
        tracing::debug!(pores = pores.len(), throats = throats.len(), "set locations");

        let [pore_label, throat_label] = labels;
        let phase = self.phase_mut(phase_id)?;
        phase.store_mut().set_label(pore_label, &pores)?;
        phase.store_mut().set_label(throat_label, &throats)?;

        let phys = self.physics_mut(id)?;
        phys.store_mut().reset(pores.len(), throats.len());
        let frozen: Vec<PropKey> = phys
            .models()
            .iter()
            .filter(|(_, entry)| !entry.is_dynamic())
            .map(|(key, _)| key.clone())
            .collect();
        for key in &frozen {
            phys.models_mut().remove(key);
        }
        phys.models_mut().rebind_all(&pores, &throats);

        self.regenerate(id, Props::All)
    }
}

fn sorted_unique(indices: &[usize]) -> Vec<usize> {
    let mut v = indices.to_vec();
    v.sort_unstable();
    v.dedup();
    v
}

fn check_subset(phase: &Phase, kind: ElementKind, subset: &[usize]) -> Result<(), SessionError> {
    phase
        .store()
        .check_indices(kind, subset)
        .map_err(|e| match e {
            StoreError::IndexOutOfBounds { kind, index, count } => {
                SessionError::InvalidSubset { kind, index, count }
            }
            other => other.into(),
        })
}
