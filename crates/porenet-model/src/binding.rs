//! Bound, re-invocable model computations.

use std::fmt;
use std::sync::Arc;

use porenet_core::{Array, ModelError, PropKey};

use crate::context::{ModelContext, ObjectView};
use crate::model::Model;
use crate::params::Params;

/// A model together with the parameters and element subsets captured
/// when it was registered.
///
/// Re-evaluating a `BoundModel` reads the *current* network and phase
/// stores but reuses the captured subsets unless the caller supplies
/// fresh ones via [`evaluate_with`](Self::evaluate_with).
#[derive(Clone)]
pub struct BoundModel {
    model: Arc<dyn Model>,
    params: Params,
    pores: Vec<usize>,
    throats: Vec<usize>,
}

impl fmt::Debug for BoundModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundModel")
            .field("model", &self.model.name())
            .field("params", &self.params)
            .field("pores", &self.pores)
            .field("throats", &self.throats)
            .finish()
    }
}

impl BoundModel {
    /// Bind `model` to `params` and the given subsets.
    pub fn new(model: Arc<dyn Model>, params: Params, pores: Vec<usize>, throats: Vec<usize>) -> Self {
        Self {
            model,
            params,
            pores,
            throats,
        }
    }

    /// Name of the wrapped model.
    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Bound parameters.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Captured pore subset.
    pub fn pores(&self) -> &[usize] {
        &self.pores
    }

    /// Captured throat subset.
    pub fn throats(&self) -> &[usize] {
        &self.throats
    }

    /// Replace the captured subsets.
    pub fn rebind(&mut self, pores: Vec<usize>, throats: Vec<usize>) {
        self.pores = pores;
        self.throats = throats;
    }

    /// Evaluate with the captured subsets.
    pub fn evaluate(
        &self,
        propname: &PropKey,
        network: ObjectView<'_>,
        phase: ObjectView<'_>,
    ) -> Result<Array, ModelError> {
        self.evaluate_with(propname, network, phase, &self.pores, &self.throats)
    }

    /// Evaluate with caller-supplied subsets, leaving the captured ones intact.
    pub fn evaluate_with(
        &self,
        propname: &PropKey,
        network: ObjectView<'_>,
        phase: ObjectView<'_>,
        pores: &[usize],
        throats: &[usize],
    ) -> Result<Array, ModelError> {
        tracing::trace!(model = self.model.name(), prop = %propname, "evaluating model");
        let ctx = ModelContext::new(propname, network, phase, pores, throats, &self.params);
        self.model.evaluate(&ctx)
    }
}

/// A registry slot.
///
/// `Deferred` keeps the recipe for later regeneration. `Frozen` records
/// that the property was produced once by the named model and is
/// never recomputed.
#[derive(Clone, Debug)]
pub enum ModelEntry {
    /// Re-invocable computation.
    Deferred(BoundModel),
    /// One-shot result; only the producing model's name is kept.
    Frozen {
        /// Name of the model that produced the stored value.
        model: String,
    },
}

impl ModelEntry {
    /// Whether this entry is re-evaluated by regeneration.
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }

    /// Name of the model behind this entry.
    pub fn model_name(&self) -> &str {
        match self {
            Self::Deferred(b) => b.model_name(),
            Self::Frozen { model } => model,
        }
    }
}
