//! Physics coverage check across a phase.

use indexmap::IndexMap;
use porenet_core::{mask_indices, ElementKind, PhysicsId};

use crate::object::{DomainObject, Network, Phase, Physics};

/// Elements of a phase governed by more than one physics object, or by none.
///
/// All lists hold phase-level indices in ascending order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HealthReport {
    /// Pores claimed by two or more physics objects.
    pub overlaps: Vec<usize>,
    /// Pores claimed by no physics object.
    pub undefined: Vec<usize>,
    /// Throats claimed by two or more physics objects.
    pub throat_overlaps: Vec<usize>,
    /// Throats claimed by no physics object.
    pub throat_undefined: Vec<usize>,
}

impl HealthReport {
    /// `true` when every element is governed by exactly one physics object.
    pub fn is_healthy(&self) -> bool {
        self.overlaps.is_empty()
            && self.undefined.is_empty()
            && self.throat_overlaps.is_empty()
            && self.throat_undefined.is_empty()
    }
}

/// Tally physics membership over `phase` for every physics on `network`.
///
/// Physics objects attached to another phase of the same network have
/// no label on `phase` and contribute nothing.
pub(crate) fn check(
    network: &Network,
    phase: &Phase,
    physics: &IndexMap<PhysicsId, Physics>,
) -> HealthReport {
    let tally = |kind: ElementKind| {
        let mut counts = vec![0u32; phase.store().count(kind)];
        for phys in network.physics_ids().iter().filter_map(|id| physics.get(id)) {
            if let Ok(mask) = phase.store().label_mask(kind, phys.name()) {
                for (c, &m) in counts.iter_mut().zip(mask) {
                    *c += u32::from(m);
                }
            }
        }
        let overlaps = mask_indices(&counts.iter().map(|&c| c > 1).collect::<Vec<_>>());
        let undefined = mask_indices(&counts.iter().map(|&c| c == 0).collect::<Vec<_>>());
        (overlaps, undefined)
    };

    let (overlaps, undefined) = tally(ElementKind::Pore);
    let (throat_overlaps, throat_undefined) = tally(ElementKind::Throat);
    HealthReport {
        overlaps,
        undefined,
        throat_overlaps,
        throat_undefined,
    }
}
