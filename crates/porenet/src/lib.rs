//! Porenet: the object model underneath a pore-network simulation toolkit.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Porenet sub-crates. For most users, adding `porenet` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use porenet::prelude::*;
//!
//! let mut session = Session::new(SessionConfig {
//!     seed: Some(42),
//!     ..Default::default()
//! })?;
//!
//! // Five pores, four throats; one phase over all of them.
//! let net = session.add_network(Some("net"), 5, 4)?;
//! let water = session.add_phase(net, Some("water"))?;
//!
//! // Two physics regions that share pore 2 and leave pore 4 uncovered.
//! let a = session.add_physics(net, water, &[0, 1, 2], &[0, 1], Some("a"))?;
//! session.add_physics(net, water, &[2, 3], &[2, 3], Some("b"))?;
//!
//! let health = session.physics_health(a)?;
//! assert_eq!(health.overlaps, vec![2]);
//! assert_eq!(health.undefined, vec![4]);
//!
//! // A model bound to region `a`, evaluated now and on every regenerate.
//! let double = model_fn("double", |ctx| {
//!     Ok(Array::Int(ctx.pores().iter().map(|&p| 2 * p as i64).collect()))
//! });
//! session.add_model(a, "pore.double", double, ModelOptions::new())?;
//! session.regenerate(a, "")?;
//! assert_eq!(
//!     session.physics(a)?.store().get("pore.double")?,
//!     &Array::Int(vec![0, 2, 4])
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `porenet-core` | IDs, property keys, arrays, label algebra, errors |
//! | [`store`] | `porenet-store` | The labeled element store |
//! | [`model`] | `porenet-model` | Model trait, parameters, bound models, registry |
//! | [`engine`] | `porenet-engine` | Session, domain objects, health checks |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, IDs, and errors (`porenet-core`).
///
/// Contains [`types::PropKey`], [`types::Array`], the label algebra
/// ([`types::LabelMode`], [`types::combine_masks`]), and the
/// [`types::StoreError`] / [`types::ModelError`] types.
pub use porenet_core as types;

/// The labeled element store (`porenet-store`).
///
/// [`store::LabeledStore`] is embedded in every domain object.
pub use porenet_store as store;

/// Property models (`porenet-model`).
///
/// The [`model::Model`] trait is the main extension point for
/// user-defined physics.
pub use porenet_model as model;

/// Session and domain objects (`porenet-engine`).
///
/// [`engine::Session`] owns every network, phase, physics and algorithm.
pub use porenet_engine as engine;

/// Common imports for typical Porenet usage.
///
/// ```rust
/// use porenet::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use porenet_core::{
        AlgorithmId, Array, DType, ElementKind, LabelMode, NetworkId, ObjectRef, PhaseId,
        PhysicsId, PropKey,
    };

    // Errors
    pub use porenet_core::{ModelError, StoreError};
    pub use porenet_engine::{ConfigError, SessionError};

    // Store
    pub use porenet_store::LabeledStore;

    // Models
    pub use porenet_model::{model_fn, Model, ModelContext, ParamValue, Params, Props};

    // Engine
    pub use porenet_engine::{
        DomainObject, HealthReport, ModelOptions, RegenerateReport, Session, SessionConfig,
        SubsetBinding,
    };
}
