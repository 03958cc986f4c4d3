//! Property model trait and re-invocable model registry for Porenet.
//!
//! A [`Model`] computes one property array from a [`ModelContext`]. At
//! registration the owning object captures the model together with its
//! parameters and element subsets into a [`BoundModel`]; the
//! [`ModelRegistry`] keeps those bound models in insertion order so they
//! can be re-evaluated later without restating their arguments.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod binding;
pub mod context;
pub mod model;
pub mod params;
pub mod registry;

pub use binding::{BoundModel, ModelEntry};
pub use context::{ModelContext, ObjectView};
pub use model::{model_fn, FnModel, Model};
pub use params::{ParamValue, Params};
pub use registry::{ModelRegistry, Props, Selection};
