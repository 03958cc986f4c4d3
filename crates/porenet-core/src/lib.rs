//! Core types and errors for the Porenet pore-network object model.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by every other Porenet crate: object IDs,
//! element kinds and property keys, the [`Array`] value type, label
//! mask algebra, and the store/model error enums.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod array;
pub mod element;
pub mod error;
pub mod id;
pub mod labels;

pub use array::{Array, DType};
pub use element::{ElementKind, IntoPropKey, PropKey};
pub use error::{ModelError, StoreError};
pub use id::{AlgorithmId, NetworkId, ObjectKind, ObjectRef, PhaseId, PhysicsId};
pub use labels::{combine_masks, mask_indices, LabelMode};
