//! Labeled per-element array store for Porenet domain objects.
//!
//! [`LabeledStore`] maps `"<kind>.<name>"` keys to fixed-length arrays,
//! tracking pore and throat counts independently. Boolean arrays double
//! as labels and drive the set-style element queries.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod health;
pub mod store;

pub use health::DataHealth;
pub use store::LabeledStore;
