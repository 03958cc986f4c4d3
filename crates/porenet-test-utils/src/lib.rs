//! Test utilities and mock models for Porenet development.
//!
//! Provides reusable [`Model`](porenet_model::Model) fixtures and a
//! [`WarnCounter`] subscriber for asserting on logged warnings.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod logging;

pub use fixtures::{ConstantModel, CountingModel, DoubleIndexModel, FailingModel, ScaleModel};
pub use logging::WarnCounter;
