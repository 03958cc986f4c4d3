//! Session arena, domain objects, and physics model engine for Porenet.
//!
//! A [`Session`] owns every [`Network`], [`Phase`], [`Physics`] and
//! [`Algorithm`] in separate arenas keyed by generated IDs. Objects
//! refer to each other only through those IDs; the session resolves
//! them on each query, so no object owns another's lifetime.
//!
//! # Concurrency
//!
//! All operations are synchronous and take `&self` or `&mut self` on
//! the session. Exclusive borrows are the single-writer discipline for
//! store mutation and association-list updates; a session shared
//! across threads must be wrapped in a lock by the caller.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod health;
pub mod naming;
pub mod object;
pub mod session;

pub use config::{ConfigError, SessionConfig, SubsetBinding};
pub use error::SessionError;
pub use health::HealthReport;
pub use object::{Algorithm, DomainObject, Network, Phase, Physics};
pub use session::{ModelInfo, ModelOptions, RegenerateReport, Session};
