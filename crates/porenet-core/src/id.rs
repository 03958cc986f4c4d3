//! Strongly-typed identifiers for domain objects held by a session.
//!
//! Objects never own each other. Cross-object associations are stored
//! as these IDs and resolved through the owning session at query time.

use std::fmt;

macro_rules! object_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(v: u32) -> Self {
                Self(v)
            }
        }
    };
}

object_id!(
    /// Identifies a Network within a session.
    NetworkId
);

object_id!(
    /// Identifies a Phase (fluid or solid material) within a session.
    PhaseId
);

object_id!(
    /// Identifies a Physics object within a session.
    PhysicsId
);

object_id!(
    /// Identifies an Algorithm object within a session.
    AlgorithmId
);

/// The four classes of domain object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// Pore network topology owner.
    Network,
    /// Fluid or material holding per-element properties and physics labels.
    Phase,
    /// Set of property models governing a subset of a phase.
    Physics,
    /// Network-bound computation object.
    Algorithm,
}

impl ObjectKind {
    /// Class name used as the prefix of generated object names.
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Network => "GenericNetwork",
            Self::Phase => "GenericPhase",
            Self::Physics => "GenericPhysics",
            Self::Algorithm => "GenericAlgorithm",
        }
    }
}

/// A typed reference to any domain object in a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectRef {
    /// A network.
    Network(NetworkId),
    /// A phase.
    Phase(PhaseId),
    /// A physics object.
    Physics(PhysicsId),
    /// An algorithm.
    Algorithm(AlgorithmId),
}

impl ObjectRef {
    /// Class of the referenced object.
    pub fn kind(self) -> ObjectKind {
        match self {
            Self::Network(_) => ObjectKind::Network,
            Self::Phase(_) => ObjectKind::Phase,
            Self::Physics(_) => ObjectKind::Physics,
            Self::Algorithm(_) => ObjectKind::Algorithm,
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Network => "network",
            Self::Phase => "phase",
            Self::Physics => "physics",
            Self::Algorithm => "algorithm",
        };
        f.write_str(s)
    }
}
