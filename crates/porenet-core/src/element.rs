//! Element kinds and composite `"<kind>.<name>"` property keys.

use std::fmt;
use std::str::FromStr;

use crate::error::StoreError;

/// The two element kinds of a pore network.
///
/// Each kind is an independent namespace with its own element count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementKind {
    /// Network nodes.
    Pore,
    /// Connections between pores.
    Throat,
}

impl ElementKind {
    /// Both kinds, pores first.
    pub const ALL: [ElementKind; 2] = [ElementKind::Pore, ElementKind::Throat];

    /// Key prefix for this kind (`"pore"` or `"throat"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pore => "pore",
            Self::Throat => "throat",
        }
    }

    /// Dense index (`0` for pores, `1` for throats) for per-kind tables.
    pub fn index(self) -> usize {
        match self {
            Self::Pore => 0,
            Self::Throat => 1,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementKind {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pore" => Ok(Self::Pore),
            "throat" => Ok(Self::Throat),
            _ => Err(StoreError::InvalidKey { key: s.to_string() }),
        }
    }
}

/// A parsed store key: element kind plus property or label name.
///
/// The name is everything after the first `.`, so `"pore.diameter.avg"`
/// has name `"diameter.avg"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropKey {
    kind: ElementKind,
    name: String,
}

impl PropKey {
    /// Name of the reserved all-true label present for every kind.
    pub const ALL_LABEL: &'static str = "all";

    /// Build a key from its parts.
    pub fn new(kind: ElementKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    /// Parse a `"<kind>.<name>"` string.
    pub fn parse(key: &str) -> Result<Self, StoreError> {
        let invalid = || StoreError::InvalidKey {
            key: key.to_string(),
        };
        let (kind, name) = key.split_once('.').ok_or_else(invalid)?;
        if name.is_empty() {
            return Err(invalid());
        }
        let kind = kind.parse::<ElementKind>().map_err(|_| invalid())?;
        Ok(Self::new(kind, name))
    }

    /// The reserved `"<kind>.all"` key.
    pub fn all(kind: ElementKind) -> Self {
        Self::new(kind, Self::ALL_LABEL)
    }

    /// Element kind of this key.
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Property or label name without the kind prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this is the reserved `"<kind>.all"` key.
    pub fn is_all(&self) -> bool {
        self.name == Self::ALL_LABEL
    }
}

impl fmt::Display for PropKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.kind, self.name)
    }
}

impl FromStr for PropKey {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Conversion into a [`PropKey`], parsing string forms.
///
/// Lets store and session methods accept `"pore.x"`, `String`, or an
/// already-parsed key interchangeably.
pub trait IntoPropKey {
    /// Convert, failing with [`StoreError::InvalidKey`] on malformed strings.
    fn into_prop_key(self) -> Result<PropKey, StoreError>;
}

impl IntoPropKey for PropKey {
    fn into_prop_key(self) -> Result<PropKey, StoreError> {
        Ok(self)
    }
}

impl IntoPropKey for &PropKey {
    fn into_prop_key(self) -> Result<PropKey, StoreError> {
        Ok(self.clone())
    }
}

impl IntoPropKey for &str {
    fn into_prop_key(self) -> Result<PropKey, StoreError> {
        PropKey::parse(self)
    }
}

impl IntoPropKey for String {
    fn into_prop_key(self) -> Result<PropKey, StoreError> {
        PropKey::parse(&self)
    }
}

impl IntoPropKey for &String {
    fn into_prop_key(self) -> Result<PropKey, StoreError> {
        PropKey::parse(self)
    }
}
