//! Ordered per-object model registry and the regeneration selector.

use indexmap::IndexMap;
use porenet_core::PropKey;
use smallvec::SmallVec;

use crate::binding::{BoundModel, ModelEntry};

/// Which registered properties a regeneration should touch.
///
/// Converts from the forms callers naturally have: `""` means every
/// dynamic model, any other string names a single property, and
/// slices/vectors name several.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Props {
    /// Every dynamic model, in registry order.
    #[default]
    All,
    /// The named properties, in the given order.
    Names(SmallVec<[String; 4]>),
}

impl From<&str> for Props {
    fn from(name: &str) -> Self {
        if name.is_empty() {
            Self::All
        } else {
            Self::Names(SmallVec::from_iter([name.to_string()]))
        }
    }
}

impl From<String> for Props {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl From<&[&str]> for Props {
    fn from(names: &[&str]) -> Self {
        Self::Names(names.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Props {
    fn from(names: [&str; N]) -> Self {
        Self::Names(names.iter().map(|s| s.to_string()).collect())
    }
}

impl From<Vec<String>> for Props {
    fn from(names: Vec<String>) -> Self {
        Self::Names(names.into_iter().collect())
    }
}

/// The outcome of resolving a [`Props`] selector against a registry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    /// Dynamic properties to re-evaluate, in order.
    pub run: Vec<PropKey>,
    /// Requested names that are unknown, malformed, or static.
    pub skipped: Vec<String>,
}

/// Ordered mapping from property key to [`ModelEntry`].
///
/// Re-registering an existing key replaces its entry but keeps its
/// original position, so regeneration order is first-registration order.
#[derive(Clone, Debug, Default)]
pub struct ModelRegistry {
    entries: IndexMap<PropKey, ModelEntry>,
}

impl ModelRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the entry for `key`, returning the previous one.
    pub fn insert(&mut self, key: PropKey, entry: ModelEntry) -> Option<ModelEntry> {
        self.entries.insert(key, entry)
    }

    /// Look up an entry.
    pub fn get(&self, key: &PropKey) -> Option<&ModelEntry> {
        self.entries.get(key)
    }

    /// The bound model for `key`, if it is dynamic.
    pub fn deferred(&self, key: &PropKey) -> Option<&BoundModel> {
        match self.entries.get(key) {
            Some(ModelEntry::Deferred(b)) => Some(b),
            _ => None,
        }
    }

    /// Remove an entry, preserving the order of the rest.
    pub fn remove(&mut self, key: &PropKey) -> Option<ModelEntry> {
        self.entries.shift_remove(key)
    }

    /// Whether `key` has an entry.
    pub fn contains(&self, key: &PropKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries, dynamic and static.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (&PropKey, &ModelEntry)> {
        self.entries.iter()
    }

    /// Keys of dynamic entries in registry order.
    pub fn dynamic_keys(&self) -> Vec<PropKey> {
        self.entries
            .iter()
            .filter(|(_, e)| e.is_dynamic())
            .map(|(k, _)| k.clone())
            .collect()
    }

    /// Replace the captured subsets of every dynamic entry.
    pub fn rebind_all(&mut self, pores: &[usize], throats: &[usize]) {
        for entry in self.entries.values_mut() {
            if let ModelEntry::Deferred(bound) = entry {
                bound.rebind(pores.to_vec(), throats.to_vec());
            }
        }
    }

    /// Resolve a selector into the keys to run and the names to skip.
    ///
    /// Never fails: anything that is not a dynamic entry lands in
    /// [`Selection::skipped`].
    pub fn select(&self, props: &Props) -> Selection {
        match props {
            Props::All => Selection {
                run: self.dynamic_keys(),
                skipped: Vec::new(),
            },
            Props::Names(names) => {
                let mut selection = Selection::default();
                for name in names {
                    match PropKey::parse(name) {
                        Ok(key) if self.deferred(&key).is_some() => selection.run.push(key),
                        _ => selection.skipped.push(name.clone()),
                    }
                }
                selection
            }
        }
    }
}
