//! The [`LabeledStore`] container.

use indexmap::IndexMap;
use porenet_core::{
    combine_masks, mask_indices, Array, ElementKind, IntoPropKey, LabelMode, PropKey, StoreError,
};

use crate::health::DataHealth;

/// Mapping from `"<kind>.<name>"` keys to per-element arrays.
///
/// # Invariants
///
/// - Every array under a kind has exactly [`count(kind)`](Self::count)
///   elements. [`set`](Self::set) rejects anything else with
///   [`StoreError::ShapeMismatch`].
/// - `"pore.all"` and `"throat.all"` always exist and are all-true.
///   They cannot be overwritten or removed; only [`reset`](Self::reset)
///   changes the element counts and rebuilds them.
/// - Keys iterate in insertion order.
#[derive(Clone, Debug)]
pub struct LabeledStore {
    counts: [usize; 2],
    data: IndexMap<PropKey, Array>,
}

impl LabeledStore {
    /// Create a store tracking `num_pores` pores and `num_throats` throats.
    pub fn new(num_pores: usize, num_throats: usize) -> Self {
        let mut store = Self {
            counts: [0, 0],
            data: IndexMap::new(),
        };
        store.reset(num_pores, num_throats);
        store
    }

    /// Drop every entry and re-initialise with new element counts.
    pub fn reset(&mut self, num_pores: usize, num_throats: usize) {
        self.counts = [num_pores, num_throats];
        self.data.clear();
        for kind in ElementKind::ALL {
            self.data
                .insert(PropKey::all(kind), Array::trues(self.count(kind)));
        }
    }

    /// Element count for `kind`.
    pub fn count(&self, kind: ElementKind) -> usize {
        self.counts[kind.index()]
    }

    /// Number of pores (`Np`).
    pub fn num_pores(&self) -> usize {
        self.count(ElementKind::Pore)
    }

    /// Number of throats (`Nt`).
    pub fn num_throats(&self) -> usize {
        self.count(ElementKind::Throat)
    }

    /// Number of keys, including the two reserved `all` labels.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false`: the reserved labels are never removed.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether `key` is present. Malformed keys are simply absent.
    pub fn contains(&self, key: impl IntoPropKey) -> bool {
        key.into_prop_key()
            .map(|k| self.data.contains_key(&k))
            .unwrap_or(false)
    }

    /// Look up the array stored under `key`.
    pub fn get(&self, key: impl IntoPropKey) -> Result<&Array, StoreError> {
        let key = key.into_prop_key()?;
        self.data
            .get(&key)
            .ok_or_else(|| StoreError::UnknownProperty {
                key: key.to_string(),
            })
    }

    /// Store `array` under `key`, returning the previous value if any.
    ///
    /// Fails with [`StoreError::ShapeMismatch`] when the length differs
    /// from the key's element count, and with [`StoreError::ReservedKey`]
    /// for `"<kind>.all"`.
    pub fn set(
        &mut self,
        key: impl IntoPropKey,
        array: impl Into<Array>,
    ) -> Result<Option<Array>, StoreError> {
        let key = key.into_prop_key()?;
        let array = array.into();
        if key.is_all() {
            return Err(StoreError::ReservedKey {
                key: key.to_string(),
            });
        }
        let expected = self.count(key.kind());
        if array.len() != expected {
            return Err(StoreError::ShapeMismatch {
                key: key.to_string(),
                expected,
                actual: array.len(),
            });
        }
        Ok(self.data.insert(key, array))
    }

    /// Write a label that is `true` exactly at `indices`.
    ///
    /// Duplicate indices are harmless. Any index outside the kind's
    /// bounds fails with [`StoreError::IndexOutOfBounds`] and leaves
    /// the store untouched.
    pub fn set_label(&mut self, key: impl IntoPropKey, indices: &[usize]) -> Result<(), StoreError> {
        let key = key.into_prop_key()?;
        let mask = self.to_mask(key.kind(), indices)?;
        self.set(key, mask)?;
        Ok(())
    }

    /// Mutable access to a label's mask. The length cannot change.
    pub fn label_mut(&mut self, key: impl IntoPropKey) -> Result<&mut [bool], StoreError> {
        let key = key.into_prop_key()?;
        if key.is_all() {
            return Err(StoreError::ReservedKey {
                key: key.to_string(),
            });
        }
        let name = key.to_string();
        let array = self
            .data
            .get_mut(&key)
            .ok_or_else(|| StoreError::UnknownProperty { key: name.clone() })?;
        let dtype = array.dtype();
        array
            .as_bool_mut()
            .ok_or(StoreError::NotALabel { key: name, dtype })
    }

    /// Remove and return the array under `key`.
    pub fn remove(&mut self, key: impl IntoPropKey) -> Result<Array, StoreError> {
        let key = key.into_prop_key()?;
        if key.is_all() {
            return Err(StoreError::ReservedKey {
                key: key.to_string(),
            });
        }
        self.data
            .shift_remove(&key)
            .ok_or_else(|| StoreError::UnknownProperty {
                key: key.to_string(),
            })
    }

    /// Iterate over `(key, array)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&PropKey, &Array)> {
        self.data.iter()
    }

    /// Non-label keys, optionally restricted to one kind.
    pub fn props(&self, kind: Option<ElementKind>) -> Vec<PropKey> {
        self.keys_where(kind, |a| !a.is_label())
    }

    /// Label keys (boolean arrays), optionally restricted to one kind.
    pub fn labels(&self, kind: Option<ElementKind>) -> Vec<PropKey> {
        self.keys_where(kind, Array::is_label)
    }

    fn keys_where(&self, kind: Option<ElementKind>, pred: impl Fn(&Array) -> bool) -> Vec<PropKey> {
        self.data
            .iter()
            .filter(|(k, a)| kind.is_none_or(|kind| k.kind() == kind) && pred(*a))
            .map(|(k, _)| k.clone())
            .collect()
    }

    /// The boolean mask stored under `"<kind>.<label>"`.
    pub fn label_mask(&self, kind: ElementKind, label: &str) -> Result<&[bool], StoreError> {
        let key = PropKey::new(kind, label);
        let array = self
            .data
            .get(&key)
            .ok_or_else(|| StoreError::UnknownProperty {
                key: key.to_string(),
            })?;
        array.as_bool().ok_or_else(|| StoreError::NotALabel {
            key: key.to_string(),
            dtype: array.dtype(),
        })
    }

    /// Ordered indices of `kind` elements selected by `labels` under `mode`.
    ///
    /// Every label must exist and be boolean.
    pub fn select<S: AsRef<str>>(
        &self,
        kind: ElementKind,
        labels: &[S],
        mode: LabelMode,
    ) -> Result<Vec<usize>, StoreError> {
        let masks = labels
            .iter()
            .map(|l| self.label_mask(kind, l.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(mask_indices(&combine_masks(&masks, self.count(kind), mode)))
    }

    /// Pore indices selected by `labels` under `mode`.
    pub fn pores<S: AsRef<str>>(&self, labels: &[S], mode: LabelMode) -> Result<Vec<usize>, StoreError> {
        self.select(ElementKind::Pore, labels, mode)
    }

    /// Throat indices selected by `labels` under `mode`.
    pub fn throats<S: AsRef<str>>(&self, labels: &[S], mode: LabelMode) -> Result<Vec<usize>, StoreError> {
        self.select(ElementKind::Throat, labels, mode)
    }

    /// Number of `kind` elements selected by `labels` under `mode`.
    pub fn num_selected<S: AsRef<str>>(
        &self,
        kind: ElementKind,
        labels: &[S],
        mode: LabelMode,
    ) -> Result<usize, StoreError> {
        Ok(self.select(kind, labels, mode)?.len())
    }

    /// Fail with [`StoreError::IndexOutOfBounds`] on the first index
    /// outside `0..count(kind)`.
    pub fn check_indices(&self, kind: ElementKind, indices: &[usize]) -> Result<(), StoreError> {
        let count = self.count(kind);
        match indices.iter().find(|&&i| i >= count) {
            Some(&index) => Err(StoreError::IndexOutOfBounds { kind, index, count }),
            None => Ok(()),
        }
    }

    /// Boolean mask of length `count(kind)` that is `true` at `indices`.
    pub fn to_mask(&self, kind: ElementKind, indices: &[usize]) -> Result<Vec<bool>, StoreError> {
        self.check_indices(kind, indices)?;
        let mut mask = vec![false; self.count(kind)];
        for &i in indices {
            mask[i] = true;
        }
        Ok(mask)
    }

    /// Scan all properties for NaN values.
    pub fn check_data_health(&self) -> DataHealth {
        DataHealth {
            nan: self
                .data
                .iter()
                .filter(|(_, a)| a.has_nan())
                .map(|(k, _)| k.clone())
                .collect(),
        }
    }
}
