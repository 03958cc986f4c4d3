//! The [`Array`] value type stored under every property key.

use std::fmt;

/// Element type tag of an [`Array`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DType {
    /// Boolean labels.
    Bool,
    /// Signed integers (indices, counts).
    Int,
    /// Double-precision floats (physical properties).
    Float,
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
        };
        f.write_str(s)
    }
}

/// A one-dimensional homogeneous array, one entry per pore or throat.
///
/// Boolean arrays are *labels*; the other types are *properties*.
#[derive(Clone, Debug, PartialEq)]
pub enum Array {
    /// Boolean label data.
    Bool(Vec<bool>),
    /// Integer data.
    Int(Vec<i64>),
    /// Floating-point data.
    Float(Vec<f64>),
}

impl Array {
    /// An all-true label of length `len`.
    pub fn trues(len: usize) -> Self {
        Self::Bool(vec![true; len])
    }

    /// An all-false label of length `len`.
    pub fn falses(len: usize) -> Self {
        Self::Bool(vec![false; len])
    }

    /// Integer array holding the given element indices.
    pub fn from_indices(indices: &[usize]) -> Self {
        Self::Int(indices.iter().map(|&i| i as i64).collect())
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        match self {
            Self::Bool(v) => v.len(),
            Self::Int(v) => v.len(),
            Self::Float(v) => v.len(),
        }
    }

    /// Whether the array has zero elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element type tag.
    pub fn dtype(&self) -> DType {
        match self {
            Self::Bool(_) => DType::Bool,
            Self::Int(_) => DType::Int,
            Self::Float(_) => DType::Float,
        }
    }

    /// Whether this array is a label (boolean).
    pub fn is_label(&self) -> bool {
        matches!(self, Self::Bool(_))
    }

    /// Borrow as a boolean slice, if this is a label.
    pub fn as_bool(&self) -> Option<&[bool]> {
        match self {
            Self::Bool(v) => Some(v),
            _ => None,
        }
    }

    /// Borrow as an integer slice.
    pub fn as_int(&self) -> Option<&[i64]> {
        match self {
            Self::Int(v) => Some(v),
            _ => None,
        }
    }

    /// Borrow as a float slice.
    pub fn as_float(&self) -> Option<&[f64]> {
        match self {
            Self::Float(v) => Some(v),
            _ => None,
        }
    }

    /// Mutable boolean slice, if this is a label.
    pub fn as_bool_mut(&mut self) -> Option<&mut [bool]> {
        match self {
            Self::Bool(v) => Some(v),
            _ => None,
        }
    }

    /// Widen every element to `f64` (`true` → 1.0).
    pub fn to_f64_vec(&self) -> Vec<f64> {
        match self {
            Self::Bool(v) => v.iter().map(|&b| if b { 1.0 } else { 0.0 }).collect(),
            Self::Int(v) => v.iter().map(|&i| i as f64).collect(),
            Self::Float(v) => v.clone(),
        }
    }

    /// Whether any element is NaN. Always `false` for non-float arrays.
    pub fn has_nan(&self) -> bool {
        match self {
            Self::Float(v) => v.iter().any(|x| x.is_nan()),
            _ => false,
        }
    }

    /// Select the elements at `indices`, preserving dtype.
    ///
    /// Returns `None` if any index is out of range.
    pub fn take(&self, indices: &[usize]) -> Option<Self> {
        fn pick<T: Copy>(v: &[T], indices: &[usize]) -> Option<Vec<T>> {
            indices.iter().map(|&i| v.get(i).copied()).collect()
        }
        Some(match self {
            Self::Bool(v) => Self::Bool(pick(v, indices)?),
            Self::Int(v) => Self::Int(pick(v, indices)?),
            Self::Float(v) => Self::Float(pick(v, indices)?),
        })
    }
}

impl From<Vec<bool>> for Array {
    fn from(v: Vec<bool>) -> Self {
        Self::Bool(v)
    }
}

impl From<Vec<i64>> for Array {
    fn from(v: Vec<i64>) -> Self {
        Self::Int(v)
    }
}

impl From<Vec<f64>> for Array {
    fn from(v: Vec<f64>) -> Self {
        Self::Float(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_and_dtype() {
        assert_eq!(Array::trues(3), Array::Bool(vec![true; 3]));
        assert_eq!(Array::falses(2).dtype(), DType::Bool);
        assert_eq!(Array::from_indices(&[0, 4]), Array::Int(vec![0, 4]));
        assert!(Array::Float(vec![]).is_empty());
    }

    #[test]
    fn take_checks_bounds() {
        let a = Array::Float(vec![1.0, 2.0, 3.0]);
        assert_eq!(a.take(&[2, 0]), Some(Array::Float(vec![3.0, 1.0])));
        assert_eq!(a.take(&[3]), None);
    }

    #[test]
    fn nan_detection_only_for_floats() {
        assert!(Array::Float(vec![1.0, f64::NAN]).has_nan());
        assert!(!Array::Int(vec![1, 2]).has_nan());
        assert_eq!(Array::Bool(vec![true, false]).to_f64_vec(), vec![1.0, 0.0]);
    }
}
