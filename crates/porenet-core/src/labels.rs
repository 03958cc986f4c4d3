//! Boolean mask algebra for label queries.

use std::fmt;

/// How several labels are combined when selecting elements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LabelMode {
    /// Elements carrying *any* of the labels.
    #[default]
    Union,
    /// Elements carrying *every* label.
    Intersection,
    /// Elements carrying the first label but none of the others.
    Difference,
    /// Elements carrying none of the labels.
    None,
}

impl fmt::Display for LabelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Union => "union",
            Self::Intersection => "intersection",
            Self::Difference => "difference",
            Self::None => "none",
        };
        f.write_str(s)
    }
}

/// Ordered indices of the `true` entries in `mask`.
pub fn mask_indices(mask: &[bool]) -> Vec<usize> {
    mask.iter()
        .enumerate()
        .filter_map(|(i, &b)| b.then_some(i))
        .collect()
}

/// Combine equal-length masks element-wise according to `mode`.
///
/// With zero masks, `Union` and `Difference` select nothing while
/// `Intersection` and `None` select everything. Callers must pass
/// masks of length `len`.
pub fn combine_masks(masks: &[&[bool]], len: usize, mode: LabelMode) -> Vec<bool> {
    debug_assert!(masks.iter().all(|m| m.len() == len));
    (0..len)
        .map(|i| match mode {
            LabelMode::Union => masks.iter().any(|m| m[i]),
            LabelMode::Intersection => masks.iter().all(|m| m[i]),
            LabelMode::Difference => match masks.split_first() {
                Some((first, rest)) => first[i] && !rest.iter().any(|m| m[i]),
                None => false,
            },
            LabelMode::None => !masks.iter().any(|m| m[i]),
        })
        .collect()
}
