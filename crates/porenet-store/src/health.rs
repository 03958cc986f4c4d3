//! Data health summary produced by [`LabeledStore::check_data_health`].
//!
//! [`LabeledStore::check_data_health`]: crate::LabeledStore::check_data_health

use porenet_core::PropKey;

/// Properties whose contents are unusable by downstream models.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataHealth {
    /// Float properties containing at least one NaN, in store order.
    pub nan: Vec<PropKey>,
}

impl DataHealth {
    /// `true` when no property was flagged.
    pub fn is_healthy(&self) -> bool {
        self.nan.is_empty()
    }
}
