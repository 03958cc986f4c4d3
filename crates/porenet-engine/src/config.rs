//! Session configuration, validation, and error types.

use std::error::Error;
use std::fmt;

/// How a dynamic model's element subsets are resolved on regeneration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubsetBinding {
    /// Reuse the subsets captured when the model was added. Membership
    /// changes made afterwards through the phase labels are not seen
    /// until the model is re-added or the physics is relocated.
    #[default]
    Captured,
    /// Re-read the physics membership labels from the phase before
    /// every regeneration.
    Live,
}

/// Builder-input for [`Session::new`](crate::Session::new).
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Seed for generated object names. `None` draws a random seed.
    pub seed: Option<u64>,
    /// Length of the random suffix in generated names. Default: 5.
    pub name_suffix_len: usize,
    /// Subset resolution policy for regeneration. Default: `Captured`.
    pub subset_binding: SubsetBinding,
}

impl SessionConfig {
    /// Longest accepted generated-name suffix.
    pub const MAX_SUFFIX_LEN: usize = 32;

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name_suffix_len == 0 {
            return Err(ConfigError::ZeroSuffixLength);
        }
        if self.name_suffix_len > Self::MAX_SUFFIX_LEN {
            return Err(ConfigError::SuffixTooLong {
                value: self.name_suffix_len,
            });
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            name_suffix_len: 5,
            subset_binding: SubsetBinding::Captured,
        }
    }
}

/// Errors detected during [`SessionConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `name_suffix_len` is zero; generated names would collide.
    ZeroSuffixLength,
    /// `name_suffix_len` exceeds [`SessionConfig::MAX_SUFFIX_LEN`].
    SuffixTooLong {
        /// The configured length.
        value: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroSuffixLength => write!(f, "name_suffix_len must be at least 1"),
            Self::SuffixTooLong { value } => write!(
                f,
                "name_suffix_len {value} exceeds maximum {}",
                SessionConfig::MAX_SUFFIX_LEN
            ),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let cfg = SessionConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.subset_binding, SubsetBinding::Captured);
    }

    #[test]
    fn suffix_bounds() {
        let zero = SessionConfig {
            name_suffix_len: 0,
            ..Default::default()
        };
        assert_eq!(zero.validate(), Err(ConfigError::ZeroSuffixLength));

        let long = SessionConfig {
            name_suffix_len: 33,
            ..Default::default()
        };
        assert_eq!(long.validate(), Err(ConfigError::SuffixTooLong { value: 33 }));
    }
}
