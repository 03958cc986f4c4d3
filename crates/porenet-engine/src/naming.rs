//! Generated object names: `<ClassName>_<SUFFIX>`.

use porenet_core::ObjectKind;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Deterministic name source seeded from the session config.
#[derive(Debug)]
pub struct NameGenerator {
    rng: ChaCha8Rng,
    suffix_len: usize,
}

impl NameGenerator {
    /// Create a generator producing `suffix_len`-character suffixes.
    pub fn new(seed: u64, suffix_len: usize) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            suffix_len,
        }
    }

    /// Number of distinct names per kind, or `None` when it exceeds `usize`.
    pub fn capacity(&self) -> Option<usize> {
        u32::try_from(self.suffix_len)
            .ok()
            .and_then(|len| CHARSET.len().checked_pow(len))
    }

    /// Whether `name` is one this generator could produce for `kind`.
    pub fn could_generate(&self, kind: ObjectKind, name: &str) -> bool {
        name.strip_prefix(kind.class_name())
            .and_then(|rest| rest.strip_prefix('_'))
            .is_some_and(|suffix| {
                suffix.len() == self.suffix_len && suffix.bytes().all(|c| CHARSET.contains(&c))
            })
    }

    /// Next candidate name for an object of `kind`.
    ///
    /// Uniqueness is the caller's concern; the session retries on collision.
    pub fn generate(&mut self, kind: ObjectKind) -> String {
        let suffix: String = (0..self.suffix_len)
            .map(|_| CHARSET[self.rng.random_range(0..CHARSET.len())] as char)
            .collect();
        format!("{}_{suffix}", kind.class_name())
    }
}
