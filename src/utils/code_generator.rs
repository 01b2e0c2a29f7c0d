//! Short code generation.
//!
//! Codes are 6 characters drawn uniformly from `[a-zA-Z0-9]`, giving 62^6
//! (about 56.8 billion) possible values. Generation does not consult the
//! store, so two calls may in principle return the same code; the later
//! mapping then replaces the earlier one.

use rand::{Rng, SeedableRng, rngs::StdRng};
use std::sync::Mutex;

/// Number of characters in a generated code.
pub const CODE_LENGTH: usize = 6;

/// Alphabet codes are drawn from: lowercase, uppercase, digits.
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Source of short codes.
///
/// Owned by [`crate::application::services::LinkService`] and shared across
/// concurrent shorten requests, hence `Send + Sync`.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Produces a new short code. Never fails.
    fn generate(&self) -> String;
}

/// Random code generator backed by a single seeded [`StdRng`].
///
/// The RNG is seeded once at construction and guarded by a mutex, so
/// concurrent callers draw from one stream without racing on its state.
pub struct RandomCodeGenerator {
    rng: Mutex<StdRng>,
}

impl RandomCodeGenerator {
    /// Creates a generator seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Creates a deterministic generator. Same seed, same code sequence.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomCodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        // A panic while holding the lock cannot leave the RNG in a broken state.
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        (0..CODE_LENGTH)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect()
    }
}

/// Returns true if `code` has the shape of a generated code.
pub fn is_generated_code(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| ALPHABET.contains(&b))
}
