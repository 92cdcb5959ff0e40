//! Seed hashing.
//!
//! Seeds are human-built concatenations (user id + date + tag), so adjacent
//! seeds differ by a character or two. Every seed goes through SHA-256 before
//! it touches generator state; the generator never sees the raw string.

use crate::types::GeneratorState;
use sha2::{Digest, Sha256};

/// SHA-256 of the seed's UTF-8 bytes.
pub fn hash_seed(seed: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(seed.as_bytes());
    hasher.finalize().into()
}

/// Split a digest into four big-endian words.
///
/// An all-zero digest is a fixed point of xoshiro256++, so `s0` is forced
/// to 1 in that case.
pub fn state_from_digest(digest: &[u8; 32]) -> GeneratorState {
    let mut state = [0u64; 4];
    for (word, chunk) in state.iter_mut().zip(digest.chunks_exact(8)) {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(chunk);
        *word = u64::from_be_bytes(bytes);
    }
    if state.iter().all(|&w| w == 0) {
        log::warn!("seed digest produced an all-zero state, forcing s0 = 1");
        state[0] = 1;
    }
    state
}

/// Hash a seed string straight to generator state.
pub fn state_from_seed(seed: &str) -> GeneratorState {
    state_from_digest(&hash_seed(seed))
}
