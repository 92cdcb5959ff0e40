//! Shared primitive types used across the crate.

/// A chat platform user identifier, kept as the raw string the host sends.
pub type UserId = String;

/// A calendar date rendered as `YYYY-MM-DD`.
pub type DateString = String;

/// The four 64-bit words of xoshiro256++ state.
pub type GeneratorState = [u64; 4];
