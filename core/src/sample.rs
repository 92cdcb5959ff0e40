//! Domain helpers: map one [0, 1) sample onto integers, floats, booleans
//! and list elements.
//!
//! Every helper draws exactly the first sample of the stream for `seed`.
//! An empty seed falls back to platform entropy and is NOT reproducible;
//! callers that need determinism must pass a non-empty seed. The
//! [`unseeded`] functions make that fallback explicit at the call site.

use crate::{
    error::{FortuneError, FortuneResult},
    generator::random,
    options::RandomOptions,
    rng::{EntropySource, UniformSource},
};

fn sample(seed: &str, options: &RandomOptions) -> FortuneResult<f64> {
    if seed.is_empty() {
        log::debug!("empty seed, drawing from platform entropy");
        return Ok(EntropySource.next_f64());
    }
    random(seed, options)
}

/// `floor(sample * (max - min + 1)) + min`. With `min <= max` the result
/// is in `[min, max]`; an inverted range still follows the formula.
pub fn map_int(sample: f64, min: i64, max: i64) -> i64 {
    let span = max as i128 - min as i128 + 1;
    let mut value = min as i128 + (sample * span as f64).floor() as i128;
    if min <= max {
        // f64 rounding on very wide spans can land one past max.
        value = value.min(max as i128);
    }
    value.clamp(i64::MIN as i128, i64::MAX as i128) as i64
}

/// `sample * (max - min) + min`.
pub fn map_float(sample: f64, min: f64, max: f64) -> f64 {
    sample * (max - min) + min
}

/// Index into a list of `len` items.
pub fn map_index(sample: f64, len: usize) -> FortuneResult<usize> {
    if len == 0 {
        return Err(FortuneError::EmptyChoice);
    }
    let index = (sample * len as f64).floor() as usize;
    Ok(index.min(len - 1))
}

pub fn random_int(min: i64, max: i64, seed: &str, options: &RandomOptions) -> FortuneResult<i64> {
    Ok(map_int(sample(seed, options)?, min, max))
}

pub fn random_float(min: f64, max: f64, seed: &str, options: &RandomOptions) -> FortuneResult<f64> {
    Ok(map_float(sample(seed, options)?, min, max))
}

/// `true` with probability `probability` (0.5 is a fair coin).
pub fn random_bool(seed: &str, probability: f64, options: &RandomOptions) -> FortuneResult<bool> {
    Ok(sample(seed, options)? < probability)
}

/// Pick one element. Fails with `EmptyChoice` on an empty slice.
pub fn random_choice<'a, T>(
    items: &'a [T],
    seed: &str,
    options: &RandomOptions,
) -> FortuneResult<&'a T> {
    if items.is_empty() {
        return Err(FortuneError::EmptyChoice);
    }
    let index = map_index(sample(seed, options)?, items.len())?;
    Ok(&items[index])
}

/// Non-deterministic counterparts, drawing from platform entropy.
pub mod unseeded {
    use super::{map_float, map_index, map_int};
    use crate::{
        error::FortuneResult,
        rng::{EntropySource, UniformSource},
    };

    pub fn random_int(min: i64, max: i64) -> i64 {
        map_int(EntropySource.next_f64(), min, max)
    }

    pub fn random_float(min: f64, max: f64) -> f64 {
        map_float(EntropySource.next_f64(), min, max)
    }

    pub fn random_bool(probability: f64) -> bool {
        EntropySource.next_f64() < probability
    }

    pub fn random_choice<T>(items: &[T]) -> FortuneResult<&T> {
        let index = map_index(EntropySource.next_f64(), items.len())?;
        Ok(&items[index])
    }
}
