//! Seed + options to a ready-to-draw stream.

use crate::{
    bias::{apply_bias, Biased},
    error::FortuneResult,
    options::{Algorithm, RandomOptions},
    rng::{UniformSource, Xoshiro256PlusPlus},
};

/// A seeded stream with its bias already applied.
pub type SeededGenerator = Biased<Xoshiro256PlusPlus>;

/// Build the generator for `seed` under `options`.
pub fn create_generator(seed: &str, options: &RandomOptions) -> FortuneResult<SeededGenerator> {
    if options.seed.is_some() {
        log::warn!("RandomOptions.seed is reserved and ignored; drawing from the seed argument");
    }
    let base = match options.algorithm {
        Algorithm::Xoshiro256PlusPlus => Xoshiro256PlusPlus::from_seed_str(seed),
    };
    Ok(apply_bias(base, options.bias))
}

/// First sample of the stream for `seed`.
pub fn random(seed: &str, options: &RandomOptions) -> FortuneResult<f64> {
    let mut generator = create_generator(seed, options)?;
    Ok(generator.next_f64())
}

/// First `count` samples of the stream for `seed`.
pub fn random_stream(seed: &str, options: &RandomOptions, count: usize) -> FortuneResult<Vec<f64>> {
    let mut generator = create_generator(seed, options)?;
    Ok((0..count).map(|_| generator.next_f64()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bias::{Bias, BiasLevel};

    #[test]
    fn golden_first_draw() {
        let x = random("user1202501011", &RandomOptions::default()).unwrap();
        assert_eq!(x, 0.264_460_006_162_918_6);
        assert_eq!(x.to_bits(), 4_598_435_707_858_744_797);
        let again = random("user1202501011", &RandomOptions::default()).unwrap();
        assert_eq!(x.to_bits(), again.to_bits());
    }

    #[test]
    fn none_bias_is_bit_identical_to_raw() {
        let raw: Vec<f64> = {
            let mut rng = Xoshiro256PlusPlus::from_seed_str("raw-vs-none");
            (0..32).map(|_| rng.next_f64()).collect()
        };
        let opts = RandomOptions::default().with_bias(BiasLevel::None);
        let none = random_stream("raw-vs-none", &opts, 32).unwrap();
        assert_eq!(
            raw.iter().map(|x| x.to_bits()).collect::<Vec<_>>(),
            none.iter().map(|x| x.to_bits()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn biased_golden_values() {
        let up = random("user1202501011", &RandomOptions::default().with_bias(BiasLevel::ModerateUp)).unwrap();
        assert!((up - 0.514_256_751_207_914_3).abs() < 1e-12, "{up}");
        let down = random("user1202501011", &RandomOptions::default().with_bias(Bias::Tilt(0.5))).unwrap();
        assert!((down - 0.185_162_774_784_473_07).abs() < 1e-12, "{down}");
    }

    #[test]
    fn reserved_seed_field_does_not_change_the_stream() {
        let plain = random("abc", &RandomOptions::default()).unwrap();
        let opts = RandomOptions { seed: Some("something-else".into()), ..RandomOptions::default() };
        assert_eq!(plain, random("abc", &opts).unwrap());
    }
}
