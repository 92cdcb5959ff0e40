//! Seeded, reproducible randomness for daily chat-bot draws.
//!
//! A seed string is hashed to xoshiro256++ state, the stream is optionally
//! reshaped by a power-law bias, and helpers map samples onto integers,
//! floats, booleans and list picks. The luck, fortune, festival and sign-in
//! modules build their per-user-per-day outcomes on top of that.

pub mod bias;
pub mod clock;
pub mod config;
pub mod error;
pub mod festival;
pub mod fortune;
pub mod generator;
pub mod luck;
pub mod options;
pub mod rng;
pub mod sample;
pub mod seed;
pub mod signin;
pub mod types;

pub use bias::{apply_bias, Bias, BiasLevel};
pub use error::{FortuneError, FortuneResult};
pub use generator::{create_generator, random, SeededGenerator};
pub use options::{Algorithm, RandomOptions};
pub use rng::{UniformSource, Xoshiro256PlusPlus};
pub use sample::{random_bool, random_choice, random_float, random_int};
