//! Power-law bias reshaping of a uniform stream.
//!
//! A bias resolves to an exponent `power`. With `power < 1` each raw sample
//! becomes `x^power`, which pushes mass upward; with `power > 1` it becomes
//! `1 - (1 - x)^(1/power)`, which pushes mass downward. Both maps are
//! strictly increasing on [0, 1) and keep the domain. `power == 1` is a
//! passthrough and leaves the raw stream bit-identical.

use crate::rng::{UniformSource, BELOW_ONE};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Named bias levels. Anything unrecognised resolves to `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BiasLevel {
    SlightUp,
    ModerateUp,
    #[default]
    None,
    SlightDown,
    ModerateDown,
}

impl BiasLevel {
    pub fn from_name(name: &str) -> Self {
        match name {
            "slight_up" => Self::SlightUp,
            "moderate_up" => Self::ModerateUp,
            "slight_down" => Self::SlightDown,
            "moderate_down" => Self::ModerateDown,
            "none" => Self::None,
            other => {
                log::warn!("unrecognised bias '{other}', using none");
                Self::None
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::SlightUp => "slight_up",
            Self::ModerateUp => "moderate_up",
            Self::None => "none",
            Self::SlightDown => "slight_down",
            Self::ModerateDown => "moderate_down",
        }
    }

    pub fn power(&self) -> f64 {
        match self {
            Self::SlightUp => 0.7,
            Self::ModerateUp => 0.5,
            Self::None => 1.0,
            Self::SlightDown => 1.3,
            Self::ModerateDown => 1.5,
        }
    }
}

impl From<String> for BiasLevel {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<BiasLevel> for String {
    fn from(level: BiasLevel) -> Self {
        level.name().to_string()
    }
}

/// Either a named level or a raw tilt. A tilt `b` maps to
/// `power = 1 + clamp(b, -1, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Bias {
    Tilt(f64),
    Named(BiasLevel),
}

impl Default for Bias {
    fn default() -> Self {
        Bias::Named(BiasLevel::None)
    }
}

impl Bias {
    pub fn power(&self) -> f64 {
        match self {
            Bias::Named(level) => level.power(),
            // NaN tilts fall through clamp unchanged; treat them as no bias.
            Bias::Tilt(b) if b.is_nan() => 1.0,
            Bias::Tilt(b) => 1.0 + b.clamp(-1.0, 1.0),
        }
    }

    /// Parse a command-line style value: a number is a tilt, anything else
    /// a level name.
    pub fn parse(value: &str) -> Self {
        match value.parse::<f64>() {
            Ok(b) => Bias::Tilt(b),
            Err(_) => Bias::Named(BiasLevel::from_name(value)),
        }
    }
}

impl From<BiasLevel> for Bias {
    fn from(level: BiasLevel) -> Self {
        Bias::Named(level)
    }
}

impl From<f64> for Bias {
    fn from(tilt: f64) -> Self {
        Bias::Tilt(tilt)
    }
}

impl fmt::Display for Bias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bias::Named(level) => write!(f, "{}", level.name()),
            Bias::Tilt(b) => write!(f, "{b}"),
        }
    }
}

/// A generator wrapped by a resolved bias exponent.
///
/// `power: None` is the identity wrap; samples pass through untouched.
#[derive(Debug, Clone)]
pub struct Biased<G> {
    inner: G,
    power: Option<f64>,
}

impl<G> Biased<G> {
    pub fn power(&self) -> f64 {
        self.power.unwrap_or(1.0)
    }

    pub fn is_identity(&self) -> bool {
        self.power.is_none()
    }
}

impl<G: UniformSource> UniformSource for Biased<G> {
    fn next_f64(&mut self) -> f64 {
        let x = self.inner.next_f64();
        match self.power {
            None => x,
            Some(power) => shape(x, power),
        }
    }
}

/// Wrap `generator` so each sample is reshaped by `bias`.
pub fn apply_bias<G: UniformSource>(generator: G, bias: Bias) -> Biased<G> {
    let power = bias.power();
    Biased {
        inner: generator,
        power: if power == 1.0 { None } else { Some(power) },
    }
}

/// The reshaping map for one sample.
///
/// `x^power` can round up to exactly 1.0 for `x` within an ulp of 1, and a
/// tilt of -1 gives `power == 0`; both are pinned to just below 1.0.
pub fn shape(x: f64, power: f64) -> f64 {
    if power < 1.0 {
        x.powf(power).min(BELOW_ONE)
    } else {
        1.0 - (1.0 - x).powf(1.0 / power)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Xoshiro256PlusPlus;

    #[test]
    fn named_levels_resolve_to_table_powers() {
        assert_eq!(Bias::from(BiasLevel::SlightUp).power(), 0.7);
        assert_eq!(Bias::from(BiasLevel::ModerateUp).power(), 0.5);
        assert_eq!(Bias::from(BiasLevel::SlightDown).power(), 1.3);
        assert_eq!(Bias::from(BiasLevel::ModerateDown).power(), 1.5);
        assert_eq!(Bias::from(BiasLevel::None).power(), 1.0);
        assert_eq!(Bias::parse("sideways").power(), 1.0);
    }

    #[test]
    fn tilts_are_clamped() {
        assert_eq!(Bias::Tilt(-0.25).power(), 0.75);
        assert_eq!(Bias::Tilt(3.0).power(), 2.0);
        assert_eq!(Bias::Tilt(-7.0).power(), 0.0);
        assert_eq!(Bias::Tilt(0.0).power(), 1.0);
        assert_eq!(Bias::Tilt(f64::NAN).power(), 1.0);
    }

    #[test]
    fn zero_tilt_is_identity() {
        let biased = apply_bias(Xoshiro256PlusPlus::from_seed_str("x"), Bias::Tilt(0.0));
        assert!(biased.is_identity());
    }

    #[test]
    fn shape_keeps_endpoints_and_order() {
        for power in [0.5, 0.7, 1.3, 1.5, 2.0] {
            assert_eq!(shape(0.0, power), 0.0);
            let mut prev = 0.0;
            for i in 1..1000 {
                let y = shape(i as f64 / 1000.0, power);
                assert!(y > prev, "power {power} not increasing at {i}");
                assert!(y < 1.0);
                prev = y;
            }
        }
    }

    #[test]
    fn degenerate_powers_stay_below_one() {
        assert!(shape(0.5, 0.0) < 1.0);
        assert!(shape(BELOW_ONE, 0.5) < 1.0);
        assert!(shape(BELOW_ONE, 2.0) < 1.0);
    }

    #[test]
    fn up_bias_moves_the_median_up() {
        assert!(shape(0.5, 0.5) > 0.5);
        assert!(shape(0.5, 1.5) < 0.5);
    }

    #[test]
    fn bias_round_trips_through_json() {
        let named: Bias = serde_json::from_str("\"moderate_up\"").unwrap();
        assert_eq!(named, Bias::Named(BiasLevel::ModerateUp));
        let tilt: Bias = serde_json::from_str("-0.3").unwrap();
        assert_eq!(tilt, Bias::Tilt(-0.3));
        let unknown: Bias = serde_json::from_str("\"wobbly\"").unwrap();
        assert_eq!(unknown.power(), 1.0);
        assert_eq!(serde_json::to_string(&named).unwrap(), "\"moderate_up\"");
    }
}
