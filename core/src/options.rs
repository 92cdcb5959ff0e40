//! Per-call generator configuration.

use crate::{
    bias::Bias,
    error::{FortuneError, FortuneResult},
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Supported stream algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Algorithm {
    #[default]
    Xoshiro256PlusPlus,
}

impl Algorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Xoshiro256PlusPlus => "xoshiro256pp",
        }
    }
}

impl FromStr for Algorithm {
    type Err = FortuneError;

    fn from_str(name: &str) -> FortuneResult<Self> {
        match name {
            "xoshiro256pp" => Ok(Self::Xoshiro256PlusPlus),
            other => Err(FortuneError::UnsupportedAlgorithm { name: other.to_string() }),
        }
    }
}

impl TryFrom<String> for Algorithm {
    type Error = FortuneError;

    fn try_from(name: String) -> FortuneResult<Self> {
        name.parse()
    }
}

impl From<Algorithm> for String {
    fn from(algorithm: Algorithm) -> Self {
        algorithm.name().to_string()
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomOptions {
    pub algorithm: Algorithm,
    pub bias: Bias,
    /// Reserved. Accepted so existing configs decode, but never consulted
    /// when building a generator; the seed argument is authoritative.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<String>,
}

impl RandomOptions {
    pub fn with_bias(mut self, bias: impl Into<Bias>) -> Self {
        self.bias = bias.into();
        self
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Options carrying an algorithm given by name.
    pub fn for_algorithm(name: &str) -> FortuneResult<Self> {
        Ok(Self::default().with_algorithm(name.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bias::BiasLevel;

    #[test]
    fn unknown_algorithm_is_rejected() {
        let err = "pcg64".parse::<Algorithm>().unwrap_err();
        assert!(matches!(err, FortuneError::UnsupportedAlgorithm { ref name } if name == "pcg64"));
        assert!(RandomOptions::for_algorithm("mt19937").is_err());
    }

    #[test]
    fn options_decode_from_partial_json() {
        let opts: RandomOptions = serde_json::from_str(r#"{"bias":"slight_down"}"#).unwrap();
        assert_eq!(opts.algorithm, Algorithm::Xoshiro256PlusPlus);
        assert_eq!(opts.bias, Bias::Named(BiasLevel::SlightDown));
        assert_eq!(opts.seed, None);

        let opts: RandomOptions = serde_json::from_str(r#"{"bias":0.4,"seed":"ignored"}"#).unwrap();
        assert_eq!(opts.bias, Bias::Tilt(0.4));
        assert_eq!(opts.seed.as_deref(), Some("ignored"));
    }

    #[test]
    fn unknown_algorithm_fails_decoding() {
        let res: Result<RandomOptions, _> = serde_json::from_str(r#"{"algorithm":"pcg64"}"#);
        let err = res.unwrap_err().to_string();
        assert!(err.contains("Unsupported algorithm: pcg64"), "{err}");
    }
}
