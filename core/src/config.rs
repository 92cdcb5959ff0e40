use crate::{
    clock::{FortuneClock, DEFAULT_UTC_OFFSET_MINUTES},
    error::FortuneResult,
    festival::FestivalCalendar,
    fortune::DEFAULT_SECRET_SUFFIX,
    options::RandomOptions,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FortuneConfig {
    pub random: RandomOptions,
    pub secret_suffix: String,
    pub utc_offset_minutes: i32,
    /// year -> `MM-DD`, merged over the built-in lunar new year table.
    pub lunar_new_year: BTreeMap<i32, String>,
}

impl Default for FortuneConfig {
    fn default() -> Self {
        Self {
            random: RandomOptions::default(),
            secret_suffix: DEFAULT_SECRET_SUFFIX.to_string(),
            utc_offset_minutes: DEFAULT_UTC_OFFSET_MINUTES,
            lunar_new_year: BTreeMap::new(),
        }
    }
}

impl FortuneConfig {
    /// Load from a JSON file. Missing fields take their defaults.
    /// In tests, use FortuneConfig::default() or from_json().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config = Self::from_json(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        log::info!(
            "loaded config from {path}: algorithm={} bias={} utc_offset={}min",
            config.random.algorithm,
            config.random.bias,
            config.utc_offset_minutes
        );
        Ok(config)
    }

    pub fn from_json(content: &str) -> FortuneResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn clock(&self) -> FortuneClock {
        FortuneClock::new(self.utc_offset_minutes)
    }

    pub fn calendar(&self) -> FestivalCalendar {
        FestivalCalendar::new(self.lunar_new_year.clone())
    }
}
