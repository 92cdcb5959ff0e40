//! Festival calendar and the luck bonus it grants.
//!
//! Festivals are keyed by zero-padded `MM-DD`. The Spring Festival moves
//! every year and comes from a lunar new year table, overridable per year.
//! April Fools' Day draws its own bonus from a SHA-256 digest of the user
//! and date, so the outcome is stable for that pair.

use crate::{clock::format_date, seed::hash_seed};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const APRIL_FOOLS: &str = "04-01";
pub const FESTIVAL_BONUS: f64 = 10.0;
const SPRING_FESTIVAL: &str = "春节";

const FIXED_FESTIVALS: [(&str, &str); 10] = [
    ("01-01", "元旦"),
    ("05-01", "劳动节"),
    ("06-01", "儿童节"),
    ("10-01", "国庆节"),
    ("12-25", "圣诞节"),
    ("03-08", "妇女节"),
    ("04-01", "愚人节"),
    ("05-04", "青年节"),
    ("09-10", "教师节"),
    ("11-11", "光棍节"),
];

const LUNAR_TABLE_FIRST_YEAR: i32 = 2000;

/// Gregorian (month, day) of the lunar new year, 2000..=2040.
const LUNAR_NEW_YEAR: [(u32, u32); 41] = [
    (2, 5), (1, 24), (2, 12), (2, 1), (1, 22), (2, 9), (1, 29), (2, 18), (2, 7), (1, 26),
    (2, 14), (2, 3), (1, 23), (2, 10), (1, 31), (2, 19), (2, 8), (1, 28), (2, 16), (2, 5),
    (1, 25), (2, 12), (2, 1), (1, 22), (2, 10), (1, 29), (2, 17), (2, 6), (1, 26), (2, 13),
    (2, 3), (1, 23), (2, 11), (1, 31), (2, 19), (2, 8), (1, 28), (2, 15), (2, 4), (1, 24),
    (2, 12),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FestivalBonus {
    pub bonus: f64,
    pub description: String,
}

impl FestivalBonus {
    pub fn none() -> Self {
        Self { bonus: 0.0, description: String::new() }
    }

    pub fn is_active(&self) -> bool {
        self.bonus != 0.0
    }
}

/// Festival lookup with optional per-year Spring Festival overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FestivalCalendar {
    /// year -> `MM-DD`
    #[serde(default)]
    pub lunar_new_year: BTreeMap<i32, String>,
}

impl FestivalCalendar {
    pub fn new(lunar_new_year: BTreeMap<i32, String>) -> Self {
        Self { lunar_new_year }
    }

    /// `MM-DD` of the lunar new year in `year`, if known.
    pub fn lunar_new_year(&self, year: i32) -> Option<String> {
        if let Some(month_day) = self.lunar_new_year.get(&year) {
            return Some(month_day.clone());
        }
        let index = usize::try_from(year - LUNAR_TABLE_FIRST_YEAR).ok()?;
        LUNAR_NEW_YEAR
            .get(index)
            .map(|(month, day)| format!("{month:02}-{day:02}"))
    }

    /// All festivals of `year`, keyed by `MM-DD`.
    pub fn festivals(&self, year: i32) -> BTreeMap<String, String> {
        let mut map: BTreeMap<String, String> = FIXED_FESTIVALS
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        match self.lunar_new_year(year) {
            Some(month_day) => {
                map.insert(month_day, SPRING_FESTIVAL.to_string());
            }
            None => log::warn!("no lunar new year date for {year}, Spring Festival skipped"),
        }
        map
    }

    pub fn festival_on(&self, date: NaiveDate) -> Option<String> {
        let month_day = date.format("%m-%d").to_string();
        self.festivals(date.year()).remove(&month_day)
    }
}

/// The luck bonus `user_id` gets on `date`.
pub fn festival_bonus(user_id: &str, date: NaiveDate, calendar: &FestivalCalendar) -> FestivalBonus {
    let month_day = date.format("%m-%d").to_string();
    if month_day == APRIL_FOOLS {
        return april_fools_bonus(user_id, &format_date(date));
    }
    match calendar.festival_on(date) {
        Some(name) => FestivalBonus {
            bonus: FESTIVAL_BONUS,
            description: format!("因{name}获得 +10 人品值！"),
        },
        None => FestivalBonus::none(),
    }
}

/// Digest-derived draw in [0, 1] for the April Fools' roll.
fn april_fools_roll(user_id: &str, date: &str) -> f64 {
    let digest = hash_seed(&format!("{user_id}{date}april_fools"));
    let word = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
    word as f64 / u32::MAX as f64
}

fn april_fools_bonus(user_id: &str, date: &str) -> FestivalBonus {
    let roll = april_fools_roll(user_id, date);
    // roll == 1.0 would index a fourth branch
    let choice = ((roll * 3.0).floor() as u32).min(2);
    log::debug!("april fools roll for {user_id} on {date}: {roll} -> branch {choice}");

    match choice {
        0 => {
            let bonus = ((roll * 1.9 + 0.1) * 10.0).round() / 10.0;
            FestivalBonus {
                bonus,
                description: format!("愚人节的奇妙魔法，运气增加 {bonus} 点！"),
            }
        }
        1 => {
            let penalty = (roll * 10.0 + 1.0).floor();
            FestivalBonus {
                bonus: -penalty,
                description: format!("被愚人节恶作剧整蛊，运气下降 {penalty} 点！"),
            }
        }
        _ => {
            let bonus = (roll * 31.0).floor() + 20.0;
            FestivalBonus {
                bonus,
                description: format!("愚人节反整蛊成功，运气爆棚 +{bonus}！"),
            }
        }
    }
}
