//! Daily fortune (运势) card data.
//!
//! Two streams per user-day: `seed1` drives the score, the picture seed and
//! the fallback sentence; `seed2 = seed1 + secret_suffix` drives the lucky
//! colour and number. Both are re-derivable from `(user, date)` alone.

use crate::{
    config::FortuneConfig,
    error::FortuneResult,
    generator::random,
    options::RandomOptions,
    sample::{random_choice, random_int},
};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Suffix the bundle ships with for deriving the secondary stream.
pub const DEFAULT_SECRET_SUFFIX: &str = r#"_;Y?hv7P.aFLf[w]?O"}MBsc')V=)hD(?)"#;

pub const FALLBACK_SENTENCE_FROM: &str = "系统提示";
const UNKNOWN_COLOR_VALUE: &str = "#000000";

/// (key, hex, 中文名) in draw order.
pub const COLORS: [(&str, &str, &str); 14] = [
    ("red", "#E63946", "红色"),
    ("orange", "#F77F00", "橙色"),
    ("yellow", "#FFD60A", "黄色"),
    ("green", "#06D6A0", "绿色"),
    ("cyan", "#00B4D8", "青色"),
    ("blue", "#4361EE", "蓝色"),
    ("purple", "#7209B7", "紫色"),
    ("pink", "#FF006E", "粉色"),
    ("gold", "#FFB703", "金色"),
    ("silver", "#ADB5BD", "银色"),
    ("black", "#212529", "黑色"),
    ("gray", "#6C757D", "灰色"),
    ("brown", "#8B4513", "棕色"),
    ("beige", "#F4E4C1", "米色"),
];

pub const FALLBACK_SENTENCES: [&str; 5] = [
    "心若向阳,无畏悲伤。",
    "一切都会好起来的。",
    "每一个平凡的日子都值得珍惜。",
    "保持微笑,好运自然来。",
    "今天也要元气满满!",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FortuneData {
    pub score: i64,
    pub random_num: f64,
    pub sentence: String,
    pub sentence_from: String,
    pub lucky_color: String,
    pub lucky_color_value: String,
    pub lucky_number: i64,
    pub solar_date: String,
}

/// `(seed1, seed2)` for `user_id` on `date`. The month is zero based and
/// neither month nor day is padded, matching seeds already in use.
pub fn fortune_seeds(user_id: &str, date: NaiveDate, secret_suffix: &str) -> (String, String) {
    let seed1 = format!("{user_id}{}{}{}", date.year(), date.month0(), date.day());
    let seed2 = format!("{seed1}{secret_suffix}");
    (seed1, seed2)
}

pub fn calculate_fortune(user_id: &str, date: NaiveDate, config: &FortuneConfig) -> FortuneResult<FortuneData> {
    let (seed1, seed2) = fortune_seeds(user_id, date, &config.secret_suffix);
    let plain = RandomOptions::default();

    let random_num = random(&seed1, &plain)?;
    let score = random_int(1, 100, &seed1, &config.random)?;

    let keys: Vec<&str> = COLORS.iter().map(|(key, _, _)| *key).collect();
    let color_key: &str = random_choice(&keys, &seed2, &plain)?;
    let lucky_color = color_name(color_key).unwrap_or(color_key).to_string();
    let lucky_number = random_int(1, 100, &seed2, &plain)?;

    let sentence = random_choice(&FALLBACK_SENTENCES, &seed1, &plain)?.to_string();

    log::debug!("fortune for {user_id} on {date}: score={score} color={color_key} number={lucky_number}");

    Ok(FortuneData {
        score,
        random_num,
        sentence,
        sentence_from: FALLBACK_SENTENCE_FROM.to_string(),
        lucky_color_value: color_value(&lucky_color).to_string(),
        lucky_color,
        lucky_number,
        solar_date: format!("{}年{}月{}日", date.year(), date.month(), date.day()),
    })
}

fn color_name(key: &str) -> Option<&'static str> {
    COLORS.iter().find(|(k, _, _)| *k == key).map(|(_, _, name)| *name)
}

/// Hex for an English key or a Chinese colour name; `#000000` otherwise.
pub fn color_value(name: &str) -> &'static str {
    COLORS
        .iter()
        .find(|(key, _, zh)| *key == name || *zh == name)
        .map(|(_, hex, _)| *hex)
        .unwrap_or(UNKNOWN_COLOR_VALUE)
}

/// Which backup picture (1..=50) goes with a card when the primary image
/// source is unavailable. Seeded by the picture seed's number string.
pub fn backup_image_number(random_num: f64) -> FortuneResult<i64> {
    random_int(1, 50, &number_string(random_num), &RandomOptions::default())
}

/// Shortest round-trip digits, switching to `1.5e-7` style below 1e-6 the
/// way existing image seeds were written.
fn number_string(x: f64) -> String {
    if x != 0.0 && x.abs() < 1e-6 {
        format!("{x:e}")
    } else {
        x.to_string()
    }
}
