//! Daily sign-in reward (星币).
//!
//! Pure state transition: the caller loads a `SignInState`, passes today's
//! date and a seed, and stores whatever state comes back.

use crate::{
    error::{FortuneError, FortuneResult},
    options::RandomOptions,
    sample::{random_bool, random_int},
    types::UserId,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const BASE_COIN_MIN: i64 = 10;
pub const BASE_COIN_MAX: i64 = 50;
pub const LUCKY_DAY_PROBABILITY: f64 = 0.1;
pub const LUCKY_DAY_MULTIPLIER: i64 = 2;

/// A gap longer than this many days breaks the streak.
pub const STREAK_GRACE_DAYS: i64 = 2;

/// How many entries the star-coin ranking shows.
pub const STAR_COIN_RANKING_LIMIT: usize = 20;
pub const STAR_COIN_RANKING_TITLE: &str = "🌟 群内星币排行榜 🌟";
pub const STAR_COIN_RANKING_FOOTER: &str = "快签到冲上榜单吧！🎉";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInState {
    pub star_coin: i64,
    pub consecutive_days: u32,
    pub last_sign_in: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInReward {
    pub state: SignInState,
    pub base_coin: i64,
    pub earned_coin: i64,
    pub event_message: Option<String>,
    pub streak_bonus: i64,
    pub bonus_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SignInOutcome {
    AlreadySignedIn,
    SignedIn(SignInReward),
}

/// One user's balance, as the ranking reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarCoinRecord {
    pub user_id: UserId,
    pub star_coin: i64,
}

impl SignInState {
    /// Admin overwrite: the balance becomes `amount`, the streak restarts and
    /// the user counts as signed in on `today`. Negative amounts are rejected.
    pub fn set_star_coin(&self, amount: i64, today: NaiveDate) -> FortuneResult<Self> {
        if amount < 0 {
            return Err(FortuneError::InvalidAmount { amount });
        }
        Ok(Self { star_coin: amount, consecutive_days: 0, last_sign_in: Some(today) })
    }

    /// Credit `amount` coins. Only positive amounts are accepted.
    pub fn add_star_coin(&self, amount: i64) -> FortuneResult<Self> {
        if amount <= 0 {
            return Err(FortuneError::InvalidAmount { amount });
        }
        Ok(Self { star_coin: self.star_coin.saturating_add(amount), ..self.clone() })
    }

    /// Debit `amount` coins; the balance bottoms out at zero.
    pub fn remove_star_coin(&self, amount: i64) -> FortuneResult<Self> {
        if amount < 0 {
            return Err(FortuneError::InvalidAmount { amount });
        }
        Ok(Self { star_coin: self.star_coin.saturating_sub(amount).max(0), ..self.clone() })
    }

    /// A non-positive price is always affordable.
    pub fn has_enough_star_coin(&self, amount: i64) -> bool {
        amount <= 0 || self.star_coin >= amount
    }
}

/// Streak milestone bonus for reaching exactly `days`.
pub fn streak_bonus(days: u32) -> Option<(i64, &'static str)> {
    match days {
        7 => Some((200, "🌟 连续签到 7 天，额外获得 200 星币！")),
        15 => Some((500, "🏆 连续签到 15 天，获得 500 星币大奖！")),
        30 => Some((1000, "🎉 连续签到 30 天，获得 1000 星币大奖！")),
        _ => None,
    }
}

pub fn sign_in(
    state: &SignInState,
    today: NaiveDate,
    seed: &str,
    options: &RandomOptions,
) -> FortuneResult<SignInOutcome> {
    let mut consecutive_days = state.consecutive_days;
    if let Some(last) = state.last_sign_in {
        let gap = (today - last).num_days();
        if gap == 0 {
            return Ok(SignInOutcome::AlreadySignedIn);
        }
        if gap > STREAK_GRACE_DAYS {
            log::debug!("streak broken after {gap} days");
            consecutive_days = 0;
        }
    }

    let base_coin = random_int(BASE_COIN_MIN, BASE_COIN_MAX, seed, options)?;
    let lucky = random_bool(&format!("{seed}lucky"), LUCKY_DAY_PROBABILITY, options)?;
    let (earned_coin, event_message) = if lucky {
        (base_coin * LUCKY_DAY_MULTIPLIER, Some("🍀 幸运日！星币双倍！".to_string()))
    } else {
        (base_coin, None)
    };

    consecutive_days += 1;
    let (streak_bonus, bonus_message) = match streak_bonus(consecutive_days) {
        Some((bonus, message)) => (bonus, Some(message.to_string())),
        None => (0, None),
    };

    let state = SignInState {
        star_coin: state.star_coin + earned_coin + streak_bonus,
        consecutive_days,
        last_sign_in: Some(today),
    };

    Ok(SignInOutcome::SignedIn(SignInReward {
        state,
        base_coin,
        earned_coin,
        event_message,
        streak_bonus,
        bonus_message,
    }))
}

/// Richest first, ties by user id; at most `STAR_COIN_RANKING_LIMIT` entries.
pub fn rank_star_coins(records: &[StarCoinRecord]) -> Vec<&StarCoinRecord> {
    let mut ranked: Vec<&StarCoinRecord> = records.iter().collect();
    ranked.sort_by(|a, b| b.star_coin.cmp(&a.star_coin).then_with(|| a.user_id.cmp(&b.user_id)));
    ranked.truncate(STAR_COIN_RANKING_LIMIT);
    ranked
}

/// `"1. name - 320 星币"` lines.
pub fn format_star_coin_ranking<F>(ranked: &[&StarCoinRecord], display_name: F) -> String
where
    F: Fn(&str) -> String,
{
    ranked
        .iter()
        .enumerate()
        .map(|(i, r)| format!("{}. {} - {} 星币", i + 1, display_name(&r.user_id), r.star_coin))
        .collect::<Vec<_>>()
        .join("\n")
}
