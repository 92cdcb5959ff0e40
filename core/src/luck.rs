//! Daily luck (人品) score.
//!
//! The score for `(user, date)` is a pure function of the pair: today's
//! value and yesterday's "tomorrow" preview come from the same seed, so a
//! stored record can always be re-derived and checked.

use crate::{
    clock::{format_date, history_window},
    error::FortuneResult,
    festival::{festival_bonus, FestivalBonus, FestivalCalendar},
    options::RandomOptions,
    sample::{random_choice, random_int},
    types::{DateString, UserId},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const LUCK_MIN: i64 = 1;
pub const LUCK_MAX: i64 = 100;

/// How many entries a group ranking shows.
pub const RANKING_LIMIT: usize = 50;
pub const RANKING_TITLE: &str = "今日人品排行榜";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LuckDay {
    Today,
    Tomorrow,
}

impl LuckDay {
    fn label(&self) -> &'static str {
        match self {
            Self::Today => "今日人品值",
            Self::Tomorrow => "明日人品值",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LuckOutcome {
    pub base: i64,
    pub bonus: FestivalBonus,
    pub luck: i64,
}

/// One stored score, as the host database keeps it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LuckRecord {
    pub user_id: UserId,
    pub date: DateString,
    pub luck: i64,
}

struct LuckBand {
    min: i64,
    today: [&'static str; 4],
    tomorrow: [&'static str; 4],
}

const LUCK_BANDS: [LuckBand; 5] = [
    LuckBand {
        min: 90,
        today: [
            "人品爆发！今天你无论做什么都可能得到意想不到的好运反馈！",
            "人品爆表！你的善意和正直终于得到了应有的回报，一切都会顺利！",
            "人品极佳！你的好人缘将助你一臂之力，任何请求都更容易得到帮助！",
            "人品超棒！你的真诚和友善为你积累了巨大的人气，今天正是收获的时候！",
        ],
        tomorrow: [
            "明日人品爆发！你的积累将迎来爆发期，抓住每一个机会！",
            "明日人品爆表！做好准备，明天你的好运气将超乎想象！",
            "明日人品极佳！你的好人缘将在明天发挥重要作用，事半功倍！",
            "明日人品超棒！你的真诚和友善将在明天得到丰厚的回报！",
        ],
    },
    LuckBand {
        min: 70,
        today: [
            "人品良好！你平日里的善举开始显现效果，今天会有不错的人缘运！",
            "人品优秀！你的正直和诚信为你赢得了信任，今天适合与他人合作！",
            "人品不错！你的热心帮助会让你获得他人的好感，人际关系会更上一层楼！",
            "人品在线！你的友善态度会为你带来好的机遇，不妨多与他人交流！",
        ],
        tomorrow: [
            "明日人品良好！你的善意和努力将在明天开始收获，保持积极！",
            "明日人品优秀！你的正直和诚信将为明天的交流合作铺平道路！",
            "明日人品不错！你的热心和体贴将让明天的人际关系更加和谐！",
            "明日人品在线！你的友善态度将为明天带来新的机遇和朋友！",
        ],
    },
    LuckBand {
        min: 50,
        today: [
            "人品平稳！你的日常表现中规中矩，今天一切都会按部就班地进行！",
            "人品普通！保持平常心，你的真诚会慢慢积累成更大的好运！",
            "人品正常！继续保持你的善良和正直，好运会在不经意间降临！",
            "人品稳定！踏实做好每一件事，你的努力终将得到认可！",
        ],
        tomorrow: [
            "明日人品平稳！保持平常心，明天的一切都会顺利进行！",
            "明日人品普通！继续做好自己，你的真诚会慢慢积累成更大的好运！",
            "明日人品正常！不必过于担心，按计划行事，明天会是平静的一天！",
            "明日人品稳定！踏实做好每一件事，明天的努力不会白费！",
        ],
    },
    LuckBand {
        min: 30,
        today: [
            "人品稍低！可能最近有些急躁，不妨放缓脚步，多一点耐心和包容！",
            "人品波动！或许你需要反思一下最近的言行，多做一些善意的举动！",
            "人品待提升！尝试主动帮助他人，你的善意会让人品值回升！",
            "人品低迷！保持积极心态，从小事做起，积累正能量！",
        ],
        tomorrow: [
            "明日人品稍低！明天可能会有些小摩擦，多一些理解和包容！",
            "明日人品波动！明天需要更加谨慎，避免不必要的误会和冲突！",
            "明日人品待提升！明天尝试多做一些善意的举动，积累人品！",
            "明日人品低迷！明天保持低调，做好自己该做的事，耐心等待转机！",
        ],
    },
    LuckBand {
        min: 0,
        today: [
            "人品低谷！不要灰心，每个人都有低谷期，这正是积累人品的好时机！",
            "人品急需补充！多做善事，多说善言，你的人品值会逐渐回升！",
            "人品寒冬！保持乐观，主动关心他人，温暖他人的同时也会温暖自己！",
            "人品挑战期！这是对你的考验，坚持做正确的事，光明就在前方！",
        ],
        tomorrow: [
            "明日人品低谷！不要气馁，这正是你积累人品的好时机，明天多做善事！",
            "明日人品急需补充！明天记得保持微笑，多鼓励他人，你的善意会有回报！",
            "明日人品寒冬！明天保持乐观，相信否极泰来，阳光总在风雨后！",
            "明日人品挑战期！明天是对你的考验，坚持善良，你会度过难关！",
        ],
    },
];

/// Seed for the score of `user_id` on `date`.
pub fn luck_seed(user_id: &str, date: NaiveDate) -> String {
    format!("{}{}", format_date(date), user_id)
}

/// Base draw plus festival bonus, rounded and clamped to 1..=100.
pub fn calculate_luck(
    user_id: &str,
    date: NaiveDate,
    calendar: &FestivalCalendar,
    options: &RandomOptions,
) -> FortuneResult<LuckOutcome> {
    let seed = luck_seed(user_id, date);
    let base = random_int(LUCK_MIN, LUCK_MAX, &seed, options)?;
    let bonus = festival_bonus(user_id, date, calendar);
    let luck = (base as f64 + bonus.bonus).round().clamp(LUCK_MIN as f64, LUCK_MAX as f64) as i64;
    log::debug!("luck for {user_id} on {date}: base={base} bonus={} final={luck}", bonus.bonus);
    Ok(LuckOutcome { base, bonus, luck })
}

/// Index of the band `luck` falls in. Scores below 0 land in the last band.
pub fn band_index(luck: i64) -> usize {
    LUCK_BANDS
        .iter()
        .position(|band| luck >= band.min)
        .unwrap_or(LUCK_BANDS.len() - 1)
}

/// The message shown with a score, with any festival note appended.
pub fn format_luck_message(
    day: LuckDay,
    user_id: &str,
    date: NaiveDate,
    luck: i64,
    calendar: &FestivalCalendar,
) -> FortuneResult<String> {
    let band = &LUCK_BANDS[band_index(luck)];
    let templates = match day {
        LuckDay::Today => &band.today,
        LuckDay::Tomorrow => &band.tomorrow,
    };
    let pick_seed = format!("{}message", luck_seed(user_id, date));
    let line = random_choice(templates, &pick_seed, &RandomOptions::default())?;

    let mut message = format!("{}：{luck}。{line}", day.label());
    let bonus = festival_bonus(user_id, date, calendar);
    if bonus.is_active() {
        message.push_str(&format!("\n节日加成：{}", bonus.description));
    }
    Ok(message)
}

/// Highest scores first, ties by user id; at most `RANKING_LIMIT` entries.
pub fn rank_records<'a>(records: &'a [LuckRecord], date: &str) -> Vec<&'a LuckRecord> {
    let mut ranked: Vec<&LuckRecord> = records.iter().filter(|r| r.date == date).collect();
    ranked.sort_by(|a, b| b.luck.cmp(&a.luck).then_with(|| a.user_id.cmp(&b.user_id)));
    ranked.truncate(RANKING_LIMIT);
    ranked
}

/// Titled list of `"1. name - 人品值：95"` lines. `display_name` maps user
/// ids to names.
pub fn format_ranking<F>(ranked: &[&LuckRecord], display_name: F) -> String
where
    F: Fn(&str) -> String,
{
    let lines = ranked
        .iter()
        .enumerate()
        .map(|(i, r)| format!("{}. {} - 人品值：{}", i + 1, display_name(&r.user_id), r.luck))
        .collect::<Vec<_>>();
    format!("{RANKING_TITLE}：\n{}", lines.join("\n"))
}

/// A user's records inside the history window ending `today`, newest first.
pub fn history_records<'a>(records: &'a [LuckRecord], user_id: &str, today: NaiveDate) -> Vec<&'a LuckRecord> {
    let (start, end) = history_window(today);
    let (start, end) = (format_date(start), format_date(end));
    let mut history: Vec<&LuckRecord> = records
        .iter()
        .filter(|r| r.user_id == user_id && r.date >= start && r.date <= end)
        .collect();
    history.sort_by(|a, b| b.date.cmp(&a.date));
    history
}

pub fn format_history(user_name: &str, history: &[&LuckRecord]) -> String {
    let mut output = format!("{user_name} 最近 7 天的人品记录：\n");
    for record in history {
        output.push_str(&format!("{} - 人品值：{}\n", record.date, record.luck));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::parse_date;

    #[test]
    fn bands_by_threshold() {
        assert_eq!(band_index(100), 0);
        assert_eq!(band_index(90), 0);
        assert_eq!(band_index(89), 1);
        assert_eq!(band_index(50), 2);
        assert_eq!(band_index(30), 3);
        assert_eq!(band_index(1), 4);
        assert_eq!(band_index(-3), 4);
    }

    #[test]
    fn seed_is_date_then_user() {
        assert_eq!(luck_seed("10001", parse_date("2025-01-05").unwrap()), "2025-01-0510001");
    }

    #[test]
    fn message_carries_score_and_day_label() {
        let calendar = FestivalCalendar::default();
        let date = parse_date("2025-07-15").unwrap();
        let msg = format_luck_message(LuckDay::Tomorrow, "10001", date, 93, &calendar).unwrap();
        assert!(msg.starts_with("明日人品值：93。明日人品"), "{msg}");
        assert!(!msg.contains("节日加成"));

        let again = format_luck_message(LuckDay::Tomorrow, "10001", date, 93, &calendar).unwrap();
        assert_eq!(msg, again);
    }

    #[test]
    fn festival_note_is_appended() {
        let calendar = FestivalCalendar::default();
        let date = parse_date("2025-12-25").unwrap();
        let msg = format_luck_message(LuckDay::Today, "10001", date, 42, &calendar).unwrap();
        assert!(msg.starts_with("今日人品值：42。"));
        assert!(msg.ends_with("\n节日加成：因圣诞节获得 +10 人品值！"), "{msg}");
    }

    #[test]
    fn ranking_orders_and_filters_by_date() {
        let records = vec![
            LuckRecord { user_id: "a".into(), date: "2025-01-01".into(), luck: 40 },
            LuckRecord { user_id: "b".into(), date: "2025-01-01".into(), luck: 90 },
            LuckRecord { user_id: "c".into(), date: "2024-12-31".into(), luck: 99 },
            LuckRecord { user_id: "d".into(), date: "2025-01-01".into(), luck: 90 },
        ];
        let ranked = rank_records(&records, "2025-01-01");
        let ids: Vec<&str> = ranked.iter().map(|r| r.user_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "d", "a"]);
        let text = format_ranking(&ranked, |id| id.to_uppercase());
        assert_eq!(text, "今日人品排行榜：\n1. B - 人品值：90\n2. D - 人品值：90\n3. A - 人品值：40");
    }

    #[test]
    fn history_keeps_the_last_seven_days() {
        let records: Vec<LuckRecord> = (1..=10)
            .map(|d| LuckRecord { user_id: "u".into(), date: format!("2025-03-{d:02}"), luck: d })
            .chain(std::iter::once(LuckRecord { user_id: "v".into(), date: "2025-03-09".into(), luck: 1 }))
            .collect();
        let today = parse_date("2025-03-09").unwrap();
        let history = history_records(&records, "u", today);
        let dates: Vec<&str> = history.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2025-03-09", "2025-03-08", "2025-03-07", "2025-03-06", "2025-03-05", "2025-03-04", "2025-03-03"]);
        assert!(format_history("小明", &history).starts_with("小明 最近 7 天的人品记录：\n2025-03-09 - 人品值：9\n"));
    }
}
