//! fortune-runner: headless front end for the seeded daily draws.
//!
//! Usage:
//!   fortune-runner --user 10001
//!   fortune-runner --user 10001 --date 2025-04-01 --tomorrow --json
//!   fortune-runner --seed user1202501011 --draws 5 --bias moderate_up
//!   fortune-runner --user 10001 --config fortune.json

use anyhow::Result;
use chrono::NaiveDate;
use fortune_core::{
    bias::Bias,
    clock::{format_date, next_day, parse_date},
    config::FortuneConfig,
    fortune::{backup_image_number, calculate_fortune, FortuneData},
    generator::random_stream,
    luck::{calculate_luck, format_luck_message, LuckDay, LuckOutcome},
};
use std::env;

#[derive(serde::Serialize)]
struct DailyReport<'a> {
    user_id: &'a str,
    date: String,
    day: LuckDay,
    luck: LuckOutcome,
    luck_message: String,
    fortune: FortuneData,
    backup_image: i64,
}

#[derive(serde::Serialize)]
struct StreamReport<'a> {
    seed: &'a str,
    algorithm: String,
    bias: String,
    draws: Vec<f64>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let json = has_flag(&args, "--json");

    let mut config = match arg_value(&args, "--config") {
        Some(path) => FortuneConfig::load(path)?,
        None => FortuneConfig::default(),
    };
    if let Some(bias) = arg_value(&args, "--bias") {
        config.random.bias = Bias::parse(bias);
    }
    if let Some(name) = arg_value(&args, "--algorithm") {
        config.random.algorithm = name.parse()?;
    }

    if let Some(seed) = arg_value(&args, "--seed") {
        let draws = parse_arg(&args, "--draws", 1usize);
        return print_stream(&config, seed, draws, json);
    }

    let user_id = arg_value(&args, "--user").unwrap_or("10001");
    let day = if has_flag(&args, "--tomorrow") { LuckDay::Tomorrow } else { LuckDay::Today };
    let clock = config.clock();
    let date = match (arg_value(&args, "--date"), day) {
        (Some(value), LuckDay::Today) => parse_date(value)?,
        (Some(value), LuckDay::Tomorrow) => next_day(parse_date(value)?),
        (None, LuckDay::Today) => clock.today(),
        (None, LuckDay::Tomorrow) => clock.tomorrow(),
    };

    let report = build_report(&config, user_id, date, day)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn build_report<'a>(
    config: &FortuneConfig,
    user_id: &'a str,
    date: NaiveDate,
    day: LuckDay,
) -> Result<DailyReport<'a>> {
    let calendar = config.calendar();
    let luck = calculate_luck(user_id, date, &calendar, &config.random)?;
    let luck_message = format_luck_message(day, user_id, date, luck.luck, &calendar)?;
    let fortune = calculate_fortune(user_id, date, config)?;
    let backup_image = backup_image_number(fortune.random_num)?;
    log::info!("report built for {user_id} on {date}");

    Ok(DailyReport {
        user_id,
        date: format_date(date),
        day,
        luck,
        luck_message,
        fortune,
        backup_image,
    })
}

fn print_stream(config: &FortuneConfig, seed: &str, draws: usize, json: bool) -> Result<()> {
    let values = random_stream(seed, &config.random, draws)?;
    if json {
        let report = StreamReport {
            seed,
            algorithm: config.random.algorithm.to_string(),
            bias: config.random.bias.to_string(),
            draws: values,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("=== STREAM ===");
    println!("  seed:       {seed}");
    println!("  algorithm:  {}", config.random.algorithm);
    println!("  bias:       {}", config.random.bias);
    for (i, x) in values.iter().enumerate() {
        println!("  [{i:>3}] {x:.17}");
    }
    Ok(())
}

fn print_report(report: &DailyReport<'_>) {
    println!("=== LUCK ({}) ===", report.date);
    println!("  user:     {}", report.user_id);
    println!("  base:     {}", report.luck.base);
    println!("  bonus:    {}", report.luck.bonus.bonus);
    println!("  luck:     {}", report.luck.luck);
    println!();
    println!("{}", report.luck_message);
    println!();

    let f = &report.fortune;
    println!("=== FORTUNE ({}) ===", f.solar_date);
    println!("  score:         {}", f.score);
    println!("  lucky number:  {}", f.lucky_number);
    println!("  lucky color:   {} ({})", f.lucky_color, f.lucky_color_value);
    println!("  picture seed:  {}", f.random_num);
    println!("  backup image:  {}", report.backup_image);
    println!("  sentence:      {} ({})", f.sentence, f.sentence_from);
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
