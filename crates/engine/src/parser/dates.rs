//! Date recognizers, in priority order.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use regex::{Captures, Regex};

use super::ParsedEntity;

type Resolve = fn(&Captures<'_>, NaiveDate) -> Option<NaiveDate>;

#[derive(Clone, Debug)]
pub(super) struct DateRecognizer {
    pattern: Regex,
    resolve: Resolve,
}

const TABLE: &[(&str, Resolve)] = &[
    (r"(?i)\btoday\b", same_day),
    (r"(?i)\byesterday\b", day_before),
    (r"(?i)\btomorrow\b", day_after),
    (
        r"(?i)\bnext\s+(?P<weekday>monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b",
        next_weekday,
    ),
    (
        r"\b(?P<day>[0-9]{1,2})[/-](?P<month>[0-9]{1,2})(?:[/-](?P<year>[0-9]{4}|[0-9]{2}))?\b",
        day_month_year,
    ),
];

pub(super) fn recognizers() -> Result<Vec<DateRecognizer>, regex::Error> {
    TABLE
        .iter()
        .map(|&(pattern, resolve)| {
            Ok(DateRecognizer {
                pattern: Regex::new(pattern)?,
                resolve,
            })
        })
        .collect()
}

/// First recognizer with a valid date wins; only its first match is looked at.
pub(super) fn extract(
    recognizers: &[DateRecognizer],
    text: &str,
    today: NaiveDate,
) -> Option<ParsedEntity> {
    recognizers.iter().find_map(|recognizer| {
        let caps = recognizer.pattern.captures(text)?;
        let value = (recognizer.resolve)(&caps, today)?;
        let whole = caps.get(0)?;
        Some(ParsedEntity::date(whole.as_str(), whole.range(), value))
    })
}

fn same_day(_: &Captures<'_>, today: NaiveDate) -> Option<NaiveDate> {
    Some(today)
}

fn day_before(_: &Captures<'_>, today: NaiveDate) -> Option<NaiveDate> {
    today.checked_sub_days(Days::new(1))
}

fn day_after(_: &Captures<'_>, today: NaiveDate) -> Option<NaiveDate> {
    today.checked_add_days(Days::new(1))
}

fn weekday(name: &str) -> Option<Weekday> {
    match name.to_lowercase().as_str() {
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Strictly after `today`: the same weekday means a week from now.
fn next_weekday(caps: &Captures<'_>, today: NaiveDate) -> Option<NaiveDate> {
    let target = weekday(caps.name("weekday")?.as_str())?;
    let ahead = (7 + target.num_days_from_monday() - today.weekday().num_days_from_monday()) % 7;
    let ahead = if ahead == 0 { 7 } else { ahead };
    today.checked_add_days(Days::new(u64::from(ahead)))
}

/// Day first, then month. Two digit years are in the 2000s.
fn day_month_year(caps: &Captures<'_>, today: NaiveDate) -> Option<NaiveDate> {
    let day: u32 = caps.name("day")?.as_str().parse().ok()?;
    let month: u32 = caps.name("month")?.as_str().parse().ok()?;
    let year = match caps.name("year") {
        None => today.year(),
        Some(raw) if raw.as_str().len() == 2 => 2000 + raw.as_str().parse::<i32>().ok()?,
        Some(raw) => raw.as_str().parse().ok()?,
    };
    NaiveDate::from_ymd_opt(year, month, day)
}
