// File: ./src/model/dates.rs
//! Due-date resolution from free text.
//!
//! Grammars are tried in the fixed order of [`DateGrammar::ALL`] and the first
//! one that produces a date wins. Explicit and relative dates (numeric dates,
//! month names, weekdays, "in N days/weeks") are moved off the weekend; the
//! anchored phrases (today, tomorrow, end of week/month, next week/month) are
//! accepted as-is.
use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use strum::Display;

const MONTHS: &str = "january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sept|sep|oct|nov|dec";
const WEEKDAYS: &str = "monday|tuesday|wednesday|thursday|friday|saturday|sunday";
const AMOUNT: &str = r"\d+|an?|one|two|three|four|five|six|seven|eight|nine|ten|eleven|twelve";

const MAX_ROLL_YEARS: i32 = 8;

static TODAY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(?:today|now)\b").unwrap());
static TOMORROW: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\btomorrow\b").unwrap());
static END_OF_WEEK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:end\s+of\s+(?:the\s+)?week|by\s+friday|this\s+friday)\b").unwrap()
});
static END_OF_MONTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:end\s+of\s+(?:the\s+)?month|month[\s-]end)\b").unwrap()
});
static NEXT_WEEK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bnext\s+week\b").unwrap());
static NEXT_MONTH: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bnext\s+month\b").unwrap());
static WEEKDAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(?i)\b({})\b", WEEKDAYS)).unwrap());

// Month/day/year with a consistent separator, then ISO year-month-day.
static NUMERIC_DATES: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        Regex::new(r"\b(\d{1,2})/(\d{1,2})/(\d{4}|\d{2})\b").unwrap(),
        Regex::new(r"\b(\d{1,2})-(\d{1,2})-(\d{4}|\d{2})\b").unwrap(),
        Regex::new(r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b").unwrap(),
    ]
});
static MONTH_DAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\b({})\.?\s+(\d{{1,2}})(?:st|nd|rd|th)?\b",
        MONTHS
    ))
    .unwrap()
});
static PART_OF_MONTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\b(early|mid|late|beginning\s+of|end\s+of)[\s-]+({})\b",
        MONTHS
    ))
    .unwrap()
});
static IN_DAYS: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(?i)\bin\s+({})\s+days?\b", AMOUNT)).unwrap());
static IN_WEEKS: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(?i)\bin\s+({})\s+weeks?\b", AMOUNT)).unwrap());

/// One phrase family the resolver understands, in checking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DateGrammar {
    Today,
    Tomorrow,
    EndOfWeek,
    EndOfMonth,
    WeekdayNextWeek,
    NextWeek,
    NextMonth,
    NumericDate,
    MonthDay,
    PartOfMonth,
    Weekday,
    InDays,
    InWeeks,
}

impl DateGrammar {
    pub const ALL: [DateGrammar; 13] = [
        DateGrammar::Today,
        DateGrammar::Tomorrow,
        DateGrammar::EndOfWeek,
        DateGrammar::EndOfMonth,
        DateGrammar::WeekdayNextWeek,
        DateGrammar::NextWeek,
        DateGrammar::NextMonth,
        DateGrammar::NumericDate,
        DateGrammar::MonthDay,
        DateGrammar::PartOfMonth,
        DateGrammar::Weekday,
        DateGrammar::InDays,
        DateGrammar::InWeeks,
    ];

    /// Whether a weekend result gets pushed to the following Monday.
    pub fn avoids_weekend(&self) -> bool {
        matches!(
            self,
            DateGrammar::NumericDate
                | DateGrammar::MonthDay
                | DateGrammar::PartOfMonth
                | DateGrammar::Weekday
                | DateGrammar::InDays
                | DateGrammar::InWeeks
        )
    }

    /// Raw date for this grammar, before the weekend rule.
    pub fn apply(&self, text: &str, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            DateGrammar::Today => TODAY.is_match(text).then_some(today),
            DateGrammar::Tomorrow => {
                if TOMORROW.is_match(text) {
                    today.succ_opt()
                } else {
                    None
                }
            }
            DateGrammar::EndOfWeek => {
                if END_OF_WEEK.is_match(text) {
                    next_weekday(today, Weekday::Fri)
                } else {
                    None
                }
            }
            DateGrammar::EndOfMonth => {
                if END_OF_MONTH.is_match(text) {
                    last_day_of_month(today.year(), today.month())
                } else {
                    None
                }
            }
            DateGrammar::WeekdayNextWeek => {
                if !NEXT_WEEK.is_match(text) {
                    return None;
                }
                let target = WEEKDAY
                    .captures(text)
                    .and_then(|c| parse_weekday(&c[1]))?;
                let anchor = add_days(today, 7)?;
                let monday = add_days(anchor, -(anchor.weekday().num_days_from_monday() as i64))?;
                add_days(monday, target.num_days_from_monday() as i64)
            }
            DateGrammar::NextWeek => {
                if NEXT_WEEK.is_match(text) {
                    add_days(today, 7)
                } else {
                    None
                }
            }
            DateGrammar::NextMonth => {
                if NEXT_MONTH.is_match(text) {
                    // chrono clamps to the last valid day (May 31 -> Jun 30).
                    today.checked_add_months(Months::new(1))
                } else {
                    None
                }
            }
            DateGrammar::NumericDate => numeric_date(text),
            DateGrammar::MonthDay => {
                let caps = MONTH_DAY.captures(text)?;
                let month = parse_month(&caps[1])?;
                let day = caps[2].parse::<u32>().ok()?;
                roll_forward(today, |year| NaiveDate::from_ymd_opt(year, month, day))
            }
            DateGrammar::PartOfMonth => {
                let caps = PART_OF_MONTH.captures(text)?;
                let month = parse_month(&caps[2])?;
                let part = caps[1].to_lowercase();
                roll_forward(today, |year| {
                    if part == "mid" {
                        NaiveDate::from_ymd_opt(year, month, 15)
                    } else if part == "late" || part.starts_with("end") {
                        last_day_of_month(year, month)
                    } else {
                        NaiveDate::from_ymd_opt(year, month, 5)
                    }
                })
            }
            DateGrammar::Weekday => {
                let target = WEEKDAY
                    .captures(text)
                    .and_then(|c| parse_weekday(&c[1]))?;
                next_weekday(today, target)
            }
            DateGrammar::InDays => {
                let amount = IN_DAYS
                    .captures(text)
                    .and_then(|c| parse_amount(&c[1]))?;
                add_days(today, amount)
            }
            DateGrammar::InWeeks => {
                let amount = IN_WEEKS
                    .captures(text)
                    .and_then(|c| parse_amount(&c[1]))?;
                add_days(today, amount.checked_mul(7)?)
            }
        }
    }
}

/// Due date for `text` relative to `today`, or `None` when no phrase matches.
pub fn resolve_due_date(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    resolve_with_grammar(text, today).map(|(_, date)| date)
}

/// Like [`resolve_due_date`] but also reports which grammar produced the date.
pub fn resolve_with_grammar(text: &str, today: NaiveDate) -> Option<(DateGrammar, NaiveDate)> {
    for grammar in DateGrammar::ALL {
        if let Some(raw) = grammar.apply(text, today) {
            let date = if grammar.avoids_weekend() {
                skip_weekend(raw)
            } else {
                raw
            };
            log::trace!("date grammar {} matched: {} -> {}", grammar, raw, date);
            return Some((grammar, date));
        }
    }
    None
}

/// Saturday and Sunday move to the following Monday.
pub fn skip_weekend(date: NaiveDate) -> NaiveDate {
    let shift = match date.weekday() {
        Weekday::Sat => 2,
        Weekday::Sun => 1,
        _ => 0,
    };
    add_days(date, shift).unwrap_or(date)
}

pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

/// Next occurrence of `target` strictly after `from` (a week out when `from` is that day).
fn next_weekday(from: NaiveDate, target: Weekday) -> Option<NaiveDate> {
    let current = from.weekday().num_days_from_sunday() as i64;
    let wanted = target.num_days_from_sunday() as i64;
    let offset = match (wanted - current + 7) % 7 {
        0 => 7,
        n => n,
    };
    add_days(from, offset)
}

fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::try_days(days)?)
}

/// First date built for `today`'s year or a later one that is not in the past.
///
/// Years where the date does not exist are skipped, so February 29th lands in
/// the next leap year. A date that exists in none of them gives `None`.
fn roll_forward<F>(today: NaiveDate, build: F) -> Option<NaiveDate>
where
    F: Fn(i32) -> Option<NaiveDate>,
{
    // Leap years can be eight years apart (2096 -> 2104).
    (0..=MAX_ROLL_YEARS)
        .filter_map(|offset| today.year().checked_add(offset))
        .filter_map(&build)
        .find(|date| *date >= today)
}

fn numeric_date(text: &str) -> Option<NaiveDate> {
    let [slash, dash, iso] = &*NUMERIC_DATES;
    if let Some(date) = slash.captures(text).and_then(month_first) {
        return Some(date);
    }
    if let Some(date) = dash.captures(text).and_then(month_first) {
        return Some(date);
    }
    let caps = iso.captures(text)?;
    NaiveDate::from_ymd_opt(
        caps[1].parse().ok()?,
        caps[2].parse().ok()?,
        caps[3].parse().ok()?,
    )
}

/// `MM/DD/YYYY` captures; two-digit years are 20YY.
fn month_first(caps: Captures<'_>) -> Option<NaiveDate> {
    let month = caps[1].parse::<u32>().ok()?;
    let day = caps[2].parse::<u32>().ok()?;
    let year_str = &caps[3];
    let year = year_str.parse::<i32>().ok()?;
    let year = if year_str.len() == 2 { 2000 + year } else { year };
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_weekday(s: &str) -> Option<Weekday> {
    match s.to_lowercase().as_str() {
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

fn parse_month(s: &str) -> Option<u32> {
    match s.to_lowercase().as_str() {
        "january" | "jan" => Some(1),
        "february" | "feb" => Some(2),
        "march" | "mar" => Some(3),
        "april" | "apr" => Some(4),
        "may" => Some(5),
        "june" | "jun" => Some(6),
        "july" | "jul" => Some(7),
        "august" | "aug" => Some(8),
        "september" | "sept" | "sep" => Some(9),
        "october" | "oct" => Some(10),
        "november" | "nov" => Some(11),
        "december" | "dec" => Some(12),
        _ => None,
    }
}

fn parse_amount(s: &str) -> Option<i64> {
    match s.to_lowercase().as_str() {
        "a" | "an" | "one" => Some(1),
        "two" => Some(2),
        "three" => Some(3),
        "four" => Some(4),
        "five" => Some(5),
        "six" => Some(6),
        "seven" => Some(7),
        "eight" => Some(8),
        "nine" => Some(9),
        "ten" => Some(10),
        "eleven" => Some(11),
        "twelve" => Some(12),
        _ => s.parse::<i64>().ok(),
    }
}
