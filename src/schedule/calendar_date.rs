//! Calendar-day arithmetic on `YYYY-MM-DD` values
//!
//! `CalendarDate` carries no time-of-day and no timezone. All arithmetic is
//! in whole proleptic Gregorian days, so no DST or offset effect can leak
//! into phase ranges.

use crate::error::{ScheduleError, ScheduleResult};
use chrono::{Datelike, Duration, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Earliest year accepted by `parse_day`
pub const MIN_YEAR: i32 = 1900;
/// Latest year accepted by `parse_day`
pub const MAX_YEAR: i32 = 2100;

/// A timezone-less calendar day.
///
/// Ordering is chronological and matches the lexicographic order of the
/// ISO form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Build a day from its components, rejecting impossible dates and
    /// years outside `MIN_YEAR..=MAX_YEAR`.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> ScheduleResult<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(ScheduleError::InvalidDateFormat(format!(
                "{:04}-{:02}-{:02}",
                year, month, day
            )));
        }
        NaiveDate::from_ymd_opt(year, month, day)
            .map(CalendarDate)
            .ok_or_else(|| {
                ScheduleError::InvalidDateFormat(format!("{:04}-{:02}-{:02}", year, month, day))
            })
    }

    /// Today's date as seen in UTC
    pub fn today() -> Self {
        CalendarDate(Utc::now().date_naive())
    }

    /// Whether the year is within `MIN_YEAR..=MAX_YEAR`, i.e. the day
    /// survives a round trip through `parse_day`
    pub fn is_supported(&self) -> bool {
        (MIN_YEAR..=MAX_YEAR).contains(&self.0.year())
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    /// Always `YYYY-MM-DD`, zero-padded
    pub fn to_iso(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.0.year(), self.0.month(), self.0.day())
    }

    /// Short human form used in conflict messages, e.g. `10 Jun 2025`
    pub fn to_display(&self) -> String {
        self.0.format("%d %b %Y").to_string()
    }

    /// Shift by `days` whole calendar days (negative goes backwards).
    ///
    /// Saturates at chrono's representable bounds instead of panicking.
    pub fn add_days(&self, days: i64) -> Self {
        let shifted = Duration::try_days(days).and_then(|delta| self.0.checked_add_signed(delta));
        match shifted {
            Some(d) => CalendarDate(d),
            None if days < 0 => CalendarDate(NaiveDate::MIN),
            None => CalendarDate(NaiveDate::MAX),
        }
    }

    /// Whole days from `self` to `other` (positive when `other` is later)
    pub fn days_until(&self, other: CalendarDate) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// 0 = Sunday ... 6 = Saturday
    pub fn day_of_week(&self) -> u32 {
        self.0.weekday().num_days_from_sunday()
    }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn start_of_month(&self) -> Self {
        CalendarDate(self.0 - Duration::days(i64::from(self.0.day0())))
    }

    pub fn end_of_month(&self) -> Self {
        // Any month is at most 31 days, so start + 32 always lands in the next one.
        let next_month = self.start_of_month().add_days(32).start_of_month();
        next_month.add_days(-1)
    }

    /// Pad backwards to the first day of the week containing `self`.
    pub fn start_of_calendar_grid(&self, week_start: Weekday) -> Self {
        let offset = days_after_week_start(self.0.weekday(), week_start);
        self.add_days(-i64::from(offset))
    }

    /// Pad forwards to the last day of the week containing `self`.
    pub fn end_of_calendar_grid(&self, week_start: Weekday) -> Self {
        let offset = 6 - days_after_week_start(self.0.weekday(), week_start);
        self.add_days(i64::from(offset))
    }
}

/// Position of `day` within a week starting on `week_start` (0..=6)
fn days_after_week_start(day: Weekday, week_start: Weekday) -> u32 {
    (7 + day.num_days_from_monday() - week_start.num_days_from_monday()) % 7
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso())
    }
}

impl FromStr for CalendarDate {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_day(s)
    }
}

impl TryFrom<String> for CalendarDate {
    type Error = ScheduleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_day(&value)
    }
}

impl From<CalendarDate> for String {
    fn from(value: CalendarDate) -> Self {
        value.to_iso()
    }
}

/// Parse a strict `YYYY-MM-DD` string.
///
/// Rejects anything that is not exactly four digits, dash, two digits,
/// dash, two digits, as well as impossible dates and years outside
/// `MIN_YEAR..=MAX_YEAR`.
pub fn parse_day(iso: &str) -> ScheduleResult<CalendarDate> {
    let invalid = || ScheduleError::InvalidDateFormat(iso.to_string());

    let bytes = iso.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(invalid());
    }

    let year: i32 = iso[0..4].parse().map_err(|_| invalid())?;
    let month: u32 = iso[5..7].parse().map_err(|_| invalid())?;
    let day: u32 = iso[8..10].parse().map_err(|_| invalid())?;

    CalendarDate::from_ymd(year, month, day).map_err(|_| invalid())
}

/// `add_days` on the ISO form. Fails when the result could not be parsed back.
pub fn add_days_iso(iso: &str, days: i64) -> ScheduleResult<String> {
    let shifted = parse_day(iso)?.add_days(days);
    if !shifted.is_supported() {
        return Err(ScheduleError::OutOfRange(shifted.to_iso()));
    }
    Ok(shifted.to_iso())
}

/// Every day from `start` to `end`, inclusive and ascending.
///
/// Empty when `start > end`.
pub fn each_day(start: CalendarDate, end: CalendarDate) -> Vec<CalendarDate> {
    if start > end {
        return Vec::new();
    }
    let mut days = Vec::with_capacity((start.days_until(end) + 1) as usize);
    let mut current = start;
    while current <= end {
        days.push(current);
        if current.0 == NaiveDate::MAX {
            break;
        }
        current = current.add_days(1);
    }
    days
}

/// Inclusive containment on ISO strings.
///
/// Plain string comparison is correct here because zero-padded
/// `YYYY-MM-DD` sorts the same way as the dates it encodes.
pub fn is_between_inclusive(iso: &str, start_iso: &str, end_iso: &str) -> bool {
    start_iso <= iso && iso <= end_iso
}
