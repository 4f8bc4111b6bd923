//! Age, delivery-date and elapsed-time arithmetic.
//!
//! Every function takes the reference instant ("now" or "today") as an
//! argument so callers (and tests) control the clock.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use std::fmt;

/// Gestation length used to derive the expected delivery date: 40 weeks.
const GESTATION_DAYS: i64 = 280;

/// An age expressed as whole years plus leftover months.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AgeBreakdown {
    pub years: u32,
    pub months: u32,
}

impl fmt::Display for AgeBreakdown {
    /// Render rule: under a year shows months only, an exact year count
    /// drops the months part, and "year" pluralises only above one.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year_suffix = if self.years > 1 { "s" } else { "" };
        if self.years == 0 {
            write!(f, "{} months", self.months)
        } else if self.months == 0 {
            write!(f, "{} year{}", self.years, year_suffix)
        } else {
            write!(f, "{} year{}, {} months", self.years, year_suffix, self.months)
        }
    }
}

/// Whole months between a birth date and today, by calendar-month delta.
///
/// A future `dob` clamps to zero; entry validation is expected to reject it
/// upstream, so the clamp only guards stored data.
pub fn age_in_months(dob: NaiveDate, today: NaiveDate) -> u32 {
    let months = (today.year() - dob.year()) * 12 + today.month() as i32 - dob.month() as i32;
    months.max(0) as u32
}

/// Split an age into whole years and leftover months.
pub fn age_breakdown(dob: NaiveDate, today: NaiveDate) -> AgeBreakdown {
    let months = age_in_months(dob, today);
    AgeBreakdown {
        years: months / 12,
        months: months % 12,
    }
}

/// Expected delivery date: last menstrual period plus 280 days.
pub fn estimated_delivery_date(lmp: NaiveDate) -> NaiveDate {
    lmp + Duration::days(GESTATION_DAYS)
}

/// Compact elapsed-time string: "12m ago", "3h ago", "5d ago".
///
/// A `from` in the future clamps to "0m ago".
pub fn relative_time(from: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - from).num_minutes().max(0);
    if minutes < 60 {
        return format!("{}m ago", minutes);
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h ago", hours);
    }
    format!("{}d ago", hours / 24)
}

/// Short display form for dates: "6 Aug 2026".
pub fn display_date(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

/// Like [`display_date`], with the placeholder the visit surfaces show for
/// an unscheduled date.
pub fn display_date_opt(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => display_date(date),
        None => "Not scheduled".to_string(),
    }
}
