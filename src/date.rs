//! Day-precise calendar helpers, with a focus on what users type in chat
//!
//! Dates are plain `chrono::NaiveDate`. This module adds what chrono does not
//! know about: validating a `dd/mm/yyyy` typed by a person (and telling them
//! how to fix it), the Portuguese names of months and weekdays, and jumping to
//! the boundaries of a week or month.

use chrono::{Datelike, Duration, Month, NaiveDate, Weekday};
use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ways in which a date taken from user input can be wrong
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum DateError {
    /// year is outside of 1000..=9999
    UnsupportedYear { year: i32 },
    /// month outside of 1..=12
    InvalidMonth { month: u32 },
    /// day outside of 1..=31
    InvalidDay { day: u32 },
    /// Feb 29 of a non-leap year
    NotBissextile { year: i32 },
    /// Feb 30 or Feb 31 or 31st day of a 30-day month
    MonthTooShort { month: u32, day: u32 },
}

/// Validate year-month-day into a date
///
/// Checks are ordered so that the reported error is the most helpful one:
/// a day of 45 is reported as an invalid day even in an invalid month.
pub fn calendar(year: i32, month: u32, day: u32) -> Result<NaiveDate, DateError> {
    if !(1000..=9999).contains(&year) {
        return Err(DateError::UnsupportedYear { year });
    }
    if day == 0 || day > 31 {
        return Err(DateError::InvalidDay { day });
    }
    if month == 0 || month > 12 {
        return Err(DateError::InvalidMonth { month });
    }
    if day <= days_in_month(year, month) {
        NaiveDate::from_ymd_opt(year, month, day).ok_or(DateError::InvalidDay { day })
    } else if day >= 30 {
        Err(DateError::MonthTooShort { month, day })
    } else {
        Err(DateError::NotBissextile { year })
    }
}

/// Number of days in `month` (1-based) of the given year
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap(year) => 29,
        2 => 28,
        _ => 0,
    }
}

fn is_leap(year: i32) -> bool {
    if year % 400 == 0 {
        true
    } else if year % 100 == 0 {
        false
    } else {
        year % 4 == 0
    }
}

/// Full names first, then the usual three-letter abbreviations.
/// Accents are already folded.
const MONTH_NAMES: [(&str, &str); 12] = [
    ("janeiro", "jan"),
    ("fevereiro", "fev"),
    ("marco", "mar"),
    ("abril", "abr"),
    ("maio", "mai"),
    ("junho", "jun"),
    ("julho", "jul"),
    ("agosto", "ago"),
    ("setembro", "set"),
    ("outubro", "out"),
    ("novembro", "nov"),
    ("dezembro", "dez"),
];

/// Parse a month from its full folded Portuguese name (`"agosto"`, `"marco"`, ...)
pub fn month_from_name(name: &str) -> Option<Month> {
    let idx = MONTH_NAMES.iter().position(|(full, _)| *full == name)?;
    Month::from_usize(idx + 1)
}

/// Parse a month from its three-letter abbreviation (`"ago"`, `"set"`, ...)
///
/// Several of these are ordinary words ("mar", "set", "out"), callers
/// should require more context before trusting a match.
pub fn month_from_abbreviation(name: &str) -> Option<Month> {
    let idx = MONTH_NAMES.iter().position(|(_, short)| *short == name)?;
    Month::from_usize(idx + 1)
}

/// Display name of a 1-based month number
pub fn month_label(month: u32) -> &'static str {
    const LABELS: [&str; 12] = [
        "janeiro", "fevereiro", "março", "abril", "maio", "junho", "julho", "agosto", "setembro",
        "outubro", "novembro", "dezembro",
    ];
    month
        .checked_sub(1)
        .and_then(|i| LABELS.get(i as usize))
        .copied()
        .unwrap_or("?")
}

/// Weekday names as they appear once folded, Monday first.
/// The `-feira` suffix is optional and handled by the caller.
const WEEKDAY_NAMES: [(&str, Weekday); 7] = [
    ("segunda", Weekday::Mon),
    ("terca", Weekday::Tue),
    ("quarta", Weekday::Wed),
    ("quinta", Weekday::Thu),
    ("sexta", Weekday::Fri),
    ("sabado", Weekday::Sat),
    ("domingo", Weekday::Sun),
];

/// Parse a weekday from its folded name, with or without the `-feira` suffix
pub fn weekday_from_name(name: &str) -> Option<Weekday> {
    let name = name.strip_suffix("-feira").unwrap_or(name);
    WEEKDAY_NAMES
        .iter()
        .find(|(label, _)| *label == name)
        .map(|(_, wd)| *wd)
}

/// Jumps and boundaries used to resolve relative expressions and period windows
pub trait DateExt: Sized {
    /// `count` days before/after current date, stopping at the edges of the
    /// representable range
    fn jump_day(self, count: i64) -> Self;
    /// Most recent `wd` on or before the current date
    fn last_weekday(self, wd: Weekday) -> Self;
    /// First Monday on or before the current date
    fn start_of_week(self) -> Self;
    /// First Sunday on or after the current date
    fn end_of_week(self) -> Self;
    /// Get date of the first day of the current month
    fn start_of_month(self) -> Self;
    /// Get date of the last day of the current month
    fn end_of_month(self) -> Self;
}

impl DateExt for NaiveDate {
    fn jump_day(self, count: i64) -> Self {
        match Duration::try_days(count).and_then(|d| self.checked_add_signed(d)) {
            Some(date) => date,
            None if count < 0 => NaiveDate::MIN,
            None => NaiveDate::MAX,
        }
    }

    fn last_weekday(self, wd: Weekday) -> Self {
        let back = (7 + self.weekday().num_days_from_monday() - wd.num_days_from_monday()) % 7;
        self.jump_day(-(back as i64))
    }

    fn start_of_week(self) -> Self {
        self.last_weekday(Weekday::Mon)
    }

    fn end_of_week(self) -> Self {
        self.start_of_week().jump_day(6)
    }

    fn start_of_month(self) -> Self {
        self.with_day(1).unwrap_or(self)
    }

    fn end_of_month(self) -> Self {
        self.with_day(days_in_month(self.year(), self.month()))
            .unwrap_or(self)
    }
}

impl fmt::Display for DateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use DateError::*;
        match self {
            UnsupportedYear { year } => {
                write!(f, "{} is outside of the supported range for years", year)
            }
            InvalidMonth { month } => write!(f, "{} is not a valid month", month),
            InvalidDay { day } => write!(f, "{} is not a valid day", day),
            NotBissextile { year } => {
                write!(f, "{} is not bissextile, Feb 29 does not exist", year)
            }
            MonthTooShort { month, day } => write!(
                f,
                "{} is a short month, it does not have a {}th day",
                month_label(*month),
                day,
            ),
        }
    }
}

impl std::error::Error for DateError {}

impl DateError {
    /// What message to show to help fix the date error
    pub fn fix_hint(self) -> String {
        use DateError::*;
        match self {
            UnsupportedYear { .. } => "year should be between 1000 and 9999 inclusive".to_string(),
            InvalidMonth { month } => format!("{} is not in the range 1 ..= 12", month),
            InvalidDay { day } => format!("{} is not in the range 1 ..= 31", day),
            NotBissextile { year } => format!("did you mean 28/02/{y} or 01/03/{y} ?", y = year),
            MonthTooShort { month, .. } => format!(
                "{} is at most {} days long",
                month_label(month),
                if month == 2 { 29 } else { 30 }
            ),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    macro_rules! ok {
        ( $y:tt - $m:tt - $d:tt ) => {
            assert_eq!(
                calendar($y, $m, $d),
                Ok(NaiveDate::from_ymd_opt($y, $m, $d).unwrap())
            );
        };
    }
    macro_rules! short {
        ( $y:tt - $m:tt - $d:tt ) => {
            assert_eq!(
                calendar($y, $m, $d),
                Err(DateError::MonthTooShort { month: $m, day: $d })
            );
        };
    }
    macro_rules! nbiss {
        ( $y:tt - $m:tt - $d:tt ) => {
            assert_eq!(calendar($y, $m, $d), Err(DateError::NotBissextile { year: $y }));
        };
    }
    macro_rules! invalid {
        ( $y:tt - $m:tt - $d:tt ) => {
            assert_eq!(calendar($y, $m, $d), Err(DateError::InvalidDay { day: $d }));
        };
    }

    macro_rules! dt {
        ( $y:tt - $m:tt - $d:tt ) => {
            NaiveDate::from_ymd_opt($y, $m, $d).unwrap()
        };
    }

    #[test]
    fn long_months() {
        ok!(2024-1-31);
        ok!(2024-3-31);
        short!(2024-4-31);
        ok!(2024-5-31);
        short!(2024-6-31);
        ok!(2024-8-31);
        short!(2024-9-31);
        short!(2024-11-31);
        ok!(2024-12-31);
    }

    #[test]
    fn normal_days() {
        invalid!(2024-12-45);
        invalid!(2024-1-32);
        invalid!(2024-1-0);
        ok!(2024-3-20);
    }

    #[test]
    fn february() {
        short!(2024-2-31);
        short!(2024-2-30);
        ok!(2024-2-29);
        nbiss!(2023-2-29);
        ok!(2023-2-28);
        nbiss!(2100-2-29);
        ok!(2000-2-29);
    }

    #[test]
    fn bad_month_and_year() {
        assert_eq!(calendar(2024, 13, 5), Err(DateError::InvalidMonth { month: 13 }));
        assert_eq!(calendar(2024, 0, 5), Err(DateError::InvalidMonth { month: 0 }));
        assert_eq!(calendar(24, 8, 5), Err(DateError::UnsupportedYear { year: 24 }));
    }

    #[test]
    fn hints_are_readable() {
        assert_eq!(
            DateError::MonthTooShort { month: 4, day: 31 }.fix_hint(),
            "abril is at most 30 days long"
        );
        assert_eq!(
            DateError::NotBissextile { year: 2023 }.fix_hint(),
            "did you mean 28/02/2023 or 01/03/2023 ?"
        );
        assert_eq!(
            DateError::MonthTooShort { month: 4, day: 31 }.to_string(),
            "abril is a short month, it does not have a 31th day"
        );
    }

    #[test]
    fn month_names() {
        assert_eq!(month_from_name("agosto"), Some(Month::August));
        assert_eq!(month_from_name("marco"), Some(Month::March));
        assert_eq!(month_from_name("ago"), None);
        assert_eq!(month_from_name("agostinho"), None);
        assert_eq!(month_from_abbreviation("ago"), Some(Month::August));
        assert_eq!(month_from_abbreviation("dez"), Some(Month::December));
        assert_eq!(month_from_abbreviation("dezembro"), None);
        assert_eq!(month_label(3), "março");
        assert_eq!(month_label(0), "?");
    }

    #[test]
    fn weekday_names() {
        assert_eq!(weekday_from_name("terca"), Some(Weekday::Tue));
        assert_eq!(weekday_from_name("sexta-feira"), Some(Weekday::Fri));
        assert_eq!(weekday_from_name("sabado"), Some(Weekday::Sat));
        assert_eq!(weekday_from_name("feira"), None);
    }

    #[test]
    fn last_weekday() {
        // 2024-08-10 is a Saturday
        let sat = dt!(2024-8-10);
        assert_eq!(sat.last_weekday(Weekday::Sat), sat);
        assert_eq!(sat.last_weekday(Weekday::Fri), dt!(2024-8-9));
        assert_eq!(sat.last_weekday(Weekday::Mon), dt!(2024-8-5));
        assert_eq!(sat.last_weekday(Weekday::Sun), dt!(2024-8-4));
    }

    #[test]
    fn time_boundaries() {
        assert_eq!(dt!(2024-3-26).start_of_month(), dt!(2024-3-1));
        assert_eq!(dt!(2024-2-12).end_of_month(), dt!(2024-2-29));
        assert_eq!(dt!(2024-8-7).start_of_week(), dt!(2024-8-5));
        assert_eq!(dt!(2024-8-7).end_of_week(), dt!(2024-8-11));
        assert_eq!(dt!(2024-8-5).start_of_week(), dt!(2024-8-5));
        assert_eq!(dt!(2024-8-11).end_of_week(), dt!(2024-8-11));
    }

    #[test]
    fn jump_day() {
        assert_eq!(dt!(2024-3-1).jump_day(-1), dt!(2024-2-29));
        assert_eq!(dt!(2024-12-31).jump_day(1), dt!(2025-1-1));
        assert_eq!(NaiveDate::MAX.jump_day(1), NaiveDate::MAX);
        assert_eq!(NaiveDate::MIN.jump_day(-2), NaiveDate::MIN);
        assert_eq!(NaiveDate::MIN.start_of_week(), NaiveDate::MIN);
    }
}
