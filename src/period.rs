//! Periods named in commands ("resumo da semana") and the date windows they cover

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::date::{month_label, DateExt};

/// Granularity of a summary or balance query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    Week,
    Month,
}

/// Inclusive range of dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window(pub NaiveDate, pub NaiveDate);

impl Period {
    /// The window of this period that contains `date`
    ///
    /// Weeks run Monday to Sunday, months from the 1st to their last day.
    pub fn window(self, date: NaiveDate) -> Window {
        match self {
            Period::Day => Window(date, date),
            Period::Week => Window(date.start_of_week(), date.end_of_week()),
            Period::Month => Window(date.start_of_month(), date.end_of_month()),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Period::Day => "dia",
            Period::Week => "semana",
            Period::Month => "mês",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Window {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.0 <= date && date <= self.1
    }

    pub fn start(&self) -> NaiveDate {
        self.0
    }

    pub fn end(&self) -> NaiveDate {
        self.1
    }

    fn is_whole_month(&self) -> bool {
        self.0 == self.0.start_of_month() && self.1 == self.0.end_of_month()
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == self.1 {
            write!(f, "{}", self.0.format("%d/%m/%Y"))
        } else if self.is_whole_month() {
            write!(f, "{} de {}", month_label(self.0.month()), self.0.year())
        } else {
            write!(f, "{}..{}", self.0.format("%d/%m/%Y"), self.1.format("%d/%m/%Y"))
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    macro_rules! dt {
        ( $y:tt - $m:tt - $d:tt ) => {
            NaiveDate::from_ymd_opt($y, $m, $d).unwrap()
        };
    }

    #[test]
    fn windows() {
        let sat = dt!(2024-8-10);
        assert_eq!(Period::Day.window(sat), Window(sat, sat));
        assert_eq!(Period::Week.window(sat), Window(dt!(2024-8-5), dt!(2024-8-11)));
        assert_eq!(Period::Month.window(sat), Window(dt!(2024-8-1), dt!(2024-8-31)));
        assert_eq!(
            Period::Month.window(dt!(2024-2-10)),
            Window(dt!(2024-2-1), dt!(2024-2-29))
        );
    }

    #[test]
    fn windows_at_the_end_of_time() {
        let last = NaiveDate::MAX;
        let week = Period::Week.window(last);
        assert!(week.contains(last));
        assert_eq!(week.end(), last);
        assert_eq!(Period::Month.window(last).end(), last);
    }

    #[test]
    fn window_contains_its_bounds() {
        let w = Period::Week.window(dt!(2024-8-7));
        assert!(w.contains(dt!(2024-8-5)));
        assert!(w.contains(dt!(2024-8-11)));
        assert!(!w.contains(dt!(2024-8-12)));
        assert!(!w.contains(dt!(2024-8-4)));
    }

    #[test]
    fn display() {
        assert_eq!(Period::Day.window(dt!(2024-8-9)).to_string(), "09/08/2024");
        assert_eq!(Period::Month.window(dt!(2024-3-9)).to_string(), "março de 2024");
        assert_eq!(
            Period::Week.window(dt!(2024-8-9)).to_string(),
            "05/08/2024..11/08/2024"
        );
        assert_eq!(Period::Month.to_string(), "mês");
    }

    #[test]
    fn serde_names() {
        assert_eq!(serde_json::to_string(&Period::Week).unwrap(), "\"week\"");
        assert_eq!(serde_json::from_str::<Period>("\"month\"").unwrap(), Period::Month);
    }
}
