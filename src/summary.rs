//! Totals of recorded transactions over a window of dates

use rust_decimal::Decimal;
use serde::Serialize;
use std::ops;

use crate::entry::{format_brl, Kind, TransactionRecord};
use crate::period::Window;

/// Totals per kind over a window of dates
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    window: Window,
    expense: Decimal,
    income: Decimal,
    investment: Decimal,
    count: usize,
}

impl Summary {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            expense: Decimal::ZERO,
            income: Decimal::ZERO,
            investment: Decimal::ZERO,
            count: 0,
        }
    }

    /// Summarize every record of `records` that falls in `window`
    pub fn over<'r, I>(window: Window, records: I) -> Self
    where
        I: IntoIterator<Item = &'r TransactionRecord>,
    {
        let mut sum = Self::new(window);
        for rec in records {
            sum += rec;
        }
        sum
    }

    pub fn window(&self) -> Window {
        self.window
    }

    pub fn query(&self, kind: Kind) -> Decimal {
        match kind {
            Kind::Expense => self.expense,
            Kind::Income => self.income,
            Kind::Investment => self.investment,
        }
    }

    /// Income minus expenses; investments are not counted
    pub fn balance(&self) -> Decimal {
        self.income - self.expense
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

impl ops::AddAssign<&TransactionRecord> for Summary {
    fn add_assign(&mut self, rec: &TransactionRecord) {
        if !self.window.contains(rec.date) {
            return;
        }
        let add = rec.amount.value();
        match rec.kind {
            Kind::Expense => self.expense += add,
            Kind::Income => self.income += add,
            Kind::Investment => self.investment += add,
        }
        self.count += 1;
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: ganhos {}, gastos {}, investimentos {}, saldo {}",
            self.window,
            format_brl(self.income),
            format_brl(self.expense),
            format_brl(self.investment),
            format_brl(self.balance()),
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::entry::{Amount, Origin};
    use crate::period::Period;
    use chrono::NaiveDate;

    fn rec(kind: Kind, cents: i64, day: u32) -> TransactionRecord {
        TransactionRecord {
            kind,
            amount: Amount::from_cents(cents).unwrap(),
            date: NaiveDate::from_ymd_opt(2024, 8, day).unwrap(),
            category: None,
            description: None,
            origin: Origin::Parsed,
        }
    }

    #[test]
    fn totals_inside_window_only() {
        let records = vec![
            rec(Kind::Income, 150000, 5),
            rec(Kind::Expense, 3790, 9),
            rec(Kind::Investment, 20000, 10),
            rec(Kind::Expense, 1000, 12),
        ];
        let week = Period::Week.window(NaiveDate::from_ymd_opt(2024, 8, 10).unwrap());
        let sum = Summary::over(week, &records);
        assert_eq!(sum.count(), 3);
        assert_eq!(sum.query(Kind::Income), Decimal::new(150000, 2));
        assert_eq!(sum.query(Kind::Expense), Decimal::new(3790, 2));
        assert_eq!(sum.query(Kind::Investment), Decimal::new(20000, 2));
        assert_eq!(sum.balance(), Decimal::new(146210, 2));
    }

    #[test]
    fn display() {
        let day = Period::Day.window(NaiveDate::from_ymd_opt(2024, 8, 9).unwrap());
        let sum = Summary::over(day, &[rec(Kind::Expense, 3790, 9)]);
        assert_eq!(
            sum.to_string(),
            "09/08/2024: ganhos R$ 0,00, gastos R$ 37,90, investimentos R$ 0,00, saldo -R$ 37,90"
        );
    }
}
