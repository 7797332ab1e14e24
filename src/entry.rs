//! Transaction records produced from chat messages

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A strictly positive amount of money with exactly two fractional digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    /// Largest accepted value, one trillion reais
    pub const MAX: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

    /// Round half-up to cents, rejecting anything that is not strictly positive
    /// once rounded or that exceeds `Amount::MAX`
    pub fn new(value: Decimal) -> Option<Self> {
        if value > Self::MAX {
            return None;
        }
        let mut cents = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        cents.rescale(2);
        if cents > Decimal::ZERO && cents.scale() == 2 {
            Some(Self(cents))
        } else {
            None
        }
    }

    pub fn from_cents(cents: i64) -> Option<Self> {
        Self::new(Decimal::new(cents, 2))
    }

    pub fn value(self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = String;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("{} is not a positive amount", value))
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Decimal {
        amount.0
    }
}

/// Format as Brazilian currency: `R$ 1.234,56`, with a leading `-` if negative
pub fn format_brl(value: Decimal) -> String {
    let mut value = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    value.rescale(2);
    let text = value.abs().to_string();
    let (int, frac) = text.split_once('.').unwrap_or((&text, "00"));
    let mut grouped = String::new();
    for (i, c) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    let sign = if value.is_sign_negative() && !value.is_zero() { "-" } else { "" };
    format!("{}R$ {},{}", sign, grouped, frac)
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_brl(self.0))
    }
}

/// Classification of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Expense,
    Income,
    Investment,
}

impl Kind {
    pub const ALL: [Kind; 3] = [Kind::Expense, Kind::Income, Kind::Investment];

    /// How the chat interface names this kind
    pub fn label(self) -> &'static str {
        match self {
            Kind::Expense => "gasto",
            Kind::Income => "ganho",
            Kind::Investment => "investimento",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Where a record comes from. Only parsing creates records here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    #[default]
    Parsed,
}

/// A single validated transaction, ready to be stored for a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub kind: Kind,
    pub amount: Amount,
    pub date: NaiveDate,
    pub category: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub origin: Origin,
}

impl fmt::Display for TransactionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} de {} em {}", self.kind, self.amount, self.date.format("%d/%m/%Y"))?;
        if let Some(desc) = &self.description {
            write!(f, " ({})", desc)?;
        }
        if let Some(cat) = &self.category {
            write!(f, " [{}]", cat)?;
        }
        Ok(())
    }
}
