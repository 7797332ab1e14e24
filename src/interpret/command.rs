//! Requests that are not transactions
//!
//! A command is recognized by the presence of its keywords anywhere in the
//! message, regardless of the surrounding words. When a message could be read
//! as several commands ("resumo do saldo") the fixed order undo > balance >
//! summary decides.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::interpret::normalize::Normalized;
use crate::lexicon::Lexicon;
use crate::period::{Period, Window};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum CommandRequest {
    Summary { period: Period },
    Balance { period: Period },
    UndoLast,
}

impl CommandRequest {
    /// Dates a summary or balance should aggregate over
    pub fn window(self, reference: NaiveDate) -> Option<Window> {
        match self {
            Self::Summary { period } | Self::Balance { period } => Some(period.window(reference)),
            Self::UndoLast => None,
        }
    }
}

impl fmt::Display for CommandRequest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Summary { period } => write!(f, "resumo ({})", period),
            Self::Balance { period } => write!(f, "saldo ({})", period),
            Self::UndoLast => write!(f, "desfazer último"),
        }
    }
}

pub fn recognize(norm: &Normalized, lexicon: &Lexicon) -> Option<CommandRequest> {
    let words = norm
        .text()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>();
    let has = |list: &[String]| words.iter().any(|w| list.iter().any(|k| k == w));
    let period = || words.iter().find_map(|w| lexicon.periods.lookup(w));
    let cmd = &lexicon.commands;
    if has(&cmd.undo) && has(&cmd.last) {
        Some(CommandRequest::UndoLast)
    } else if has(&cmd.balance) {
        Some(CommandRequest::Balance {
            period: period().unwrap_or(cmd.balance_default),
        })
    } else if has(&cmd.summary) {
        Some(CommandRequest::Summary {
            period: period().unwrap_or(cmd.summary_default),
        })
    } else {
        None
    }
}
