//! From a chat message to a transaction or a command
//!
//! The message is normalized then checked for a command first. Anything that
//! is not a command is read as a transaction: the date, the amount, the kind
//! and what remains as description are extracted in that order, each step
//! claiming the tokens it used so that later steps ignore them. All steps run
//! even after a failure so that every problem can be reported at once.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use tracing::{debug, trace, warn};

pub mod amount;
pub mod command;
pub mod describe;
pub mod error;
pub mod kind;
pub mod normalize;
pub mod parse;
pub mod when;

pub use command::CommandRequest;

use crate::date::DateError;
use crate::entry::{Origin, TransactionRecord};
use crate::lexicon::Lexicon;

/// A message to interpret, as received from the chat
///
/// `user` is carried along for the caller and never inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message<U> {
    pub text: String,
    pub reference: NaiveDateTime,
    pub user: U,
}

impl<U> Message<U> {
    pub fn new<S: Into<String>>(text: S, reference: NaiveDateTime, user: U) -> Self {
        Self {
            text: text.into(),
            reference,
            user,
        }
    }
}

/// Why a field of a transaction could not be filled
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum FieldError {
    #[error("empty message")]
    Empty,
    #[error("no amount found")]
    AmountMissing,
    #[error("transaction type not recognized")]
    TypeUnknown,
    /// `at` is a byte range of the original text
    #[error("invalid date at {}..{}: {reason}", .at.start, .at.end)]
    DateInvalid { at: Range<usize>, reason: DateError },
}

/// A message that is neither a command nor a complete transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unrecognized {
    pub text: String,
    pub failures: Vec<FieldError>,
}

impl fmt::Display for Unrecognized {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "not understood: {:?}", self.text)?;
        for (i, failure) in self.failures.iter().enumerate() {
            write!(f, "{} {}", if i == 0 { ":" } else { "," }, failure)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "value", rename_all = "snake_case")]
pub enum Interpretation {
    Transaction(TransactionRecord),
    Command(CommandRequest),
    Unrecognized(Unrecognized),
}

impl Interpretation {
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

/// Tokens already used by an extractor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claims(Vec<bool>);

impl Claims {
    pub fn new(len: usize) -> Self {
        Self(vec![false; len])
    }

    pub fn is_claimed(&self, idx: usize) -> bool {
        self.0.get(idx).copied().unwrap_or(false)
    }

    pub fn claim(&mut self, idxs: &[usize]) {
        for &idx in idxs {
            if let Some(c) = self.0.get_mut(idx) {
                *c = true;
            }
        }
    }
}

/// Interprets messages against a fixed lexicon
///
/// Holds no state besides the lexicon: one instance can serve any number of
/// users and threads.
#[derive(Debug, Clone, Default)]
pub struct Interpreter {
    lexicon: Lexicon,
}

impl Interpreter {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn interpret<U>(&self, msg: &Message<U>) -> Interpretation {
        interpret(&msg.text, msg.reference, &self.lexicon)
    }
}

/// Interpret `text` as if sent at `reference`
pub fn interpret(text: &str, reference: NaiveDateTime, lexicon: &Lexicon) -> Interpretation {
    let norm = normalize::normalize(text);
    if norm.is_empty() {
        debug!("empty message");
        return Interpretation::Unrecognized(Unrecognized {
            text: text.to_string(),
            failures: vec![FieldError::Empty],
        });
    }
    if let Some(cmd) = command::recognize(&norm, lexicon) {
        debug!(?cmd, "command recognized");
        return Interpretation::Command(cmd);
    }
    let tokens = match parse::tokenize(&norm) {
        Ok(tokens) => tokens,
        Err(err) => {
            warn!("tokenizer rejected {:?}: {}", norm.text(), err);
            Vec::new()
        }
    };
    trace!(?tokens, "tokenized");
    transaction(text, &norm, &tokens, reference.date(), lexicon)
}

fn transaction(
    text: &str,
    norm: &normalize::Normalized,
    tokens: &[parse::Token],
    today: NaiveDate,
    lexicon: &Lexicon,
) -> Interpretation {
    let mut claims = Claims::new(tokens.len());
    let mut failures = Vec::new();

    let date = match when::resolve(tokens, today, lexicon) {
        Ok(cue) => {
            debug!(date = %cue.date, rule = ?cue.rule, "date resolved");
            claims.claim(&cue.claimed);
            Some(cue.date)
        }
        Err(bad) => {
            debug!(reason = %bad.reason, "invalid date");
            claims.claim(&bad.claimed);
            failures.push(FieldError::DateInvalid {
                at: norm.original_range(bad.start, bad.end),
                reason: bad.reason,
            });
            None
        }
    };

    let amount = amount::extract(tokens, &claims).map(|cue| {
        debug!(amount = %cue.amount, "amount found");
        claims.claim(&cue.claimed);
        cue.amount
    });
    if amount.is_none() {
        failures.push(FieldError::AmountMissing);
    }

    let kind = kind::classify(tokens, &claims, lexicon).map(|(kind, span)| {
        debug!(%kind, "kind found");
        claims.claim(&span.collect::<Vec<_>>());
        kind
    });
    if kind.is_none() {
        failures.push(FieldError::TypeUnknown);
    }

    let described = describe::describe(norm, tokens, &claims, kind, lexicon);
    trace!(?described, "description");

    match (date, amount, kind) {
        (Some(date), Some(amount), Some(kind)) => Interpretation::Transaction(TransactionRecord {
            kind,
            amount,
            date,
            category: described.category,
            description: described.description,
            origin: Origin::Parsed,
        }),
        _ => {
            debug!(?failures, "not a transaction");
            Interpretation::Unrecognized(Unrecognized {
                text: text.to_string(),
                failures,
            })
        }
    }
}
