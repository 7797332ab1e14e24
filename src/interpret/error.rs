//! Pretty-printing of the reasons a message was not understood
//!
//! This is mostly a wrapper around `pest::error::Error::new_from_span`, which
//! does the hard part of drawing the excerpt. `Error` adds aggregation of
//! messages and colored output.
//!
//! # Example
//!
//! ```txt
//! --> Error: Invalid date
//!  |     --> mensagem:1:14
//!  |      |
//!  |    1 | gastei 10 em 31/04
//!  |      |              ^---^
//!  |      |
//!  |      = abril is a short month, it does not have a 31th day
//!  |      ? hint: abril is at most 30 days long
//! Fatal: 1 error emitted
//! ```

use chrono::NaiveDate;
use std::fmt;
use std::ops::Range;

use crate::entry::TransactionRecord;
use crate::interpret::parse::Rule;
use crate::interpret::{FieldError, Unrecognized};

/// Report for a single problem
///
/// All messages (`label` passed with `make`, arguments of `text` and `hint`)
/// should fit in a single line.
#[must_use]
#[derive(Debug)]
pub struct Error {
    /// determines the label (warning/error) and the color (yellow/red)
    fatal: bool,
    label: String,
    items: Vec<Item>,
}

#[derive(Debug)]
enum Item {
    /// excerpt of the message
    Block(Box<pest::error::Error<Rule>>),
    /// important message
    Text(String),
    /// recommendation for a fix
    Hint(String),
}

/// A collection of problems found in one message
#[must_use]
#[derive(Debug, Default)]
pub struct Record {
    /// how many errors among `contents[..contents.len() - 1]`,
    /// the last one can still be turned into a warning
    fatal: usize,
    contents: Vec<Error>,
}

impl Error {
    fn new<S>(msg: S) -> Self
    where
        S: ToString,
    {
        Self {
            fatal: true,
            label: msg.to_string(),
            items: Vec::new(),
        }
    }

    /// Mark as a warning rather than an error
    pub fn nonfatal(&mut self) -> &mut Self {
        self.fatal = false;
        self
    }

    /// Add an excerpt of `text` underlining the byte range `at`
    ///
    /// Falls back to a plain note if `at` does not fall on character boundaries.
    pub fn span<S>(&mut self, text: &str, at: Range<usize>, msg: S) -> &mut Self
    where
        S: ToString,
    {
        match pest::Span::new(text, at.start, at.end) {
            Some(span) => self.items.push(Item::Block(Box::new(
                pest::error::Error::new_from_span(
                    pest::error::ErrorVariant::CustomError {
                        message: msg.to_string(),
                    },
                    span,
                )
                .with_path("mensagem"),
            ))),
            None => self.items.push(Item::Text(msg.to_string())),
        }
        self
    }

    /// Add an important note
    pub fn text<S>(&mut self, msg: S) -> &mut Self
    where
        S: ToString,
    {
        self.items.push(Item::Text(msg.to_string()));
        self
    }

    /// Add a hint on how to fix
    pub fn hint<S>(&mut self, msg: S) -> &mut Self
    where
        S: ToString,
    {
        self.items.push(Item::Hint(msg.to_string()));
        self
    }
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Explain every failure carried by an `Unrecognized` outcome
    pub fn from_unrecognized(unrecognized: &Unrecognized) -> Self {
        let mut rec = Self::new();
        let text = unrecognized.text.as_str();
        let whole = 0..text.len();
        if unrecognized.failures.is_empty() {
            rec.make("Message not understood")
                .hint("try something like 'gastei 37,90 no mercado' or 'resumo da semana'");
        }
        for failure in &unrecognized.failures {
            match failure {
                FieldError::Empty => {
                    rec.make("Empty message")
                        .hint("try something like 'gastei 37,90 no mercado' or 'resumo da semana'");
                }
                FieldError::AmountMissing => {
                    rec.make("No amount")
                        .span(text, whole.clone(), "no amount of money in this message")
                        .hint("write the value as 37,90 or 1.500 or 5k");
                }
                FieldError::TypeUnknown => {
                    rec.make("Unknown transaction type")
                        .span(
                            text,
                            whole.clone(),
                            "not recognizable as an expense, income or investment",
                        )
                        .hint("use a verb such as 'gastei', 'recebi' or 'investi'");
                }
                FieldError::DateInvalid { at, reason } => {
                    rec.make("Invalid date")
                        .span(text, at.clone(), reason)
                        .hint(reason.fix_hint());
                }
            }
        }
        rec
    }

    /// Warnings about a record that was understood but looks suspicious
    pub fn check(record: &TransactionRecord, reference: NaiveDate) -> Self {
        let mut rec = Self::new();
        if record.date > reference {
            rec.make("Date in the future")
                .nonfatal()
                .text(format!(
                    "the transaction was recorded on {}",
                    record.date.format("%d/%m/%Y")
                ))
                .hint("check that this is the intended date");
        }
        rec
    }

    /// Checks if any of the recorded problems are errors
    pub fn is_fatal(&self) -> bool {
        self.fatal > 0 || self.last_is_fatal()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    fn last_is_fatal(&self) -> bool {
        self.contents.last().map(|e| e.fatal).unwrap_or(false)
    }

    /// Number of errors
    pub fn count_errors(&self) -> usize {
        self.fatal + usize::from(self.last_is_fatal())
    }

    /// Number of warnings
    pub fn count_warnings(&self) -> usize {
        self.contents.len() - self.count_errors()
    }

    /// Add a new problem to the pool
    pub fn make<S>(&mut self, msg: S) -> &mut Error
    where
        S: ToString,
    {
        if self.last_is_fatal() {
            self.fatal += 1;
        }
        self.contents.push(Error::new(msg));
        let last = self.contents.len() - 1;
        &mut self.contents[last]
    }
}

const RED: &str = "\x1b[0;91;1m";
const YELLOW: &str = "\x1b[0;93;1m";
const BLUE: &str = "\x1b[0;96;1m";
const WHITE: &str = "\x1b[0;1m";
const NONE: &str = "\x1b[0m";

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (color, header) = if self.fatal {
            (RED, "--> Error")
        } else {
            (YELLOW, "--> Warning")
        };
        writeln!(f, "{}{}:{} {}{}", color, header, WHITE, self.label, NONE)?;
        for item in &self.items {
            match item {
                Item::Block(err) => {
                    let mut align = "   ".to_string();
                    let mut align_found = false;
                    for line in format!("{}", err).split('\n') {
                        write!(
                            f,
                            " {}|{}  {}",
                            color,
                            if align_found { &align } else { "" },
                            BLUE
                        )?;
                        for c in line.chars() {
                            match c {
                                '-' if !align_found => {
                                    align_found = true;
                                    write!(f, "{}-", align)?;
                                }
                                ' ' if !align_found => {
                                    align.pop();
                                    write!(f, " ")?;
                                }
                                '|' => write!(f, "|{}", NONE)?,
                                '=' => write!(f, "={}", NONE)?,
                                '^' => write!(f, "{}^", color)?,
                                // pest marks line ends
                                '␊' => (),
                                _ => write!(f, "{}", c)?,
                            }
                        }
                        writeln!(f)?;
                    }
                }
                Item::Text(txt) => {
                    writeln!(f, " {}|  {}{}{}", color, WHITE, txt, NONE)?;
                }
                Item::Hint(txt) => {
                    writeln!(f, " {}|      {}? hint: {}{}", color, BLUE, NONE, txt)?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.contents.is_empty() {
            return Ok(());
        }
        let fatal = self.is_fatal();
        let count = if fatal {
            self.count_errors()
        } else {
            self.count_warnings()
        };
        let color = if fatal { RED } else { YELLOW };
        // only print problems of the highest severity
        for err in self.contents.iter().filter(|err| err.fatal == fatal) {
            writeln!(f, "{}", err)?;
        }
        let plural = if count > 1 { "s" } else { "" };
        if fatal {
            writeln!(f, "{}Fatal: {}{} error{} emitted{}", color, WHITE, count, plural, NONE)?;
        } else {
            writeln!(f, "{}Nonfatal: {}{} warning{} emitted{}", color, WHITE, count, plural, NONE)?;
        }
        Ok(())
    }
}
