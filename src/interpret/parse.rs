//! Convert normalized text into a stream of tokens

#![allow(clippy::upper_case_acronyms)]

use pest::Parser;
use pest_derive::*;

use crate::interpret::normalize::Normalized;

/// Pest-generated parser
#[derive(Parser)]
#[grammar = "interpret/message.pest"]
pub struct MessageParser;

/// What a token looks like
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lexeme {
    /// `dd/mm` or `dd/mm/yyyy`
    Date,
    /// a number, possibly with grouping and decimals
    Amount,
    /// `r$`
    Currency,
    Word,
    /// any other single character
    Symbol,
}

/// A token of the normalized text, `start..end` being its byte range there
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'n> {
    pub lexeme: Lexeme,
    pub text: &'n str,
    pub start: usize,
    pub end: usize,
}

impl<'n> Token<'n> {
    /// No whitespace between `self` and `next`
    pub fn glued_to(&self, next: &Token) -> bool {
        self.end == next.start
    }

    pub fn is_word(&self) -> bool {
        self.lexeme == Lexeme::Word
    }

    /// Amount made of digits only, e.g. a day or a year
    pub fn is_integer(&self) -> bool {
        self.lexeme == Lexeme::Amount && self.text.bytes().all(|b| b.is_ascii_digit())
    }
}

/// Split the normalized text into tokens
///
/// The grammar accepts any text, an error here means the grammar itself is broken.
pub fn tokenize<'n>(norm: &'n Normalized) -> Result<Vec<Token<'n>>, Box<pest::error::Error<Rule>>> {
    let pairs = MessageParser::parse(Rule::message, norm.text()).map_err(Box::new)?;
    let mut tokens = Vec::new();
    for pair in pairs.flatten() {
        let lexeme = match pair.as_rule() {
            Rule::date => Lexeme::Date,
            Rule::amount => Lexeme::Amount,
            Rule::currency => Lexeme::Currency,
            Rule::word => Lexeme::Word,
            Rule::symbol => Lexeme::Symbol,
            _ => continue,
        };
        let span = pair.as_span();
        tokens.push(Token {
            lexeme,
            text: span.as_str(),
            start: span.start(),
            end: span.end(),
        });
    }
    Ok(tokens)
}
