//! Free text left over once the structured fields are taken out
//!
//! Whatever no other extractor claimed becomes the description, cut from the
//! original message so that it keeps the user's casing and accents. The folded
//! form of the same tokens is matched against the category rules.

use std::cmp::Reverse;

use crate::entry::Kind;
use crate::interpret::normalize::Normalized;
use crate::interpret::parse::{Lexeme, Token};
use crate::interpret::Claims;
use crate::lexicon::{CategoryRule, Lexicon};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Described {
    pub description: Option<String>,
    pub category: Option<String>,
}

pub fn describe(
    norm: &Normalized,
    tokens: &[Token],
    claims: &Claims,
    kind: Option<Kind>,
    lexicon: &Lexicon,
) -> Described {
    let residue = residue(tokens, claims, lexicon);
    if residue.is_empty() {
        return Described::default();
    }
    let mut description = String::new();
    for (pos, &idx) in residue.iter().enumerate() {
        let tok = &tokens[idx];
        if pos > 0 {
            let prev = residue[pos - 1];
            if !(prev + 1 == idx && tokens[prev].glued_to(tok)) {
                description.push(' ');
            }
        }
        description.push_str(norm.original_slice(tok.start, tok.end));
    }
    let words = residue
        .iter()
        .map(|&idx| &tokens[idx])
        .filter(|tok| tok.lexeme != Lexeme::Symbol)
        .map(|tok| tok.text)
        .collect::<Vec<_>>();
    Described {
        description: Some(description),
        category: categorize(&words, kind, lexicon).map(|rule| rule.label.clone()),
    }
}

/// Unclaimed tokens, without prepositions or punctuation at either end
fn residue(tokens: &[Token], claims: &Claims, lexicon: &Lexicon) -> Vec<usize> {
    let loose = |idx: &usize| {
        let tok = &tokens[*idx];
        tok.lexeme == Lexeme::Symbol || (tok.is_word() && lexicon.is_preposition(tok.text))
    };
    let unclaimed = (0..tokens.len())
        .filter(|&idx| !claims.is_claimed(idx))
        .collect::<Vec<_>>();
    let start = unclaimed.iter().position(|idx| !loose(idx));
    let end = unclaimed.iter().rposition(|idx| !loose(idx));
    match (start, end) {
        (Some(start), Some(end)) => unclaimed[start..=end].to_vec(),
        _ => Vec::new(),
    }
}

/// Best category rule whose keyword appears as a run of `words`
///
/// Rules for `kind` come first, then rules for any kind, then rules for the
/// other kinds. Within each group longer keywords win, then file order.
fn categorize<'l>(
    words: &[&str],
    kind: Option<Kind>,
    lexicon: &'l Lexicon,
) -> Option<&'l CategoryRule> {
    let tier = |rule: &CategoryRule| match (rule.kind, kind) {
        (Some(k), Some(want)) if k == want => 0,
        (None, _) => 1,
        _ => 2,
    };
    let mut rules = lexicon
        .categories
        .iter()
        .map(|rule| (rule, rule.keyword.split(' ').collect::<Vec<_>>()))
        .collect::<Vec<_>>();
    rules.sort_by_key(|(rule, keyword)| (tier(*rule), Reverse(keyword.len())));
    rules
        .into_iter()
        .find(|(_, keyword)| {
            !keyword.is_empty() && words.windows(keyword.len()).any(|w| w == keyword.as_slice())
        })
        .map(|(rule, _)| rule)
}
