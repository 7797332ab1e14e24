//! Tell expenses, income and investments apart
//!
//! Each kind has a list of word prefixes (`gast-`, `receb-`, `invest-`, ...).
//! Kinds are tried in the lexicon's priority order, by default
//! investment > income > expense, so "paguei 200 e investi o resto" is an
//! investment. Within the winning kind the leftmost matching word is claimed.
//!
//! A stem made of several words (`caiu na conta`) matches consecutive words:
//! every word but the last must be equal, the last one is a prefix. The whole
//! phrase is claimed.

use std::ops::Range;

use crate::entry::Kind;
use crate::interpret::parse::Token;
use crate::interpret::Claims;
use crate::lexicon::Lexicon;

/// The kind found and the tokens that revealed it
pub fn classify(
    tokens: &[Token],
    claims: &Claims,
    lexicon: &Lexicon,
) -> Option<(Kind, Range<usize>)> {
    lexicon.kind_priority.iter().find_map(|&kind| {
        let stems = lexicon.stems.of(kind);
        (0..tokens.len()).find_map(|idx| {
            stems
                .iter()
                .find_map(|stem| matches_at(tokens, claims, idx, stem))
                .map(|span| (kind, span))
        })
    })
}

fn matches_at(tokens: &[Token], claims: &Claims, idx: usize, stem: &str) -> Option<Range<usize>> {
    let words = stem.split(' ').collect::<Vec<_>>();
    let (last, init) = words.split_last()?;
    let span = idx..idx + words.len();
    let run = tokens.get(span.clone())?;
    let usable = run
        .iter()
        .zip(span.clone())
        .all(|(tok, i)| tok.is_word() && !claims.is_claimed(i));
    let adjacent = run.windows(2).all(|w| w[1].start == w[0].end + 1);
    let equal = init.iter().zip(run).all(|(word, tok)| tok.text == *word);
    let prefix = run.last().map(|tok| tok.text.starts_with(*last)).unwrap_or(false);
    if usable && adjacent && equal && prefix {
        Some(span)
    } else {
        None
    }
}
