//! Find the value of a transaction
//!
//! Amounts follow the Brazilian convention: `,` separates decimals and `.`
//! groups thousands (`1.500,00`). A dot that does not group three digits is
//! read as a decimal point, since `37.90` is common in chat. The `r$` mark
//! before a number, the `k` / `mil` multipliers and the `reais` unit after it
//! belong to the amount.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::entry::Amount;
use crate::interpret::parse::{Lexeme, Token};
use crate::interpret::Claims;

const CURRENCY_WORDS: &[&str] = &["reais", "real"];

/// The value found and the tokens that expressed it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountCue {
    pub amount: Amount,
    pub claimed: Vec<usize>,
}

/// First usable amount among the unclaimed tokens
///
/// Numbers touching a `/` are fragments of a date (`123/45`), not amounts.
/// Zero is skipped, amounts are strictly positive.
pub fn extract(tokens: &[Token], claims: &Claims) -> Option<AmountCue> {
    for (idx, tok) in tokens.iter().enumerate() {
        if tok.lexeme != Lexeme::Amount || claims.is_claimed(idx) || next_to_slash(tokens, idx) {
            continue;
        }
        let Some(mut value) = parse_brl(tok.text) else { continue };
        let mut claimed = vec![idx];
        if idx > 0 && tokens[idx - 1].lexeme == Lexeme::Currency && !claims.is_claimed(idx - 1) {
            claimed.insert(0, idx - 1);
        }
        if let Some(next) = tokens.get(idx + 1) {
            let thousands = next.is_word()
                && ((next.text == "k" && tok.glued_to(next)) || next.text == "mil");
            if thousands && !claims.is_claimed(idx + 1) {
                let Some(scaled) = value.checked_mul(Decimal::from(1000)) else { continue };
                value = scaled;
                claimed.push(idx + 1);
            }
        }
        let unit = claimed.last().map(|&last| last + 1).unwrap_or(idx + 1);
        if let Some(next) = tokens.get(unit) {
            if next.is_word() && CURRENCY_WORDS.contains(&next.text) && !claims.is_claimed(unit) {
                claimed.push(unit);
            }
        }
        if let Some(amount) = Amount::new(value) {
            return Some(AmountCue { amount, claimed });
        }
    }
    None
}

fn next_to_slash(tokens: &[Token], idx: usize) -> bool {
    let tok = &tokens[idx];
    let slash = |t: &Token| t.lexeme == Lexeme::Symbol && t.text == "/";
    let before = idx > 0 && slash(&tokens[idx - 1]) && tokens[idx - 1].glued_to(tok);
    let after = tokens
        .get(idx + 1)
        .map(|next| slash(next) && tok.glued_to(next))
        .unwrap_or(false);
    before || after
}

/// Read a number written with Brazilian separators
pub fn parse_brl(text: &str) -> Option<Decimal> {
    let (int, frac) = match text.rsplit_once(',') {
        Some((int, frac)) => (int.replace('.', ""), frac),
        None => {
            let groups = text.split('.').collect::<Vec<_>>();
            let grouping = groups.len() > 1
                && groups[0].len() <= 3
                && groups[1..].iter().all(|g| g.len() == 3);
            match text.rsplit_once('.') {
                Some((int, frac)) if !grouping => (int.replace('.', ""), frac),
                _ => (groups.concat(), ""),
            }
        }
    };
    if int.is_empty() || !int.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    if frac.is_empty() {
        Decimal::from_str(&int).ok()
    } else {
        Decimal::from_str(&format!("{}.{}", int, frac)).ok()
    }
}
