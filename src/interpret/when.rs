//! Resolve the date a message talks about
//!
//! Cues are tried in a fixed order and the first one found decides:
//!
//! 1. explicit dates: `05/08`, `05/08/2024`, `15 de agosto [de 2024]`, `dia 15`
//! 2. relative words: `hoje`, `ontem`, `anteontem`, `amanha`
//! 3. weekday names: the latest such day on or before the reference date
//! 4. nothing: the reference date itself
//!
//! Only an explicit date can be wrong (`31/04`), and that aborts the
//! transaction. Absence of any cue never does.

use chrono::{Datelike, NaiveDate};

use crate::date::{self, DateError, DateExt};
use crate::interpret::parse::{Lexeme, Token};
use crate::lexicon::Lexicon;

/// Which kind of cue decided the date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRule {
    Explicit,
    Relative,
    Weekday,
    Reference,
}

/// A resolved date with the tokens that expressed it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateCue {
    pub date: NaiveDate,
    pub rule: DateRule,
    pub claimed: Vec<usize>,
}

/// An explicit date that does not exist, located in the normalized text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadDate {
    pub start: usize,
    pub end: usize,
    pub claimed: Vec<usize>,
    pub reason: DateError,
}

type Found = Option<Result<DateCue, BadDate>>;

pub fn resolve(tokens: &[Token], today: NaiveDate, lexicon: &Lexicon) -> Result<DateCue, BadDate> {
    if let Some(explicit) = slash_date(tokens, today)
        .or_else(|| named_month(tokens, today))
        .or_else(|| day_of_month(tokens, today))
    {
        return explicit;
    }
    if let Some(cue) = relative(tokens, today, lexicon) {
        return Ok(cue);
    }
    if let Some(cue) = weekday(tokens, today) {
        return Ok(cue);
    }
    Ok(DateCue {
        date: today,
        rule: DateRule::Reference,
        claimed: Vec::new(),
    })
}

fn is_word(tokens: &[Token], idx: usize, word: &str) -> bool {
    tokens
        .get(idx)
        .map(|t| t.is_word() && t.text == word)
        .unwrap_or(false)
}

/// Day or month number: one or two digits
fn small_number(tok: &Token) -> Option<u32> {
    if tok.is_integer() && tok.text.len() <= 2 {
        tok.text.parse().ok()
    } else {
        None
    }
}

fn explicit(
    tokens: &[Token],
    claimed: Vec<usize>,
    date: Result<NaiveDate, DateError>,
) -> Result<DateCue, BadDate> {
    match date {
        Ok(date) => Ok(DateCue {
            date,
            rule: DateRule::Explicit,
            claimed,
        }),
        Err(reason) => {
            let first = claimed.iter().min().copied().unwrap_or(0);
            let last = claimed.iter().max().copied().unwrap_or(0);
            Err(BadDate {
                start: tokens[first].start,
                end: tokens[last].end,
                claimed,
                reason,
            })
        }
    }
}

/// `dd/mm`, `dd/mm/yy` or `dd/mm/yyyy`, optionally preceded by `dia`
fn slash_date(tokens: &[Token], today: NaiveDate) -> Found {
    let (idx, tok) = tokens
        .iter()
        .enumerate()
        .find(|(_, t)| t.lexeme == Lexeme::Date)?;
    let mut parts = tok.text.split('/');
    let day = parts.next()?.parse::<u32>().ok()?;
    let month = parts.next()?.parse::<u32>().ok()?;
    let year = match parts.next() {
        Some(y) if y.len() == 2 => 2000 + y.parse::<i32>().ok()?,
        Some(y) => y.parse::<i32>().ok()?,
        None => today.year(),
    };
    let mut claimed = vec![idx];
    if idx > 0 && is_word(tokens, idx - 1, "dia") {
        claimed.insert(0, idx - 1);
    }
    Some(explicit(tokens, claimed, date::calendar(year, month, day)))
}

/// `15 de agosto`, `15 de ago. de 2024`, optionally preceded by `dia`
///
/// Abbreviations double as common words (`12 de set de facas`), so they only
/// count when followed by a dot or by a year.
fn named_month(tokens: &[Token], today: NaiveDate) -> Found {
    for (idx, tok) in tokens.iter().enumerate() {
        let Some(day) = small_number(tok) else { continue };
        if !is_word(tokens, idx + 1, "de") {
            continue;
        }
        let Some(name) = tokens.get(idx + 2).filter(|t| t.is_word()) else {
            continue;
        };
        let mut claimed = vec![idx, idx + 1, idx + 2];
        let mut after = idx + 3;
        let month = match date::month_from_name(name.text) {
            Some(month) => month,
            None => {
                let Some(month) = date::month_from_abbreviation(name.text) else {
                    continue;
                };
                let dotted = tokens
                    .get(after)
                    .map(|t| t.lexeme == Lexeme::Symbol && t.text == "." && name.glued_to(t))
                    .unwrap_or(false);
                if dotted {
                    claimed.push(after);
                    after += 1;
                } else if year_at(tokens, after).is_none() {
                    continue;
                }
                month
            }
        };
        if idx > 0 && is_word(tokens, idx - 1, "dia") {
            claimed.insert(0, idx - 1);
        }
        let year = match year_at(tokens, after) {
            Some(year) => {
                claimed.extend([after, after + 1]);
                year
            }
            None => today.year(),
        };
        let date = date::calendar(year, month.number_from_month(), day);
        return Some(explicit(tokens, claimed, date));
    }
    None
}

/// `de 2024` starting at `idx`
fn year_at(tokens: &[Token], idx: usize) -> Option<i32> {
    if !is_word(tokens, idx, "de") {
        return None;
    }
    tokens
        .get(idx + 1)
        .filter(|t| t.is_integer() && t.text.len() == 4)
        .and_then(|t| t.text.parse().ok())
}

/// `dia 15`: that day of the reference month
fn day_of_month(tokens: &[Token], today: NaiveDate) -> Found {
    for (idx, tok) in tokens.iter().enumerate() {
        if !(tok.is_word() && tok.text == "dia") {
            continue;
        }
        if let Some(day) = tokens.get(idx + 1).and_then(small_number) {
            let date = date::calendar(today.year(), today.month(), day);
            return Some(explicit(tokens, vec![idx, idx + 1], date));
        }
    }
    None
}

fn relative(tokens: &[Token], today: NaiveDate, lexicon: &Lexicon) -> Option<DateCue> {
    tokens.iter().enumerate().find_map(|(idx, tok)| {
        let offset = lexicon.relative_offset(tok.text).filter(|_| tok.is_word())?;
        Some(DateCue {
            date: today.jump_day(offset),
            rule: DateRule::Relative,
            claimed: vec![idx],
        })
    })
}

fn weekday(tokens: &[Token], today: NaiveDate) -> Option<DateCue> {
    tokens.iter().enumerate().find_map(|(idx, tok)| {
        let wd = date::weekday_from_name(tok.text).filter(|_| tok.is_word())?;
        let mut claimed = vec![idx];
        if is_word(tokens, idx + 1, "feira") {
            claimed.push(idx + 1);
        }
        Some(DateCue {
            date: today.last_weekday(wd),
            rule: DateRule::Weekday,
            claimed,
        })
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::interpret::normalize::normalize;
    use crate::interpret::parse::tokenize;

    macro_rules! dt {
        ( $y:tt - $m:tt - $d:tt ) => {
            NaiveDate::from_ymd_opt($y, $m, $d).unwrap()
        };
    }

    /// Saturday
    fn today() -> NaiveDate {
        dt!(2024-8-10)
    }

    fn when(raw: &str) -> Result<(NaiveDate, DateRule, Vec<String>), DateError> {
        let norm = normalize(raw);
        let tokens = tokenize(&norm).unwrap();
        match resolve(&tokens, today(), &Lexicon::default()) {
            Ok(cue) => Ok((
                cue.date,
                cue.rule,
                cue.claimed.iter().map(|&i| tokens[i].text.to_string()).collect(),
            )),
            Err(bad) => Err(bad.reason),
        }
    }

    macro_rules! resolves {
        ( $raw:expr => $date:expr, $rule:ident ) => {
            let (date, rule, _) = when($raw).unwrap();
            assert_eq!((date, rule), ($date, DateRule::$rule), "for {:?}", $raw);
        };
    }

    #[test]
    fn explicit_dates() {
        resolves!("recebi 1500 de salário 05/08" => dt!(2024-8-5), Explicit);
        resolves!("paguei 10 em 31/12/2023" => dt!(2023-12-31), Explicit);
        resolves!("paguei 10 em 1/2/25" => dt!(2025-2-1), Explicit);
        resolves!("comprei 30 em 15 de setembro" => dt!(2024-9-15), Explicit);
        resolves!("comprei 30 em 2 de jan de 2023" => dt!(2023-1-2), Explicit);
        resolves!("paguei a luz dia 3" => dt!(2024-8-3), Explicit);
    }

    #[test]
    fn future_dates_are_allowed() {
        resolves!("vou pagar 100 amanhã" => dt!(2024-8-11), Relative);
        resolves!("aluguel 20/09" => dt!(2024-9-20), Explicit);
    }

    #[test]
    fn relative_words() {
        resolves!("investi 200 em cdb hoje" => dt!(2024-8-10), Relative);
        resolves!("gastei 37,90 no supermercado ontem" => dt!(2024-8-9), Relative);
        resolves!("gastei 5 anteontem" => dt!(2024-8-8), Relative);
    }

    #[test]
    fn weekdays() {
        resolves!("gastei 12 na feira de sábado" => dt!(2024-8-10), Weekday);
        resolves!("gastei 12 na sexta" => dt!(2024-8-9), Weekday);
        resolves!("gastei 12 na segunda-feira" => dt!(2024-8-5), Weekday);
        resolves!("gastei 12 no domingo" => dt!(2024-8-4), Weekday);
        let (_, _, claimed) = when("gastei 12 na terça feira").unwrap();
        assert_eq!(claimed, vec!["terca", "feira"]);
    }

    #[test]
    fn nothing_means_reference() {
        resolves!("gastei 12 no bar" => today(), Reference);
        resolves!("" => today(), Reference);
    }

    #[test]
    fn explicit_beats_relative() {
        resolves!("ontem paguei 10 referente a 05/08" => dt!(2024-8-5), Explicit);
        resolves!("hoje recebi 10 do dia 7" => dt!(2024-8-7), Explicit);
        resolves!("sexta gastei 10, ontem na verdade" => dt!(2024-8-9), Relative);
    }

    #[test]
    fn claimed_tokens() {
        let (_, _, claimed) = when("paguei 10 dia 05/08").unwrap();
        assert_eq!(claimed, vec!["dia", "05/08"]);
        let (_, _, claimed) = when("paguei 10 em 2 de jan de 2023 no bar").unwrap();
        assert_eq!(claimed, vec!["2", "de", "jan", "de", "2023"]);
        let (_, _, claimed) = when("paguei 10 dia 2 de set. no bar").unwrap();
        assert_eq!(claimed, vec!["dia", "2", "de", "set", "."]);
    }

    #[test]
    fn bare_abbreviations_are_words() {
        resolves!("paguei 12 de set de facas" => today(), Reference);
        resolves!("gastei 20 de mar e 10 no bar" => today(), Reference);
        resolves!("gastei 20 de out" => today(), Reference);
        resolves!("gastei 20 em 5 de out." => dt!(2024-10-5), Explicit);
        resolves!("gastei 20 em 5 de out de 2023" => dt!(2023-10-5), Explicit);
        resolves!("gastei 20 em 20 de marco" => dt!(2024-3-20), Explicit);
    }

    #[test]
    fn malformed_dates() {
        assert_eq!(when("gastei 10 em 32/08"), Err(DateError::InvalidDay { day: 32 }));
        assert_eq!(when("gastei 10 em 05/13"), Err(DateError::InvalidMonth { month: 13 }));
        assert_eq!(
            when("gastei 10 em 31/04"),
            Err(DateError::MonthTooShort { month: 4, day: 31 })
        );
        assert_eq!(
            when("gastei 10 em 29/02/2023"),
            Err(DateError::NotBissextile { year: 2023 })
        );
        assert_eq!(
            when("gastei 10 dia 31 de setembro"),
            Err(DateError::MonthTooShort { month: 9, day: 31 })
        );
    }

    #[test]
    fn bad_date_location() {
        let norm = normalize("gastei 10 em 32/08");
        let tokens = tokenize(&norm).unwrap();
        let bad = resolve(&tokens, today(), &Lexicon::default()).unwrap_err();
        assert_eq!(&norm.text()[bad.start..bad.end], "32/08");
    }
}
