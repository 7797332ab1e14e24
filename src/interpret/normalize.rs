//! Folding of chat text into a form that is easy to match
//!
//! The normalized text is lowercase, has its accents removed and its
//! whitespace collapsed to single spaces. Every byte of it remembers which
//! character of the original message produced it, so that a span found on the
//! normalized text can be cut back out of the original (keeping the user's
//! capitalization and accents for descriptions).

use std::ops::Range;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized<'t> {
    original: &'t str,
    text: String,
    /// for each byte of `text`, the byte range of the original character it comes from
    origin: Vec<Range<usize>>,
}

/// Normalize a raw message
pub fn normalize(original: &str) -> Normalized<'_> {
    let mut text = String::with_capacity(original.len());
    let mut origin = Vec::with_capacity(original.len());
    // whitespace run waiting to be emitted as a single space
    let mut pending: Option<Range<usize>> = None;
    for (idx, c) in original.char_indices() {
        let from = idx..idx + c.len_utf8();
        if c.is_whitespace() {
            if pending.is_none() {
                pending = Some(from);
            }
            continue;
        }
        for lower in c.to_lowercase() {
            for folded in std::iter::once(lower).nfd() {
                if is_combining_mark(folded) {
                    continue;
                }
                if let Some(space) = pending.take() {
                    if !text.is_empty() {
                        text.push(' ');
                        origin.push(space);
                    }
                }
                text.push(folded);
                for _ in 0..folded.len_utf8() {
                    origin.push(from.clone());
                }
            }
        }
    }
    Normalized {
        original,
        text,
        origin,
    }
}

/// Normalized form of a keyword, for comparison with normalized text
pub fn fold(word: &str) -> String {
    normalize(word).text
}

impl<'t> Normalized<'t> {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn original(&self) -> &'t str {
        self.original
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Byte range of the original text that produced `start..end` of the normalized text
    pub fn original_range(&self, start: usize, end: usize) -> Range<usize> {
        if start >= end || end > self.origin.len() {
            return 0..0;
        }
        self.origin[start].start..self.origin[end - 1].end
    }

    /// Slice of the original text that produced `start..end` of the normalized text
    pub fn original_slice(&self, start: usize, end: usize) -> &'t str {
        let range = self.original_range(start, end);
        &self.original[range]
    }
}
