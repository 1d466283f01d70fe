//! Heuristic tokenizer behind identifier quoting and literal extraction
//!
//! There is no SQL grammar here. Every decision is made by scanning bytes:
//! quoted regions and string literals are masked out, then bare words and
//! literal runs are located with word-boundary rules. Callers rely on the
//! exact results, including the odd ones (`my-func(` yields the word `my-`),
//! so keep the rules stable when touching this module.
//!
//! Only ASCII bytes are ever classified as word, quote or digit characters,
//! which keeps every returned range on a `char` boundary.

use std::ops::Range;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::Value;

const MASK_PREFIX: &str = "SQLFRAG_MASK_";

static MASK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"SQLFRAG_MASK_(\d+)_").expect("unable to compile mask token regex")
});

/// `\w` in ASCII mode
pub(crate) fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn is_ident_byte(b: u8) -> bool {
    is_word_byte(b) || b == b'-'
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_string_quote(b: u8) -> bool {
    b == b'\'' || b == b'"'
}

/// `\s`, vertical tab included
fn is_space_byte(b: u8) -> bool {
    b.is_ascii_whitespace() || b == 0x0b
}

/// Index of the closing quote of a string literal opened at `start`.
///
/// A quote preceded by a backslash neither opens nor closes a literal.
fn string_literal_end(bytes: &[u8], start: usize) -> Option<usize> {
    let quote = bytes[start];
    if start > 0 && bytes[start - 1] == b'\\' {
        return None;
    }
    (start + 1..bytes.len()).find(|&i| bytes[i] == quote && bytes[i - 1] != b'\\')
}

/// Index of the closing identifier quote for a region opened at `start`
fn quoted_region_end(bytes: &[u8], start: usize, quote: u8) -> Option<usize> {
    (start + 1..bytes.len()).find(|&i| bytes[i] == quote)
}

/// Text with quoted regions swapped for opaque word tokens
#[derive(Debug, Clone)]
pub(crate) struct Masked {
    text: String,
    originals: Vec<String>,
}

impl Masked {
    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    /// Put the original regions back into `text`
    pub(crate) fn restore(&self, text: &str) -> String {
        if self.originals.is_empty() {
            return text.to_string();
        }
        MASK_RE
            .replace_all(text, |caps: &Captures| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|idx| self.originals.get(idx))
                    .cloned()
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}

pub(crate) fn is_mask_token(word: &str) -> bool {
    word.starts_with(MASK_PREFIX)
}

/// Mask identifier-quoted regions and string literals, left to right.
///
/// Unterminated regions stay in the text unchanged.
pub(crate) fn mask_quoted(text: &str, quote: u8) -> Masked {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut originals = Vec::new();
    let mut copied = 0;
    let mut i = 0;

    while i < bytes.len() {
        let end = if bytes[i] == quote {
            quoted_region_end(bytes, i, quote)
        } else if is_string_quote(bytes[i]) {
            string_literal_end(bytes, i)
        } else {
            None
        };

        match end {
            Some(end) => {
                out.push_str(&text[copied..i]);
                out.push_str(MASK_PREFIX);
                out.push_str(&originals.len().to_string());
                out.push('_');
                originals.push(text[i..=end].to_string());
                i = end + 1;
                copied = i;
            }
            None => i += 1,
        }
    }
    out.push_str(&text[copied..]);

    Masked {
        text: out,
        originals,
    }
}

/// Ranges of bare words that may need quoting.
///
/// Equivalent to `\b[A-Za-z_][A-Za-z0-9_-]*\b(?!\s*\()` with backtracking: the
/// longest candidate is tried first and shortened until a word boundary holds
/// and the word is not a function name.
pub(crate) fn bare_words(text: &str) -> Vec<Range<usize>> {
    let bytes = text.as_bytes();
    let n = bytes.len();
    let mut words = Vec::new();
    let mut i = 0;

    let boundary_at = |pos: usize| -> bool {
        let left = pos > 0 && is_word_byte(bytes[pos - 1]);
        let right = pos < n && is_word_byte(bytes[pos]);
        left != right
    };
    let calls_function = |pos: usize| -> bool {
        let mut k = pos;
        while k < n && is_space_byte(bytes[k]) {
            k += 1;
        }
        k < n && bytes[k] == b'('
    };

    while i < n {
        if !is_ident_start(bytes[i]) || (i > 0 && is_word_byte(bytes[i - 1])) {
            i += 1;
            continue;
        }

        let mut greedy = i + 1;
        while greedy < n && is_ident_byte(bytes[greedy]) {
            greedy += 1;
        }

        match (i + 1..=greedy)
            .rev()
            .find(|&end| boundary_at(end) && !calls_function(end))
        {
            Some(end) => {
                words.push(i..end);
                i = end;
            }
            None => i += 1,
        }
    }

    words
}

/// A literal found in an expression
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Literal {
    pub range: Range<usize>,
    pub value: Value,
}

/// String literals and standalone numbers, left to right.
///
/// String values keep their interior verbatim, escapes included. Identifier-
/// quoted regions are always skipped; with `"` as the identifier quote only
/// `'...'` is a string literal.
pub(crate) fn literals(text: &str, quote: u8) -> Vec<Literal> {
    let bytes = text.as_bytes();
    let n = bytes.len();
    let mut found = Vec::new();
    let mut i = 0;

    while i < n {
        let b = bytes[i];

        if b == quote {
            i = quoted_region_end(bytes, i, quote).map_or(i + 1, |end| end + 1);
            continue;
        }

        if is_string_quote(b) {
            match string_literal_end(bytes, i) {
                Some(end) => {
                    found.push(Literal {
                        range: i..end + 1,
                        value: Value::String(text[i + 1..end].to_string()),
                    });
                    i = end + 1;
                }
                None => i += 1,
            }
            continue;
        }

        if b.is_ascii_digit() && (i == 0 || !is_word_byte(bytes[i - 1])) {
            let mut end = i;
            while end < n && bytes[end].is_ascii_digit() {
                end += 1;
            }
            if end < n && is_word_byte(bytes[end]) {
                // `12ab`: no boundary anywhere inside the run
                i = end;
                continue;
            }

            if end + 1 < n && bytes[end] == b'.' && bytes[end + 1].is_ascii_digit() {
                let mut frac = end + 1;
                while frac < n && bytes[frac].is_ascii_digit() {
                    frac += 1;
                }
                if frac == n || !is_word_byte(bytes[frac]) {
                    if let Ok(f) = text[i..frac].parse::<f64>() {
                        found.push(Literal {
                            range: i..frac,
                            value: Value::Float(f),
                        });
                        i = frac;
                        continue;
                    }
                }
            }

            let digits = &text[i..end];
            let value = digits
                .parse::<i64>()
                .map(Value::Int)
                .unwrap_or_else(|_| Value::String(digits.to_string()));
            found.push(Literal {
                range: i..end,
                value,
            });
            i = end;
            continue;
        }

        i += 1;
    }

    found
}

/// Replace every range with `with`; ranges must be sorted and disjoint
pub(crate) fn replace_ranges<'a, I>(
    text: &str,
    ranges: I,
    mut with: impl FnMut(&str) -> String,
) -> String
where
    I: IntoIterator<Item = &'a Range<usize>>,
{
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    for range in ranges {
        out.push_str(&text[copied..range.start]);
        out.push_str(&with(&text[range.clone()]));
        copied = range.end;
    }
    out.push_str(&text[copied..]);
    out
}
