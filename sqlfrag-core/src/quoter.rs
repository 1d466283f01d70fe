//! Identifier quoting and literal formatting
//!
//! [`Quoter::name`] decides which words inside a free-form snippet are bare
//! identifiers and wraps exactly those. Already-quoted regions, string
//! literals, reserved words and function names are left alone.
//!
//! # Example
//! ```
//! use sqlfrag_core::{NameMode, Quoter};
//!
//! let quoter = Quoter::default();
//! assert_eq!(
//!     quoter.name("tbl.name AS c1, count(id)", NameMode::Scan),
//!     "`tbl`.`name` AS `c1`, count(`id`)"
//! );
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::config::QuoterConfig;
use crate::scan;
use crate::{Result, Value};

static SIMPLE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9_-]+$").expect("unable to compile simple identifier regex")
});

/// How [`Quoter::name`] treats text that is not already quoted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameMode {
    /// Wrap the whole text as one identifier
    Whole,
    /// Scan the text and wrap each bare identifier
    Scan,
}

/// Dialect-aware identifier quoter
#[derive(Debug, Clone)]
pub struct Quoter {
    quote_char: char,
    reserved_words: Vec<String>,
    quoted_re: Regex,
    reserved_assign_re: Option<Regex>,
}

impl Default for Quoter {
    fn default() -> Self {
        Self::new(QuoterConfig::default()).expect("default quoter config is valid")
    }
}

impl Quoter {
    /// Build a quoter from validated configuration
    pub fn new(config: QuoterConfig) -> Result<Self> {
        config.validate()?;

        let q = regex::escape(&config.quote_char.to_string());
        let quoted_re = Regex::new(&format!("{q}[^{q}]*{q}"))
            .map_err(|e| crate::Error::invalid_config(e.to_string()))?;

        let reserved_assign_re = if config.reserved_words.is_empty() {
            None
        } else {
            let words = config
                .reserved_words
                .iter()
                .map(|w| regex::escape(w))
                .collect::<Vec<_>>()
                .join("|");
            let re = Regex::new(&format!(r"(?i)(?-u:\b)({words})\s*="))
                .map_err(|e| crate::Error::invalid_config(e.to_string()))?;
            Some(re)
        };

        let reserved_words = config
            .reserved_words
            .into_iter()
            .map(|w| w.to_ascii_uppercase())
            .collect();

        Ok(Self {
            quote_char: config.quote_char,
            reserved_words,
            quoted_re,
            reserved_assign_re,
        })
    }

    pub fn quote_char(&self) -> char {
        self.quote_char
    }

    pub fn reserved_words(&self) -> &[String] {
        &self.reserved_words
    }

    fn quote_byte(&self) -> u8 {
        // validate() only admits ASCII punctuation
        self.quote_char as u8
    }

    fn wrap(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() + 2);
        out.push(self.quote_char);
        out.push_str(text);
        out.push(self.quote_char);
        out
    }

    fn is_reserved(&self, word: &str) -> bool {
        self.reserved_words
            .iter()
            .any(|r| r.eq_ignore_ascii_case(word))
    }

    /// True when nothing but spaces and commas is left after removing every
    /// quoted region
    pub fn quoted(&self, text: &str) -> bool {
        self.quoted_re
            .replace_all(text, "")
            .trim_matches(|c| c == ' ' || c == ',')
            .is_empty()
    }

    /// Quote the identifiers in `text`
    pub fn name(&self, text: &str, mode: NameMode) -> String {
        if text == "*" || self.quoted(text) {
            return text.to_string();
        }

        if mode == NameMode::Whole || SIMPLE_NAME_RE.is_match(text) {
            return self.wrap(text);
        }

        let masked = scan::mask_quoted(text, self.quote_byte());
        let words = scan::bare_words(masked.text());
        let mut quoted = scan::replace_ranges(masked.text(), &words, |word| {
            if self.is_reserved(word) || scan::is_mask_token(word) {
                word.to_string()
            } else {
                self.wrap(word)
            }
        });

        // `like = 1`: a reserved word being assigned is a column
        if let Some(re) = &self.reserved_assign_re {
            quoted = re
                .replace_all(&quoted, |caps: &regex::Captures| {
                    format!("{} =", self.wrap(&caps[1]))
                })
                .into_owned();
        }

        masked.restore(&quoted)
    }

    /// Render a literal for inline SQL
    pub fn value(&self, value: &Value) -> String {
        match value {
            Value::Null => "NULL".to_string(),
            Value::Bool(true) => "TRUE".to_string(),
            Value::Bool(false) => "FALSE".to_string(),
            Value::Int(i) => i.to_string(),
            // NaN and infinities have no SQL literal
            Value::Float(f) if !f.is_finite() => "NULL".to_string(),
            Value::Float(f) => f.to_string(),
            Value::String(s) => format!("'{}'", add_slashes(s)),
            Value::List(items) => {
                let parts: Vec<String> = items.iter().map(|v| self.value(v)).collect();
                format!("( {} )", parts.join(", "))
            }
        }
    }
}

fn add_slashes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\'' | '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '\0' => out.push_str("\\0"),
            _ => out.push(c),
        }
    }
    out
}
