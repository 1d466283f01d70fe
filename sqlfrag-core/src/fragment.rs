//! Rendered SQL pieces and their bound parameters

use std::fmt::{self, Display};

use serde::Serialize;

use crate::Value;

/// SQL text with the values for its `?` placeholders, in order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Fragment {
    pub text: String,
    pub params: Vec<Value>,
}

impl Fragment {
    pub fn new(text: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            text: text.into(),
            params,
        }
    }

    /// A fragment without parameters
    pub fn text_only(text: impl Into<String>) -> Self {
        Self::new(text, Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn push_str(&mut self, text: &str) -> &mut Self {
        self.text.push_str(text);
        self
    }

    /// Append `other`, with `sep` in between unless this fragment is empty
    pub fn append(&mut self, sep: &str, other: Fragment) -> &mut Self {
        if !self.text.is_empty() && !other.text.is_empty() {
            self.text.push_str(sep);
        }
        self.text.push_str(&other.text);
        self.params.extend(other.params);
        self
    }

    /// Prepend a clause keyword: `WHERE` + `a = ?` gives `WHERE a = ?`
    pub fn prefixed(self, keyword: &str) -> Self {
        Self {
            text: format!("{keyword} {}", self.text),
            params: self.params,
        }
    }

    pub(crate) fn wrapped(self, open: &str, close: &str) -> Self {
        Self {
            text: format!("{open}{}{close}", self.text),
            params: self.params,
        }
    }

    /// Concatenate fragments left to right
    ///
    /// # Examples
    /// ```
    /// use sqlfrag_core::{Fragment, Value};
    ///
    /// let sql = Fragment::join(
    ///     vec![
    ///         Fragment::text_only("SELECT * FROM `t`"),
    ///         Fragment::new("WHERE `id` = ?", vec![Value::Int(1)]),
    ///     ],
    ///     " ",
    /// );
    /// assert_eq!(sql.text, "SELECT * FROM `t` WHERE `id` = ?");
    /// assert_eq!(sql.params, vec![Value::Int(1)]);
    /// ```
    pub fn join(parts: impl IntoIterator<Item = Fragment>, sep: &str) -> Self {
        let mut out = Fragment::default();
        for part in parts {
            out.append(sep, part);
        }
        out
    }

    /// Number of `?` placeholders outside quoted regions
    pub fn placeholder_count(&self) -> usize {
        let mut count = 0;
        let mut quote: Option<char> = None;
        let mut escaped = false;

        for c in self.text.chars() {
            match quote {
                Some(q) => {
                    if escaped {
                        escaped = false;
                    } else if c == '\\' {
                        escaped = true;
                    } else if c == q {
                        quote = None;
                    }
                }
                None => match c {
                    '\'' | '"' | '`' => quote = Some(c),
                    '?' => count += 1,
                    _ => {}
                },
            }
        }
        count
    }
}

impl Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<String> for Fragment {
    fn from(text: String) -> Self {
        Fragment::text_only(text)
    }
}

impl From<&str> for Fragment {
    fn from(text: &str) -> Self {
        Fragment::text_only(text)
    }
}
