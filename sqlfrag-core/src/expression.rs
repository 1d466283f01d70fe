//! Free-form SQL snippets with extracted literals

use std::fmt::{self, Display};

use crate::quoter::{NameMode, Quoter};
use crate::scan;
use crate::Value;

/// A SQL snippet whose identifiers are quoted and whose literals are bound.
///
/// Everything is computed at construction; the value is immutable afterwards.
///
/// # Examples
/// ```
/// use sqlfrag_core::{Expression, Quoter, Value};
///
/// let quoter = Quoter::default();
/// let expr = Expression::new(r#"concat( t1.id, "str" )"#, &quoter);
/// assert_eq!(expr.text(), "concat( `t1`.`id`, ? )");
/// assert_eq!(expr.params(), &[Value::from("str")]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    source: String,
    quoted: String,
    text: String,
    params: Vec<Value>,
}

impl Expression {
    pub fn new(expression: impl Into<String>, quoter: &Quoter) -> Self {
        let source = expression.into();
        let quoted = quoter.name(&source, NameMode::Scan);

        let literals = scan::literals(&quoted, quoter.quote_char() as u8);
        let ranges: Vec<_> = literals.iter().map(|l| l.range.clone()).collect();
        let text = scan::replace_ranges(&quoted, &ranges, |_| "?".to_string());
        let params = literals.into_iter().map(|l| l.value).collect();

        Self {
            source,
            quoted,
            text,
            params,
        }
    }

    /// Parameterized rendering
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Values for the placeholders in [`text`](Self::text), in order
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// Identifier-quoted rendering with literals left in place
    pub fn quoted(&self) -> &str {
        &self.quoted
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl PartialEq<str> for Expression {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for Expression {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}
