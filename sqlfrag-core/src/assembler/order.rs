//! GROUP BY and ORDER BY lists

use std::fmt::{self, Display};

use tracing::{debug, trace};

use super::Assembler;
use crate::quoter::NameMode;
use crate::{Error, Result};

/// Sort direction for ORDER BY
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "ASC"),
            SortDirection::Desc => write!(f, "DESC"),
        }
    }
}

/// One GROUP BY / ORDER BY term
#[derive(Debug, Clone, PartialEq)]
pub enum OrderTerm {
    Column(String),
    /// Column followed by free text such as `DESC WITH ROLLUP`
    Modified { column: String, modifier: String },
    /// `ORDER BY NULL`
    Null,
}

impl OrderTerm {
    pub fn asc(column: impl Into<String>) -> Self {
        Self::sorted(column, SortDirection::Asc)
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self::sorted(column, SortDirection::Desc)
    }

    pub fn sorted(column: impl Into<String>, direction: SortDirection) -> Self {
        OrderTerm::Modified {
            column: column.into(),
            modifier: direction.to_string(),
        }
    }
}

impl From<&str> for OrderTerm {
    fn from(column: &str) -> Self {
        OrderTerm::Column(column.to_string())
    }
}

impl From<String> for OrderTerm {
    fn from(column: String) -> Self {
        OrderTerm::Column(column)
    }
}

impl From<(&str, &str)> for OrderTerm {
    fn from((column, modifier): (&str, &str)) -> Self {
        OrderTerm::Modified {
            column: column.to_string(),
            modifier: modifier.to_string(),
        }
    }
}

impl From<(&str, SortDirection)> for OrderTerm {
    fn from((column, direction): (&str, SortDirection)) -> Self {
        OrderTerm::sorted(column, direction)
    }
}

impl<T> From<Option<T>> for OrderTerm
where
    T: Into<OrderTerm>,
{
    fn from(term: Option<T>) -> Self {
        term.map_or(OrderTerm::Null, Into::into)
    }
}

impl Assembler {
    /// GROUP BY list; `NULL` is not a grouping term
    pub fn group_by(&self, terms: &[OrderTerm]) -> Result<String> {
        let mut parts = Vec::with_capacity(terms.len());
        for term in terms {
            match self.order_term(term) {
                Some(part) => parts.push(part),
                None => {
                    let err = Error::unsupported_shape("GROUP BY does not accept NULL");
                    debug!(operation = "group_by", error = %err, "rejected input");
                    return Err(err);
                }
            }
        }
        let text = parts.join(", ");
        trace!(operation = "group_by", text = %text, params = 0, "rendered fragment");
        Ok(text)
    }

    /// ORDER BY list
    pub fn order_by(&self, terms: &[OrderTerm]) -> String {
        let text = terms
            .iter()
            .map(|term| self.order_term(term))
            .map(|part| part.unwrap_or_else(|| "NULL".into()))
            .collect::<Vec<_>>()
            .join(", ");
        trace!(operation = "order_by", text = %text, params = 0, "rendered fragment");
        text
    }

    fn order_term(&self, term: &OrderTerm) -> Option<String> {
        match term {
            OrderTerm::Column(column) => Some(self.quoter.name(column, NameMode::Scan)),
            OrderTerm::Modified { column, modifier } => {
                let name = self.quoter.name(column, NameMode::Scan);
                match modifier.trim() {
                    "" => Some(name),
                    modifier => Some(format!("{name} {modifier}")),
                }
            }
            OrderTerm::Null => None,
        }
    }
}
