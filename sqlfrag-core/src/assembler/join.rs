//! JOIN clause rendering

use std::fmt::{self, Display};
use std::str::FromStr;

use super::{check_depth, finish, Assembler};
use crate::condition::ConditionEntry;
use crate::quoter::NameMode;
use crate::{Error, Fragment, Result};

/// Join keywords, including the ON / USING clause markers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Join,
    Cross,
    Inner,
    Outer,
    Left,
    Right,
    Straight,
    On,
    Using,
}

impl JoinKind {
    /// SQL keyword(s) written for this kind
    pub fn keyword(&self) -> &'static str {
        match self {
            JoinKind::Join => "JOIN",
            JoinKind::Cross => "CROSS JOIN",
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Outer => "OUTER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Straight => "STRAIGHT JOIN",
            JoinKind::On => "ON",
            JoinKind::Using => "USING",
        }
    }

    /// True for kinds that join a table rather than constrain one
    pub fn is_join(&self) -> bool {
        !matches!(self, JoinKind::On | JoinKind::Using)
    }
}

impl Display for JoinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Accepts the keyword with or without a trailing `JOIN`, in any case
impl FromStr for JoinKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let words: Vec<String> = s.split_whitespace().map(str::to_ascii_uppercase).collect();
        let words: Vec<&str> = words.iter().map(String::as_str).collect();

        let kind = match words.as_slice() {
            ["JOIN"] => JoinKind::Join,
            ["CROSS"] | ["CROSS", "JOIN"] => JoinKind::Cross,
            ["INNER"] | ["INNER", "JOIN"] => JoinKind::Inner,
            ["OUTER"] | ["OUTER", "JOIN"] => JoinKind::Outer,
            ["LEFT"] | ["LEFT", "JOIN"] => JoinKind::Left,
            ["RIGHT"] | ["RIGHT", "JOIN"] => JoinKind::Right,
            ["STRAIGHT"] | ["STRAIGHT", "JOIN"] | ["STRAIGHT_JOIN"] => JoinKind::Straight,
            ["ON"] => JoinKind::On,
            ["USING"] => JoinKind::Using,
            _ => return Err(Error::unknown_join_kind(s.trim())),
        };
        Ok(kind)
    }
}

/// What follows a join keyword
#[derive(Debug, Clone, PartialEq)]
pub enum JoinTarget {
    Table(String),
    /// Parenthesized join list
    Nested(Vec<JoinItem>),
    /// ON conditions
    Conditions(Vec<ConditionEntry>),
    /// USING columns
    Columns(Vec<String>),
}

impl From<&str> for JoinTarget {
    fn from(table: &str) -> Self {
        JoinTarget::Table(table.to_string())
    }
}

impl From<String> for JoinTarget {
    fn from(table: String) -> Self {
        JoinTarget::Table(table)
    }
}

impl From<Vec<JoinItem>> for JoinTarget {
    fn from(items: Vec<JoinItem>) -> Self {
        JoinTarget::Nested(items)
    }
}

impl From<Vec<ConditionEntry>> for JoinTarget {
    fn from(conditions: Vec<ConditionEntry>) -> Self {
        JoinTarget::Conditions(conditions)
    }
}

/// One element of a join list
#[derive(Debug, Clone, PartialEq)]
pub enum JoinItem {
    Table(String),
    /// Bare `ON` / `USING`, for clauses spelled out by the caller
    Keyword(JoinKind),
    Clause(JoinKind, JoinTarget),
}

impl JoinItem {
    pub fn table(table: impl Into<String>) -> Self {
        JoinItem::Table(table.into())
    }

    pub fn clause(kind: JoinKind, target: impl Into<JoinTarget>) -> Self {
        JoinItem::Clause(kind, target.into())
    }

    pub fn join(target: impl Into<JoinTarget>) -> Self {
        Self::clause(JoinKind::Join, target)
    }

    pub fn on(conditions: Vec<ConditionEntry>) -> Self {
        JoinItem::Clause(JoinKind::On, JoinTarget::Conditions(conditions))
    }

    pub fn using<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        JoinItem::Clause(
            JoinKind::Using,
            JoinTarget::Columns(columns.into_iter().map(Into::into).collect()),
        )
    }
}

impl From<&str> for JoinItem {
    fn from(table: &str) -> Self {
        JoinItem::table(table)
    }
}

impl From<(JoinKind, &str)> for JoinItem {
    fn from((kind, table): (JoinKind, &str)) -> Self {
        JoinItem::clause(kind, table)
    }
}

impl Assembler {
    /// Table list with JOIN / ON / USING clauses
    pub fn join(&self, items: &[JoinItem]) -> Result<Fragment> {
        let result = self.join_at(items, 0);
        finish("join", result)
    }

    fn join_at(&self, items: &[JoinItem], depth: usize) -> Result<Fragment> {
        check_depth(depth)?;

        let mut out = Fragment::default();
        for item in items {
            let piece = match item {
                JoinItem::Table(table) => {
                    Fragment::text_only(self.quoter.name(table, NameMode::Scan))
                }
                JoinItem::Keyword(kind @ (JoinKind::On | JoinKind::Using)) => {
                    Fragment::text_only(kind.keyword())
                }
                JoinItem::Keyword(kind) => {
                    return Err(Error::unsupported_shape(format!("{kind} needs a table")));
                }
                JoinItem::Clause(kind, target) => self.join_clause(*kind, target, depth)?,
            };
            out.append(" ", piece);
        }
        Ok(out)
    }

    fn join_clause(&self, kind: JoinKind, target: &JoinTarget, depth: usize) -> Result<Fragment> {
        let body = match (kind, target) {
            (JoinKind::On, JoinTarget::Conditions(conditions)) => {
                self.conditions_at(conditions, depth + 1)?
            }
            (JoinKind::Using, JoinTarget::Columns(columns)) => {
                let names = self.quoter.name(&columns.join(", "), NameMode::Scan);
                Fragment::text_only(format!("( {names} )"))
            }
            (JoinKind::Using, JoinTarget::Table(column)) => {
                let name = self.quoter.name(column, NameMode::Scan);
                Fragment::text_only(format!("( {name} )"))
            }
            (kind, JoinTarget::Table(table)) if kind.is_join() => {
                Fragment::text_only(self.quoter.name(table, NameMode::Scan))
            }
            (kind, JoinTarget::Nested(items)) if kind.is_join() => {
                self.join_at(items, depth + 1)?.wrapped("( ", " )")
            }
            (kind, target) => {
                return Err(Error::unsupported_shape(format!(
                    "{kind} cannot be followed by {}",
                    target_name(target)
                )));
            }
        };
        Ok(body.prefixed(kind.keyword()))
    }
}

fn target_name(target: &JoinTarget) -> &'static str {
    match target {
        JoinTarget::Table(_) => "a table",
        JoinTarget::Nested(_) => "a join list",
        JoinTarget::Conditions(_) => "conditions",
        JoinTarget::Columns(_) => "a column list",
    }
}
