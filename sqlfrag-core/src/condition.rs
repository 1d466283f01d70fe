//! Condition entries and the conversions that build them

use std::borrow::Cow;
use std::fmt::{self, Display};
use std::str::FromStr;

use crate::{Error, Expression, Group, IntoOperator, Operator, Value};

/// How condition entries are connected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connector {
    And,
    Or,
}

impl Connector {
    pub fn as_str(&self) -> &'static str {
        match self {
            Connector::And => "AND",
            Connector::Or => "OR",
        }
    }
}

impl Display for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Connector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if token.eq_ignore_ascii_case("AND") {
            Ok(Connector::And)
        } else if token.eq_ignore_ascii_case("OR") {
            Ok(Connector::Or)
        } else {
            Err(Error::unsupported_shape(format!(
                "'{token}' is not a condition connector"
            )))
        }
    }
}

/// Right-hand side of a condition or assignment
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Bound as `?` or rendered as a literal
    Value(Value),
    /// Rendered through its own text and parameters
    Expr(Expression),
    /// Parenthesized list, for IN and BETWEEN
    List(Vec<Operand>),
}

impl Operand {
    pub fn is_null(&self) -> bool {
        matches!(self, Operand::Value(value) if value.is_null())
    }

    /// Elements of a list operand, whichever way the list was built
    pub fn list_items(&self) -> Option<Cow<'_, [Operand]>> {
        match self {
            Operand::List(items) => Some(Cow::Borrowed(items)),
            Operand::Value(value) => {
                let values = value.as_list()?;
                let items: Vec<Operand> = values.iter().cloned().map(Operand::from).collect();
                Some(Cow::Owned(items))
            }
            Operand::Expr(_) => None,
        }
    }

    /// Same operand with every list in the `Operand::List` form
    pub fn normalized(&self) -> Operand {
        match self {
            Operand::List(items) => Operand::List(items.iter().map(Operand::normalized).collect()),
            Operand::Value(value) => Operand::from(value.clone()),
            Operand::Expr(expr) => Operand::Expr(expr.clone()),
        }
    }
}

impl From<Value> for Operand {
    fn from(val: Value) -> Self {
        match val {
            Value::List(items) => Operand::List(items.into_iter().map(Operand::from).collect()),
            other => Operand::Value(other),
        }
    }
}

impl From<Expression> for Operand {
    fn from(expr: Expression) -> Self {
        Operand::Expr(expr)
    }
}

impl From<&Expression> for Operand {
    fn from(expr: &Expression) -> Self {
        Operand::Expr(expr.clone())
    }
}

macro_rules! operand_from_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Operand {
                fn from(val: $ty) -> Self {
                    Operand::Value(Value::from(val))
                }
            }
        )*
    };
}

operand_from_value!((), bool, i32, i64, u32, f32, f64, String, &str);

impl<T> From<Vec<T>> for Operand
where
    T: Into<Operand>,
{
    fn from(vals: Vec<T>) -> Self {
        Operand::List(vals.into_iter().map(Into::into).collect())
    }
}

impl<T> From<Option<T>> for Operand
where
    T: Into<Operand>,
{
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(val) => val.into(),
            None => Operand::Value(Value::Null),
        }
    }
}

impl From<serde_json::Value> for Operand {
    fn from(val: serde_json::Value) -> Self {
        Operand::from(Value::from(val))
    }
}

/// One element of a condition list
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionEntry {
    /// Free-form text, quoted by scanning; `AND` / `OR` act as connectors
    Raw(String),
    /// `column = operand`, or `column IS NULL`
    Binary { column: String, operand: Operand },
    /// `column OPERATOR operand`
    Ternary {
        column: String,
        operator: Operator,
        operand: Operand,
    },
    /// Parenthesized sub-group
    Nested(Group),
    Connector(Connector),
}

impl ConditionEntry {
    pub const AND: ConditionEntry = ConditionEntry::Connector(Connector::And);
    pub const OR: ConditionEntry = ConditionEntry::Connector(Connector::Or);

    pub fn raw(text: impl Into<String>) -> Self {
        ConditionEntry::Raw(text.into())
    }

    pub fn binary(column: impl Into<String>, operand: impl Into<Operand>) -> Self {
        ConditionEntry::Binary {
            column: column.into(),
            operand: operand.into(),
        }
    }

    pub fn ternary(
        column: impl Into<String>,
        operator: impl IntoOperator,
        operand: impl Into<Operand>,
    ) -> Self {
        ConditionEntry::Ternary {
            column: column.into(),
            operator: operator.into_operator(),
            operand: operand.into(),
        }
    }

    pub fn is_connector(&self) -> bool {
        matches!(self, ConditionEntry::Connector(_))
    }
}

impl From<Connector> for ConditionEntry {
    fn from(connector: Connector) -> Self {
        ConditionEntry::Connector(connector)
    }
}

impl From<Group> for ConditionEntry {
    fn from(group: Group) -> Self {
        ConditionEntry::Nested(group)
    }
}

impl From<&Group> for ConditionEntry {
    fn from(group: &Group) -> Self {
        ConditionEntry::Nested(group.clone())
    }
}

impl From<&str> for ConditionEntry {
    fn from(text: &str) -> Self {
        ConditionEntry::raw(text)
    }
}

impl From<String> for ConditionEntry {
    fn from(text: String) -> Self {
        ConditionEntry::Raw(text)
    }
}

/// Anything that can be appended to a [`Group`]
pub trait IntoConditions {
    fn into_conditions(self) -> Vec<ConditionEntry>;
}

impl IntoConditions for &str {
    fn into_conditions(self) -> Vec<ConditionEntry> {
        vec![ConditionEntry::raw(self)]
    }
}

impl IntoConditions for String {
    fn into_conditions(self) -> Vec<ConditionEntry> {
        vec![ConditionEntry::Raw(self)]
    }
}

impl IntoConditions for ConditionEntry {
    fn into_conditions(self) -> Vec<ConditionEntry> {
        vec![self]
    }
}

impl IntoConditions for Vec<ConditionEntry> {
    fn into_conditions(self) -> Vec<ConditionEntry> {
        self
    }
}

impl IntoConditions for Group {
    fn into_conditions(self) -> Vec<ConditionEntry> {
        vec![ConditionEntry::Nested(self)]
    }
}

impl IntoConditions for &Group {
    fn into_conditions(self) -> Vec<ConditionEntry> {
        vec![ConditionEntry::Nested(self.clone())]
    }
}

// Shorthand equality: and(("age", 18))
impl<T> IntoConditions for (&str, T)
where
    T: Into<Operand>,
{
    fn into_conditions(self) -> Vec<ConditionEntry> {
        vec![ConditionEntry::binary(self.0, self.1)]
    }
}

// Explicit operators: and(("age", op::GT, 18)) or and(("age", ">", 18))
impl<O, T> IntoConditions for (&str, O, T)
where
    O: IntoOperator,
    T: Into<Operand>,
{
    fn into_conditions(self) -> Vec<ConditionEntry> {
        vec![ConditionEntry::ternary(self.0, self.1, self.2)]
    }
}
