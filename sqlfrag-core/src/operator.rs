//! SQL comparison operators and their dispatch classes

use std::borrow::Cow;
use std::fmt::{self, Display};

/// Comparison operator as written by the caller
///
/// The text is rendered verbatim, so `like` stays lower case in the output.
/// Dispatch uses [`Operator::class`], which ignores case and repeated
/// whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator(Cow<'static, str>);

/// How the assembler renders the operand of an operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorClass {
    /// `BETWEEN` / `NOT BETWEEN`: two-element operand
    Between,
    /// `IN` / `NOT IN`: list operand
    In,
    /// `EXISTS` / `NOT EXISTS`: no operand
    Exists,
    /// Everything else: one operand
    Plain,
}

impl Operator {
    pub const EQ: Self = Operator(Cow::Borrowed("="));
    pub const NE: Self = Operator(Cow::Borrowed("<>"));
    pub const NEQ: Self = Operator(Cow::Borrowed("!="));
    pub const GT: Self = Operator(Cow::Borrowed(">"));
    pub const GTE: Self = Operator(Cow::Borrowed(">="));
    pub const LT: Self = Operator(Cow::Borrowed("<"));
    pub const LTE: Self = Operator(Cow::Borrowed("<="));
    pub const LIKE: Self = Operator(Cow::Borrowed("LIKE"));
    pub const NOT_LIKE: Self = Operator(Cow::Borrowed("NOT LIKE"));
    pub const IN: Self = Operator(Cow::Borrowed("IN"));
    pub const NOT_IN: Self = Operator(Cow::Borrowed("NOT IN"));
    pub const BETWEEN: Self = Operator(Cow::Borrowed("BETWEEN"));
    pub const NOT_BETWEEN: Self = Operator(Cow::Borrowed("NOT BETWEEN"));
    pub const IS: Self = Operator(Cow::Borrowed("IS"));
    pub const IS_NOT: Self = Operator(Cow::Borrowed("IS NOT"));
    pub const EXISTS: Self = Operator(Cow::Borrowed("EXISTS"));
    pub const NOT_EXISTS: Self = Operator(Cow::Borrowed("NOT EXISTS"));

    /// Create a custom operator for database-specific operations
    ///
    /// # Examples
    /// ```
    /// use sqlfrag_core::Operator;
    ///
    /// // MySQL null-safe equality
    /// let spaceship = Operator::custom("<=>");
    /// assert_eq!(spaceship.as_str(), "<=>");
    /// ```
    pub fn custom(op: impl Into<Cow<'static, str>>) -> Self {
        Operator(op.into())
    }

    /// Get the string representation of the operator
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Classify the operator for operand rendering
    pub fn class(&self) -> OperatorClass {
        let normalized = self
            .0
            .split_whitespace()
            .map(str::to_ascii_uppercase)
            .collect::<Vec<_>>()
            .join(" ");

        match normalized.as_str() {
            "BETWEEN" | "NOT BETWEEN" => OperatorClass::Between,
            "IN" | "NOT IN" => OperatorClass::In,
            "EXISTS" | "NOT EXISTS" => OperatorClass::Exists,
            _ => OperatorClass::Plain,
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trait for types that can be converted to SQL operators
pub trait IntoOperator {
    fn into_operator(self) -> Operator;
}

impl IntoOperator for Operator {
    fn into_operator(self) -> Operator {
        self
    }
}

/// Any text is accepted; unknown operators render verbatim
impl IntoOperator for &str {
    fn into_operator(self) -> Operator {
        Operator(Cow::Owned(self.trim().to_string()))
    }
}

impl IntoOperator for String {
    fn into_operator(self) -> Operator {
        self.as_str().into_operator()
    }
}

/// Convenience module for operator constants
pub mod op {
    use super::Operator;

    pub const EQ: Operator = Operator::EQ;
    pub const NE: Operator = Operator::NE;
    pub const NEQ: Operator = Operator::NEQ;
    pub const GT: Operator = Operator::GT;
    pub const GTE: Operator = Operator::GTE;
    pub const LT: Operator = Operator::LT;
    pub const LTE: Operator = Operator::LTE;
    pub const LIKE: Operator = Operator::LIKE;
    pub const NOT_LIKE: Operator = Operator::NOT_LIKE;
    pub const IN: Operator = Operator::IN;
    pub const NOT_IN: Operator = Operator::NOT_IN;
    pub const BETWEEN: Operator = Operator::BETWEEN;
    pub const NOT_BETWEEN: Operator = Operator::NOT_BETWEEN;
    pub const IS: Operator = Operator::IS;
    pub const IS_NOT: Operator = Operator::IS_NOT;
    pub const EXISTS: Operator = Operator::EXISTS;
    pub const NOT_EXISTS: Operator = Operator::NOT_EXISTS;
}
