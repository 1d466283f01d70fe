//! sqlfrag core - SQL fragment assembly and identifier quoting
//!
//! This crate turns structured descriptions of query pieces (column lists,
//! tables, conditions, joins, ordering, assignments, limits) into SQL text,
//! either with `?` placeholders and an ordered parameter list or with every
//! literal quoted inline.
//!
//! # Example
//! ```
//! use sqlfrag_core::{Assembler, ConditionEntry, Fragment, Group, Quoter, Value};
//!
//! let assembler = Assembler::new(Quoter::default());
//!
//! let filter = Group::new();
//! filter.and(("age", ">", 18)).or(("status", "IN", vec!["new", "active"]));
//!
//! let sql = Fragment::join(
//!     vec![
//!         Fragment::text_only(assembler.columns(&["id", "u.name AS n"])).prefixed("SELECT"),
//!         Fragment::text_only(assembler.tables(&["users AS u"])).prefixed("FROM"),
//!         assembler.conditions(&[ConditionEntry::from(&filter)]).unwrap().prefixed("WHERE"),
//!     ],
//!     " ",
//! );
//!
//! assert_eq!(
//!     sql.text,
//!     "SELECT `id`, `u`.`name` AS `n` FROM `users` AS `u` WHERE ( `age` > ? OR `status` IN ( ?, ? ) )"
//! );
//! assert_eq!(sql.params, vec![Value::Int(18), Value::from("new"), Value::from("active")]);
//! ```

pub mod assembler;
pub mod condition;
pub mod config;
pub mod error;
pub mod expression;
pub mod fragment;
pub mod group;
pub mod operator;
pub mod quoter;
mod scan;
pub mod value;

// Re-export main types
pub use assembler::{
    Assembler, IntoAssignments, JoinItem, JoinKind, JoinTarget, OrderTerm, SortDirection,
    MAX_DEPTH,
};
pub use condition::{ConditionEntry, Connector, IntoConditions, Operand};
pub use config::{Config, QuoterConfig, RenderMode};
pub use error::{Error, Result};
pub use expression::Expression;
pub use fragment::Fragment;
pub use group::Group;
pub use operator::{op, IntoOperator, Operator, OperatorClass};
pub use quoter::{NameMode, Quoter};
pub use value::Value;
