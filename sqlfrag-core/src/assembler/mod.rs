//! Fragment assembly over quoted identifiers, expressions and groups
//!
//! Each operation renders one clause body. The same inputs render either with
//! `?` placeholders and an ordered parameter list, or with every literal
//! quoted into the text, depending on the [`RenderMode`].

mod join;
mod order;

pub use join::{JoinItem, JoinKind, JoinTarget};
pub use order::{OrderTerm, SortDirection};

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, trace};

use crate::condition::{ConditionEntry, Connector, Operand};
use crate::config::{Config, RenderMode};
use crate::operator::OperatorClass;
use crate::quoter::{NameMode, Quoter};
use crate::{Error, Expression, Fragment, Result, Value};

/// Deepest nesting of groups, IN lists or joins that will be rendered
pub const MAX_DEPTH: usize = 64;

/// Renders structured clause descriptions into SQL fragments
#[derive(Debug, Clone, Default)]
pub struct Assembler {
    quoter: Quoter,
    mode: RenderMode,
}

impl Assembler {
    /// Parameterized assembler
    pub fn new(quoter: Quoter) -> Self {
        Self::with_mode(quoter, RenderMode::Parameterized)
    }

    /// Assembler that quotes literals into the text
    pub fn inline(quoter: Quoter) -> Self {
        Self::with_mode(quoter, RenderMode::Inline)
    }

    pub fn with_mode(quoter: Quoter, mode: RenderMode) -> Self {
        Self { quoter, mode }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let quoter = Quoter::new(config.quoter.clone())?;
        Ok(Self::with_mode(quoter, config.mode))
    }

    pub fn quoter(&self) -> &Quoter {
        &self.quoter
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    fn inlining(&self) -> bool {
        self.mode == RenderMode::Inline
    }

    /// `( a, b, ... )` for IN
    ///
    /// Nested lists add a parenthesis level. In inline mode repeated elements
    /// of a level are dropped, keeping the first.
    pub fn in_list(&self, items: &[Operand]) -> Result<Fragment> {
        let result = self.in_list_at(items, 0);
        finish("in_list", result)
    }

    fn in_list_at(&self, items: &[Operand], depth: usize) -> Result<Fragment> {
        check_depth(depth)?;

        let mut seen: Vec<Operand> = Vec::new();
        let mut out = Fragment::default();
        for item in items {
            if self.inlining() {
                let key = item.normalized();
                if seen.contains(&key) {
                    continue;
                }
                seen.push(key);
            }
            out.append(", ", self.operand(item, depth)?);
        }
        Ok(out.wrapped("( ", " )"))
    }

    /// One operand in value position
    fn operand(&self, operand: &Operand, depth: usize) -> Result<Fragment> {
        match operand {
            Operand::Expr(expr) => Ok(self.expression(expr)),
            Operand::List(items) => self.in_list_at(items, depth + 1),
            Operand::Value(Value::List(values)) => {
                let items: Vec<Operand> = values.iter().cloned().map(Operand::from).collect();
                self.in_list_at(&items, depth + 1)
            }
            Operand::Value(value) => Ok(self.bind(value)),
        }
    }

    fn bind(&self, value: &Value) -> Fragment {
        if self.inlining() {
            Fragment::text_only(self.quoter.value(value))
        } else {
            Fragment::new("?", vec![value.clone()])
        }
    }

    fn expression(&self, expr: &Expression) -> Fragment {
        if self.inlining() {
            Fragment::text_only(expr.quoted())
        } else {
            Fragment::new(expr.text(), expr.params().to_vec())
        }
    }

    /// Select list; an empty list selects `*`
    pub fn columns<S: AsRef<str>>(&self, columns: &[S]) -> String {
        let text = if columns.is_empty() {
            "*".to_string()
        } else {
            self.names(columns.iter().map(AsRef::as_ref), ", ")
        };
        trace!(operation = "columns", text = %text, params = 0, "rendered fragment");
        text
    }

    /// Table list with repeated entries removed
    pub fn tables<S: AsRef<str>>(&self, tables: &[S]) -> String {
        let unique: IndexSet<&str> = tables.iter().map(AsRef::as_ref).collect();
        let text = self.names(unique.into_iter(), ", ");
        trace!(operation = "tables", text = %text, params = 0, "rendered fragment");
        text
    }

    fn names<'a>(&self, names: impl Iterator<Item = &'a str>, sep: &str) -> String {
        names
            .map(|name| self.quoter.name(name, NameMode::Scan))
            .collect::<Vec<_>>()
            .join(sep)
    }

    /// WHERE / HAVING / ON body
    pub fn conditions(&self, conditions: &[ConditionEntry]) -> Result<Fragment> {
        let result = self.conditions_at(conditions, 0);
        finish("conditions", result)
    }

    pub(crate) fn conditions_at(
        &self,
        conditions: &[ConditionEntry],
        depth: usize,
    ) -> Result<Fragment> {
        check_depth(depth)?;

        let mut out = Fragment::default();
        for entry in conditions {
            let piece = match entry {
                ConditionEntry::Nested(group) => self
                    .conditions_at(&group.conditions(), depth + 1)?
                    .wrapped("( ", " )"),
                ConditionEntry::Binary { column, operand } => {
                    let op = if operand.is_null() { "IS" } else { "=" };
                    self.comparison(column, op, operand, depth)?
                }
                ConditionEntry::Ternary {
                    column,
                    operator,
                    operand,
                } => {
                    let column = self.quoter.name(column, NameMode::Scan);
                    let op = operator.as_str();
                    match operator.class() {
                        OperatorClass::Between => {
                            let items = operand
                                .list_items()
                                .filter(|items| items.len() == 2)
                                .ok_or_else(|| {
                                    Error::invalid_operand(op, "expected a list of two values")
                                })?;
                            let low = self.operand(&items[0], depth)?;
                            let high = self.operand(&items[1], depth)?;
                            let mut frag = Fragment::text_only(format!("{column} {op}"));
                            frag.append(" ", low);
                            frag.push_str(" AND");
                            frag.append(" ", high);
                            frag
                        }
                        OperatorClass::In => {
                            let target = match (operand.list_items(), operand) {
                                (Some(items), _) => self.in_list_at(&items, depth + 1)?,
                                (None, Operand::Expr(expr)) => self.expression(expr),
                                (None, _) => {
                                    return Err(Error::invalid_operand(
                                        op,
                                        "expected a list or an expression",
                                    ));
                                }
                            };
                            let mut frag = Fragment::text_only(format!("{column} {op}"));
                            frag.append(" ", target);
                            frag
                        }
                        OperatorClass::Exists => Fragment::text_only(format!("{column} {op}")),
                        OperatorClass::Plain => {
                            let mut frag = Fragment::text_only(format!("{column} {op}"));
                            frag.append(" ", self.scalar(op, operand, depth)?);
                            frag
                        }
                    }
                }
                ConditionEntry::Raw(text) => match text.parse::<Connector>() {
                    Ok(connector) => Fragment::text_only(connector.as_str()),
                    Err(_) => Fragment::text_only(self.quoter.name(text, NameMode::Scan)),
                },
                ConditionEntry::Connector(connector) => Fragment::text_only(connector.as_str()),
            };
            out.append(" ", piece);
        }
        Ok(out)
    }

    fn comparison(
        &self,
        column: &str,
        op: &str,
        operand: &Operand,
        depth: usize,
    ) -> Result<Fragment> {
        let name = self.quoter.name(column, NameMode::Scan);
        let mut frag = Fragment::text_only(format!("{name} {op}"));
        frag.append(" ", self.scalar(op, operand, depth)?);
        Ok(frag)
    }

    /// Single-valued operand; lists only make sense for IN and BETWEEN
    fn scalar(&self, op: &str, operand: &Operand, depth: usize) -> Result<Fragment> {
        if operand.list_items().is_some() {
            return Err(Error::invalid_operand(op, "lists need IN or BETWEEN"));
        }
        self.operand(operand, depth)
    }

    /// `?` or `?, ?` for LIMIT
    pub fn limit(&self, limit: &[Value]) -> Result<Fragment> {
        let result = match limit {
            [_] | [_, _] => Ok(Fragment::join(limit.iter().map(|v| self.bind(v)), ", ")),
            _ => Err(Error::unsupported_shape(format!(
                "LIMIT takes one or two values, got {}",
                limit.len()
            ))),
        };
        finish("limit", result)
    }

    /// `` `col` = ?, ... `` for UPDATE ... SET, in insertion order
    pub fn set(&self, assignments: impl IntoAssignments) -> Result<Fragment> {
        let result = assignments
            .into_assignments()
            .into_iter()
            .try_fold(Fragment::default(), |mut out, (column, operand)| {
                let piece = self.comparison(&column, "=", &operand, 0)?;
                out.append(", ", piece);
                Ok(out)
            });
        finish("set", result)
    }

    /// `( p1, p2 )` for PARTITION
    pub fn partitions<S: AsRef<str>>(&self, partitions: &[S]) -> String {
        let joined = partitions
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(", ");
        let text = format!("( {} )", self.quoter.name(&joined, NameMode::Scan));
        trace!(operation = "partitions", text = %text, params = 0, "rendered fragment");
        text
    }
}

fn check_depth(depth: usize) -> Result<()> {
    if depth > MAX_DEPTH {
        return Err(Error::NestingTooDeep { limit: MAX_DEPTH });
    }
    Ok(())
}

/// Log the outcome of a public operation
fn finish(operation: &'static str, result: Result<Fragment>) -> Result<Fragment> {
    match &result {
        Ok(frag) => trace!(
            operation,
            text = %frag.text,
            params = frag.params.len(),
            "rendered fragment"
        ),
        Err(err) => debug!(operation, error = %err, "rejected input"),
    }
    result
}

/// Column / value pairs for [`Assembler::set`]
pub trait IntoAssignments {
    fn into_assignments(self) -> Vec<(String, Operand)>;
}

impl<T> IntoAssignments for Vec<(&str, T)>
where
    T: Into<Operand>,
{
    fn into_assignments(self) -> Vec<(String, Operand)> {
        self.into_iter()
            .map(|(column, value)| (column.to_string(), value.into()))
            .collect()
    }
}

impl<T> IntoAssignments for Vec<(String, T)>
where
    T: Into<Operand>,
{
    fn into_assignments(self) -> Vec<(String, Operand)> {
        self.into_iter()
            .map(|(column, value)| (column, value.into()))
            .collect()
    }
}

impl<T> IntoAssignments for IndexMap<String, T>
where
    T: Into<Operand>,
{
    fn into_assignments(self) -> Vec<(String, Operand)> {
        self.into_iter()
            .map(|(column, value)| (column, value.into()))
            .collect()
    }
}

impl<T> IntoAssignments for IndexMap<&str, T>
where
    T: Into<Operand>,
{
    fn into_assignments(self) -> Vec<(String, Operand)> {
        self.into_iter()
            .map(|(column, value)| (column.to_string(), value.into()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Group, QuoterConfig};

    fn params() -> Assembler {
        Assembler::new(Quoter::default())
    }

    fn inline() -> Assembler {
        Assembler::inline(Quoter::default())
    }

    fn expr(text: &str) -> Expression {
        Expression::new(text, &Quoter::default())
    }

    fn ints(values: &[i64]) -> Vec<Value> {
        values.iter().copied().map(Value::Int).collect()
    }

    fn assert_balanced(frag: &Fragment) {
        assert_eq!(
            frag.placeholder_count(),
            frag.params.len(),
            "text: {}",
            frag.text
        );
    }

    #[test]
    fn test_in_list() {
        let frag = params()
            .in_list(&[Operand::from(10), Operand::from(20), Operand::from(30)])
            .unwrap();
        assert_eq!(frag.text, "( ?, ?, ? )");
        assert_eq!(frag.params, ints(&[10, 20, 30]));
    }

    #[test]
    fn test_in_list_nested() {
        let frag = params()
            .in_list(&[Operand::from(vec![10, 20]), Operand::from(vec![30, 40])])
            .unwrap();
        assert_eq!(frag.text, "( ( ?, ? ), ( ?, ? ) )");
        assert_eq!(frag.params, ints(&[10, 20, 30, 40]));

        let frag = params()
            .in_list(&[
                Operand::from(vec![vec![1, 2], vec![3, 4]]),
                Operand::from(vec![vec![5, 6], vec![7, 8]]),
            ])
            .unwrap();
        assert_eq!(
            frag.text,
            "( ( ( ?, ? ), ( ?, ? ) ), ( ( ?, ? ), ( ?, ? ) ) )"
        );
        assert_eq!(frag.params, ints(&[1, 2, 3, 4, 5, 6, 7, 8]));
    }

    #[test]
    fn test_in_list_nesting_adds_one_level() {
        let flat = params().in_list(&[1, 2, 3, 4].map(Operand::from)).unwrap();
        let nested = params()
            .in_list(&[Operand::from(vec![1, 2]), Operand::from(vec![3, 4])])
            .unwrap();
        assert_eq!(flat.params, nested.params);
        assert_eq!(
            nested.text.matches('(').count(),
            flat.text.matches('(').count() + 2
        );
    }

    #[test]
    fn test_in_list_with_expressions() {
        let frag = params()
            .in_list(&[Operand::from(expr("id")), Operand::from(40)])
            .unwrap();
        assert_eq!(frag.text, "( `id`, ? )");
        assert_eq!(frag.params, ints(&[40]));

        let concat = expr(r#"CONCAT( prefix + "str" )"#);
        let frag = params()
            .in_list(&[Operand::from(concat), Operand::from(40)])
            .unwrap();
        assert_eq!(frag.text, "( CONCAT( `prefix` + ? ), ? )");
        assert_eq!(frag.params, vec![Value::from("str"), Value::Int(40)]);
    }

    #[test]
    fn test_in_list_inline() {
        let frag = inline().in_list(&[10, 20, 30].map(Operand::from)).unwrap();
        assert_eq!(frag.text, "( 10, 20, 30 )");
        assert!(frag.params.is_empty());

        let frag = inline()
            .in_list(&[
                Operand::from(vec![vec![1, 2], vec![3, 4]]),
                Operand::from(vec![vec![5, 6], vec![7, 8]]),
            ])
            .unwrap();
        assert_eq!(
            frag.text,
            "( ( ( 1, 2 ), ( 3, 4 ) ), ( ( 5, 6 ), ( 7, 8 ) ) )"
        );
    }

    #[test]
    fn test_in_list_duplicates() {
        let items = [1, 2, 1, 3, 2].map(Operand::from);

        let frag = params().in_list(&items).unwrap();
        assert_eq!(frag.text, "( ?, ?, ?, ?, ? )");
        assert_eq!(frag.params, ints(&[1, 2, 1, 3, 2]));

        let frag = inline().in_list(&items).unwrap();
        assert_eq!(frag.text, "( 1, 2, 3 )");
    }

    #[test]
    fn test_in_list_duplicate_lists_in_either_form() {
        let items = [
            Operand::from(vec![1, 2]),
            Operand::Value(Value::from(vec![1, 2])),
            Operand::from(vec![3]),
        ];
        let frag = inline().in_list(&items).unwrap();
        assert_eq!(frag.text, "( ( 1, 2 ), ( 3 ) )");

        let frag = params().in_list(&items).unwrap();
        assert_eq!(frag.text, "( ( ?, ? ), ( ?, ? ), ( ? ) )");
        assert_eq!(frag.params, ints(&[1, 2, 1, 2, 3]));
    }

    #[test]
    fn test_columns() {
        let empty: [&str; 0] = [];
        assert_eq!(params().columns(&empty), "*");
        assert_eq!(params().columns(&["*"]), "*");
        assert_eq!(params().columns(&["a", "b", "c"]), "`a`, `b`, `c`");
        assert_eq!(
            params().columns(&["a as c1", "b as c2", "c"]),
            "`a` as `c1`, `b` as `c2`, `c`"
        );
        assert_eq!(
            params().columns(&["a c1", "b c2", "c"]),
            "`a` `c1`, `b` `c2`, `c`"
        );
        assert_eq!(
            params().columns(&["t1.a as c1", "t1.b as c2", "c"]),
            "`t1`.`a` as `c1`, `t1`.`b` as `c2`, `c`"
        );
        assert_eq!(params().columns(&["count(*)", "id"]), "count(*), `id`");
        assert_eq!(
            params().columns(&["count(*) AS total", "id"]),
            "count(*) AS `total`, `id`"
        );
        assert_eq!(
            params().columns(&["count( id ) AS total", "id"]),
            "count( `id` ) AS `total`, `id`"
        );
        assert_eq!(
            params().columns(&["count(id) AS total", "id"]),
            "count(`id`) AS `total`, `id`"
        );
        assert_eq!(params().columns(&["t1.id", "title"]), "`t1`.`id`, `title`");
    }

    #[test]
    fn test_tables() {
        assert_eq!(params().tables(&["tbl"]), "`tbl`");
        assert_eq!(params().tables(&["tbl AS t1"]), "`tbl` AS `t1`");
        assert_eq!(inline().tables(&["a", "b", "a"]), "`a`, `b`");
        assert_eq!(params().tables(&["a", "b", "a"]), "`a`, `b`");
    }

    #[test]
    fn test_conditions_null() {
        for entry in [
            ConditionEntry::binary("id", Value::Null),
            ConditionEntry::ternary("id", "IS", Value::Null),
        ] {
            let frag = params().conditions(&[entry.clone()]).unwrap();
            assert_eq!(frag.text, "`id` IS ?");
            assert_eq!(frag.params, vec![Value::Null]);

            let frag = inline().conditions(&[entry]).unwrap();
            assert_eq!(frag.text, "`id` IS NULL");
        }
    }

    #[test]
    fn test_conditions_basic() {
        let frag = params()
            .conditions(&[ConditionEntry::binary("id", 1)])
            .unwrap();
        assert_eq!(frag.text, "`id` = ?");
        assert_eq!(frag.params, ints(&[1]));

        let frag = params()
            .conditions(&[ConditionEntry::ternary("id", "<>", 1)])
            .unwrap();
        assert_eq!(frag.text, "`id` <> ?");

        let frag = inline()
            .conditions(&[ConditionEntry::raw("id = 1")])
            .unwrap();
        assert_eq!(frag.text, "`id` = 1");
    }

    #[test]
    fn test_conditions_chain() {
        let frag = params()
            .conditions(&[
                ConditionEntry::binary("id", 1),
                ConditionEntry::AND,
                ConditionEntry::ternary("age", ">", 10),
                ConditionEntry::AND,
                ConditionEntry::ternary("name", "like", "%l"),
                ConditionEntry::AND,
                ConditionEntry::binary("and", "x"),
            ])
            .unwrap();
        assert_eq!(
            frag.text,
            "`id` = ? AND `age` > ? AND `name` like ? AND `and` = ?"
        );
        assert_eq!(
            frag.params,
            vec![
                Value::Int(1),
                Value::Int(10),
                Value::from("%l"),
                Value::from("x"),
            ]
        );
    }

    #[test]
    fn test_conditions_chain_inline() {
        let frag = inline()
            .conditions(&[
                ConditionEntry::binary("id", 1),
                ConditionEntry::raw("AND"),
                ConditionEntry::ternary("age", ">", 10),
                ConditionEntry::raw("AND"),
                ConditionEntry::raw(r#"name like "%l""#),
                ConditionEntry::raw("AND"),
                ConditionEntry::binary("and", "x"),
            ])
            .unwrap();
        assert_eq!(
            frag.text,
            r#"`id` = 1 AND `age` > 10 AND `name` like "%l" AND `and` = 'x'"#
        );
        assert!(frag.params.is_empty());
    }

    #[test]
    fn test_conditions_with_expressions() {
        let frag = params()
            .conditions(&[
                ConditionEntry::binary("t1.id", expr("t2.id")),
                ConditionEntry::AND,
                ConditionEntry::ternary("t1.age", ">", expr("t2.age")),
                ConditionEntry::AND,
                ConditionEntry::ternary("t1.ctime", ">", expr("t2.id + t1.ctime")),
                ConditionEntry::AND,
                ConditionEntry::ternary("t2.ctime", "LIKE", expr(r#"t2.id + "abc""#)),
            ])
            .unwrap();
        assert_eq!(
            frag.text,
            "`t1`.`id` = `t2`.`id` AND `t1`.`age` > `t2`.`age` AND `t1`.`ctime` > `t2`.`id` + `t1`.`ctime` AND `t2`.`ctime` LIKE `t2`.`id` + ?"
        );
        assert_eq!(frag.params, vec![Value::from("abc")]);
    }

    #[test]
    fn test_conditions_between() {
        let frag = params()
            .conditions(&[ConditionEntry::ternary("age", "BETWEEN", vec![10, 20])])
            .unwrap();
        assert_eq!(frag.text, "`age` BETWEEN ? AND ?");
        assert_eq!(frag.params, ints(&[10, 20]));

        let between = ConditionEntry::ternary("age", "NOT BETWEEN", vec!["a", "z"]);
        let frag = params().conditions(&[between]).unwrap();
        assert_eq!(frag.text, "`age` NOT BETWEEN ? AND ?");
        assert_eq!(frag.params, vec![Value::from("a"), Value::from("z")]);

        let between = ConditionEntry::ternary("age", "NOT BETWEEN", vec![10, 20]);
        let frag = inline().conditions(&[between]).unwrap();
        assert_eq!(frag.text, "`age` NOT BETWEEN 10 AND 20");
    }

    #[test]
    fn test_conditions_between_needs_two_values() {
        for operand in [Operand::from(10), Operand::from(vec![1, 2, 3])] {
            let err = params()
                .conditions(&[ConditionEntry::ternary("age", "BETWEEN", operand)])
                .unwrap_err();
            assert!(matches!(err, Error::InvalidOperand { .. }));
        }
    }

    #[test]
    fn test_conditions_in() {
        let frag = params()
            .conditions(&[ConditionEntry::ternary("age", "IN", vec![10, 20])])
            .unwrap();
        assert_eq!(frag.text, "`age` IN ( ?, ? )");
        assert_eq!(frag.params, ints(&[10, 20]));

        let frag = params()
            .conditions(&[ConditionEntry::ternary("age", "NOT IN", vec!["a", "b"])])
            .unwrap();
        assert_eq!(frag.text, "`age` NOT IN ( ?, ? )");
        assert_eq!(frag.params, vec![Value::from("a"), Value::from("b")]);

        let frag = inline()
            .conditions(&[ConditionEntry::ternary("age", "NOT IN", vec!["a", "b"])])
            .unwrap();
        assert_eq!(frag.text, "`age` NOT IN ( 'a', 'b' )");

        let within = ConditionEntry::ternary("id", "in", expr("( 1, 2, t.id )"));
        let frag = params().conditions(&[within]).unwrap();
        assert_eq!(frag.text, "`id` in ( ?, ?, `t`.`id` )");
        assert_eq!(frag.params, ints(&[1, 2]));
    }

    #[test]
    fn test_conditions_in_rejects_scalar() {
        let err = params()
            .conditions(&[ConditionEntry::ternary("age", "IN", 10)])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidOperand { ref operator, .. } if operator == "IN"));
    }

    #[test]
    fn test_conditions_list_for_plain_operator() {
        let err = params()
            .conditions(&[ConditionEntry::binary("age", vec![1, 2])])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidOperand { .. }));

        let err = params()
            .conditions(&[ConditionEntry::ternary("age", ">", vec![1, 2])])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidOperand { .. }));
    }

    #[test]
    fn test_conditions_exists() {
        let frag = params()
            .conditions(&[ConditionEntry::ternary("sub", "NOT EXISTS", Value::Null)])
            .unwrap();
        assert_eq!(frag.text, "`sub` NOT EXISTS");
        assert!(frag.params.is_empty());
    }

    #[test]
    fn test_conditions_with_groups() {
        let g1 = Group::new();
        g1.and(("id", 1)).or(("id", 2));

        let frag = params().conditions(&[ConditionEntry::from(&g1)]).unwrap();
        assert_eq!(frag.text, "( `id` = ? OR `id` = ? )");
        assert_eq!(frag.params, ints(&[1, 2]));

        let g2 = Group::new();
        g2.and(("id", 3)).or(("id", 4));

        let entries = [
            ConditionEntry::from(&g1),
            ConditionEntry::AND,
            ConditionEntry::from(&g2),
        ];
        let frag = params().conditions(&entries).unwrap();
        assert_eq!(
            frag.text,
            "( `id` = ? OR `id` = ? ) AND ( `id` = ? OR `id` = ? )"
        );
        assert_eq!(frag.params, ints(&[1, 2, 3, 4]));

        let g3 = Group::new();
        g3.and(("age", ">", 10)).or(("age", "<", 5));
        g2.and(&g3);

        let frag = params().conditions(&entries).unwrap();
        assert_eq!(
            frag.text,
            "( `id` = ? OR `id` = ? ) AND ( `id` = ? OR `id` = ? AND ( `age` > ? OR `age` < ? ) )"
        );
        assert_eq!(frag.params, ints(&[1, 2, 3, 4, 10, 5]));

        let frag = inline().conditions(&entries).unwrap();
        assert_eq!(
            frag.text,
            "( `id` = 1 OR `id` = 2 ) AND ( `id` = 3 OR `id` = 4 AND ( `age` > 10 OR `age` < 5 ) )"
        );
    }

    #[test]
    fn test_conditions_self_nesting_is_bounded() {
        let group = Group::new();
        group.and(("id", 1)).or(&group);

        let err = params()
            .conditions(&[ConditionEntry::from(&group)])
            .unwrap_err();
        assert!(matches!(err, Error::NestingTooDeep { limit: MAX_DEPTH }));
    }

    #[test]
    fn test_conditions_placeholders_match_params() {
        let bounds = vec![Operand::from(expr("d + 1")), Operand::from(9)];
        let group = Group::new();
        group
            .and(("a", 1))
            .or(("b", "IN", vec![1, 2, 3]))
            .and(("c", "BETWEEN", bounds))
            .or(("e", Value::Null))
            .and("f > 'x?'");

        let frag = params()
            .conditions(&[ConditionEntry::from(&group)])
            .unwrap();
        assert_balanced(&frag);
        assert_eq!(frag.params.len(), 7);

        let frag = inline()
            .conditions(&[ConditionEntry::from(&group)])
            .unwrap();
        assert!(frag.params.is_empty());
        assert_eq!(frag.placeholder_count(), 0);
    }

    #[test]
    fn test_partitions() {
        assert_eq!(params().partitions(&["p1"]), "( `p1` )");
        assert_eq!(params().partitions(&["p1", "p2"]), "( `p1`, `p2` )");
    }

    #[test]
    fn test_limit() {
        let frag = params().limit(&ints(&[5])).unwrap();
        assert_eq!(frag.text, "?");
        assert_eq!(frag.params, ints(&[5]));

        let frag = params().limit(&ints(&[5, 10])).unwrap();
        assert_eq!(frag.text, "?, ?");
        assert_eq!(frag.params, ints(&[5, 10]));

        assert_eq!(inline().limit(&ints(&[5])).unwrap().text, "5");
        assert_eq!(inline().limit(&ints(&[5, 10])).unwrap().text, "5, 10");
    }

    #[test]
    fn test_limit_arity() {
        for limit in [vec![], ints(&[1, 2, 3])] {
            let err = params().limit(&limit).unwrap_err();
            assert!(matches!(err, Error::UnsupportedShape { .. }));
        }
    }

    #[test]
    fn test_set() {
        let frag = params().set(vec![("id", 1), ("name", 2)]).unwrap();
        assert_eq!(frag.text, "`id` = ?, `name` = ?");
        assert_eq!(frag.params, ints(&[1, 2]));

        let frag = params()
            .set(vec![
                ("id", Operand::from(expr("id + 1"))),
                ("name", Operand::from("x")),
            ])
            .unwrap();
        assert_eq!(frag.text, "`id` = `id` + ?, `name` = ?");
        assert_eq!(frag.params, vec![Value::Int(1), Value::from("x")]);

        let frag = params()
            .set(vec![
                ("id", expr("id + 1")),
                ("name", expr("CONCAT( name, 'x' )")),
            ])
            .unwrap();
        assert_eq!(frag.text, "`id` = `id` + ?, `name` = CONCAT( `name`, ? )");
        assert_eq!(frag.params, vec![Value::Int(1), Value::from("x")]);

        let frag = params().set(vec![("t1.name", expr("t2.name"))]).unwrap();
        assert_eq!(frag.text, "`t1`.`name` = `t2`.`name`");
        assert!(frag.params.is_empty());
    }

    #[test]
    fn test_set_inline() {
        let frag = inline()
            .set(vec![("id", Operand::from(1)), ("name", Operand::from("x"))])
            .unwrap();
        assert_eq!(frag.text, "`id` = 1, `name` = 'x'");

        let frag = inline()
            .set(vec![
                ("id", expr("id + 1")),
                ("name", expr("CONCAT( name, 'x' )")),
            ])
            .unwrap();
        assert_eq!(frag.text, "`id` = `id` + 1, `name` = CONCAT( `name`, 'x' )");
        assert!(frag.params.is_empty());
    }

    #[test]
    fn test_set_keeps_insertion_order() {
        let mut values: IndexMap<String, Operand> = IndexMap::new();
        values.insert("z".to_string(), Operand::from(1));
        values.insert("a".to_string(), Operand::from(Value::Null));
        let frag = params().set(values).unwrap();
        assert_eq!(frag.text, "`z` = ?, `a` = ?");
        assert_eq!(frag.params, vec![Value::Int(1), Value::Null]);
    }

    #[test]
    fn test_from_config() {
        let config = Config {
            quoter: QuoterConfig::ansi(),
            mode: RenderMode::Inline,
        };
        let assembler = Assembler::from_config(&config).unwrap();
        assert_eq!(assembler.mode(), RenderMode::Inline);
        let frag = assembler
            .conditions(&[ConditionEntry::binary("t.id", 7)])
            .unwrap();
        assert_eq!(frag.text, r#""t"."id" = 7"#);
    }

    #[test]
    fn test_ansi_quoter_with_expressions() {
        let quoter = Quoter::new(QuoterConfig::ansi()).unwrap();
        let assembler = Assembler::new(quoter.clone());

        let other = Expression::new("b.y", &quoter);
        let frag = assembler
            .conditions(&[ConditionEntry::binary("a.x", other)])
            .unwrap();
        assert_eq!(frag.text, r#""a"."x" = "b"."y""#);
        assert!(frag.params.is_empty());

        let frag = assembler
            .set(vec![("t.hits", Expression::new("t.hits + 1", &quoter))])
            .unwrap();
        assert_eq!(frag.text, r#""t"."hits" = "t"."hits" + ?"#);
        assert_eq!(frag.params, ints(&[1]));

        let concat = Expression::new("concat( t.name, 'x' )", &quoter);
        let frag = Assembler::inline(quoter)
            .set(vec![("t.name", concat)])
            .unwrap();
        assert_eq!(frag.text, r#""t"."name" = concat( "t"."name", 'x' )"#);
        assert!(frag.params.is_empty());
    }

    #[test]
    fn test_inline_non_finite_float() {
        let frag = inline()
            .conditions(&[ConditionEntry::binary("ratio", f64::NAN)])
            .unwrap();
        assert_eq!(frag.text, "`ratio` = NULL");

        let frag = inline().set(vec![("ratio", f64::INFINITY)]).unwrap();
        assert_eq!(frag.text, "`ratio` = NULL");
    }
}
