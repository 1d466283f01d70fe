use sqlfrag_core::{
    op, Assembler, ConditionEntry, Config, Expression, Fragment, Group, JoinItem, JoinKind,
    Operand, OrderTerm, Quoter, Value,
};

fn main() -> sqlfrag_core::Result<()> {
    let quoter = Quoter::default();
    let assembler = Assembler::new(quoter.clone());

    // SELECT with a nested OR group
    let status = Group::new();
    status
        .and(("u.status", "active"))
        .or(("u.role", op::IN, vec!["admin", "owner"]));

    let columns = assembler.columns(&["u.id", "u.name", "count(o.id) AS orders"]);
    let select = Fragment::join(
        vec![
            Fragment::text_only(columns).prefixed("SELECT"),
            assembler
                .join(&[
                    "users AS u".into(),
                    JoinItem::clause(JoinKind::Left, "orders AS o"),
                    JoinItem::on(vec![ConditionEntry::binary(
                        "o.user_id",
                        Expression::new("u.id", &quoter),
                    )]),
                ])?
                .prefixed("FROM"),
            assembler
                .conditions(&[
                    ConditionEntry::ternary("u.age", op::GTE, 18),
                    ConditionEntry::AND,
                    ConditionEntry::from(&status),
                ])?
                .prefixed("WHERE"),
            Fragment::text_only(assembler.group_by(&["u.id".into()])?).prefixed("GROUP BY"),
            Fragment::text_only(assembler.order_by(&[OrderTerm::desc("orders")]))
                .prefixed("ORDER BY"),
            assembler.limit(&[Value::Int(20)])?.prefixed("LIMIT"),
        ],
        " ",
    );
    println!("SELECT SQL: {}", select);
    println!("SELECT params: {:?}", select.params);

    // UPDATE with an expression on the right-hand side
    let update = Fragment::join(
        vec![
            Fragment::text_only(assembler.tables(&["users"])).prefixed("UPDATE"),
            assembler
                .set(vec![
                    (
                        "visits",
                        Operand::from(Expression::new("visits + 1", &quoter)),
                    ),
                    ("last_seen", Operand::from("2024-01-15")),
                ])?
                .prefixed("SET"),
            assembler
                .conditions(&[ConditionEntry::binary("id", 123)])?
                .prefixed("WHERE"),
        ],
        " ",
    );
    println!("UPDATE SQL: {}", update);

    // Same conditions rendered inline, for logs
    let config = Config::from_json(r#"{ "mode": "inline" }"#)?;
    let inline = Assembler::from_config(&config)?;
    let filter = inline.conditions(&[
        ConditionEntry::ternary("age", "BETWEEN", vec![18, 65]),
        ConditionEntry::AND,
        ConditionEntry::binary("deleted_at", Value::Null),
    ])?;
    println!("Inline WHERE: {}", filter);

    Ok(())
}
