//! Translation of composed queries into Cosmos DB SQL
//!
//! Field segments and comparands are emitted as JSON literals, which Cosmos
//! SQL accepts verbatim, so no user text is spliced into the statement
//! unquoted. Mismatched types compare as undefined in Cosmos and drop out of
//! the result, matching the in-process evaluator.

use crate::core::query::{Clause, FieldPath, FilterOp, Query};
use crate::domain::{CookbookError, Result};
use serde_json::Value;

fn literal(value: &impl serde::Serialize) -> Result<String> {
    serde_json::to_string(value).map_err(|e| CookbookError::Serialization(e.to_string()))
}

/// `c.data["a"]["b"]`
fn field_expr(field: &FieldPath) -> Result<String> {
    let mut expr = String::from("c.data");
    for segment in field.segments() {
        expr.push('[');
        expr.push_str(&literal(segment)?);
        expr.push(']');
    }
    Ok(expr)
}

fn filter_expr(field: &FieldPath, op: FilterOp, value: &Value) -> Result<String> {
    let expr = field_expr(field)?;
    let lit = literal(value)?;
    Ok(match op {
        FilterOp::Eq => format!("{expr} = {lit}"),
        FilterOp::NotEq => format!("(IS_DEFINED({expr}) AND {expr} != {lit})"),
        FilterOp::Lt => format!("{expr} < {lit}"),
        FilterOp::Le => format!("{expr} <= {lit}"),
        FilterOp::Gt => format!("{expr} > {lit}"),
        FilterOp::Ge => format!("{expr} >= {lit}"),
        FilterOp::ArrayContains => format!("ARRAY_CONTAINS({expr}, {lit})"),
        FilterOp::ArrayContainsAny => {
            format!("EXISTS(SELECT VALUE v FROM v IN {expr} WHERE ARRAY_CONTAINS({lit}, v))")
        }
        FilterOp::In => format!("ARRAY_CONTAINS({lit}, {expr})"),
        FilterOp::NotIn => format!("(IS_DEFINED({expr}) AND NOT ARRAY_CONTAINS({lit}, {expr}))"),
    })
}

/// Builds the SQL text for `query`
///
/// The statement is scoped to the query's collection and projects `id` and
/// `data`.
pub fn build_sql(query: &Query) -> Result<String> {
    let mut predicates = vec![format!(
        "c.collection = {}",
        literal(&query.collection_path().to_string())?
    )];
    let mut order_by = None;

    for clause in query.clauses() {
        match clause {
            Clause::Filter { field, op, value } => predicates.push(filter_expr(field, *op, value)?),
            Clause::OrderBy { field, direction } => {
                order_by = Some(format!(" ORDER BY {} {}", field_expr(field)?, direction.as_sql()));
            }
        }
    }

    Ok(format!(
        "SELECT c.id, c.data FROM c WHERE {}{}",
        predicates.join(" AND "),
        order_by.unwrap_or_default()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::query::{build_query, Filter, OrderBy};
    use crate::domain::CollectionPath;
    use serde_json::json;

    fn recipes() -> CollectionPath {
        CollectionPath::parse("RECIPES").unwrap()
    }

    #[test]
    fn test_unfiltered_collection() {
        let sql = build_sql(&Query::collection(recipes())).unwrap();
        assert_eq!(sql, r#"SELECT c.id, c.data FROM c WHERE c.collection = "RECIPES""#);
    }

    #[test]
    fn test_filter_and_order() {
        let query = build_query(
            &recipes(),
            &[Filter::eq("author", "Bob")],
            Some(&OrderBy::from("title")),
        )
        .unwrap();

        assert_eq!(
            build_sql(&query).unwrap(),
            r#"SELECT c.id, c.data FROM c WHERE c.collection = "RECIPES" AND c.data["author"] = "Bob" ORDER BY c.data["title"] ASC"#
        );
    }

    #[test]
    fn test_nested_field_and_list_operators() {
        let query = build_query(
            &recipes(),
            &[
                Filter::new("meta.servings", FilterOp::Ge, 4),
                Filter::new("tags", FilterOp::ArrayContainsAny, json!(["vegan", "quick"])),
                Filter::new("author", FilterOp::NotIn, json!(["Eve"])),
            ],
            Some(&OrderBy::desc("meta.servings")),
        )
        .unwrap();

        let sql = build_sql(&query).unwrap();
        assert!(sql.contains(r#"c.data["meta"]["servings"] >= 4"#));
        assert!(sql.contains(
            r#"EXISTS(SELECT VALUE v FROM v IN c.data["tags"] WHERE ARRAY_CONTAINS(["vegan","quick"], v))"#
        ));
        assert!(sql.contains(
            r#"(IS_DEFINED(c.data["author"]) AND NOT ARRAY_CONTAINS(["Eve"], c.data["author"]))"#
        ));
        assert!(sql.ends_with(r#"ORDER BY c.data["meta"]["servings"] DESC"#));
    }

    #[test]
    fn test_quotes_are_escaped() {
        let query = build_query(&recipes(), &[Filter::eq("title", r#"Bob's "best""#)], None).unwrap();
        let sql = build_sql(&query).unwrap();
        assert!(sql.contains(r#"c.data["title"] = "Bob's \"best\"""#));
    }
}
