//! In-process query evaluation
//!
//! Semantics:
//! - range comparisons (`<`, `<=`, `>`, `>=`) only match scalar values of
//!   the same JSON type as the comparand
//! - numbers compare by value, so `250` equals `250.0`
//! - `!=` and `not-in` never match documents lacking the field
//! - ordering drops documents lacking the order field, then sorts by type
//!   rank (null < bool < number < string < array < object) and value

use super::{Clause, Direction, FieldPath, FilterOp, Query};
use serde_json::Value;
use std::cmp::Ordering;

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Equality with numeric normalization
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).is_some_and(|y| values_equal(x, y)))
        }
        _ => a == b,
    }
}

/// Ordering between two scalars of the same type, `None` otherwise
fn compare_scalars(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

/// Total order used for sorting
pub fn sort_order(a: &Value, b: &Value) -> Ordering {
    type_rank(a).cmp(&type_rank(b)).then_with(|| match (a, b) {
        (Value::Array(xs), Value::Array(ys)) => xs
            .iter()
            .zip(ys)
            .map(|(x, y)| sort_order(x, y))
            .find(|o| o.is_ne())
            .unwrap_or_else(|| xs.len().cmp(&ys.len())),
        (Value::Object(_), Value::Object(_)) => a.to_string().cmp(&b.to_string()),
        _ => compare_scalars(a, b).unwrap_or(Ordering::Equal),
    })
}

fn contains(list: &Value, needle: &Value) -> bool {
    list.as_array()
        .is_some_and(|items| items.iter().any(|item| values_equal(item, needle)))
}

/// Whether `doc` satisfies one filter clause
pub fn matches_filter(doc: &Value, field: &FieldPath, op: FilterOp, comparand: &Value) -> bool {
    let Some(actual) = field.resolve(doc) else {
        return false;
    };

    match op {
        FilterOp::Eq => values_equal(actual, comparand),
        FilterOp::NotEq => !values_equal(actual, comparand),
        FilterOp::Lt => compare_scalars(actual, comparand) == Some(Ordering::Less),
        FilterOp::Le => matches!(
            compare_scalars(actual, comparand),
            Some(Ordering::Less | Ordering::Equal)
        ),
        FilterOp::Gt => compare_scalars(actual, comparand) == Some(Ordering::Greater),
        FilterOp::Ge => matches!(
            compare_scalars(actual, comparand),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        FilterOp::ArrayContains => contains(actual, comparand),
        FilterOp::ArrayContainsAny => comparand
            .as_array()
            .is_some_and(|wanted| wanted.iter().any(|w| contains(actual, w))),
        FilterOp::In => contains(comparand, actual),
        FilterOp::NotIn => comparand.is_array() && !contains(comparand, actual),
    }
}

/// Applies every clause of `query` to `docs`
///
/// `data` projects each item onto its JSON body.
pub fn evaluate<T>(query: &Query, docs: Vec<T>, data: impl Fn(&T) -> &Value) -> Vec<T> {
    let mut result = docs;
    for clause in query.clauses() {
        match clause {
            Clause::Filter { field, op, value } => {
                result.retain(|doc| matches_filter(data(doc), field, *op, value));
            }
            Clause::OrderBy { field, direction } => {
                result.retain(|doc| field.resolve(data(doc)).is_some());
                result.sort_by(|a, b| {
                    let ordering = match (field.resolve(data(a)), field.resolve(data(b))) {
                        (Some(x), Some(y)) => sort_order(x, y),
                        _ => Ordering::Equal,
                    };
                    match direction {
                        Direction::Ascending => ordering,
                        Direction::Descending => ordering.reverse(),
                    }
                });
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::query::{build_query, Filter, OrderBy};
    use crate::domain::CollectionPath;
    use serde_json::json;
    use test_case::test_case;

    fn field(raw: &str) -> FieldPath {
        FieldPath::parse(raw).unwrap()
    }

    #[test_case(json!({"n": 5}), FilterOp::Eq, json!(5.0), true ; "numeric equality normalizes")]
    #[test_case(json!({"n": 5}), FilterOp::Lt, json!(10), true ; "less than")]
    #[test_case(json!({"n": 5}), FilterOp::Lt, json!("10"), false ; "mixed types never compare")]
    #[test_case(json!({"n": 5}), FilterOp::Ge, json!(5), true ; "greater or equal")]
    #[test_case(json!({"s": "b"}), FilterOp::Gt, json!("a"), true ; "string comparison")]
    #[test_case(json!({}), FilterOp::NotEq, json!("x"), false ; "not equal excludes missing field")]
    #[test_case(json!({"s": null}), FilterOp::NotEq, json!("x"), true ; "not equal matches null")]
    #[test_case(json!({"tags": ["a", "b"]}), FilterOp::ArrayContains, json!("b"), true ; "array contains")]
    #[test_case(json!({"tags": "b"}), FilterOp::ArrayContains, json!("b"), false ; "array contains needs array")]
    #[test_case(json!({"tags": ["a"]}), FilterOp::ArrayContainsAny, json!(["z", "a"]), true ; "array contains any")]
    #[test_case(json!({"s": "b"}), FilterOp::In, json!(["a", "b"]), true ; "in")]
    #[test_case(json!({"s": "c"}), FilterOp::NotIn, json!(["a", "b"]), true ; "not in")]
    #[test_case(json!({}), FilterOp::NotIn, json!(["a"]), false ; "not in excludes missing field")]
    fn test_matches_filter(doc: Value, op: FilterOp, comparand: Value, expected: bool) {
        let name = doc
            .as_object()
            .and_then(|o| o.keys().next().cloned())
            .unwrap_or_else(|| "s".to_string());
        assert_eq!(matches_filter(&doc, &field(&name), op, &comparand), expected);
    }

    #[test]
    fn test_nested_field_filter() {
        let doc = json!({"meta": {"servings": 4}});
        assert!(matches_filter(&doc, &field("meta.servings"), FilterOp::Eq, &json!(4)));
        assert!(!matches_filter(&doc, &field("meta.missing"), FilterOp::Eq, &json!(4)));
    }

    #[test]
    fn test_sort_order_by_type_rank() {
        let mut values = vec![json!("a"), json!(1), json!(null), json!({"k": 1}), json!(true), json!([1])];
        values.sort_by(sort_order);
        assert_eq!(
            values,
            vec![json!(null), json!(true), json!(1), json!("a"), json!([1]), json!({"k": 1})]
        );
    }

    #[test]
    fn test_evaluate_filters_then_orders() {
        let docs = vec![
            json!({"title": "Tarte", "author": "Bob"}),
            json!({"title": "Crepes", "author": "Bob"}),
            json!({"title": "Soupe", "author": "Alice"}),
            json!({"author": "Bob"}),
        ];
        let query = build_query(
            &CollectionPath::parse("RECIPES").unwrap(),
            &[Filter::eq("author", "Bob")],
            Some(&OrderBy::from("title")),
        )
        .unwrap();

        let result = evaluate(&query, docs, |d| d);
        let titles: Vec<&str> = result.iter().filter_map(|d| d["title"].as_str()).collect();
        assert_eq!(titles, vec!["Crepes", "Tarte"]);
    }

    #[test]
    fn test_evaluate_descending() {
        let docs = vec![json!({"n": 1}), json!({"n": 3}), json!({"n": 2})];
        let query = build_query(
            &CollectionPath::parse("C").unwrap(),
            &[],
            Some(&OrderBy::desc("n")),
        )
        .unwrap();
        let result = evaluate(&query, docs, |d| d);
        assert_eq!(result, vec![json!({"n": 3}), json!({"n": 2}), json!({"n": 1})]);
    }
}
