//! Translation of composed queries into PostgreSQL
//!
//! Every value reaching the statement is a bind parameter: the collection
//! path as text, field paths as `text[]` for the `#>` operator and
//! comparands as `jsonb`. Element scans over `jsonb_array_elements` are
//! guarded by `CASE` so non-array fields never reach the set-returning
//! function.
//!
//! Ordering uses PostgreSQL's native jsonb ordering, which ranks types
//! differently from the in-process evaluator; within one JSON type the
//! results agree.

use crate::core::query::{Clause, FieldPath, FilterOp, Query};
use serde_json::Value;
use tokio_postgres::types::ToSql;

/// One bind parameter of a generated statement
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Text(String),
    Path(Vec<String>),
    Json(Value),
}

impl SqlParam {
    pub fn as_sql(&self) -> &(dyn ToSql + Sync) {
        match self {
            SqlParam::Text(text) => text,
            SqlParam::Path(segments) => segments,
            SqlParam::Json(value) => value,
        }
    }
}

/// Statement text with its bind parameters in `$n` order
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

impl Statement {
    pub fn param_refs(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params.iter().map(SqlParam::as_sql).collect()
    }
}

#[derive(Default)]
struct Binder {
    params: Vec<SqlParam>,
}

impl Binder {
    fn bind(&mut self, param: SqlParam) -> String {
        self.params.push(param);
        format!("${}", self.params.len())
    }

    fn field(&mut self, field: &FieldPath) -> String {
        let path = self.bind(SqlParam::Path(field.segments().to_vec()));
        format!("(data #> {path}::text[])")
    }

    fn json(&mut self, value: &Value) -> String {
        let param = self.bind(SqlParam::Json(value.clone()));
        format!("{param}::jsonb")
    }
}

fn filter_expr(binder: &mut Binder, field: &FieldPath, op: FilterOp, value: &Value) -> String {
    let f = binder.field(field);
    let v = binder.json(value);

    let range = |sql_op: &str| {
        format!(
            "(jsonb_typeof({f}) = jsonb_typeof({v}) AND jsonb_typeof({f}) NOT IN ('array', 'object') AND {f} {sql_op} {v})"
        )
    };

    match op {
        FilterOp::Eq => format!("{f} = {v}"),
        FilterOp::NotEq => format!("({f} IS NOT NULL AND {f} <> {v})"),
        FilterOp::Lt => range("<"),
        FilterOp::Le => range("<="),
        FilterOp::Gt => range(">"),
        FilterOp::Ge => range(">="),
        FilterOp::ArrayContains => format!(
            "(CASE WHEN jsonb_typeof({f}) = 'array' THEN EXISTS (SELECT 1 FROM jsonb_array_elements({f}) AS e(x) WHERE e.x = {v}) ELSE false END)"
        ),
        FilterOp::ArrayContainsAny => format!(
            "(CASE WHEN jsonb_typeof({f}) = 'array' THEN EXISTS (SELECT 1 FROM jsonb_array_elements({f}) AS e(x) WHERE e.x IN (SELECT jsonb_array_elements({v}))) ELSE false END)"
        ),
        FilterOp::In => format!("{f} IN (SELECT jsonb_array_elements({v}))"),
        FilterOp::NotIn => {
            format!("({f} IS NOT NULL AND {f} NOT IN (SELECT jsonb_array_elements({v})))")
        }
    }
}

/// Builds the `SELECT id, data` statement for `query`
///
/// Without an ordering clause rows come back sorted by document id.
pub fn build_select(query: &Query) -> Statement {
    let mut binder = Binder::default();
    let collection = binder.bind(SqlParam::Text(query.collection_path().to_string()));
    let mut predicates = vec![format!("collection = {collection}")];
    let mut order_by = String::from(" ORDER BY id");

    for clause in query.clauses() {
        match clause {
            Clause::Filter { field, op, value } => {
                predicates.push(filter_expr(&mut binder, field, *op, value));
            }
            Clause::OrderBy { field, direction } => {
                let f = binder.field(field);
                predicates.push(format!("{f} IS NOT NULL"));
                order_by = format!(" ORDER BY {f} {}, id", direction.as_sql());
            }
        }
    }

    Statement {
        sql: format!(
            "SELECT id, data FROM documents WHERE {}{}",
            predicates.join(" AND "),
            order_by
        ),
        params: binder.params,
    }
}
