//! Query construction
//!
//! A [`Query`] is a base collection plus an ordered list of [`Clause`]s.
//! [`build_query`] folds filters onto the base left-to-right and appends the
//! optional ordering as the single terminal clause. Backends translate the
//! clause list into their own query language; [`eval`] is the in-process
//! reference evaluator used by the memory store.

pub mod eval;

use crate::domain::{CollectionPath, CookbookError, Result};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Comparison operator of a filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOp {
    Eq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    ArrayContains,
    ArrayContainsAny,
    In,
    NotIn,
}

impl FilterOp {
    pub const ALL: [FilterOp; 10] = [
        FilterOp::Eq,
        FilterOp::NotEq,
        FilterOp::Lt,
        FilterOp::Le,
        FilterOp::Gt,
        FilterOp::Ge,
        FilterOp::ArrayContains,
        FilterOp::ArrayContainsAny,
        FilterOp::In,
        FilterOp::NotIn,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FilterOp::Eq => "==",
            FilterOp::NotEq => "!=",
            FilterOp::Lt => "<",
            FilterOp::Le => "<=",
            FilterOp::Gt => ">",
            FilterOp::Ge => ">=",
            FilterOp::ArrayContains => "array-contains",
            FilterOp::ArrayContainsAny => "array-contains-any",
            FilterOp::In => "in",
            FilterOp::NotIn => "not-in",
        }
    }

    /// Operators whose comparand must be an array
    pub fn takes_list(self) -> bool {
        matches!(
            self,
            FilterOp::ArrayContainsAny | FilterOp::In | FilterOp::NotIn
        )
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterOp {
    type Err = CookbookError;

    fn from_str(s: &str) -> Result<Self> {
        FilterOp::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| CookbookError::InvalidArgument(format!("Unknown filter operator '{s}'")))
    }
}

/// Sort direction of an ordering clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    pub fn as_sql(self) -> &'static str {
        match self {
            Direction::Ascending => "ASC",
            Direction::Descending => "DESC",
        }
    }
}

impl FromStr for Direction {
    type Err = CookbookError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Direction::Ascending),
            "desc" | "descending" => Ok(Direction::Descending),
            _ => Err(CookbookError::InvalidArgument(format!(
                "Unknown sort direction '{s}'. Must be asc or desc"
            ))),
        }
    }
}

/// Dotted field path addressing a (possibly nested) value in a document
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    /// Parses `"a.b.c"`
    ///
    /// # Errors
    ///
    /// Returns [`CookbookError::InvalidArgument`] for blank paths or empty segments
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Err(CookbookError::InvalidArgument(
                "Field path cannot be empty".to_string(),
            ));
        }
        let segments: Vec<String> = raw.split('.').map(str::to_string).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(CookbookError::InvalidArgument(format!(
                "Field path '{raw}' contains an empty segment"
            )));
        }
        Ok(Self(segments))
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Looks the field up in `doc`, `None` when any segment is missing
    pub fn resolve<'a>(&self, doc: &'a Value) -> Option<&'a Value> {
        self.0
            .iter()
            .try_fold(doc, |current, segment| current.as_object()?.get(segment))
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

/// Filter descriptor: `(field, operator, comparand)`
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub op: FilterOp,
    pub value: Value,
}

impl Filter {
    pub fn new(field: impl Into<String>, op: FilterOp, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    /// Shorthand for an equality filter
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, FilterOp::Eq, value)
    }
}

/// Ordering descriptor
///
/// A bare field name converts to an ascending ordering:
///
/// ```
/// use cookbook::core::query::{Direction, OrderBy};
///
/// let order = OrderBy::from("title");
/// assert_eq!(order.direction, Direction::Ascending);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

impl OrderBy {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Ascending,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Descending,
        }
    }
}

impl From<&str> for OrderBy {
    fn from(field: &str) -> Self {
        OrderBy::asc(field)
    }
}

impl From<String> for OrderBy {
    fn from(field: String) -> Self {
        OrderBy::asc(field)
    }
}

/// One composed clause of a query
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    Filter {
        field: FieldPath,
        op: FilterOp,
        value: Value,
    },
    OrderBy {
        field: FieldPath,
        direction: Direction,
    },
}

/// Executable query over one collection
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    collection: CollectionPath,
    clauses: Vec<Clause>,
}

impl Query {
    /// Unfiltered query over every document of `collection`
    pub fn collection(collection: CollectionPath) -> Self {
        Self {
            collection,
            clauses: Vec::new(),
        }
    }

    pub fn collection_path(&self) -> &CollectionPath {
        &self.collection
    }

    /// Clauses in application order
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Whether the query is the bare collection
    pub fn is_unfiltered(&self) -> bool {
        self.clauses.is_empty()
    }

    /// The terminal ordering clause, if any
    pub fn ordering(&self) -> Option<(&FieldPath, Direction)> {
        match self.clauses.last() {
            Some(Clause::OrderBy { field, direction }) => Some((field, *direction)),
            _ => None,
        }
    }

    fn with_filter(mut self, filter: &Filter) -> Result<Self> {
        let field = FieldPath::parse(&filter.field)?;
        if filter.op.takes_list() && !filter.value.is_array() {
            return Err(CookbookError::InvalidArgument(format!(
                "Filter '{} {}' requires an array comparand",
                filter.field, filter.op
            )));
        }
        self.clauses.push(Clause::Filter {
            field,
            op: filter.op,
            value: filter.value.clone(),
        });
        Ok(self)
    }

    fn with_order(mut self, order: &OrderBy) -> Result<Self> {
        let field = FieldPath::parse(&order.field)?;
        self.clauses.push(Clause::OrderBy {
            field,
            direction: order.direction,
        });
        Ok(self)
    }
}

/// Composes `filters` and an optional `order` onto the base collection
///
/// Filters are applied in the order supplied and the ordering, when present,
/// is the last clause. With no filters and no ordering the result equals
/// `Query::collection(collection)`. Filter/ordering compatibility is left to
/// the backend.
///
/// # Errors
///
/// Returns [`CookbookError::InvalidArgument`] for malformed field paths or a
/// list operator given a non-array comparand
pub fn build_query(
    collection: &CollectionPath,
    filters: &[Filter],
    order: Option<&OrderBy>,
) -> Result<Query> {
    let query = filters
        .iter()
        .try_fold(Query::collection(collection.clone()), Query::with_filter)?;

    match order {
        Some(order) => query.with_order(order),
        None => Ok(query),
    }
}
