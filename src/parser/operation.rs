//! Typed operations produced by the parser
//!
//! Every value here is built fresh for one input line and handed to the
//! executor. Nothing is mutated after parsing.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// A fully parsed request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum Operation {
    Query(QueryOperation),
    Get(GetOperation),
    Count(CountOperation),
    ListCollections(ListCollectionsCommand),
    Pager(PagerCommand),
}

impl Operation {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Query(_) => "query",
            Operation::Get(_) => "get",
            Operation::Count(_) => "count",
            Operation::ListCollections(_) => "list_collections",
            Operation::Pager(_) => "pager",
        }
    }
}

/// `QUERY <path> [SELECT ..] [WHERE ..] [ORDER BY ..] [LIMIT n]`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryOperation {
    pub collection_path: String,
    pub selected_fields: Vec<String>,
    pub filters: Vec<Filter>,
    pub order_by: Vec<OrderSpec>,
    /// 0 means unbounded
    pub limit: u64,
}

/// `GET <collection>/<id>`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GetOperation {
    pub collection_path: String,
    pub document_id: String,
}

/// `COUNT <path> [WHERE ..]`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CountOperation {
    pub collection_path: String,
    pub filters: Vec<Filter>,
}

/// `\d [basePath]`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListCollectionsCommand {
    /// Empty means the store root
    pub base_document_path: String,
}

/// `\pager on|off`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PagerCommand {
    pub enabled: bool,
}

/// One `field operator value` predicate; filters are AND-combined
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Filter {
    pub field: String,
    pub operator: Operator,
    pub value: FilterValue,
}

/// Supported filter operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Operator {
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    NotEq,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Gte,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Lte,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "array-contains")]
    ArrayContains,
    #[serde(rename = "array-contains-any")]
    ArrayContainsAny,
}

impl Operator {
    /// Store-side spelling of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "==",
            Operator::NotEq => "!=",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::In => "in",
            Operator::ArrayContains => "array-contains",
            Operator::ArrayContainsAny => "array-contains-any",
        }
    }

    /// Whether the operator compares against a list of values
    pub fn takes_array(&self) -> bool {
        matches!(self, Operator::In | Operator::ArrayContainsAny)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Literal on the right-hand side of a filter
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum FilterValue {
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<ScalarValue>),
    Timestamp(DateTime<FixedOffset>),
}

impl FilterValue {
    pub fn is_array(&self) -> bool {
        matches!(self, FilterValue::Array(_))
    }

    /// Name of the value kind, for error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            FilterValue::Int(_) => "int",
            FilterValue::Float(_) => "float",
            FilterValue::String(_) => "string",
            FilterValue::Array(_) => "array",
            FilterValue::Timestamp(_) => "timestamp",
        }
    }
}

/// Array element
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Int(i64),
    Float(f64),
    String(String),
}

/// `ORDER BY field [ASC|DESC]`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSpec {
    pub field: String,
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}
