use serde_json::Value;

use super::error::FilterError;

/// Field-level operators understood inside a WHERE document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Gt,
    Lt,
    Lte,
    /// Case-insensitive substring match; the operand is matched literally.
    Find,
}

impl FilterOp {
    pub fn from_key(key: &str) -> Result<Self, FilterError> {
        Ok(match key {
            "$eq" => FilterOp::Eq,
            "$gt" => FilterOp::Gt,
            "$lt" => FilterOp::Lt,
            "$lte" => FilterOp::Lte,
            "$find" => FilterOp::Find,
            other => return Err(FilterError::UnsupportedOperator(other.to_string())),
        })
    }

    /// SQL infix for operators that compare against a single bound value
    pub fn comparison(self) -> Option<&'static str> {
        match self {
            FilterOp::Eq => Some("="),
            FilterOp::Gt => Some(">"),
            FilterOp::Lt => Some("<"),
            FilterOp::Lte => Some("<="),
            FilterOp::Find => None,
        }
    }
}

/// Everything a SELECT over one table can be narrowed by
#[derive(Debug, Clone, Default)]
pub struct FilterData {
    pub select: Option<Vec<String>>,
    pub where_clause: Option<Value>,
    pub order: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct FilterWhereInfo {
    pub column: String,
    pub operator: FilterOp,
    pub data: Value,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FilterOrderInfo {
    pub column: String,
    pub sort: SortDirection,
}

/// Generated statement plus its positional parameters, in placeholder order
#[derive(Debug, Clone)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<Value>,
}
