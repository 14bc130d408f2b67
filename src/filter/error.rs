use thiserror::Error;

/// Rejections raised while turning a filter document into SQL
#[derive(Debug, Error, PartialEq)]
pub enum FilterError {
    #[error("invalid table name `{0}`")]
    InvalidTableName(String),

    #[error("invalid column name `{0}`")]
    InvalidColumn(String),

    #[error("malformed WHERE document: {0}")]
    InvalidWhereClause(String),

    #[error("unsupported filter operator `{0}`")]
    UnsupportedOperator(String),

    #[error("bad operand: {0}")]
    InvalidOperatorData(String),
}
