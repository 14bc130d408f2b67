use serde_json::Value;

use super::error::FilterError;
use super::filter::is_identifier;
use super::types::{FilterOp, FilterWhereInfo};

/// Translates a Mongo-style WHERE document into a parameterised SQL predicate.
///
/// `{ "color": "Red" }` is implicit equality, `{ "stock": { "$lt": 5 } }` applies an
/// operator, sibling keys are ANDed and `$or` takes a list of sub-documents.
pub struct FilterWhere {
    param_values: Vec<Value>,
    starting_param_index: usize,
}

impl FilterWhere {
    pub fn generate(where_data: &Value, starting_param_index: usize) -> Result<(String, Vec<Value>), FilterError> {
        let mut filter_where = Self { param_values: vec![], starting_param_index };
        let sql = filter_where.build_clause(where_data)?;
        Ok((sql, filter_where.param_values))
    }

    pub fn validate(where_data: &Value) -> Result<(), FilterError> {
        match where_data {
            Value::Null | Value::Object(_) => Ok(()),
            _ => Err(FilterError::InvalidWhereClause("WHERE must be an object".to_string())),
        }
    }

    fn build_clause(&mut self, where_data: &Value) -> Result<String, FilterError> {
        let obj = match where_data {
            Value::Null => return Ok("1=1".to_string()),
            Value::Object(obj) => obj,
            _ => return Err(FilterError::InvalidWhereClause("Unsupported WHERE format".to_string())),
        };

        let mut sql_conditions = vec![];
        for (key, value) in obj {
            if key == "$or" {
                sql_conditions.push(self.build_or(value)?);
            } else if key.starts_with('$') {
                return Err(FilterError::UnsupportedOperator(key.to_string()));
            } else {
                for condition in Self::parse_field_condition(key, value)? {
                    sql_conditions.push(self.build_sql_condition(&condition)?);
                }
            }
        }

        if sql_conditions.is_empty() {
            Ok("1=1".to_string())
        } else {
            Ok(sql_conditions.join(" AND "))
        }
    }

    fn build_or(&mut self, value: &Value) -> Result<String, FilterError> {
        let arr = value
            .as_array()
            .ok_or_else(|| FilterError::InvalidOperatorData("$or requires array".to_string()))?;
        if arr.is_empty() {
            // Empty disjunction matches nothing
            return Ok("1=0".to_string());
        }
        let mut sql_parts = Vec::with_capacity(arr.len());
        for v in arr {
            sql_parts.push(format!("({})", self.build_clause(v)?));
        }
        Ok(format!("({})", sql_parts.join(" OR ")))
    }

    fn parse_field_condition(field: &str, value: &Value) -> Result<Vec<FilterWhereInfo>, FilterError> {
        if !is_identifier(field) {
            return Err(FilterError::InvalidColumn(field.to_string()));
        }

        if let Value::Object(obj) = value {
            obj.iter()
                .map(|(op_key, op_val)| {
                    Ok(FilterWhereInfo {
                        column: field.to_string(),
                        operator: FilterOp::from_key(op_key)?,
                        data: op_val.clone(),
                    })
                })
                .collect()
        } else {
            // Implicit equality: { field: value }
            Ok(vec![FilterWhereInfo { column: field.to_string(), operator: FilterOp::Eq, data: value.clone() }])
        }
    }

    fn build_sql_condition(&mut self, condition: &FilterWhereInfo) -> Result<String, FilterError> {
        let quoted_column = format!("\"{}\"", condition.column);
        let data = condition.data.clone();
        Ok(match condition.operator.comparison() {
            Some(infix) => format!("{} {} {}", quoted_column, infix, self.param(data)),
            None => {
                // $find
                let needle = data
                    .as_str()
                    .ok_or_else(|| FilterError::InvalidOperatorData("$find requires a string".to_string()))?;
                let pattern = format!("%{}%", escape_like(needle));
                format!("{} ILIKE {} ESCAPE '\\'", quoted_column, self.param(Value::String(pattern)))
            }
        })
    }

    fn param(&mut self, value: Value) -> String {
        self.param_values.push(value);
        format!("${}", self.starting_param_index + self.param_values.len())
    }
}

/// Escape LIKE metacharacters so the needle matches literally.
fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn implicit_equality_binds_one_param() {
        let (sql, params) = FilterWhere::generate(&json!({ "color": "Red" }), 0).unwrap();
        assert_eq!(sql, "\"color\" = $1");
        assert_eq!(params, vec![json!("Red")]);
    }

    #[test]
    fn comparison_operators() {
        let (sql, params) = FilterWhere::generate(&json!({ "stock": { "$lte": 0 } }), 0).unwrap();
        assert_eq!(sql, "\"stock\" <= $1");
        assert_eq!(params, vec![json!(0)]);
    }

    #[test]
    fn or_numbers_params_sequentially() {
        let where_data = json!({
            "$or": [
                { "color": { "$find": "re" } },
                { "size": { "$find": "re" } }
            ]
        });
        let (sql, params) = FilterWhere::generate(&where_data, 0).unwrap();
        assert_eq!(
            sql,
            "((\"color\" ILIKE $1 ESCAPE '\\') OR (\"size\" ILIKE $2 ESCAPE '\\'))"
        );
        assert_eq!(params, vec![json!("%re%"), json!("%re%")]);
    }

    #[test]
    fn find_escapes_like_metacharacters() {
        let (_, params) = FilterWhere::generate(&json!({ "size": { "$find": "50%_x" } }), 0).unwrap();
        assert_eq!(params, vec![json!("%50\\%\\_x%")]);
    }

    #[test]
    fn empty_find_matches_everything() {
        let (_, params) = FilterWhere::generate(&json!({ "color": { "$find": "" } }), 0).unwrap();
        assert_eq!(params, vec![json!("%%")]);
    }

    #[test]
    fn starting_index_offsets_placeholders() {
        let (sql, _) = FilterWhere::generate(&json!({ "stock": { "$gt": 0 } }), 2).unwrap();
        assert_eq!(sql, "\"stock\" > $3");
    }

    #[test]
    fn rejects_unknown_operator_and_bad_column() {
        assert!(matches!(
            FilterWhere::generate(&json!({ "stock": { "$regex": "x" } }), 0),
            Err(FilterError::UnsupportedOperator(_))
        ));
        assert!(matches!(
            FilterWhere::generate(&json!({ "stock\"; DROP": 1 }), 0),
            Err(FilterError::InvalidColumn(_))
        ));
    }

    #[test]
    fn empty_or_matches_nothing() {
        let (sql, params) = FilterWhere::generate(&json!({ "$or": [] }), 0).unwrap();
        assert_eq!(sql, "1=0");
        assert!(params.is_empty());
    }

    #[test]
    fn sibling_fields_are_anded() {
        let (sql, params) = FilterWhere::generate(&json!({ "color": "Red", "stock": { "$gt": 0 } }), 0).unwrap();
        assert_eq!(sql, "\"color\" = $1 AND \"stock\" > $2");
        assert_eq!(params, vec![json!("Red"), json!(0)]);
    }

    #[test]
    fn only_or_is_a_logical_operator() {
        assert!(matches!(
            FilterWhere::generate(&json!({ "$not": { "color": "Red" } }), 0),
            Err(FilterError::UnsupportedOperator(op)) if op == "$not"
        ));
    }
}
