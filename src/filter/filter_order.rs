use serde_json::Value;

use super::error::FilterError;
use super::filter::is_identifier;
use super::types::{FilterOrderInfo, SortDirection};

pub struct FilterOrder;

impl FilterOrder {
    pub fn validate_and_parse(order: &Value) -> Result<Vec<FilterOrderInfo>, FilterError> {
        // "col [asc|desc], col2 ..."
        let infos = match order {
            Value::String(s) => Self::parse_order_string(s),
            _ => return Err(FilterError::InvalidOperatorData("ORDER must be a string".to_string())),
        };

        if let Some(bad) = infos.iter().find(|i| !is_identifier(&i.column)) {
            return Err(FilterError::InvalidColumn(bad.column.clone()));
        }
        Ok(infos)
    }

    fn parse_order_string(s: &str) -> Vec<FilterOrderInfo> {
        // split on commas, then each token into column and direction
        s.split(',')
            .filter_map(|part| {
                let mut it = part.split_whitespace();
                let col = it.next()?;
                Some(FilterOrderInfo {
                    column: col.to_string(),
                    sort: Self::parse_direction(it.next().unwrap_or("asc")),
                })
            })
            .collect()
    }

    fn parse_direction(dir: &str) -> SortDirection {
        if dir.eq_ignore_ascii_case("desc") { SortDirection::Desc } else { SortDirection::Asc }
    }

    pub fn generate(infos: &[FilterOrderInfo]) -> String {
        if infos.is_empty() { return String::new(); }
        let parts: Vec<String> = infos
            .iter()
            .map(|i| format!("\"{}\" {}", i.column, i.sort.to_sql()))
            .collect();
        format!("ORDER BY {}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_order_string() {
        let infos = FilterOrder::validate_and_parse(&json!("created_at asc, id DESC")).unwrap();
        assert_eq!(FilterOrder::generate(&infos), "ORDER BY \"created_at\" ASC, \"id\" DESC");
    }

    #[test]
    fn rejects_non_string_order() {
        assert!(FilterOrder::validate_and_parse(&json!(["id asc"])).is_err());
    }

    #[test]
    fn rejects_injected_column() {
        assert!(FilterOrder::validate_and_parse(&json!("id; DROP TABLE clothing")).is_err());
    }
}
