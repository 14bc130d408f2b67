use serde_json::Value;
use sqlx::{
    postgres::{PgArguments, PgRow},
    query::QueryAs,
    FromRow, PgPool, Postgres,
};

use crate::database::manager::DatabaseError;
use crate::filter::{Filter, FilterData};

/// SELECT over one table, built from a filter document and decoded into `T`
pub struct QueryBuilder<T> {
    filter: Filter,
    _row: std::marker::PhantomData<T>,
}

impl<T> QueryBuilder<T>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    pub fn new(table_name: impl Into<String>) -> Result<Self, DatabaseError> {
        Ok(Self {
            filter: Filter::new(table_name)?,
            _row: std::marker::PhantomData,
        })
    }

    pub fn filter(mut self, filter_data: FilterData) -> Result<Self, DatabaseError> {
        self.filter.assign(filter_data)?;
        Ok(self)
    }

    pub async fn fetch_all(self, pool: &PgPool) -> Result<Vec<T>, DatabaseError> {
        let sql = self.filter.to_sql()?;
        tracing::debug!(query = %sql.query, params = sql.params.len(), "select");

        let mut query = sqlx::query_as::<_, T>(&sql.query);
        for param in &sql.params {
            query = bind_param(query, param)?;
        }
        Ok(query.fetch_all(pool).await?)
    }
}

/// Bind one filter parameter. Clothing filters only compare strings and numbers.
fn bind_param<'q, O>(
    query: QueryAs<'q, Postgres, O, PgArguments>,
    value: &'q Value,
) -> Result<QueryAs<'q, Postgres, O, PgArguments>, DatabaseError>
where
    O: for<'r> FromRow<'r, PgRow>,
{
    Ok(match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => query.bind(i),
            None => query.bind(n.as_f64().unwrap_or_default()),
        },
        Value::String(s) => query.bind(s.as_str()),
        other => {
            return Err(DatabaseError::QueryError(format!("cannot bind filter value {}", other)));
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::ClothingItem;
    use serde_json::json;

    #[test]
    fn rejects_unsupported_params() {
        let values = [json!(null), json!(true), json!(["a", "b"]), json!({ "a": 1 })];
        for value in &values {
            let query = sqlx::query_as::<_, ClothingItem>("SELECT 1");
            assert!(matches!(bind_param(query, value), Err(DatabaseError::QueryError(_))));
        }
    }

    #[test]
    fn binds_strings_and_numbers() {
        let values = [json!(5), json!(2.5), json!("Red")];
        for value in &values {
            let query = sqlx::query_as::<_, ClothingItem>("SELECT 1");
            assert!(bind_param(query, value).is_ok());
        }
    }

    #[test]
    fn invalid_table_is_a_query_error() {
        assert!(matches!(
            QueryBuilder::<ClothingItem>::new("clothing; drop"),
            Err(DatabaseError::QueryError(_))
        ));
    }
}
