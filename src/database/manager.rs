use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::DatabaseConfig;

/// Errors from the store layer; surfaced verbatim to API callers as 500s
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Stock out of range")]
    StockOutOfRange,

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl DatabaseError {
    /// Maps PostgreSQL `numeric_value_out_of_range` (22003) on a stock update to `StockOutOfRange`
    pub fn from_stock_update(err: sqlx::Error) -> Self {
        let out_of_range = err
            .as_database_error()
            .and_then(|db| db.code())
            .as_deref()
            == Some("22003");
        if out_of_range {
            DatabaseError::StockOutOfRange
        } else {
            DatabaseError::Sqlx(err)
        }
    }
}

impl From<crate::filter::FilterError> for DatabaseError {
    fn from(err: crate::filter::FilterError) -> Self {
        DatabaseError::QueryError(err.to_string())
    }
}

/// Owns the PostgreSQL pool for the lifetime of the process.
///
/// Construction never fails: a missing or unreachable database is logged and the
/// manager keeps serving in a degraded state where every pool request errors (no URL)
/// or reconnects lazily (URL present but the server was down at startup).
pub struct DatabaseManager {
    pool: Result<PgPool, &'static str>,
}

impl DatabaseManager {
    pub async fn connect(config: &DatabaseConfig) -> Self {
        let Some(url) = config.url.as_deref() else {
            error!("Error connecting to database: DATABASE_URL is not set");
            info!("=== Database not connected. ===");
            return Self::disconnected();
        };

        let redacted = match Self::redact_url(url) {
            Ok(redacted) => redacted,
            Err(e) => {
                error!("Error connecting to database: {}", e);
                info!("=== Database not connected. ===");
                return Self { pool: Err("a valid DATABASE_URL") };
            }
        };

        let options = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout));

        match options.clone().connect(url).await {
            Ok(pool) => {
                info!("=== Database connected. === ({})", redacted);
                Self { pool: Ok(pool) }
            }
            Err(e) => {
                error!("Error connecting to database {}: {}", redacted, e);
                info!("=== Database not connected. ===");
                match options.connect_lazy(url) {
                    Ok(pool) => {
                        warn!("Serving degraded; store calls will retry the connection per request");
                        Self { pool: Ok(pool) }
                    }
                    Err(e) => {
                        error!("Cannot build lazy pool for {}: {}", redacted, e);
                        Self { pool: Err("a valid DATABASE_URL") }
                    }
                }
            }
        }
    }

    /// Manager with no pool at all; every store call fails with `ConfigMissing`
    pub fn disconnected() -> Self {
        Self { pool: Err("DATABASE_URL") }
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool: Ok(pool) }
    }

    pub fn pool(&self) -> Result<&PgPool, DatabaseError> {
        self.pool.as_ref().map_err(|missing| DatabaseError::ConfigMissing(*missing))
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(self.pool()?).await?;
        Ok(())
    }

    pub async fn close(&self) {
        if let Ok(pool) = &self.pool {
            pool.close().await;
            info!("Closed database pool");
        }
    }

    /// Strip the password from a connection URL so it can be logged
    pub fn redact_url(raw: &str) -> Result<String, DatabaseError> {
        let mut url = url::Url::parse(raw).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        if url.password().is_some() {
            url.set_password(Some("****")).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        }
        Ok(url.into())
    }
}
