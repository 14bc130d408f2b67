use async_trait::async_trait;
use serde_json::{json, Value};
use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::info;
use uuid::Uuid;

use super::{ClothingRepository, StockDecrease};
use crate::database::models::LOW_STOCK_THRESHOLD;
use crate::database::query_builder::QueryBuilder;
use crate::database::{ClothingItem, ClothingPatch, DatabaseError, DatabaseManager, NewClothing};
use crate::filter::FilterData;

const TABLE: &str = "clothing";
const COLUMNS: &str = r#""id", "color", "size", "price", "stock""#;

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS "clothing" (
        "id" UUID PRIMARY KEY,
        "color" TEXT NOT NULL DEFAULT '',
        "size" TEXT NOT NULL DEFAULT '',
        "price" DOUBLE PRECISION NOT NULL DEFAULT 0,
        "stock" BIGINT NOT NULL DEFAULT 0,
        "created_at" TIMESTAMPTZ NOT NULL DEFAULT now()
    )
"#;

/// Clothing repository over the `clothing` table.
///
/// The table is created on first use rather than at startup, so a database that was
/// down when the process started is picked up once it becomes reachable.
pub struct PgClothingRepository {
    database: Arc<DatabaseManager>,
    schema_ready: OnceCell<()>,
}

impl PgClothingRepository {
    pub fn new(database: Arc<DatabaseManager>) -> Self {
        Self {
            database,
            schema_ready: OnceCell::new(),
        }
    }

    async fn pool(&self) -> Result<&PgPool, DatabaseError> {
        let pool = self.database.pool()?;
        self.schema_ready
            .get_or_try_init(|| async {
                sqlx::query(CREATE_TABLE).execute(pool).await?;
                info!("Ensured table \"{}\"", TABLE);
                Ok::<_, DatabaseError>(())
            })
            .await?;
        Ok(pool)
    }

    /// Listing in creation order, optionally narrowed by a WHERE document
    async fn select(&self, where_clause: Option<Value>) -> Result<Vec<ClothingItem>, DatabaseError> {
        let pool = self.pool().await?;
        let filter = FilterData {
            select: Some(["id", "color", "size", "price", "stock"].map(String::from).to_vec()),
            where_clause,
            order: Some(json!("created_at asc, id asc")),
        };
        QueryBuilder::<ClothingItem>::new(TABLE)?.filter(filter)?.fetch_all(pool).await
    }

    /// `op` is `+` or `-`; a result outside BIGINT is `StockOutOfRange`
    async fn adjust_stock(&self, id: Uuid, op: char, quantity: i64) -> Result<Option<ClothingItem>, DatabaseError> {
        let sql = format!(r#"UPDATE "clothing" SET "stock" = "stock" {op} $2 WHERE "id" = $1 RETURNING {COLUMNS}"#);
        sqlx::query_as::<_, ClothingItem>(&sql)
            .bind(id)
            .bind(quantity)
            .fetch_optional(self.pool().await?)
            .await
            .map_err(DatabaseError::from_stock_update)
    }
}

#[async_trait]
impl ClothingRepository for PgClothingRepository {
    async fn get_all(&self) -> Result<Vec<ClothingItem>, DatabaseError> {
        self.select(None).await
    }

    async fn add(&self, data: NewClothing) -> Result<ClothingItem, DatabaseError> {
        let sql = format!(
            r#"INSERT INTO "clothing" ("id", "color", "size", "price", "stock") VALUES ($1, $2, $3, $4, $5) RETURNING {COLUMNS}"#
        );
        let row = sqlx::query_as::<_, ClothingItem>(&sql)
            .bind(Uuid::new_v4())
            .bind(&data.color)
            .bind(&data.size)
            .bind(data.price)
            .bind(data.stock)
            .fetch_one(self.pool().await?)
            .await?;
        Ok(row)
    }

    async fn find_by_color(&self, color: &str) -> Result<Vec<ClothingItem>, DatabaseError> {
        self.select(Some(json!({ "color": color }))).await
    }

    async fn find_by_size(&self, size: &str) -> Result<Vec<ClothingItem>, DatabaseError> {
        self.select(Some(json!({ "size": size }))).await
    }

    async fn find_by_free_text(&self, text: &str) -> Result<Vec<ClothingItem>, DatabaseError> {
        self.select(Some(json!({
            "$or": [
                { "color": { "$find": text } },
                { "size": { "$find": text } }
            ]
        })))
        .await
    }

    async fn increase_stock(&self, id: Uuid, quantity: i64) -> Result<Option<ClothingItem>, DatabaseError> {
        self.adjust_stock(id, '+', quantity).await
    }

    async fn decrease_stock(&self, id: Uuid, quantity: i64) -> Result<Option<ClothingItem>, DatabaseError> {
        self.adjust_stock(id, '-', quantity).await
    }

    async fn decrease_stock_checked(&self, id: Uuid, quantity: i64) -> Result<StockDecrease, DatabaseError> {
        let pool = self.pool().await?;
        let sql = format!(
            r#"UPDATE "clothing" SET "stock" = "stock" - $2 WHERE "id" = $1 AND "stock" >= $2 RETURNING {COLUMNS}"#
        );
        let updated = sqlx::query_as::<_, ClothingItem>(&sql)
            .bind(id)
            .bind(quantity)
            .fetch_optional(pool)
            .await
            .map_err(DatabaseError::from_stock_update)?;
        if let Some(item) = updated {
            return Ok(StockDecrease::Decreased(item));
        }

        // Nothing updated: either the id is unknown or the guard rejected it
        let stock = sqlx::query_scalar::<_, i64>(r#"SELECT "stock" FROM "clothing" WHERE "id" = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(match stock {
            Some(available) => StockDecrease::Insufficient { available },
            None => StockDecrease::NotFound,
        })
    }

    async fn get_available(&self) -> Result<Vec<ClothingItem>, DatabaseError> {
        self.select(Some(json!({ "stock": { "$gt": 0 } }))).await
    }

    async fn get_out_of_stock(&self) -> Result<Vec<ClothingItem>, DatabaseError> {
        self.select(Some(json!({ "stock": { "$lte": 0 } }))).await
    }

    async fn get_low_stock(&self) -> Result<Vec<ClothingItem>, DatabaseError> {
        self.select(Some(json!({ "stock": { "$lt": LOW_STOCK_THRESHOLD } }))).await
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<ClothingItem>, DatabaseError> {
        let sql = format!(r#"SELECT {COLUMNS} FROM "clothing" WHERE "id" = $1"#);
        let row = sqlx::query_as::<_, ClothingItem>(&sql)
            .bind(id)
            .fetch_optional(self.pool().await?)
            .await?;
        Ok(row)
    }

    async fn update(&self, id: Uuid, data: ClothingPatch) -> Result<Option<ClothingItem>, DatabaseError> {
        let sql = format!(
            r#"UPDATE "clothing" SET
                "color" = COALESCE($2, "color"),
                "size" = COALESCE($3, "size"),
                "price" = COALESCE($4, "price"),
                "stock" = COALESCE($5, "stock")
            WHERE "id" = $1
            RETURNING {COLUMNS}"#
        );
        let row = sqlx::query_as::<_, ClothingItem>(&sql)
            .bind(id)
            .bind(data.color)
            .bind(data.size)
            .bind(data.price)
            .bind(data.stock)
            .fetch_optional(self.pool().await?)
            .await?;
        Ok(row)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query(r#"DELETE FROM "clothing" WHERE "id" = $1"#)
            .bind(id)
            .execute(self.pool().await?)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        self.database.health_check().await
    }
}
