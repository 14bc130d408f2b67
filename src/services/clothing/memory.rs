use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ClothingRepository, StockDecrease};
use crate::database::{ClothingItem, ClothingPatch, DatabaseError, NewClothing};

/// In-process clothing table, kept in insertion order
#[derive(Debug, Default)]
pub struct InMemoryClothingRepository {
    items: RwLock<Vec<ClothingItem>>,
}

impl InMemoryClothingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn select(&self, predicate: impl Fn(&ClothingItem) -> bool) -> Vec<ClothingItem> {
        self.items.read().await.iter().filter(|item| predicate(item)).cloned().collect()
    }

    async fn modify(
        &self,
        id: Uuid,
        change: impl FnOnce(&mut ClothingItem) -> Result<(), DatabaseError>,
    ) -> Result<Option<ClothingItem>, DatabaseError> {
        let mut items = self.items.write().await;
        let Some(item) = items.iter_mut().find(|item| item.id == id) else {
            return Ok(None);
        };
        change(item)?;
        Ok(Some(item.clone()))
    }

    /// Overflow is reported as `StockOutOfRange`, the same as the PostgreSQL backend
    async fn adjust_stock(
        &self,
        id: Uuid,
        adjust: fn(i64, i64) -> Option<i64>,
        quantity: i64,
    ) -> Result<Option<ClothingItem>, DatabaseError> {
        self.modify(id, |item| {
            item.stock = adjust(item.stock, quantity).ok_or(DatabaseError::StockOutOfRange)?;
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl ClothingRepository for InMemoryClothingRepository {
    async fn get_all(&self) -> Result<Vec<ClothingItem>, DatabaseError> {
        Ok(self.items.read().await.clone())
    }

    async fn add(&self, data: NewClothing) -> Result<ClothingItem, DatabaseError> {
        let item = ClothingItem::from_new(Uuid::new_v4(), data);
        self.items.write().await.push(item.clone());
        Ok(item)
    }

    async fn find_by_color(&self, color: &str) -> Result<Vec<ClothingItem>, DatabaseError> {
        Ok(self.select(|item| item.color == color).await)
    }

    async fn find_by_size(&self, size: &str) -> Result<Vec<ClothingItem>, DatabaseError> {
        Ok(self.select(|item| item.size == size).await)
    }

    async fn find_by_free_text(&self, text: &str) -> Result<Vec<ClothingItem>, DatabaseError> {
        Ok(self.select(|item| item.matches_text(text)).await)
    }

    async fn increase_stock(&self, id: Uuid, quantity: i64) -> Result<Option<ClothingItem>, DatabaseError> {
        self.adjust_stock(id, i64::checked_add, quantity).await
    }

    async fn decrease_stock(&self, id: Uuid, quantity: i64) -> Result<Option<ClothingItem>, DatabaseError> {
        self.adjust_stock(id, i64::checked_sub, quantity).await
    }

    async fn decrease_stock_checked(&self, id: Uuid, quantity: i64) -> Result<StockDecrease, DatabaseError> {
        let mut items = self.items.write().await;
        let Some(item) = items.iter_mut().find(|item| item.id == id) else {
            return Ok(StockDecrease::NotFound);
        };
        if item.stock < quantity {
            return Ok(StockDecrease::Insufficient { available: item.stock });
        }
        item.stock = item.stock.checked_sub(quantity).ok_or(DatabaseError::StockOutOfRange)?;
        Ok(StockDecrease::Decreased(item.clone()))
    }

    async fn get_available(&self) -> Result<Vec<ClothingItem>, DatabaseError> {
        Ok(self.select(ClothingItem::is_available).await)
    }

    async fn get_out_of_stock(&self) -> Result<Vec<ClothingItem>, DatabaseError> {
        Ok(self.select(ClothingItem::is_out_of_stock).await)
    }

    async fn get_low_stock(&self) -> Result<Vec<ClothingItem>, DatabaseError> {
        Ok(self.select(ClothingItem::is_low_stock).await)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<ClothingItem>, DatabaseError> {
        Ok(self.items.read().await.iter().find(|item| item.id == id).cloned())
    }

    async fn update(&self, id: Uuid, data: ClothingPatch) -> Result<Option<ClothingItem>, DatabaseError> {
        self.modify(id, |item| {
            item.apply(data);
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|item| item.id != id);
        Ok(items.len() < before)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
