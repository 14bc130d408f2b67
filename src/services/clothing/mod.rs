//! Data access for clothing items.
//!
//! Handlers talk to the store only through [`ClothingRepository`]; the PostgreSQL
//! backend is used in production and the in-memory one for local runs and tests.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::database::{ClothingItem, ClothingPatch, DatabaseError, NewClothing};

pub use memory::InMemoryClothingRepository;
pub use postgres::PgClothingRepository;

/// Outcome of a sufficiency-checked stock decrement
#[derive(Debug, Clone, PartialEq)]
pub enum StockDecrease {
    NotFound,
    Insufficient { available: i64 },
    Decreased(ClothingItem),
}

#[async_trait]
pub trait ClothingRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<ClothingItem>, DatabaseError>;

    /// Insert a new item; the store assigns the id
    async fn add(&self, data: NewClothing) -> Result<ClothingItem, DatabaseError>;

    /// Exact match on color
    async fn find_by_color(&self, color: &str) -> Result<Vec<ClothingItem>, DatabaseError>;

    /// Exact match on size
    async fn find_by_size(&self, size: &str) -> Result<Vec<ClothingItem>, DatabaseError>;

    /// Case-insensitive substring match against color OR size; "" matches everything
    async fn find_by_free_text(&self, text: &str) -> Result<Vec<ClothingItem>, DatabaseError>;

    async fn increase_stock(&self, id: Uuid, quantity: i64) -> Result<Option<ClothingItem>, DatabaseError>;

    /// Unconditional decrement; the store applies no floor
    async fn decrease_stock(&self, id: Uuid, quantity: i64) -> Result<Option<ClothingItem>, DatabaseError>;

    /// Decrement only if `stock >= quantity`, as one atomic step
    async fn decrease_stock_checked(&self, id: Uuid, quantity: i64) -> Result<StockDecrease, DatabaseError>;

    /// `stock > 0`
    async fn get_available(&self) -> Result<Vec<ClothingItem>, DatabaseError>;

    /// `stock <= 0`
    async fn get_out_of_stock(&self) -> Result<Vec<ClothingItem>, DatabaseError>;

    /// `stock < LOW_STOCK_THRESHOLD`
    async fn get_low_stock(&self) -> Result<Vec<ClothingItem>, DatabaseError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<ClothingItem>, DatabaseError>;

    /// Replace the provided fields and return the post-update item
    async fn update(&self, id: Uuid, data: ClothingPatch) -> Result<Option<ClothingItem>, DatabaseError>;

    /// True if an item was removed
    async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError>;

    /// Connectivity probe for health checks
    async fn ping(&self) -> Result<(), DatabaseError>;
}
