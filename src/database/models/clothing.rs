use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Stock strictly below this is "low stock"
pub const LOW_STOCK_THRESHOLD: i64 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ClothingItem {
    pub id: Uuid,
    pub color: String,
    pub size: String,
    pub price: f64,
    pub stock: i64,
}

/// Create payload; absent attributes take their zero value, unknown fields are ignored
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewClothing {
    pub color: String,
    pub size: String,
    pub price: f64,
    pub stock: i64,
}

/// Partial update; only the attributes present are replaced
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClothingPatch {
    pub color: Option<String>,
    pub size: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
}

impl ClothingItem {
    pub fn from_new(id: Uuid, data: NewClothing) -> Self {
        Self {
            id,
            color: data.color,
            size: data.size,
            price: data.price,
            stock: data.stock,
        }
    }

    pub fn apply(&mut self, patch: ClothingPatch) {
        if let Some(color) = patch.color { self.color = color; }
        if let Some(size) = patch.size { self.size = size; }
        if let Some(price) = patch.price { self.price = price; }
        if let Some(stock) = patch.stock { self.stock = stock; }
    }

    pub fn is_available(&self) -> bool {
        self.stock > 0
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.stock <= 0
    }

    pub fn is_low_stock(&self) -> bool {
        self.stock < LOW_STOCK_THRESHOLD
    }

    /// Case-insensitive substring match against color or size
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.color.to_lowercase().contains(&needle) || self.size.to_lowercase().contains(&needle)
    }
}
