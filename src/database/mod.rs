pub mod manager;
pub mod query_builder;
pub mod models;

pub use manager::{DatabaseManager, DatabaseError};
pub use models::{ClothingItem, ClothingPatch, NewClothing};
