pub mod clothing;

pub use clothing::{ClothingRepository, InMemoryClothingRepository, PgClothingRepository, StockDecrease};
