pub mod clothing;

pub use clothing::{ClothingItem, ClothingPatch, NewClothing, LOW_STOCK_THRESHOLD};
