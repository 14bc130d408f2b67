// handlers/protected/clothing/mod.rs - /api/v1/clothing handlers

mod collection;
mod record;
mod search;
mod stock;
mod utils;

pub use collection::{available, create, list, low_stock, out_of_stock};
pub use record::{delete, get, update};
pub use search::{search, search_by_color, search_by_size};
pub use stock::{decrease_stock, increase_stock, StockAdjustment};
