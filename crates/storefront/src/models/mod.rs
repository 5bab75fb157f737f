//! Domain models for the storefront.
//!
//! These are validated domain objects, separate from the database row types
//! in [`crate::db`].

pub mod lead;
pub mod order;
pub mod product;
pub mod seller;
pub mod session;
pub mod shop;

pub use lead::{Lead, LeadSummary, NewLead};
pub use order::{NewOrder, Order};
pub use product::{InventoryStats, NewProduct, Product, ProductInputError, ProductWithShop};
pub use seller::Seller;
pub use session::{CurrentSeller, keys as session_keys};
pub use shop::{NewShop, Shop, ShopSettings, ShopSummary};
