//! Core types for Sanndikaa.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod catalog;
pub mod email;
pub mod id;
pub mod money;
pub mod phone;
pub mod slug;
pub mod status;
pub mod theme;

pub use catalog::Category;
pub use email::{Email, EmailError};
pub use id::*;
pub use money::{Dalasi, PriceError};
pub use phone::{PhoneError, WhatsAppNumber};
pub use slug::{ShopSlug, SlugError};
pub use status::{OrderStatus, PaymentMethod};
pub use theme::{PosterTheme, ThemeColor};
